//! Pairwise mean comparison across locations (Tukey's HSD).
//!
//! For each location pair the table carries the difference of means, the
//! simultaneous confidence interval and whether the null hypothesis of
//! equal means is rejected at the family-wise level [`ALPHA`].

use std::collections::BTreeMap;

use super::describe::mean;
use super::StatsError;

/// Family-wise significance level of the comparison table.
pub const ALPHA: f64 = 0.05;

/// Largest number of groups covered by the critical-value table.
pub const MAX_GROUPS: usize = 10;

/// One row of the pairwise comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseComparison {
    pub group_a: String,
    pub group_b: String,
    /// mean(b) − mean(a)
    pub mean_diff: f64,
    pub lower: f64,
    pub upper: f64,
    pub reject: bool,
}

/// Compare every pair of groups. `groups` maps group name to that group's
/// raw values; the result has exactly C(k, 2) rows in group order.
pub fn pairwise_tukey_hsd(
    groups: &BTreeMap<String, Vec<f64>>,
) -> Result<Vec<PairwiseComparison>, StatsError> {
    let k = groups.len();
    if k < 2 {
        return Err(StatsError::NotEnoughGroups(k));
    }
    if k > MAX_GROUPS {
        return Err(StatsError::TooManyGroups(k));
    }
    let n_total: usize = groups.values().map(Vec::len).sum();
    if n_total <= k {
        return Err(StatsError::NotEnoughSamples);
    }
    let df = n_total - k;

    // Pooled within-group variance (the one-way ANOVA mean square error)
    let ss_within: f64 = groups
        .values()
        .map(|values| {
            let m = mean(values);
            values.iter().map(|v| (v - m).powi(2)).sum::<f64>()
        })
        .sum();
    let mse = ss_within / df as f64;
    let q = q_critical(k, df);

    let summaries: Vec<(&String, f64, usize)> = groups
        .iter()
        .map(|(name, values)| (name, mean(values), values.len()))
        .collect();

    let mut rows = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..summaries.len() {
        for j in (i + 1)..summaries.len() {
            let (group_a, mean_a, n_a) = summaries[i];
            let (group_b, mean_b, n_b) = summaries[j];
            let diff = mean_b - mean_a;
            let se = (mse / 2.0 * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
            let half_width = q * se;
            rows.push(PairwiseComparison {
                group_a: group_a.clone(),
                group_b: group_b.clone(),
                mean_diff: diff,
                lower: diff - half_width,
                upper: diff + half_width,
                reject: diff.abs() > half_width,
            });
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Studentized range critical values, alpha = 0.05
// ---------------------------------------------------------------------------

/// Degrees-of-freedom rows of [`Q_TABLE`].
const Q_TABLE_DF: [f64; 26] = [
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0,
    18.0, 19.0, 20.0, 24.0, 30.0, 40.0, 60.0, 120.0, f64::INFINITY,
];

/// Upper 5% points q(k, df) of the studentized range for k = 2..=10
/// (Harter, 1960). Rows follow [`Q_TABLE_DF`].
#[rustfmt::skip]
const Q_TABLE: [[f64; 9]; 26] = [
    [17.97, 26.98, 32.82, 37.08, 40.41, 43.12, 45.40, 47.36, 49.07],
    [ 6.08,  8.33,  9.80, 10.88, 11.74, 12.44, 13.03, 13.54, 13.99],
    [ 4.50,  5.91,  6.82,  7.50,  8.04,  8.48,  8.85,  9.18,  9.46],
    [ 3.93,  5.04,  5.76,  6.29,  6.71,  7.05,  7.35,  7.60,  7.83],
    [ 3.64,  4.60,  5.22,  5.67,  6.03,  6.33,  6.58,  6.80,  6.99],
    [ 3.46,  4.34,  4.90,  5.30,  5.63,  5.90,  6.12,  6.32,  6.49],
    [ 3.34,  4.16,  4.68,  5.06,  5.36,  5.61,  5.82,  6.00,  6.16],
    [ 3.26,  4.04,  4.53,  4.89,  5.17,  5.40,  5.60,  5.77,  5.92],
    [ 3.20,  3.95,  4.41,  4.76,  5.02,  5.24,  5.43,  5.59,  5.74],
    [ 3.15,  3.88,  4.33,  4.65,  4.91,  5.12,  5.30,  5.46,  5.60],
    [ 3.11,  3.82,  4.26,  4.57,  4.82,  5.03,  5.20,  5.35,  5.49],
    [ 3.08,  3.77,  4.20,  4.51,  4.75,  4.95,  5.12,  5.27,  5.39],
    [ 3.06,  3.73,  4.15,  4.45,  4.69,  4.88,  5.05,  5.19,  5.32],
    [ 3.03,  3.70,  4.11,  4.41,  4.64,  4.83,  4.99,  5.13,  5.25],
    [ 3.01,  3.67,  4.08,  4.37,  4.59,  4.78,  4.94,  5.08,  5.20],
    [ 3.00,  3.65,  4.05,  4.33,  4.56,  4.74,  4.90,  5.03,  5.15],
    [ 2.98,  3.63,  4.02,  4.30,  4.52,  4.70,  4.86,  4.99,  5.11],
    [ 2.97,  3.61,  4.00,  4.28,  4.49,  4.67,  4.82,  4.96,  5.07],
    [ 2.96,  3.59,  3.98,  4.25,  4.47,  4.65,  4.79,  4.92,  5.04],
    [ 2.95,  3.58,  3.96,  4.23,  4.45,  4.62,  4.77,  4.90,  5.01],
    [ 2.92,  3.53,  3.90,  4.17,  4.37,  4.54,  4.68,  4.81,  4.92],
    [ 2.89,  3.49,  3.85,  4.10,  4.30,  4.46,  4.60,  4.72,  4.82],
    [ 2.86,  3.44,  3.79,  4.04,  4.23,  4.39,  4.52,  4.63,  4.73],
    [ 2.83,  3.40,  3.74,  3.98,  4.16,  4.31,  4.44,  4.55,  4.65],
    [ 2.80,  3.36,  3.68,  3.92,  4.10,  4.24,  4.36,  4.47,  4.56],
    [ 2.77,  3.31,  3.63,  3.86,  4.03,  4.17,  4.29,  4.39,  4.47],
];

/// Critical value q(ALPHA; k, df), interpolated linearly in 1/df between
/// tabulated rows. Callers validate 2 <= k <= MAX_GROUPS and df >= 1.
fn q_critical(k: usize, df: usize) -> f64 {
    debug_assert!((2..=MAX_GROUPS).contains(&k));
    debug_assert!(df >= 1);
    let col = k - 2;
    let df = df as f64;

    // The trailing INFINITY row guarantees a match.
    let row = Q_TABLE_DF
        .iter()
        .position(|&d| df <= d)
        .unwrap_or(Q_TABLE_DF.len() - 1);
    if row == 0 || df == Q_TABLE_DF[row] {
        return Q_TABLE[row][col];
    }
    // Interpolate on the reciprocal: q is close to linear in 1/df
    let (lo_df, hi_df) = (Q_TABLE_DF[row - 1], Q_TABLE_DF[row]);
    let (lo_q, hi_q) = (Q_TABLE[row - 1][col], Q_TABLE[row][col]);
    let t = (1.0 / df - 1.0 / hi_df) / (1.0 / lo_df - 1.0 / hi_df);
    hi_q + t * (lo_q - hi_q)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[f64])]) -> BTreeMap<String, Vec<f64>> {
        entries
            .iter()
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect()
    }

    #[test]
    fn tabulated_values_are_exact() {
        assert_eq!(q_critical(3, 6), 4.34);
        assert_eq!(q_critical(2, 1), 17.97);
        assert_eq!(q_critical(10, 120), 4.56);
    }

    #[test]
    fn interpolation_stays_between_neighbours() {
        let q = q_critical(4, 25);
        assert!(q < q_critical(4, 24));
        assert!(q > q_critical(4, 30));
        // Very large df approaches the asymptotic value
        assert!((q_critical(2, 1_000_000) - 2.77).abs() < 0.01);
    }

    #[test]
    fn pair_count_is_k_choose_2() {
        let g = groups(&[
            ("1", &[70.0, 71.0, 72.0]),
            ("2", &[63.0, 64.0, 65.0]),
            ("3", &[73.0, 74.0, 75.0]),
            ("4", &[48.0, 49.0, 50.0]),
        ]);
        let rows = pairwise_tukey_hsd(&g).unwrap();
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn matches_hand_checked_example() {
        // Three groups of three: means 2, 3, 6; MSE = 1, df = 6,
        // se = sqrt(1/3), q(3, 6) = 4.34 → half-width ≈ 2.5057
        let g = groups(&[
            ("a", &[1.0, 2.0, 3.0]),
            ("b", &[2.0, 3.0, 4.0]),
            ("c", &[5.0, 6.0, 7.0]),
        ]);
        let rows = pairwise_tukey_hsd(&g).unwrap();
        let half_width = 4.34 * (1.0f64 / 3.0).sqrt();

        let ab = &rows[0];
        assert_eq!((ab.group_a.as_str(), ab.group_b.as_str()), ("a", "b"));
        assert!((ab.mean_diff - 1.0).abs() < 1e-12);
        assert!((ab.lower - (1.0 - half_width)).abs() < 1e-9);
        assert!((ab.upper - (1.0 + half_width)).abs() < 1e-9);
        assert!(!ab.reject);

        let ac = &rows[1];
        assert!((ac.mean_diff - 4.0).abs() < 1e-12);
        assert!(ac.reject);

        let bc = &rows[2];
        assert!((bc.mean_diff - 3.0).abs() < 1e-12);
        assert!(bc.reject);
    }

    #[test]
    fn unbalanced_groups_use_per_group_sizes() {
        let g = groups(&[("a", &[1.0, 2.0, 3.0, 4.0]), ("b", &[10.0, 11.0])]);
        let rows = pairwise_tukey_hsd(&g).unwrap();
        // df = 6 - 2 = 4, MSE = (5 + 0.5) / 4 = 1.375
        let se = (1.375f64 / 2.0 * (1.0 / 4.0 + 1.0 / 2.0)).sqrt();
        let half_width = q_critical(2, 4) * se;
        assert!((rows[0].mean_diff - 8.0).abs() < 1e-12);
        assert!((rows[0].upper - (8.0 + half_width)).abs() < 1e-9);
        assert!(rows[0].reject);
    }

    #[test]
    fn degenerate_groupings_are_errors() {
        assert!(matches!(
            pairwise_tukey_hsd(&groups(&[("a", &[1.0, 2.0])])),
            Err(StatsError::NotEnoughGroups(1))
        ));
        assert!(matches!(
            pairwise_tukey_hsd(&groups(&[("a", &[1.0]), ("b", &[2.0])])),
            Err(StatsError::NotEnoughSamples)
        ));
    }
}
