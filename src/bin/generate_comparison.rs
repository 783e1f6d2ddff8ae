//! Writes a plausible offline comparison dataset so the dashboards can be
//! exercised without the sensor hardware. Deterministic: the same seed
//! always produces the same file.

use anyhow::{Context, Result};

use sensordash::data::model::ComparisonReading;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (id, baseline °F, baseline %RH) per location
    let locations: [(&str, f64, f64); 4] = [
        ("1", 71.0, 38.0),
        ("2", 64.0, 52.0),
        ("3", 73.0, 36.0),
        ("4", 58.0, 60.0),
    ];
    let ventilator_states = ["off", "on"];
    let outside_buckets = ["low", "medium", "high"];
    let samples_per_combination = 12;

    let mut rows: Vec<ComparisonReading> = Vec::new();
    for (location, base_temp, base_humidity) in locations {
        for ventilator in ventilator_states {
            // A running ventilator pulls indoor readings toward outdoor air
            let temp_shift = if ventilator == "on" { -1.5 } else { 0.0 };
            for (bucket_index, outside) in outside_buckets.iter().enumerate() {
                let humidity_shift = 4.0 * bucket_index as f64;
                for _ in 0..samples_per_combination {
                    rows.push(ComparisonReading {
                        location: location.to_string(),
                        temperature: rng.gauss(base_temp + temp_shift, 1.2),
                        humidity: rng.gauss(base_humidity + humidity_shift, 2.5),
                        ventilator: ventilator.to_string(),
                        outside_humidity: outside.to_string(),
                    });
                }
            }
        }
    }

    let output_path = "dht11-temp-data-boxplot.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {} samples to {output_path}", rows.len());
    Ok(())
}
