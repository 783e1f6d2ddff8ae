use std::collections::BTreeMap;

use crate::chart::Figure;
use crate::data::filter::FilterState;
use crate::state::DashboardData;

// ---------------------------------------------------------------------------
// Slot identifiers
// ---------------------------------------------------------------------------

/// Named input slots: one per interactive control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    /// The sensor-location checklist.
    Locations,
    /// The date-range picker.
    DateRange,
    /// The y-axis radio selector.
    Metric,
}

/// Named output slots: one per interactive chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputId {
    LineChart,
    VentilatorBoxes,
    OutsideHumidityBoxes,
}

// ---------------------------------------------------------------------------
// Update rules
// ---------------------------------------------------------------------------

/// Rules are stateless: plain `fn` pointers over the write-once data and
/// the current control values.
pub type RuleFn = fn(&DashboardData, &FilterState) -> Figure;

/// One row of the update table: regenerate `output` whenever one of
/// `inputs` changes.
pub struct UpdateRule {
    pub output: OutputId,
    pub inputs: &'static [InputId],
    pub func: RuleFn,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Holds the update table and the latest artifact per output slot.
pub struct Dispatcher {
    rules: Vec<UpdateRule>,
    artifacts: BTreeMap<OutputId, Figure>,
}

impl Dispatcher {
    /// Register an update table. Output slots must be unique.
    pub fn new(rules: Vec<UpdateRule>) -> Self {
        debug_assert!(
            {
                let outputs: std::collections::BTreeSet<_> =
                    rules.iter().map(|r| r.output).collect();
                outputs.len() == rules.len()
            },
            "duplicate output slot in update table"
        );
        Dispatcher {
            rules,
            artifacts: BTreeMap::new(),
        }
    }

    /// Evaluate every rule; used once for the initial render.
    pub fn refresh_all(&mut self, data: &DashboardData, filter: &FilterState) {
        for rule in &self.rules {
            self.artifacts.insert(rule.output, (rule.func)(data, filter));
        }
    }

    /// Re-evaluate exactly the rules that declare `input`. Returns how
    /// many ran.
    pub fn input_changed(
        &mut self,
        input: InputId,
        data: &DashboardData,
        filter: &FilterState,
    ) -> usize {
        let mut ran = 0;
        for rule in &self.rules {
            if rule.inputs.contains(&input) {
                self.artifacts.insert(rule.output, (rule.func)(data, filter));
                ran += 1;
            }
        }
        ran
    }

    /// Latest artifact for an output slot.
    pub fn artifact(&self, output: OutputId) -> Option<&Figure> {
        self.artifacts.get(&output)
    }
}
