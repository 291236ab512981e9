use std::collections::BTreeMap;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::color::{ConflictGraph, coloring_to_solution};
use crate::search::multi_trial::multi_trial_search;


/** how slot labels are generated when no explicit label is given */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// "Slot-1", "Slot-2", ...
    Numbered,
    /// "Day 1 – Morning", "Day 1 – Afternoon", "Day 2 – Morning", ...
    DayHalves,
}

impl Default for LabelStyle {
    fn default() -> Self { LabelStyle::Numbered }
}

impl std::str::FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numbered" => Ok(LabelStyle::Numbered),
            "day-halves" => Ok(LabelStyle::DayHalves),
            _ => Err(format!("unknown label style {}", s)),
        }
    }
}


/** maps color indices (starting at 1) to slot labels */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotLabels {
    style: LabelStyle,
    /// explicit labels (labels[c-1] is the label of color c)
    labels: Vec<String>,
}

impl SlotLabels {
    /// generated labels only
    pub fn generated(style: LabelStyle) -> Self {
        Self { style, labels: Vec::new() }
    }

    /// explicit labels, falling back to "Slot-N" past the end of the list
    pub fn explicit(labels: Vec<String>) -> Self {
        Self { style: LabelStyle::Numbered, labels }
    }

    /// label of color c (c >= 1)
    pub fn label(&self, c: usize) -> String {
        if let Some(l) = c.checked_sub(1).and_then(|i| self.labels.get(i)) {
            return l.clone();
        }
        match self.style {
            LabelStyle::Numbered => format!("Slot-{}", c),
            LabelStyle::DayHalves => {
                let half = if c % 2 == 1 { "Morning" } else { "Afternoon" };
                format!("Day {} – {}", (c + 1) / 2, half)
            }
        }
    }
}


/** search configuration */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// number of DSATUR + Kempe chains trials (at least 1)
    pub trials: usize,
    /// seed of the random tie-breaks
    pub seed: u64,
}

impl Default for SearchParams {
    fn default() -> Self { Self { trials: 1, seed: 0 } }
}


/** exams of a same slot */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGroup {
    /// slot label
    pub slot: String,
    /// exams scheduled in this slot (sorted)
    pub exams: Vec<String>,
}

/** naive schedule: one exam per slot */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// number of slots (= number of exams)
    pub total_time_slots: usize,
    /// exam -> slot label
    pub scheduled_exams: BTreeMap<String, String>,
}

/** result of a scheduling request */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// always "success" (scheduling never fails)
    pub status: String,
    /// number of distinct exams
    pub total_exams: usize,
    /// number of slots (colors) used
    pub total_time_slots: usize,
    /// exam -> slot label
    pub scheduled_exams: BTreeMap<String, String>,
    /// exams grouped by slot, in slot order
    pub slots: Vec<SlotGroup>,
    /// naive schedule used as comparison
    pub baseline: Baseline,
    /// (naive slots - slots) / naive slots * 100, rounded
    pub improvement_percent: i64,
    /// number of slots of the best trial before the Kempe chain post-pass
    pub dsatur_time_slots: usize,
    /// number of trials run
    pub trials: usize,
    /// trial of the best schedule (None: deterministic fallback)
    pub best_trial: Option<usize>,
    /// number of ignored conflicts
    pub dropped_conflicts: usize,
}


/// exam -> slot label
pub fn render(inst: &ConflictGraph, coloring: &[usize], labels: &SlotLabels) -> BTreeMap<String, String> {
    coloring.iter().enumerate()
        .map(|(v, c)| (inst.name(v).to_string(), labels.label(*c)))
        .collect()
}

/// exams grouped by slot (slots in color order, exams sorted)
pub fn slot_groups(inst: &ConflictGraph, coloring: &[usize], labels: &SlotLabels) -> Vec<SlotGroup> {
    coloring_to_solution(coloring).into_iter().enumerate()
        .map(|(i, vertices)| {
            let mut exams: Vec<String> = vertices.iter().map(|v| inst.name(*v).to_string()).collect();
            exams.sort();
            SlotGroup { slot: labels.label(i + 1), exams }
        })
        .collect()
}

/// one exam per slot, in input order (conflicts are ignored)
pub fn naive_baseline(exams: &[String], labels: &SlotLabels) -> Baseline {
    Baseline {
        total_time_slots: exams.len(),
        scheduled_exams: exams.iter().enumerate()
            .map(|(i, e)| (e.clone(), labels.label(i + 1)))
            .collect(),
    }
}

/// percentage of slots saved compared to the naive schedule, rounded half away from zero (0 if there is no exam)
pub fn improvement_percent(naive_slots: usize, optimized_slots: usize) -> i64 {
    if naive_slots == 0 { return 0; }
    let gain = naive_slots as f64 - optimized_slots as f64;
    (gain / naive_slots as f64 * 100.).round() as i64
}


/** schedules exams: builds the conflict graph, colors it with the multi-trial search
(seeded by params.seed), and renders the best coloring and the naive baseline.
*/
pub fn schedule<S, A, B>(
    exams: &[S],
    conflicts: &[(A, B)],
    labels: &SlotLabels,
    params: &SearchParams,
) -> ScheduleReport
where S: AsRef<str>, A: AsRef<str>, B: AsRef<str> {
    let inst = ConflictGraph::new(exams, conflicts);
    inst.display_statistics();
    let mut rng = StdRng::seed_from_u64(params.seed);
    let res = multi_trial_search(&inst, params.trials, &mut rng);
    let baseline = naive_baseline(inst.names(), labels);
    let improvement = improvement_percent(baseline.total_time_slots, res.nb_colors);
    info!(
        "{} exams scheduled in {} slots ({}% fewer than the naive schedule)",
        inst.nb_vertices(), res.nb_colors, improvement
    );
    ScheduleReport {
        status: "success".to_string(),
        total_exams: inst.nb_vertices(),
        total_time_slots: res.nb_colors,
        scheduled_exams: render(&inst, &res.coloring, labels),
        slots: slot_groups(&inst, &res.coloring, labels),
        baseline,
        improvement_percent: improvement,
        dsatur_time_slots: res.dsatur_colors,
        trials: res.nb_trials,
        best_trial: res.best_trial,
        dropped_conflicts: inst.nb_dropped_conflicts(),
    }
}
