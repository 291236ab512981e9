/*
Implements:
 - the JSON scheduling request (exams, conflicts, labels, search parameters)
 - the JSON enrollment upload report
*/
use log::debug;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::enrollment::EnrollmentSummary;
use crate::schedule::{LabelStyle, ScheduleReport, SearchParams, SlotLabels, schedule};


/** a conflict, as found in a request */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConflictEntry {
    /// "A-B"
    Joined(String),
    /// ["A", "B"]
    Pair(Vec<String>),
    /// anything else (ignored)
    Malformed(Value),
}

impl ConflictEntry {
    /** returns the two exams of the conflict, or None if the entry is malformed
    (not exactly two elements, or a blank element) */
    pub fn to_pair(&self) -> Option<(String, String)> {
        let elements: Vec<&str> = match self {
            ConflictEntry::Joined(s) => s.split('-').collect(),
            ConflictEntry::Pair(v) => v.iter().map(String::as_str).collect(),
            ConflictEntry::Malformed(_) => return None,
        };
        match elements.as_slice() {
            [a, b] => {
                let (a, b) = (a.trim(), b.trim());
                if a.is_empty() || b.is_empty() { None } else { Some((a.to_string(), b.to_string())) }
            }
            _ => None,
        }
    }
}


/** scheduling request. Every field is optional. */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRequest {
    /// exams to schedule
    pub exams: Vec<String>,
    /// conflicting exams
    pub conflicts: Vec<ConflictEntry>,
    /// explicit slot labels (slot_labels[c-1] is the label of slot c)
    pub slot_labels: Option<Vec<String>>,
    /// generated labels (used when slot_labels is not given)
    pub label_style: LabelStyle,
    /// number of trials
    pub trials: Option<usize>,
    /// random seed
    pub seed: Option<u64>,
}

impl ScheduleRequest {
    /// request built from exams and conflicts derived from enrollments
    pub fn from_enrollments(summary: &EnrollmentSummary) -> Self {
        Self {
            exams: summary.exams.clone(),
            conflicts: summary.conflicts.iter()
                .map(|(a, b)| ConflictEntry::Pair(vec![a.clone(), b.clone()]))
                .collect(),
            ..Self::default()
        }
    }

    /// well-formed conflicts, and the number of malformed entries
    pub fn conflict_pairs(&self) -> (Vec<(String, String)>, usize) {
        let mut res = Vec::with_capacity(self.conflicts.len());
        let mut nb_malformed = 0;
        for c in &self.conflicts {
            match c.to_pair() {
                Some(p) => res.push(p),
                None => {
                    debug!("ignoring malformed conflict {:?}", c);
                    nb_malformed += 1;
                }
            }
        }
        (res, nb_malformed)
    }

    /// slot labels of the request
    pub fn labels(&self) -> SlotLabels {
        match &self.slot_labels {
            Some(l) if !l.is_empty() => SlotLabels::explicit(l.clone()),
            _ => SlotLabels::generated(self.label_style),
        }
    }

    /// search parameters of the request (defaults for missing values)
    pub fn search_params(&self) -> SearchParams {
        let default = SearchParams::default();
        SearchParams {
            trials: self.trials.unwrap_or(default.trials),
            seed: self.seed.unwrap_or(default.seed),
        }
    }

    /// schedules the request
    pub fn run(&self) -> ScheduleReport {
        let (conflicts, nb_malformed) = self.conflict_pairs();
        let mut report = schedule(&self.exams, &conflicts, &self.labels(), &self.search_params());
        report.dropped_conflicts += nb_malformed;
        report
    }
}


/** answer to an enrollment upload */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentReport {
    /// always "success"
    pub status: String,
    /// derived exams and conflicts
    #[serde(flatten)]
    pub summary: EnrollmentSummary,
}

impl From<EnrollmentSummary> for EnrollmentReport {
    fn from(summary: EnrollmentSummary) -> Self {
        Self { status: "success".to_string(), summary }
    }
}
