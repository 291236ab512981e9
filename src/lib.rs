//! Exam timetabling as a graph coloring problem (DSATUR + Kempe chains)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// conflict graph, colorings and checker
pub mod color;

/// enrollment records: CSV reader, exams and conflicts derivation
pub mod enrollment;

/// coloring algorithms (DSATUR, Kempe chains, multi-trial search)
pub mod search;

/// slot labels, naive baseline and scheduling reports
pub mod schedule;

/// JSON scheduling request and enrollment report
pub mod request;

/// helper and utility methods for executables
pub mod util;
