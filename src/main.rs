//! Exam timetabling: assigns exams to a minimal number of time slots.


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

#[macro_use]
extern crate clap;
use clap::App;
use anyhow::{Result, anyhow};

use exam_slots::request::{EnrollmentReport, ScheduleRequest};
use exam_slots::util::{apply_params, export_results, read_enrollments, read_request};


/**
reads the subcommand and its input, schedules (or derives conflicts), and exports the results.
Logs are controlled by the RUST_LOG environment variable (ex: RUST_LOG=debug).
*/
pub fn main() -> Result<()> {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    match main_args.subcommand() {
        ("schedule", Some(args)) => {
            let mut request = read_request(args.value_of("request").unwrap_or("-"))?;
            apply_params(&mut request, args)?;
            export_results(&request.run(), args.value_of("output"))
        }
        ("enrollments", Some(args)) => {
            let summary = read_enrollments(args.value_of("csv").unwrap_or("-"))?;
            export_results(&EnrollmentReport::from(summary), args.value_of("output"))
        }
        ("plan", Some(args)) => {
            let summary = read_enrollments(args.value_of("csv").unwrap_or("-"))?;
            let mut request = ScheduleRequest::from_enrollments(&summary);
            apply_params(&mut request, args)?;
            export_results(&request.run(), args.value_of("output"))
        }
        (name, _) => Err(anyhow!("unknown subcommand {}", name)),
    }
}
