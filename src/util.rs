use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use crate::enrollment::{self, EnrollmentSummary};
use crate::request::ScheduleRequest;
use crate::schedule::LabelStyle;


/// reads a file, or the standard input if filename is "-"
fn read_input(filename: &str) -> Result<String> {
    let mut res = String::new();
    if filename == "-" {
        io::stdin().read_to_string(&mut res).context("unable to read the standard input")?;
    } else {
        res = fs::read_to_string(filename)
            .with_context(|| format!("unable to read {}", filename))?;
    }
    Ok(res)
}

/// reads a JSON scheduling request ("-": standard input)
pub fn read_request(filename: &str) -> Result<ScheduleRequest> {
    let content = read_input(filename)?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid scheduling request in {}", filename))
}

/// reads an enrollment CSV file and derives its exams and conflicts
pub fn read_enrollments(filename: &str) -> Result<EnrollmentSummary> {
    let records = if filename == "-" {
        enrollment::parse_enrollments(&read_input(filename)?)
    } else {
        enrollment::read_from_file(filename)?
    };
    info!("read {} enrollment records from {}", records.len(), filename);
    Ok(EnrollmentSummary::from_records(&records))
}

/** reads the search options of the command line (--trials, --seed, --labels) and
overrides the corresponding fields of the request */
pub fn apply_params(request: &mut ScheduleRequest, args: &ArgMatches) -> Result<()> {
    if let Some(t) = args.value_of("trials") {
        let trials = t.parse::<usize>()
            .with_context(|| format!("unable to parse the number of trials given ({})", t))?;
        request.trials = Some(trials);
    }
    if let Some(s) = args.value_of("seed") {
        let seed = s.parse::<u64>()
            .with_context(|| format!("unable to parse the seed given ({})", s))?;
        request.seed = Some(seed);
    }
    if let Some(l) = args.value_of("labels") {
        request.label_style = l.parse::<LabelStyle>().map_err(|e| anyhow!(e))?;
    }
    info!("search parameters: {:?}, labels: {:?}", request.search_params(), request.label_style);
    Ok(())
}

/// exports results as JSON, in a file if given, on the standard output otherwise
pub fn export_results<T: Serialize>(results: &T, output: Option<&str>) -> Result<()> {
    let content = serde_json::to_string_pretty(results).context("unable to serialize the results")?;
    match output {
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content).context("unable to write the results")?;
        }
        Some(filename) => {
            info!("writing results in: {}", filename);
            fs::write(filename, content)
                .with_context(|| format!("couldn't write {}", filename))?;
        }
    }
    Ok(())
}
