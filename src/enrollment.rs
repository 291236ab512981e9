use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use anyhow::{Context, Result};
use log::info;
use nom::IResult;
use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::multi::separated_list0;
use serde::{Serialize, Deserialize};


/** (student, course) pair of an enrollment file */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// student identifier
    pub student: String,
    /// course identifier (one course = one exam)
    pub course: String,
}

impl EnrollmentRecord {
    /// creates a record (fields are trimmed)
    pub fn new(student: &str, course: &str) -> Self {
        Self { student: student.trim().to_string(), course: course.trim().to_string() }
    }
}


/** exams and conflicts derived from enrollment records */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    /// number of distinct students
    pub students: usize,
    /// exams (distinct courses, sorted)
    pub exams: Vec<String>,
    /// conflicting exams (a < b, sorted, no duplicates)
    pub conflicts: Vec<(String, String)>,
}

impl EnrollmentSummary {
    /** derives exams and conflicts from enrollment records.
    Every pair of distinct courses taken by a same student is a conflict
    (a student with N courses produces N(N-1)/2 pairs).
    Records with an empty student or course are skipped.
    */
    pub fn from_records(records: &[EnrollmentRecord]) -> Self {
        let mut courses_of: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for r in records {
            let (student, course) = (r.student.trim(), r.course.trim());
            if student.is_empty() || course.is_empty() { continue; }
            courses_of.entry(student).or_default().insert(course);
        }
        let mut exams: BTreeSet<&str> = BTreeSet::new();
        let mut conflicts: BTreeSet<(&str, &str)> = BTreeSet::new();
        for courses in courses_of.values() {
            exams.extend(courses.iter().copied());
            let courses: Vec<&str> = courses.iter().copied().collect(); // sorted
            for (i, a) in courses.iter().enumerate() {
                for b in &courses[i + 1..] {
                    conflicts.insert((*a, *b));
                }
            }
        }
        let res = Self {
            students: courses_of.len(),
            exams: exams.into_iter().map(String::from).collect(),
            conflicts: conflicts.into_iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        };
        info!(
            "enrollments: {} students, {} exams, {} conflicts",
            res.students, res.exams.len(), res.conflicts.len()
        );
        res
    }
}


/// reads a field (until the next comma or end of line)
fn read_field(s: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ',' || c == '\n')(s)
}

/// reads a comma separated row
fn read_row(s: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), read_field)(s)
}

/// reads all rows of a CSV document
pub fn read_rows(s: &str) -> IResult<&str, Vec<Vec<&str>>> {
    separated_list0(char('\n'), read_row)(s)
}

/// field without surrounding blanks and double quotes
fn clean_field(f: &str) -> &str {
    f.trim().trim_matches('"').trim()
}

/// header name in lower case, with blanks and dashes replaced by '_' ("Student Name" -> "student_name")
fn header_name(f: &str) -> String {
    clean_field(f).to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect()
}

/** detects a header row. Returns the (student, course) column indices if the row names them
(a student column starts with "student", a course column with "course" or "exam"). */
fn header_columns(row: &[&str]) -> Option<(usize, usize)> {
    let names: Vec<String> = row.iter().map(|f| header_name(f)).collect();
    let student = names.iter().position(|f| f.starts_with("student"))?;
    let course = names.iter().position(|f| f.starts_with("course") || f.starts_with("exam"))?;
    Some((student, course))
}

/** parses an enrollment CSV document.
If the first row is a header naming a student and a course column, these columns are used.
Otherwise, the first column is the student and the second one the course.
A leading byte order mark is ignored. Rows with fewer columns are skipped.
*/
pub fn parse_enrollments(content: &str) -> Vec<EnrollmentRecord> {
    let content = content.trim_start_matches('\u{feff}').replace("\r", "");
    let rows = match read_rows(content.as_str()) {
        Ok((_, rows)) => rows,
        Err(_) => return Vec::new(),
    };
    let (columns, skip) = match rows.first().and_then(|r| header_columns(r)) {
        Some(columns) => (columns, 1),
        None => ((0, 1), 0),
    };
    rows.iter()
        .skip(skip)
        .filter_map(|row| {
            let student = row.get(columns.0)?;
            let course = row.get(columns.1)?;
            Some(EnrollmentRecord::new(clean_field(student), clean_field(course)))
        })
        .collect()
}

/// reads an enrollment CSV file
pub fn read_from_file(filename: &str) -> Result<Vec<EnrollmentRecord>> {
    let content = fs::read_to_string(filename)
        .with_context(|| format!("unable to read enrollment file {}", filename))?;
    Ok(parse_enrollments(&content))
}
