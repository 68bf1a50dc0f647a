//! Delimited-table parsing: header-validated rows of primitive string fields.
//!
//! This layer does no type coercion — numeric and enum conversion is the
//! caller's job (see `transcripts` for the two transcript-shaped front ends).
//! Row order is preserved so later grouping stays stable.

pub mod transcripts;

use thiserror::Error;

use super::warnings::IngestWarning;

pub use transcripts::{drafts_from_conflict_rows, drafts_from_eligibility_rows};

/// Header set for eligibility-oriented uploads (one course per row,
/// rows grouped by student).
pub const ELIGIBILITY_HEADERS: [&str; 9] = [
    "Student ID",
    "Student Name",
    "Department",
    "Course Code",
    "Course Name",
    "Grade",
    "Credits",
    "Semester",
    "Course Type",
];

/// Header set for conflict-oriented batch uploads (one submission line per
/// row, each carrying the submission's declared GPA).
pub const CONFLICT_HEADERS: [&str; 9] = [
    "StudentID",
    "StudentName",
    "CourseCode",
    "CourseName",
    "Credit",
    "Grade",
    "Semester",
    "GPA",
    "Department",
];

pub const ROW_DELIMITER: char = ',';

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("Input table is missing required columns: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },
}

/// One parsed data row: original 1-based line number plus fields in column
/// order. Kept as an ordered list (not a map) so serialization and iteration
/// are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub line_number: usize,
    pub fields: Vec<(String, String)>,
}

impl TableRow {
    /// Case-insensitive field lookup by header name. Values come back
    /// trimmed; a present-but-empty column yields an empty string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name.trim()))
            .map(|(_, value)| value.as_str())
    }
}

/// Result of parsing one delimited table.
#[derive(Debug, Clone)]
pub struct TableParse {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub warnings: Vec<IngestWarning>,
}

/// Parse delimited text into header-validated rows.
///
/// The first non-empty line is the header; every required header name must
/// be present (trimmed, case-insensitive) or the whole input is rejected
/// with `MissingHeaders`. Rows whose field count differs from the header
/// count are skipped with a warning, not fatally.
pub fn parse_delimited(
    text: &str,
    required_headers: &[&str],
    delimiter: char,
) -> Result<TableParse, TabularError> {
    let mut lines = text.lines().enumerate();

    let header_line = match lines.find(|(_, l)| !l.trim().is_empty()) {
        Some((_, line)) => line,
        None => {
            return Err(TabularError::MissingHeaders {
                missing: required_headers.iter().map(|h| h.to_string()).collect(),
            })
        }
    };

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|h| h.trim().to_string())
        .collect();

    let missing: Vec<String> = required_headers
        .iter()
        .filter(|required| {
            !headers
                .iter()
                .any(|h| h.eq_ignore_ascii_case(required.trim()))
        })
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TabularError::MissingHeaders { missing });
    }

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(delimiter).collect();
        if values.len() != headers.len() {
            let warning = IngestWarning::MalformedRow {
                line: idx + 1,
                expected: headers.len(),
                found: values.len(),
            };
            tracing::warn!(line = idx + 1, "{warning}");
            warnings.push(warning);
            continue;
        }
        rows.push(TableRow {
            line_number: idx + 1,
            fields: headers
                .iter()
                .cloned()
                .zip(values.iter().map(|v| v.trim().to_string()))
                .collect(),
        });
    }

    Ok(TableParse {
        headers,
        rows,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Student ID,Student Name,Department,Course Code,Course Name,Grade,Credits,Semester,Course Type
1,Ann,CE,CS101,Intro,AA,4,F23,Mandatory
1,Ann,CE,CS102,Algo,BB,4,F23,Mandatory";

    #[test]
    fn parses_header_and_rows() {
        let parse = parse_delimited(SAMPLE, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap();
        assert_eq!(parse.headers.len(), 9);
        assert_eq!(parse.rows.len(), 2);
        assert!(parse.warnings.is_empty());
        assert_eq!(parse.rows[0].get("Course Code"), Some("CS101"));
        assert_eq!(parse.rows[1].get("Grade"), Some("BB"));
    }

    #[test]
    fn header_lookup_case_insensitive() {
        let parse = parse_delimited(SAMPLE, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap();
        assert_eq!(parse.rows[0].get("student id"), Some("1"));
        assert_eq!(parse.rows[0].get("COURSE NAME"), Some("Intro"));
    }

    #[test]
    fn missing_header_rejected_with_names() {
        let text = "Student ID,Student Name\n1,Ann";
        let err = parse_delimited(text, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap_err();
        match err {
            TabularError::MissingHeaders { missing } => {
                assert!(missing.contains(&"Department".to_string()));
                assert!(missing.contains(&"Course Type".to_string()));
                assert!(!missing.contains(&"Student ID".to_string()));
            }
        }
    }

    #[test]
    fn empty_input_rejected() {
        let err = parse_delimited("\n  \n", &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap_err();
        match err {
            TabularError::MissingHeaders { missing } => {
                assert_eq!(missing.len(), ELIGIBILITY_HEADERS.len());
            }
        }
    }

    #[test]
    fn short_row_skipped_with_warning() {
        let text = format!("{SAMPLE}\n2,Bob,EE");
        let parse = parse_delimited(&text, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap();
        assert_eq!(parse.rows.len(), 2, "malformed row must not become a row");
        assert_eq!(
            parse.warnings,
            vec![IngestWarning::MalformedRow {
                line: 4,
                expected: 9,
                found: 3,
            }]
        );
    }

    #[test]
    fn leading_blank_lines_before_header() {
        let text = format!("\n\n{SAMPLE}");
        let parse = parse_delimited(&text, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap();
        assert_eq!(parse.rows.len(), 2);
    }

    #[test]
    fn row_order_preserved() {
        let text = "\
StudentID,StudentName,CourseCode,CourseName,Credit,Grade,Semester,GPA,Department
9,Zed,CS101,Intro,4,AA,F23,3.2,CE
1,Ann,CS101,Intro,4,AA,F23,3.4,CE
5,Mid,CS101,Intro,4,AA,F23,3.6,CE";
        let parse = parse_delimited(text, &CONFLICT_HEADERS, ROW_DELIMITER).unwrap();
        let ids: Vec<_> = parse
            .rows
            .iter()
            .map(|r| r.get("StudentID").unwrap())
            .collect();
        assert_eq!(ids, vec!["9", "1", "5"]);
    }

    #[test]
    fn values_trimmed() {
        let text = "\
Student ID,Student Name,Department,Course Code,Course Name,Grade,Credits,Semester,Course Type
 1 , Ann , CE , CS101 , Intro , AA , 4 , F23 , Mandatory ";
        let parse = parse_delimited(text, &ELIGIBILITY_HEADERS, ROW_DELIMITER).unwrap();
        assert_eq!(parse.rows[0].get("Student Name"), Some("Ann"));
        assert_eq!(parse.rows[0].get("Course Type"), Some("Mandatory"));
    }
}
