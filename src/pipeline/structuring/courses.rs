//! Course-table line shapes.
//!
//! A semester header line ("2019-2020 Güz Dönemi") opens course-table mode;
//! the lines that follow are matched against an ordered set of course-row
//! shapes until the table ends. Shapes cover both local-credit-only rows and
//! rows that print credit plus ECTS, with an optional trailing language
//! annotation.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::course::RawCourseRecord;
use crate::models::enums::Grade;

/// A recognized semester header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterHeader {
    pub start_year: u16,
    pub end_year: u16,
    pub term: String,
}

impl SemesterHeader {
    /// Label stamped onto every course of the semester, e.g. "2019-2020 Güz".
    pub fn label(&self) -> String {
        format!("{}-{} {}", self.start_year, self.end_year, self.term)
    }

    pub fn years(&self) -> (u16, u16) {
        (self.start_year, self.end_year)
    }
}

static SEMESTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(\d{4})\s*[-–]\s*(\d{4})\s+(Güz|Bahar|Yaz|Fall|Spring|Summer)\s+(?:Dönemi|Yar[ıi]y[ıi]l[ıi]|Term|Semester)\s*$",
    )
    .expect("Invalid semester header pattern")
});

/// Ordered course-row shapes. The ECTS shape is tried first; a row carrying
/// both numbers must not have its ECTS column mistaken for a grade-adjacent
/// credit.
static COURSE_ROW_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let grade = "(AA|BA|BB|CB|CC|DC|DD|FF)";
    let code = r"([A-ZÇĞİÖŞÜ]{2,6}\s?\d{3}[A-Z]?)";
    let number = r"(\d+(?:[.,]\d+)?)";
    vec![
        // code  name  credit  ects  grade  [language]
        Regex::new(&format!(
            r"^\s*{code}\s+(.+?)\s+{number}\s+{number}\s+{grade}(?:\s*\(([^)]+)\))?\s*$"
        ))
        .expect("Invalid course row pattern"),
        // code  name  credit  grade  [language]
        Regex::new(&format!(
            r"^\s*{code}\s+(.+?)\s+{number}\s+{grade}(?:\s*\(([^)]+)\))?\s*$"
        ))
        .expect("Invalid course row pattern"),
    ]
});

/// Match a semester header line.
pub fn parse_semester_header(line: &str) -> Option<SemesterHeader> {
    let caps = SEMESTER_HEADER.captures(line)?;
    Some(SemesterHeader {
        start_year: caps[1].parse().ok()?,
        end_year: caps[2].parse().ok()?,
        term: caps[3].to_string(),
    })
}

/// Match a course row against the ordered shapes; the first hit wins.
/// Returns the raw record tagged with the current semester label.
pub fn parse_course_row(line: &str, semester: &str) -> Option<RawCourseRecord> {
    for shape in COURSE_ROW_SHAPES.iter() {
        let Some(caps) = shape.captures(line) else {
            continue;
        };
        // Grade is the group right before the optional language annotation
        let grade_idx = caps.len() - 2;
        let grade = Grade::from_token(&caps[grade_idx])?;
        let credit: f64 = caps[3].replace(',', ".").parse().ok()?;
        return Some(RawCourseRecord {
            code: caps[1].trim().to_string(),
            name: caps[2].trim().to_string(),
            credit,
            grade,
            semester: semester.to_string(),
        });
    }
    None
}
