//! Declarative label-pattern rules for transcript field extraction.
//!
//! One ordered table drives both ingestion paths (tabular rows flattened to
//! lines, or document text split on newlines) — the extraction logic lives
//! in `extract`, never per input format. Labels are bilingual: Turkish
//! transcripts dominate the corpus, English layouts appear on exchange
//! records.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The fields the rule table can recover, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TranscriptField {
    StudentId,
    FullName,
    GivenName,
    Surname,
    Faculty,
    Department,
    Program,
    EducationLevel,
    EducationLanguage,
    RegistrationDate,
    RegistrationPeriod,
    RegistrationType,
    DeclaredGpa,
    GraduationDate,
}

impl TranscriptField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudentId => "student_id",
            Self::FullName => "full_name",
            Self::GivenName => "given_name",
            Self::Surname => "surname",
            Self::Faculty => "faculty",
            Self::Department => "department",
            Self::Program => "program",
            Self::EducationLevel => "education_level",
            Self::EducationLanguage => "education_language",
            Self::RegistrationDate => "registration_date",
            Self::RegistrationPeriod => "registration_period",
            Self::RegistrationType => "registration_type",
            Self::DeclaredGpa => "declared_gpa",
            Self::GraduationDate => "graduation_date",
        }
    }
}

/// One extraction rule: a label pattern whose first capture group is the
/// field value.
pub struct FieldRule {
    pub pattern: Regex,
    pub field: TranscriptField,
}

fn rule(pattern: &str, field: TranscriptField) -> FieldRule {
    FieldRule {
        pattern: Regex::new(pattern).expect("Invalid field rule pattern"),
        field,
    }
}

/// The default rule table, compiled once. Order is priority: within a line
/// the first matching rule wins and the line is consumed.
static DEFAULT_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        rule(
            r"(?i)(?:Öğrenci\s*No(?:su)?|Student\s*(?:ID|No|Number))\s*:?\s*(\S+)",
            TranscriptField::StudentId,
        ),
        rule(
            r"(?i)(?:Ad[ıi]\s*Soyad[ıi]|Student\s*Name|Full\s*Name)\s*:?\s*(.+)",
            TranscriptField::FullName,
        ),
        rule(
            r"(?i)^\s*(?:Ad[ıi]|Given\s*Name|First\s*Name)\s*:?\s*(.+)",
            TranscriptField::GivenName,
        ),
        rule(
            r"(?i)^\s*(?:Soyad[ıi]|Surname|Last\s*Name)\s*:?\s*(.+)",
            TranscriptField::Surname,
        ),
        rule(
            r"(?i)(?:Fakülte(?:si)?|Faculty)\s*:?\s*(.+)",
            TranscriptField::Faculty,
        ),
        rule(
            r"(?i)(?:Bölüm(?:ü)?|Department)\s*:?\s*(.+)",
            TranscriptField::Department,
        ),
        rule(
            r"(?i)(?:Program(?:ı)?|Programme)\s*:?\s*(.+)",
            TranscriptField::Program,
        ),
        rule(
            r"(?i)(?:Öğrenim\s*(?:Düzeyi|Seviyesi)|Education\s*Level)\s*:?\s*(.+)",
            TranscriptField::EducationLevel,
        ),
        rule(
            r"(?i)(?:(?:Öğrenim|Eğitim)\s*Dili|Education\s*Language|Language\s*of\s*Instruction)\s*:?\s*(.+)",
            TranscriptField::EducationLanguage,
        ),
        rule(
            r"(?i)(?:Kay[ıi]t\s*Tarihi|Registration\s*Date)\s*:?\s*(.+)",
            TranscriptField::RegistrationDate,
        ),
        rule(
            r"(?i)(?:Kay[ıi]t\s*Dönemi|Registration\s*(?:Term|Period))\s*:?\s*(.+)",
            TranscriptField::RegistrationPeriod,
        ),
        rule(
            r"(?i)(?:Kay[ıi]t\s*(?:Şekli|Türü)|Registration\s*Type)\s*:?\s*(.+)",
            TranscriptField::RegistrationType,
        ),
        rule(
            r"(?i)(?:GANO|AGNO|Genel\s*Not\s*Ortalamas[ıi]|C?GPA)\s*:?\s*([0-9]+[.,]?[0-9]*)",
            TranscriptField::DeclaredGpa,
        ),
        rule(
            r"(?i)(?:Mezuniyet\s*Tarihi|Graduation\s*Date)\s*:?\s*(.+)",
            TranscriptField::GraduationDate,
        ),
    ]
});

pub fn default_rules() -> &'static [FieldRule] {
    &DEFAULT_RULES
}
