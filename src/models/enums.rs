use crate::models::ModelError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(CourseType {
    Mandatory => "mandatory",
    TechnicalElective => "technical_elective",
    NonTechnicalElective => "non_technical_elective",
});

str_enum!(Grade {
    AA => "AA",
    BA => "BA",
    BB => "BB",
    CB => "CB",
    CC => "CC",
    DC => "DC",
    DD => "DD",
    FF => "FF",
});

impl Grade {
    /// Grade points on the 4.0 scale. FF carries zero points.
    pub fn points(&self) -> f64 {
        match self {
            Self::AA => 4.0,
            Self::BA => 3.5,
            Self::BB => 3.0,
            Self::CB => 2.5,
            Self::CC => 2.0,
            Self::DC => 1.5,
            Self::DD => 1.0,
            Self::FF => 0.0,
        }
    }

    pub fn is_passing(&self) -> bool {
        !matches!(self, Self::FF)
    }

    /// Parse a grade token leniently: trims and uppercases before matching.
    /// Tokens outside the vocabulary return None; callers skip the course
    /// with a warning rather than failing the whole document.
    pub fn from_token(token: &str) -> Option<Self> {
        token.trim().to_uppercase().parse().ok()
    }
}

impl CourseType {
    /// Match a human-entered course-type label (tabular "Course Type" column).
    /// Handles English and Turkish spellings with flexible separators.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "mandatory" | "compulsory" | "required" | "zorunlu" => Some(Self::Mandatory),
            "technicalelective" | "technical" | "teknikseçmeli" | "tekniksecmeli" => {
                Some(Self::TechnicalElective)
            }
            "nontechnicalelective" | "nontechnical" | "teknikolmayanseçmeli"
            | "teknikolmayansecmeli" | "sosyalseçmeli" | "sosyalsecmeli" => {
                Some(Self::NonTechnicalElective)
            }
            _ => None,
        }
    }
}
