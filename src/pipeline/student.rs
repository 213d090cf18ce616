//! Student attributes and their categorical encodings
//!
//! Every categorical the form can submit is a closed enumeration with an
//! explicit label<->code table. The codes are the values the classifier was
//! trained on; the labels are what the form shows. Keeping both sides here,
//! next to the assembler, means schema drift between the UI and the model
//! shows up in tests instead of in predictions.

use std::collections::BTreeSet;

/// Unknown code or label for one of the categorical fields
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid value for {field}: {value}")]
pub struct UnknownCodeError {
    pub field: &'static str,
    pub value: String,
}

macro_rules! unknown {
    ($field:expr, $value:expr) => {
        UnknownCodeError {
            field: $field,
            value: $value.to_string(),
        }
    };
}

// ============================================================================
// CATEGORICAL ENUMERATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gender {
    Male = 0,
    Female = 1,
}

impl Gender {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl TryFrom<u8> for Gender {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Gender::Male),
            1 => Ok(Gender::Female),
            other => Err(unknown!("gender", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ethnicity {
    Caucasian = 0,
    AfricanAmerican = 1,
    Asian = 2,
    Other = 3,
}

impl Ethnicity {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Ethnicity::Caucasian => "Caucasian",
            Ethnicity::AfricanAmerican => "African American",
            Ethnicity::Asian => "Asian",
            Ethnicity::Other => "Other",
        }
    }
}

impl TryFrom<u8> for Ethnicity {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Ethnicity::Caucasian),
            1 => Ok(Ethnicity::AfricanAmerican),
            2 => Ok(Ethnicity::Asian),
            3 => Ok(Ethnicity::Other),
            other => Err(unknown!("ethnicity", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParentalEducation {
    None = 0,
    HighSchool = 1,
    SomeCollege = 2,
    Bachelors = 3,
    Higher = 4,
}

impl ParentalEducation {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ParentalEducation::None => "None",
            ParentalEducation::HighSchool => "High School",
            ParentalEducation::SomeCollege => "Some College",
            ParentalEducation::Bachelors => "Bachelor's",
            ParentalEducation::Higher => "Higher",
        }
    }
}

impl TryFrom<u8> for ParentalEducation {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ParentalEducation::None),
            1 => Ok(ParentalEducation::HighSchool),
            2 => Ok(ParentalEducation::SomeCollege),
            3 => Ok(ParentalEducation::Bachelors),
            4 => Ok(ParentalEducation::Higher),
            other => Err(unknown!("parental_education", other)),
        }
    }
}

/// Parental support scale from the original intake form
/// (None / Low / Moderate / High / Very High)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParentalSupport {
    None = 0,
    Low = 1,
    Moderate = 2,
    High = 3,
    VeryHigh = 4,
}

impl ParentalSupport {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ParentalSupport::None => "None",
            ParentalSupport::Low => "Low",
            ParentalSupport::Moderate => "Moderate",
            ParentalSupport::High => "High",
            ParentalSupport::VeryHigh => "Very High",
        }
    }
}

impl TryFrom<u8> for ParentalSupport {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ParentalSupport::None),
            1 => Ok(ParentalSupport::Low),
            2 => Ok(ParentalSupport::Moderate),
            3 => Ok(ParentalSupport::High),
            4 => Ok(ParentalSupport::VeryHigh),
            other => Err(unknown!("parental_support", other)),
        }
    }
}

// ============================================================================
// ACTIVITY CHECKLIST
// ============================================================================

/// One entry of the activities checklist
///
/// The form submits a set of selected labels; the assembler expands the set
/// into independent 0/1 flags in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Activity {
    Extracurricular,
    Sports,
    Music,
    Volunteering,
}

/// All activities in the order their flags appear in the feature vector
pub const ACTIVITIES: [Activity; 4] = [
    Activity::Extracurricular,
    Activity::Sports,
    Activity::Music,
    Activity::Volunteering,
];

impl Activity {
    pub fn label(self) -> &'static str {
        match self {
            Activity::Extracurricular => "Extracurricular",
            Activity::Sports => "Sports",
            Activity::Music => "Music",
            Activity::Volunteering => "Volunteering",
        }
    }

    /// Parse a checklist label (case-insensitive)
    pub fn from_label(label: &str) -> Result<Self, UnknownCodeError> {
        let trimmed = label.trim();
        ACTIVITIES
            .iter()
            .copied()
            .find(|a| a.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| unknown!("activities", label))
    }
}

/// Parse a checklist submission into a set
///
/// Duplicates collapse and submission order is irrelevant, so the same
/// selections always produce the same set.
pub fn parse_activities(labels: &[String]) -> Result<BTreeSet<Activity>, UnknownCodeError> {
    labels.iter().map(|l| Activity::from_label(l)).collect()
}

// ============================================================================
// STUDENT RECORD
// ============================================================================

/// One validated form submission, ready for feature assembly
///
/// Ephemeral: built per request, discarded once the response is rendered.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub age: u8,
    pub gender: Gender,
    pub ethnicity: Ethnicity,
    pub parental_education: ParentalEducation,
    pub study_time_weekly: f32,
    pub absences: u8,
    pub tutoring: bool,
    pub parental_support: ParentalSupport,
    pub activities: BTreeSet<Activity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=1u8 {
            assert_eq!(Gender::try_from(code).unwrap().code(), code);
        }
        for code in 0..=3u8 {
            assert_eq!(Ethnicity::try_from(code).unwrap().code(), code);
        }
        for code in 0..=4u8 {
            assert_eq!(ParentalEducation::try_from(code).unwrap().code(), code);
            assert_eq!(ParentalSupport::try_from(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(Gender::try_from(2).is_err());
        assert!(Ethnicity::try_from(4).is_err());
        assert!(ParentalEducation::try_from(5).is_err());
        assert!(ParentalSupport::try_from(5).is_err());
    }

    #[test]
    fn test_support_labels_match_intake_form() {
        assert_eq!(ParentalSupport::None.label(), "None");
        assert_eq!(ParentalSupport::Moderate.label(), "Moderate");
        assert_eq!(ParentalSupport::VeryHigh.label(), "Very High");
    }

    #[test]
    fn test_activity_labels_parse_case_insensitive() {
        assert_eq!(Activity::from_label("Music").unwrap(), Activity::Music);
        assert_eq!(Activity::from_label("sports").unwrap(), Activity::Sports);
        assert_eq!(
            Activity::from_label(" VOLUNTEERING ").unwrap(),
            Activity::Volunteering
        );
        assert!(Activity::from_label("chess club").is_err());
    }

    #[test]
    fn test_parse_activities_dedupes() {
        let labels = vec![
            "Music".to_string(),
            "music".to_string(),
            "Sports".to_string(),
        ];
        let set = parse_activities(&labels).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Activity::Music));
        assert!(set.contains(&Activity::Sports));
    }

    #[test]
    fn test_parse_activities_rejects_unknown_label() {
        let labels = vec!["Music".to_string(), "Robotics".to_string()];
        let err = parse_activities(&labels).unwrap_err();
        assert_eq!(err.field, "activities");
    }
}
