//! Feature Assembler - StudentRecord to ordered feature vector
//!
//! Uses the centralized layout from `schema.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for artifact compatibility checks

use serde::{Deserialize, Serialize};

use super::schema::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_VERSION,
};
use super::student::{StudentRecord, ACTIVITIES};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned feature vector with layout metadata
///
/// This struct MUST be used for all feature data so that a vector can never
/// be fed to an artifact fitted against a different layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Validate that this vector is compatible with the current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

fn flag(set: bool) -> f32 {
    if set {
        1.0
    } else {
        0.0
    }
}

/// Assemble the ordered feature vector for one student record
///
/// The element order here mirrors FEATURE_LAYOUT exactly; the pinning test
/// below and the layout tests in `schema.rs` keep the two in sync. All
/// validation has already happened at the request boundary, so assembly
/// cannot fail.
pub fn assemble(record: &StudentRecord) -> FeatureVector {
    let mut values = [0.0f32; FEATURE_COUNT];

    values[0] = record.age as f32; // age
    values[1] = record.gender.code() as f32; // gender
    values[2] = record.ethnicity.code() as f32; // ethnicity
    values[3] = record.parental_education.code() as f32; // parental_education
    values[4] = record.study_time_weekly; // study_time_weekly
    values[5] = record.absences as f32; // absences
    values[6] = flag(record.tutoring); // tutoring
    values[7] = record.parental_support.code() as f32; // parental_support

    // Checklist set expands to one 0/1 flag per known label, in layout order
    for (offset, activity) in ACTIVITIES.iter().enumerate() {
        values[8 + offset] = flag(record.activities.contains(activity));
    }

    FeatureVector::from_values(values)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::student::{
        parse_activities, Ethnicity, Gender, ParentalEducation, ParentalSupport,
    };

    fn record(activities: &[&str]) -> StudentRecord {
        StudentRecord {
            age: 16,
            gender: Gender::Male,
            ethnicity: Ethnicity::Caucasian,
            parental_education: ParentalEducation::HighSchool,
            study_time_weekly: 10.0,
            absences: 0,
            tutoring: false,
            parental_support: ParentalSupport::Moderate,
            activities: parse_activities(
                &activities.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_vector_matches_trained_schema() {
        let vector = assemble(&record(&[]));
        assert_eq!(
            vector.values,
            [16.0, 0.0, 0.0, 1.0, 10.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert!(vector.validate().is_ok());
    }

    #[test]
    fn test_boundary_record_is_complete() {
        let student = StudentRecord {
            age: 15,
            gender: Gender::Male,
            ethnicity: Ethnicity::Caucasian,
            parental_education: ParentalEducation::None,
            study_time_weekly: 0.0,
            absences: 0,
            tutoring: false,
            parental_support: ParentalSupport::None,
            activities: Default::default(),
        };

        let vector = assemble(&student);
        assert_eq!(vector.values.len(), FEATURE_COUNT);
        assert_eq!(vector.get(0), Some(15.0));
        // Every other feature sits at its defined zero, not at a hole
        assert!(vector.values[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_checklist_order_does_not_matter() {
        let forward = assemble(&record(&["Sports", "Music", "Volunteering"]));
        let shuffled = assemble(&record(&["Volunteering", "Sports", "Music"]));
        let duplicated = assemble(&record(&["Music", "Sports", "Volunteering", "sports"]));

        assert_eq!(forward, shuffled);
        assert_eq!(forward, duplicated);
    }

    #[test]
    fn test_checklist_expands_to_flags() {
        let vector = assemble(&record(&["Music"]));
        assert_eq!(vector.get(8), Some(0.0)); // extracurricular
        assert_eq!(vector.get(9), Some(0.0)); // sports
        assert_eq!(vector.get(10), Some(1.0)); // music
        assert_eq!(vector.get(11), Some(0.0)); // volunteering

        let all = assemble(&record(&["Extracurricular", "Sports", "Music", "Volunteering"]));
        assert_eq!(&all.values[8..], &[1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tutoring_and_support_positions() {
        let mut student = record(&[]);
        student.tutoring = true;
        student.parental_support = ParentalSupport::VeryHigh;

        let vector = assemble(&student);
        assert_eq!(vector.get(6), Some(1.0));
        assert_eq!(vector.get(7), Some(4.0));
    }
}
