//! Grade mapping and risk derivation
//!
//! The classifier returns a discrete class index; everything downstream works
//! on the closed `Grade` enumeration, never on raw integers.

use serde::Serialize;

/// Number of grade classes the classifier was trained on
pub const CLASS_COUNT: usize = 5;

/// Predicted letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    /// Classifier returned an index outside the trained classes.
    /// Rendered as an explicit "unavailable" result, never as a number.
    Unknown,
}

/// Label encoding used when the classifier was fitted: class 0 is the best
/// grade, class 4 the worst. This table must match the artifact; changing it
/// without retraining silently corrupts every response.
///
/// NOTE: an earlier model generation used the reverse direction (0 = F). Any
/// artifact from that generation is incompatible with this table.
pub const GRADE_BY_CLASS: [Grade; CLASS_COUNT] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

impl Grade {
    /// Map a raw class index to a grade, out-of-range becomes `Unknown`
    pub fn from_class_index(index: usize) -> Self {
        GRADE_BY_CLASS.get(index).copied().unwrap_or(Grade::Unknown)
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Unknown => "Unknown",
        }
    }

    /// D and F trigger the at-risk alert path
    pub fn is_at_risk(self) -> bool {
        matches!(self, Grade::D | Grade::F)
    }
}

/// Risk percentage for the gauge: linear in the class index, 0% for the best
/// class through 100% for the worst. `None` when the index is unmapped.
pub fn risk_percent(class_index: usize) -> Option<f32> {
    if class_index >= CLASS_COUNT {
        return None;
    }
    Some(class_index as f32 / (CLASS_COUNT - 1) as f32 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_map_direction() {
        assert_eq!(Grade::from_class_index(0), Grade::A);
        assert_eq!(Grade::from_class_index(1), Grade::B);
        assert_eq!(Grade::from_class_index(2), Grade::C);
        assert_eq!(Grade::from_class_index(3), Grade::D);
        assert_eq!(Grade::from_class_index(4), Grade::F);
    }

    #[test]
    fn test_unmapped_class_is_unknown() {
        assert_eq!(Grade::from_class_index(5), Grade::Unknown);
        assert_eq!(Grade::from_class_index(usize::MAX), Grade::Unknown);
    }

    #[test]
    fn test_at_risk_grades() {
        assert!(Grade::D.is_at_risk());
        assert!(Grade::F.is_at_risk());

        assert!(!Grade::A.is_at_risk());
        assert!(!Grade::B.is_at_risk());
        assert!(!Grade::C.is_at_risk());
        assert!(!Grade::Unknown.is_at_risk());
    }

    #[test]
    fn test_risk_percent_bounds() {
        assert_eq!(risk_percent(0), Some(0.0));
        assert_eq!(risk_percent(1), Some(25.0));
        assert_eq!(risk_percent(2), Some(50.0));
        assert_eq!(risk_percent(3), Some(75.0));
        assert_eq!(risk_percent(4), Some(100.0));
        assert_eq!(risk_percent(5), None);
    }

    #[test]
    fn test_risk_percent_monotonic() {
        let mut previous = -1.0;
        for index in 0..CLASS_COUNT {
            let risk = risk_percent(index).unwrap();
            assert!(risk > previous);
            previous = risk;
        }
    }

    #[test]
    fn test_letters() {
        assert_eq!(Grade::A.letter(), "A");
        assert_eq!(Grade::F.letter(), "F");
        assert_eq!(Grade::Unknown.letter(), "Unknown");
    }
}
