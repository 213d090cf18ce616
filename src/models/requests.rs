//! Form submission payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::pipeline::student::{
    parse_activities, Ethnicity, Gender, ParentalEducation, ParentalSupport, StudentRecord,
};

/// One prediction request from the dashboard form
///
/// Categorical fields arrive as the small integer codes the form binds to
/// its options; the checklist arrives as the set of selected labels.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 15, max = 18, message = "age must be between 15 and 18"))]
    pub age: u8,

    #[validate(range(max = 1, message = "unknown gender code"))]
    pub gender: u8,

    #[validate(range(max = 3, message = "unknown ethnicity code"))]
    pub ethnicity: u8,

    #[validate(range(max = 4, message = "unknown parental education code"))]
    pub parental_education: u8,

    #[validate(range(
        min = 0.0,
        max = 40.0,
        message = "weekly study time must be between 0 and 40 hours"
    ))]
    pub study_time_weekly: f32,

    #[validate(range(max = 30, message = "absences must be between 0 and 30"))]
    pub absences: u8,

    pub tutoring: bool,

    #[validate(range(max = 4, message = "unknown parental support code"))]
    pub parental_support: u8,

    /// Selected activity checklist labels; order and duplicates are irrelevant
    #[serde(default)]
    pub activities: Vec<String>,
}

impl TryFrom<PredictRequest> for StudentRecord {
    type Error = AppError;

    /// Bounds-check the raw submission and lift every categorical code onto
    /// its closed enumeration. Nothing downstream sees raw codes.
    fn try_from(req: PredictRequest) -> Result<Self, Self::Error> {
        req.validate()?;

        let code = |e: crate::pipeline::student::UnknownCodeError| {
            AppError::ValidationError(e.to_string())
        };

        Ok(StudentRecord {
            age: req.age,
            gender: Gender::try_from(req.gender).map_err(code)?,
            ethnicity: Ethnicity::try_from(req.ethnicity).map_err(code)?,
            parental_education: ParentalEducation::try_from(req.parental_education)
                .map_err(code)?,
            study_time_weekly: req.study_time_weekly,
            absences: req.absences,
            tutoring: req.tutoring,
            parental_support: ParentalSupport::try_from(req.parental_support).map_err(code)?,
            activities: parse_activities(&req.activities).map_err(code)?,
        })
    }
}
