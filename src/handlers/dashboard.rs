//! Dashboard page handler

use axum::response::Html;

/// Serve the single-page dashboard form
///
/// The page renders idle; nothing is predicted until the user presses the
/// Generate Analysis button.
pub async fn page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::student::{
        Ethnicity, Gender, ParentalEducation, ParentalSupport, ACTIVITIES,
    };

    #[test]
    fn test_page_starts_idle() {
        let Html(body) = tokio_test::block_on(page());
        // Idle placeholder is present; no pre-rendered grade
        assert!(body.contains("id=\"result\""));
        assert!(body.contains("Generate Analysis"));
    }

    #[test]
    fn test_form_options_match_categorical_tables() {
        // The form binds labels to the codes the model was trained on. If an
        // enumeration changes, this page has to change with it.
        let Html(body) = tokio_test::block_on(page());

        for code in 0..=1u8 {
            assert!(body.contains(Gender::try_from(code).unwrap().label()));
        }
        for code in 0..=3u8 {
            assert!(body.contains(Ethnicity::try_from(code).unwrap().label()));
        }
        for code in 0..=4u8 {
            assert!(body.contains(ParentalEducation::try_from(code).unwrap().label()));
            assert!(body.contains(ParentalSupport::try_from(code).unwrap().label()));
        }
        for activity in ACTIVITIES {
            assert!(body.contains(&format!("value=\"{}\"", activity.label())));
        }
    }
}
