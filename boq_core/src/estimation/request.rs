//! Estimation request and result types.
//!
//! An [`EstimationRequest`] can only exist with both fields inside the
//! length bounds, whether it was built with [`EstimationRequest::new`] or
//! deserialized from JSON.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Minimum length of each request field, in characters.
///
/// Characters are Unicode scalar values: an emoji outside the Basic
/// Multilingual Plane counts once here, where a UTF-16 length counts it twice.
pub const MIN_FIELD_CHARS: usize = 10;

/// Maximum length of each request field, in characters
pub const MAX_FIELD_CHARS: usize = 5000;

/// BOQ items and site parameters to estimate materials for.
///
/// ## JSON Example
///
/// ```json
/// {
///   "boqItems": "RCC M25: 100 cubic meters; Brickwork 230mm: 500 sq meters",
///   "siteParameters": "Built-up area 3000 sq ft per floor; G+2; consider 10% brick wastage"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedRequest")]
pub struct EstimationRequest {
    boq_items: String,
    site_parameters: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedRequest {
    boq_items: String,
    site_parameters: String,
}

impl TryFrom<UncheckedRequest> for EstimationRequest {
    type Error = CalcError;

    fn try_from(raw: UncheckedRequest) -> CalcResult<Self> {
        EstimationRequest::new(raw.boq_items, raw.site_parameters)
    }
}

impl EstimationRequest {
    /// Build a request, rejecting fields outside 10-5000 characters.
    ///
    /// ```rust
    /// use boq_core::estimation::EstimationRequest;
    ///
    /// assert!(EstimationRequest::new("RCC M25: 100 m3", "G+2, black cotton soil").is_ok());
    /// assert!(EstimationRequest::new("too short", "G+2, black cotton soil").is_err());
    /// ```
    pub fn new(
        boq_items: impl Into<String>,
        site_parameters: impl Into<String>,
    ) -> CalcResult<Self> {
        let request = EstimationRequest {
            boq_items: boq_items.into(),
            site_parameters: site_parameters.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Check both fields against the length bounds.
    pub fn validate(&self) -> CalcResult<()> {
        check_length("boq_items", &self.boq_items)?;
        check_length("site_parameters", &self.site_parameters)?;
        Ok(())
    }

    pub fn boq_items(&self) -> &str {
        &self.boq_items
    }

    pub fn site_parameters(&self) -> &str {
        &self.site_parameters
    }
}

fn check_length(field: &str, text: &str) -> CalcResult<()> {
    let chars = text.chars().count();
    if chars < MIN_FIELD_CHARS {
        return Err(CalcError::invalid_input(
            field,
            format!("{} characters", chars),
            format!("must be at least {} characters", MIN_FIELD_CHARS),
        ));
    }
    if chars > MAX_FIELD_CHARS {
        return Err(CalcError::invalid_input(
            field,
            format!("{} characters", chars),
            format!("must not exceed {} characters", MAX_FIELD_CHARS),
        ));
    }
    Ok(())
}

/// Generated material estimations, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Markdown text as produced by the text-generation service
    pub material_estimations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "Built-up area 3000 sq ft, G+2";

    #[test]
    fn test_nine_characters_rejected_with_minimum() {
        let err = EstimationRequest::new("123456789", SITE).unwrap_err();
        match err {
            CalcError::InvalidInput { field, value, reason } => {
                assert_eq!(field, "boq_items");
                assert_eq!(value, "9 characters");
                assert_eq!(reason, "must be at least 10 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exact_bounds_accepted() {
        let request = EstimationRequest::new("x".repeat(10), "y".repeat(5000)).unwrap();
        assert_eq!(request.boq_items().len(), 10);
        assert_eq!(request.site_parameters().len(), 5000);
    }

    #[test]
    fn test_over_maximum_names_site_parameters() {
        let err = EstimationRequest::new("RCC M25: 100 m3", "y".repeat(5001)).unwrap_err();
        assert!(err.to_string().contains("'site_parameters'"));
        assert!(err.to_string().contains("must not exceed 5000 characters"));
    }

    #[test]
    fn test_astral_characters_count_once() {
        let boq = "🧱".repeat(MIN_FIELD_CHARS);
        assert_eq!(boq.encode_utf16().count(), 2 * MIN_FIELD_CHARS);
        assert!(EstimationRequest::new(boq, "Ground floor only, 1200 sq ft").is_ok());
        let short = "🧱".repeat(MIN_FIELD_CHARS - 1);
        assert!(EstimationRequest::new(short, "Ground floor only").is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 characters, 26 bytes
        let boq = "ईंट ईंट ईं";
        assert_eq!(boq.chars().count(), 10);
        assert!(EstimationRequest::new(boq, SITE).is_ok());
    }

    #[test]
    fn test_deserialization_validates() {
        let ok = r#"{"boqItems":"RCC M25: 100 m3","siteParameters":"G+2, black cotton soil"}"#;
        let request: EstimationRequest = serde_json::from_str(ok).unwrap();
        assert_eq!(request.boq_items(), "RCC M25: 100 m3");

        let short = r#"{"boqItems":"short","siteParameters":"G+2, black cotton soil"}"#;
        let err = serde_json::from_str::<EstimationRequest>(short).unwrap_err();
        assert!(err.to_string().contains("must be at least 10 characters"));
    }

    #[test]
    fn test_result_field_name() {
        let result = EstimationResult {
            material_estimations: "**Item: RCC**".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"materialEstimations":"**Item: RCC**"}"#);
    }
}
