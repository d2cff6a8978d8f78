use validator::Validate;

use crate::api::errors::ApiError;

/// Validate a payload, reporting every failing field in one 400 response
pub fn validate_payload<T>(payload: &T) -> Result<(), ApiError>
where
    T: Validate,
{
    payload.validate().map_err(|validation_errors| {
        let mut messages: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        messages.sort();

        ApiError::bad_request(messages.join("; "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::NewCompanyRequest;
    use axum::http::StatusCode;

    #[test]
    fn test_reports_all_field_errors() {
        let request = NewCompanyRequest {
            handle: String::new(),
            name: String::new(),
            description: None,
            num_employees: Some(-3),
            logo_url: None,
        };
        let err = validate_payload(&request).unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "handle must be 1-25 characters; name cannot be empty; numEmployees cannot be negative"
        );
    }

    #[test]
    fn test_valid_payload_passes() {
        let request = NewCompanyRequest {
            handle: "new".to_string(),
            name: "New".to_string(),
            description: None,
            num_employees: Some(3),
            logo_url: Some("http://new.img".to_string()),
        };
        assert!(validate_payload(&request).is_ok());
    }
}
