use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// Run the `validator` rules of a request payload
///
/// # Examples
/// ```
/// use swot_api::validation::validate_payload;
/// use validator::Validate;
///
/// #[derive(Validate)]
/// struct Rename {
///     #[validate(length(min = 1, max = 255))]
///     name: String,
/// }
///
/// assert!(validate_payload(&Rename { name: "Flying".into() }).is_ok());
/// assert!(validate_payload(&Rename { name: String::new() }).is_err());
/// ```
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|errors| ApiError::Validation(describe(&errors)))
}

/// Flatten field errors into `field: message` pairs, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
