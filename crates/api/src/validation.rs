//! Request body validation.

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` rules on a request body, mapping failures to a 400
/// with one line per failing field.
pub fn validate_request<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
