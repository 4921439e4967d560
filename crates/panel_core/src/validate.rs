use crate::OperationRequest;

/// Why a request was rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("staging method \"{0}\" is not in the allowed set")]
    MethodNotAllowed(String),
}

/// Checks a request against the required-field rules and the cached
/// allowed-methods set. Pure and synchronous; performs no IO.
pub fn validate(
    request: &OperationRequest,
    allowed_methods: &[String],
) -> Result<(), ValidationError> {
    match request {
        OperationRequest::CreateFile { filename, content } => {
            require("filename", filename)?;
            require("content", content)
        }
        OperationRequest::StageData {
            method,
            username,
            local_path,
            relative_path,
        } => {
            require("method", method)?;
            require("username", username)?;
            require("local path", local_path)?;
            require("relative path", relative_path)?;
            if allowed_methods.iter().any(|allowed| allowed == method) {
                Ok(())
            } else {
                Err(ValidationError::MethodNotAllowed(method.clone()))
            }
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
