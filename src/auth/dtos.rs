use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body for every non-2xx response the API produces.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
