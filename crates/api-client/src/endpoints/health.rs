//! Liveness endpoint

use super::Route;
use serde::{Deserialize, Serialize};

/// `GET /v1/health`
#[must_use]
pub fn check() -> Route {
    Route::v1(["health"])
}

/// Liveness response from the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status line, e.g. "API is working fine !!!!"
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_deserialize() {
        let json = r#"{ "message": "API is working fine !!!!" }"#;
        let response: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message, "API is working fine !!!!");
        assert_eq!(check().path(), "/v1/health");
    }
}
