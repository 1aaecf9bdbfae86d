use axum::Json;
use serde::Serialize;

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: &'static str,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub fn ok(message: impl Into<String>) -> Json<ApiResponse> {
    Json(ApiResponse {
        status: "success",
        message: message.into(),
        data: None,
        token: None,
    })
}

pub fn ok_with_data(message: impl Into<String>, data: serde_json::Value) -> Json<ApiResponse> {
    Json(ApiResponse {
        status: "success",
        message: message.into(),
        data: Some(data),
        token: None,
    })
}

pub fn ok_with_token(message: impl Into<String>, token: String) -> Json<ApiResponse> {
    Json(ApiResponse {
        status: "success",
        message: message.into(),
        data: None,
        token: Some(token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let body = serde_json::to_value(&ok("Logout successful").0).unwrap();
        assert_eq!(body["status"], "success");
        assert!(body.get("data").is_none());
        assert!(body.get("token").is_none());
    }
}
