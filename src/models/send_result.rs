use serde::Deserialize;

/// Normalized outcome of a successful send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub response: String,
}

// VK answers 200 OK for both outcomes; one of these two fields is set.
#[derive(Debug, Deserialize)]
pub(crate) struct SendEnvelope {
    #[serde(default)]
    pub response: Option<ResponseValue>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResponseValue {
    Text(String),
    Id(i64),
}

impl From<ResponseValue> for SendResult {
    fn from(value: ResponseValue) -> Self {
        let response = match value {
            ResponseValue::Text(s) => s,
            ResponseValue::Id(id) => id.to_string(),
        };
        SendResult { response }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}
