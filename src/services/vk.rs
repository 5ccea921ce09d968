use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};

use crate::config::VkConfig;
use crate::error::UpstreamError;
use crate::models::send_result::SendEnvelope;
use crate::models::{ChatMessage, SendResult};

const METHOD_PREFIX: &str = "/method/";
const REPLY_PREFIX: &str = "You said:";

#[derive(Clone)]
pub struct VkApi {
    client: Client,
    endpoint: Url,
    config: VkConfig,
}

impl VkApi {
    pub fn new(config: VkConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let endpoint = Url::parse(&format!(
            "{}{}{}",
            config.api_url.trim_end_matches('/'),
            METHOD_PREFIX,
            config.send_method
        ))
        .map_err(|e| format!("Invalid VK_API_URL {:?}: {}", config.api_url, e))?;

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(VkApi {
            client,
            endpoint,
            config,
        })
    }

    pub fn confirmation_code(&self) -> &str {
        &self.config.confirmation_code
    }

    /// Full send URL for an echo of `message`.
    ///
    /// The reply goes to `from_id`, the sender, not to `peer_id`. Absent ids
    /// and an absent text leave their parameter out.
    pub fn send_url(&self, message: &ChatMessage) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("access_token", &self.config.access_token)
                .append_pair("v", &self.config.api_version)
                .append_pair("group_id", &self.config.group_id.to_string());
            if let Some(from_id) = message.from_id {
                query.append_pair("peer_id", &from_id.to_string());
            }
            if let Some(text) = &message.text {
                query.append_pair("message", &format!("{}{}", REPLY_PREFIX, text));
            }
            if let Some(random_id) = message.correlation_id {
                query.append_pair("random_id", &random_id.to_string());
            }
        }
        url
    }

    /// Echoes `message` back to its sender. Single attempt, no retry.
    pub async fn send_reply(&self, message: &ChatMessage) -> Result<SendResult, UpstreamError> {
        log::info!(
            "sending reply to peer {:?} via {}",
            message.from_id,
            self.config.send_method
        );

        // without_url: the URL carries the access token
        let response = self
            .client
            .post(self.send_url(message))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        if !status.is_success() {
            log::warn!("VK API answered {} for {}", status, self.config.send_method);
        }

        parse_send_response(&body)
    }
}

/// VK reports failures inside a 200 body, so the body alone decides the outcome.
pub fn parse_send_response(body: &str) -> Result<SendResult, UpstreamError> {
    let envelope: SendEnvelope = serde_json::from_str(body)
        .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

    if let Some(err) = envelope.error {
        return Err(UpstreamError::Platform {
            code: err.error_code,
            message: err.error_msg,
        });
    }

    envelope
        .response
        .map(SendResult::from)
        .ok_or_else(|| UpstreamError::MalformedResponse("missing `response` field".to_string()))
}
