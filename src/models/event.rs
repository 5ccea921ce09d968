use serde::Deserialize;
use serde_json::Value;

pub const CONFIRMATION: &str = "confirmation";
pub const MESSAGE_NEW: &str = "message_new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind<'a> {
    Confirmation,
    MessageNew,
    Unsupported(&'a str),
}

/// Callback API notification as posted to `/onMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackEvent {
    #[serde(rename = "type")]
    pub kind: String,
    // Shape depends on `kind`; decoded only once we know it is a message.
    #[serde(rename = "object", default)]
    pub payload: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub group_id: Option<i64>,
}

impl CallbackEvent {
    pub fn event_kind(&self) -> EventKind<'_> {
        match self.kind.as_str() {
            CONFIRMATION => EventKind::Confirmation,
            MESSAGE_NEW => EventKind::MessageNew,
            other => EventKind::Unsupported(other),
        }
    }

    /// The chat message carried by a `message_new` event.
    ///
    /// `Ok(None)` when there is no payload at all; `Err` when the payload is
    /// there but is not a `{message: {...}}` object.
    pub fn chat_message(&self) -> Result<Option<ChatMessage>, serde_json::Error> {
        match &self.payload {
            None => Ok(None),
            Some(payload) => serde_json::from_value::<MessageEnvelope>(payload.clone())
                .map(|envelope| Some(envelope.message)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageEnvelope {
    pub message: ChatMessage,
}

// VK's real payloads drift from its docs, so nothing here is mandatory and
// numeric fields also accept their decimal string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub id: Option<i64>,
    #[serde(rename = "date", default, deserialize_with = "deserialize_lenient_i64")]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub peer_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub from_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "random_id", default, deserialize_with = "deserialize_lenient_i64")]
    pub correlation_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientI64 {
    Number(i64),
    Text(String),
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<LenientI64> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(LenientI64::Number(n)) => Ok(Some(n)),
        Some(LenientI64::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(LenientI64::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {:?}", s))),
    }
}
