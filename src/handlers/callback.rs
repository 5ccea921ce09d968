use actix_web::{web, HttpResponse};

use crate::error::CallbackError;
use crate::models::{CallbackEvent, EventKind};
use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `POST /onMessage`: entry point for VK Callback API notifications.
pub async fn on_event(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CallbackError> {
    let event: CallbackEvent = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("rejecting malformed callback event: {}", e);
        CallbackError::from(e)
    })?;
    log::info!(
        "received {:?} event for group {:?}: {:?}",
        event.kind,
        event.group_id,
        event.payload
    );

    match event.event_kind() {
        EventKind::Confirmation => Ok(HttpResponse::Ok()
            .content_type(TEXT_PLAIN)
            .body(state.vk.confirmation_code().to_string())),
        EventKind::MessageNew => {
            let message = event
                .chat_message()
                .map_err(|e| {
                    log::warn!("undecodable message_new payload: {}", e);
                    CallbackError::InvalidPayload(e)
                })?
                .ok_or(CallbackError::MissingPayload)?;
            log::info!(
                "message {:?} from {:?} in peer {:?} sent at {:?}",
                message.id,
                message.from_id,
                message.peer_id,
                message.timestamp
            );
            let result = state.vk.send_reply(&message).await.map_err(|e| {
                log::error!("reply to {:?} failed: {}", message.from_id, e);
                CallbackError::from(e)
            })?;
            log::debug!("reply sent, VK answered {}", result.response);
            Ok(HttpResponse::Ok().content_type(TEXT_PLAIN).body("ok"))
        }
        EventKind::Unsupported(kind) => {
            log::info!("ignoring unsupported event type {:?}", kind);
            Ok(HttpResponse::UnprocessableEntity()
                .content_type(TEXT_PLAIN)
                .body("event type doesn't support"))
        }
    }
}
