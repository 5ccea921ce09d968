pub mod event;
pub mod send_result;

pub use event::{CallbackEvent, ChatMessage, EventKind};
pub use send_result::SendResult;
