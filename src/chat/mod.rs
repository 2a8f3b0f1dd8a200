mod message;
mod traits;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole, ImageMime, MessageType};
pub use traits::{GatewaySession, ModelGateway};
