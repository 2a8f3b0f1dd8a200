mod manager;
mod types;


pub use manager::{ChatSession, SessionManager};
pub use types::{ImageAttachment, SessionId, Turn, TurnResult};
