//! Conversation core for a Washington State Energy Code compliance
//! assistant.
//!
//! The crate is the session and request-adaptation layer behind an
//! energy-code review UI: it keeps one user's multi-turn dialogue
//! consistent, adapts text and text+image submissions into a uniform
//! request against Google's Gemini API, and folds every remote failure
//! into a display-ready result so no caller ever has to catch anything.
//!
//! - [`session::SessionManager`] owns the dialogue lifecycle: session
//!   creation and reset, text turns, plan-image reviews, and transcript
//!   export.
//! - [`chat::ModelGateway`] is the sole boundary to the remote service;
//!   [`backends::google::GoogleGemini`] is its Gemini adapter.
//! - [`image`] normalizes uploaded plan images (RGB, longest edge capped
//!   at 4096 px) before transmission.
//!
//! # Example
//!
//! ```no_run
//! use wsec_assistant::AssistantBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = AssistantBuilder::new()
//!         .api_key(std::env::var("GEMINI_API_KEY")?)
//!         .model("gemini-2.0-flash-exp")
//!         .build()?;
//!
//!     let mut session = manager.create_session()?;
//!     let result = manager
//!         .submit_text(&mut session, "What are window U-factor limits in climate zone 4?")
//!         .await;
//!     println!("{}", result.text);
//!     println!("{}", session.export_transcript());
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod builder;
pub mod chat;
pub mod error;
pub mod image;
pub mod prompts;
pub mod session;

pub use builder::AssistantBuilder;
pub use error::{AssistantError, ErrorKind};
pub use session::{ChatSession, SessionManager, Turn, TurnResult};
