use std::sync::Arc;

use crate::chat::{ChatRole, GatewaySession, ModelGateway};
use crate::error::AssistantError;
use crate::image::PreparedImage;
use crate::prompts;

use super::types::{ImageAttachment, SessionId, Turn, TurnResult};

/// One user's dialogue: the append-only transcript, the gateway-side
/// dialogue context, and the advisory plan-review flag.
///
/// Every mutating operation takes `&mut self`, so overlapping submissions
/// against the same session are rejected at compile time. Distinct
/// sessions are fully independent.
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    turns: Vec<Turn>,
    remote: GatewaySession,
    plan_reviewed: bool,
}

impl ChatSession {
    fn new(remote: GatewaySession) -> Self {
        Self {
            id: SessionId::new(),
            turns: Vec::new(),
            remote,
            plan_reviewed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The transcript, oldest turn first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Whether a plan image has already been reviewed in this session.
    ///
    /// Advisory only: callers may consult it to avoid re-submitting the
    /// same upload, but nothing stops a repeated review.
    pub fn plan_reviewed(&self) -> bool {
        self.plan_reviewed
    }

    /// The dialogue context held on behalf of the remote service (debugging).
    pub fn remote_context(&self) -> &GatewaySession {
        &self.remote
    }

    /// Render the transcript as `ROLE: content` blocks separated by blank
    /// lines, in append order.
    pub fn export_transcript(&self) -> String {
        let blocks: Vec<String> = self
            .turns
            .iter()
            .map(|turn| format!("{}: {}", role_label(&turn.role), turn.content))
            .collect();
        blocks.join("\n\n")
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

fn role_label(role: &ChatRole) -> &'static str {
    match role {
        ChatRole::User => "USER",
        ChatRole::Assistant => "ASSISTANT",
    }
}

/// Coordinates dialogue lifecycle against a [`ModelGateway`].
///
/// Guarantees the transcript stays consistent with what was actually sent
/// and received: submissions never raise past this boundary, and a failed
/// round trip still appends a display-ready assistant turn so the export
/// remains complete.
pub struct SessionManager {
    gateway: Arc<dyn ModelGateway>,
    review_instruction: String,
}

impl SessionManager {
    /// Create a manager over the given gateway, with the shipped
    /// plan-review instruction.
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            review_instruction: prompts::PLAN_REVIEW_INSTRUCTION.to_string(),
        }
    }

    /// Replace the default plan-review instruction.
    pub fn with_review_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.review_instruction = instruction.into();
        self
    }

    /// Open a fresh session.
    ///
    /// Fails with [`AssistantError::Configuration`] before any network
    /// effect when the gateway holds no usable credential.
    pub fn create_session(&self) -> Result<ChatSession, AssistantError> {
        let remote = self.gateway.open_session()?;
        Ok(ChatSession::new(remote))
    }

    /// Discard the session's history and atomically install a fresh one
    /// with a new id, empty transcript, and cleared review flag.
    pub fn reset(&self, session: &mut ChatSession) -> Result<(), AssistantError> {
        *session = self.create_session()?;
        Ok(())
    }

    /// Submit one text turn.
    ///
    /// Appends the user turn, forwards to the gateway, then appends the
    /// assistant turn: the reply on success, a synthesized error message
    /// on failure. Never returns an error past this boundary.
    pub async fn submit_text(&self, session: &mut ChatSession, text: &str) -> TurnResult {
        session.push(Turn::user(text));
        match self.gateway.send_text(&mut session.remote, text).await {
            Ok(reply) => {
                session.push(Turn::assistant(reply.clone()));
                TurnResult::success(reply)
            }
            Err(err) => {
                log::warn!("text turn failed: {err}");
                let message = format!("Error sending message: {err}");
                session.push(Turn::assistant(message.clone()));
                TurnResult::failure(err.kind(), message)
            }
        }
    }

    /// Submit an uploaded plan image for compliance review.
    ///
    /// The raw upload is decoded and normalized first; rejected input is
    /// reported without any remote call. On success the review report is
    /// appended as an assistant turn and the advisory review flag is set.
    pub async fn submit_image_review(&self, session: &mut ChatSession, raw: &[u8]) -> TurnResult {
        let image = match PreparedImage::from_bytes(raw) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("plan image rejected before submission: {err}");
                let message = format!(
                    "Error analyzing plan: {err}\nPlease ensure you're using a supported image format."
                );
                session.push(Turn::assistant(message.clone()));
                return TurnResult::failure(err.kind(), message);
            }
        };

        let attachment = ImageAttachment {
            mime: image.mime().clone(),
            width: image.width(),
            height: image.height(),
        };

        match self
            .gateway
            .send_multimodal(&mut session.remote, &self.review_instruction, &image)
            .await
        {
            Ok(report) => {
                session.push(Turn::assistant(report.clone()).with_attachment(attachment));
                session.plan_reviewed = true;
                TurnResult::success(report)
            }
            Err(err) => {
                log::warn!("plan review failed: {err}");
                let message = format!(
                    "Error analyzing plan: {err}\nPlease ensure your API key is valid and you're using a supported image format."
                );
                session.push(Turn::assistant(message.clone()));
                TurnResult::failure(err.kind(), message)
            }
        }
    }
}
