use async_trait::async_trait;

use crate::error::AssistantError;
use crate::image::PreparedImage;

use super::message::ChatMessage;

/// Dialogue context carried across turns on behalf of the remote service.
///
/// Adapters that re-send history each round trip keep the successfully
/// exchanged messages here. A failed round trip leaves the context
/// untouched, so the model never sees locally synthesized error text.
#[derive(Debug, Clone, Default)]
pub struct GatewaySession {
    messages: Vec<ChatMessage>,
}

impl GatewaySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages exchanged so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Record one completed round trip: the request message and the reply.
    pub fn record_exchange(&mut self, request: ChatMessage, reply: ChatMessage) {
        self.messages.push(request);
        self.messages.push(reply);
    }
}

/// Trait for gateways that carry a chat-style dialogue with a remote
/// generative model.
///
/// This is the sole boundary to the external service. Implementations
/// translate domain calls into transport calls and fold every transport,
/// authentication, quota, or response-format failure into an
/// [`AssistantError`]; nothing propagates as an unhandled fault. No
/// retries are performed: a call either succeeds or its failure is
/// surfaced immediately so the caller can resend.
#[async_trait]
pub trait ModelGateway: Sync + Send {
    /// Establish a dialogue context with empty history.
    ///
    /// Fails fast, without any network attempt, when the adapter holds no
    /// usable credential.
    fn open_session(&self) -> Result<GatewaySession, AssistantError>;

    /// Send one text turn and return the generated reply.
    async fn send_text(
        &self,
        session: &mut GatewaySession,
        text: &str,
    ) -> Result<String, AssistantError>;

    /// Send one multimodal turn: instruction text followed by an image.
    ///
    /// Part order matters to the remote model: the instruction frames how
    /// the image is interpreted, so adapters place the text part first.
    async fn send_multimodal(
        &self,
        session: &mut GatewaySession,
        text: &str,
        image: &PreparedImage,
    ) -> Result<String, AssistantError>;
}
