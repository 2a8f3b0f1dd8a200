//! Google Gemini API client implementation
//!
//! This module provides integration with Google's Gemini models through the
//! generativelanguage REST API, including multimodal plan submissions
//! (instruction text followed by an inline image).

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatRole, GatewaySession, MessageType, ModelGateway};
use crate::error::AssistantError;
use crate::image::PreparedImage;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.95;
const DEFAULT_TOP_K: u32 = 40;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Client for Google's Gemini generateContent API.
///
/// The dialogue context is re-sent in full on every call; the service
/// itself holds no state between round trips.
pub struct GoogleGemini {
    api_key: String,
    /// Model identifier (e.g. "gemini-2.0-flash-exp")
    pub model: String,
    /// API base URL, overridable for testing
    pub base_url: String,
    /// Maximum tokens the model may generate
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Top-p sampling parameter
    pub top_p: f32,
    /// Top-k sampling parameter
    pub top_k: u32,
    /// System instruction sent with every request
    pub system: Option<String>,
    client: reqwest::Client,
}

impl GoogleGemini {
    /// Creates a new Gemini client.
    ///
    /// `None` parameters fall back to the defaults used for plan review:
    /// temperature 0.7, top_p 0.95, top_k 40, 8192 output tokens, and a
    /// 30 second request timeout.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
        max_output_tokens: Option<u32>,
        temperature: Option<f32>,
        top_p: Option<f32>,
        top_k: Option<u32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ))
            .build()
            .map_err(|err| AssistantError::Http(err.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_output_tokens: max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: top_p.unwrap_or(DEFAULT_TOP_P),
            top_k: top_k.unwrap_or(DEFAULT_TOP_K),
            system,
            client,
        })
    }

    async fn generate(
        &self,
        history: &[ChatMessage],
        message: &ChatMessage,
    ) -> Result<String, AssistantError> {
        let mut contents: Vec<Content> = history.iter().map(content_from_message).collect();
        contents.push(content_from_message(message));

        let request = GenerateContentRequest {
            system_instruction: self.system.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
                top_k: self.top_k,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        log::debug!(
            "Gemini request: model={} history_len={}",
            self.model,
            history.len()
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AssistantError::Auth(format!("Gemini API returned {status}: {body}")),
                _ => AssistantError::Provider(format!("Gemini API returned {status}: {body}")),
            });
        }

        let raw = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw).map_err(|err| {
            AssistantError::ResponseFormat {
                message: format!("failed to decode Gemini response: {err}"),
                raw_response: raw.clone(),
            }
        })?;

        extract_text(parsed).ok_or(AssistantError::ResponseFormat {
            message: "Gemini response contained no generated text".to_string(),
            raw_response: raw,
        })
    }
}

#[async_trait]
impl ModelGateway for GoogleGemini {
    fn open_session(&self) -> Result<GatewaySession, AssistantError> {
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "No API key available for Google Gemini".to_string(),
            ));
        }
        Ok(GatewaySession::new())
    }

    async fn send_text(
        &self,
        session: &mut GatewaySession,
        text: &str,
    ) -> Result<String, AssistantError> {
        let request = ChatMessage::user().content(text).build();
        let reply = self.generate(session.messages(), &request).await?;
        session.record_exchange(
            request,
            ChatMessage::assistant().content(reply.clone()).build(),
        );
        Ok(reply)
    }

    async fn send_multimodal(
        &self,
        session: &mut GatewaySession,
        text: &str,
        image: &PreparedImage,
    ) -> Result<String, AssistantError> {
        let request = ChatMessage::user()
            .content(text)
            .image(image.mime().clone(), image.data().to_vec())
            .build();
        let reply = self.generate(session.messages(), &request).await?;
        session.record_exchange(
            request,
            ChatMessage::assistant().content(reply.clone()).build(),
        );
        Ok(reply)
    }
}

/// Request payload for the generateContent endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// One part of a content entry: text or inline image data.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: BASE64.encode(data),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

/// Map a dialogue message onto the wire format. The text part always
/// precedes the image part.
fn content_from_message(message: &ChatMessage) -> Content {
    let role = match message.role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    };
    let mut parts = Vec::new();
    if !message.content.is_empty() {
        parts.push(Part::text(&message.content));
    }
    if let MessageType::Image((mime, data)) = &message.message_type {
        parts.push(Part::inline(mime.mime_type(), data));
    }
    Content {
        role: Some(role.to_string()),
        parts,
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates?.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbImage};

    use crate::chat::ImageMime;

    use super::*;

    fn gateway(base_url: &str) -> GoogleGemini {
        GoogleGemini::new(
            "test-key",
            None,
            Some(base_url.to_string()),
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .expect("client")
    }

    fn candidate_body(text: &str) -> String {
        format!(
            r#"{{"candidates":[{{"content":{{"role":"model","parts":[{{"text":"{text}"}}]}}}}]}}"#
        )
    }

    #[test]
    fn open_session_rejects_empty_key() {
        let gateway = GoogleGemini::new(
            "", None, None, None, None, None, None, None, None,
        )
        .expect("client");
        let err = gateway.open_session().expect_err("must fail");
        assert!(matches!(err, AssistantError::Configuration(_)));
    }

    #[test]
    fn text_part_precedes_image_part() {
        let message = ChatMessage::user()
            .content("review this plan")
            .image(ImageMime::JPEG, vec![0xFF, 0xD8])
            .build();
        let content = content_from_message(&message);
        assert_eq!(content.role.as_deref(), Some("user"));
        assert_eq!(content.parts.len(), 2);
        assert_eq!(content.parts[0].text.as_deref(), Some("review this plan"));
        assert!(content.parts[0].inline_data.is_none());
        let inline = content.parts[1].inline_data.as_ref().expect("inline data");
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, BASE64.encode([0xFF, 0xD8]));
    }

    #[test]
    fn assistant_history_maps_to_model_role() {
        let message = ChatMessage::assistant().content("U-0.30 applies").build();
        let content = content_from_message(&message);
        assert_eq!(content.role.as_deref(), Some("model"));
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"WSEC "},{"text":"C402"}]}}]}"#,
        )
        .expect("parse");
        assert_eq!(extract_text(response).as_deref(), Some("WSEC C402"));
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).expect("parse");
        assert_eq!(extract_text(response), None);
    }

    #[tokio::test]
    async fn send_text_round_trip_records_exchange() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate_body("WSEC C402... U-0.30"))
            .create_async()
            .await;

        let gateway = gateway(&server.url());
        let mut session = gateway.open_session().expect("session");

        let reply = gateway
            .send_text(&mut session, "What are window U-factor limits?")
            .await
            .expect("reply");

        assert_eq!(reply, "WSEC C402... U-0.30");
        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[1].content, reply);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn auth_status_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let gateway = gateway(&server.url());
        let mut session = gateway.open_session().expect("session");

        let err = gateway
            .send_text(&mut session, "hello")
            .await
            .expect_err("must fail");

        assert!(matches!(err, AssistantError::Auth(_)));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn quota_status_maps_to_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let gateway = gateway(&server.url());
        let mut session = gateway.open_session().expect("session");

        let err = gateway
            .send_text(&mut session, "hello")
            .await
            .expect_err("must fail");

        assert!(matches!(err, AssistantError::Provider(_)));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_response_format_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let gateway = gateway(&server.url());
        let mut session = gateway.open_session().expect("session");

        let err = gateway
            .send_text(&mut session, "hello")
            .await
            .expect_err("must fail");

        assert!(matches!(err, AssistantError::ResponseFormat { .. }));
    }

    #[tokio::test]
    async fn send_multimodal_posts_inline_image() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"contents":[{"role":"user"}]}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate_body("Compliance report"))
            .create_async()
            .await;

        let image = PreparedImage::from_image(DynamicImage::ImageRgb8(RgbImage::new(8, 8)))
            .expect("prepare");
        let gateway = gateway(&server.url());
        let mut session = gateway.open_session().expect("session");

        let report = gateway
            .send_multimodal(&mut session, "Review this plan.", &image)
            .await
            .expect("report");

        assert_eq!(report, "Compliance report");
        assert_eq!(session.len(), 2);
        assert!(session.messages()[0].has_image());
        mock.assert_async().await;
    }
}
