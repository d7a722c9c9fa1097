//! Prompt-driven content generation for classroom material.
//!
//! Every operation follows the same shape: build a prompt from the request,
//! ask the model, then either pass the text through (prose operations) or
//! parse it as JSON and fall back to a fixed value of the same shape.

use anyhow::{anyhow, ensure, Context};
use gemini::models::{
    text_generation::{Blob, GenerateContentRequest, Part, TextGeneration},
    Models,
};

pub mod concept;
pub mod error;
pub mod game;
pub mod illustration;
pub mod lesson;
pub mod pipeline;
pub mod reading;
pub mod speech;
pub mod story;
pub mod translation;
pub mod visual_aid;
pub mod worksheet;

#[cfg(test)]
mod test_support;

pub use error::{GenerationError, Operation};
pub use pipeline::ParseResult;

/// A text-completion backend.
pub trait LanguageModel: Send + Sync {
    fn generate(
        &self,
        prompt: &Prompt,
    ) -> impl std::future::Future<Output = anyhow::Result<String>> + Send;
}

/// Instruction sent to the model, optionally with one attached image.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub image: Option<InlineImage>,
}

impl Prompt {
    pub fn with_image(mut self, image: Option<InlineImage>) -> Self {
        self.image = image;
        self
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self { text, image: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Accepts `data:<mime>;base64,<payload>` or a bare base64 payload,
    /// which is taken to be JPEG.
    pub fn from_data_url(value: &str) -> anyhow::Result<Self> {
        let value = value.trim();
        let (mime_type, data) = match value.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .context("data url has no payload")?;
                let mime_type = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| anyhow!("data url is not base64"))?;
                (mime_type.to_string(), data)
            }
            None => ("image/jpeg".to_string(), value),
        };

        ensure!(is_base64_shaped(data), "image data is not valid base64");

        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }
}

impl LanguageModel for Models {
    async fn generate(&self, prompt: &Prompt) -> anyhow::Result<String> {
        let mut parts = vec![Part::Text {
            text: prompt.text.clone(),
        }];
        if let Some(image) = &prompt.image {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        let response = self
            .generate_content(GenerateContentRequest::user(parts))
            .await?;

        if let Some(reason) = response.block_reason() {
            return Err(anyhow!("prompt was blocked: {}", reason));
        }

        match response.text() {
            Some(text) => Ok(text),
            None => Err(anyhow!(
                "model returned no text, finish reason: {}",
                response.finish_reason().unwrap_or("unknown")
            )),
        }
    }
}

/// Alphabet and padding only; the payload itself is left to the model.
fn is_base64_shaped(data: &str) -> bool {
    let body = data.trim_end_matches('=');
    !data.is_empty()
        && data.len() % 4 == 0
        && data.len() - body.len() <= 2
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Appends `line` to `prompt` only when `value` carries content.
pub(crate) fn push_optional(
    prompt: &mut String,
    value: Option<&str>,
    line: impl FnOnce(&str) -> String,
) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        prompt.push_str(&line(value));
        prompt.push('\n');
    }
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_inline_image_from_data_url() {
        let image =
            InlineImage::from_data_url("data:image/png;base64,aGVsbG8=")
                .unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn test_inline_image_from_bare_payload() {
        let image = InlineImage::from_data_url("aGVsbG8=").unwrap();

        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[rstest]
    #[case("data:image/png,plain")]
    #[case("not base64 !!")]
    #[case("data:image/png;base64,")]
    #[case("aGVsbG8")]
    #[case("aGVs=bG8")]
    #[case("aG===")]
    fn test_inline_image_rejects_garbage(#[case] value: &str) {
        assert!(InlineImage::from_data_url(value).is_err());
    }

    #[test]
    fn test_inline_image_keeps_payload_as_sent() {
        let payload = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB";

        let image = InlineImage::from_data_url(&format!(
            "data:image/png;base64,{}",
            payload
        ))
        .unwrap();

        assert_eq!(image.data, payload);
    }

    #[test]
    fn test_push_optional_skips_blank_values() {
        let mut prompt = String::new();

        push_optional(&mut prompt, Some("  "), |v| format!("Name: {}", v));
        push_optional(&mut prompt, None, |v| format!("Place: {}", v));
        push_optional(&mut prompt, Some("Asha"), |v| format!("Name: {}", v));

        assert_eq!(prompt, "Name: Asha\n");
    }
}
