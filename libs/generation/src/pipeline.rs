use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{GenerationError, LanguageModel, Operation, Prompt};

/// Outcome of reading a structured answer. Both arms carry a value of the
/// same shape, so callers always get something they can render.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Parsed(T),
    Fallback(T),
}

impl<T> ParseResult<T> {
    pub fn into_inner(self) -> T {
        match self {
            ParseResult::Parsed(value) | ParseResult::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseResult::Fallback(_))
    }
}

/// Reads a JSON object out of model output. The whole answer is tried
/// first, then the body of its first markdown code fence, so a fenced object
/// may follow a line of prose. Anything that is not an object is rejected.
pub fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    let raw = raw.trim();

    as_object(raw).or_else(|| fenced_block(raw).and_then(as_object))
}

fn as_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Body of the first fenced block, without its info string ("json").
/// The info string may end in a newline or a space.
fn fenced_block(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("```")?;
    let (body, _) = rest.split_once("```")?;
    let info_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(body.len());

    Some(body[info_len..].trim())
}

/// Parses `raw` as a JSON object, or builds the fallback from it.
pub fn parse_or_fallback<F, D>(raw: &str, fallback: F) -> ParseResult<Value>
where
    F: FnOnce(&str) -> D,
    D: Serialize,
{
    if let Some(object) = parse_object(raw) {
        return ParseResult::Parsed(Value::Object(object));
    }

    match serde_json::to_value(fallback(raw)) {
        Ok(value) => ParseResult::Fallback(value),
        // fallbacks are plain structs of strings and lists
        Err(e) => ParseResult::Fallback(Value::String(e.to_string())),
    }
}

async fn call_model<M: LanguageModel>(
    model: &M,
    operation: Operation,
    prompt: &Prompt,
) -> Result<String, GenerationError> {
    info!(task = "generate", operation = operation.as_ref());

    model
        .generate(prompt)
        .await
        .map_err(|e| GenerationError::new(operation, e))
}

/// Build prompt -> call model -> try parse -> fallback.
pub async fn run_generation<M, F, D>(
    model: &M,
    operation: Operation,
    prompt: Prompt,
    fallback: F,
) -> Result<ParseResult<Value>, GenerationError>
where
    M: LanguageModel,
    F: FnOnce(&str) -> D,
    D: Serialize,
{
    let raw = call_model(model, operation, &prompt).await?;

    let result = parse_or_fallback(&raw, fallback);
    if result.is_fallback() {
        warn!(
            task = "parse",
            operation = operation.as_ref(),
            message = "model output was not a json object, using fallback"
        );
    }

    Ok(result)
}

/// Prose operations hand the model's text back untouched.
pub async fn run_prose<M: LanguageModel>(
    model: &M,
    operation: Operation,
    prompt: Prompt,
) -> Result<String, GenerationError> {
    call_model(model, operation, &prompt).await
}
