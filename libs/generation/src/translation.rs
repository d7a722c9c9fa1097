use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    pipeline::run_prose, GenerationError, LanguageModel, Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub translated_text: String,
}

pub fn translation_prompt(request: &TranslationRequest) -> Prompt {
    format!(
        r#"Translate the following classroom content into {target}.
Keep the meaning, tone and formatting. Use words a school student would understand.
Respond with the translation only.

{text}"#,
        target = request.target_language,
        text = request.text,
    )
    .into()
}

pub async fn translate_content<M: LanguageModel>(
    model: &M,
    request: &TranslationRequest,
) -> Result<TranslationResponse, GenerationError> {
    let translated_text = run_prose(
        model,
        Operation::TranslateContent,
        translation_prompt(request),
    )
    .await?;

    Ok(TranslationResponse { translated_text })
}
