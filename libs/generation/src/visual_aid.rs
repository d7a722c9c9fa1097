use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    illustration::placeholder_base64, pipeline::run_generation,
    GenerationError, LanguageModel, Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualAidRequest {
    pub topic: String,
    pub subject: String,
    pub grade: String,
    pub language: String,
    #[serde(default)]
    pub include_image: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualAidResponse {
    pub instructions: String,
    pub materials: Vec<String>,
    pub time_estimate: String,
    pub difficulty: String,
    pub teaching_tips: Vec<String>,
    pub student_engagement: Vec<String>,
    pub variations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

pub fn visual_aid_prompt(request: &VisualAidRequest) -> Prompt {
    format!(
        r#"You are an experienced teacher in a low-resource Indian classroom.
Design a hands-on visual aid that explains "{topic}" ({subject}) to grade {grade} students.
Write all text in {language}. Use only cheap, locally available materials (chart paper, chalk, bottle caps, leaves, clay).

Respond ONLY with JSON in exactly this shape:
{{
  "instructions": "Step-by-step instructions to build and use the aid",
  "materials": ["material 1", "material 2"],
  "timeEstimate": "30 minutes",
  "difficulty": "Easy | Medium | Hard",
  "teachingTips": ["tip 1", "tip 2"],
  "studentEngagement": ["activity 1", "activity 2"],
  "variations": ["variation 1", "variation 2"]
}}"#,
        topic = request.topic,
        subject = request.subject,
        grade = request.grade,
        language = request.language,
    )
    .into()
}

pub fn visual_aid_fallback(raw: &str) -> VisualAidResponse {
    VisualAidResponse {
        instructions: raw.to_string(),
        materials: vec![
            "Chart paper".to_string(),
            "Colored markers or chalk".to_string(),
            "Scissors".to_string(),
            "Glue or tape".to_string(),
        ],
        time_estimate: "30-45 minutes".to_string(),
        difficulty: "Medium".to_string(),
        teaching_tips: vec![
            "Build the aid in front of the class and explain each step".to_string(),
            "Ask students to predict what comes next".to_string(),
            "Relate the aid to examples from daily life".to_string(),
        ],
        student_engagement: vec![
            "Invite students to label parts of the aid".to_string(),
            "Let small groups make their own version".to_string(),
        ],
        variations: vec![
            "Use locally available materials instead of chart paper".to_string(),
            "Turn the aid into a quiz game".to_string(),
        ],
        image_url: None,
    }
}

/// With `includeImage`, a placeholder illustration is attached as
/// `imageUrl` on both the parsed and the fallback path.
pub async fn generate_visual_aid<M: LanguageModel>(
    model: &M,
    request: &VisualAidRequest,
) -> Result<Value, GenerationError> {
    let operation = Operation::GenerateVisualAidWithImage;
    let mut result = run_generation(
        model,
        operation,
        visual_aid_prompt(request),
        visual_aid_fallback,
    )
    .await?
    .into_inner();

    if request.include_image.unwrap_or(false) {
        let image = placeholder_base64("4:3", "diagram", &request.topic)
            .map_err(|e| GenerationError::new(operation, e))?;
        if let Value::Object(object) = &mut result {
            object.insert(
                "imageUrl".to_string(),
                Value::String(format!("data:image/png;base64,{}", image)),
            );
        }
    }

    Ok(result)
}
