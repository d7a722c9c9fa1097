use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    pipeline::run_generation, push_optional, GenerationError, LanguageModel,
    Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConceptExplanationRequest {
    pub question: String,
    pub difficulty: String,
    pub language: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub student_level: Option<String>,
    #[serde(default)]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub previous_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptExplanationResponse {
    pub explanation: String,
    pub visual_aids: Vec<String>,
    pub activities: Vec<String>,
    pub assessment_questions: Vec<String>,
    pub next_topics: Vec<String>,
}

pub fn concept_prompt(request: &ConceptExplanationRequest) -> Prompt {
    let mut prompt = format!(
        r#"You are a patient teacher who adapts explanations to each student.
Answer the student's question in {language} at a {difficulty} difficulty level.
Question: {question}
"#,
        language = request.language,
        difficulty = request.difficulty,
        question = request.question,
    );

    push_optional(&mut prompt, request.subject.as_deref(), |subject| {
        format!("Subject: {}", subject)
    });
    push_optional(&mut prompt, request.student_level.as_deref(), |level| {
        format!("Student level: {}", level)
    });
    push_optional(&mut prompt, request.learning_style.as_deref(), |style| {
        format!(
            "The student learns best in a {} way; shape the explanation and activities for that.",
            style
        )
    });

    let previous = request
        .previous_questions
        .iter()
        .filter(|q| !q.trim().is_empty())
        .map(|q| format!("- {}", q.trim()))
        .collect::<Vec<_>>();
    if !previous.is_empty() {
        prompt.push_str("The student asked these questions before:\n");
        prompt.push_str(&previous.join("\n"));
        prompt.push('\n');
    }

    prompt.push_str(
        r#"
Use analogies from everyday Indian life. Respond ONLY with JSON in exactly this shape:
{
  "explanation": "Clear explanation of the concept",
  "visualAids": ["simple drawing or object the teacher can show"],
  "activities": ["short activity to try the concept"],
  "assessmentQuestions": ["question to check understanding"],
  "nextTopics": ["related topic to learn next"]
}"#,
    );

    prompt.into()
}

pub fn concept_fallback(raw: &str) -> ConceptExplanationResponse {
    ConceptExplanationResponse {
        explanation: raw.to_string(),
        visual_aids: vec![],
        activities: vec![],
        assessment_questions: vec![],
        next_topics: vec![],
    }
}

pub async fn explain_concept<M: LanguageModel>(
    model: &M,
    request: &ConceptExplanationRequest,
) -> Result<Value, GenerationError> {
    let result = run_generation(
        model,
        Operation::ExplainConceptAdaptive,
        concept_prompt(request),
        concept_fallback,
    )
    .await?;

    Ok(result.into_inner())
}
