use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    pipeline::run_prose, push_optional, GenerationError, LanguageModel,
    Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateStoryRequest {
    pub prompt: String,
    pub language: String,
    pub grade: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePersonalizedStoryRequest {
    pub prompt: String,
    pub language: String,
    pub grade: String,
    pub subject: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub local_context: Option<String>,
    #[serde(default)]
    pub previous_feedback: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoryResponse {
    pub story: String,
}

pub fn story_prompt(request: &GenerateStoryRequest) -> Prompt {
    format!(
        r#"You are a creative storyteller for Indian classrooms.
Write a short, engaging story in {language} for grade {grade} students.
Subject: {subject}
Story request: {prompt}

Requirements:
- Use vocabulary and sentence length suitable for grade {grade}.
- Ground the story in settings, names and customs familiar to Indian children.
- Weave in at least one clear learning point about {subject}.
- Keep it between 250 and 400 words and end with a gentle moral or reflection question.
- Respond with the story text only."#,
        language = request.language,
        grade = request.grade,
        subject = request.subject,
        prompt = request.prompt,
    )
    .into()
}

pub fn personalized_story_prompt(
    request: &GeneratePersonalizedStoryRequest,
) -> Prompt {
    let mut prompt = format!(
        r#"You are a creative storyteller for Indian classrooms.
Write a short, engaging story in {language} for grade {grade} students.
Subject: {subject}
Story request: {prompt}
"#,
        language = request.language,
        grade = request.grade,
        subject = request.subject,
        prompt = request.prompt,
    );

    push_optional(&mut prompt, request.student_name.as_deref(), |name| {
        format!("Make {} the main character of the story.", name)
    });
    push_optional(&mut prompt, request.local_context.as_deref(), |place| {
        format!(
            "Set the story in or around {} and mention local details.",
            place
        )
    });

    let feedback = request
        .previous_feedback
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>();
    if !feedback.is_empty() {
        prompt.push_str(
            "Earlier stories received this feedback, take it into account:\n",
        );
        for item in feedback {
            prompt.push_str(&format!("- {}\n", item));
        }
    }

    prompt.push_str(&format!(
        r#"
Requirements:
- Use vocabulary and sentence length suitable for grade {grade}.
- Keep the story culturally relevant and inclusive.
- Weave in at least one clear learning point about {subject}.
- Keep it between 250 and 400 words.
- Respond with the story text only."#,
        grade = request.grade,
        subject = request.subject,
    ));

    prompt.into()
}

pub async fn generate_story<M: LanguageModel>(
    model: &M,
    request: &GenerateStoryRequest,
) -> Result<StoryResponse, GenerationError> {
    let story =
        run_prose(model, Operation::GenerateStory, story_prompt(request))
            .await?;

    Ok(StoryResponse { story })
}

pub async fn generate_personalized_story<M: LanguageModel>(
    model: &M,
    request: &GeneratePersonalizedStoryRequest,
) -> Result<StoryResponse, GenerationError> {
    let story = run_prose(
        model,
        Operation::GeneratePersonalizedStory,
        personalized_story_prompt(request),
    )
    .await?;

    Ok(StoryResponse { story })
}
