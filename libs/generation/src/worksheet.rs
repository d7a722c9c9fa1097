use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{
    pipeline::run_prose, GenerationError, InlineImage, LanguageModel,
    Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DifferentiatedWorksheetRequest {
    pub topic: String,
    pub subject: String,
    pub grades: Vec<String>,
    pub language: String,
    pub difficulty: String,
    /// Textbook page or diagram as a data url or bare base64.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub include_visuals: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DifferentiatedWorksheetResponse {
    pub worksheets: BTreeMap<String, String>,
}

pub fn worksheet_prompt(
    request: &DifferentiatedWorksheetRequest,
    grade: &str,
) -> String {
    let mut prompt = format!(
        r#"Create a worksheet for Grade {grade} students in {language}.
Topic: {topic}
Subject: {subject}
Difficulty: {difficulty}

The worksheet must contain:
1. A title and short instructions for the student.
2. A warm-up section with 3 simple questions.
3. A practice section with 5 questions matched to Grade {grade}.
4. One challenge question that connects {topic} to everyday life in India.
5. An answer key for the teacher at the end.
"#,
        grade = grade,
        language = request.language,
        topic = request.topic,
        subject = request.subject,
        difficulty = request.difficulty,
    );

    if request.include_visuals.unwrap_or(false) {
        prompt.push_str(
            "Include simple diagrams or drawing activities, described in words so a teacher can sketch them on a blackboard.\n",
        );
    }
    if request.image_data.is_some() {
        prompt.push_str(
            "Base the questions on the attached textbook page.\n",
        );
    }

    prompt
}

/// One model call per grade, in request order. Any failure discards every
/// worksheet produced so far.
pub async fn generate_differentiated_worksheet<M: LanguageModel>(
    model: &M,
    request: &DifferentiatedWorksheetRequest,
) -> Result<DifferentiatedWorksheetResponse, GenerationError> {
    let operation = Operation::GenerateDifferentiatedWorksheet;
    let image = request
        .image_data
        .as_deref()
        .map(InlineImage::from_data_url)
        .transpose()
        .map_err(|e| GenerationError::new(operation, e))?;

    let mut worksheets = BTreeMap::new();
    for grade in &request.grades {
        info!(task = "worksheet", grade = grade.as_str());
        let prompt = Prompt::from(worksheet_prompt(request, grade))
            .with_image(image.clone());
        let worksheet = run_prose(model, operation, prompt).await?;
        worksheets.insert(grade.clone(), worksheet);
    }

    Ok(DifferentiatedWorksheetResponse { worksheets })
}
