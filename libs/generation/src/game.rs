use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, EnumString};
use utoipa::ToSchema;

use crate::{
    pipeline::run_generation, GenerationError, LanguageModel, Operation,
    Prompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameType {
    Math,
    Puzzle,
    Word,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationalGameRequest {
    /// One of `math`, `puzzle`, `word`.
    pub game_type: String,
    pub subject: String,
    pub grade: String,
    pub language: String,
    pub difficulty: String,
}

/// Shape returned when the model's game could not be read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GameFallback {
    pub title: String,
    pub instructions: String,
    pub questions: Vec<Value>,
    pub error: String,
}

fn game_shape(game_type: GameType) -> &'static str {
    match game_type {
        GameType::Math => {
            r#"{
  "title": "Game title",
  "instructions": "How to play",
  "questions": [
    { "question": "7 + 5 = ?", "options": ["10", "11", "12", "13"], "answer": "12", "explanation": "Why" }
  ]
}
Include 10 questions."#
        }
        GameType::Puzzle => {
            r#"{
  "title": "Game title",
  "instructions": "How to play",
  "puzzles": [
    { "clue": "Riddle or clue", "answer": "Answer", "hint": "Helpful hint" }
  ]
}
Include 8 puzzles."#
        }
        GameType::Word => {
            r#"{
  "title": "Game title",
  "instructions": "How to play",
  "rounds": [
    { "word": "river", "scrambled": "vrire", "hint": "Flows to the sea", "meaning": "A large natural stream of water" }
  ]
}
Include 10 rounds."#
        }
    }
}

pub fn game_prompt(
    game_type: GameType,
    request: &EducationalGameRequest,
) -> Prompt {
    format!(
        r#"Design a fun classroom {kind} game for grade {grade} students.
Subject: {subject}
Language: {language}
Difficulty: {difficulty}
Use names, places and objects familiar to Indian children.

Respond ONLY with JSON in exactly this shape:
{shape}"#,
        kind = game_type.as_ref(),
        grade = request.grade,
        subject = request.subject,
        language = request.language,
        difficulty = request.difficulty,
        shape = game_shape(game_type),
    )
    .into()
}

pub fn game_fallback(
    game_type: GameType,
    request: &EducationalGameRequest,
) -> GameFallback {
    GameFallback {
        title: format!("{} {} game", request.subject, game_type.as_ref()),
        instructions: "The game could not be generated this time. Please try again.".to_string(),
        questions: vec![],
        error: "Failed to parse game content".to_string(),
    }
}

/// Rejects an unknown `gameType` before the model is called.
pub async fn generate_educational_game<M: LanguageModel>(
    model: &M,
    request: &EducationalGameRequest,
) -> Result<Value, GenerationError> {
    let operation = Operation::GenerateEducationalGame;
    let game_type = GameType::from_str(request.game_type.trim()).map_err(|_| {
        GenerationError::new(
            operation,
            anyhow!("unsupported game type: {}", request.game_type),
        )
    })?;

    let result = run_generation(
        model,
        operation,
        game_prompt(game_type, request),
        |_| game_fallback(game_type, request),
    )
    .await?;

    Ok(result.into_inner())
}
