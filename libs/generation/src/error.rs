use strum::{AsRefStr, Display, EnumCount, EnumIter, IntoEnumIterator};

/// Every operation exposed to callers, named as its endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumCount,
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    GenerateStory,
    GeneratePersonalizedStory,
    GenerateDifferentiatedWorksheet,
    GenerateVisualAidWithImage,
    GenerateEducationalImage,
    ExplainConceptAdaptive,
    EvaluateVoiceReading,
    GenerateEducationalGame,
    GenerateLessonSuggestions,
    GenerateLessonImprovements,
    TranslateContent,
    SynthesizeSpeech,
    RecognizeSpeech,
}

impl Operation {
    /// Endpoint names in declaration order.
    pub fn names() -> Vec<String> {
        Operation::iter().map(|operation| operation.to_string()).collect()
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::GenerateStory => "Failed to generate story",
            Operation::GeneratePersonalizedStory => {
                "Failed to generate personalized story"
            }
            Operation::GenerateDifferentiatedWorksheet => {
                "Failed to generate differentiated worksheet"
            }
            Operation::GenerateVisualAidWithImage => {
                "Failed to generate visual aid"
            }
            Operation::GenerateEducationalImage => {
                "Failed to generate educational image"
            }
            Operation::ExplainConceptAdaptive => "Failed to explain concept",
            Operation::EvaluateVoiceReading => "Failed to evaluate voice reading",
            Operation::GenerateEducationalGame => {
                "Failed to generate educational game"
            }
            Operation::GenerateLessonSuggestions => {
                "Failed to generate lesson suggestions"
            }
            Operation::GenerateLessonImprovements => {
                "Failed to generate lesson improvements"
            }
            Operation::TranslateContent => "Failed to translate content",
            Operation::SynthesizeSpeech => "Failed to synthesize speech",
            Operation::RecognizeSpeech => "Failed to recognize speech",
        }
    }
}

/// The model could not be reached or refused to answer.
///
/// Only the operation's generic message is displayed; the cause stays in
/// `source` for server-side logging.
#[derive(Debug, thiserror::Error)]
#[error("{}", .operation.failure_message())]
pub struct GenerationError {
    pub operation: Operation,
    #[source]
    pub source: anyhow::Error,
}

impl GenerationError {
    pub fn new(operation: Operation, source: anyhow::Error) -> Self {
        Self { operation, source }
    }
}
