use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use gemini::models::Models;
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub mod concept;
pub mod game;
pub mod healthz;
pub mod illustration;
pub mod lesson;
pub mod not_found;
pub mod reading;
mod response;
pub mod speech;
pub mod story;
pub mod translation;
pub mod visual_aid;
pub mod worksheet;

pub use response::ApiError;

#[derive(Clone, Debug)]
pub struct ApiState {
    models: Models,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub gemini: Gemini,
    pub server: Server,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Gemini {
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}

impl Config {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        story::generate_story,
        story::generate_personalized_story,
        worksheet::generate_differentiated_worksheet,
        visual_aid::generate_visual_aid,
        illustration::generate_educational_image,
        concept::explain_concept,
        reading::evaluate_voice_reading,
        game::generate_educational_game,
        lesson::generate_lesson_suggestions,
        lesson::generate_lesson_improvements,
        translation::translate_content,
        speech::synthesize_speech,
        speech::recognize_speech,
        healthz::get_health,
    ),
    components(schemas(
        generation::story::GenerateStoryRequest,
        generation::story::GeneratePersonalizedStoryRequest,
        generation::story::StoryResponse,
        generation::worksheet::DifferentiatedWorksheetRequest,
        generation::worksheet::DifferentiatedWorksheetResponse,
        generation::visual_aid::VisualAidRequest,
        generation::visual_aid::VisualAidResponse,
        generation::illustration::EducationalImageRequest,
        generation::illustration::EducationalImageResponse,
        generation::illustration::ImageMetadata,
        generation::concept::ConceptExplanationRequest,
        generation::concept::ConceptExplanationResponse,
        generation::reading::VoiceReadingRequest,
        generation::reading::VoiceReadingResponse,
        generation::game::EducationalGameRequest,
        generation::game::GameFallback,
        generation::lesson::LessonSuggestionsRequest,
        generation::lesson::LessonSuggestionsResponse,
        generation::lesson::LessonImprovementsRequest,
        generation::lesson::LessonPlan,
        generation::lesson::LessonImprovementsResponse,
        generation::translation::TranslationRequest,
        generation::translation::TranslationResponse,
        generation::speech::SynthesizeSpeechRequest,
        generation::speech::SynthesizeSpeechResponse,
        generation::speech::RecognizeSpeechRequest,
        generation::speech::RecognizeSpeechResponse,
        healthz::HealthResponse,
        healthz::Services,
    )),
    tags(
        (name = "generation", description = "Classroom content generation API")
    )
)]
struct ApiDoc;

/// Builds the router. A missing `api_key` is tolerated and only reported by
/// the health check.
pub async fn serve(
    config: &Config,
    api_key: Option<String>,
) -> anyhow::Result<Router> {
    let models = Models::new(
        &config.gemini.base_url,
        &config.gemini.model,
        api_key.as_deref(),
    )?;

    info!(
        task = "start api serving",
        model = models.model(),
        api_key_configured = models.has_api_key()
    );

    let state = ApiState { models };

    let origins = allowed_origins(&config.server.allowed_origins)?;

    // stories
    let story_router = Router::new()
        .route("/", post(story::generate_story))
        .route("/personalized", post(story::generate_personalized_story))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // lessons
    let lesson_router = Router::new()
        .route("/suggestions", post(lesson::generate_lesson_suggestions))
        .route("/improvements", post(lesson::generate_lesson_improvements))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // speech
    let speech_router = Router::new()
        .route("/synthesize", post(speech::synthesize_speech))
        .route("/recognize", post(speech::recognize_speech))
        .fallback(not_found::get_404);

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/healthz", get(healthz::get_health))
        .route(
            "/worksheets/differentiated",
            post(worksheet::generate_differentiated_worksheet),
        )
        .route("/visual-aids", post(visual_aid::generate_visual_aid))
        .route("/images", post(illustration::generate_educational_image))
        .route("/concepts/explain", post(concept::explain_concept))
        .route("/reading/evaluate", post(reading::evaluate_voice_reading))
        .route("/games", post(game::generate_educational_game))
        .route("/translate", post(translation::translate_content))
        .with_state(state)
        .nest("/stories", story_router)
        .nest("/lessons", lesson_router)
        .nest("/speech", speech_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .fallback(not_found::get_404);

    Ok(router)
}

fn allowed_origins(origins: &[String]) -> anyhow::Result<AllowOrigin> {
    if origins.iter().any(|origin| origin == "*") {
        return Ok(AllowOrigin::any());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(AllowOrigin::list(origins))
}
