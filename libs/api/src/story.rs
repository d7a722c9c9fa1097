use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::story::{
    GeneratePersonalizedStoryRequest, GenerateStoryRequest, StoryResponse,
};

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Generate a story
#[utoipa::path(
    post,
    path = "/stories",
    request_body = GenerateStoryRequest,
    responses(
        (status = 200, description = "Story generated", body = StoryResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate story")
    )
)]
pub async fn generate_story(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<GenerateStoryRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<StoryResponse>> {
    let story = generation::story::generate_story(&state.models, &request)
        .await
        .into_response()?;

    Ok(Json(story))
}

/// Generate a story around a named student and their surroundings
#[utoipa::path(
    post,
    path = "/stories/personalized",
    request_body = GeneratePersonalizedStoryRequest,
    responses(
        (status = 200, description = "Story generated", body = StoryResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate personalized story")
    )
)]
pub async fn generate_personalized_story(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<GeneratePersonalizedStoryRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<StoryResponse>> {
    let story = generation::story::generate_personalized_story(
        &state.models,
        &request,
    )
    .await
    .into_response()?;

    Ok(Json(story))
}
