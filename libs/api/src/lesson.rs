use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::lesson::{
    LessonImprovementsRequest, LessonImprovementsResponse,
    LessonSuggestionsRequest, LessonSuggestionsResponse,
};
use serde_json::Value;

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Suggest activities and resources for a lesson topic
#[utoipa::path(
    post,
    path = "/lessons/suggestions",
    request_body = LessonSuggestionsRequest,
    responses(
        (status = 200, description = "Lesson suggestions", body = LessonSuggestionsResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate lesson suggestions")
    )
)]
pub async fn generate_lesson_suggestions(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<LessonSuggestionsRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let suggestions =
        generation::lesson::generate_lesson_suggestions(&state.models, &request)
            .await
            .into_response()?;

    Ok(Json(suggestions))
}

/// Review an existing lesson plan
#[utoipa::path(
    post,
    path = "/lessons/improvements",
    request_body = LessonImprovementsRequest,
    responses(
        (status = 200, description = "Lesson plan review", body = LessonImprovementsResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate lesson improvements")
    )
)]
pub async fn generate_lesson_improvements(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<LessonImprovementsRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let improvements = generation::lesson::generate_lesson_improvements(
        &state.models,
        &request,
    )
    .await
    .into_response()?;

    Ok(Json(improvements))
}
