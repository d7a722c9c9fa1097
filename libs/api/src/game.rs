use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::game::{EducationalGameRequest, GameFallback};
use serde_json::Value;

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Generate a math, puzzle or word game
#[utoipa::path(
    post,
    path = "/games",
    request_body = EducationalGameRequest,
    responses(
        (status = 200, description = "Game content", body = GameFallback),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate educational game, also returned for an unknown game type")
    )
)]
pub async fn generate_educational_game(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<EducationalGameRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let game = generation::game::generate_educational_game(
        &state.models,
        &request,
    )
    .await
    .into_response()?;

    Ok(Json(game))
}
