use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::concept::{
    ConceptExplanationRequest, ConceptExplanationResponse,
};
use serde_json::Value;

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Explain a concept at the student's level
#[utoipa::path(
    post,
    path = "/concepts/explain",
    request_body = ConceptExplanationRequest,
    responses(
        (status = 200, description = "Explanation", body = ConceptExplanationResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to explain concept")
    )
)]
pub async fn explain_concept(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<ConceptExplanationRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let explanation =
        generation::concept::explain_concept(&state.models, &request)
            .await
            .into_response()?;

    Ok(Json(explanation))
}
