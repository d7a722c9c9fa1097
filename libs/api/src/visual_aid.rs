use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::visual_aid::{VisualAidRequest, VisualAidResponse};
use serde_json::Value;

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Describe a classroom visual aid
#[utoipa::path(
    post,
    path = "/visual-aids",
    request_body = VisualAidRequest,
    responses(
        (status = 200, description = "Visual aid plan", body = VisualAidResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate visual aid")
    )
)]
pub async fn generate_visual_aid(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<VisualAidRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let visual_aid =
        generation::visual_aid::generate_visual_aid(&state.models, &request)
            .await
            .into_response()?;

    Ok(Json(visual_aid))
}
