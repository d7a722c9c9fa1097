use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::worksheet::{
    DifferentiatedWorksheetRequest, DifferentiatedWorksheetResponse,
};

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Generate one worksheet per requested grade
#[utoipa::path(
    post,
    path = "/worksheets/differentiated",
    request_body = DifferentiatedWorksheetRequest,
    responses(
        (status = 200, description = "Worksheets keyed by grade", body = DifferentiatedWorksheetResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate differentiated worksheet")
    )
)]
pub async fn generate_differentiated_worksheet(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<DifferentiatedWorksheetRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<DifferentiatedWorksheetResponse>> {
    let worksheets = generation::worksheet::generate_differentiated_worksheet(
        &state.models,
        &request,
    )
    .await
    .into_response()?;

    Ok(Json(worksheets))
}
