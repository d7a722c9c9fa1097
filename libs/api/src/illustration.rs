use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::illustration::{
    EducationalImageRequest, EducationalImageResponse,
};

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Generate an educational image
#[utoipa::path(
    post,
    path = "/images",
    request_body = EducationalImageRequest,
    responses(
        (status = 200, description = "Base64 PNG with its description", body = EducationalImageResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to generate educational image")
    )
)]
pub async fn generate_educational_image(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<EducationalImageRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<EducationalImageResponse>> {
    let image = generation::illustration::generate_educational_image(
        &state.models,
        &request,
    )
    .await
    .into_response()?;

    Ok(Json(image))
}
