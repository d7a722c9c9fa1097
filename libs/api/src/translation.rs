use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::translation::{TranslationRequest, TranslationResponse};

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Translate text
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslationRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslationResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to translate content")
    )
)]
pub async fn translate_content(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<TranslationRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<TranslationResponse>> {
    let translation =
        generation::translation::translate_content(&state.models, &request)
            .await
            .into_response()?;

    Ok(Json(translation))
}
