use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use generation::reading::{
    ReadingSample, VoiceReadingRequest, VoiceReadingResponse,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::Value;

use crate::{
    response::{ApiResponse, IntoApiResponse},
    ApiError, ApiState,
};

/// Evaluate a student's reading
///
/// Scores and transcript are simulated until audio analysis exists; the model
/// only writes the feedback around them.
#[utoipa::path(
    post,
    path = "/reading/evaluate",
    request_body = VoiceReadingRequest,
    responses(
        (status = 200, description = "Reading evaluation", body = VoiceReadingResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Failed to evaluate voice reading")
    )
)]
pub async fn evaluate_voice_reading(
    State(state): State<ApiState>,
    WithRejection(Json(request), _): WithRejection<
        Json<VoiceReadingRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<Value>> {
    let sample = {
        let mut rng = StdRng::from_entropy();
        ReadingSample::draw(&mut rng, &request.expected_text)
    };

    let evaluation = generation::reading::evaluate_voice_reading(
        &state.models,
        &request,
        sample,
    )
    .await
    .into_response()?;

    Ok(Json(evaluation))
}
