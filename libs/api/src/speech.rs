use axum::Json;
use axum_extra::extract::WithRejection;
use generation::speech::{
    RecognizeSpeechRequest, RecognizeSpeechResponse, SynthesizeSpeechRequest,
    SynthesizeSpeechResponse,
};

use crate::{response::ApiResponse, ApiError};

/// Text to speech (placeholder)
#[utoipa::path(
    post,
    path = "/speech/synthesize",
    request_body = SynthesizeSpeechRequest,
    responses(
        (status = 200, description = "Empty audio data URL", body = SynthesizeSpeechResponse),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn synthesize_speech(
    WithRejection(Json(request), _): WithRejection<
        Json<SynthesizeSpeechRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<SynthesizeSpeechResponse>> {
    Ok(Json(generation::speech::synthesize_speech(&request)))
}

/// Speech to text (placeholder)
#[utoipa::path(
    post,
    path = "/speech/recognize",
    request_body = RecognizeSpeechRequest,
    responses(
        (status = 200, description = "Placeholder transcript", body = RecognizeSpeechResponse),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn recognize_speech(
    WithRejection(Json(request), _): WithRejection<
        Json<RecognizeSpeechRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<RecognizeSpeechResponse>> {
    Ok(Json(generation::speech::recognize_speech(&request)))
}
