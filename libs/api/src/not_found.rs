use axum::http::{StatusCode, Uri};

pub(super) async fn get_404(uri: Uri) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}
