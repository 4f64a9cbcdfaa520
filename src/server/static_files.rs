//! Embedded static assets (client-state script and stylesheet)
//!
//! Uses rust-embed to bundle the static/ folder into the binary for
//! single-binary distribution.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::Embed;

/// Embedded assets, populated at compile time from static/
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Serve `/static/*` requests from the embedded assets
pub async fn serve_static(req: Request<Body>) -> impl IntoResponse {
    let path = req
        .uri()
        .path()
        .trim_start_matches('/')
        .trim_start_matches("static/");

    if let Some(response) = serve_file(path) {
        return response;
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not found"))
        .unwrap()
}

fn serve_file(path: &str) -> Option<Response<Body>> {
    let file = StaticAssets::get(path)?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Some(
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CACHE_CONTROL, "public, max-age=0, must-revalidate")
            .body(Body::from(file.data.into_owned()))
            .unwrap(),
    )
}
