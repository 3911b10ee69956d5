//! LLM selector HTTP API server (Axum).
//!
//! `POST /api/recommendations` takes a requirements object and answers with the
//! recommendation envelope. `GET /api/models` lists the filtered catalog.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    Router,
};
use state::AppState;
use std::net::SocketAddr;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::recommendation_routes())
        .merge(routes::model_routes())
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

/// Run every request inside a span tagged with a fresh request id, echoed back
/// in the `x-request-id` header.
async fn request_span(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app_with_state(state)).await
}

#[cfg(test)]
mod tests;
