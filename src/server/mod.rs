//! Local server for the generated site

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::Spacetraveling;

/// Server state
struct ServerState {
    public_dir: PathBuf,
}

/// Start the local server over the generated output directory
pub async fn start(app: &Spacetraveling, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        public_dir: app.public_dir.clone(),
    });

    let router = Router::new().fallback(fallback_handler).with_state(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Serve files from the public directory, falling back to the generated
/// 404 page for unknown routes
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    match service.try_call(request).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => {
            not_found_page(&state).await
        }
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Render the generated 404 page, or a plain fallback if it is missing
async fn not_found_page(state: &ServerState) -> Response {
    let path = state.public_dir.join("404.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => (StatusCode::NOT_FOUND, Html(content)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
