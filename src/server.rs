//! HTTP front end
//!
//! `GET /` serves a form with a single `url` field. `POST /` crawls the
//! submitted URL's domain and answers with the JSON crawl response.

use crate::crawler::Coordinator;
use crate::output::CrawlResponse;
use crate::url::domain_from_input;
use crate::{Config, ConfigError, HarvestError};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sitemap Harvest</title></head>
<body>
  <h1>Sitemap Harvest</h1>
  <form method="post" action="/">
    <input type="text" name="url" placeholder="https://shop.example" required>
    <button type="submit">Crawl</button>
  </form>
</body>
</html>
"#;

#[derive(Clone)]
struct AppState {
    coordinator: Arc<Coordinator>,
}

#[derive(Debug, Deserialize)]
struct CrawlForm {
    url: String,
}

/// Builds the application router around a shared coordinator
pub fn router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(AppState { coordinator })
}

/// Binds `config.server.bind` and serves until the process exits
pub async fn serve(config: Config) -> Result<(), HarvestError> {
    let addr: SocketAddr = config.server.bind.parse().map_err(|e| {
        ConfigError::Validation(format!("invalid bind address {}: {}", config.server.bind, e))
    })?;

    let coordinator = Arc::new(Coordinator::new(config)?);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(coordinator)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Every outcome, a malformed form included, is answered with JSON
async fn submit(
    State(state): State<AppState>,
    form: Result<Form<CrawlForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Rejected malformed crawl request: {}", rejection);
            return bad_request(rejection.body_text());
        }
    };

    let domain = match domain_from_input(&form.url) {
        Ok(domain) => domain,
        Err(e) => {
            tracing::debug!("Rejected crawl request for {:?}: {}", form.url, e);
            return bad_request(e.to_string());
        }
    };

    tracing::info!("Crawl requested for {}", domain);
    Json(state.coordinator.run(&domain).await).into_response()
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(CrawlResponse::failed(error))).into_response()
}
