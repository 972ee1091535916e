//! # API Server Module
//!
//! ## Purpose
//! REST API server exposing the suggestion endpoint, a health check, and a
//! small landing page documenting the service.
//!
//! ## Input/Output Specification
//! - **Input**: HTTP GET requests with a query prefix, optional anchor
//!   coordinates, and an optional result limit
//! - **Output**: JSON suggestion arrays ordered best-first; JSON error
//!   bodies with 400 for client input errors and 500 for server failures
//!
//! ## Key Features
//! - Strict query parameter validation before any processing
//! - Geo-anchored queries run an unbounded index lookup before ranking
//! - Optional permissive CORS for web frontends
//! - Structured error responses

use crate::errors::{Result, SuggestError};
use crate::ranking::rank;
use crate::scoring::{GeoDistanceScorer, RelativeLengthScorer, Scorer};
use crate::AppState;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;

/// Application server wrapping the shared state
pub struct ApiServer {
    app_state: AppState,
}

/// Raw query string of the suggestions endpoint. Fields stay strings so the
/// handler controls numeric validation and the error responses itself.
#[derive(Debug, Deserialize)]
pub struct SuggestionsParams {
    pub q: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub limit: Option<String>,
}

/// Per-request query context decoded from the query string
#[derive(Debug)]
struct QueryContext {
    prefix: String,
    limit: usize,
    anchor: Option<(f64, f64)>,
}

impl ApiServer {
    /// Create new API server
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Run the API server until the process is stopped
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!(
            "{}:{}",
            self.app_state.config.server.host, self.app_state.config.server.port
        );
        let workers = self.app_state.config.server.workers;
        let app_state = self.app_state;

        tracing::info!("Starting API server on {}", bind_addr);

        let server = HttpServer::new(move || {
            // permissive CORS is opt-in; the default rule set admits no
            // cross-origin callers
            let cors = if app_state.config.server.enable_cors {
                Cors::permissive()
            } else {
                Cors::default()
            };
            App::new()
                .app_data(web::Data::new(app_state.clone()))
                .wrap(cors)
                .route("/suggestions", web::get().to(suggestions_handler))
                .route("/health", web::get().to(health_handler))
                .route("/", web::get().to(index_handler))
        })
        .workers(workers)
        .bind(&bind_addr)
        .map_err(|e| SuggestError::Internal {
            message: format!("Failed to bind server to {}: {}", bind_addr, e),
        })?
        .run();

        server.await.map_err(|e| SuggestError::Internal {
            message: format!("Server error: {}", e),
        })?;

        Ok(())
    }
}

/// Suggestions endpoint handler
async fn suggestions_handler(
    state: web::Data<AppState>,
    params: web::Query<SuggestionsParams>,
) -> ActixResult<HttpResponse> {
    let query = match parse_query(&params, state.config.search.default_limit) {
        Ok(query) => query,
        Err(e) if e.is_client_error() => {
            tracing::debug!(category = e.category(), "Rejected suggestions query: {}", e);
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
            })));
        }
        Err(e) => {
            tracing::error!("Failed to decode suggestions query: {}", e);
            return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal error",
            })));
        }
    };

    tracing::debug!(prefix = %query.prefix, limit = query.limit, "suggestions query");

    // With an anchor the index lookup is unbounded: cutting the walk short
    // before geo-scoring could drop a nearby place the breadth-first
    // traversal reaches late. Without one, the walk order already
    // approximates the final ranking, so the limit can be pushed down.
    let (matches, scorer): (_, Box<dyn Scorer>) = match query.anchor {
        Some((latitude, longitude)) => (
            state.index.find_matches(&query.prefix, None),
            Box::new(GeoDistanceScorer::new(latitude, longitude)),
        ),
        None => (
            state.index.find_matches(&query.prefix, Some(query.limit)),
            Box::new(RelativeLengthScorer::new(&query.prefix)),
        ),
    };

    let results = rank(matches, scorer.as_ref(), Some(query.limit));

    match serde_json::to_string(&results) {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body(body)),
        Err(e) => {
            tracing::error!("Failed to serialize suggestions: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "failed to serialize response as JSON",
            })))
        }
    }
}

/// Decode and validate the query string. Every rejection here is a client
/// input error; nothing is partially processed.
fn parse_query(params: &SuggestionsParams, default_limit: usize) -> Result<QueryContext> {
    let prefix = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Err(SuggestError::InvalidQueryParam {
                param: "q".to_string(),
                reason: "required and must be non-empty".to_string(),
            })
        }
    };

    let limit = match &params.limit {
        Some(raw) => raw.parse().map_err(|_| SuggestError::InvalidQueryParam {
            param: "limit".to_string(),
            reason: format!("{:?} is not a number", raw),
        })?,
        None => default_limit,
    };

    let anchor = match (&params.latitude, &params.longitude) {
        (None, None) => None,
        (Some(latitude), Some(longitude)) => Some((
            parse_coordinate(latitude, "latitude")?,
            parse_coordinate(longitude, "longitude")?,
        )),
        (Some(_), None) => {
            return Err(SuggestError::InvalidQueryParam {
                param: "longitude".to_string(),
                reason: "must be supplied together with latitude".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(SuggestError::InvalidQueryParam {
                param: "latitude".to_string(),
                reason: "must be supplied together with longitude".to_string(),
            })
        }
    };

    Ok(QueryContext {
        prefix,
        limit,
        anchor,
    })
}

fn parse_coordinate(raw: &str, param: &str) -> Result<f64> {
    raw.parse().map_err(|_| SuggestError::InvalidQueryParam {
        param: param.to_string(),
        reason: format!("{:?} is not a number", raw),
    })
}

/// Health check endpoint handler
async fn health_handler(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "indexed_records": state.index.len(),
    })))
}

/// Index page handler
async fn index_handler() -> ActixResult<HttpResponse> {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Place Suggest</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .header { color: #2c3e50; }
            .endpoint { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
            .method { font-weight: bold; color: #27ae60; }
        </style>
    </head>
    <body>
        <h1 class="header">Place Suggest API</h1>
        <p>Autocomplete for place names, ranked by relevance and optionally by proximity to an anchor coordinate.</p>

        <h2>Available Endpoints</h2>

        <div class="endpoint">
            <span class="method">GET</span> /suggestions?q=&lt;prefix&gt;
            <p>Return places matching the prefix. Optional: <code>latitude</code> and <code>longitude</code>
            (together) to rank by proximity, <code>limit</code> to cap the result count.</p>
        </div>

        <div class="endpoint">
            <span class="method">GET</span> /health
            <p>Service status and the number of indexed records.</p>
        </div>

        <h2>Example</h2>
        <pre>GET /suggestions?q=Vict&latitude=48.43&longitude=-123.33&limit=5</pre>
    </body>
    </html>
    "#;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
