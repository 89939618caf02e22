//! Async HTTP Server Module
//!
//! Provides the web collaborator for the fuzzy/search core using axum.
//! The core is called with exactly two floats; this layer owns all
//! parsing and validation of the incoming form/query fields.
//!
//! # Endpoints
//!
//! - `GET /` - HTML form (food + service scores)
//! - `POST /` - Compute tip and run searches, render results
//! - `GET /api/tip?food=..&service=..` - JSON API
//! - `GET /health` - Health check
//!
//! # Example
//!
//! ```rust,ignore
//! use fuzzytip::config::ServerConfig;
//! use fuzzytip::server::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::{TipError, TipResult};
use crate::fuzzy::compute_tip;
use crate::search::{run_searches, GridState, SearchReport};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the server
///
/// The core pipelines are stateless pure functions, so the only shared
/// state is the immutable server configuration.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;

// ============================================================================
// Input Parsing
// ============================================================================

/// Form data for POST /
#[derive(Debug, Deserialize)]
struct ScoreForm {
    food: Option<String>,
    service: Option<String>,
}

/// Query parameters for GET /api/tip
#[derive(Debug, Deserialize)]
struct ScoreQueryParams {
    food: Option<String>,
    service: Option<String>,
}

/// Parse and validate a single quality score.
///
/// The core performs no validation of its own; every score that reaches
/// it has passed through here.
fn parse_score(field: &str, raw: Option<&str>) -> TipResult<f64> {
    let raw = raw.ok_or_else(|| TipError::missing_field(field))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TipError::invalid_number(field, raw))?;
    if !value.is_finite() {
        return Err(TipError::invalid_number(field, raw));
    }
    if !(0.0..=10.0).contains(&value) {
        return Err(TipError::score_out_of_range(field, value));
    }
    Ok(value)
}

/// Run both pipelines for a validated pair of scores.
///
/// The search goal is the integer truncation of the scores, started
/// from the origin, mirroring how the two pipelines share their inputs.
fn evaluate(food: f64, service: f64) -> (f64, SearchReport) {
    let tip = compute_tip(food, service);
    let start = GridState::new(0, 0);
    let goal = GridState::new(food as i32, service as i32);
    let report = run_searches(start, goal);
    debug!(food, service, tip, "evaluated request");
    (tip, report)
}

// ============================================================================
// Error Glue
// ============================================================================

impl IntoResponse for TipError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            self.to_json(),
        )
            .into_response()
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Serve the HTML input form at /
async fn index_page() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Fuzzy Tip Advisor</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
               max-width: 600px; margin: 50px auto; padding: 20px; }
        h1 { color: #333; }
        label { display: block; margin-top: 12px; }
        input[type=number] { width: 100px; font-size: 14px; }
        button { background: #007bff; color: white; padding: 10px 20px; border: none;
                 cursor: pointer; font-size: 16px; margin-top: 14px; }
        button:hover { background: #0056b3; }
    </style>
</head>
<body>
    <h1>Fuzzy Tip Advisor</h1>
    <p>Rate your meal from 0 (worst) to 10 (best):</p>
    <form action="/" method="POST">
        <label>Food quality:
            <input type="number" name="food" min="0" max="10" step="0.1" required>
        </label>
        <label>Service quality:
            <input type="number" name="service" min="0" max="10" step="0.1" required>
        </label>
        <button type="submit">Compute Tip</button>
    </form>
    <h3>Endpoints</h3>
    <ul>
        <li><code>POST /</code> - Compute tip from form fields</li>
        <li><code>GET /api/tip?food=..&service=..</code> - JSON API</li>
        <li><code>GET /health</code> - Health check</li>
    </ul>
</body>
</html>"#,
    )
}

/// Handle POST / with form-encoded scores, rendering a results page
async fn index_post(
    State(state): State<SharedState>,
    body: String,
) -> Result<Html<String>, TipError> {
    if body.len() > state.config.max_body_size {
        return Err(TipError::validation(format!(
            "Request body exceeds {} bytes",
            state.config.max_body_size
        )));
    }

    let form: ScoreForm = serde_urlencoded::from_str(&body)
        .map_err(|e| TipError::validation(format!("Invalid form data: {}", e)))?;

    let food = parse_score("food", form.food.as_deref())?;
    let service = parse_score("service", form.service.as_deref())?;

    let (tip, report) = evaluate(food, service);

    Ok(Html(render_results(food, service, tip, &report)))
}

/// Render the results page for a computed tip and search report
fn render_results(food: f64, service: f64, tip: f64, report: &SearchReport) -> String {
    let fmt_state = |s: &Option<GridState>| match s {
        Some(state) => state.to_string(),
        None => "not found".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Fuzzy Tip Advisor - Results</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
               max-width: 600px; margin: 50px auto; padding: 20px; }}
        h1 {{ color: #333; }}
        .tip {{ font-size: 28px; color: #007bff; }}
        table {{ border-collapse: collapse; margin-top: 14px; }}
        td, th {{ border: 1px solid #ccc; padding: 6px 12px; text-align: left; }}
    </style>
</head>
<body>
    <h1>Results</h1>
    <p>Food quality: {food:.1} &middot; Service quality: {service:.1}</p>
    <p>Suggested tip: <span class="tip">{tip:.2}%</span></p>
    <h3>Grid searches from (0, 0) to ({goal_f}, {goal_s})</h3>
    <table>
        <tr><th>Strategy</th><th>Located state</th></tr>
        <tr><td>Breadth-first</td><td>{bfs}</td></tr>
        <tr><td>Depth-first</td><td>{dfs}</td></tr>
        <tr><td>Greedy best-first</td><td>{greedy}</td></tr>
    </table>
    <p><a href="/">Back</a></p>
</body>
</html>"#,
        food = food,
        service = service,
        tip = tip,
        goal_f = food as i32,
        goal_s = service as i32,
        bfs = fmt_state(&report.bfs),
        dfs = fmt_state(&report.dfs),
        greedy = fmt_state(&report.greedy),
    )
}

/// Handle GET /api/tip?food=..&service=..
async fn api_tip(
    Query(params): Query<ScoreQueryParams>,
) -> Result<impl IntoResponse, TipError> {
    let food = parse_score("food", params.food.as_deref())?;
    let service = parse_score("service", params.service.as_deref())?;

    let (tip, report) = evaluate(food, service);

    let json = serde_json::json!({
        "food": food,
        "service": service,
        "tip": tip,
        "searches": report,
        "version": env!("CARGO_PKG_VERSION"),
    });

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::to_string_pretty(&json).unwrap_or_default(),
    ))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Server Setup
// ============================================================================

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_page).post(index_post))
        .route("/api/tip", get(api_tip))
        .route("/health", get(health_check));

    if state.config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_origin(Any)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the async HTTP server
///
/// Blocks until the server is shut down via Ctrl+C.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("fuzzytip server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C)
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ServerConfig::default()));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("name=\"food\""));
        assert!(html.contains("name=\"service\""));
    }

    #[tokio::test]
    async fn test_post_form_computes_tip() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("food=8&service=9"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Suggested tip"));
        // Heading shows the goal, and all three searches locate it
        assert_eq!(html.matches("(8, 9)").count(), 4);
        assert!(!html.contains("not found"));
    }

    #[tokio::test]
    async fn test_post_form_malformed_number() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("food=tasty&service=9"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_form_missing_field() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("food=5"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_tip_json() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/tip?food=8&service=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let tip = json["tip"].as_f64().unwrap();
        assert!(tip > 10.0 && tip < 20.0, "tip was {}", tip);

        for strategy in ["bfs", "dfs", "greedy"] {
            assert_eq!(json["searches"][strategy]["food"], 8);
            assert_eq!(json["searches"][strategy]["service"], 9);
        }
    }

    #[tokio::test]
    async fn test_api_tip_out_of_range() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/tip?food=11&service=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["code_num"], 1003);
    }

    #[tokio::test]
    async fn test_api_tip_zero_activation() {
        // Scores of exactly 5 fall outside every input set's support
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/tip?food=5&service=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["tip"].as_f64().unwrap(), 0.0);
    }
}
