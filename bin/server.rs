// Expense Extraction API - Web Server
// REST API with Axum: POST a fragment, get a tax breakdown back

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use expense_extract::ExpenseExtractor;

/// Shared application state
#[derive(Clone)]
struct AppState {
    extractor: ExpenseExtractor,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/extract - Extract an expense record from an XML fragment
///
/// Body is the raw fragment text. Returns 200 with the JSON record, or
/// 400 with the validation message as plain text. All extraction errors
/// are client-input errors, never server faults.
async fn extract_expense(State(state): State<AppState>, body: String) -> Response {
    let request_id = Uuid::new_v4();

    match state.extractor.extract(&body) {
        Ok(record) => (
            StatusCode::OK,
            [("x-request-id", request_id.to_string())],
            Json(record),
        )
            .into_response(),
        Err(e) => {
            eprintln!("Extraction failed [{}]: {}", request_id, e);
            (
                StatusCode::BAD_REQUEST,
                [("x-request-id", request_id.to_string())],
                e.to_string(),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/extract", post(extract_expense))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    println!("🧾 Expense Extraction API - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState {
        extractor: ExpenseExtractor::new(),
    };
    let app = build_router(state);

    let addr = std::env::var("EXPENSE_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://{addr}");
    println!("   API: POST http://{addr}/api/extract");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

// ============================================================================
// TESTS
// ============================================================================
