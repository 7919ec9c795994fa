//! HTTP transport for the pipeline
//!
//! `POST /ask` runs one pipeline per request. Pipeline failures are
//! reported in-band with status 200, as `{"error": ...}`.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use gated_rag_application::RunPipelineUseCase;
use gated_rag_domain::util::preview;
use gated_rag_domain::{PipelineResult, Question};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const SERVICE_NAME: &str = "gated-rag";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors starting or running the HTTP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Listening address and CORS policy
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// `"*"` allows any origin
    pub allowed_origins: Vec<String>,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Body of `POST /ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// HTTP server exposing the pipeline
pub struct HttpServer {
    settings: ServerSettings,
    use_case: RunPipelineUseCase,
}

impl HttpServer {
    pub fn new(settings: ServerSettings, use_case: RunPipelineUseCase) -> Self {
        Self { settings, use_case }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Result<Router, ServerError> {
        let cors = Self::cors(&self.settings.allowed_origins)?;

        Ok(Router::new()
            .route("/", get(service_info))
            .route("/health", get(health_check))
            .route("/ask", post(ask))
            .route("/ask/", post(ask))
            .with_state(self.use_case.clone())
            // Middleware layers (order matters - applied bottom to top)
            .layer(TraceLayer::new_for_http())
            .layer(cors))
    }

    fn cors(origins: &[String]) -> Result<CorsLayer, ServerError> {
        let allow_origin = if origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            let values = origins
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).map_err(|_| ServerError::InvalidOrigin(o.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(values)
        };

        Ok(CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any))
    }

    /// Start the server and run until it stops
    pub async fn start(self) -> Result<(), ServerError> {
        let router = self.router()?;
        let addr = self.settings.address();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!("Starting gated-rag server on http://{}", addr);
        axum::serve(listener, router)
            .await
            .map_err(ServerError::Serve)
    }
}

/// Service info endpoint
async fn service_info() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "description": "Question answering with a classifier-gated RAG pipeline",
        "version": VERSION,
        "status": "running",
    }))
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": VERSION,
    }))
}

async fn ask(
    State(use_case): State<RunPipelineUseCase>,
    Json(request): Json<AskRequest>,
) -> Json<PipelineResult> {
    let question = Question::new(request.question);
    if question.is_blank() {
        warn!("Received a blank question");
    }
    info!("POST /ask: {}", preview(question.content(), 100));

    Json(use_case.execute(question).await)
}
