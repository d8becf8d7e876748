use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use explainer::common::{decode_base64, PipelineOutput, ProcessingMode};
use explainer::image2text::TesseractEngine;
use explainer::logger::init_logger_exe;
use explainer::pipeline::{Pipeline, PipelineConfig, PipelineError};
use explainer::process::DEFAULT_CHUNK_SIZE;
use explainer::text2text::{create_generator, ModelBackend, ModelConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    explain: Arc<Pipeline>,
    summarize: Arc<Pipeline>,
}

impl AppState {
    fn pipeline(&self, mode: Option<&str>) -> &Pipeline {
        match mode.map(ProcessingMode::from).unwrap_or_default() {
            ProcessingMode::Explain => &self.explain,
            ProcessingMode::Summarize => &self.summarize,
        }
    }
}

#[derive(Deserialize)]
struct ImagePathRequest {
    file_path: String,
    mode: Option<String>,
}

#[derive(Deserialize)]
struct UploadRequest {
    image: String, // base64 or data URL
    mode: Option<String>,
}

#[derive(Serialize)]
struct ProcessResponse {
    message: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<PipelineOutput>,
}

impl ProcessResponse {
    fn success(output: PipelineOutput) -> Self {
        Self {
            message: "Successfully processed image".to_string(),
            success: true,
            reason: None,
            data: Some(output),
        }
    }

    fn failure(message: impl Into<String>, reason: &str) -> Self {
        Self {
            message: message.into(),
            success: false,
            reason: Some(reason.to_string()),
            data: None,
        }
    }
}

fn respond(result: Result<PipelineOutput, PipelineError>) -> (StatusCode, Json<ProcessResponse>) {
    match result {
        Ok(output) => (StatusCode::OK, Json(ProcessResponse::success(output))),
        Err(e) => {
            log::error!("Processing failed ({}): {}", e.reason(), e);
            let status = match e {
                PipelineError::Extract(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::NoFileSelected | PipelineError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            };
            (status, Json(ProcessResponse::failure(e.user_message(), e.reason())))
        }
    }
}

async fn process_image_path(State(state): State<AppState>, Json(payload): Json<ImagePathRequest>) -> impl IntoResponse {
    log::info!("Processing image path {}", payload.file_path);
    let pipeline = state.pipeline(payload.mode.as_deref());

    let selection = Some(PathBuf::from(&payload.file_path)).filter(|_| !payload.file_path.trim().is_empty());
    respond(pipeline.run_selected(selection.as_deref()).await)
}

async fn upload(State(state): State<AppState>, Json(payload): Json<UploadRequest>) -> impl IntoResponse {
    log::info!("Processing uploaded image data");

    let bytes = match decode_base64(&payload.image) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("{}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ProcessResponse::failure(e.to_string(), "invalid-base64")),
            );
        }
    };
    log::info!("Successfully decoded {} bytes of image data", bytes.len());

    respond(state.pipeline(payload.mode.as_deref()).run_bytes(bytes).await)
}

fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/process-image-path", post(process_image_path))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env_var(name) {
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={}: {}", name, value, e)),
        None => Ok(default),
    }
}

fn build_state() -> Result<AppState> {
    let chunk_size: usize = env_parse("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
    let model_config = ModelConfig::new(
        env_var("MODEL_BACKEND")
            .map(|backend| ModelBackend::from(backend.as_str()))
            .unwrap_or_default(),
        env_var("MODEL_URL"),
        env_var("MODEL_API_KEY"),
        None,
    )
    .with_env_api_key();

    let ocr_engine = Arc::new(TesseractEngine::new());
    let build = |mode: ProcessingMode, model_var: &str| -> Result<Arc<Pipeline>> {
        let mut config = model_config.clone();
        config.model = env_var(model_var);
        let generator = create_generator(&config, mode)
            .with_context(|| format!("Failed to set up the {} model", mode))?;

        let mut pipeline_config = PipelineConfig::for_mode(mode);
        pipeline_config.processor = pipeline_config.processor.with_chunk_size(chunk_size);
        Ok(Arc::new(Pipeline::new(pipeline_config, ocr_engine.clone(), generator)))
    };

    Ok(AppState {
        explain: build(ProcessingMode::Explain, "EXPLAIN_MODEL")?,
        summarize: build(ProcessingMode::Summarize, "SUMMARIZE_MODEL")?,
    })
}

async fn run() -> Result<()> {
    let state = build_state()?;
    let max_upload_bytes: usize = env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

    let port: u16 = env_parse("PORT", 3000)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Attempting to bind to port {}", port);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Successfully bound to http://{}", addr);

    axum::serve(listener, app(state, max_upload_bytes))
        .await
        .context("Server stopped with an error")
}

#[tokio::main]
async fn main() {
    init_logger_exe();
    log::info!("Starting server...");

    if let Err(e) = run().await {
        log::error!("{:?}", e);
        std::process::exit(1);
    }
}
