//! Weaver Agent 服务端
//!
//! 启动: cargo run --bin weaver
//! POST /api/chat：全量历史 + 工具定义 -> 一次决策循环 -> 更新后的全量历史

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weaver::config::{load_config, AppConfig};
use weaver::graph::{DecisionCycle, SessionState};
use weaver::llm::{LlmClient, MockLlmClient, OpenAiClient};
use weaver::protocol::{ChatRequest, ChatResponse};
use weaver::render::HttpRenderer;

struct AppState {
    cycle: DecisionCycle,
}

/// 根据配置创建 LLM 后端；provider = mock 时无需 API（本地调试）
fn create_llm(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    match cfg.llm.provider.as_str() {
        "mock" => Arc::new(MockLlmClient::default()),
        _ => {
            let api_key = cfg
                .llm
                .api_key_env
                .as_deref()
                .and_then(|k| std::env::var(k).ok());
            Arc::new(OpenAiClient::new(
                cfg.llm.base_url.as_deref(),
                &cfg.llm.model,
                api_key.as_deref(),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).unwrap_or_default();

    let llm = create_llm(&cfg);
    let renderer = Arc::new(HttpRenderer::new(
        &cfg.renderer.base_url,
        cfg.renderer.timeout_secs,
    ));
    let cycle = DecisionCycle::new(llm, renderer, &cfg.renderer.component)
        .with_timeouts(cfg.llm.timeout_secs, cfg.renderer.timeout_secs);

    let state = Arc::new(AppState { cycle });

    let app = Router::new()
        .route("/api/chat", post(api_chat))
        .route("/api/health", get(|| async { "OK" }))
        .with_state(Arc::clone(&state));

    let port = std::env::var("WEAVER_WEB_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(cfg.web.port);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Weaver agent server: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// POST /api/chat：一次决策循环。客户端只把响应里的最后一条当作新消息
async fn api_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if req.messages.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "messages must not be empty".to_string()));
    }
    let session = SessionState::from_request(req);
    let session = state.cycle.run(session).await;
    Ok(Json(ChatResponse {
        messages: session.messages,
    }))
}
