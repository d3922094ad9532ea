//! Servidor web Axum com WebSocket para o parser de endereços franceses

mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use fraddress_core::{
    corpus::demo_addresses, AddressParser, FraddressError, PipelineEvent, TaggedAddress,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Estado compartilhado da aplicação
struct AppState {
    parser: AddressParser,
}

#[derive(Deserialize)]
struct AddressRequest {
    text: String,
}

#[derive(Deserialize)]
struct BatchRequest {
    texts: Vec<String>,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
}

#[derive(Serialize)]
struct ParsedToken {
    token: String,
    label: String,
    start: usize,
    end: usize,
}

#[derive(Serialize)]
struct ParseResponse {
    tokens: Vec<ParsedToken>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchItem {
    Fields(TaggedAddress),
    Error { error: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let parser = AddressParser::from_model_file(&config.model);
    if !parser.is_available() {
        warn!(model = %config.model.display(), "servidor iniciado sem modelo: /parse e /tag responderão 503");
    }
    let state = Arc::new(AppState { parser });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/parse", post(parse_handler))
        .route("/tag", post(tag_handler))
        .route("/tag/batch", post(tag_batch_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-addresses", get(demo_addresses_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("não foi possível escutar em {}", config.bind))?;
    info!("🚀 Servidor fraddress iniciado em http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Status HTTP para cada erro do parser
fn error_status(err: &FraddressError) -> StatusCode {
    match err {
        FraddressError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: FraddressError) -> Response {
    (
        error_status(&err),
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

fn empty_text_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "Texto vazio"})),
    )
        .into_response()
}

/// Tokens rotulados, um por token
async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return empty_text_response();
    }

    match state.parser.parse(&req.text) {
        Ok(tagged) => Json(ParseResponse {
            tokens: tagged
                .into_iter()
                .map(|tt| ParsedToken {
                    label: tt.label.name().to_string(),
                    start: tt.token.start,
                    end: tt.token.end,
                    token: tt.token.text,
                })
                .collect(),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// Campos do endereço, na ordem de primeira ocorrência
async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return empty_text_response();
    }

    match state.parser.tag(&req.text) {
        Ok(fields) => Json(fields).into_response(),
        Err(err) => error_response(err),
    }
}

/// Vários endereços numa chamada; cada item tem seu próprio resultado
async fn tag_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Response {
    if !state.parser.is_available() {
        return error_response(FraddressError::ModelUnavailable {
            model: state.parser.model().to_string(),
        });
    }

    let texts = req.texts;
    let total = texts.len();
    let state_for_thread = Arc::clone(&state);
    let results = tokio::task::spawn_blocking(move || state_for_thread.parser.tag_batch(&texts[..])).await;

    match results {
        Ok(results) => {
            info!(total, "lote rotulado");
            let items: Vec<BatchItem> = results
                .into_iter()
                .map(|r| match r {
                    Ok(fields) => BatchItem::Fields(fields),
                    Err(err) => BatchItem::Error {
                        error: err.to_string(),
                    },
                })
                .collect();
            Json(items).into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// Retorna endereços de demonstração
async fn demo_addresses_handler() -> impl IntoResponse {
    let addresses: Vec<serde_json::Value> = demo_addresses()
        .iter()
        .map(|(kind, text)| {
            serde_json::json!({
                "kind": kind,
                "text": text
            })
        })
        .collect();
    Json(addresses)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "model": state.parser.model(),
        "model_loaded": state.parser.is_available(),
    }))
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe um endereço, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {text}; senão usa como texto puro
                let text_str = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) => req.text.trim().to_string(),
                    Err(_) => text.trim().to_string(),
                };

                if text_str.is_empty() {
                    continue;
                }

                info!("Analisando via WebSocket: {} chars", text_str.len());

                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_thread = Arc::clone(&state);

                // O pipeline é síncrono: roda fora do runtime
                let handle = tokio::task::spawn_blocking(move || {
                    state_for_thread.parser.parse_streaming(&text_str, tx_std);
                });
                handle.await.ok();

                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
