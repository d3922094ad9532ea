//! Configuração do servidor: argumentos de linha de comando com fallback para variáveis de ambiente.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fraddress_core::error::MODEL_FILE;

/// Servidor HTTP/WebSocket do parser de endereços franceses.
#[derive(Debug, Clone, Parser)]
#[command(name = "fraddress-web")]
#[command(version)]
#[command(about = "Parser de endereços postais franceses via HTTP e WebSocket", long_about = None)]
pub struct ServerConfig {
    /// Endereço de escuta
    #[arg(long, env = "FRADDRESS_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Arquivo do modelo CRFsuite treinado
    #[arg(long, env = "FRADDRESS_MODEL", default_value = MODEL_FILE)]
    pub model: PathBuf,

    /// Filtro de log padrão (RUST_LOG tem prioridade)
    #[arg(long, env = "FRADDRESS_LOG", default_value = "info")]
    pub log_level: String,
}
