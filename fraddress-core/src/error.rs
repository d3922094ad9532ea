//! Tipos de erro do parser de endereços.

use std::path::PathBuf;

use thiserror::Error;

/// Nome padrão do arquivo de modelo CRFsuite gerado pelo treinamento.
pub const MODEL_FILE: &str = "learned_settings.crfsuite";

/// Erro principal das operações de `fraddress-core`.
#[derive(Error, Debug)]
pub enum FraddressError {
    /// O tagger nunca foi carregado com sucesso. Toda chamada a `parse`/`tag`
    /// falha com este erro, sem resultado parcial.
    #[error(
        "modelo indisponível: {model}\nÉ preciso treinar o modelo antes de usar parse e tag.\n\
         Para treinar e gerar o arquivo do modelo, execute:\n\
         parserator train [traindata] [modulename]"
    )]
    ModelUnavailable {
        /// Caminho ou descrição do modelo que deveria ter sido carregado.
        model: String,
    },

    /// O arquivo existe mas não pôde ser lido como modelo CRFsuite.
    #[error("falha ao carregar o modelo {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// O modelo emitiu um rótulo fora do conjunto conhecido.
    #[error("rótulo desconhecido emitido pelo tagger: {0}")]
    UnknownLabel(String),

    /// O tagger devolveu um número de rótulos diferente do número de tokens.
    #[error("o tagger devolveu {labels} rótulos para {tokens} tokens")]
    LabelCountMismatch { tokens: usize, labels: usize },

    /// Erro de I/O.
    #[error("erro de I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias de `Result` para as operações do crate.
pub type Result<T> = std::result::Result<T, FraddressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_message_has_guidance() {
        let err = FraddressError::ModelUnavailable {
            model: MODEL_FILE.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains(MODEL_FILE));
        assert!(msg.contains("parserator train"));
    }

    #[test]
    fn test_mismatch_message() {
        let err = FraddressError::LabelCountMismatch { tokens: 3, labels: 2 };
        assert_eq!(err.to_string(), "o tagger devolveu 2 rótulos para 3 tokens");
    }
}
