//! # Tokenizador de Endereços
//!
//! Divide o endereço bruto em tokens. Diferente de um tokenizador de frases, a
//! pontuação final **fica colada** ao token (`"Paix,"`, `"Bd."`): o extrator de
//! features usa isso para reconhecer abreviações e separadores de lista.
//!
//! ## Regras
//!
//! - Uma sequência maximal de caracteres que não são espaço nem separador
//!   (`,` `;` `#` `&` `(` `)`), começando por letra, número ou `_`,
//!   opcionalmente precedida de `(` e seguida de `.` `,` `;` `)` ou quebra
//!   de linha. "Número" é qualquer `\p{N}`, então `½` e `²` também abrem
//!   um token.
//! - Ou um `#` / `&` isolado.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use fraddress_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("12 Rue de la Paix, 75002 Paris");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["12", "Rue", "de", "la", "Paix,", "75002", "Paris"]);
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Um token extraído do endereço original.
///
/// Guarda a posição exata no texto (`start`/`end`) para que a interface possa
/// destacar cada componente sem reformatar a entrada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto do token, com a pontuação final (ex: "Paix,").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \(*[\p{L}\p{N}_][^\s,;\#&()]*[.,;)\n]*   # 'ab. cd,ef ' -> 'ab.', 'cd,', 'ef'
        |
        [\#&]                         # '#abc' -> '#'
        ",
    )
    .expect("padrão de tokenização inválido")
});

/// Tokeniza um endereço. Devolve um vetor vazio se nada casar.
pub fn tokenize(raw: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(raw)
        .enumerate()
        .map(|(index, m)| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            index,
        })
        .collect()
}

/// Decodifica uma entrada em bytes como UTF-8.
///
/// Sequências inválidas não são erro: caem numa conversão com perdas
/// (`U+FFFD` no lugar dos bytes inválidos).
pub fn decode_input(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            tracing::debug!(valid_up_to = err.valid_up_to(), "entrada não é UTF-8 válido, usando conversão com perdas");
            String::from_utf8_lossy(raw)
        }
    }
}

/// Tokeniza uma entrada em bytes (ver [`decode_input`]).
pub fn tokenize_bytes(raw: &[u8]) -> Vec<Token> {
    tokenize(&decode_input(raw))
}
