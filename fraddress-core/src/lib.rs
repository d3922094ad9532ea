//! # fraddress-core — Parser de Endereços Postais Franceses
//!
//! Este crate extrai componentes estruturados (número, tipo e nome da via,
//! código postal, cidade...) de endereços franceses escritos livremente.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear:
//!
//! 1.  **Entrada**: Texto bruto (`&str` ou bytes UTF-8).
//! 2.  **Tokenização** ([`tokenizer`]): divide o texto em tokens, mantendo a pontuação final colada.
//! 3.  **Extração de Features** ([`features`]): cada token vira um registro de features
//!     (abreviação, dígitos, léxico...), com o contexto dos vizinhos e marcadores de borda.
//! 4.  **Tagging** ([`tagger`]): um modelo CRF pré-treinado atribui um [`Label`] por token.
//! 5.  **Montagem** ([`assembler`]): tokens com o mesmo rótulo viram um campo do endereço.
//!
//! O modelo é um colaborador externo, injetado no [`AddressParser`]: treinamento e
//! formato do arquivo não fazem parte deste crate.
//!
//! ## Exemplo de Uso
//!
//! ```rust,no_run
//! use fraddress_core::{AddressParser, Label};
//!
//! // 1. Carrega o modelo uma única vez
//! let parser = AddressParser::from_model_file("learned_settings.crfsuite");
//!
//! // 2. Extrai os campos
//! let fields = parser.tag("12 Rue de la Paix, 75002 Paris")?;
//! println!("Cidade: {:?}", fields.get(Label::City));
//! # Ok::<(), fraddress_core::FraddressError>(())
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios.
//! - [`lexicon`]: Tabelas de palavras conhecidas (tipos de via, zonas...).
//! - [`corpus`]: Endereços anotados para testes e demonstração.

pub mod assembler;
pub mod corpus;
pub mod error;
pub mod features;
pub mod label;
pub mod lexicon;
pub mod pipeline;
pub mod tagger;
pub mod tokenizer;

pub use assembler::TaggedAddress;
pub use error::{FraddressError, Result};
pub use label::{Label, TaggedToken};
pub use pipeline::{AddressParser, PipelineEvent};
pub use tagger::{CrfSuiteTagger, SequenceTagger};
pub use tokenizer::Token;
