//! # Pipeline de Endereços — Orquestrador
//!
//! O [`AddressParser`] coordena os módulos (tokenizador, features, tagger,
//! montagem dos campos). O tagger é **injetado** na construção: o processo
//! hospedeiro carrega o modelo uma única vez e o parser o compartilha, somente
//! leitura, entre todas as chamadas.
//!
//! Se o modelo não pôde ser carregado, o parser continua existindo, mas toda
//! chamada falha imediatamente com [`FraddressError::ModelUnavailable`], antes
//! de tokenizar qualquer coisa.
//!
//! Além da API síncrona (`parse`, `tag`), [`AddressParser::parse_streaming`]
//! emite eventos em cada passo via um canal `mpsc`, para que o servidor
//! WebSocket mostre o progresso token a token.

use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::assembler::{assemble, TaggedAddress};
use crate::error::{FraddressError, Result};
use crate::features::{sequence_features, Boundary, FeatureSequence, TokenFeatures};
use crate::label::TaggedToken;
use crate::tagger::{CrfSuiteTagger, SequenceTagger};
use crate::tokenizer::{decode_input, tokenize, Token};

/// Eventos emitidos pelo pipeline durante o processamento.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Tokenização concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Features de um token (sem o contexto dos vizinhos).
    FeaturesComputed {
        token_index: usize,
        token_text: String,
        features: TokenFeatures,
        boundary: Option<Boundary>,
    },
    /// **Passo 3**: Rótulo atribuído pelo tagger a um token.
    TagAssigned {
        token_index: usize,
        token_text: String,
        label: String,
    },
    /// **Conclusão**: campos montados e tokens rotulados.
    Done {
        fields: TaggedAddress,
        tagged_tokens: Vec<TaggedToken>,
        total_tokens: usize,
        processing_ms: u64,
    },
    /// **Falha**: nada além deste evento é emitido.
    Error { message: String },
}

/// O parser de endereços.
///
/// # Exemplo
/// ```rust,no_run
/// use fraddress_core::AddressParser;
///
/// let parser = AddressParser::from_model_file("learned_settings.crfsuite");
/// let fields = parser.tag("12 Rue de la Paix, 75002 Paris")?;
/// for (label, text) in fields.iter() {
///     println!("{label}: {text}");
/// }
/// # Ok::<(), fraddress_core::FraddressError>(())
/// ```
#[derive(Clone)]
pub struct AddressParser {
    tagger: Option<Arc<dyn SequenceTagger>>,
    /// Descrição do modelo (normalmente o caminho do arquivo).
    model: String,
}

impl AddressParser {
    /// Cria o parser com um tagger já pronto.
    pub fn new(tagger: impl SequenceTagger + 'static) -> Self {
        Self::with_shared(Arc::new(tagger), "<injetado>")
    }

    /// Cria o parser com um tagger compartilhado com outros parsers.
    pub fn with_shared(tagger: Arc<dyn SequenceTagger>, model: impl Into<String>) -> Self {
        Self {
            tagger: Some(tagger),
            model: model.into(),
        }
    }

    /// Parser sem modelo: toda chamada devolve `ModelUnavailable`.
    pub fn unavailable(model: impl Into<String>) -> Self {
        Self {
            tagger: None,
            model: model.into(),
        }
    }

    /// Carrega um modelo CRFsuite do disco.
    ///
    /// A falha de carga é uma condição de inicialização: é registrada no log
    /// e convertida em `ModelUnavailable` a cada chamada.
    pub fn from_model_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let model = path.display().to_string();
        match CrfSuiteTagger::open(path) {
            Ok(tagger) => Self::with_shared(Arc::new(tagger), model),
            Err(err) => {
                tracing::warn!(
                    model = %model,
                    error = %err,
                    "é preciso treinar o modelo (parserator train [traindata] [modulename]) antes de usar parse e tag"
                );
                Self::unavailable(model)
            }
        }
    }

    /// `true` se o modelo foi carregado.
    pub fn is_available(&self) -> bool {
        self.tagger.is_some()
    }

    /// Descrição do modelo usado (ou que deveria ter sido usado).
    pub fn model(&self) -> &str {
        &self.model
    }

    fn tagger(&self) -> Result<&dyn SequenceTagger> {
        self.tagger
            .as_deref()
            .ok_or_else(|| FraddressError::ModelUnavailable {
                model: self.model.clone(),
            })
    }

    /// Tokeniza, extrai features e rotula o endereço.
    ///
    /// Devolve um vetor vazio se o texto não tiver tokens.
    pub fn parse(&self, raw: &str) -> Result<Vec<TaggedToken>> {
        let tagger = self.tagger()?;
        let tokens = tokenize(raw);
        if tokens.is_empty() {
            return Ok(vec![]);
        }
        label_tokens(tagger, tokens)
    }

    /// Como [`parse`](Self::parse), para entrada em bytes (UTF-8 com conversão tolerante).
    pub fn parse_bytes(&self, raw: &[u8]) -> Result<Vec<TaggedToken>> {
        self.tagger()?;
        self.parse(&decode_input(raw))
    }

    /// Rotula o endereço e agrupa os tokens em campos nomeados.
    pub fn tag(&self, raw: &str) -> Result<TaggedAddress> {
        Ok(assemble(&self.parse(raw)?))
    }

    /// Como [`tag`](Self::tag), para entrada em bytes.
    pub fn tag_bytes(&self, raw: &[u8]) -> Result<TaggedAddress> {
        Ok(assemble(&self.parse_bytes(raw)?))
    }

    /// Rotula vários endereços em paralelo. A ordem do resultado é a da entrada.
    pub fn tag_batch<S: AsRef<str> + Sync>(&self, inputs: &[S]) -> Vec<Result<TaggedAddress>> {
        inputs.par_iter().map(|raw| self.tag(raw.as_ref())).collect()
    }

    /// Executa o pipeline enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `FeaturesComputed` (um por token)
    /// 3. `TagAssigned` (um por token)
    /// 4. `Done`
    ///
    /// Qualquer falha (inclusive modelo indisponível) emite só `Error`.
    pub fn parse_streaming(&self, raw: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();

        let tagger = match self.tagger() {
            Ok(tagger) => tagger,
            Err(err) => {
                let _ = tx.send(PipelineEvent::Error {
                    message: err.to_string(),
                });
                return;
            }
        };

        // === Passo 1: Tokenização ===
        let tokens = tokenize(raw);
        let _ = tx.send(PipelineEvent::TokenizationDone {
            tokens: tokens.clone(),
            total: tokens.len(),
        });

        if tokens.is_empty() {
            let _ = tx.send(PipelineEvent::Done {
                fields: TaggedAddress::default(),
                tagged_tokens: vec![],
                total_tokens: 0,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        // === Passo 2: Features ===
        let features = sequence_features(&tokens);
        for position in features.iter() {
            let _ = tx.send(PipelineEvent::FeaturesComputed {
                token_index: position.index,
                token_text: tokens[position.index].text.clone(),
                features: position.features.clone(),
                boundary: position.boundary,
            });
        }

        // === Passo 3: Tagger ===
        let tagged_tokens = match tag_features(tagger, tokens, &features) {
            Ok(tagged) => tagged,
            Err(err) => {
                tracing::error!(error = %err, "falha no tagger");
                let _ = tx.send(PipelineEvent::Error {
                    message: err.to_string(),
                });
                return;
            }
        };
        for tt in &tagged_tokens {
            let _ = tx.send(PipelineEvent::TagAssigned {
                token_index: tt.token.index,
                token_text: tt.token.text.clone(),
                label: tt.label.name().to_string(),
            });
        }

        // === Passo 4: Montagem dos campos ===
        let fields = assemble(&tagged_tokens);
        let _ = tx.send(PipelineEvent::Done {
            fields,
            total_tokens: tagged_tokens.len(),
            tagged_tokens,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}

impl std::fmt::Debug for AddressParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressParser")
            .field("model", &self.model)
            .field("available", &self.is_available())
            .finish()
    }
}

fn label_tokens(tagger: &dyn SequenceTagger, tokens: Vec<Token>) -> Result<Vec<TaggedToken>> {
    let features = sequence_features(&tokens);
    tag_features(tagger, tokens, &features)
}

/// Rotula e alinha; o tagger precisa devolver exatamente um rótulo por token.
fn tag_features(
    tagger: &dyn SequenceTagger,
    tokens: Vec<Token>,
    features: &FeatureSequence,
) -> Result<Vec<TaggedToken>> {
    let labels = tagger.tag_sequence(features)?;
    if labels.len() != tokens.len() {
        return Err(FraddressError::LabelCountMismatch {
            tokens: tokens.len(),
            labels: labels.len(),
        });
    }
    tracing::debug!(tokens = tokens.len(), "endereço rotulado");

    Ok(tokens
        .into_iter()
        .zip(labels)
        .map(|(token, label)| TaggedToken { token, label })
        .collect())
}
