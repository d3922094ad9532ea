//! # Tagger de Sequências
//!
//! O modelo estatístico é um colaborador externo: recebe as features de todos
//! os tokens e devolve **um rótulo por posição**, na mesma ordem. O pipeline só
//! conhece o trait [`SequenceTagger`]; quem cria o tagger (o processo
//! hospedeiro) decide de onde o modelo vem.
//!
//! [`CrfSuiteTagger`] é a implementação padrão: lê um arquivo de modelo
//! CRFsuite (`learned_settings.crfsuite`) com o crate `crfs` e decodifica cada
//! sequência com os atributos de [`FeatureSequence::items`].

use std::fmt;
use std::path::{Path, PathBuf};

use crfs::{Attribute, Model};

use crate::error::{FraddressError, Result};
use crate::features::FeatureSequence;
use crate::label::Label;

/// Capacidade "sequência de features → sequência de rótulos".
///
/// Implementações são somente-leitura depois de construídas e podem ser
/// usadas por várias chamadas em paralelo.
pub trait SequenceTagger: Send + Sync {
    /// Devolve um rótulo por posição de `features`, na mesma ordem.
    fn tag_sequence(&self, features: &FeatureSequence) -> Result<Vec<Label>>;
}

/// Tagger baseado num modelo CRFsuite já treinado.
///
/// O conteúdo do arquivo fica em memória; cada chamada cria um decodificador
/// de vida curta sobre esses bytes.
pub struct CrfSuiteTagger {
    model_data: Vec<u8>,
    source: PathBuf,
}

impl CrfSuiteTagger {
    /// Lê e valida o arquivo do modelo.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model_data = std::fs::read(path).map_err(|source| FraddressError::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(model_data, path)
    }

    /// Usa bytes de modelo já carregados; `source` só identifica o modelo nos logs.
    pub fn from_bytes(model_data: Vec<u8>, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        if let Err(err) = Model::new(&model_data) {
            return Err(FraddressError::ModelLoad { path: source, source: err });
        }
        tracing::info!(model = %source.display(), bytes = model_data.len(), "modelo CRFsuite carregado");
        Ok(Self { model_data, source })
    }

    /// Caminho de onde o modelo foi lido.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl fmt::Debug for CrfSuiteTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrfSuiteTagger")
            .field("source", &self.source)
            .field("bytes", &self.model_data.len())
            .finish()
    }
}

impl SequenceTagger for CrfSuiteTagger {
    fn tag_sequence(&self, features: &FeatureSequence) -> Result<Vec<Label>> {
        let xseq: Vec<Vec<Attribute>> = features
            .items()
            .into_iter()
            .map(|fv| {
                fv.features
                    .into_iter()
                    .map(|(name, value)| Attribute::new(name, value))
                    .collect()
            })
            .collect();

        let model = Model::new(&self.model_data)?;
        let mut tagger = model.tagger()?;
        let names = tagger.tag(&xseq)?;

        let labels = names
            .iter()
            .map(|name| Label::from_name(name).ok_or_else(|| FraddressError::UnknownLabel(name.to_string())))
            .collect::<Result<Vec<Label>>>()?;
        Ok(labels)
    }
}
