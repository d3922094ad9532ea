//! # Montagem dos Campos do Endereço
//!
//! Converte a sequência `(token, rótulo)` em campos nomeados. Diferente de um
//! esquema BIO, aqui não há spans: todos os tokens com o mesmo rótulo formam
//! um único campo, mesmo que não sejam contíguos.
//!
//! - A ordem dos campos é a ordem em que cada rótulo aparece pela primeira vez.
//! - Os tokens de cada campo são unidos com um espaço.
//! - Espaços, vírgulas e ponto-e-vírgulas nas pontas do campo são removidos.
//!
//! # Exemplo
//! `[12/AddressNumber, Rue/StreetType, de/StreetName, la/StreetName, Paix,/StreetName]`
//! → `{AddressNumber: "12", StreetType: "Rue", StreetName: "de la Paix"}`

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::label::{Label, TaggedToken};

const TRIMMED: &[char] = &[' ', ',', ';'];

/// Mapa ordenado rótulo → texto do campo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedAddress {
    fields: Vec<(Label, String)>,
}

impl TaggedAddress {
    /// Texto do campo com este rótulo.
    pub fn get(&self, label: Label) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rótulos na ordem de primeira ocorrência.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.fields.iter().map(|(label, _)| *label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> + '_ {
        self.fields.iter().map(|(label, text)| (*label, text.as_str()))
    }
}

impl Serialize for TaggedAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, text) in &self.fields {
            map.serialize_entry(label.name(), text)?;
        }
        map.end()
    }
}

/// Agrupa os tokens por rótulo, preservando a ordem de primeira ocorrência.
pub fn assemble(tagged: &[TaggedToken]) -> TaggedAddress {
    let mut groups: Vec<(Label, Vec<&str>)> = Vec::new();

    for tt in tagged {
        let slot = groups.iter().position(|(label, _)| *label == tt.label);
        match slot {
            Some(i) => groups[i].1.push(tt.token.text.as_str()),
            None => groups.push((tt.label, vec![tt.token.text.as_str()])),
        }
    }

    let fields = groups
        .into_iter()
        .map(|(label, tokens)| {
            let joined = tokens.join(" ");
            (label, joined.trim_matches(TRIMMED).to_string())
        })
        .collect();

    TaggedAddress { fields }
}
