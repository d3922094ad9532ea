//! # Rótulos de Componentes de Endereço
//!
//! Conjunto fechado de 23 rótulos que o modelo atribui aos tokens. Cada rótulo
//! é serializado exatamente com o nome usado no treinamento do modelo
//! (ex: `"AddressNumber"`, `"Zipcode"`).
//!
//! | Grupo        | Rótulos                                                        |
//! |--------------|----------------------------------------------------------------|
//! | Zona         | Area, AreaNumber, AreaLink, AreaName                           |
//! | Número       | AddressNumber, AddressNumberSuffix                             |
//! | Via          | StreetType, StreetLink, StreetName, StreetDirection, StreetNumber |
//! | Caixa postal | PostalBox, PostalBoxNumber                                     |
//! | Complemento  | PreSubAddress, SubAddressType, SubAddressNumber, PostSubAddress |
//! | Localidade   | City, Zipcode                                                  |
//! | Telefone     | Phone, PhoneLink, PhoneNumber                                  |
//! | Ruído        | NotAddress                                                     |

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Rótulo atribuído a um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Palavra de zona: "ZAC", "Zone", "Centre".
    Area,
    AreaNumber,
    /// Artigo/preposição dentro do nome da zona.
    AreaLink,
    AreaName,
    /// Número da porta: "12".
    AddressNumber,
    /// Complemento do número: "bis", "ter", "B".
    AddressNumberSuffix,
    /// Tipo de via: "Rue", "Avenue", "Bd.".
    StreetType,
    /// Artigo/preposição entre o tipo e o nome da via.
    StreetLink,
    StreetName,
    StreetDirection,
    StreetNumber,
    /// "BP", "CS", "Boîte postale".
    PostalBox,
    PostalBoxNumber,
    PreSubAddress,
    /// "Bât.", "Appt", "Étage".
    SubAddressType,
    SubAddressNumber,
    PostSubAddress,
    City,
    /// Código postal de 5 dígitos ou "CEDEX".
    Zipcode,
    Phone,
    PhoneLink,
    PhoneNumber,
    /// Token que não faz parte do endereço.
    NotAddress,
}

impl Label {
    /// Número total de rótulos possíveis
    pub const COUNT: usize = 23;

    /// Todos os rótulos, na ordem de declaração.
    pub const ALL: [Label; Label::COUNT] = [
        Label::Area,
        Label::AreaNumber,
        Label::AreaLink,
        Label::AreaName,
        Label::AddressNumber,
        Label::AddressNumberSuffix,
        Label::StreetType,
        Label::StreetLink,
        Label::StreetName,
        Label::StreetDirection,
        Label::StreetNumber,
        Label::PostalBox,
        Label::PostalBoxNumber,
        Label::PreSubAddress,
        Label::SubAddressType,
        Label::SubAddressNumber,
        Label::PostSubAddress,
        Label::City,
        Label::Zipcode,
        Label::Phone,
        Label::PhoneLink,
        Label::PhoneNumber,
        Label::NotAddress,
    ];

    /// Nome do rótulo, idêntico ao usado pelo modelo.
    pub fn name(&self) -> &'static str {
        match self {
            Label::Area => "Area",
            Label::AreaNumber => "AreaNumber",
            Label::AreaLink => "AreaLink",
            Label::AreaName => "AreaName",
            Label::AddressNumber => "AddressNumber",
            Label::AddressNumberSuffix => "AddressNumberSuffix",
            Label::StreetType => "StreetType",
            Label::StreetLink => "StreetLink",
            Label::StreetName => "StreetName",
            Label::StreetDirection => "StreetDirection",
            Label::StreetNumber => "StreetNumber",
            Label::PostalBox => "PostalBox",
            Label::PostalBoxNumber => "PostalBoxNumber",
            Label::PreSubAddress => "PreSubAddress",
            Label::SubAddressType => "SubAddressType",
            Label::SubAddressNumber => "SubAddressNumber",
            Label::PostSubAddress => "PostSubAddress",
            Label::City => "City",
            Label::Zipcode => "Zipcode",
            Label::Phone => "Phone",
            Label::PhoneLink => "PhoneLink",
            Label::PhoneNumber => "PhoneNumber",
            Label::NotAddress => "NotAddress",
        }
    }

    /// Parseia um rótulo a partir do nome (ex: "City" → Some(City)).
    pub fn from_name(s: &str) -> Option<Self> {
        Label::ALL.iter().copied().find(|label| label.name() == s)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Um token com o rótulo atribuído pelo tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub label: Label,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_name(label.name()), Some(label));
        }
        assert_eq!(Label::from_name("Rue"), None);
        assert_eq!(Label::from_name("city"), None);
    }

    #[test]
    fn test_all_labels_are_unique() {
        let mut names: Vec<&str> = Label::ALL.iter().map(|l| l.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Label::COUNT);
    }

    #[test]
    fn test_serde_uses_model_names() {
        let json = serde_json::to_string(&Label::AddressNumberSuffix).unwrap();
        assert_eq!(json, "\"AddressNumberSuffix\"");
        assert_eq!(Label::Zipcode.to_string(), "Zipcode");
    }
}
