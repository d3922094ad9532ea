//! # Endereços Franceses Anotados
//!
//! Pequeno conjunto de endereços com um rótulo por token. Serve para os testes
//! (alinhamento entre tokenizador e anotações) e como textos de demonstração no
//! servidor web.

use crate::label::Label;

/// Um endereço anotado token a token.
pub struct AnnotatedAddress {
    /// O endereço como o usuário digitaria.
    pub text: &'static str,
    /// Tipo de endereço (usado para agrupar os exemplos na interface).
    pub kind: &'static str,
    /// Pares (token, rótulo), na ordem produzida pelo tokenizador.
    pub annotations: &'static [(&'static str, Label)],
}

/// Retorna todos os endereços anotados.
pub fn get_corpus() -> Vec<AnnotatedAddress> {
    use Label::*;

    vec![
        AnnotatedAddress {
            text: "12 Rue de la Paix, 75002 Paris",
            kind: "rue",
            annotations: &[
                ("12", AddressNumber), ("Rue", StreetType), ("de", StreetLink), ("la", StreetLink),
                ("Paix,", StreetName), ("75002", Zipcode), ("Paris", City),
            ],
        },
        AnnotatedAddress {
            text: "Bât. B, 3 bis avenue du Général Leclerc 69003 Lyon",
            kind: "complemento",
            annotations: &[
                ("Bât.", SubAddressType), ("B,", SubAddressNumber), ("3", AddressNumber),
                ("bis", AddressNumberSuffix), ("avenue", StreetType), ("du", StreetLink),
                ("Général", StreetName), ("Leclerc", StreetName), ("69003", Zipcode), ("Lyon", City),
            ],
        },
        AnnotatedAddress {
            text: "ZAC des Champs Fleuris, 13100 Aix-en-Provence",
            kind: "zona",
            annotations: &[
                ("ZAC", Area), ("des", AreaLink), ("Champs", AreaName), ("Fleuris,", AreaName),
                ("13100", Zipcode), ("Aix-en-Provence", City),
            ],
        },
        AnnotatedAddress {
            text: "BP 42 - 31000 Toulouse Cedex",
            kind: "caixa postal",
            annotations: &[
                ("BP", PostalBox), ("42", PostalBoxNumber), ("31000", Zipcode),
                ("Toulouse", City), ("Cedex", Zipcode),
            ],
        },
        AnnotatedAddress {
            text: "5 chemin des Vignes Nord; 33000 Bordeaux (Tél. 05 56 00 00 00)",
            kind: "telefone",
            annotations: &[
                ("5", AddressNumber), ("chemin", StreetType), ("des", StreetLink), ("Vignes", StreetName),
                ("Nord;", StreetDirection), ("33000", Zipcode), ("Bordeaux", City), ("(Tél.", Phone),
                ("05", PhoneNumber), ("56", PhoneNumber), ("00", PhoneNumber), ("00", PhoneNumber),
                ("00)", PhoneNumber),
            ],
        },
    ]
}

/// Textos de demonstração para a interface web: (tipo, endereço).
pub fn demo_addresses() -> Vec<(&'static str, &'static str)> {
    get_corpus().iter().map(|a| (a.kind, a.text)).collect()
}
