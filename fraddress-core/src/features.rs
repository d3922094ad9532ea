//! # Engenharia de Features para Endereços
//!
//! Para cada token, calcula um registro de features com esquema fixo
//! ([`TokenFeatures`]) e, para a sequência inteira, expõe o contexto de cada
//! posição: features do token anterior e do seguinte, mais marcadores de borda.
//!
//! ## Features do token
//!
//! | Nome             | Valor                                             |
//! |------------------|---------------------------------------------------|
//! | `abbrev`         | termina com `.`                                   |
//! | `digits`         | `all_digits` / `no_digits`                        |
//! | `word`           | forma minúscula sem pontos (ausente se numérico)  |
//! | `trailing.zeros` | zeros finais de um número (ausente se não-número) |
//! | `length`         | `d:<n>` para números, `w:<n>` para palavras       |
//! | `endsinpunc`     | último caractere, se houver pontuação interna/final |
//! | `area`, `directional`, `street_name`, `preposition` | pertence ao léxico |
//! | `has.vowels`     | vogal depois do primeiro caractere               |
//!
//! ## Contexto
//!
//! O contexto não é copiado: [`FeatureSequence`] guarda um registro por token e
//! as vizinhanças são consultas por índice (i-1, i+1). Numa sequência com mais
//! de um token, a posição 0 é `rawstring.start` e a última é `rawstring.end`;
//! a visão de um vizinho carrega o marcador de borda desse vizinho. Uma
//! sequência de um único token é `singleton`.
//!
//! ## Codificação CRFsuite
//!
//! [`FeatureSequence::items`] achata cada posição em atributos ponderados, no
//! mesmo formato em que o `python-crfsuite` codifica dicionários:
//! `word=rue` (1.0), `abbrev` (0.0/1.0), `previous:street_name` (1.0)...

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::lexicon;

/// Tokens mantidos literalmente, sem limpeza de pontuação.
const VERBATIM_TOKENS: &[&str] = &["&", "#", "½"];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

// Caractere de palavra = letra, número (inclusive `½`, `²`) ou `_`.
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\p{L}\p{N}_]*|[^.\p{L}\p{N}_]*$").expect("padrão de limpeza inválido")
});
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("padrão numérico inválido"));
static TRAILING_ZEROS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0+$").expect("padrão de zeros inválido"));
static ENDS_IN_PUNC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+[^.\p{L}\p{N}_]").expect("padrão de pontuação inválido"));

/// Classe de dígitos do token limpo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Digits {
    AllDigits,
    NoDigits,
}

impl Digits {
    pub fn as_str(&self) -> &'static str {
        match self {
            Digits::AllDigits => "all_digits",
            Digits::NoDigits => "no_digits",
        }
    }
}

/// Comprimento de `token_abbrev`, qualificado por tipo (`d:` número, `w:` palavra).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Digits(usize),
    Word(usize),
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Digits(n) => write!(f, "d:{n}"),
            Length::Word(n) => write!(f, "w:{n}"),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Features de um único token, sem contexto.
///
/// Os campos `Option` correspondem aos valores "texto ou falso": `None` é o
/// valor falso/ausente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenFeatures {
    pub abbrev: bool,
    pub digits: Digits,
    pub word: Option<String>,
    #[serde(rename = "trailing.zeros")]
    pub trailing_zeros: Option<String>,
    pub length: Length,
    #[serde(rename = "endsinpunc")]
    pub ends_in_punc: Option<char>,
    pub area: bool,
    pub directional: bool,
    pub street_name: bool,
    pub preposition: bool,
    #[serde(rename = "has.vowels")]
    pub has_vowels: bool,
}

impl TokenFeatures {
    /// Escreve as features no vetor, com o prefixo dado (`""`, `"previous:"`...).
    fn write_attributes(&self, prefix: &str, fv: &mut FeatureVector) {
        fv.insert_flag(format!("{prefix}abbrev"), self.abbrev);
        fv.insert(format!("{prefix}digits={}", self.digits.as_str()), 1.0);
        fv.insert_text(prefix, "word", self.word.as_deref());
        fv.insert_text(prefix, "trailing.zeros", self.trailing_zeros.as_deref());
        fv.insert(format!("{prefix}length={}", self.length), 1.0);
        let punc = self.ends_in_punc.map(String::from);
        fv.insert_text(prefix, "endsinpunc", punc.as_deref());
        fv.insert_flag(format!("{prefix}area"), self.area);
        fv.insert_flag(format!("{prefix}directional"), self.directional);
        fv.insert_flag(format!("{prefix}street_name"), self.street_name);
        fv.insert_flag(format!("{prefix}preposition"), self.preposition);
        fv.insert_flag(format!("{prefix}has.vowels"), self.has_vowels);
    }
}

/// Remove pontuação inicial e final do token (mantém pontos finais).
///
/// `&`, `#` e `½` são devolvidos sem alteração.
pub fn clean_token(token: &str) -> Cow<'_, str> {
    if VERBATIM_TOKENS.contains(&token) {
        Cow::Borrowed(token)
    } else {
        STRIP_RE.replace_all(token, "")
    }
}

/// Forma abreviada: minúscula e sem pontos ("Bd." → "bd").
pub fn abbreviate(clean: &str) -> String {
    clean.to_lowercase().replace('.', "")
}

fn is_numeric(s: &str) -> bool {
    NUMERIC_RE.is_match(s)
}

fn trailing_zeros(s: &str) -> String {
    TRAILING_ZEROS_RE
        .find(s)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extrai as features de um único token. Função pura, nunca falha.
///
/// # Exemplo
/// ```rust
/// use fraddress_core::features::{token_features, Digits};
///
/// let f = token_features("Rue");
/// assert!(f.street_name);
/// assert_eq!(f.digits, Digits::NoDigits);
/// assert_eq!(f.word.as_deref(), Some("rue"));
/// ```
pub fn token_features(token: &str) -> TokenFeatures {
    let clean = clean_token(token);
    let abbrev = abbreviate(&clean);
    let numeric = is_numeric(&abbrev);
    let n = abbrev.chars().count();

    TokenFeatures {
        abbrev: clean.ends_with('.'),
        digits: if is_numeric(&clean) {
            Digits::AllDigits
        } else {
            Digits::NoDigits
        },
        word: (!numeric).then(|| abbrev.clone()),
        trailing_zeros: numeric.then(|| trailing_zeros(&abbrev)),
        length: if numeric {
            Length::Digits(n)
        } else {
            Length::Word(n)
        },
        ends_in_punc: if ENDS_IN_PUNC_RE.is_match(token) {
            token.chars().last()
        } else {
            None
        },
        area: lexicon::is_area(&abbrev),
        directional: lexicon::is_directional(&abbrev),
        street_name: lexicon::is_street_name(&abbrev),
        preposition: lexicon::is_preposition(&abbrev),
        has_vowels: abbrev.chars().skip(1).any(|c| VOWELS.contains(&c)),
    }
}

/// Marcador de posição na sequência.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Boundary {
    #[serde(rename = "rawstring.start")]
    Start,
    #[serde(rename = "rawstring.end")]
    End,
    #[serde(rename = "singleton")]
    Singleton,
}

impl Boundary {
    pub fn name(&self) -> &'static str {
        match self {
            Boundary::Start => "rawstring.start",
            Boundary::End => "rawstring.end",
            Boundary::Singleton => "singleton",
        }
    }
}

/// Visão das features de um vizinho (anterior ou seguinte).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeighborFeatures<'a> {
    #[serde(flatten)]
    pub features: &'a TokenFeatures,
    /// Marcador de borda do próprio vizinho (`Start` ou `End`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
}

/// Features de uma posição com seu contexto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionFeatures<'a> {
    #[serde(skip)]
    pub index: usize,
    #[serde(flatten)]
    pub features: &'a TokenFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NeighborFeatures<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NeighborFeatures<'a>>,
}

impl PositionFeatures<'_> {
    /// Achata a posição em atributos CRFsuite.
    pub fn to_vector(&self) -> FeatureVector {
        let mut fv = FeatureVector::new(self.index);
        self.features.write_attributes("", &mut fv);
        if let Some(boundary) = self.boundary {
            fv.insert(boundary.name(), 1.0);
        }
        for (prefix, neighbor) in [("previous:", self.previous), ("next:", self.next)] {
            if let Some(neighbor) = neighbor {
                neighbor.features.write_attributes(prefix, &mut fv);
                if let Some(boundary) = neighbor.boundary {
                    fv.insert(format!("{prefix}{}", boundary.name()), 1.0);
                }
            }
        }
        fv
    }
}

/// Features de todos os tokens de um endereço, alinhadas com os tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSequence {
    features: Vec<TokenFeatures>,
}

impl FeatureSequence {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Marcador de borda da posição `i`, se houver.
    pub fn boundary(&self, i: usize) -> Option<Boundary> {
        match self.features.len() {
            0 => None,
            1 if i == 0 => Some(Boundary::Singleton),
            _ if i == 0 => Some(Boundary::Start),
            n if i + 1 == n => Some(Boundary::End),
            _ => None,
        }
    }

    fn neighbor(&self, i: usize) -> Option<NeighborFeatures<'_>> {
        self.features.get(i).map(|features| NeighborFeatures {
            features,
            boundary: self.boundary(i),
        })
    }

    /// Features da posição `i` com o contexto.
    pub fn get(&self, i: usize) -> Option<PositionFeatures<'_>> {
        let features = self.features.get(i)?;
        Some(PositionFeatures {
            index: i,
            features,
            boundary: self.boundary(i),
            previous: i.checked_sub(1).and_then(|p| self.neighbor(p)),
            next: self.neighbor(i + 1),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = PositionFeatures<'_>> + '_ {
        (0..self.features.len()).filter_map(move |i| self.get(i))
    }

    /// Registros sem contexto, na ordem dos tokens.
    pub fn token_features(&self) -> &[TokenFeatures] {
        &self.features
    }

    /// Um vetor de atributos CRFsuite por posição.
    pub fn items(&self) -> Vec<FeatureVector> {
        self.iter().map(|position| position.to_vector()).collect()
    }
}

/// Calcula as features da sequência inteira.
///
/// Quem chama já filtrou entradas sem tokens; uma lista vazia produz uma
/// sequência vazia.
pub fn sequence_features<S: AsRef<str>>(tokens: &[S]) -> FeatureSequence {
    let features: Vec<TokenFeatures> = tokens
        .iter()
        .map(|token| token_features(token.as_ref()))
        .collect();
    tracing::trace!(tokens = features.len(), "features calculadas");
    FeatureSequence { features }
}

/// Atributos ponderados de uma posição, prontos para o tagger.
///
/// Mapa esparso: cada token ativa poucas chaves como `word=rue` ou
/// `previous:digits=all_digits`.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    /// Ex: `{"street_name": 1.0, "word=rue": 1.0, "abbrev": 0.0}`.
    pub features: HashMap<String, f64>,
    /// Índice do token original no endereço.
    pub token_index: usize,
}

impl FeatureVector {
    pub fn new(token_index: usize) -> Self {
        Self {
            features: HashMap::new(),
            token_index,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.features.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.features.get(key).copied()
    }

    fn insert_flag(&mut self, key: String, value: bool) {
        self.insert(key, if value { 1.0 } else { 0.0 });
    }

    /// `Some(v)` vira `chave=v` (1.0); `None` vira `chave` com peso 0.
    fn insert_text(&mut self, prefix: &str, key: &str, value: Option<&str>) {
        match value {
            Some(v) => self.insert(format!("{prefix}{key}={v}"), 1.0),
            None => self.insert(format!("{prefix}{key}"), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_street_type_token() {
        let f = token_features("Rue");
        assert!(f.street_name);
        assert!(!f.abbrev);
        assert_eq!(f.digits, Digits::NoDigits);
        assert_eq!(f.word.as_deref(), Some("rue"));
        assert_eq!(f.trailing_zeros, None);
        assert_eq!(f.length.to_string(), "w:3");
        assert!(f.has_vowels);
    }

    #[test]
    fn test_number_token() {
        let f = token_features("12");
        assert_eq!(f.digits, Digits::AllDigits);
        assert_eq!(f.word, None);
        assert_eq!(f.length, Length::Digits(2));
        assert_eq!(f.trailing_zeros.as_deref(), Some(""));
        assert_eq!(f.ends_in_punc, None);
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(token_features("75002").trailing_zeros.as_deref(), Some(""));
        assert_eq!(token_features("100").trailing_zeros.as_deref(), Some("00"));
        assert_eq!(token_features("75000").trailing_zeros.as_deref(), Some("000"));
    }

    #[test]
    fn test_abbreviation_with_dot() {
        let f = token_features("Bd.");
        assert!(f.abbrev);
        assert_eq!(f.word.as_deref(), Some("bd"));
        assert_eq!(f.length, Length::Word(2));
        // '.' não conta como pontuação final
        assert_eq!(f.ends_in_punc, None);
    }

    #[test]
    fn test_number_with_dot_keeps_no_digits() {
        // `digits` olha o token limpo ("12."), `word`/`length` olham "12"
        let f = token_features("12.");
        assert_eq!(f.digits, Digits::NoDigits);
        assert_eq!(f.word, None);
        assert_eq!(f.length, Length::Digits(2));
    }

    #[test]
    fn test_trailing_comma() {
        let f = token_features("Paix,");
        assert_eq!(f.word.as_deref(), Some("paix"));
        assert_eq!(f.ends_in_punc, Some(','));
        assert!(!f.abbrev);
    }

    #[test]
    fn test_parenthesis_prefix_is_stripped() {
        let f = token_features("(Bat.");
        assert_eq!(clean_token("(Bat."), "Bat.");
        assert!(f.abbrev);
        assert_eq!(f.word.as_deref(), Some("bat"));
        assert_eq!(f.ends_in_punc, None);
    }

    #[test]
    fn test_verbatim_symbols() {
        assert_eq!(clean_token("&"), "&");
        let f = token_features("#");
        assert_eq!(f.word.as_deref(), Some("#"));
        assert_eq!(f.length, Length::Word(1));
        assert_eq!(token_features("½").word.as_deref(), Some("½"));
    }

    #[test]
    fn test_vulgar_fraction_is_part_of_the_word() {
        assert_eq!(clean_token("12½"), "12½");
        let f = token_features("12½");
        assert_eq!(f.digits, Digits::NoDigits);
        assert_eq!(f.word.as_deref(), Some("12½"));
        assert_eq!(f.trailing_zeros, None);
        assert_eq!(f.length, Length::Word(3));
        assert_eq!(f.ends_in_punc, None);

        let sup = token_features("m²,");
        assert_eq!(sup.word.as_deref(), Some("m²"));
        assert_eq!(sup.ends_in_punc, Some(','));
    }

    #[test]
    fn test_empty_after_cleaning_does_not_fail() {
        let f = token_features("...");
        assert!(!f.abbrev);
        assert_eq!(f.word.as_deref(), Some(""));
        assert_eq!(f.length, Length::Word(0));
        assert!(!f.has_vowels);
        assert_eq!(f.ends_in_punc, None);

        let empty = token_features("");
        assert_eq!(empty.length.to_string(), "w:0");
    }

    #[test]
    fn test_lexicon_membership() {
        assert!(token_features("ZAC").area);
        assert!(token_features("Nord-Ouest").directional);
        assert!(token_features("du").preposition);
        assert!(token_features("Allée").street_name);
    }

    #[test]
    fn test_has_vowels_ignores_first_char() {
        assert!(!token_features("A").has_vowels);
        assert!(!token_features("Bd").has_vowels);
        assert!(token_features("Lyon").has_vowels);
        // vogais acentuadas não contam
        assert!(!token_features("bé").has_vowels);
    }

    #[test]
    fn test_features_are_deterministic() {
        for t in ["Rue", "75002", "Paix,", "(Bat.", "&"] {
            assert_eq!(token_features(t), token_features(t));
        }
    }

    #[test]
    fn test_singleton_marker() {
        let seq = sequence_features(&["Paris"]);
        let only = seq.get(0).unwrap();
        assert_eq!(only.boundary, Some(Boundary::Singleton));
        assert!(only.previous.is_none() && only.next.is_none());

        let fv = only.to_vector();
        assert_eq!(fv.get("singleton"), Some(1.0));
        assert_eq!(fv.get("rawstring.start"), None);
        assert_eq!(fv.get("rawstring.end"), None);
    }

    #[test]
    fn test_start_and_end_markers() {
        let tokens = tokenize("12 Rue de la Paix, 75002 Paris");
        let seq = sequence_features(&tokens);
        assert_eq!(seq.len(), tokens.len());

        assert_eq!(seq.boundary(0), Some(Boundary::Start));
        assert_eq!(seq.boundary(6), Some(Boundary::End));
        for i in 1..6 {
            assert_eq!(seq.boundary(i), None);
        }
        assert!(seq.iter().all(|p| p.boundary != Some(Boundary::Singleton)));
    }

    #[test]
    fn test_neighbor_links_follow_order() {
        let seq = sequence_features(&["12", "Rue", "Lepic"]);
        let middle = seq.get(1).unwrap();
        assert_eq!(middle.previous.unwrap().features.word, None);
        assert_eq!(middle.next.unwrap().features.word.as_deref(), Some("lepic"));
        assert!(seq.get(0).unwrap().previous.is_none());
        assert!(seq.get(2).unwrap().next.is_none());
        assert!(seq.get(3).is_none());
    }

    #[test]
    fn test_neighbor_views_carry_boundary_markers() {
        let seq = sequence_features(&["12", "Rue", "Lepic"]);
        let second = seq.get(1).unwrap();
        assert_eq!(second.previous.unwrap().boundary, Some(Boundary::Start));
        assert_eq!(second.next.unwrap().boundary, Some(Boundary::End));

        let fv = second.to_vector();
        assert_eq!(fv.get("previous:rawstring.start"), Some(1.0));
        assert_eq!(fv.get("next:rawstring.end"), Some(1.0));
        assert_eq!(fv.get("rawstring.start"), None);
    }

    #[test]
    fn test_two_tokens() {
        let seq = sequence_features(&["Lyon", "69001"]);
        let first = seq.get(0).unwrap().to_vector();
        let last = seq.get(1).unwrap().to_vector();
        assert_eq!(first.get("rawstring.start"), Some(1.0));
        assert_eq!(first.get("next:rawstring.end"), Some(1.0));
        assert_eq!(last.get("rawstring.end"), Some(1.0));
        assert_eq!(last.get("previous:rawstring.start"), Some(1.0));
    }

    #[test]
    fn test_crfsuite_encoding() {
        let seq = sequence_features(&["12", "Rue"]);
        let fv = seq.get(0).unwrap().to_vector();
        assert_eq!(fv.token_index, 0);
        assert_eq!(fv.get("digits=all_digits"), Some(1.0));
        assert_eq!(fv.get("word"), Some(0.0));
        assert_eq!(fv.get("trailing.zeros="), Some(1.0));
        assert_eq!(fv.get("length=d:2"), Some(1.0));
        assert_eq!(fv.get("endsinpunc"), Some(0.0));
        assert_eq!(fv.get("abbrev"), Some(0.0));
        assert_eq!(fv.get("next:word=rue"), Some(1.0));
        assert_eq!(fv.get("next:street_name"), Some(1.0));
        assert_eq!(fv.get("next:trailing.zeros"), Some(0.0));
    }

    #[test]
    fn test_empty_sequence() {
        let seq = sequence_features::<&str>(&[]);
        assert!(seq.is_empty());
        assert!(seq.items().is_empty());
        assert_eq!(seq.boundary(0), None);
    }

    #[test]
    fn test_serialized_names() {
        let seq = sequence_features(&["Paix,", "75002"]);
        let json = serde_json::to_value(seq.get(0).unwrap()).unwrap();
        assert_eq!(json["word"], "paix");
        assert_eq!(json["endsinpunc"], ",");
        assert_eq!(json["length"], "w:4");
        assert_eq!(json["digits"], "no_digits");
        assert_eq!(json["has.vowels"], true);
        assert_eq!(json["boundary"], "rawstring.start");
        assert_eq!(json["next"]["trailing.zeros"], "");
    }
}
