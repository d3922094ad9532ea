//! # Tabelas Léxicas
//!
//! Conjuntos estáticos de palavras conhecidas em endereços franceses. São usados
//! apenas como dados de consulta pelo extrator de features ([`crate::features`]):
//! a chave consultada é sempre a forma `token_abbrev` (minúscula, sem pontos).
//!
//! | Tabela           | Exemplos                              |
//! |------------------|---------------------------------------|
//! | [`DIRECTIONS`]   | n, sud, nord-ouest                    |
//! | [`STREET_NAMES`] | rue, avenue, boulevard, impasse       |
//! | [`AREA`]         | zone, zac, centre, commercial         |
//! | [`PREPOSITIONS`] | le, de, du, aux                       |
//!
//! Algumas entradas (`"c.c."`, `"lieu dit"`) nunca casam com um token, já que
//! pontos são removidos e espaços separam tokens. Ficam na lista para manter o
//! mesmo vocabulário com que o modelo foi treinado.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Pontos cardeais e suas abreviações (inclui "o"/"ouest" do francês).
pub const DIRECTIONS: &[&str] = &[
    "n", "s", "e", "w", "o",
    "ne", "nw", "se", "sw", "no",
    "nord", "sud", "est", "ouest",
    "nord-est", "nord-ouest", "sud-est", "sud-ouest",
];

/// Tipos de via (rue, avenue...) e lugares que fazem papel de via.
pub const STREET_NAMES: &[&str] = &[
    "abbaye", "agglomération", "aire", "aires", "allée", "allées", "anse", "arcade", "arcades", "autoroute", "avenue",
    "barriere", "barrieres", "bastide", "bastion", "beguinage", "béguinages", "berge", "berges", "bois", "boucle",
    "boulevard", "bourg", "butte", "cale", "camp", "campagne", "camping", "carre", "carreau", "carrefour", "carrière",
    "carrières", "castel", "cavée", "central", "chalet", "chapelle", "charmille", "château", "chaussée", "chaussées",
    "chemin", "cheminement", "cheminements", "chemins", "chez", "cite", "cites", "cloître", "clos", "col", "colline",
    "collines", "contour", "corniche", "corniches", "cote", "côteau", "cottage", "cottages", "cour", "cours", "darse",
    "degré", "degrés", "descente", "descentes", "digue", "digues", "domaine", "domaines", "écluse", "écluses", "église",
    "enceinte", "enclave", "enclos", "escalier", "escaliers", "espace", "esplanade", "esplanades", "étang", "faubourg",
    "ferme", "fermes", "fontaine", "fort", "forum", "fosse", "fosses", "foyer", "galerie", "galeries", "gare", "garenne",
    "grille", "grimpette", "groupe", "groupement", "groupes", "halle", "halles", "hameau", "hameaux", "hippodrome", "hlm",
    "île", "immeuble", "immeubles", "impasse", "impasses", "jardin", "jardins", "jetee", "jetees", "levée", "lieu dit",
    "lotissement", "lotissements", "mail", "manoir", "marche", "marches", "mas", "métro", "montée", "montees", "moulin",
    "moulins", "musée", "palais", "parc", "parcs", "parking", "parvis", "passage", "passe", "passerelle", "passerelles",
    "passes", "patio", "pavillon", "pavillons", "péripherique", "péristyle", "place", "placis", "plage", "plages",
    "plaine", "plan", "plateau", "plateaux", "pointe", "point", "pont", "ponts", "porche", "port", "porte", "portique",
    "portiques", "poterne", "pourtour", "pré", "presqu'île", "promenade", "quai", "quartier", "raccourci", "raidillon",
    "rampe", "rempart", "résidence", "résidences", "roc", "rocade", "rond", "roquet", "rotonde", "route", "routes", "rue",
    "ruelle", "ruelles", "rues", "rn", "rd", "rte", "sente", "sentes", "sentier", "sentiers", "square", "stade", "station",
    "terrain", "terrasse", "terrasses", "terre-plein", "tertre", "tertres", "tour", "traverse", "val", "vallée", "vallon",
    "venelle", "venelles", "via", "villa", "village", "villages", "villas", "voie", "voies",
];

/// Palavras de zona (ZI, ZAC, centre commercial, lieu-dit...).
pub const AREA: &[&str] = &[
    "zone", "centre", "commercial", "zi", "za", "zac", "cc", "c.c", "c.c.", "c", "c.", "lieu", "dit", "espace", "galerie",
    "marchande", "parking", "pôle", "ccial", "cite", "z.a.", "z.a",
];

/// Artigos e preposições que ligam partes do nome da via.
pub const PREPOSITIONS: &[&str] = &["le", "la", "de", "du", "les", "des", "a", "au", "aux"];

static DIRECTION_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| to_set(DIRECTIONS));
static STREET_NAME_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| to_set(STREET_NAMES));
static AREA_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| to_set(AREA));
static PREPOSITION_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| to_set(PREPOSITIONS));

fn to_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// `true` se `word` é um ponto cardeal.
pub fn is_directional(word: &str) -> bool {
    DIRECTION_SET.contains(word)
}

/// `true` se `word` é um tipo de via.
pub fn is_street_name(word: &str) -> bool {
    STREET_NAME_SET.contains(word)
}

/// `true` se `word` é uma palavra de zona.
pub fn is_area(word: &str) -> bool {
    AREA_SET.contains(word)
}

/// `true` se `word` é uma preposição.
pub fn is_preposition(word: &str) -> bool {
    PREPOSITION_SET.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert!(is_street_name("rue"));
        assert!(is_street_name("allée"));
        assert!(is_directional("nord-ouest"));
        assert!(is_area("zac"));
        assert!(is_preposition("aux"));
        assert!(!is_street_name("Rue"));
        assert!(!is_preposition("paris"));
    }

    #[test]
    fn test_every_table_entry_is_found() {
        assert!(DIRECTIONS.iter().all(|w| is_directional(w)));
        assert!(STREET_NAMES.iter().all(|w| is_street_name(w)));
        assert!(AREA.iter().all(|w| is_area(w)));
        assert!(PREPOSITIONS.iter().all(|w| is_preposition(w)));
    }

    #[test]
    fn test_shared_words() {
        // "parking", "galerie" e "espace" aparecem como via e como zona
        for w in ["parking", "galerie", "espace"] {
            assert!(is_street_name(w) && is_area(w), "{w}");
        }
    }
}
