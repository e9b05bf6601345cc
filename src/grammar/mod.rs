pub mod diagnostics;
pub mod table;
mod tokenize;

use serde_derive::Deserialize;

pub use table::ProductionTable;
pub use tokenize::tokenize;

/// Separator between the alternatives of one raw right-hand side.
pub const ALTERNATIVE_SEPARATOR: char = '|';

/// Atomic token. Whether it is a non-terminal is decided by the production table.
pub type Symbol = String;

pub type SententialForm = Vec<Symbol>;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRule {
    pub non_terminal: String,
    pub rhs: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub id: String,
    pub start_symbol: String,

    #[serde(default)]
    pub productions: Vec<ProductionRule>,
}

impl Grammar {
    #[cfg(test)]
    pub fn new(id: &str, start_symbol: &str, productions: &[(&str, &str)]) -> Self {
        Grammar {
            id: id.to_string(),
            start_symbol: start_symbol.to_string(),
            productions: productions
                .iter()
                .map(|(non_terminal, rhs)| ProductionRule {
                    non_terminal: non_terminal.to_string(),
                    rhs: rhs.to_string(),
                })
                .collect(),
        }
    }

    /// The single-symbol sentential form every derivation starts from.
    pub fn start_form(&self) -> SententialForm {
        vec![self.start_symbol.trim().to_string()]
    }
}

/// Non-blank alternatives of a raw right-hand side, trimmed, in input order.
pub fn split_alternatives(rhs: &str) -> impl Iterator<Item = &str> {
    rhs.split(ALTERNATIVE_SEPARATOR)
        .map(str::trim)
        .filter(|alternative| !alternative.is_empty())
}

/// Joins symbols with a single space. Used both for visited-state keys and finished words.
pub fn serialize_form(form: &[Symbol]) -> String {
    form.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_blank_alternatives() {
        let pieces: Vec<_> = split_alternatives(" a S b |  | c |").collect();
        assert_eq!(pieces, vec!["a S b", "c"]);
    }

    #[test]
    fn serialize_joins_with_single_space() {
        let form = vec!["a".to_string(), "S".to_string(), "b".to_string()];
        assert_eq!(serialize_form(&form), "a S b");
        assert_eq!(serialize_form(&[]), "");
    }

    #[test]
    fn start_form_is_trimmed_start_symbol() {
        let grammar = Grammar::new("g", " S ", &[("S", "a")]);
        assert_eq!(grammar.start_form(), vec!["S".to_string()]);
    }

    #[test]
    fn decode_grammar_payload() {
        let payload = r#"{
            "id": "anbn",
            "startSymbol": "S",
            "productions": [
                { "nonTerminal": "S", "rhs": "a S b | c" }
            ]
        }"#;

        let grammar: Grammar = serde_json::from_str(payload).unwrap();
        assert_eq!(grammar, Grammar::new("anbn", "S", &[("S", "a S b | c")]));
    }
}
