use std::collections::HashMap;

use super::{split_alternatives, tokenize, Grammar, SententialForm};

/// Non-terminal name to its alternatives, in the order they were declared.
///
/// Read-only once built; enumeration runs only ever borrow it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductionTable {
    productions: HashMap<String, Vec<SententialForm>>,
}

impl ProductionTable {
    /// Rules sharing a non-terminal have their alternatives concatenated.
    /// Referenced but undeclared symbols are left alone: they simply behave as terminals.
    pub fn build(grammar: &Grammar) -> Self {
        let mut productions: HashMap<String, Vec<SententialForm>> = HashMap::new();

        for rule in &grammar.productions {
            let alternatives = productions
                .entry(rule.non_terminal.trim().to_string())
                .or_default();

            alternatives.extend(split_alternatives(&rule.rhs).map(tokenize));
        }

        ProductionTable { productions }
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.productions.contains_key(symbol)
    }

    /// `None` for terminals. A declared non-terminal may still have no alternatives.
    pub fn alternatives(&self, symbol: &str) -> Option<&[SententialForm]> {
        self.productions.get(symbol).map(Vec::as_slice)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.productions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }
}
