use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use super::{split_alternatives, tokenize, Grammar, ProductionTable};

/// Things worth telling the user about a grammar. None of them stop enumeration.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GrammarWarning {
    #[error("start symbol `{0}` has no productions and will be emitted literally")]
    UndeclaredStart(String),

    #[error("non-terminal `{0}` is not reachable from the start symbol")]
    Unreachable(String),

    #[error("alternative `{raw}` of `{non_terminal}` has no recognizable symbols, treating it as epsilon")]
    EpsilonByOmission { non_terminal: String, raw: String },
}

type Check = fn(&Grammar, &ProductionTable) -> Vec<GrammarWarning>;

pub fn diagnose(grammar: &Grammar, table: &ProductionTable) -> Vec<GrammarWarning> {
    let checks: [Check; 3] = [undeclared_start, unreachable, epsilon_by_omission];

    checks
        .into_iter()
        .flat_map(|check| check(grammar, table))
        .collect()
}

fn undeclared_start(grammar: &Grammar, table: &ProductionTable) -> Vec<GrammarWarning> {
    let start = grammar.start_symbol.trim();

    if table.is_non_terminal(start) {
        vec![]
    } else {
        vec![GrammarWarning::UndeclaredStart(start.to_string())]
    }
}

fn unreachable(grammar: &Grammar, table: &ProductionTable) -> Vec<GrammarWarning> {
    let start = grammar.start_symbol.trim();
    let mut reached = HashSet::new();
    let mut pending = VecDeque::new();

    if table.is_non_terminal(start) {
        reached.insert(start);
        pending.push_back(start);
    }

    while let Some(current) = pending.pop_front() {
        for symbol in table.alternatives(current).unwrap_or_default().iter().flatten() {
            if table.is_non_terminal(symbol) && reached.insert(symbol.as_str()) {
                pending.push_back(symbol.as_str());
            }
        }
    }

    table
        .non_terminals()
        .filter(|name| !reached.contains(name))
        .sorted()
        .map(|name| GrammarWarning::Unreachable(name.to_string()))
        .collect()
}

fn epsilon_by_omission(grammar: &Grammar, _table: &ProductionTable) -> Vec<GrammarWarning> {
    grammar
        .productions
        .iter()
        .flat_map(|rule| {
            split_alternatives(&rule.rhs)
                .filter(|raw| tokenize(raw).is_empty())
                .map(|raw| GrammarWarning::EpsilonByOmission {
                    non_terminal: rule.non_terminal.trim().to_string(),
                    raw: raw.to_string(),
                })
                .collect_vec()
        })
        .collect()
}
