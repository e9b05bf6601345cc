//! Membership against a generated sample.
//!
//! This is not a grammar membership oracle. A word is accepted only if the
//! bounded enumeration that produced `words` reached it, so any word whose
//! derivation needs more rewrites, longer sentential forms, or more output
//! than the bounds allowed is rejected even when the grammar derives it.

use itertools::Itertools;

use crate::enumeration::WordSet;

/// Collapses whitespace runs to single spaces and trims the ends.
// Unicode `White_Space`, matching `str::trim` used for the blank check below.
pub fn normalize(candidate: &str) -> String {
    candidate.split_whitespace().join(" ")
}

pub fn belongs(candidate: Option<&str>, words: &WordSet) -> bool {
    match candidate {
        Some(candidate) if !candidate.trim().is_empty() => words.contains(&normalize(candidate)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        enumeration::{enumerate, Bounds},
        grammar::{Grammar, ProductionTable},
    };

    fn sample(max_depth: usize) -> WordSet {
        let grammar = Grammar::new("anbn", "S", &[("S", "a S b | c")]);
        let bounds = Bounds {
            max_depth,
            max_words: 10,
            max_tokens: 10,
        };
        enumerate(&ProductionTable::build(&grammar), grammar.start_form(), bounds).words
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  a   c\tb \n"), "a c b");
        assert_eq!(normalize("a c b"), "a c b");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for word in ["a  b", " x ", "", "a\t\tb  c", "already fine"] {
            let once = normalize(word);
            assert_eq!(normalize(&once), once);
        }
        assert_eq!(normalize("a b"), normalize("a      b"));
    }

    #[test]
    fn blank_candidates_never_belong() {
        let words: WordSet = ["", "c"].into_iter().collect();

        assert!(!belongs(None, &words));
        assert!(!belongs(Some(""), &words));
        assert!(!belongs(Some(" \t "), &words));
    }

    #[test]
    fn generated_words_belong() {
        let words = sample(3);

        for word in words.iter() {
            assert!(belongs(Some(word), &words));
        }
        assert!(belongs(Some("  a   c  b "), &words));
        assert!(!belongs(Some("acb"), &words));
        assert!(!belongs(Some("a b"), &words));
    }

    #[test]
    fn words_past_the_depth_bound_are_rejected() {
        assert!(!belongs(Some("a a a c b b b"), &sample(3)));
        assert!(belongs(Some("a a a c b b b"), &sample(4)));
    }
}
