use std::{
    sync::{atomic::AtomicBool, Arc},
    time::{Duration, Instant},
};

use serde_derive::Serialize;

use crate::{
    enumeration::{enumerate_with, Bounds, Cancellation, Enumeration},
    grammar::{diagnostics::diagnose, Grammar, ProductionTable},
    log::log,
    membership::belongs,
    source::GrammarSource,
};

pub const ACKNOWLEDGEMENT: &str = "Grammar validator is up and running";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidateError {
    #[error("grammar `{0}` not found")]
    GrammarNotFound(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub grammar_id: String,
    pub start_symbol: String,
    pub generated_count: usize,
    pub generated_words: Vec<String>,
    pub word: Option<String>,
    pub belongs: bool,
    pub truncated: bool,
}

/// Per-request entry point: fetch a grammar, enumerate its bounded sample,
/// test a word against it. Every call rebuilds the sample with the bounds it is given.
pub struct Validator<S: GrammarSource> {
    source: S,
    interrupt: Option<Arc<AtomicBool>>,
    time_limit: Option<Duration>,
}

impl<S: GrammarSource> Validator<S> {
    pub fn new(source: S) -> Self {
        Validator {
            source,
            interrupt: None,
            time_limit: None,
        }
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn message(&self) -> &'static str {
        ACKNOWLEDGEMENT
    }

    pub fn generate(&self, id: &str, bounds: Bounds) -> Result<(Grammar, Enumeration), ValidateError> {
        let grammar = self
            .source
            .fetch(id)
            .ok_or_else(|| ValidateError::GrammarNotFound(id.to_string()))?;

        let table = ProductionTable::build(&grammar);
        log!(Debug, "grammar `{id}`: {} non-terminals", table.len());
        for warning in diagnose(&grammar, &table) {
            log!(Warn, "grammar `{id}`: {warning}");
        }

        let cancellation = Cancellation::new(self.interrupt.clone(), self.time_limit);
        let started = Instant::now();
        let enumeration = enumerate_with(&table, grammar.start_form(), bounds, &cancellation);

        if enumeration.cancelled {
            log!(Warn, "enumeration of `{id}` cancelled, returning partial sample");
        }
        if enumeration.words.is_empty() {
            log!(Warn, "grammar `{id}` produced no words within {bounds:?}");
        }
        log!(
            Info,
            "grammar `{}`: {} words in {}, truncated: {}",
            id,
            enumeration.words.len(),
            humantime::format_duration(started.elapsed()),
            enumeration.truncated
        );
        let stats = &enumeration.stats;
        log!(
            Debug,
            "grammar `{}`: dequeued {}, expanded {}, dead ends {}, pruned by depth {}, pruned by length {}, duplicates {}, longest form {} ({:?})",
            id,
            stats.dequeued,
            stats.expanded,
            stats.dead_ends,
            stats.pruned_depth,
            stats.pruned_length,
            stats.duplicates,
            stats.longest_form,
            bounds
        );

        Ok((grammar, enumeration))
    }

    pub fn validate(
        &self,
        id: &str,
        word: Option<&str>,
        bounds: Bounds,
    ) -> Result<ValidationReport, ValidateError> {
        let (grammar, enumeration) = self.generate(id, bounds)?;
        let belongs = belongs(word, &enumeration.words);

        Ok(ValidationReport {
            grammar_id: grammar.id,
            start_symbol: grammar.start_symbol,
            generated_count: enumeration.words.len(),
            generated_words: enumeration.words.into_vec(),
            word: word.map(str::to_string),
            belongs,
            truncated: enumeration.truncated,
        })
    }
}
