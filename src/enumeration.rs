use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use serde_derive::Deserialize;

use crate::grammar::{serialize_form, ProductionTable, SententialForm, Symbol};

/// Independent limits of one enumeration run.
///
/// `max_depth` is inclusive: a form reached after exactly `max_depth` rewrites
/// is still inspected, forms deeper than that are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub max_depth: usize,
    pub max_words: usize,
    pub max_tokens: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_words: 1000,
            max_tokens: 30,
        }
    }
}

/// Deduplicated words. Equality is set equality; iteration follows discovery order.
#[derive(Clone, Debug, Default)]
pub struct WordSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl WordSet {
    pub fn insert(&mut self, word: String) -> bool {
        if self.members.contains(&word) {
            return false;
        }
        self.members.insert(word.clone());
        self.order.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl PartialEq for WordSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for WordSet {}

impl<S: Into<String>> FromIterator<S> for WordSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut words = WordSet::default();
        for word in iter {
            words.insert(word.into());
        }
        words
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    pub dequeued: usize,
    pub expanded: usize,
    pub dead_ends: usize,
    pub pruned_depth: usize,
    pub pruned_length: usize,
    pub duplicates: usize,
    /// Length of the longest rewritten form that made it into the queue.
    pub longest_form: usize,
}

#[derive(Clone, Debug)]
pub struct Enumeration {
    pub words: WordSet,
    /// Some branch was cut by a bound, or the run stopped with work left.
    pub truncated: bool,
    pub cancelled: bool,
    pub stats: EnumerationStats,
}

/// Cooperative stop signal, polled once per dequeued entry.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    pub fn new(flag: Option<Arc<AtomicBool>>, time_limit: Option<Duration>) -> Self {
        Cancellation {
            flag,
            // a deadline past what `Instant` can represent never fires
            deadline: time_limit.and_then(|limit| Instant::now().checked_add(limit)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        let flagged = self
            .flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::SeqCst));

        flagged || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
pub fn enumerate(table: &ProductionTable, start: SententialForm, bounds: Bounds) -> Enumeration {
    enumerate_with(table, start, bounds, &Cancellation::default())
}

/// Breadth-first, leftmost-first expansion of `start`.
///
/// Termination on recursive grammars comes from the per-run visited set
/// together with the three bounds. Branches cut by a bound vanish silently.
pub fn enumerate_with(
    table: &ProductionTable,
    start: SententialForm,
    bounds: Bounds,
    cancellation: &Cancellation,
) -> Enumeration {
    let mut queue: VecDeque<(SententialForm, usize)> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut words = WordSet::default();
    let mut stats = EnumerationStats::default();
    let mut cancelled = false;

    visited.insert(serialize_form(&start));
    queue.push_back((start, 0));

    while words.len() < bounds.max_words {
        if cancellation.is_cancelled() {
            cancelled = true;
            break;
        }

        let Some((form, depth)) = queue.pop_front() else {
            break;
        };
        stats.dequeued += 1;

        if depth > bounds.max_depth {
            stats.pruned_depth += 1;
            continue;
        }

        let Some(position) = leftmost_non_terminal(table, &form) else {
            words.insert(serialize_form(&form));
            continue;
        };

        let alternatives = table.alternatives(&form[position]).unwrap_or_default();
        if alternatives.is_empty() {
            stats.dead_ends += 1;
            continue;
        }
        stats.expanded += 1;

        for alternative in alternatives {
            if form.len() - 1 + alternative.len() > bounds.max_tokens {
                stats.pruned_length += 1;
                continue;
            }

            let candidate = rewrite(&form, position, alternative);
            if !visited.insert(serialize_form(&candidate)) {
                stats.duplicates += 1;
                continue;
            }

            stats.longest_form = stats.longest_form.max(candidate.len());
            queue.push_back((candidate, depth + 1));
        }
    }

    let truncated = cancelled
        || stats.pruned_depth > 0
        || stats.pruned_length > 0
        || !queue.is_empty();

    Enumeration {
        words,
        truncated,
        cancelled,
        stats,
    }
}

fn leftmost_non_terminal(table: &ProductionTable, form: &[Symbol]) -> Option<usize> {
    form.iter().position(|symbol| table.is_non_terminal(symbol))
}

fn rewrite(form: &[Symbol], position: usize, alternative: &[Symbol]) -> SententialForm {
    let mut rewritten = Vec::with_capacity(form.len() - 1 + alternative.len());
    rewritten.extend_from_slice(&form[..position]);
    rewritten.extend_from_slice(alternative);
    rewritten.extend_from_slice(&form[position + 1..]);
    rewritten
}
