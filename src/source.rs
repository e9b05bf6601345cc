use std::path::PathBuf;

use anyhow::Context;

use crate::grammar::Grammar;
use crate::log::log;

/// Where grammar definitions come from.
///
/// Any failure (missing, unreadable, malformed) is reported as `None`;
/// callers cannot tell the causes apart.
pub trait GrammarSource {
    fn fetch(&self, id: &str) -> Option<Grammar>;
}

/// Reads `<root>/<id>.json`.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirectorySource { root: root.into() }
    }

    fn load(&self, id: &str) -> Result<Grammar, anyhow::Error> {
        if !is_plain_id(id) {
            anyhow::bail!("grammar id `{id}` is not a plain name");
        }

        let path = self.root.join(format!("{id}.json"));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("trying to read grammar file {}", path.to_string_lossy()))?;

        serde_json::from_str::<Grammar>(&content).context("trying to decode grammar definition")
    }
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(&['/', '\\'][..])
}

impl GrammarSource for DirectorySource {
    fn fetch(&self, id: &str) -> Option<Grammar> {
        match self.load(id) {
            Ok(grammar) => Some(grammar),
            Err(e) => {
                log!(Warn, "grammar `{id}` unavailable: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
pub use memory::MemorySource;
