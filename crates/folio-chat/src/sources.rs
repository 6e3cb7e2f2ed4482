use folio_llm::WebSource;
use std::collections::HashSet;

use crate::types::GroundingSource;

/// Collects citations across a stream, unique by uri
///
/// The first candidate seen for a uri is kept (title included) and later
/// duplicates are dropped. Output keeps first-seen order.
#[derive(Debug, Default)]
pub struct SourceCollector {
    sources: Vec<GroundingSource>,
    seen: HashSet<String>,
}

impl SourceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the candidate was valid and new
    pub fn push(&mut self, candidate: WebSource) -> bool {
        let Some(source) = GroundingSource::from_candidate(candidate) else {
            return false;
        };
        if !self.seen.insert(source.uri.clone()) {
            return false;
        }
        self.sources.push(source);
        true
    }

    pub fn extend(&mut self, candidates: impl IntoIterator<Item = WebSource>) {
        for candidate in candidates {
            self.push(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The deduplicated batch, or None when nothing valid was collected
    pub fn finish(self) -> Option<Vec<GroundingSource>> {
        (!self.sources.is_empty()).then_some(self.sources)
    }
}
