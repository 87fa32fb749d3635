//! Request-scoped set of movie ids that have already been emitted.

use std::collections::HashSet;
use std::sync::Arc;

use omdb_client::MovieId;
use parking_lot::Mutex;

/// Ids already accepted within one top-level request.
///
/// Cloning shares the same underlying set, so every axis of a relation
/// search sees the others' picks. A new request gets a new `DedupSet`.
#[derive(Debug, Clone, Default)]
pub struct DedupSet {
    seen: Arc<Mutex<HashSet<MovieId>>>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `ids` already marked (e.g. the relation-search seed)
    pub fn with_seen<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MovieId>,
    {
        Self {
            seen: Arc::new(Mutex::new(ids.into_iter().collect())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.lock().contains(id)
    }

    /// Mark `id` as seen. Returns false if it was already there.
    ///
    /// The check and the insert happen under one lock, so two concurrent
    /// claims of the same id cannot both succeed.
    pub fn claim(&self, id: &str) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(id) {
            return false;
        }
        seen.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_claim_only_once() {
        let set = DedupSet::new();
        assert!(set.claim("tt1"));
        assert!(!set.claim("tt1"));
        assert!(set.contains("tt1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_with_seen_marks_seed() {
        let set = DedupSet::with_seen(["tt-seed".to_string()]);
        assert!(set.contains("tt-seed"));
        assert!(!set.claim("tt-seed"));
    }

    #[test]
    fn test_clones_share_state() {
        let genre_view = DedupSet::new();
        let director_view = genre_view.clone();

        assert!(genre_view.claim("tt7"));
        assert!(!director_view.claim("tt7"));
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let set = DedupSet::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let set = set.clone();
                thread::spawn(move || set.claim("tt-race"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
