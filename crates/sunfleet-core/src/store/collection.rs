// ── Generic reactive entity collection ──
//
// Keyed concurrent lookups plus an ordered snapshot broadcast over a
// `watch` channel. Order matters here (alerts are newest first), so the
// snapshot keeps the order in which entities were applied rather than
// map iteration order.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A reactive collection for a single entity type.
///
/// `DashMap` gives O(1) lookups by key; every replacement bumps a version
/// counter and rebuilds the snapshot that subscribers receive.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    by_key: DashMap<String, Arc<T>>,

    /// Bumped on every mutation.
    version: watch::Sender<u64>,

    /// Ordered snapshot, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the whole collection with `entries`, in order.
    pub(crate) fn replace_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mut ordered = Vec::new();
        self.by_key.clear();
        for (key, entity) in entries {
            let entity = Arc::new(entity);
            self.by_key.insert(key, Arc::clone(&entity));
            ordered.push(entity);
        }

        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(ordered));
        self.version.send_modify(|v| *v += 1);
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<T>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[("c", "third"), ("a", "first"), ("b", "second")]));

        let snap = col.snapshot();
        let values: Vec<&str> = snap.iter().map(|s| s.as_str()).collect();
        assert_eq!(values, vec!["third", "first", "second"]);
    }

    #[test]
    fn replace_drops_stale_keys() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[("a", "x"), ("b", "y")]));
        col.replace_all(entries(&[("b", "z")]));

        assert!(col.get("a").is_none());
        assert_eq!(*col.get("b").unwrap(), "z");
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn every_replace_bumps_version() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert_eq!(col.version(), 0);
        col.replace_all(entries(&[("a", "x")]));
        col.replace_all(entries(&[("a", "x")]));
        assert_eq!(col.version(), 2);
    }

    #[test]
    fn empty_replace_clears() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[("a", "x")]));
        col.replace_all(Vec::new());
        assert_eq!(col.len(), 0);
        assert!(col.snapshot().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let col: EntityCollection<String> = EntityCollection::new();
        let mut rx = col.subscribe();

        col.replace_all(entries(&[("a", "x")]));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
