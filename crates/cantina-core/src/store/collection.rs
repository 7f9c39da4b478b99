// ── Reactive collection cache ──
//
// One watch channel carries the whole visible state of a collection: the
// cached page, the current item, and pagination. Every mutation goes
// through `send_modify`, so readers never observe a half-applied patch.
// Items are `Arc`-shared; a patch clones the item vector only if a reader
// still holds the previous snapshot.

use std::sync::Arc;

use cantina_api::Pagination;
use tokio::sync::watch;

use crate::model::{Resource, ResourceId};

/// Where `create` places a new resource in the cached page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertAt {
    #[default]
    Front,
    Back,
}

/// Point-in-time view of a store's collection.
#[derive(Debug)]
pub struct CollectionSnapshot<T> {
    pub items: Arc<Vec<Arc<T>>>,
    pub current: Option<Arc<T>>,
    pub pagination: Pagination,
}

impl<T> Clone for CollectionSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            current: self.current.clone(),
            pagination: self.pagination,
        }
    }
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            current: None,
            pagination: Pagination::default(),
        }
    }
}

impl<T: Resource> CollectionSnapshot<T> {
    pub fn find(&self, id: &ResourceId) -> Option<Arc<T>> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn position(&self, id: &ResourceId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

impl<T> CollectionSnapshot<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Watch-backed cache of one page of resources plus the current item.
pub struct ResourceCache<T: Resource> {
    tx: watch::Sender<CollectionSnapshot<T>>,
}

impl<T: Resource> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ResourceCache<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(CollectionSnapshot::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot<T>> {
        self.tx.subscribe()
    }

    // ── Whole-page updates ───────────────────────────────────────────

    /// Replace the cached page and its pagination. The current item is kept.
    pub fn replace_page(&self, items: Arc<Vec<Arc<T>>>, pagination: Pagination) {
        self.tx.send_modify(|snap| {
            snap.items = items;
            snap.pagination = pagination;
        });
    }

    pub fn reset(&self) {
        self.tx.send_replace(CollectionSnapshot::default());
    }

    // ── Current item ─────────────────────────────────────────────────

    pub fn set_current(&self, item: Arc<T>) {
        self.tx.send_modify(|snap| snap.current = Some(item));
    }

    pub fn clear_current(&self) {
        self.tx.send_if_modified(|snap| snap.current.take().is_some());
    }

    // ── Identity patches ─────────────────────────────────────────────

    /// Add a newly created resource. `total` moves only when `track_total`.
    pub fn insert(&self, item: Arc<T>, at: InsertAt, track_total: bool) {
        self.tx.send_modify(|snap| {
            let items = Arc::make_mut(&mut snap.items);
            match at {
                InsertAt::Front => items.insert(0, item),
                InsertAt::Back => items.push(item),
            }
            if track_total {
                snap.pagination.total = snap.pagination.total.saturating_add(1);
            }
        });
    }

    /// Swap in a fresh copy of the resource with identity `id`, in the page
    /// and in the current slot. Returns `true` if the page held it.
    ///
    /// An id that is not cached (e.g. it lives on another page) leaves the
    /// page untouched.
    pub fn replace(&self, id: &ResourceId, item: &Arc<T>) -> bool {
        self.replace_where(|cached| cached.id() == id, item, None)
    }

    /// Replace the first cached resource matching `matches`, and the current
    /// item if it matches. When nothing in the page matches and `insert` is
    /// set, the item is added there instead.
    pub fn replace_where<F>(&self, matches: F, item: &Arc<T>, insert: Option<InsertAt>) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut found = false;
        self.tx.send_modify(|snap| {
            let position = snap.items.iter().position(|cached| matches(cached.as_ref()));
            match (position, insert) {
                (Some(index), _) => {
                    Arc::make_mut(&mut snap.items)[index] = Arc::clone(item);
                    found = true;
                }
                (None, Some(InsertAt::Front)) => {
                    Arc::make_mut(&mut snap.items).insert(0, Arc::clone(item));
                }
                (None, Some(InsertAt::Back)) => {
                    Arc::make_mut(&mut snap.items).push(Arc::clone(item));
                }
                (None, None) => {}
            }
            if snap.current.as_deref().is_some_and(&matches) {
                snap.current = Some(Arc::clone(item));
            }
        });
        found
    }

    /// Drop the resource with identity `id` from the page and the current
    /// slot. With `track_total` the total is decremented whether or not the
    /// page held the resource, since the server-side count still changed.
    pub fn remove(&self, id: &ResourceId, track_total: bool) -> bool {
        let mut found = false;
        self.tx.send_modify(|snap| {
            if let Some(index) = snap.items.iter().position(|cached| cached.id() == id) {
                Arc::make_mut(&mut snap.items).remove(index);
                found = true;
            }
            if snap.current.as_ref().is_some_and(|c| c.id() == id) {
                snap.current = None;
            }
            if track_total {
                snap.pagination.total = snap.pagination.total.saturating_sub(1);
            }
        });
        found
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Widget {
        pub id: ResourceId,
        pub name: String,
    }

    impl Resource for Widget {
        fn id(&self) -> &ResourceId {
            &self.id
        }
    }

    pub(crate) fn widget(id: &str, name: &str) -> Widget {
        Widget {
            id: id.into(),
            name: name.into(),
        }
    }

    fn page(cache: &ResourceCache<Widget>, names: &[(&str, &str)]) {
        let items = names.iter().map(|(id, n)| Arc::new(widget(id, n))).collect();
        cache.replace_page(
            Arc::new(items),
            Pagination::new(1, 10, u64::try_from(names.len()).unwrap(), 1),
        );
    }

    fn ids(cache: &ResourceCache<Widget>) -> Vec<String> {
        cache
            .snapshot()
            .items
            .iter()
            .map(|w| w.id.to_string())
            .collect()
    }

    #[test]
    fn insert_front_and_back() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A")]);
        cache.insert(Arc::new(widget("b", "B")), InsertAt::Front, false);
        cache.insert(Arc::new(widget("c", "C")), InsertAt::Back, true);
        assert_eq!(ids(&cache), ["b", "a", "c"]);
        assert_eq!(cache.snapshot().pagination.total, 2);
    }

    #[test]
    fn replace_missing_id_is_a_no_op() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A"), ("b", "B")]);
        let before = cache.snapshot();
        assert!(!cache.replace(&"id-5".into(), &Arc::new(widget("id-5", "X"))));
        let after = cache.snapshot();
        assert_eq!(before.items, after.items);
    }

    #[test]
    fn replace_patches_page_and_current() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A"), ("b", "B")]);
        cache.set_current(Arc::new(widget("b", "B")));
        assert!(cache.replace(&"b".into(), &Arc::new(widget("b", "B2"))));
        let snap = cache.snapshot();
        assert_eq!(snap.items[1].name, "B2");
        assert_eq!(snap.current.unwrap().name, "B2");
    }

    #[test]
    fn remove_clears_matching_current() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A"), ("b", "B")]);
        cache.set_current(Arc::new(widget("a", "A")));
        assert!(cache.remove(&"a".into(), true));
        let snap = cache.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap.current.is_none());
        assert_eq!(snap.pagination.total, 1);
    }

    #[test]
    fn remove_absent_id_keeps_items() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A")]);
        assert!(!cache.remove(&"zz".into(), false));
        assert_eq!(ids(&cache), ["a"]);
        assert_eq!(cache.snapshot().pagination.total, 1);
    }

    #[test]
    fn held_snapshot_is_not_mutated() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A")]);
        let held = cache.snapshot();
        cache.insert(Arc::new(widget("b", "B")), InsertAt::Front, false);
        assert_eq!(held.len(), 1);
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[test]
    fn replace_where_can_insert() {
        let cache = ResourceCache::new();
        page(&cache, &[("a", "A")]);
        let found = cache.replace_where(
            |w| w.name == "Z",
            &Arc::new(widget("z", "Z")),
            Some(InsertAt::Front),
        );
        assert!(!found);
        assert_eq!(ids(&cache), ["z", "a"]);
    }
}
