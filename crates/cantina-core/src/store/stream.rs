// ── Store subscriptions ──
//
// Consumers either poll snapshots or await changes. `StoreStream` gives
// both; `into_stream` adapts it to `futures_core::Stream`.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::collection::CollectionSnapshot;
use crate::model::Resource;

/// A subscription to one store's collection.
pub struct StoreStream<T: Resource> {
    current: CollectionSnapshot<T>,
    receiver: watch::Receiver<CollectionSnapshot<T>>,
}

impl<T: Resource> StoreStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<CollectionSnapshot<T>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// Snapshot as of creation or the last `changed()`.
    pub fn current(&self) -> &CollectionSnapshot<T> {
        &self.current
    }

    /// Latest snapshot, which may be newer than `current()`.
    pub fn latest(&self) -> CollectionSnapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next mutation. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<CollectionSnapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    pub fn into_stream(self) -> SnapshotStream<T> {
        SnapshotStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` of collection snapshots. Yields the current snapshot first,
/// then one item per observed mutation (intermediate states may be
/// coalesced).
pub struct SnapshotStream<T: Resource> {
    inner: WatchStream<CollectionSnapshot<T>>,
}

impl<T: Resource> Stream for SnapshotStream<T> {
    type Item = CollectionSnapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use cantina_api::Pagination;
    use tokio_test::{assert_pending, assert_ready, task};

    use super::*;
    use crate::store::collection::ResourceCache;
    use crate::store::collection::tests::{Widget, widget};

    #[test]
    fn changed_wakes_on_mutation() {
        let cache: ResourceCache<Widget> = ResourceCache::new();
        let mut stream = StoreStream::new(cache.subscribe());
        assert!(stream.current().is_empty());

        {
            let mut changed = task::spawn(stream.changed());
            assert_pending!(changed.poll());

            cache.replace_page(
                Arc::new(vec![Arc::new(widget("w1", "Coxinha"))]),
                Pagination::single(1),
            );
            assert!(changed.is_woken());
            let snapshot = assert_ready!(changed.poll()).unwrap();
            assert_eq!(snapshot.len(), 1);
        }

        assert_eq!(stream.current().len(), 1);
        assert_eq!(stream.latest().len(), 1);
    }

    #[test]
    fn changed_ends_when_store_drops() {
        let cache: ResourceCache<Widget> = ResourceCache::new();
        let mut stream = StoreStream::new(cache.subscribe());
        drop(cache);

        let mut changed = task::spawn(stream.changed());
        assert!(assert_ready!(changed.poll()).is_none());
    }
}
