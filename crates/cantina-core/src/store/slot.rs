// ── Reactive value slot ──
//
// Holds the entity-specific state a store keeps beside its collection
// (balance history, movements, summaries, ...). Same watch-channel model
// as the collection cache, for a single value.

use tokio::sync::watch;

pub struct Slot<T> {
    tx: watch::Sender<T>,
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Slot<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Slot<T> {
    pub fn clear(&self) {
        self.tx.send_replace(T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_notifies_subscribers() {
        let slot: Slot<Vec<u8>> = Slot::default();
        let mut rx = slot.subscribe();
        slot.set(vec![1, 2]);
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow_and_update(), vec![1, 2]);
        slot.clear();
        assert!(slot.get().is_empty());
    }
}
