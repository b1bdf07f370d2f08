use tokio::sync::watch;

/// A value cell that notifies subscribers on every `set`.
///
/// Backed by a `watch` channel: readers always see the latest value and a
/// subscriber that falls behind only observes the newest state.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replaces the value and notifies subscribers, even with none attached.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
