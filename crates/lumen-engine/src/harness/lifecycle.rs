use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Platform notification about the application's visibility.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleEvent {
    /// The app moved to the background; drawing must stop.
    EnteredBackground,
    /// The app is visible again; drawing may resume.
    EnteredForeground,
}

/// Bounded queue carrying lifecycle notifications into the frame loop.
///
/// Platform code may push from any thread; the dispatcher drains it at the
/// start of each frame, so GPU state is never touched mid-draw. When full, the
/// oldest notification is dropped: only the most recent transitions matter.
#[derive(Debug, Clone)]
pub struct LifecycleQueue {
    inner: Arc<Mutex<VecDeque<LifecycleEvent>>>,
    capacity: usize,
}

impl LifecycleQueue {
    pub const DEFAULT_CAPACITY: usize = 8;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, event: LifecycleEvent) {
        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() == self.capacity {
            let dropped = queue.pop_front();
            log::warn!("lifecycle queue full, dropping {dropped:?}");
        }
        queue.push_back(event);
    }

    /// Takes every pending notification in arrival order.
    pub fn drain(&self) -> Vec<LifecycleEvent> {
        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }
}

impl Default for LifecycleQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Optional platform capability invoked when drawing is gated.
///
/// Platforms that must release or park GPU resources while in the background
/// install one on the dispatcher. Without a hook only the draw gate applies.
pub trait SuspendHook<G> {
    fn suspend(&mut self, gpu: &mut G);
    fn resume(&mut self, gpu: &mut G);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let queue = LifecycleQueue::default();
        queue.push(LifecycleEvent::EnteredBackground);
        queue.push(LifecycleEvent::EnteredForeground);
        assert_eq!(
            queue.drain(),
            vec![LifecycleEvent::EnteredBackground, LifecycleEvent::EnteredForeground]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn full_queue_drops_oldest() {
        let queue = LifecycleQueue::new(2);
        queue.push(LifecycleEvent::EnteredBackground);
        queue.push(LifecycleEvent::EnteredForeground);
        queue.push(LifecycleEvent::EnteredBackground);
        assert_eq!(
            queue.drain(),
            vec![LifecycleEvent::EnteredForeground, LifecycleEvent::EnteredBackground]
        );
    }

    #[test]
    fn clones_share_the_queue_across_threads() {
        let queue = LifecycleQueue::default();
        let producer = queue.clone();
        std::thread::spawn(move || producer.push(LifecycleEvent::EnteredBackground))
            .join()
            .unwrap();
        assert_eq!(queue.drain(), vec![LifecycleEvent::EnteredBackground]);
    }
}
