//! Collector that publishes findings in batches at checkpoints.

use super::Collector;

/// Buffers accepted findings and publishes them as a batch at every
/// checkpoint and at the end of the session.
///
/// This is the shape a diagnostics publisher takes: each published batch is
/// visible to the editor, pending findings are not.
#[derive(Debug)]
pub struct BatchingCollector<T> {
    pending: Vec<T>,
    published: Vec<Vec<T>>,
    active: bool,
    finished: bool,
}

impl<T> Default for BatchingCollector<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            published: Vec::new(),
            active: false,
            finished: false,
        }
    }
}

impl<T> BatchingCollector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches published so far, in publication order.
    pub fn batches(&self) -> &[Vec<T>] {
        &self.published
    }

    /// All published findings, flattened.
    pub fn published(&self) -> impl Iterator<Item = &T> {
        self.published.iter().flatten()
    }

    /// Findings accepted since the last checkpoint.
    pub fn pending(&self) -> &[T] {
        &self.pending
    }

    /// Whether `begin_collecting` was called and `end_collecting` was not yet.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the session has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn publish(&mut self) {
        if !self.pending.is_empty() {
            self.published.push(std::mem::take(&mut self.pending));
        }
    }
}

impl<T> Collector<T> for BatchingCollector<T> {
    fn begin_collecting(&mut self) {
        self.active = true;
        self.finished = false;
    }

    fn end_collecting(&mut self) {
        self.publish();
        self.active = false;
        self.finished = true;
    }

    fn accept(&mut self, item: T) {
        debug_assert!(!self.finished, "accept after end_collecting");
        self.pending.push(item);
    }

    fn checkpoint_collecting(&mut self) {
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_publishes_batch() {
        let mut collector = BatchingCollector::new();
        collector.begin_collecting();
        collector.accept("a");
        collector.accept("b");
        collector.checkpoint_collecting();
        assert_eq!(collector.batches(), &[vec!["a", "b"]]);
        assert!(collector.pending().is_empty());

        collector.accept("c");
        assert_eq!(collector.pending(), &["c"]);
        collector.end_collecting();

        assert_eq!(collector.batches().len(), 2);
        assert!(collector.is_finished());
        assert!(!collector.is_active());
    }

    #[test]
    fn test_empty_checkpoints_publish_nothing() {
        let mut collector: BatchingCollector<u8> = BatchingCollector::new();
        collector.begin_collecting();
        collector.checkpoint_collecting();
        collector.checkpoint_collecting();
        collector.end_collecting();
        assert!(collector.batches().is_empty());
    }
}
