//! Collectors: sinks for positioned findings.
//!
//! Every producer of findings (reconcilers, symbol providers, code action
//! providers) reports into a [`Collector`]. A collecting session is:
//!
//! ```text
//! begin_collecting  (exactly once)
//!   accept*         (zero or more)
//!   checkpoint*     (zero or more, optional for both sides)
//! end_collecting    (exactly once, terminal)
//! ```
//!
//! Calling `accept` after `end_collecting` is a programming error. The
//! implementations here do not guard against it.

mod batching;

pub use batching::BatchingCollector;

/// A sink for findings of type `T`.
pub trait Collector<T> {
    /// Called once before any finding is reported.
    fn begin_collecting(&mut self);

    /// Called once after the last finding; terminal.
    fn end_collecting(&mut self);

    /// Report one finding.
    fn accept(&mut self, item: T);

    /// Optional safe point between begin and end.
    ///
    /// Producers may call this any number of times to let the consumer
    /// process the findings reported so far without ending the session.
    /// Consumers that support it must handle repeated calls.
    fn checkpoint_collecting(&mut self) {}
}

/// Collector that discards everything passed to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCollector;

impl<T> Collector<T> for NullCollector {
    fn begin_collecting(&mut self) {}

    fn end_collecting(&mut self) {}

    fn accept(&mut self, _item: T) {}
}

/// Collector appending every finding to a backing vector.
///
/// Begin and end are no-ops.
#[derive(Debug)]
pub struct BasicCollector<'a, T> {
    items: &'a mut Vec<T>,
}

impl<'a, T> BasicCollector<'a, T> {
    pub fn new(items: &'a mut Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Collector<T> for BasicCollector<'_, T> {
    fn begin_collecting(&mut self) {}

    fn end_collecting(&mut self) {}

    fn accept(&mut self, item: T) {
        self.items.push(item);
    }
}

impl<T> Collector<T> for Vec<T> {
    fn begin_collecting(&mut self) {}

    fn end_collecting(&mut self) {}

    fn accept(&mut self, item: T) {
        self.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_three(collector: &mut dyn Collector<u32>) {
        collector.begin_collecting();
        collector.accept(1);
        collector.accept(2);
        collector.checkpoint_collecting();
        collector.accept(3);
        collector.end_collecting();
    }

    #[test]
    fn test_basic_collector_preserves_order() {
        let mut items = Vec::new();
        report_three(&mut BasicCollector::new(&mut items));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_null_collector_discards() {
        let mut collector = NullCollector;
        report_three(&mut collector);
    }

    #[test]
    fn test_vec_is_a_collector() {
        let mut items: Vec<u32> = Vec::new();
        report_three(&mut items);
        assert_eq!(items.len(), 3);
    }
}
