use std::sync::Arc;

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::collect::{BatchingCollector, Collector};
use crate::reconcile::{
    DocumentReconciler, Problem, ProblemKind, ReconcileOutcome, RegionLanguage,
    ValidationSettings,
};

const SOURCE: &str = r##"
@Component
class Jobs {
    @Scheduled(cron = "0 0 0 8 * MAR-JUL")
    void monthly() {}

    @Value("${app..name}")
    String name;

    @Query("SELECT e FROM Employee e WHERE e.active = true")
    List<Employee> active();
}
"##;

fn offset_of(needle: &str) -> u32 {
    SOURCE.find(needle).unwrap() as u32
}

#[test]
fn test_problems_at_document_offsets() {
    let reconciler = DocumentReconciler::default();
    let mut problems: Vec<Problem> = Vec::new();
    let report = reconciler.reconcile(SOURCE, &mut problems, &CancellationToken::new());

    assert_eq!(report.regions, 3);
    assert_eq!(report.faulted_regions, 0);
    assert_eq!(report.outcome, ReconcileOutcome::Completed { reported: 2 });

    let cron = offset_of("0 0 0 8");
    let placeholder = offset_of("app..name");
    assert_eq!(problems[0].kind, ProblemKind::CronField);
    assert_eq!(u32::from(problems[0].offset()), cron + 10);
    assert_eq!(problems[1].kind, ProblemKind::PlaceholderSyntax);
    assert_eq!(u32::from(problems[1].offset()), placeholder + 4);
}

#[test]
fn test_checkpoints_publish_a_batch_per_region() {
    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(ValidationSettings::default().with_checkpoints(true));
    let mut collector = BatchingCollector::<Problem>::new();
    reconciler.reconcile(SOURCE, &mut collector, &CancellationToken::new());

    assert!(collector.is_finished());
    assert_eq!(collector.batches().len(), 2);
    assert_eq!(collector.batches()[0][0].kind, ProblemKind::CronField);
    assert_eq!(collector.batches()[1][0].kind, ProblemKind::PlaceholderSyntax);
}

#[test]
fn test_without_checkpoints_one_batch() {
    let reconciler = DocumentReconciler::default();
    let mut collector = BatchingCollector::<Problem>::new();
    reconciler.reconcile(SOURCE, &mut collector, &CancellationToken::new());
    assert_eq!(collector.batches().len(), 1);
    assert_eq!(collector.published().count(), 2);
}

#[test]
fn test_disabled_language_is_skipped() {
    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(
        ValidationSettings::default().with_language(RegionLanguage::Cron, false),
    );
    let mut problems: Vec<Problem> = Vec::new();
    reconciler.reconcile(SOURCE, &mut problems, &CancellationToken::new());
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].kind, ProblemKind::PlaceholderSyntax);
    assert!(!reconciler.settings().cron);
}

#[test]
fn test_cancelled_document_publishes_nothing() {
    let reconciler = DocumentReconciler::default();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut collector = BatchingCollector::<Problem>::new();
    let report = reconciler.reconcile(SOURCE, &mut collector, &cancel);

    assert_eq!(report.outcome, ReconcileOutcome::Cancelled);
    assert!(collector.is_finished());
    assert_eq!(collector.published().count(), 0);
}

#[test]
fn test_oversized_region_is_masked() {
    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(ValidationSettings::default().with_max_region_len(12));
    let mut problems: Vec<Problem> = Vec::new();
    let report = reconciler.reconcile(SOURCE, &mut problems, &CancellationToken::new());

    // the cron expression and the query exceed the limit
    assert_eq!(report.faulted_regions, 2);
    assert!(report.outcome.is_completed());
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].kind, ProblemKind::PlaceholderSyntax);
}

#[test]
fn test_collector_lifecycle() {
    #[derive(Default)]
    struct Recording {
        events: Vec<&'static str>,
    }

    impl Collector<Problem> for Recording {
        fn begin_collecting(&mut self) {
            self.events.push("begin");
        }

        fn end_collecting(&mut self) {
            self.events.push("end");
        }

        fn accept(&mut self, _item: Problem) {
            self.events.push("accept");
        }

        fn checkpoint_collecting(&mut self) {
            self.events.push("checkpoint");
        }
    }

    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(ValidationSettings::default().with_checkpoints(true));
    let mut recording = Recording::default();
    reconciler.reconcile(SOURCE, &mut recording, &CancellationToken::new());
    assert_eq!(
        recording.events,
        vec![
            "begin",
            "accept",
            "checkpoint",
            "accept",
            "checkpoint",
            "checkpoint",
            "end"
        ]
    );
}

#[test]
fn test_reconcile_all_in_parallel() {
    let reconciler = DocumentReconciler::default();
    let documents: Vec<(SmolStr, Arc<str>)> = vec![
        (SmolStr::new("file:///Jobs.java"), Arc::from(SOURCE)),
        (
            SmolStr::new("file:///Clean.java"),
            Arc::from(r##"@Scheduled(cron = "0 0 * * * *") void f() {}"##),
        ),
    ];
    let results = reconciler.reconcile_all(&documents, &CancellationToken::new());

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].uri, "file:///Jobs.java");
    assert_eq!(results[0].problems.len(), 2);
    assert_eq!(results[1].uri, "file:///Clean.java");
    assert!(results[1].problems.is_empty());
    assert_eq!(results[1].report.regions, 1);
}
