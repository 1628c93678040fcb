//! Whole-document reconciliation of annotation values

use rstest::rstest;
use bootls::collect::BatchingCollector;
use bootls::reconcile::{
    DocumentReconciler, Problem, ProblemKind, ReconcileOutcome, RegionLanguage, ValidationSettings,
};
use tokio_util::sync::CancellationToken;

const SOURCE: &str = r##"
@Component
class Jobs {
    @Scheduled(cron = "0 0 25 * * *")
    void run() {}

    @Value("#{1 +}")
    int limit;

    @Query("SELECT u FROM User u WHERE u.id = :#{#id +}")
    User find();
}
"##;

fn offset_of(needle: &str) -> u32 {
    SOURCE.find(needle).unwrap() as u32
}

fn reconcile(settings: ValidationSettings) -> Vec<Problem> {
    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(settings);
    let mut problems: Vec<Problem> = Vec::new();
    reconciler.reconcile(SOURCE, &mut problems, &CancellationToken::new());
    problems
}

#[test]
fn test_problems_land_at_document_offsets() {
    let problems = reconcile(ValidationSettings::default());
    let found: Vec<_> = problems
        .iter()
        .map(|p| (p.kind, u32::from(p.offset()), u32::from(p.len())))
        .collect();
    assert_eq!(
        found,
        vec![
            (ProblemKind::CronField, offset_of("0 0 25") + 4, 2),
            (ProblemKind::SpelSyntax, offset_of("1 +") + 3, 0),
            (ProblemKind::SpelSyntax, offset_of("#id +") + 5, 0),
        ]
    );
}

#[rstest]
#[case(RegionLanguage::Cron, vec![ProblemKind::SpelSyntax, ProblemKind::SpelSyntax])]
#[case(RegionLanguage::Spel, vec![ProblemKind::CronField])]
#[case(RegionLanguage::Jpql, vec![ProblemKind::CronField, ProblemKind::SpelSyntax])]
#[case(RegionLanguage::Placeholder, vec![ProblemKind::CronField, ProblemKind::SpelSyntax, ProblemKind::SpelSyntax])]
fn test_disabled_language(#[case] language: RegionLanguage, #[case] expected: Vec<ProblemKind>) {
    let problems = reconcile(ValidationSettings::default().with_language(language, false));
    let kinds: Vec<_> = problems.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, expected);
}

#[rstest]
#[case(false, 1)]
#[case(true, 3)]
fn test_checkpoint_batches(#[case] checkpoints: bool, #[case] batches: usize) {
    let reconciler = DocumentReconciler::default();
    reconciler.apply_settings(ValidationSettings::default().with_checkpoints(checkpoints));
    let mut collector = BatchingCollector::<Problem>::new();
    let report = reconciler.reconcile(SOURCE, &mut collector, &CancellationToken::new());

    assert_eq!(report.outcome, ReconcileOutcome::Completed { reported: 3 });
    assert!(collector.is_finished());
    assert_eq!(collector.batches().len(), batches);
    assert_eq!(collector.published().count(), 3);
}

#[test]
fn test_cancelled_document_publishes_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut collector = BatchingCollector::<Problem>::new();
    let report = DocumentReconciler::default().reconcile(SOURCE, &mut collector, &cancel);

    assert_eq!(report.outcome, ReconcileOutcome::Cancelled);
    assert!(collector.is_finished());
    assert_eq!(collector.published().count(), 0);
}

#[test]
fn test_settings_round_trip_through_reconciler() {
    let reconciler = DocumentReconciler::default();
    let settings = ValidationSettings::default()
        .with_language(RegionLanguage::Jpql, false)
        .with_checkpoints(true);
    reconciler.apply_settings(settings.clone());
    assert_eq!(reconciler.settings(), settings);
    assert!(!reconciler.reconcilers().get(RegionLanguage::Jpql).is_enabled());
}
