//! Grammar-driven reconciliation
//!
//! A [`GrammarReconciler`] parses a region with one [`Grammar`], turns syntax
//! errors and validator findings into [`Problem`]s at absolute offsets, and
//! hands tokens carrying another language to an embedded reconciler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use text_size::TextSize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::{Problem, ProblemKind, ReconcileError, ReconcileOutcome, ReconcileSession};
use crate::collect::Collector;
use crate::syntax::{Parse, ParseError, SyntaxKind, SyntaxNode};

/// A micro-language: a parser plus optional post-parse checks
pub trait Grammar: Send + Sync {
    fn name(&self) -> &'static str;

    /// Kind tag for syntax problems of this language
    fn syntax_problem(&self) -> ProblemKind;

    fn parse(&self, text: &str, cancel: &CancellationToken) -> Result<Parse, ParseError>;

    /// Findings on a parsed tree, with offsets relative to the region
    fn validate(&self, _root: &SyntaxNode, _problems: &mut Vec<Problem>) {}
}

/// Validates a region of text and reports problems to a collector
pub trait Reconciler: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// Reconcile `text`, which starts at absolute offset `start`, into `session`
    fn reconcile_in(
        &self,
        text: &str,
        start: TextSize,
        session: &mut ReconcileSession<'_>,
    ) -> Result<(), ReconcileError>;

    /// Run one invocation against `collector`
    ///
    /// Does not call `begin_collecting`/`end_collecting`; the caller owns the
    /// collector's lifecycle. Faults never propagate: they are logged and
    /// reported as [`ReconcileOutcome::Faulted`] with nothing published.
    fn reconcile(
        &self,
        text: &str,
        start: TextSize,
        collector: &mut dyn Collector<Problem>,
        cancel: &CancellationToken,
    ) -> ReconcileOutcome {
        if !self.is_enabled() {
            trace!(reconciler = self.name(), "disabled, skipping");
            return ReconcileOutcome::Disabled;
        }
        let mut session = ReconcileSession::new(collector, cancel);
        match self.reconcile_in(text, start, &mut session) {
            Ok(()) => ReconcileOutcome::Completed {
                reported: session.commit(),
            },
            Err(ReconcileError::Cancelled) => {
                session.discard();
                debug!(reconciler = self.name(), "reconcile cancelled");
                ReconcileOutcome::Cancelled
            }
            Err(error) => {
                session.discard();
                warn!(reconciler = self.name(), %error, "reconcile fault masked");
                ReconcileOutcome::Faulted(error)
            }
        }
    }
}

/// A token kind whose content is reconciled by another reconciler
///
/// The content is the token text without `open_len` leading and `close_len`
/// trailing delimiter bytes, e.g. `${key}` with 2 and 1.
#[derive(Clone)]
pub struct EmbeddedGrammar {
    pub token: SyntaxKind,
    pub open_len: u32,
    pub close_len: u32,
    pub reconciler: Arc<dyn Reconciler>,
}

pub struct GrammarReconciler<G> {
    grammar: G,
    enabled: AtomicBool,
    report_unrecognized: bool,
    embedded: Option<EmbeddedGrammar>,
}

impl<G: Grammar> GrammarReconciler<G> {
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            enabled: AtomicBool::new(true),
            report_unrecognized: true,
            embedded: None,
        }
    }

    /// Whether input the lexer has no token for is reported as a problem
    pub fn report_unrecognized(mut self, report: bool) -> Self {
        self.report_unrecognized = report;
        self
    }

    pub fn with_embedded(mut self, embedded: EmbeddedGrammar) -> Self {
        self.embedded = Some(embedded);
        self
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub fn embedded(&self) -> Option<&EmbeddedGrammar> {
        self.embedded.as_ref()
    }

    fn reconcile_embedded(
        &self,
        embedded: &EmbeddedGrammar,
        root: &SyntaxNode,
        start: TextSize,
        session: &mut ReconcileSession<'_>,
    ) -> Result<(), ReconcileError> {
        // Tokens inside ERROR nodes are visited too
        let tokens = root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == embedded.token);

        for token in tokens {
            session.check_cancelled()?;
            if !embedded.reconciler.is_enabled() {
                return Ok(());
            }

            let text = token.text();
            let (open, close) = (embedded.open_len as usize, embedded.close_len as usize);
            if text.len() < open + close {
                continue;
            }
            let inner = &text[open..text.len() - close];
            let inner_start = start + token.text_range().start() + TextSize::from(embedded.open_len);
            trace!(
                outer = self.grammar.name(),
                inner = embedded.reconciler.name(),
                offset = u32::from(inner_start),
                "embedded region"
            );

            let mark = session.mark();
            let result = session.enter_embedded().and_then(|()| {
                let result = embedded.reconciler.reconcile_in(inner, inner_start, session);
                session.exit_embedded();
                result
            });
            match result {
                Ok(()) => {}
                Err(ReconcileError::Cancelled) => return Err(ReconcileError::Cancelled),
                Err(error) => {
                    session.rollback(mark);
                    warn!(
                        outer = self.grammar.name(),
                        inner = embedded.reconciler.name(),
                        %error,
                        "embedded reconcile fault masked"
                    );
                }
            }
        }
        Ok(())
    }
}

impl<G: Grammar> Reconciler for GrammarReconciler<G> {
    fn name(&self) -> &str {
        self.grammar.name()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    fn reconcile_in(
        &self,
        text: &str,
        start: TextSize,
        session: &mut ReconcileSession<'_>,
    ) -> Result<(), ReconcileError> {
        session.check_cancelled()?;
        session.check_region(text.len())?;

        let parse = self.grammar.parse(text, session.cancel_token())?;
        let kind = self.grammar.syntax_problem();
        for error in &parse.errors {
            if error.unrecognized && !self.report_unrecognized {
                continue;
            }
            session.report(Problem::new(kind, &error.message, error.range + start));
        }

        let root = parse.syntax();
        let mut findings = Vec::new();
        self.grammar.validate(&root, &mut findings);
        for problem in findings {
            session.report(problem.shifted(start));
        }

        if let Some(embedded) = &self.embedded {
            self.reconcile_embedded(embedded, &root, start, session)?;
        }
        Ok(())
    }
}
