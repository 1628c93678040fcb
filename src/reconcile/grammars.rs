//! The concrete grammars and the reconcilers built from them

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{
    EmbeddedGrammar, Grammar, GrammarReconciler, Problem, ProblemKind, Reconciler,
    RegionLanguage, ValidationSettings,
};
use crate::syntax::cron::validate_fields;
use crate::syntax::{
    Parse, ParseError, SyntaxKind, SyntaxNode, parse_cron, parse_jpql, parse_placeholder,
    parse_spel,
};

// ============================================================================
// GRAMMARS
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct CronGrammar;

impl Grammar for CronGrammar {
    fn name(&self) -> &'static str {
        "cron"
    }

    fn syntax_problem(&self) -> ProblemKind {
        ProblemKind::CronSyntax
    }

    fn parse(&self, text: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
        parse_cron(text, cancel)
    }

    fn validate(&self, root: &SyntaxNode, problems: &mut Vec<Problem>) {
        problems.extend(
            validate_fields(root)
                .into_iter()
                .map(|issue| Problem::new(ProblemKind::CronField, issue.message, issue.range)),
        );
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SpelGrammar;

impl Grammar for SpelGrammar {
    fn name(&self) -> &'static str {
        "spel"
    }

    fn syntax_problem(&self) -> ProblemKind {
        ProblemKind::SpelSyntax
    }

    fn parse(&self, text: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
        parse_spel(text, cancel)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderGrammar;

impl Grammar for PlaceholderGrammar {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn syntax_problem(&self) -> ProblemKind {
        ProblemKind::PlaceholderSyntax
    }

    fn parse(&self, text: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
        parse_placeholder(text, cancel)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JpqlGrammar;

impl Grammar for JpqlGrammar {
    fn name(&self) -> &'static str {
        "jpql"
    }

    fn syntax_problem(&self) -> ProblemKind {
        ProblemKind::JpqlSyntax
    }

    fn parse(&self, text: &str, cancel: &CancellationToken) -> Result<Parse, ParseError> {
        parse_jpql(text, cancel)
    }
}

// ============================================================================
// RECONCILERS
// ============================================================================

pub fn cron_reconciler() -> GrammarReconciler<CronGrammar> {
    GrammarReconciler::new(CronGrammar)
}

pub fn placeholder_reconciler() -> GrammarReconciler<PlaceholderGrammar> {
    GrammarReconciler::new(PlaceholderGrammar)
}

/// SpEL with `${...}` placeholders reconciled by `placeholders`
///
/// Unrecognized tokens are not reported for SpEL.
pub fn spel_reconciler(placeholders: Arc<dyn Reconciler>) -> GrammarReconciler<SpelGrammar> {
    GrammarReconciler::new(SpelGrammar)
        .report_unrecognized(false)
        .with_embedded(EmbeddedGrammar {
            token: SyntaxKind::PLACEHOLDER,
            open_len: 2,
            close_len: 1,
            reconciler: placeholders,
        })
}

/// JPQL with `:#{...}` / `?#{...}` regions reconciled by `spel`
pub fn jpql_reconciler(spel: Arc<dyn Reconciler>) -> GrammarReconciler<JpqlGrammar> {
    GrammarReconciler::new(JpqlGrammar).with_embedded(EmbeddedGrammar {
        token: SyntaxKind::SPEL_REGION,
        open_len: 3,
        close_len: 1,
        reconciler: spel,
    })
}

/// One reconciler per region language, wired for embedding
#[derive(Clone)]
pub struct Reconcilers {
    cron: Arc<dyn Reconciler>,
    spel: Arc<dyn Reconciler>,
    placeholder: Arc<dyn Reconciler>,
    jpql: Arc<dyn Reconciler>,
}

impl Reconcilers {
    pub fn new() -> Self {
        let placeholder: Arc<dyn Reconciler> = Arc::new(placeholder_reconciler());
        let spel: Arc<dyn Reconciler> = Arc::new(spel_reconciler(placeholder.clone()));
        let jpql: Arc<dyn Reconciler> = Arc::new(jpql_reconciler(spel.clone()));
        Self {
            cron: Arc::new(cron_reconciler()),
            spel,
            placeholder,
            jpql,
        }
    }

    pub fn get(&self, language: RegionLanguage) -> &Arc<dyn Reconciler> {
        match language {
            RegionLanguage::Cron => &self.cron,
            RegionLanguage::Spel => &self.spel,
            RegionLanguage::Placeholder => &self.placeholder,
            RegionLanguage::Jpql => &self.jpql,
        }
    }

    /// Switch reconcilers on or off to match `settings`
    pub fn apply(&self, settings: &ValidationSettings) {
        for language in RegionLanguage::ALL {
            let enabled = settings.is_enabled(language);
            let reconciler = self.get(language);
            if reconciler.is_enabled() != enabled {
                debug!(language = %language, enabled, "validation toggled");
                reconciler.set_enabled(enabled);
            }
        }
    }
}

impl Default for Reconcilers {
    fn default() -> Self {
        Self::new()
    }
}
