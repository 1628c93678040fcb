//! Positioned findings produced by reconcilers, and their conversion to
//! editor diagnostics.

use std::cmp::Ordering;
use std::fmt;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::{LineIndex, Span};

// ============================================================================
// PROBLEM KINDS
// ============================================================================

/// Whether a problem comes from the parser or from a post-parse check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemCategory {
    Syntax,
    Semantic,
}

/// Grammar-specific problem tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemKind {
    CronSyntax,
    CronField,
    SpelSyntax,
    PlaceholderSyntax,
    JpqlSyntax,
}

impl ProblemKind {
    /// Stable code reported with diagnostics
    pub fn code(self) -> &'static str {
        match self {
            ProblemKind::CronSyntax => "CRON_SYNTAX",
            ProblemKind::CronField => "CRON_FIELD",
            ProblemKind::SpelSyntax => "SPEL_SYNTAX",
            ProblemKind::PlaceholderSyntax => "PLACEHOLDER_SYNTAX",
            ProblemKind::JpqlSyntax => "JPQL_SYNTAX",
        }
    }

    pub fn category(self) -> ProblemCategory {
        match self {
            ProblemKind::CronField => ProblemCategory::Semantic,
            _ => ProblemCategory::Syntax,
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// PROBLEM
// ============================================================================

/// A finding at an absolute offset in the document
///
/// Problems order by offset, then by length (shorter first).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Problem {
    pub kind: ProblemKind,
    pub message: String,
    pub range: TextRange,
}

impl Problem {
    pub fn new(kind: ProblemKind, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            message: message.into(),
            range,
        }
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The same problem moved by `offset`
    pub fn shifted(mut self, offset: TextSize) -> Self {
        self.range += offset;
        self
    }

    /// Convert to a line/column diagnostic, or `None` when the policy ignores the kind
    pub fn to_diagnostic(
        &self,
        lines: &LineIndex,
        policy: &dyn SeverityPolicy,
    ) -> Option<Diagnostic> {
        let severity = policy.severity(self.kind)?;
        Some(Diagnostic {
            span: lines.span(self.range),
            severity,
            code: SmolStr::new_static(self.kind.code()),
            message: self.message.clone(),
        })
    }
}

impl Ord for Problem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset()
            .cmp(&other.offset())
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Problem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.kind,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// Maps problem kinds to severities; `None` suppresses the problem
pub trait SeverityPolicy: Send + Sync {
    fn severity(&self, kind: ProblemKind) -> Option<Severity>;
}

/// Syntax problems are errors, semantic problems are warnings
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSeverityPolicy;

impl SeverityPolicy for DefaultSeverityPolicy {
    fn severity(&self, kind: ProblemKind) -> Option<Severity> {
        Some(match kind.category() {
            ProblemCategory::Syntax => Severity::Error,
            ProblemCategory::Semantic => Severity::Warning,
        })
    }
}

impl<F> SeverityPolicy for F
where
    F: Fn(ProblemKind) -> Option<Severity> + Send + Sync,
{
    fn severity(&self, kind: ProblemKind) -> Option<Severity> {
        self(kind)
    }
}

/// A problem positioned by line and column (0-indexed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    /// Problem code (e.g., "CRON_FIELD").
    pub code: SmolStr,
    pub message: String,
}
