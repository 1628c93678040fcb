//! Semantic checks on well-formed cron fields
//!
//! Runs over a parsed `CRON_EXPR`. Fields that already carry syntax errors
//! are skipped, and nothing is checked when the field count is wrong.

use text_size::TextRange;

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

use super::FIELD_COUNT;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// Monday is 1 and Sunday is 7 (0 is accepted for Sunday as well)
const DAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Whether `text` is a month or day-of-week name
pub(crate) fn is_known_name(text: &str) -> bool {
    MONTHS.iter().chain(DAYS.iter()).any(|n| n.eq_ignore_ascii_case(text))
}

/// The six positions of a Spring cron expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronField {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl CronField {
    pub const ALL: [CronField; FIELD_COUNT] = [
        CronField::Second,
        CronField::Minute,
        CronField::Hour,
        CronField::DayOfMonth,
        CronField::Month,
        CronField::DayOfWeek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CronField::Second => "second",
            CronField::Minute => "minute",
            CronField::Hour => "hour",
            CronField::DayOfMonth => "day-of-month",
            CronField::Month => "month",
            CronField::DayOfWeek => "day-of-week",
        }
    }

    /// Inclusive range of numeric values
    pub fn bounds(self) -> (u32, u32) {
        match self {
            CronField::Second | CronField::Minute => (0, 59),
            CronField::Hour => (0, 23),
            CronField::DayOfMonth => (1, 31),
            CronField::Month => (1, 12),
            CronField::DayOfWeek => (0, 7),
        }
    }
}

/// A FIELD finding covering a whole cron field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: CronField,
    pub range: TextRange,
    pub message: String,
}

/// Check every well-formed field, reporting at most one issue per field
pub fn validate_fields(root: &SyntaxNode) -> Vec<FieldIssue> {
    let fields: Vec<SyntaxNode> = root
        .children()
        .filter(|n| n.kind() == SyntaxKind::CRON_FIELD)
        .collect();
    if fields.len() != FIELD_COUNT {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (node, field) in fields.iter().zip(CronField::ALL) {
        if has_errors(node) {
            continue;
        }
        let failure = node
            .children()
            .filter(|n| n.kind() == SyntaxKind::CRON_ITEM)
            .find_map(|item| check_item(field, &significant_tokens(&item)).err());
        if let Some(message) = failure {
            issues.push(FieldIssue {
                field,
                range: node.text_range(),
                message,
            });
        }
    }
    issues
}

fn has_errors(node: &SyntaxNode) -> bool {
    node.descendants_with_tokens().any(|e| e.kind() == SyntaxKind::ERROR)
}

fn significant_tokens(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .collect()
}

fn check_item(field: CronField, tokens: &[SyntaxToken]) -> Result<(), String> {
    use SyntaxKind::*;

    let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.kind()).collect();
    let text = |i: usize| tokens[i].text();
    let is_word = |i: usize, word: &str| kinds[i] == IDENT && text(i).eq_ignore_ascii_case(word);

    match kinds.as_slice() {
        [STAR] => Ok(()),
        [STAR, SLASH, INTEGER] => check_step(text(2)),
        [QUESTION] => match field {
            CronField::DayOfMonth | CronField::DayOfWeek => Ok(()),
            _ => Err(format!("'?' is not allowed in the {} field", field.label())),
        },
        [IDENT] if is_word(0, "L") || is_word(0, "LW") => day_of_month_only(field, text(0)),
        [IDENT, MINUS, INTEGER] if is_word(0, "L") => {
            day_of_month_only(field, "L")?;
            match number(text(2)) {
                Some(offset) if offset <= 30 => Ok(()),
                _ => Err(format!("Offset '{}' from the last day is out of range", text(2))),
            }
        }
        [INTEGER, IDENT] if is_word(1, "W") => {
            day_of_month_only(field, "W")?;
            value(field, &tokens[0]).map(drop)
        }
        [_, IDENT] if is_word(1, "L") => {
            if field != CronField::DayOfWeek {
                return Err(format!(
                    "'L' after a value is only allowed in the day-of-week field, not in the {} field",
                    field.label()
                ));
            }
            value(field, &tokens[0]).map(drop)
        }
        [_, HASH, INTEGER] => {
            if field != CronField::DayOfWeek {
                return Err(format!("'#' is not allowed in the {} field", field.label()));
            }
            value(field, &tokens[0])?;
            match number(text(2)) {
                Some(1..=5) => Ok(()),
                _ => Err(format!("Ordinal '{}' must be between 1 and 5", text(2))),
            }
        }
        [_] => value(field, &tokens[0]).map(drop),
        [_, SLASH, INTEGER] => {
            value(field, &tokens[0])?;
            check_step(text(2))
        }
        [_, MINUS, _] => range(field, &tokens[0], &tokens[2]),
        [_, MINUS, _, SLASH, INTEGER] => {
            range(field, &tokens[0], &tokens[2])?;
            check_step(text(4))
        }
        _ => Err(format!("Unsupported value in the {} field", field.label())),
    }
}

fn day_of_month_only(field: CronField, what: &str) -> Result<(), String> {
    if field == CronField::DayOfMonth {
        Ok(())
    } else {
        Err(format!(
            "'{what}' is only allowed in the day-of-month field, not in the {} field",
            field.label()
        ))
    }
}

fn range(field: CronField, from: &SyntaxToken, to: &SyntaxToken) -> Result<(), String> {
    let low = value(field, from)?;
    let high = value(field, to)?;
    if low > high {
        return Err(format!(
            "Range '{}-{}' starts after it ends",
            from.text(),
            to.text()
        ));
    }
    Ok(())
}

fn check_step(text: &str) -> Result<(), String> {
    match number(text) {
        Some(step) if step > 0 => Ok(()),
        _ => Err(format!("Step '{text}' must be a positive number")),
    }
}

fn number(text: &str) -> Option<u32> {
    text.parse().ok()
}

/// Resolve a number or name in the context of `field`
fn value(field: CronField, token: &SyntaxToken) -> Result<u32, String> {
    let text = token.text();
    if token.kind() == SyntaxKind::IDENT {
        let month = MONTHS.iter().position(|m| m.eq_ignore_ascii_case(text));
        let day = DAYS.iter().position(|d| d.eq_ignore_ascii_case(text));
        return match (field, month, day) {
            (CronField::Month, Some(index), _) => Ok(index as u32 + 1),
            (CronField::DayOfWeek, _, Some(index)) => Ok(index as u32 + 1),
            (_, Some(_), _) => Err(format!(
                "Month name '{text}' is not allowed in the {} field",
                field.label()
            )),
            (_, _, Some(_)) => Err(format!(
                "Day name '{text}' is not allowed in the {} field",
                field.label()
            )),
            _ => Err(format!("Unknown name '{text}'")),
        };
    }

    let (low, high) = field.bounds();
    match number(text) {
        Some(n) if (low..=high).contains(&n) => Ok(n),
        _ => Err(format!(
            "Value '{text}' is out of range for the {} field ({low}-{high})",
            field.label()
        )),
    }
}
