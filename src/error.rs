use thiserror::Error;

/// Advisory findings from [`lint`](crate::parser::lint) over a range
/// specification.
///
/// These are warnings, not errors: parsing is total and evaluation treats
/// every flagged line as a rule that never matches. The lint surface exists
/// so an admin form can tell the operator which lines are dead weight.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeWarning {
    #[error("line {line}: '{text}' is not a valid dotted-decimal IPv4 address")]
    InvalidAddress { line: usize, text: String },

    #[error("line {line}: range has an empty high bound and can never match")]
    EmptyHighBound { line: usize },

    #[error("line {line}: range {low}:{high} is reversed (low above high) and can never match")]
    ReversedInterval {
        line: usize,
        low: String,
        high: String,
    },
}
