//! Filepath: src/core/error.rs
//! Typed failures raised by the analysis engine. All of them are
//! local and synchronous; the CLI maps them to exit codes.

use miette::Diagnostic;

/// Engine error taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic, thiserror::Error)]
pub enum CueError
{
    /// Malformed, empty, or out-of-range input (bad span, bad k, empty corpus)
    #[error("invalid argument: {0}")]
    #[diagnostic(code(cue::invalid_argument))]
    InvalidArgument(String),

    /// Operation that needs at least one location called on an empty region
    #[error("empty selection: called {0}() on an empty region")]
    #[diagnostic(
        code(cue::empty_selection),
        help("add at least one location to the region first")
    )]
    EmptySelection(&'static str),

    /// Text slicing beyond the bounds of the owning source
    #[error("offsets {start}..{end} are outside source of length {len}")]
    #[diagnostic(code(cue::out_of_range))]
    OutOfRange
    {
        start: usize,
        end: usize,
        len: usize,
    },

    /// The element locator could not produce a syntax tree
    #[error("failed to parse {source_id}: {reason}")]
    #[diagnostic(code(cue::parse))]
    Parse
    {
        source_id: String,
        reason: String,
    },
}

impl CueError
{
    /// Shorthand for an `InvalidArgument` with a formatted message
    pub fn invalid(msg: impl Into<String>) -> Self
    {
        Self::InvalidArgument(msg.into())
    }
}

/// Engine result alias
pub type CueResult<T> = Result<T, CueError>;

/// Validate `k` against a population of `n` members: 1 <= k <= n
pub fn check_k(
    k: usize,
    n: usize,
) -> CueResult<()>
{
    if n == 0
    {
        return Err(CueError::invalid("corpus is empty"));
    }

    if k == 0 || k > n
    {
        return Err(CueError::invalid(format!(
            "k must be within [1, {n}], got {k}"
        )));
    }

    Ok(())
}
