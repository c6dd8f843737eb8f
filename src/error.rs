use thiserror::Error;

/// Errors reported by fallible routines in this crate.
///
/// Every variant carries a human-readable detail string. Routines that cannot
/// fail structurally (e.g. traversals over a validated representation) do not
/// return a [`Result`]; precondition violations that indicate caller bugs
/// panic instead, mirroring the panic contracts documented on the graph
/// operation traits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument violates the documented domain of the routine, e.g. an
    /// empty coefficient vector, a zero leading coefficient, or a malformed
    /// expression handed to the parser.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An intermediate value of a modular routine would exceed 64 bits.
    #[error("overflow: {0}")]
    Overflow(String),

    /// An iterative numeric routine exhausted its iteration bound.
    #[error("does not converge: {0}")]
    DoesNotConverge(String),

    /// A single-source shortest-path computation detected a reachable
    /// negative cycle.
    #[error("negative cycle: {0}")]
    NegativeCycle(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
