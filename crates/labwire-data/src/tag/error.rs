use thiserror::Error;

/// Error type for type-tag parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("unknown token {0:?} in type tag")]
    UnknownToken(char),
    #[error("empty cluster in type tag")]
    EmptyCluster,
    #[error("unterminated cluster in type tag")]
    UnterminatedCluster,
    #[error("unmatched ')' in type tag")]
    UnmatchedParen,
    #[error("unterminated unit bracket in type tag")]
    UnterminatedUnit,
    #[error("list depth must be at least 1")]
    ZeroListDepth,
}
