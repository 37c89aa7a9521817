use thiserror::Error;

/// Errors a scout propagates to its caller.
///
/// Reachability failures are deliberately *not* represented here: an
/// unreachable target is a measured fact (the unknown sentinel), not an error.
/// What does surface is the class of failures that indicate an operator or
/// programming mistake and must never be masked by sentinel data.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The scout configuration cannot produce a valid request.
    #[error("invalid scout configuration: {0}")]
    Config(String),

    /// The transport rejected the exchange for a non-reachability reason.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The peer presented no certificate or one that could not be parsed.
    #[error("certificate failure: {0}")]
    Certificate(String),
}
