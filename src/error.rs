//! Error taxonomy for the drain engine.
//!
//! Failures fall into exactly two classes: configuration errors, which are
//! fatal and never retried, and service errors, which propagate the
//! underlying failure unmodified to the caller. The engine itself performs no
//! automatic retry; retry policy belongs to the underlying client and is
//! disabled by default.

use thiserror::Error;

/// Connector error.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or contradictory input: invalid date string, end before start,
    /// unknown authentication method, forbidden or missing credential field,
    /// missing region, expired-token responses, and client-class 4xx
    /// responses other than 404.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other remote-call failure: 404s on list/fetch, 5xx, network
    /// faults. Carries the underlying message unchanged.
    #[error("{0}")]
    Service(String),

    /// Failure writing to the output sink.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Error::Service(message.into())
    }

    /// Whether this is a fatal configuration problem rather than a transient
    /// service fault.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Classification rule for a failed CloudWatch call, shared by stream
/// enumeration and event draining.
///
/// An `ExpiredToken` error code maps to a configuration fault regardless of
/// the HTTP status. Otherwise a client-class 4xx status is a configuration
/// fault, with 404 carved out as an unexpected service fault.
pub(crate) fn is_config_fault(status: Option<u16>, error_code: Option<&str>) -> bool {
    if error_code.is_some_and(|code| code.eq_ignore_ascii_case("ExpiredToken")) {
        return true;
    }
    matches!(status, Some(status) if (400..500).contains(&status) && status != 404)
}
