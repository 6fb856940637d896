//! Data types exchanged with the CloudWatch Logs capability.

use crate::config::TimeWindow;

/// A single log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Event timestamp (Unix milliseconds).
    pub timestamp: i64,
    /// Log message content.
    pub message: String,
}

impl LogEvent {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// One page of stream names from `DescribeLogStreams`, in server order.
#[derive(Debug, Clone, Default)]
pub struct StreamPage {
    pub streams: Vec<String>,
    /// Continuation token; absent when the listing is exhausted.
    pub next_token: Option<String>,
}

/// One page of events from `GetLogEvents`, in server order.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<LogEvent>,
    /// Forward continuation token. The service re-issues the token that
    /// produced a page when there is nothing more to return forward.
    pub next_forward_token: Option<String>,
}

/// A forward read over one stream, fixed for the lifetime of a drain.
#[derive(Debug, Clone)]
pub struct EventsQuery {
    pub log_group_name: String,
    /// Absent means the default, unspecified stream.
    pub log_stream_name: Option<String>,
    pub window: TimeWindow,
}
