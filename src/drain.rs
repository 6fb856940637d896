//! The drain engine: stream enumeration and token-paginated event reads.
//!
//! Both loops follow an opaque continuation token issued by the service.
//! Stream enumeration runs until the service stops returning a token. Event
//! reads additionally stop when the service re-issues the token that produced
//! the current page, which is how a forward read signals exhaustion; the
//! comparison is by value. Neither loop retries: failures propagate to the
//! caller already classified as configuration or service faults.

use tracing::{debug, trace};

use crate::aws::client::LogsBackend;
use crate::aws::types::{EventsQuery, LogEvent};
use crate::error::Error;

/// Resolve the complete ordered list of stream names in a log group,
/// optionally filtered by name prefix.
///
/// Pages are concatenated in server-returned order. Zero matching streams is
/// not an error; the result is simply empty.
pub async fn enumerate_streams(
    backend: &dyn LogsBackend,
    log_group_name: &str,
    name_prefix: Option<&str>,
) -> Result<Vec<String>, Error> {
    let mut streams = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let page = backend
            .describe_log_streams(log_group_name, name_prefix, next_token.as_deref())
            .await?;
        trace!(
            page_len = page.streams.len(),
            has_token = page.next_token.is_some(),
            "received stream page"
        );
        streams.extend(page.streams);
        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }
    debug!(
        log_group_name,
        count = streams.len(),
        "enumerated log streams"
    );
    Ok(streams)
}

/// A lazy forward read over one stream's events.
///
/// Holds only the current continuation token; each [`next_page`] issues one
/// request and yields that page's events in server order. Restartable only by
/// constructing a new value.
///
/// [`next_page`]: EventPages::next_page
pub struct EventPages<'a> {
    backend: &'a dyn LogsBackend,
    query: EventsQuery,
    next_token: Option<String>,
    done: bool,
}

impl<'a> EventPages<'a> {
    pub fn new(backend: &'a dyn LogsBackend, query: EventsQuery) -> Self {
        Self {
            backend,
            query,
            next_token: None,
            done: false,
        }
    }

    /// Fetch the next page of events, or `None` once the read is exhausted.
    ///
    /// Exhaustion is an absent forward token, or a forward token equal to the
    /// token that requested the page. Once exhausted, no further requests are
    /// issued.
    pub async fn next_page(&mut self) -> Result<Option<Vec<LogEvent>>, Error> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .backend
            .get_log_events(&self.query, self.next_token.as_deref())
            .await?;
        trace!(
            stream = self.query.log_stream_name.as_deref().unwrap_or("<default>"),
            page_len = page.events.len(),
            "received event page"
        );

        match page.next_forward_token {
            Some(token) if self.next_token.as_deref() != Some(token.as_str()) => {
                self.next_token = Some(token);
            }
            _ => self.done = true,
        }
        Ok(Some(page.events))
    }
}
