//! Declarative task configuration.
//!
//! The task is deserialized from YAML and fully validated before any network
//! call: time-range boundaries are parsed and ordered, credential fields are
//! checked against the authentication method, and the region is required.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;
use crate::utils::date::{parse_date_str, DEFAULT_TIME_RANGE_FORMAT};

/// Task configuration for one connector run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Log group to read from.
    pub log_group_name: String,
    /// Exact stream name, or a name prefix when
    /// [`use_log_stream_name_prefix`](Self::use_log_stream_name_prefix) is set.
    #[serde(default)]
    pub log_stream_name: Option<String>,
    /// Treat `log_stream_name` as a prefix filter over multiple streams.
    #[serde(default)]
    pub use_log_stream_name_prefix: bool,
    /// Inclusive lower bound for event timestamps.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Inclusive upper bound for event timestamps.
    #[serde(default)]
    pub end_time: Option<String>,
    /// chrono format for `start_time` / `end_time`.
    #[serde(default)]
    pub time_range_format: Option<String>,
    /// Name of the message output column. The timestamp column is always
    /// named `timestamp`.
    #[serde(default = "default_column_name")]
    pub column_name: String,
    /// One of: basic, session, env, properties, profile, instance, anonymous,
    /// default.
    #[serde(default = "default_authentication_method")]
    pub authentication_method: String,
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub aws_session_token: Option<String>,
    #[serde(default)]
    pub aws_profile_file: Option<PathBuf>,
    #[serde(default)]
    pub aws_profile_name: Option<String>,
    /// AWS region of the log group.
    #[serde(default)]
    pub region: Option<String>,
}

fn default_column_name() -> String {
    "message".to_string()
}

fn default_authentication_method() -> String {
    "basic".to_string()
}

/// Optional time window, in epoch milliseconds, applied to event reads.
/// Inclusivity is delegated to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_millis: Option<i64>,
    pub end_millis: Option<i64>,
}

impl TaskConfig {
    /// Effective time-range format.
    pub fn time_range_format(&self) -> &str {
        self.time_range_format
            .as_deref()
            .unwrap_or(DEFAULT_TIME_RANGE_FORMAT)
    }

    /// Parse the configured boundaries into a [`TimeWindow`].
    ///
    /// Checked once at configuration time: if both boundaries are present,
    /// the end must not be earlier than the start.
    pub fn time_window(&self) -> Result<TimeWindow, Error> {
        let formats = [self.time_range_format()];
        let start = self
            .start_time
            .as_deref()
            .map(|value| parse_date_str(value, &formats))
            .transpose()?;
        let end = self
            .end_time
            .as_deref()
            .map(|value| parse_date_str(value, &formats))
            .transpose()?;

        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(Error::config(format!(
                    "end_time ({}) must not be earlier than start_time ({})",
                    self.end_time.as_deref().unwrap_or_default(),
                    self.start_time.as_deref().unwrap_or_default(),
                )));
            }
        }

        Ok(TimeWindow {
            start_millis: start.map(|instant| instant.timestamp_millis()),
            end_millis: end.map(|instant| instant.timestamp_millis()),
        })
    }
}
