//! Connector entry points: task validation and the record-emitting run loop.
//!
//! `transaction` turns a declarative YAML source into a validated [`Task`]
//! without touching the network; every configuration fault surfaces there.
//! `run` then drives the drain engine across one or many streams and forwards
//! each event into a [`RecordSink`], which is finalized exactly once on every
//! exit path.

use tracing::{debug, info};

use crate::aws::client::LogsBackend;
use crate::aws::credentials::AuthenticationMethod;
use crate::aws::types::EventsQuery;
use crate::config::{TaskConfig, TimeWindow};
use crate::drain::{enumerate_streams, EventPages};
use crate::error::Error;

/// Output boundary for drained records.
///
/// `finish` flushes and closes the sink; `run` calls it exactly once, whether
/// the drain completes or fails. Records written before a failure stay
/// written.
pub trait RecordSink {
    /// Append one `(timestamp, message)` record.
    fn add_record(&mut self, timestamp_millis: i64, message: &str) -> std::io::Result<()>;

    /// Flush and close the sink.
    fn finish(&mut self) -> std::io::Result<()>;
}

/// A validated task: configuration plus everything derived from it at
/// transaction time.
#[derive(Debug, Clone)]
pub struct Task {
    pub config: TaskConfig,
    pub auth: AuthenticationMethod,
    pub window: TimeWindow,
    pub region: String,
}

impl Task {
    /// Validate a parsed configuration into a runnable task.
    pub fn from_config(config: TaskConfig) -> Result<Self, Error> {
        let window = config.time_window()?;
        let auth = AuthenticationMethod::from_task(&config)?;
        let region = config
            .region
            .clone()
            .ok_or_else(|| Error::config("region is required"))?;
        Ok(Task {
            config,
            auth,
            window,
            region,
        })
    }
}

/// Parse and validate a YAML task source.
///
/// All validation happens here, before any network call: the time window is
/// parsed and ordered, credential fields are checked against the declared
/// authentication method, and the region is required.
pub fn transaction(source: &str) -> Result<Task, Error> {
    let config: TaskConfig = serde_yaml::from_str(source)
        .map_err(|err| Error::config(format!("invalid task configuration: {}", err)))?;
    Task::from_config(config)
}

/// Drain the configured stream(s) into the sink.
///
/// With `use_log_stream_name_prefix`, every stream matching the configured
/// name prefix is drained in enumeration order; otherwise exactly one target
/// is drained (the configured stream, or the default, unnamed stream). The
/// sink is finalized exactly once on every exit path, including error exits.
pub async fn run(
    task: &Task,
    backend: &dyn LogsBackend,
    output: &mut dyn RecordSink,
) -> Result<(), Error> {
    let drained = drain_records(task, backend, output).await;
    let finished = output.finish().map_err(Error::from);
    drained?;
    finished
}

async fn drain_records(
    task: &Task,
    backend: &dyn LogsBackend,
    output: &mut dyn RecordSink,
) -> Result<(), Error> {
    if task.config.use_log_stream_name_prefix {
        let streams = enumerate_streams(
            backend,
            &task.config.log_group_name,
            task.config.log_stream_name.as_deref(),
        )
        .await?;
        info!(
            log_group_name = %task.config.log_group_name,
            streams = streams.len(),
            "draining log streams by prefix"
        );
        for stream in streams {
            drain_stream(task, backend, Some(stream), output).await?;
        }
    } else {
        drain_stream(task, backend, task.config.log_stream_name.clone(), output).await?;
    }
    Ok(())
}

async fn drain_stream(
    task: &Task,
    backend: &dyn LogsBackend,
    log_stream_name: Option<String>,
    output: &mut dyn RecordSink,
) -> Result<(), Error> {
    debug!(
        log_group_name = %task.config.log_group_name,
        log_stream_name = log_stream_name.as_deref().unwrap_or("<default>"),
        "draining log stream"
    );
    let query = EventsQuery {
        log_group_name: task.config.log_group_name.clone(),
        log_stream_name,
        window: task.window.clone(),
    };
    let mut pages = EventPages::new(backend, query);
    while let Some(events) = pages.next_page().await? {
        for event in events {
            output.add_record(event.timestamp, &event.message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transaction_with_minimal_config() {
        let task = transaction(
            "log_group_name: g\n\
             authentication_method: default\n\
             region: ap-northeast-1\n",
        )
        .unwrap();
        assert_eq!(task.config.log_group_name, "g");
        assert_eq!(task.region, "ap-northeast-1");
        assert_eq!(task.auth, AuthenticationMethod::Default);
        assert_eq!(task.window, TimeWindow::default());
    }

    #[test]
    fn test_transaction_requires_region() {
        let err = transaction("log_group_name: g\nauthentication_method: default\n").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("region is required"));
    }

    #[test]
    fn test_transaction_requires_log_group_name() {
        let err = transaction("region: us-east-1\n").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("log_group_name"));
    }

    #[test]
    fn test_transaction_rejects_reversed_window_before_any_network_io() {
        let err = transaction(
            "log_group_name: g\n\
             authentication_method: default\n\
             region: us-east-1\n\
             start_time: '2024-03-02 00:00:00'\n\
             end_time: '2024-03-01 00:00:00'\n",
        )
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("2024-03-02 00:00:00"));
        assert!(err.to_string().contains("2024-03-01 00:00:00"));
    }

    #[test]
    fn test_transaction_surfaces_credential_field_errors() {
        let err = transaction(
            "log_group_name: g\n\
             region: us-east-1\n\
             aws_access_key_id: AKID\n",
        )
        .unwrap_err();
        // authentication_method defaults to basic, which requires the secret.
        assert!(err.to_string().contains("'aws_secret_access_key'"));
    }
}
