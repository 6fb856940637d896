//! CloudWatch Logs client construction and the backend capability.
//!
//! The drain engine consumes CloudWatch Logs through the [`LogsBackend`]
//! trait: one paginated stream-listing call and one paginated forward event
//! read. The concrete implementation wraps the AWS SDK client and classifies
//! each failure as a configuration fault or a service fault before it reaches
//! the engine.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use aws_sdk_cloudwatchlogs::error::ProvideErrorMetadata;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_types::region::Region;
use tracing::debug;

use super::credentials::ResolvedCredentials;
use super::types::{EventPage, EventsQuery, LogEvent, StreamPage};
use crate::error::{is_config_fault, Error};
use crate::plugin::Task;

/// Event pages can be large; give each read a generous fixed timeout.
const READ_TIMEOUT: Duration = Duration::from_secs(8 * 60);

/// Remote capability surface consumed by the drain engine.
#[async_trait]
pub trait LogsBackend: Send + Sync {
    /// One page of stream names in `log_group_name`, optionally filtered by
    /// name prefix, continuing from `next_token`.
    async fn describe_log_streams(
        &self,
        log_group_name: &str,
        name_prefix: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<StreamPage, Error>;

    /// One page of a forward event read, continuing from `next_token`.
    async fn get_log_events(
        &self,
        query: &EventsQuery,
        next_token: Option<&str>,
    ) -> Result<EventPage, Error>;
}

/// Build the CloudWatch Logs client for a validated task.
///
/// Retries are disabled so failure signals reach the caller unmodified, and
/// the read timeout is fixed rather than the SDK default.
pub async fn build_client(task: &Task) -> Result<cloudwatchlogs::Client, Error> {
    let credentials = task.auth.resolve().await?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(task.region.clone()))
        .retry_config(RetryConfig::disabled())
        .timeout_config(
            TimeoutConfig::builder()
                .read_timeout(READ_TIMEOUT)
                .build(),
        );
    match credentials {
        ResolvedCredentials::Provider(provider) => {
            loader = loader.credentials_provider(provider);
        }
        ResolvedCredentials::DefaultChain => {}
        ResolvedCredentials::Anonymous => {
            loader = loader.no_credentials();
        }
    }

    let config = loader.load().await;
    debug!(region = %task.region, "built CloudWatch Logs client");
    Ok(cloudwatchlogs::Client::new(&config))
}

/// [`LogsBackend`] over the AWS SDK client.
#[derive(Debug, Clone)]
pub struct CloudWatchLogsBackend {
    client: cloudwatchlogs::Client,
}

impl CloudWatchLogsBackend {
    pub fn new(client: cloudwatchlogs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsBackend for CloudWatchLogsBackend {
    async fn describe_log_streams(
        &self,
        log_group_name: &str,
        name_prefix: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<StreamPage, Error> {
        let mut request = self
            .client
            .describe_log_streams()
            .log_group_name(log_group_name);
        if let Some(prefix) = name_prefix {
            request = request.log_stream_name_prefix(prefix);
        }
        if let Some(token) = next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify_sdk_error(err, "DescribeLogStreams"))?;

        let streams = response
            .log_streams
            .unwrap_or_default()
            .into_iter()
            .filter_map(|stream| stream.log_stream_name)
            .collect();
        Ok(StreamPage {
            streams,
            next_token: response.next_token,
        })
    }

    async fn get_log_events(
        &self,
        query: &EventsQuery,
        next_token: Option<&str>,
    ) -> Result<EventPage, Error> {
        let mut request = self
            .client
            .get_log_events()
            .log_group_name(&query.log_group_name)
            .start_from_head(true);
        if let Some(stream) = &query.log_stream_name {
            request = request.log_stream_name(stream);
        }
        if let Some(start) = query.window.start_millis {
            request = request.start_time(start);
        }
        if let Some(end) = query.window.end_millis {
            request = request.end_time(end);
        }
        if let Some(token) = next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify_sdk_error(err, "GetLogEvents"))?;

        let events = response
            .events
            .unwrap_or_default()
            .into_iter()
            .map(|event| LogEvent {
                timestamp: event.timestamp.unwrap_or(0),
                message: event.message.unwrap_or_default(),
            })
            .collect();
        Ok(EventPage {
            events,
            next_forward_token: response.next_forward_token,
        })
    }
}

/// Map an SDK failure into the engine's taxonomy, keeping the underlying
/// message intact.
fn classify_sdk_error<E>(err: SdkError<E, HttpResponse>, operation: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let rendered = format!("{} failed: {}", operation, DisplayErrorContext(&err));
    if let SdkError::ServiceError(context) = &err {
        let status = Some(context.raw().status().as_u16());
        let code = context.err().code();
        if is_config_fault(status, code) {
            return Error::Config(rendered);
        }
    }
    Error::Service(rendered)
}
