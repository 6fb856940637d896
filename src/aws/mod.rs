//! AWS integration: credential resolution and the CloudWatch Logs client.

pub mod client;
pub mod credentials;
pub mod types;

pub use client::{build_client, CloudWatchLogsBackend, LogsBackend};
pub use credentials::{AuthenticationMethod, ResolvedCredentials};
pub use types::{EventPage, EventsQuery, LogEvent, StreamPage};
