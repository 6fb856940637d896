//! CloudWatch Logs Input Connector
//!
//! Extracts log events from AWS CloudWatch Logs, grouped by log group and log
//! stream, and emits them as a uniform two-column record stream of
//! `(timestamp, message)` for downstream ingestion.
//!
//! # Architecture Overview
//!
//! The connector is organized around a small drain engine:
//!
//! - **Configuration** ([`config`]): declarative YAML task definition with
//!   validation that completes before any network call
//! - **Credentials** ([`aws::credentials`]): eight-way authentication dispatch
//!   producing an AWS credential provider
//! - **Client** ([`aws::client`]): CloudWatch Logs client construction and the
//!   [`aws::client::LogsBackend`] capability consumed by the drain engine
//! - **Drain Engine** ([`drain`]): stream enumeration and token-paginated
//!   event draining with a value-equality exhaustion check
//! - **Runner** ([`plugin`]): drives the drain across one or many streams and
//!   forwards each event into a [`plugin::RecordSink`], finalizing it exactly
//!   once
//!
//! # Usage
//!
//! ```rust,no_run
//! use cwlogs_input::aws::client::{build_client, CloudWatchLogsBackend};
//! use cwlogs_input::plugin::{self, RecordSink};
//!
//! # async fn example(mut sink: impl RecordSink) -> Result<(), cwlogs_input::Error> {
//! let task = plugin::transaction(
//!     "log_group_name: /aws/lambda/my-function\n\
//!      authentication_method: default\n\
//!      region: us-east-1\n",
//! )?;
//! let client = build_client(&task).await?;
//! let backend = CloudWatchLogsBackend::new(client);
//! plugin::run(&task, &backend, &mut sink).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod aws;
pub mod config;
pub mod drain;
pub mod error;
pub mod plugin;
pub mod utils;

pub use config::TaskConfig;
pub use error::Error;
pub use plugin::{run, transaction, RecordSink, Task};
