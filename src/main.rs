#![warn(clippy::all, rust_2018_idioms)]

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use tracing_subscriber::prelude::*;

use cwlogs_input::aws::client::{build_client, CloudWatchLogsBackend};
use cwlogs_input::plugin::{self, RecordSink};

fn init_logging() {
    // Default to connector-level info and keep the AWS stack quiet unless
    // RUST_LOG overrides it.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "cwlogs_input=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,\
             aws_smithy_runtime_api=warn,hyper=warn",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

/// Writes one JSON object per record to the wrapped writer, with the message
/// column named by the task's `column_name`.
struct JsonLinesSink<W: Write> {
    writer: W,
    column_name: String,
}

impl<W: Write> JsonLinesSink<W> {
    fn new(writer: W, column_name: String) -> Self {
        Self {
            writer,
            column_name,
        }
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn add_record(&mut self, timestamp_millis: i64, message: &str) -> std::io::Result<()> {
        let timestamp = match DateTime::from_timestamp_millis(timestamp_millis) {
            Some(instant) => {
                serde_json::Value::String(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            // Out-of-range millis fall back to the raw number.
            None => serde_json::Value::Number(timestamp_millis.into()),
        };
        let mut record = serde_json::Map::with_capacity(2);
        record.insert("timestamp".to_string(), timestamp);
        record.insert(
            self.column_name.clone(),
            serde_json::Value::String(message.to_string()),
        );
        writeln!(self.writer, "{}", serde_json::Value::Object(record))
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let config_path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("usage: cwlogs-input <task-config.yml>");
            std::process::exit(2);
        }
    };

    let source = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read task configuration {}", config_path))?;
    let task = plugin::transaction(&source)?;
    tracing::info!(
        log_group_name = %task.config.log_group_name,
        region = %task.region,
        "starting CloudWatch Logs drain"
    );

    let client = build_client(&task).await?;
    let backend = CloudWatchLogsBackend::new(client);

    let stdout = std::io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock(), task.config.column_name.clone());
    plugin::run(&task, &backend, &mut sink).await?;

    tracing::info!("drain complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonl_sink_renders_timestamp_and_named_column() {
        let mut buffer = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buffer, "line".to_string());
            sink.add_record(1709296245123, "hello").unwrap();
            sink.finish().unwrap();
        }
        let rendered = String::from_utf8(buffer).unwrap();
        let record: serde_json::Value = serde_json::from_str(rendered.trim_end()).unwrap();
        assert_eq!(record["timestamp"], "2024-03-01T12:30:45.123Z");
        assert_eq!(record["line"], "hello");
    }
}
