//! JSONL file writer for pipeline events.
//!
//! Each [`PipelineEvent`] becomes one JSON line carrying its `type`, a UTC
//! `timestamp` and the payload fields. Lines are flushed as they are written.

use chrono::{SecondsFormat, Utc};
use gated_rag_application::ports::pipeline_logger::{PipelineEvent, PipelineLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL pipeline logger that writes one JSON object per line.
///
/// The writer sits behind a `Mutex`, so one logger serves every concurrent
/// request of the HTTP server.
pub struct JsonlPipelineLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlPipelineLogger {
    /// Open `path` for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create pipeline log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open pipeline log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One line of the log: `type` and `timestamp`, then the event fields.
#[derive(Serialize)]
struct EventLine<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    fields: EventFields<'a>,
}

/// Object payloads are inlined; anything else is nested under `data`.
#[derive(Serialize)]
#[serde(untagged)]
enum EventFields<'a> {
    Inline(&'a Map<String, Value>),
    Nested { data: &'a Value },
}

impl<'a> EventLine<'a> {
    fn new(event: &'a PipelineEvent) -> Self {
        let fields = match &event.payload {
            Value::Object(map) => EventFields::Inline(map),
            other => EventFields::Nested { data: other },
        };
        Self {
            event_type: event.event_type,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            fields,
        }
    }
}

impl PipelineLogger for JsonlPipelineLogger {
    fn log(&self, event: PipelineEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        let line = EventLine::new(&event);
        let written = serde_json::to_writer(&mut *writer, &line)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());
        if let Err(e) = written {
            warn!("Failed to write pipeline event {}: {}", event.event_type, e);
        }
    }
}
