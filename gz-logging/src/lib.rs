//! gz-logging: append-only NDJSON events for search post-mortems.
//!
//! One JSON object per line, written by the search driver between
//! moves. Readers must be lenient: a crash can leave a trailing partial
//! line, which is data loss for that event only.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use gz_core::Vertex;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema fields stamped on every event.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaInfoV1 {
    pub schema_version: u32,
    pub board_size: u32,
    pub ruleset_id: &'static str,
}

/// Per-move summary of the finished root search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRootEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: SchemaInfoV1,

    pub run_id: String,
    pub move_number: u32,
    /// 0 = Black, 1 = White.
    pub to_move: u8,

    pub root_visits: u32,
    pub node_count: u64,
    pub chosen_vertex: Vertex,
    pub root_eval: f32,
    pub root_lcb: f32,
    /// Racy telemetry from selection; may lag the final tree state.
    pub policy_explored: f32,
}

/// Periodic tree health counters.
#[derive(Debug, Clone, Serialize)]
pub struct TreeStatsEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: SchemaInfoV1,

    pub run_id: String,
    pub playouts: u64,
    pub node_count: u64,
    pub expansions: u64,
    pub eval_failures: u64,
}

#[derive(Debug)]
pub enum EventLogError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for EventLogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for EventLogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// When the log flushes its buffered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Only on an explicit `flush` call (and on drop of the buffer).
    Manual,
    /// After every N written lines.
    EveryLines(u64),
}

/// Append-only NDJSON event log.
///
/// Contract: each `write` emits exactly one JSON object and a newline.
pub struct EventLog {
    sink: BufWriter<File>,
    policy: FlushPolicy,
    pending_lines: u64,
    total_lines: u64,
}

impl EventLog {
    /// Open for appending, creating the file if needed.
    pub fn append(path: impl AsRef<Path>, policy: FlushPolicy) -> Result<Self, EventLogError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(EventLog {
            sink: BufWriter::new(file),
            policy,
            pending_lines: 0,
            total_lines: 0,
        })
    }

    pub fn write<T: Serialize>(&mut self, event: &T) -> Result<(), EventLogError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.sink.write_all(&line)?;
        self.pending_lines += 1;
        self.total_lines += 1;
        if let FlushPolicy::EveryLines(n) = self.policy {
            if n > 0 && self.pending_lines >= n {
                self.flush()?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), EventLogError> {
        self.sink.flush()?;
        self.pending_lines = 0;
        Ok(())
    }

    /// Lines written over the log's lifetime.
    pub fn written_lines(&self) -> u64 {
        self.total_lines
    }
}
