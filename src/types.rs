// src/types.rs
use serde::Serialize;

use crate::drivers::{MonitorError, SampleTable};

/// The most recent physical lines of the source file, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    lines: Vec<String>,
}

impl Window {
    pub fn from_lines(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-joined text handed to the table parser.
    pub fn to_blob(&self) -> String {
        self.lines.join("\n")
    }
}

// 帧计数器，仅用作标题
#[derive(Clone, Copy, Debug, Default)]
pub struct TickCounter(u64);

impl TickCounter {
    /// Returns the current value and advances.
    pub fn advance(&mut self) -> u64 {
        let current = self.0;
        self.0 += 1;
        current
    }

    pub fn peek(&self) -> u64 {
        self.0
    }
}

/// Everything produced by one successful tick.
#[derive(Clone, Debug)]
pub struct TickFrame {
    pub tick: u64,
    pub window: Window,
    pub table: SampleTable,
}

impl TickFrame {
    pub fn dump(&self) -> FrameDump {
        FrameDump {
            tick: self.tick,
            lines: self.window.len(),
            columns: self.table.columns().as_slice().to_vec(),
            rows: (0..self.table.row_count())
                .map(|row| self.table.row(row))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, MonitorError> {
        Ok(serde_json::to_string_pretty(&self.dump())?)
    }
}

// 无界面模式下打印的 JSON 结构
#[derive(Debug, Serialize)]
pub struct FrameDump {
    pub tick: u64,
    pub lines: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
}
