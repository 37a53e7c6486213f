use std::time::{Duration, Instant};
use crate::drivers::error::MonitorError;
use crate::drivers::table::{ColumnNames, SampleTable};
use crate::drivers::tailer::WindowSource;
use crate::types::{TickCounter, TickFrame};
/// Default refresh period between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
/// Read, parse and label one window per tick.
///
/// A read failure halts the pipeline for good; later ticks return
/// [`MonitorError::Halted`] without touching the source.
pub struct MonitorPipeline<S: WindowSource> {
    source: S,
    columns: ColumnNames,
    counter: TickCounter,
    halted: bool,
}
impl<S: WindowSource> MonitorPipeline<S> {
    pub fn new(source: S, columns: ColumnNames) -> Self {
        Self {
            source,
            columns,
            counter: TickCounter::default(),
            halted: false,
        }
    }
    pub fn tick(&mut self) -> Result<TickFrame, MonitorError> {
        if self.halted {
            return Err(MonitorError::Halted);
        }
        let tick = self.counter.advance();
        let window = match self.source.read_window() {
            Ok(window) => window,
            Err(err) => {
                log::error!("tick {tick}: {err}; no further ticks will run");
                self.halted = true;
                return Err(err);
            }
        };
        let table = SampleTable::parse(&window, &self.columns);
        if let Some(first) = table.warnings().first() {
            log::warn!(
                "tick {tick}: {} field(s) left missing, first at row {} column {} ({:?})",
                table.warnings().len(),
                first.row,
                first.column,
                first.raw
            );
        }
        log::debug!(
            "tick {tick}: {} lines, {} rows, {} missing cells",
            window.len(),
            table.row_count(),
            table.missing_count()
        );
        Ok(TickFrame {
            tick,
            window,
            table,
        })
    }
    pub fn is_halted(&self) -> bool {
        self.halted
    }
    pub fn ticks_attempted(&self) -> u64 {
        self.counter.peek()
    }
}
/// Fixed-period timer checked from the host's event loop.
///
/// At most one tick is due per check; a late check does not trigger a burst.
pub struct TickSchedule {
    interval: Duration,
    last: Option<Instant>,
}
impl TickSchedule {
    pub fn new(interval: Duration) -> Result<Self, MonitorError> {
        if interval.is_zero() {
            return Err(MonitorError::InvalidInterval);
        }
        Ok(Self {
            interval,
            last: None,
        })
    }
    /// Reports whether a tick should run at `now`, and records it if so.
    pub fn due(&mut self, now: Instant) -> bool {
        let ready = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last = Some(now);
        }
        ready
    }
    /// Time left before the next tick becomes due.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}
