// src/drivers/mod.rs
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod table;
pub mod tailer;
pub use error::MonitorError;
pub use pipeline::{MonitorPipeline, TickSchedule, DEFAULT_INTERVAL};
pub use plot::{render_tick_png, PlotStyle};
pub use table::{ColumnNames, SampleTable, DEFAULT_COLUMN_COUNT};
pub use tailer::FileTailer;
