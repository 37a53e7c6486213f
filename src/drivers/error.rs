use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("window bound must be at least 1 line")]
    InvalidWindowBound,
    #[error("column count must be at least 1")]
    InvalidColumnCount,
    #[error("refresh interval must be greater than zero")]
    InvalidInterval,
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tick driver halted after a fatal read error")]
    Halted,
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to encode table: {0}")]
    Encode(#[from] serde_json::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for MonitorError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        MonitorError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for MonitorError {
    fn from(value: image::ImageError) -> Self {
        MonitorError::Plot(value.to_string())
    }
}
