use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Catalog or viewport configuration defect. Raised at construction time only.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
