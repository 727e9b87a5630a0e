#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("sample buffer capacity must be greater than zero")]
    ZeroCapacity,
}
