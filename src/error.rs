use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid absolute range: from={from}, to={to}")]
    InvalidRange { from: i64, to: i64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
