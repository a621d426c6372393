use rusoto_core::{region::ParseRegionError, RusotoError};
use rusoto_dynamodb::BatchWriteItemError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}. Examples of region can be found in help")]
    InvalidRegion(#[from] ParseRegionError),

    #[error("batch write error: {0}")]
    BatchWrite(#[from] RusotoError<BatchWriteItemError>),

    #[error("{count} items were not processed by DynamoDB")]
    Unprocessed { count: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
