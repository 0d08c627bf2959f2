use thiserror::Error;

use crate::criteria::InvalidCriteria;
use postsignal_world::UnknownPlatform;

#[derive(Error, Debug)]
pub enum PostSignalError {
    #[error(transparent)]
    UnknownPlatform(#[from] UnknownPlatform),

    #[error(transparent)]
    InvalidCriteria(#[from] InvalidCriteria),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
