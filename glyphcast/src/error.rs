use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode font: {0}")]
    Font(#[from] io::Error),
}
