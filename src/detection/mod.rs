pub mod client;
pub mod handlers;
pub mod labels;
pub mod services;

use thiserror::Error;

pub use client::{Detector, TfServingDetector};

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("model server unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),

    #[error("model '{0}' is not available")]
    NotReady(String),
}
