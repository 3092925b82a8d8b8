use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProfilerError {
    #[error("sensor source error: {0}")]
    Source(String),
    #[error("setpoint sink error: {0}")]
    Sink(String),
    #[error("invalid state: {0}")]
    State(String),
    #[error("timeout waiting for sensor tick")]
    Timeout,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("profile has no phases")]
    EmptyProfile,
}

pub type Result<T> = eyre::Result<T>;
