use std::fmt;

use anyhow::Result;
use thiserror::Error;

pub trait Engine {
    fn run(&mut self, input: &str) -> Result<String>;
}

/// Every diagnostic raised while parsing one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<String>);

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}

impl std::error::Error for ParseErrors {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseErrors),
    #[error("{0}")]
    Runtime(String),
}
