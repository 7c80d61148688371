pub mod models;
pub mod prompt;
pub mod utils;

use std::time::Duration;

pub use color_eyre::{
    eyre::{bail, eyre as err, Context, Report},
    install,
};

#[twelf::config]
pub struct Conf {
    /// Base URL of the local generation service
    pub endpoint: Option<String>,

    /// Model requested from the generation service
    pub model: Option<String>,

    /// Minimum chapter length, in characters
    pub min_chapter_length: Option<usize>,

    /// Maximum continuation requests per generation call
    pub max_continuations: Option<usize>,

    /// Per-request timeout, in seconds
    pub timeout_secs: Option<u64>,

    /// Directory that generated stories are written into
    pub output: Option<String>,
}

impl Conf {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or("http://localhost:11434")
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or("llama3.2")
    }

    pub fn min_chapter_length(&self) -> usize {
        self.min_chapter_length.unwrap_or(1000)
    }

    pub fn max_continuations(&self) -> usize {
        self.max_continuations.unwrap_or(16)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(120))
    }

    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or(".")
    }
}
