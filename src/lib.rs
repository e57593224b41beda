pub use client::MmaClient;
pub use config::OddsConfig;
pub use error::{MmaError, Result};
pub use pipeline::{ExecutionMode, PipelineOutput, RunReport, SkippedPage};

mod client;
mod config;
mod error;
pub mod matching;
pub mod model;
pub mod normalize;
mod odds_api;
mod pipeline;
mod scraper;
