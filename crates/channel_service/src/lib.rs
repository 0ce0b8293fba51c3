//! Channel lookup for the analysis pipeline: turning user input into a
//! channel identifier and reading channel and video metadata.

pub mod client;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use client::ChannelDataClient;
pub use pipeline::{AnalysisError, ChannelAnalysis, ChannelAnalyzer};
pub use resolver::{ChannelReference, IdentifierResolver, ResolveError};
