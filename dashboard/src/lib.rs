//! Terminal front end for channel analysis: configuration, text rendering
//! and the interactive session.

pub mod config;
pub mod render;
pub mod session;

pub use config::Settings;
pub use session::Dashboard;

/// The channel reference given on the command line, arguments joined with
/// spaces
pub fn input_from_args(args: impl IntoIterator<Item = String>) -> Option<String> {
    let joined = args.into_iter().collect::<Vec<_>>().join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
