//! CLI command implementations

mod completions;
mod generate;
mod init;

pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
