//! CLI command implementations

pub mod check;
pub mod package;

pub use check::CheckCommand;
pub use package::PackageCommand;
