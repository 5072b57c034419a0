//! Unix-specific platform implementations

mod filesystem;
mod signals;

pub use filesystem::UnixFilesystem;
pub use signals::UnixSignals;
