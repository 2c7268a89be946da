//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init command and the shared open_db utility
//! - `analysis` - Suggest/check/insights commands
//! - `serve` - Web server command
//! - `status` - Status and alert listing commands

pub mod analysis;
pub mod core;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use analysis::*;
pub use core::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Cuts on char boundaries so multi-byte names are safe.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
