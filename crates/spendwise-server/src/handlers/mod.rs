//! Request handlers

mod alerts;
mod categories;
mod expenses;
mod insights;
mod suggestions;

pub use alerts::*;
pub use categories::*;
pub use expenses::*;
pub use insights::*;
pub use suggestions::*;
