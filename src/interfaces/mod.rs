//! Interfaces between chemviews and external descriptions of chemical systems.

use anyhow;

pub mod input;

/// Trait for handling an input specification.
pub trait InputHandle {
    /// Handles the input specification: builds every object it describes and logs a summary.
    fn handle(&self) -> Result<(), anyhow::Error>;
}
