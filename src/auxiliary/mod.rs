//! Helper items shared across the crate.

pub mod atom;
pub mod misc;
