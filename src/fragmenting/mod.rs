//! Fragmentation of a supersystem of nuclei.
//!
//! Fragments are views built from a subset of the supersystem concatenated with the nuclei of
//! the caps the fragment needs, so the nuclei of a fragment are never copied.

pub mod cap;
pub mod fragmented_nuclei;

pub use cap::{Cap, CapSet};
pub use fragmented_nuclei::FragmentedNuclei;
