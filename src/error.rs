//! Error taxonomy for containers, views and the entities they alias.

use thiserror::Error;

/// Recoverable failures raised by the data-model layer.
///
/// Every operation returning one of these validates its inputs before mutating anything, so the
/// receiver is left untouched when an error is reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChemistError {
    /// A checked access was attempted at an index that is not smaller than the container size.
    #[error("index {index} is out of range for a container of size {size}")]
    OutOfRange { index: usize, size: usize },

    /// A property was requested from an object that does not hold it (a null view, a basis set
    /// without a name, a cap without an anchor, ...).
    #[error("{what} is not set")]
    NullState { what: &'static str },

    /// An element-wise overwrite was attempted between containers of different sizes.
    #[error("size mismatch: expected {expected} but found {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// A set of elements could not be expressed as a subset of a supersystem.
    #[error("not a subset: {0}")]
    NotASubset(String),
}

impl ChemistError {
    /// Returns an error if `index` is not a valid index for a container of `size` elements.
    pub(crate) fn check_index(index: usize, size: usize) -> Result<(), Self> {
        if index < size {
            Ok(())
        } else {
            Err(ChemistError::OutOfRange { index, size })
        }
    }

    /// Returns an error if the two sizes differ.
    pub(crate) fn check_size(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(ChemistError::SizeMismatch { expected, found })
        }
    }
}
