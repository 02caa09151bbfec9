//! Atomic-orbital basis sets: one atomic basis set per centre.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::basis_set::atomic_basis_set::{AtomicBasisSet, AtomicBasisSetView};
use crate::basis_set::primitive::PrimitiveView;
use crate::basis_set::shell::ShellView;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::view::{Const, Mutable};

/// Structure representing the atomic-orbital basis of a whole molecule as an ordered list of
/// atomic basis sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AOBasisSet {
    centers: Vec<AtomicBasisSet>,
}

/// Returns the prefix sums of `sizes`, starting at zero.
fn offsets<I: Iterator<Item = usize>>(sizes: I) -> Vec<usize> {
    std::iter::once(0)
        .chain(sizes.scan(0, |total, size| {
            *total += size;
            Some(*total)
        }))
        .collect()
}

impl AOBasisSet {
    /// Creates an empty AO basis set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the atomic basis set of one more centre.
    pub fn add_center(&mut self, center: AtomicBasisSet) {
        self.centers.push(center);
    }

    /// Returns the largest angular momentum over all shells.
    ///
    /// # Errors
    ///
    /// Errors if the basis set contains no shells.
    pub fn max_l(&self) -> Result<u32, ChemistError> {
        self.shells()
            .map(|shell| shell.l())
            .max()
            .ok_or(ChemistError::NullState {
                what: "shell of an AO basis set",
            })
    }

    /// Returns the total number of shells over all centres.
    pub fn n_shells(&self) -> usize {
        self.centers.iter().map(AtomicBasisSet::size).sum()
    }

    /// Returns the total number of atomic orbitals over all centres.
    pub fn n_aos(&self) -> usize {
        self.centers.iter().map(AtomicBasisSet::n_aos).sum()
    }

    /// Returns the total number of primitives over all centres.
    pub fn n_primitives(&self) -> usize {
        self.centers.iter().map(AtomicBasisSet::n_primitives).sum()
    }

    /// Returns the index of the first shell of each centre, followed by the total number of
    /// shells.
    pub fn shell_offsets(&self) -> Vec<usize> {
        offsets(self.centers.iter().map(AtomicBasisSet::size))
    }

    /// Returns the index of the first atomic orbital of each centre, followed by the total number
    /// of atomic orbitals.
    pub fn ao_offsets(&self) -> Vec<usize> {
        offsets(self.centers.iter().map(AtomicBasisSet::n_aos))
    }

    /// Returns the index of the first primitive of each centre, followed by the total number of
    /// primitives.
    pub fn primitive_offsets(&self) -> Vec<usize> {
        offsets(self.centers.iter().map(AtomicBasisSet::n_primitives))
    }

    fn range(offsets: &[usize], center: usize) -> Result<Range<usize>, ChemistError> {
        ChemistError::check_index(center, offsets.len().saturating_sub(1))?;
        Ok(offsets[center]..offsets[center + 1])
    }

    /// Returns the global indices of the shells of centre `center`.
    ///
    /// # Errors
    ///
    /// Errors if `center` is out of range.
    pub fn shell_range(&self, center: usize) -> Result<Range<usize>, ChemistError> {
        Self::range(&self.shell_offsets(), center)
    }

    /// Returns the global indices of the atomic orbitals of centre `center`.
    ///
    /// # Errors
    ///
    /// Errors if `center` is out of range.
    pub fn ao_range(&self, center: usize) -> Result<Range<usize>, ChemistError> {
        Self::range(&self.ao_offsets(), center)
    }

    /// Returns the global indices of the primitives of centre `center`.
    ///
    /// # Errors
    ///
    /// Errors if `center` is out of range.
    pub fn primitive_range(&self, center: usize) -> Result<Range<usize>, ChemistError> {
        Self::range(&self.primitive_offsets(), center)
    }

    /// Returns shell `i`, counted across all centres.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn shell(&self, i: usize) -> Result<ShellView<'_, Const>, ChemistError> {
        ChemistError::check_index(i, self.n_shells())?;
        let shell_offsets = self.shell_offsets();
        let center = shell_offsets.partition_point(|&offset| offset <= i) - 1;
        self.centers[center].at(i - shell_offsets[center])
    }

    /// Returns an iterator over all shells, centre by centre.
    pub fn shells(&self) -> impl Iterator<Item = ShellView<'_, Const>> + '_ {
        self.centers.iter().flat_map(|center| center.iter())
    }

    /// Returns primitive `i`, counted across all shells of all centres.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn primitive(&self, i: usize) -> Result<PrimitiveView<'_, Const>, ChemistError> {
        ChemistError::check_index(i, self.n_primitives())?;
        let primitive_offsets = self.primitive_offsets();
        let center = primitive_offsets.partition_point(|&offset| offset <= i) - 1;
        self.centers[center].primitive(i - primitive_offsets[center])
    }

    /// Returns a mutable view of the atomic basis set of centre `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<AtomicBasisSetView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(self.centers[i].view_mut())
    }
}

impl IndexableContainer for AOBasisSet {
    type Element<'s> = AtomicBasisSetView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.centers.len()
    }

    fn at_impl(&self, i: usize) -> AtomicBasisSetView<'_, Const> {
        self.centers[i].view()
    }
}

impl FromIterator<AtomicBasisSet> for AOBasisSet {
    fn from_iter<I: IntoIterator<Item = AtomicBasisSet>>(iter: I) -> Self {
        Self {
            centers: iter.into_iter().collect(),
        }
    }
}

impl Hash for AOBasisSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.centers.hash(state);
    }
}

impl fmt::Display for AOBasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "AO basis set with {} centres, {} shells, {} AOs and {} primitives",
            self.size(),
            self.n_shells(),
            self.n_aos(),
            self.n_primitives()
        )?;
        for (i, center) in self.centers.iter().enumerate() {
            write!(f, "[{i}] {center}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "ao_basis_set_tests.rs"]
mod ao_basis_set_tests;
