//! Nuclei of a supersystem partitioned into (possibly overlapping) fragments.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::fragmenting::cap::{Cap, CapSet};
use crate::nucleus::{Nuclei, NucleiView, Nucleus};
use crate::view::{Const, ContainerView, Mutable};

/// Structure representing a supersystem of nuclei together with fragments of it.
///
/// Each fragment is stored as a sorted list of supersystem indices. The nuclei of fragment `i`
/// are those nuclei, in index order, followed by the nuclei of every cap the fragment needs.
/// Fragments are handed out as views, so no nucleus is ever copied. Deserialised fragments are
/// checked against the supersystem like inserted ones.
#[derive(Clone, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FragmentedNucleiRecord", into = "FragmentedNucleiRecord")]
pub struct FragmentedNuclei {
    supersystem: Nuclei,
    fragments: Vec<Vec<usize>>,
    caps: CapSet,
}

impl FragmentedNuclei {
    /// Creates an unfragmented supersystem.
    pub fn new(supersystem: Nuclei) -> Self {
        Self {
            supersystem,
            ..Self::default()
        }
    }

    /// Creates a fragmented supersystem.
    ///
    /// # Arguments
    ///
    /// * `supersystem` - The nuclei being fragmented.
    /// * `fragments` - The supersystem indices of each fragment.
    /// * `caps` - The caps available to the fragments.
    ///
    /// # Errors
    ///
    /// Errors if a fragment refers to a nucleus outside the supersystem.
    pub fn with_fragments<I, F>(
        supersystem: Nuclei,
        fragments: I,
        caps: CapSet,
    ) -> Result<Self, ChemistError>
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = usize>,
    {
        let mut fragmented = Self {
            supersystem,
            fragments: Vec::new(),
            caps,
        };
        fragments
            .into_iter()
            .try_for_each(|fragment| fragmented.insert(fragment))?;
        Ok(fragmented)
    }

    pub fn supersystem(&self) -> &Nuclei {
        &self.supersystem
    }

    pub fn cap_set(&self) -> &CapSet {
        &self.caps
    }

    /// Adds a cap available to all fragments.
    pub fn add_cap(&mut self, cap: Cap) {
        self.caps.push(cap);
    }

    /// Adds a fragment given by supersystem indices. Duplicated indices are collapsed.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::NotASubset`] if an index is outside the supersystem, in which
    /// case no fragment is added.
    pub fn insert<I>(&mut self, indices: I) -> Result<(), ChemistError>
    where
        I: IntoIterator<Item = usize>,
    {
        let n_nuclei = self.supersystem.size();
        let fragment = indices.into_iter().sorted().dedup().collect_vec();
        if let Some(&index) = fragment.iter().find(|&&index| index >= n_nuclei) {
            return Err(ChemistError::NotASubset(format!(
                "nucleus {index} is not part of a supersystem of {n_nuclei} nuclei"
            )));
        }
        log::debug!(
            "Fragment {} contains nuclei [{}].",
            self.fragments.len(),
            fragment.iter().join(", ")
        );
        self.fragments.push(fragment);
        Ok(())
    }

    /// Adds a fragment given by the values of its nuclei.
    ///
    /// Each nucleus is matched to the first equal nucleus of the supersystem.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::NotASubset`] if a nucleus is not found in the supersystem, in
    /// which case no fragment is added.
    pub fn insert_nuclei<'n, I>(&mut self, nuclei: I) -> Result<(), ChemistError>
    where
        I: IntoIterator<Item = &'n Nucleus>,
    {
        let indices = nuclei
            .into_iter()
            .map(|nucleus| {
                self.supersystem.find(nucleus).ok_or_else(|| {
                    ChemistError::NotASubset(format!(
                        "nucleus {} is not part of the supersystem",
                        nucleus.name()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.insert(indices)
    }

    /// Returns the number of fragments.
    pub fn size(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the sorted supersystem indices of fragment `i`, caps excluded.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn nuclear_indices(&self, i: usize) -> Result<&[usize], ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(&self.fragments[i])
    }

    /// Returns a read-only view of the nuclei of fragment `i`, caps included.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at(&self, i: usize) -> Result<NucleiView<'_, Const>, ChemistError> {
        let members = self.nuclear_indices(i)?;
        let nuclei = self.supersystem.view().subset(members.iter().copied())?;
        Ok(ContainerView::concatenate([
            nuclei,
            self.caps.get_cap_nuclei(members),
        ]))
    }

    /// Alias of [`Self::at`].
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn fragment(&self, i: usize) -> Result<NucleiView<'_, Const>, ChemistError> {
        self.at(i)
    }

    /// Returns a mutable view of the nuclei of fragment `i`, caps included. Writing through the
    /// view modifies the supersystem and the caps.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn fragment_mut(&mut self, i: usize) -> Result<NucleiView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        let FragmentedNuclei {
            supersystem,
            fragments,
            caps,
        } = self;
        let members = &fragments[i];
        let nuclei = supersystem.view_mut().subset(members.iter().copied())?;
        Ok(ContainerView::concatenate([
            nuclei,
            caps.get_cap_nuclei_mut(members),
        ]))
    }

    /// Returns an iterator over read-only views of all fragments.
    pub fn iter(&self) -> impl Iterator<Item = NucleiView<'_, Const>> + '_ {
        (0..self.size()).filter_map(|i| self.at(i).ok())
    }
}

/// The serialised form of a [`FragmentedNuclei`].
#[derive(Serialize, Deserialize)]
struct FragmentedNucleiRecord {
    supersystem: Nuclei,
    fragments: Vec<Vec<usize>>,
    caps: CapSet,
}

impl TryFrom<FragmentedNucleiRecord> for FragmentedNuclei {
    type Error = ChemistError;

    fn try_from(record: FragmentedNucleiRecord) -> Result<Self, Self::Error> {
        Self::with_fragments(record.supersystem, record.fragments, record.caps)
    }
}

impl From<FragmentedNuclei> for FragmentedNucleiRecord {
    fn from(fragmented: FragmentedNuclei) -> Self {
        Self {
            supersystem: fragmented.supersystem,
            fragments: fragmented.fragments,
            caps: fragmented.caps,
        }
    }
}

impl fmt::Display for FragmentedNuclei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} fragments of {} nuclei with {} caps",
            self.size(),
            self.supersystem.size(),
            self.caps.size()
        )?;
        for (i, fragment) in self.fragments.iter().enumerate() {
            let n_caps = self.caps.get_cap_indices(fragment).len();
            writeln!(
                f,
                "  Fragment {i}: [{}] + {n_caps} cap(s)",
                fragment.iter().join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fragmented_nuclei_tests.rs"]
mod fragmented_nuclei_tests;
