//! Caps: nuclei added to a fragment in place of the bonds it severs.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::nucleus::{Nuclei, NucleiView, Nucleus, NucleusView};
use crate::view::{Const, ContainerView, Mutable};

// ---
// Cap
// ---

/// Structure representing a cap.
///
/// A cap is attached to an *anchor* nucleus of the supersystem and stands in for a *replaced*
/// nucleus. When a fragment contains the anchor but not the replaced nucleus, the nuclei of the
/// cap are appended to the fragment.
#[derive(Clone, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cap {
    anchor: Option<usize>,
    replaced: Option<usize>,
    nuclei: Nuclei,
}

impl Cap {
    /// Creates a cap.
    ///
    /// # Arguments
    ///
    /// * `anchor` - The index of the supersystem nucleus the cap is attached to.
    /// * `replaced` - The index of the supersystem nucleus the cap replaces.
    /// * `nuclei` - The nuclei comprising the cap.
    pub fn new<I>(anchor: usize, replaced: usize, nuclei: I) -> Self
    where
        I: IntoIterator<Item = Nucleus>,
    {
        Self {
            anchor: Some(anchor),
            replaced: Some(replaced),
            nuclei: nuclei.into_iter().collect(),
        }
    }

    /// Appends a nucleus to the cap.
    pub fn insert(&mut self, nucleus: Nucleus) {
        self.nuclei.push(nucleus);
    }

    /// Returns nucleus `i` of the cap.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at(&self, i: usize) -> Result<NucleusView<'_, Const>, ChemistError> {
        self.nuclei.at(i)
    }

    /// Returns a mutable view of nucleus `i` of the cap.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<NucleusView<'_, Mutable>, ChemistError> {
        self.nuclei.at_mut(i)
    }

    /// Returns the number of nuclei in the cap.
    pub fn size(&self) -> usize {
        self.nuclei.size()
    }

    pub fn nuclei(&self) -> &Nuclei {
        &self.nuclei
    }

    pub fn set_anchor_index(&mut self, anchor: usize) {
        self.anchor = Some(anchor);
    }

    /// Returns the index of the anchor nucleus.
    ///
    /// # Errors
    ///
    /// Errors if the anchor has not been set.
    pub fn anchor_index(&self) -> Result<usize, ChemistError> {
        self.anchor.ok_or(ChemistError::NullState {
            what: "anchor index of the cap",
        })
    }

    pub fn set_replaced_index(&mut self, replaced: usize) {
        self.replaced = Some(replaced);
    }

    /// Returns the index of the replaced nucleus.
    ///
    /// # Errors
    ///
    /// Errors if the replaced nucleus has not been set.
    pub fn replaced_index(&self) -> Result<usize, ChemistError> {
        self.replaced.ok_or(ChemistError::NullState {
            what: "replaced index of the cap",
        })
    }

    /// Returns `true` if the cap applies to a fragment made of the nuclei `fragment`.
    fn caps(&self, fragment: &BTreeSet<usize>) -> bool {
        self.anchor
            .is_some_and(|anchor| fragment.contains(&anchor))
            && !self
                .replaced
                .is_some_and(|replaced| fragment.contains(&replaced))
    }
}

impl fmt::Display for Cap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = |index: Option<usize>| index.map_or("-".to_string(), |i| i.to_string());
        writeln!(
            f,
            "Cap anchored at {} replacing {}:",
            index(self.anchor),
            index(self.replaced)
        )?;
        write!(f, "{}", self.nuclei)
    }
}

// ------
// CapSet
// ------

/// Structure storing the caps of a fragmented system in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct CapSet {
    caps: Vec<Cap>,
}

impl CapSet {
    /// Creates an empty cap set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cap.
    pub fn push(&mut self, cap: Cap) {
        self.caps.push(cap);
    }

    /// Returns the indices of the caps needed by a fragment made of the nuclei `fragment`.
    ///
    /// A cap is needed if the fragment contains its anchor but not the nucleus it replaces.
    pub fn get_cap_indices(&self, fragment: &[usize]) -> Vec<usize> {
        let fragment = fragment.iter().copied().collect::<BTreeSet<_>>();
        self.caps
            .iter()
            .enumerate()
            .filter_map(|(i, cap)| cap.caps(&fragment).then_some(i))
            .collect()
    }

    /// Returns a read-only view of the nuclei of all caps needed by a fragment, in cap order.
    ///
    /// The view is null if no caps are needed.
    pub fn get_cap_nuclei(&self, fragment: &[usize]) -> NucleiView<'_, Const> {
        let indices = self.get_cap_indices(fragment);
        ContainerView::concatenate(indices.into_iter().map(|i| self.caps[i].nuclei.view()))
    }

    /// Returns a mutable view of the nuclei of all caps needed by a fragment, in cap order.
    ///
    /// The view is null if no caps are needed.
    pub fn get_cap_nuclei_mut(&mut self, fragment: &[usize]) -> NucleiView<'_, Mutable> {
        let fragment = fragment.iter().copied().collect::<BTreeSet<_>>();
        ContainerView::concatenate(
            self.caps
                .iter_mut()
                .filter(|cap| cap.caps(&fragment))
                .map(|cap| cap.nuclei.view_mut()),
        )
    }
}

impl IndexableContainer for CapSet {
    type Element<'s> = &'s Cap;

    fn size_impl(&self) -> usize {
        self.caps.len()
    }

    fn at_impl(&self, i: usize) -> &Cap {
        &self.caps[i]
    }
}

impl FromIterator<Cap> for CapSet {
    fn from_iter<I: IntoIterator<Item = Cap>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for CapSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cap in self.caps.iter() {
            write!(f, "{cap}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cap_tests.rs"]
mod cap_tests;
