//! Human-readable specification of fragments and caps in chemviews input configuration.

use anyhow::{self, format_err};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::ElementMap;
use crate::fragmenting::{Cap, CapSet, FragmentedNuclei};
use crate::interfaces::input::molecule::{to_nuclei, InputNucleus};
use crate::nucleus::Nuclei;

/// Serialisable/deserialisable structure representing a cap.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputCap {
    /// The index of the supersystem nucleus the cap is attached to.
    pub anchor: usize,

    /// The index of the supersystem nucleus the cap replaces.
    pub replaced: usize,

    /// The nuclei comprising the cap.
    pub nuclei: Vec<InputNucleus>,
}

impl InputCap {
    /// Returns a builder to construct [`InputCap`].
    pub fn builder() -> InputCapBuilder {
        InputCapBuilder::default()
    }

    /// Converts the [`InputCap`] to a [`Cap`].
    pub fn to_cap(&self, emap: &ElementMap) -> Result<Cap, anyhow::Error> {
        Ok(Cap::new(
            self.anchor,
            self.replaced,
            Vec::from(to_nuclei(&self.nuclei, emap)?),
        ))
    }
}

/// Serialisable/deserialisable structure describing how the nuclei of a molecule are divided
/// into fragments.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputFragments {
    /// The nucleus indices of each fragment.
    pub fragments: Vec<Vec<usize>>,

    /// The caps available to the fragments.
    #[builder(default)]
    #[serde(default)]
    pub caps: Vec<InputCap>,
}

impl InputFragments {
    /// Returns a builder to construct [`InputFragments`].
    pub fn builder() -> InputFragmentsBuilder {
        InputFragmentsBuilder::default()
    }

    /// Fragments `supersystem` as specified.
    ///
    /// # Errors
    ///
    /// Errors if a fragment refers to a nucleus outside `supersystem` or if a cap nucleus has an
    /// unknown element symbol.
    pub fn to_fragmented_nuclei(
        &self,
        supersystem: Nuclei,
        emap: &ElementMap,
    ) -> Result<FragmentedNuclei, anyhow::Error> {
        let caps = self
            .caps
            .iter()
            .map(|cap| cap.to_cap(emap))
            .collect::<Result<CapSet, _>>()?;
        FragmentedNuclei::with_fragments(supersystem, self.fragments.clone(), caps)
            .map_err(|err| format_err!(err))
    }
}
