//! YAML input configuration describing a chemical system.

use anyhow;
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::ElementMap;
use crate::basis_set::AOBasisSet;
use crate::container::IndexableContainer;
use crate::fragmenting::FragmentedNuclei;
use crate::interfaces::InputHandle;
use crate::io::format::{chemviews_output, log_subtitle, log_title, ChemviewsOutput};
use crate::molecule::Molecule;

pub mod basis;
pub mod fragments;
pub mod molecule;

use basis::{to_ao_basis_set, InputAtomicBasis};
use fragments::InputFragments;
use molecule::InputMolecule;

/// A structure containing chemviews input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChemistInput {
    /// The molecule.
    pub molecule: InputMolecule,

    /// The atomic-orbital basis, one entry per nucleus carrying basis functions. If not
    /// specified, the system has no basis.
    #[serde(default)]
    pub basis: Option<Vec<InputAtomicBasis>>,

    /// How the nuclei of the molecule are divided into fragments. If not specified, the system is
    /// not fragmented.
    #[serde(default)]
    pub fragmentation: Option<InputFragments>,
}

impl ChemistInput {
    /// Builds the molecule described by the input.
    ///
    /// # Arguments
    ///
    /// * `emap` - The look-up of atomic numbers and masses.
    pub fn to_molecule(&self, emap: &ElementMap) -> Result<Molecule, anyhow::Error> {
        self.molecule.to_molecule(emap)
    }

    /// Builds the AO basis set described by the input, if any.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule the basis refers to.
    pub fn to_ao_basis_set(&self, molecule: &Molecule) -> Result<Option<AOBasisSet>, anyhow::Error> {
        self.basis
            .as_ref()
            .map(|basis| to_ao_basis_set(basis, molecule.nuclei()))
            .transpose()
    }

    /// Builds the fragmented nuclei described by the input, if any.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule whose nuclei are fragmented.
    /// * `emap` - The look-up of atomic numbers and masses for the cap nuclei.
    pub fn to_fragmented_nuclei(
        &self,
        molecule: &Molecule,
        emap: &ElementMap,
    ) -> Result<Option<FragmentedNuclei>, anyhow::Error> {
        self.fragmentation
            .as_ref()
            .map(|fragmentation| {
                fragmentation.to_fragmented_nuclei(molecule.nuclei().clone(), emap)
            })
            .transpose()
    }
}

impl InputHandle for ChemistInput {
    fn handle(&self) -> Result<(), anyhow::Error> {
        let emap = ElementMap::new();
        let molecule = self.to_molecule(&emap)?;
        log_title("Chemical System");
        chemviews_output!("");
        log_subtitle("Molecule");
        molecule.log_output_display();
        chemviews_output!("");

        if let Some(basis) = self.to_ao_basis_set(&molecule)? {
            log_subtitle("AO basis set");
            basis.log_output_display();
            chemviews_output!("");
        }

        if let Some(fragmented) = self.to_fragmented_nuclei(&molecule, &emap)? {
            log_subtitle("Fragments");
            fragmented.log_output_display();
            for (i, fragment) in fragmented.iter().enumerate() {
                let center_of_mass = fragment
                    .center_of_mass()
                    .map_or("n/a".to_string(), |com| com.to_string());
                chemviews_output!(
                    "Fragment {i}: {} nuclei, charge {:+.3}, centre of mass {center_of_mass}",
                    fragment.size(),
                    fragment.total_charge()
                );
            }
            chemviews_output!("");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
