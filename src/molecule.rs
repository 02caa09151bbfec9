//! Molecules: nuclei plus electronic charge and spin state.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::container::IndexableContainer;
use crate::nucleus::{Nuclei, NucleiView};
use crate::point::PointSetView;
use crate::view::{Const, Mutable};

// ==================
// Struct definitions
// ==================

/// Structure representing a molecule.
///
/// A molecule is always built through [`MoleculeBuilder`], which checks that the charge and
/// multiplicity fit the nuclei. Deserialisation goes through the same checks.
#[derive(Builder, Clone, Debug, PartialEq, Hash, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(try_from = "MoleculeRecord", into = "MoleculeRecord")]
pub struct Molecule {
    /// The nuclei constituting the molecule.
    nuclei: Nuclei,

    /// The net charge of the molecule.
    #[builder(default = "0")]
    charge: i32,

    /// The spin multiplicity $`2S + 1`$ of the molecule.
    #[builder(default = "1")]
    multiplicity: u32,
}

impl MoleculeBuilder {
    fn validate(&self) -> Result<(), String> {
        let nuclei = self
            .nuclei
            .as_ref()
            .ok_or("No nuclei found.".to_string())?;
        let charge = self.charge.unwrap_or(0);
        let multiplicity = self.multiplicity.unwrap_or(1);
        let n_electrons = i64::from(nuclei.view().total_atomic_number()) - i64::from(charge);
        if n_electrons < 0 {
            return Err(format!(
                "A net charge of {charge} leaves a negative number of electrons."
            ));
        }
        if multiplicity == 0 {
            return Err("The spin multiplicity must be positive.".to_string());
        }
        if (n_electrons + i64::from(multiplicity) - 1) % 2 != 0 {
            return Err(format!(
                "A spin multiplicity of {multiplicity} is incompatible with {n_electrons} electrons."
            ));
        }
        if i64::from(multiplicity) - 1 > n_electrons {
            return Err(format!(
                "A spin multiplicity of {multiplicity} needs more than {n_electrons} electrons."
            ));
        }
        Ok(())
    }
}

impl Molecule {
    /// Returns a builder to construct a new [`Molecule`].
    pub fn builder() -> MoleculeBuilder {
        MoleculeBuilder::default()
    }

    /// Returns the nuclei of the molecule.
    pub fn nuclei(&self) -> &Nuclei {
        &self.nuclei
    }

    /// Returns a read-only view of the nuclei of the molecule.
    pub fn nuclei_view(&self) -> NucleiView<'_, Const> {
        self.nuclei.view()
    }

    /// Returns a mutable view of the positions of the nuclei. The identities of the nuclei are
    /// read-only once the molecule is built, as they determine the number of electrons.
    pub fn positions_mut(&mut self) -> PointSetView<'_, Mutable> {
        self.nuclei.view_mut().point_set()
    }

    /// Returns the net charge.
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Returns the spin multiplicity.
    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Returns the number of electrons, i.e. the sum of the atomic numbers minus the net charge.
    pub fn n_electrons(&self) -> u32 {
        let n_electrons = i64::from(self.nuclei.view().total_atomic_number()) - i64::from(self.charge);
        u32::try_from(n_electrons).unwrap_or(0)
    }

    /// Returns the number of nuclei.
    pub fn n_nuclei(&self) -> usize {
        self.nuclei.size()
    }
}

// =====================
// Trait implementations
// =====================

/// The serialised form of a [`Molecule`].
#[derive(Serialize, Deserialize)]
struct MoleculeRecord {
    nuclei: Nuclei,
    charge: i32,
    multiplicity: u32,
}

impl TryFrom<MoleculeRecord> for Molecule {
    type Error = MoleculeBuilderError;

    fn try_from(record: MoleculeRecord) -> Result<Self, Self::Error> {
        Molecule::builder()
            .nuclei(record.nuclei)
            .charge(record.charge)
            .multiplicity(record.multiplicity)
            .build()
    }
}

impl From<Molecule> for MoleculeRecord {
    fn from(molecule: Molecule) -> Self {
        Self {
            nuclei: molecule.nuclei,
            charge: molecule.charge,
            multiplicity: molecule.multiplicity,
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Molecule with {} nuclei, charge {:+}, multiplicity {}",
            self.nuclei.size(),
            self.charge,
            self.multiplicity
        )?;
        write!(f, "{}", self.nuclei)
    }
}

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;
