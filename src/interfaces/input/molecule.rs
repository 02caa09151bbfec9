//! Human-readable specification of nuclei and molecules in chemviews input configuration.

use anyhow::{self, format_err};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::auxiliary::atom::ElementMap;
use crate::molecule::Molecule;
use crate::nucleus::{Nuclei, Nucleus};
use crate::point::Point;

// ------------
// InputNucleus
// ------------

/// Serialisable/deserialisable structure representing a nucleus given by its element symbol.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputNucleus {
    /// The element symbol, e.g. `"He"`. This is also used as the name of the nucleus.
    #[builder(setter(into))]
    pub symbol: String,

    /// The Cartesian coordinates of the nucleus.
    pub position: [f64; 3],

    /// An optional mass overriding the tabulated mass of the element.
    #[builder(default = "None")]
    #[serde(default)]
    pub mass: Option<f64>,

    /// An optional charge overriding the atomic number, e.g. for ghost atoms.
    #[builder(default = "None")]
    #[serde(default)]
    pub charge: Option<f64>,
}

impl InputNucleus {
    /// Returns a builder to construct [`InputNucleus`].
    pub fn builder() -> InputNucleusBuilder {
        InputNucleusBuilder::default()
    }

    /// Converts the [`InputNucleus`] to a [`Nucleus`].
    ///
    /// # Arguments
    ///
    /// * `emap` - The look-up of atomic numbers and masses.
    ///
    /// # Returns
    ///
    /// The nucleus, or an error if the element symbol is not known.
    pub fn to_nucleus(&self, emap: &ElementMap) -> Result<Nucleus, anyhow::Error> {
        let [x, y, z] = self.position;
        let (atomic_number, tabulated_mass) = emap.get(&self.symbol)?;
        Ok(Nucleus::with_charge(
            &self.symbol,
            atomic_number,
            self.mass.unwrap_or(tabulated_mass),
            Point::new(x, y, z),
            self.charge.unwrap_or(f64::from(atomic_number)),
        ))
    }
}

/// Converts a list of [`InputNucleus`] to [`Nuclei`].
pub(crate) fn to_nuclei(
    nuclei: &[InputNucleus],
    emap: &ElementMap,
) -> Result<Nuclei, anyhow::Error> {
    nuclei
        .iter()
        .map(|nucleus| nucleus.to_nucleus(emap))
        .collect()
}

// -------------
// InputMolecule
// -------------

/// Serialisable/deserialisable structure representing a molecule.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputMolecule {
    /// The net charge of the molecule.
    #[builder(default = "0")]
    #[serde(default)]
    pub charge: i32,

    /// The spin multiplicity of the molecule.
    #[builder(default = "1")]
    #[serde(default = "default_multiplicity")]
    pub multiplicity: u32,

    /// The nuclei of the molecule, in order.
    pub nuclei: Vec<InputNucleus>,
}

fn default_multiplicity() -> u32 {
    1
}

impl InputMolecule {
    /// Returns a builder to construct [`InputMolecule`].
    pub fn builder() -> InputMoleculeBuilder {
        InputMoleculeBuilder::default()
    }

    /// Converts the [`InputMolecule`] to a [`Molecule`].
    ///
    /// # Arguments
    ///
    /// * `emap` - The look-up of atomic numbers and masses.
    ///
    /// # Returns
    ///
    /// The molecule, or an error if an element symbol is not known or if the charge and
    /// multiplicity are inconsistent with the nuclei.
    pub fn to_molecule(&self, emap: &ElementMap) -> Result<Molecule, anyhow::Error> {
        Molecule::builder()
            .nuclei(to_nuclei(&self.nuclei, emap)?)
            .charge(self.charge)
            .multiplicity(self.multiplicity)
            .build()
            .map_err(|err| format_err!(err))
    }
}
