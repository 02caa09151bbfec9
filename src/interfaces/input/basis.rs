//! Human-readable specification of atomic-orbital basis information in chemviews input
//! configuration.

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::basis_set::{AOBasisSet, AtomicBasisSet, ShellType};
use crate::container::IndexableContainer;
use crate::nucleus::Nuclei;
use crate::point::Point;

// ----------
// InputShell
// ----------

/// Serialisable/deserialisable structure representing a contracted shell.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputShell {
    /// The kind of angular functions in the shell.
    #[builder(default)]
    #[serde(default)]
    pub pure: ShellType,

    /// A non-negative integer indicating the rank of the shell.
    pub l: u32,

    /// The contraction coefficients.
    pub coefficients: Vec<f64>,

    /// The exponents, one per contraction coefficient.
    pub exponents: Vec<f64>,
}

impl InputShell {
    /// Returns a builder to construct [`InputShell`].
    pub fn builder() -> InputShellBuilder {
        InputShellBuilder::default()
    }

    /// Returns the number of basis functions in this shell.
    pub fn n_funcs(&self) -> usize {
        self.pure.n_aos(self.l)
    }
}

// ----------------
// InputAtomicBasis
// ----------------

/// Serialisable/deserialisable structure containing the ordered shells centred on one nucleus.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct InputAtomicBasis {
    /// The index of the nucleus the shells are centred on.
    pub nucleus: usize,

    /// The name of the basis set, if any.
    #[builder(default = "None")]
    #[serde(default)]
    pub name: Option<String>,

    /// The ordered shells.
    pub shells: Vec<InputShell>,
}

impl InputAtomicBasis {
    /// Returns a builder to construct [`InputAtomicBasis`].
    pub fn builder() -> InputAtomicBasisBuilder {
        InputAtomicBasisBuilder::default()
    }

    /// Returns the number of basis functions localised on the nucleus.
    pub fn n_funcs(&self) -> usize {
        self.shells.iter().map(InputShell::n_funcs).sum()
    }

    /// Converts the [`InputAtomicBasis`] to an [`AtomicBasisSet`] centred on a nucleus of
    /// `nuclei`.
    ///
    /// # Arguments
    ///
    /// * `nuclei` - The nuclei the index [`Self::nucleus`] refers to.
    ///
    /// # Returns
    ///
    /// The atomic basis set, or an error if the nucleus index is out of range or if a shell has
    /// different numbers of coefficients and exponents.
    pub fn to_atomic_basis_set(&self, nuclei: &Nuclei) -> Result<AtomicBasisSet, anyhow::Error> {
        let nucleus = nuclei.at(self.nucleus).map_err(|err| format_err!(err))?;
        let mut abs = AtomicBasisSet::new(
            self.name.as_deref(),
            Some(nucleus.atomic_number()),
            Point::new(nucleus.x(), nucleus.y(), nucleus.z()),
        );
        for shell in self.shells.iter() {
            abs.add_shell(
                shell.pure,
                shell.l,
                shell.coefficients.clone(),
                shell.exponents.clone(),
            )
            .map_err(|err| format_err!("Invalid shell on nucleus {}: {err}", self.nucleus))?;
        }
        Ok(abs)
    }
}

/// Converts a list of [`InputAtomicBasis`] to an [`AOBasisSet`], one centre per entry in the
/// order given.
///
/// # Errors
///
/// Errors if a nucleus index is out of range or repeated, or if a shell is invalid.
pub(crate) fn to_ao_basis_set(
    basis: &[InputAtomicBasis],
    nuclei: &Nuclei,
) -> Result<AOBasisSet, anyhow::Error> {
    let mut seen = vec![false; nuclei.size()];
    basis
        .iter()
        .map(|atomic_basis| {
            let abs = atomic_basis.to_atomic_basis_set(nuclei)?;
            ensure!(
                !seen[atomic_basis.nucleus],
                "Nucleus {} has been given more than one atomic basis set.",
                atomic_basis.nucleus
            );
            seen[atomic_basis.nucleus] = true;
            Ok(abs)
        })
        .collect()
}
