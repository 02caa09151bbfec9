//! Gaussian basis sets, from single primitives up to the atomic-orbital basis of a molecule.

pub mod ao_basis_set;
pub mod atomic_basis_set;
pub mod contracted_gaussian;
pub mod primitive;
pub mod shell;

pub use ao_basis_set::AOBasisSet;
pub use atomic_basis_set::{AtomicBasisSet, AtomicBasisSetView, ShellsView};
pub use contracted_gaussian::{ContractedGaussian, ContractedGaussianView};
pub use primitive::{Primitive, PrimitiveView};
pub use shell::{Shell, ShellType, ShellView};
