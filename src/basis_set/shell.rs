//! Shells: contracted Gaussians with an angular momentum.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::basis_set::contracted_gaussian::{
    ContractedGaussian, ContractedGaussianColumns, ContractedGaussianView,
};
use crate::basis_set::primitive::PrimitiveView;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointView};
use crate::view::column::Slot;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// ---------
// ShellType
// ---------

/// An enumerated type indicating the kind of angular functions in a shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellType {
    /// Cartesian functions $`x^i y^j z^k`$ with $`i + j + k = l`$.
    Cartesian,

    /// Real solid harmonics.
    #[default]
    Pure,
}

impl ShellType {
    /// Returns the number of atomic orbitals in a shell of this type with angular momentum `l`.
    pub fn n_aos(&self, l: u32) -> usize {
        let lsize = l as usize;
        match self {
            ShellType::Pure => 2 * lsize + 1,
            ShellType::Cartesian => ((lsize + 1) * (lsize + 2)).div_euclid(2),
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellType::Cartesian => write!(f, "cart"),
            ShellType::Pure => write!(f, "pure"),
        }
    }
}

// -----
// Shell
// -----

/// A structure representing a shell: a contracted Gaussian radial part combined with all angular
/// functions of one angular momentum.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shell {
    pure: ShellType,
    l: u32,
    cg: ContractedGaussian,
}

impl Shell {
    /// Creates a shell.
    pub fn new(pure: ShellType, l: u32, cg: ContractedGaussian) -> Self {
        Self { pure, l, cg }
    }

    pub fn pure(&self) -> ShellType {
        self.pure
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    /// Returns the number of atomic orbitals in this shell.
    pub fn n_aos(&self) -> usize {
        self.pure.n_aos(self.l)
    }

    pub fn n_primitives(&self) -> usize {
        self.cg.size()
    }

    pub fn contracted_gaussian(&self) -> &ContractedGaussian {
        &self.cg
    }

    pub fn center(&self) -> &Point {
        self.cg.center()
    }

    /// Returns a read-only view of this shell.
    pub fn view(&self) -> ShellView<'_, Const> {
        ViewBase::new(ShellRef {
            pure: Slot::borrowed(&self.pure),
            l: Slot::borrowed(&self.l),
            primitives: self.cg.columns(),
        })
    }

    /// Returns a mutable view of this shell.
    pub fn view_mut(&mut self) -> ShellView<'_, Mutable> {
        let Shell { pure, l, cg } = self;
        ViewBase::new(ShellRef {
            pure: Slot::aliased(pure),
            l: Slot::aliased(l),
            primitives: cg.columns_mut(),
        })
    }
}

impl Hash for Shell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pure.hash(state);
        self.l.hash(state);
        self.cg.hash(state);
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "l = {} ({})", self.l, self.pure)?;
        write!(f, "{}", self.cg)
    }
}

// --------
// ShellRef
// --------

/// The aliasing instance behind a [`ShellView`].
#[derive(Clone, Copy)]
pub struct ShellRef<'a> {
    pure: Slot<'a, ShellType>,
    l: Slot<'a, u32>,
    primitives: ContractedGaussianColumns<'a>,
}

/// A view of a shell stored elsewhere.
pub type ShellView<'a, C = Mutable> = ViewBase<C, ShellRef<'a>>;

impl<'a> ShellRef<'a> {
    pub(crate) fn from_parts(
        pure: Slot<'a, ShellType>,
        l: Slot<'a, u32>,
        primitives: ContractedGaussianColumns<'a>,
    ) -> Self {
        Self {
            pure,
            l,
            primitives,
        }
    }

    pub fn pure(&self) -> ShellType {
        self.pure.get()
    }

    pub fn l(&self) -> u32 {
        self.l.get()
    }

    /// Returns the number of atomic orbitals in the aliased shell.
    pub fn n_aos(&self) -> usize {
        self.pure().n_aos(self.l())
    }

    pub fn n_primitives(&self) -> usize {
        self.primitives.len()
    }

    /// Copies the aliased shell into a new [`Shell`].
    pub fn to_shell(&self) -> Shell {
        Shell::new(
            self.pure(),
            self.l(),
            self.primitives.to_contracted_gaussian(),
        )
    }
}

impl<'a> PartialEq for ShellRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.pure() == other.pure()
            && self.l() == other.l()
            && self.primitives.values_eq(&other.primitives)
    }
}

impl<'a> PartialEq<Shell> for ShellRef<'a> {
    fn eq(&self, other: &Shell) -> bool {
        self.pure() == other.pure
            && self.l() == other.l
            && self.primitives.values_eq(&other.cg.columns())
    }
}

impl<'a> Hash for ShellRef<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_shell().hash(state);
    }
}

impl<'a> fmt::Debug for ShellRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_shell(), f)
    }
}

impl<'a> fmt::Display for ShellRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_shell(), f)
    }
}

impl<'a, C: Constness> ShellView<'a, C> {
    /// Returns a view of the contracted Gaussian of this shell.
    pub fn contracted_gaussian(&self) -> ContractedGaussianView<'a, C> {
        ContainerView::from_backend(self.pimpl().primitives)
    }

    /// Returns a view of primitive `i` of this shell.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn primitive(&self, i: usize) -> Result<PrimitiveView<'a, C>, ChemistError> {
        ChemistError::check_index(i, self.n_primitives())?;
        Ok(ViewBase::new(self.pimpl().primitives.element(i)))
    }

    /// Returns a view of the centre of this shell.
    pub fn center(&self) -> PointView<'a, C> {
        ViewBase::new(self.pimpl().primitives.center())
    }
}

impl<'a> ShellView<'a, Mutable> {
    pub fn set_pure(&self, pure: ShellType) {
        self.pimpl().pure.set(pure);
    }

    pub fn set_l(&self, l: u32) {
        self.pimpl().l.set(l);
    }

    /// Overwrites the aliased shell with the values of `shell`.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::SizeMismatch`] if the numbers of primitives differ, in which
    /// case nothing is written.
    pub fn assign(&self, shell: &Shell) -> Result<(), ChemistError> {
        self.contracted_gaussian().assign(&shell.cg)?;
        self.set_pure(shell.pure);
        self.set_l(shell.l);
        Ok(())
    }
}

impl<'a, C: Constness> PartialEq<Shell> for ShellView<'a, C> {
    fn eq(&self, other: &Shell) -> bool {
        self.pimpl() == other
    }
}

impl<'a, C: Constness> PartialEq<ShellView<'a, C>> for Shell {
    fn eq(&self, other: &ShellView<'a, C>) -> bool {
        other == self
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod shell_tests;
