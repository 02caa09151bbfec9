//! Contracted Gaussian functions.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::basis_set::primitive::{PrimitiveRef, PrimitiveView};
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointRef, PointView};
use crate::view::column::Column;
use crate::view::container_view::views_eq;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// ------------------
// ContractedGaussian
// ------------------

/// A structure representing a linear combination of primitive Gaussians sharing one centre.
///
/// Coefficients and exponents are stored as two parallel arrays. They are serialised as the
/// centre followed by one coefficient-exponent pair per primitive, so a deserialised value
/// always has arrays of equal length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContractedGaussianRecord", into = "ContractedGaussianRecord")]
pub struct ContractedGaussian {
    coefficients: Vec<f64>,
    exponents: Vec<f64>,
    center: Point,
}

impl ContractedGaussian {
    /// Creates a contracted Gaussian.
    ///
    /// # Arguments
    ///
    /// * `coefficients` - The contraction coefficients.
    /// * `exponents` - The exponents, one per coefficient.
    /// * `center` - The centre shared by all primitives.
    ///
    /// # Errors
    ///
    /// Errors if the numbers of coefficients and exponents differ.
    pub fn new(
        coefficients: Vec<f64>,
        exponents: Vec<f64>,
        center: Point,
    ) -> Result<Self, ChemistError> {
        ChemistError::check_size(coefficients.len(), exponents.len())?;
        Ok(Self {
            coefficients,
            exponents,
            center,
        })
    }

    /// Appends a primitive with the given coefficient and exponent.
    pub fn push(&mut self, coefficient: f64, exponent: f64) {
        self.coefficients.push(coefficient);
        self.exponents.push(exponent);
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    /// Returns the coefficient-exponent pairs of all primitives.
    pub(crate) fn terms(&self) -> Vec<GaussianTerm> {
        self.coefficients
            .iter()
            .zip(self.exponents.iter())
            .map(|(&coefficient, &exponent)| GaussianTerm {
                coefficient,
                exponent,
            })
            .collect()
    }

    pub(crate) fn columns(&self) -> ContractedGaussianColumns<'_> {
        ContractedGaussianColumns::new(
            Column::borrowed(&self.coefficients),
            Column::borrowed(&self.exponents),
            *self.center.view(),
        )
    }

    pub(crate) fn columns_mut(&mut self) -> ContractedGaussianColumns<'_> {
        let ContractedGaussian {
            coefficients,
            exponents,
            center,
        } = self;
        ContractedGaussianColumns::new(
            Column::aliased(coefficients),
            Column::aliased(exponents),
            *center.view_mut(),
        )
    }

    /// Returns a read-only view of all primitives.
    pub fn view(&self) -> ContractedGaussianView<'_, Const> {
        ContainerView::from_backend(self.columns())
    }

    /// Returns a mutable view of all primitives.
    pub fn view_mut(&mut self) -> ContractedGaussianView<'_, Mutable> {
        ContainerView::from_backend(self.columns_mut())
    }

    /// Returns a mutable view of primitive `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<PrimitiveView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(ViewBase::new(self.columns_mut().element(i)))
    }
}

/// The coefficient and exponent of one primitive, as written to files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GaussianTerm {
    pub(crate) coefficient: f64,
    pub(crate) exponent: f64,
}

/// The serialised form of a [`ContractedGaussian`].
#[derive(Serialize, Deserialize)]
struct ContractedGaussianRecord {
    center: Point,
    primitives: Vec<GaussianTerm>,
}

impl From<ContractedGaussianRecord> for ContractedGaussian {
    fn from(record: ContractedGaussianRecord) -> Self {
        let (coefficients, exponents) = record
            .primitives
            .iter()
            .map(|term| (term.coefficient, term.exponent))
            .unzip();
        Self {
            coefficients,
            exponents,
            center: record.center,
        }
    }
}

impl From<ContractedGaussian> for ContractedGaussianRecord {
    fn from(cg: ContractedGaussian) -> Self {
        Self {
            primitives: cg.terms(),
            center: cg.center,
        }
    }
}

impl IndexableContainer for ContractedGaussian {
    type Element<'s> = PrimitiveView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.coefficients.len()
    }

    fn at_impl(&self, i: usize) -> PrimitiveView<'_, Const> {
        ViewBase::new(self.columns().element(i))
    }
}

impl Hash for ContractedGaussian {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl fmt::Display for ContractedGaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for primitive in self.iter() {
            writeln!(f, "{primitive}")?;
        }
        Ok(())
    }
}

// -------------------------
// ContractedGaussianColumns
// -------------------------

/// Contiguous storage strategy aliasing the coefficient and exponent arrays of a contracted
/// Gaussian together with its centre.
#[derive(Clone, Copy)]
pub struct ContractedGaussianColumns<'a> {
    coefficients: Column<'a, f64>,
    exponents: Column<'a, f64>,
    center: PointRef<'a>,
}

impl<'a> ContractedGaussianColumns<'a> {
    pub(crate) fn new(
        coefficients: Column<'a, f64>,
        exponents: Column<'a, f64>,
        center: PointRef<'a>,
    ) -> Self {
        Self {
            coefficients,
            exponents,
            center,
        }
    }

    pub(crate) fn center(&self) -> PointRef<'a> {
        self.center
    }

    /// Value comparison of the aliased primitives, including their centre.
    pub(crate) fn values_eq(&self, other: &Self) -> bool {
        if self.same_storage(other) {
            return true;
        }
        self.len() == other.len()
            && self.center == other.center
            && (0..self.len()).all(|i| {
                self.coefficients.slot(i).get() == other.coefficients.slot(i).get()
                    && self.exponents.slot(i).get() == other.exponents.slot(i).get()
            })
    }

    /// Copies the aliased primitives into a new [`ContractedGaussian`].
    pub(crate) fn to_contracted_gaussian(&self) -> ContractedGaussian {
        ContractedGaussian {
            coefficients: (0..self.len())
                .map(|i| self.coefficients.slot(i).get())
                .collect(),
            exponents: (0..self.len())
                .map(|i| self.exponents.slot(i).get())
                .collect(),
            center: self.center.to_point(),
        }
    }
}

impl<'a> AliasBackend for ContractedGaussianColumns<'a> {
    type Element = PrimitiveRef<'a>;

    fn len(&self) -> usize {
        self.coefficients.len()
    }

    fn element(&self, i: usize) -> PrimitiveRef<'a> {
        PrimitiveRef::from_parts(self.coefficients.slot(i), self.exponents.slot(i), self.center)
    }

    fn same_storage(&self, other: &Self) -> bool {
        self.coefficients.same_storage(&other.coefficients)
            && self.exponents.same_storage(&other.exponents)
            && self.center.same_storage(&other.center)
    }
    fn shared_eq(&self, other: &Self) -> bool {
        self.center == other.center
    }
}

/// A view of a contracted Gaussian stored elsewhere.
pub type ContractedGaussianView<'a, C = Mutable> =
    ContainerView<C, ContractedGaussianColumns<'a>, PrimitiveRef<'a>>;

impl<'a, C: Constness> ContractedGaussianView<'a, C> {
    /// Returns a view of the centre of the aliased contracted Gaussian.
    ///
    /// Views that are not backed by one contiguous contracted Gaussian report the centre of
    /// their first primitive.
    ///
    /// # Errors
    ///
    /// Errors if the view is null, or if it is empty and not contiguous.
    pub fn center(&self) -> Result<PointView<'a, C>, ChemistError> {
        let pimpl = self.pimpl().ok_or(ChemistError::NullState {
            what: "contracted Gaussian view",
        })?;
        match pimpl.as_contiguous() {
            Some(columns) => Ok(ViewBase::new(columns.center())),
            None if !self.is_empty() => Ok(ViewBase::new(pimpl.get_element(0).center_ref())),
            None => Err(ChemistError::NullState {
                what: "centre of an empty contracted Gaussian view",
            }),
        }
    }

    /// Copies the aliased primitives into a new [`ContractedGaussian`].
    ///
    /// # Errors
    ///
    /// Errors if the view has no centre.
    pub fn as_contracted_gaussian(&self) -> Result<ContractedGaussian, ChemistError> {
        let center = self.center()?.to_point();
        let (coefficients, exponents) = self
            .iter()
            .map(|primitive| (primitive.coefficient(), primitive.exponent()))
            .unzip();
        Ok(ContractedGaussian {
            coefficients,
            exponents,
            center,
        })
    }
}

impl<'a> ContractedGaussianView<'a, Mutable> {
    /// Overwrites the aliased primitives and centre with those of `cg`.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::SizeMismatch`] if the numbers of primitives differ, in which
    /// case nothing is written.
    pub fn assign(&self, cg: &ContractedGaussian) -> Result<(), ChemistError> {
        ChemistError::check_size(self.size(), cg.size())?;
        self.iter().zip(cg.iter()).for_each(|(lhs, rhs)| {
            lhs.set_coefficient(rhs.coefficient());
            lhs.set_exponent(rhs.exponent());
            lhs.center().assign(&cg.center);
        });
        // An empty contiguous view still aliases a centre.
        if let Some(columns) = self.pimpl().and_then(|pimpl| pimpl.as_contiguous()) {
            columns.center().write(&cg.center);
        }
        Ok(())
    }
}

impl<'a, C: Constness> PartialEq<ContractedGaussian> for ContractedGaussianView<'a, C> {
    fn eq(&self, other: &ContractedGaussian) -> bool {
        views_eq(self, &other.view())
    }
}

impl<'a, C: Constness> PartialEq<ContractedGaussianView<'a, C>> for ContractedGaussian {
    fn eq(&self, other: &ContractedGaussianView<'a, C>) -> bool {
        other == self
    }
}

#[cfg(test)]
#[path = "contracted_gaussian_tests.rs"]
mod contracted_gaussian_tests;
