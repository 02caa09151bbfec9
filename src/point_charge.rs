//! Point charges and ordered sets of them.

use std::fmt;
use std::hash::{Hash, Hasher};

use duplicate::duplicate_item;
use serde::{Deserialize, Serialize};

use crate::auxiliary::misc::HashableFloat;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointRef, PointSet, PointSetColumns, PointSetView, PointView};
use crate::view::column::{Column, Slot};
use crate::view::container_view::views_eq;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// -----------
// PointCharge
// -----------

/// A structure representing a charge localised at a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCharge {
    point: Point,
    charge: f64,
}

impl PointCharge {
    /// Creates a point charge.
    pub fn new(charge: f64, point: Point) -> Self {
        Self { point, charge }
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn point_mut(&mut self) -> &mut Point {
        &mut self.point
    }

    /// Returns a read-only view of this point charge.
    pub fn view(&self) -> PointChargeView<'_, Const> {
        ViewBase::new(PointChargeRef {
            point: *self.point.view(),
            charge: Slot::borrowed(&self.charge),
        })
    }

    /// Returns a mutable view of this point charge.
    pub fn view_mut(&mut self) -> PointChargeView<'_, Mutable> {
        let PointCharge { point, charge } = self;
        ViewBase::new(PointChargeRef {
            point: *point.view_mut(),
            charge: Slot::aliased(charge),
        })
    }
}

impl Hash for PointCharge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
        self.charge.integer_decode().hash(state);
    }
}

impl fmt::Display for PointCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>+9.4} {}", self.charge, self.point)
    }
}

// --------------
// PointChargeRef
// --------------

/// The aliasing instance behind a [`PointChargeView`].
#[derive(Clone, Copy)]
pub struct PointChargeRef<'a> {
    point: PointRef<'a>,
    charge: Slot<'a, f64>,
}

/// A view of a point charge stored elsewhere.
pub type PointChargeView<'a, C = Mutable> = ViewBase<C, PointChargeRef<'a>>;

impl<'a> PointChargeRef<'a> {
    pub(crate) fn from_parts(point: PointRef<'a>, charge: Slot<'a, f64>) -> Self {
        Self { point, charge }
    }

    pub(crate) fn point_ref(&self) -> PointRef<'a> {
        self.point
    }

    pub fn charge(&self) -> f64 {
        self.charge.get()
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn z(&self) -> f64 {
        self.point.z()
    }

    /// Copies the aliased point charge into a new [`PointCharge`].
    pub fn to_point_charge(&self) -> PointCharge {
        PointCharge::new(self.charge(), self.point.to_point())
    }

    pub(crate) fn write(&self, point_charge: &PointCharge) {
        self.point.write(&point_charge.point);
        self.charge.set(point_charge.charge);
    }
}

impl<'a> PartialEq for PointChargeRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        (self.charge.same_storage(&other.charge) || self.charge() == other.charge())
            && self.point == other.point
    }
}

impl<'a> PartialEq<PointCharge> for PointChargeRef<'a> {
    fn eq(&self, other: &PointCharge) -> bool {
        self.to_point_charge() == *other
    }
}

impl<'a> Hash for PointChargeRef<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_point_charge().hash(state);
    }
}

impl<'a> fmt::Debug for PointChargeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_point_charge(), f)
    }
}

impl<'a> fmt::Display for PointChargeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_point_charge(), f)
    }
}

impl<'a, C: Constness> PointChargeView<'a, C> {
    /// Returns a view of the position of this point charge.
    pub fn point(&self) -> PointView<'a, C> {
        ViewBase::new(self.pimpl().point)
    }
}

impl<'a> PointChargeView<'a, Mutable> {
    pub fn set_charge(&self, charge: f64) {
        self.pimpl().charge.set(charge);
    }

    /// Overwrites the aliased point charge with the values of `point_charge`.
    pub fn assign(&self, point_charge: &PointCharge) {
        self.pimpl().write(point_charge);
    }
}

impl<'a, C: Constness> PartialEq<PointCharge> for PointChargeView<'a, C> {
    fn eq(&self, other: &PointCharge) -> bool {
        self.pimpl() == other
    }
}

// -------
// Charges
// -------

/// A structure storing an ordered set of point charges as a point set plus a charge array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PointCharge>", into = "Vec<PointCharge>")]
pub struct Charges {
    points: PointSet,
    charges: Vec<f64>,
}

impl Charges {
    /// Creates an empty set of charges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point charge.
    pub fn push(&mut self, point_charge: PointCharge) {
        self.points.push(point_charge.point);
        self.charges.push(point_charge.charge);
    }

    /// Returns the positions of the charges.
    pub fn point_set(&self) -> &PointSet {
        &self.points
    }

    /// Returns the sum of all charges.
    pub fn total_charge(&self) -> f64 {
        self.charges.iter().sum()
    }

    pub(crate) fn columns(&self) -> ChargesColumns<'_> {
        ChargesColumns {
            points: self.points.columns(),
            charges: Column::borrowed(&self.charges),
        }
    }

    pub(crate) fn columns_mut(&mut self) -> ChargesColumns<'_> {
        ChargesColumns {
            points: self.points.columns_mut(),
            charges: Column::aliased(&mut self.charges),
        }
    }

    /// Returns a read-only view of all charges.
    pub fn view(&self) -> ChargesView<'_, Const> {
        ContainerView::from_backend(self.columns())
    }

    /// Returns a mutable view of all charges.
    pub fn view_mut(&mut self) -> ChargesView<'_, Mutable> {
        ContainerView::from_backend(self.columns_mut())
    }

    /// Returns a mutable view of charge `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<PointChargeView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(ViewBase::new(self.columns_mut().element(i)))
    }
}

impl IndexableContainer for Charges {
    type Element<'s> = PointChargeView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.charges.len()
    }

    fn at_impl(&self, i: usize) -> PointChargeView<'_, Const> {
        ViewBase::new(self.columns().element(i))
    }
}

impl FromIterator<PointCharge> for Charges {
    fn from_iter<I: IntoIterator<Item = PointCharge>>(iter: I) -> Self {
        let mut charges = Charges::new();
        iter.into_iter().for_each(|point_charge| charges.push(point_charge));
        charges
    }
}

impl From<Vec<PointCharge>> for Charges {
    fn from(charges: Vec<PointCharge>) -> Self {
        charges.into_iter().collect()
    }
}

impl From<Charges> for Vec<PointCharge> {
    fn from(charges: Charges) -> Self {
        charges.iter().map(|charge| charge.to_point_charge()).collect()
    }
}

impl Hash for Charges {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

// --------------
// ChargesColumns
// --------------

/// Contiguous storage strategy aliasing the arrays of a [`Charges`].
#[derive(Clone, Copy, Default)]
pub struct ChargesColumns<'a> {
    points: PointSetColumns<'a>,
    charges: Column<'a, f64>,
}

impl<'a> ChargesColumns<'a> {
    pub(crate) fn points(&self) -> PointSetColumns<'a> {
        self.points
    }
}

impl<'a> AliasBackend for ChargesColumns<'a> {
    type Element = PointChargeRef<'a>;

    fn len(&self) -> usize {
        self.charges.len()
    }

    fn element(&self, i: usize) -> PointChargeRef<'a> {
        PointChargeRef::from_parts(self.points.element(i), self.charges.slot(i))
    }

    fn same_storage(&self, other: &Self) -> bool {
        self.charges.same_storage(&other.charges) && self.points.same_storage(&other.points)
    }
}

/// A view of a set of point charges stored elsewhere.
pub type ChargesView<'a, C = Mutable> = ContainerView<C, ChargesColumns<'a>, PointChargeRef<'a>>;

impl<'a, C: Constness> ChargesView<'a, C> {
    /// Returns a view of the positions of the aliased charges, with the same storage strategy.
    pub fn point_set(&self) -> PointSetView<'a, C> {
        self.project(|columns| columns.points(), |charge| charge.point_ref())
    }

    /// Returns the sum of the aliased charges.
    pub fn total_charge(&self) -> f64 {
        self.iter().map(|charge| charge.charge()).sum()
    }

    /// Copies the aliased charges into a new [`Charges`].
    pub fn as_charges(&self) -> Charges {
        self.iter().map(|charge| charge.to_point_charge()).collect()
    }
}

impl<'a> ChargesView<'a, Mutable> {
    /// Overwrites the aliased charges with those of `charges`, element by element.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::SizeMismatch`] if the sizes differ, in which case nothing is
    /// written.
    pub fn assign(&self, charges: &Charges) -> Result<(), ChemistError> {
        ChemistError::check_size(self.size(), charges.size())?;
        self.iter()
            .zip(charges.iter())
            .for_each(|(lhs, rhs)| lhs.assign(&rhs.to_point_charge()));
        Ok(())
    }
}

impl<'a, C: Constness> PartialEq<Charges> for ChargesView<'a, C> {
    fn eq(&self, other: &Charges) -> bool {
        views_eq(self, &other.view())
    }
}

#[duplicate_item(
    Owned          Aliased;
    [PointCharge]  [PointChargeView<'a, C>];
    [Charges]      [ChargesView<'a, C>];
)]
impl<'a, C: Constness> PartialEq<Aliased> for Owned {
    fn eq(&self, other: &Aliased) -> bool {
        other == self
    }
}

#[cfg(test)]
#[path = "point_charge_tests.rs"]
mod point_charge_tests;
