//! Points in three-dimensional Cartesian space and sets of them.

use std::fmt;
use std::hash::{Hash, Hasher};

use duplicate::duplicate_item;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::auxiliary::misc::HashableFloat;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::view::column::{Column, Slot};
use crate::view::container_view::views_eq;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// -----
// Point
// -----

/// A structure representing a point in Cartesian space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    z: f64,
}

impl Point {
    /// Creates a point from its Cartesian coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Returns coordinate `i` (0 for x, 1 for y, 2 for z).
    ///
    /// # Errors
    ///
    /// Errors if `i > 2`.
    pub fn coord(&self, i: usize) -> Result<f64, ChemistError> {
        match i {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(ChemistError::OutOfRange { index: i, size: 3 }),
        }
    }

    /// Returns the distance of this point from the origin.
    pub fn magnitude(&self) -> f64 {
        Point3::from(*self).coords.norm()
    }

    /// Returns the distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        nalgebra::distance(&Point3::from(*self), &Point3::from(*other))
    }

    /// Returns a read-only view of this point.
    pub fn view(&self) -> PointView<'_, Const> {
        ViewBase::new(PointRef {
            x: Slot::borrowed(&self.x),
            y: Slot::borrowed(&self.y),
            z: Slot::borrowed(&self.z),
        })
    }

    /// Returns a mutable view of this point.
    pub fn view_mut(&mut self) -> PointView<'_, Mutable> {
        let Point { x, y, z } = self;
        ViewBase::new(PointRef::from_slots(
            Slot::aliased(x),
            Slot::aliased(y),
            Slot::aliased(z),
        ))
    }
}

impl From<Point3<f64>> for Point {
    fn from(point: Point3<f64>) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<Point> for Point3<f64> {
    fn from(point: Point) -> Self {
        Point3::new(point.x, point.y, point.z)
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.integer_decode().hash(state);
        self.y.integer_decode().hash(state);
        self.z.integer_decode().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>+11.7} {:>+11.7} {:>+11.7}", self.x, self.y, self.z)
    }
}

// --------
// PointRef
// --------

/// The aliasing instance behind a [`PointView`].
#[derive(Clone, Copy)]
pub struct PointRef<'a> {
    x: Slot<'a, f64>,
    y: Slot<'a, f64>,
    z: Slot<'a, f64>,
}

/// A view of a point stored elsewhere.
pub type PointView<'a, C = Mutable> = ViewBase<C, PointRef<'a>>;

impl<'a> PointRef<'a> {
    pub(crate) fn from_slots(x: Slot<'a, f64>, y: Slot<'a, f64>, z: Slot<'a, f64>) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x.get()
    }

    pub fn y(&self) -> f64 {
        self.y.get()
    }

    pub fn z(&self) -> f64 {
        self.z.get()
    }

    /// Returns coordinate `i` (0 for x, 1 for y, 2 for z).
    ///
    /// # Errors
    ///
    /// Errors if `i > 2`.
    pub fn coord(&self, i: usize) -> Result<f64, ChemistError> {
        self.to_point().coord(i)
    }

    /// Returns the distance of the aliased point from the origin.
    pub fn magnitude(&self) -> f64 {
        self.to_point().magnitude()
    }

    /// Copies the aliased point into a new [`Point`].
    pub fn to_point(&self) -> Point {
        Point::new(self.x(), self.y(), self.z())
    }

    pub(crate) fn write(&self, point: &Point) {
        self.x.set(point.x);
        self.y.set(point.y);
        self.z.set(point.z);
    }

    pub(crate) fn same_storage(&self, other: &Self) -> bool {
        self.x.same_storage(&other.x) && self.y.same_storage(&other.y) && self.z.same_storage(&other.z)
    }
}

impl<'a> PartialEq for PointRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) || self.to_point() == other.to_point()
    }
}

impl<'a> PartialEq<Point> for PointRef<'a> {
    fn eq(&self, other: &Point) -> bool {
        self.to_point() == *other
    }
}

impl<'a> Hash for PointRef<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_point().hash(state);
    }
}

impl<'a> fmt::Debug for PointRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_point(), f)
    }
}

impl<'a> fmt::Display for PointRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_point(), f)
    }
}

impl<'a> PointView<'a, Mutable> {
    /// Creates a mutable view aliasing three coordinates stored anywhere.
    pub fn from_fields_mut(x: &'a mut f64, y: &'a mut f64, z: &'a mut f64) -> Self {
        ViewBase::new(PointRef::from_slots(
            Slot::aliased(x),
            Slot::aliased(y),
            Slot::aliased(z),
        ))
    }

    pub fn set_x(&self, x: f64) {
        self.pimpl().x.set(x);
    }

    pub fn set_y(&self, y: f64) {
        self.pimpl().y.set(y);
    }

    pub fn set_z(&self, z: f64) {
        self.pimpl().z.set(z);
    }

    /// Overwrites the aliased point with the values of `point`.
    pub fn assign(&self, point: &Point) {
        self.pimpl().write(point);
    }
}

impl<'a> PointView<'a, Const> {
    /// Creates a read-only view aliasing three coordinates stored anywhere.
    pub fn from_fields(x: &'a f64, y: &'a f64, z: &'a f64) -> Self {
        ViewBase::new(PointRef::from_slots(
            Slot::borrowed(x),
            Slot::borrowed(y),
            Slot::borrowed(z),
        ))
    }
}

impl<'a, C: Constness> PartialEq<Point> for PointView<'a, C> {
    fn eq(&self, other: &Point) -> bool {
        self.pimpl() == other
    }
}

// --------
// PointSet
// --------

/// A structure storing an ordered set of points as three coordinate arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointSet {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PointSet {
    /// Creates an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty point set with room for `n` points.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point) {
        self.x.push(point.x);
        self.y.push(point.y);
        self.z.push(point.z);
    }

    pub(crate) fn columns(&self) -> PointSetColumns<'_> {
        PointSetColumns {
            x: Column::borrowed(&self.x),
            y: Column::borrowed(&self.y),
            z: Column::borrowed(&self.z),
        }
    }

    pub(crate) fn columns_mut(&mut self) -> PointSetColumns<'_> {
        PointSetColumns {
            x: Column::aliased(&mut self.x),
            y: Column::aliased(&mut self.y),
            z: Column::aliased(&mut self.z),
        }
    }

    /// Returns a read-only view of all points.
    pub fn view(&self) -> PointSetView<'_, Const> {
        ContainerView::from_backend(self.columns())
    }

    /// Returns a mutable view of all points.
    pub fn view_mut(&mut self) -> PointSetView<'_, Mutable> {
        ContainerView::from_backend(self.columns_mut())
    }

    /// Returns a mutable view of point `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<PointView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(ViewBase::new(self.columns_mut().element(i)))
    }

    /// Returns the point with the arithmetic mean of all coordinates, or `None` if the set is
    /// empty.
    pub fn centroid(&self) -> Option<Point> {
        self.view().centroid()
    }
}

impl IndexableContainer for PointSet {
    type Element<'s> = PointView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.x.len()
    }

    fn at_impl(&self, i: usize) -> PointView<'_, Const> {
        ViewBase::new(self.columns().element(i))
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut points = PointSet::new();
        iter.into_iter().for_each(|point| points.push(point));
        points
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        points.into_iter().collect()
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(points: PointSet) -> Self {
        points.iter().map(|point| point.to_point()).collect()
    }
}

impl Hash for PointSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl fmt::Display for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in self.iter() {
            writeln!(f, "{point}")?;
        }
        Ok(())
    }
}

// ---------------
// PointSetColumns
// ---------------

/// Contiguous storage strategy aliasing the coordinate arrays of a [`PointSet`].
#[derive(Clone, Copy, Default)]
pub struct PointSetColumns<'a> {
    x: Column<'a, f64>,
    y: Column<'a, f64>,
    z: Column<'a, f64>,
}

impl<'a> AliasBackend for PointSetColumns<'a> {
    type Element = PointRef<'a>;

    fn len(&self) -> usize {
        self.x.len()
    }

    fn element(&self, i: usize) -> PointRef<'a> {
        PointRef::from_slots(self.x.slot(i), self.y.slot(i), self.z.slot(i))
    }

    fn same_storage(&self, other: &Self) -> bool {
        self.x.same_storage(&other.x) && self.y.same_storage(&other.y) && self.z.same_storage(&other.z)
    }
}

/// A view of a set of points stored elsewhere.
pub type PointSetView<'a, C = Mutable> = ContainerView<C, PointSetColumns<'a>, PointRef<'a>>;

impl<'a, C: Constness> PointSetView<'a, C> {
    /// Copies the aliased points into a new [`PointSet`].
    pub fn as_points(&self) -> PointSet {
        self.iter().map(|point| point.to_point()).collect()
    }

    /// Returns the point with the arithmetic mean of all aliased coordinates, or `None` if the
    /// view is empty.
    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let n = self.size() as f64;
        let sum = self
            .iter()
            .fold(Point3::<f64>::origin().coords, |acc, point| {
                acc + Point3::from(point.to_point()).coords
            });
        Some(Point3::from(sum / n).into())
    }
}

impl<'a> PointSetView<'a, Mutable> {
    /// Overwrites the aliased points with those of `points`, element by element.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::SizeMismatch`] if the sizes differ, in which case nothing is
    /// written.
    pub fn assign(&self, points: &PointSet) -> Result<(), ChemistError> {
        ChemistError::check_size(self.size(), points.size())?;
        self.iter()
            .zip(points.iter())
            .for_each(|(lhs, rhs)| lhs.assign(&rhs.to_point()));
        Ok(())
    }
}

impl<'a, C: Constness> PartialEq<PointSet> for PointSetView<'a, C> {
    fn eq(&self, other: &PointSet) -> bool {
        views_eq(self, &other.view())
    }
}

#[duplicate_item(
    Owned       Aliased;
    [Point]     [PointView<'a, C>];
    [PointSet]  [PointSetView<'a, C>];
)]
impl<'a, C: Constness> PartialEq<Aliased> for Owned {
    fn eq(&self, other: &Aliased) -> bool {
        other == self
    }
}

#[cfg(test)]
#[path = "point_tests.rs"]
mod point_tests;
