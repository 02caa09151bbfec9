//! Nuclei and ordered collections of them.

use std::fmt;
use std::hash::{Hash, Hasher};

use duplicate::duplicate_item;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::auxiliary::misc::HashableFloat;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointSetView, PointView};
use crate::point_charge::{
    Charges, ChargesColumns, ChargesView, PointCharge, PointChargeRef, PointChargeView,
};
use crate::view::column::{Column, Slot};
use crate::view::container_view::views_eq;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// -------
// Nucleus
// -------

/// A structure representing a nucleus: a named point charge with an atomic number and a mass.
///
/// The charge defaults to the atomic number but may differ from it, e.g. for nuclei carrying
/// an effective core potential or for ghost atoms.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Nucleus {
    name: String,
    atomic_number: u32,
    mass: f64,
    point_charge: PointCharge,
}

impl Nucleus {
    /// Creates a nucleus whose charge equals its atomic number.
    ///
    /// # Arguments
    ///
    /// * `name` - A label for the nucleus, conventionally the element symbol.
    /// * `atomic_number` - The atomic number.
    /// * `mass` - The mass in atomic mass units.
    /// * `position` - The position of the nucleus.
    pub fn new(name: &str, atomic_number: u32, mass: f64, position: Point) -> Self {
        Self::with_charge(name, atomic_number, mass, position, f64::from(atomic_number))
    }

    /// Creates a nucleus with an explicit charge.
    pub fn with_charge(
        name: &str,
        atomic_number: u32,
        mass: f64,
        position: Point,
        charge: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            atomic_number,
            mass,
            point_charge: PointCharge::new(charge, position),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn charge(&self) -> f64 {
        self.point_charge.charge()
    }

    pub fn point(&self) -> &Point {
        self.point_charge.point()
    }

    pub fn point_charge(&self) -> &PointCharge {
        &self.point_charge
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_atomic_number(&mut self, atomic_number: u32) {
        self.atomic_number = atomic_number;
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    pub fn point_charge_mut(&mut self) -> &mut PointCharge {
        &mut self.point_charge
    }

    /// Returns a read-only view of this nucleus.
    pub fn view(&self) -> NucleusView<'_, Const> {
        ViewBase::new(NucleusRef {
            name: Slot::borrowed(&self.name),
            atomic_number: Slot::borrowed(&self.atomic_number),
            mass: Slot::borrowed(&self.mass),
            point_charge: *self.point_charge.view(),
        })
    }

    /// Returns a mutable view of this nucleus.
    pub fn view_mut(&mut self) -> NucleusView<'_, Mutable> {
        let Nucleus {
            name,
            atomic_number,
            mass,
            point_charge,
        } = self;
        ViewBase::new(NucleusRef {
            name: Slot::aliased(name),
            atomic_number: Slot::aliased(atomic_number),
            mass: Slot::aliased(mass),
            point_charge: *point_charge.view_mut(),
        })
    }
}

impl Hash for Nucleus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.atomic_number.hash(state);
        self.mass.integer_decode().hash(state);
        self.point_charge.hash(state);
    }
}

impl fmt::Display for Nucleus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:>3} {:>10.5} {}",
            self.name, self.atomic_number, self.mass, self.point_charge
        )
    }
}

// ----------
// NucleusRef
// ----------

/// The aliasing instance behind a [`NucleusView`].
#[derive(Clone, Copy)]
pub struct NucleusRef<'a> {
    name: Slot<'a, String>,
    atomic_number: Slot<'a, u32>,
    mass: Slot<'a, f64>,
    point_charge: PointChargeRef<'a>,
}

/// A view of a nucleus stored elsewhere.
pub type NucleusView<'a, C = Mutable> = ViewBase<C, NucleusRef<'a>>;

impl<'a> NucleusRef<'a> {
    pub(crate) fn point_charge_ref(&self) -> PointChargeRef<'a> {
        self.point_charge
    }

    pub fn name(&self) -> String {
        self.name.get_cloned()
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number.get()
    }

    pub fn mass(&self) -> f64 {
        self.mass.get()
    }

    pub fn charge(&self) -> f64 {
        self.point_charge.charge()
    }

    pub fn x(&self) -> f64 {
        self.point_charge.x()
    }

    pub fn y(&self) -> f64 {
        self.point_charge.y()
    }

    pub fn z(&self) -> f64 {
        self.point_charge.z()
    }

    /// Copies the aliased nucleus into a new [`Nucleus`].
    pub fn to_nucleus(&self) -> Nucleus {
        Nucleus {
            name: self.name(),
            atomic_number: self.atomic_number(),
            mass: self.mass(),
            point_charge: self.point_charge.to_point_charge(),
        }
    }

    pub(crate) fn write(&self, nucleus: &Nucleus) {
        self.name.set(nucleus.name.clone());
        self.atomic_number.set(nucleus.atomic_number);
        self.mass.set(nucleus.mass);
        self.point_charge.write(&nucleus.point_charge);
    }
}

impl<'a> PartialEq for NucleusRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        if self.name.same_storage(&other.name)
            && self.atomic_number.same_storage(&other.atomic_number)
            && self.mass.same_storage(&other.mass)
        {
            return self.point_charge == other.point_charge;
        }
        self.atomic_number() == other.atomic_number()
            && self.mass() == other.mass()
            && self.point_charge == other.point_charge
            && self.name() == other.name()
    }
}

impl<'a> PartialEq<Nucleus> for NucleusRef<'a> {
    fn eq(&self, other: &Nucleus) -> bool {
        self.atomic_number() == other.atomic_number
            && self.mass() == other.mass
            && self.point_charge == other.point_charge
            && self.name() == other.name
    }
}

impl<'a> Hash for NucleusRef<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_nucleus().hash(state);
    }
}

impl<'a> fmt::Debug for NucleusRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_nucleus(), f)
    }
}

impl<'a> fmt::Display for NucleusRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_nucleus(), f)
    }
}

impl<'a, C: Constness> NucleusView<'a, C> {
    /// Returns a view of this nucleus as a point charge.
    pub fn point_charge(&self) -> PointChargeView<'a, C> {
        ViewBase::new(self.pimpl().point_charge)
    }

    /// Returns a view of the position of this nucleus.
    pub fn point(&self) -> PointView<'a, C> {
        self.point_charge().point()
    }
}

impl<'a> NucleusView<'a, Mutable> {
    pub fn set_name(&self, name: &str) {
        self.pimpl().name.set(name.to_string());
    }

    pub fn set_atomic_number(&self, atomic_number: u32) {
        self.pimpl().atomic_number.set(atomic_number);
    }

    pub fn set_mass(&self, mass: f64) {
        self.pimpl().mass.set(mass);
    }

    pub fn set_charge(&self, charge: f64) {
        self.point_charge().set_charge(charge);
    }

    /// Overwrites the aliased nucleus with the values of `nucleus`.
    pub fn assign(&self, nucleus: &Nucleus) {
        self.pimpl().write(nucleus);
    }
}

impl<'a, C: Constness> PartialEq<Nucleus> for NucleusView<'a, C> {
    fn eq(&self, other: &Nucleus) -> bool {
        self.pimpl() == other
    }
}

// ------
// Nuclei
// ------

/// A structure storing an ordered collection of nuclei as parallel arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Nucleus>", into = "Vec<Nucleus>")]
pub struct Nuclei {
    charges: Charges,
    names: Vec<String>,
    atomic_numbers: Vec<u32>,
    masses: Vec<f64>,
}

impl Nuclei {
    /// Creates an empty collection of nuclei.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a nucleus.
    pub fn push(&mut self, nucleus: Nucleus) {
        self.charges.push(nucleus.point_charge);
        self.names.push(nucleus.name);
        self.atomic_numbers.push(nucleus.atomic_number);
        self.masses.push(nucleus.mass);
    }

    /// Returns the nuclei as a set of point charges.
    pub fn charges(&self) -> &Charges {
        &self.charges
    }

    /// Returns the index of the first nucleus equal to `nucleus`, if any.
    pub fn find(&self, nucleus: &Nucleus) -> Option<usize> {
        self.iter().position(|candidate| candidate == *nucleus)
    }

    pub(crate) fn columns(&self) -> NucleiColumns<'_> {
        NucleiColumns {
            charges: self.charges.columns(),
            names: Column::borrowed(&self.names),
            atomic_numbers: Column::borrowed(&self.atomic_numbers),
            masses: Column::borrowed(&self.masses),
        }
    }

    pub(crate) fn columns_mut(&mut self) -> NucleiColumns<'_> {
        NucleiColumns {
            charges: self.charges.columns_mut(),
            names: Column::aliased(&mut self.names),
            atomic_numbers: Column::aliased(&mut self.atomic_numbers),
            masses: Column::aliased(&mut self.masses),
        }
    }

    /// Returns a read-only view of all nuclei.
    pub fn view(&self) -> NucleiView<'_, Const> {
        ContainerView::from_backend(self.columns())
    }

    /// Returns a mutable view of all nuclei.
    pub fn view_mut(&mut self) -> NucleiView<'_, Mutable> {
        ContainerView::from_backend(self.columns_mut())
    }

    /// Returns a mutable view of nucleus `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<NucleusView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(ViewBase::new(self.columns_mut().element(i)))
    }
}

impl IndexableContainer for Nuclei {
    type Element<'s> = NucleusView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.names.len()
    }

    fn at_impl(&self, i: usize) -> NucleusView<'_, Const> {
        ViewBase::new(self.columns().element(i))
    }
}

impl FromIterator<Nucleus> for Nuclei {
    fn from_iter<I: IntoIterator<Item = Nucleus>>(iter: I) -> Self {
        let mut nuclei = Nuclei::new();
        iter.into_iter().for_each(|nucleus| nuclei.push(nucleus));
        nuclei
    }
}

impl From<Vec<Nucleus>> for Nuclei {
    fn from(nuclei: Vec<Nucleus>) -> Self {
        nuclei.into_iter().collect()
    }
}

impl From<Nuclei> for Vec<Nucleus> {
    fn from(nuclei: Nuclei) -> Self {
        nuclei.iter().map(|nucleus| nucleus.to_nucleus()).collect()
    }
}

impl Hash for Nuclei {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl fmt::Display for Nuclei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nucleus in self.iter() {
            writeln!(f, "{nucleus}")?;
        }
        Ok(())
    }
}

// -------------
// NucleiColumns
// -------------

/// Contiguous storage strategy aliasing the arrays of a [`Nuclei`].
#[derive(Clone, Copy, Default)]
pub struct NucleiColumns<'a> {
    charges: ChargesColumns<'a>,
    names: Column<'a, String>,
    atomic_numbers: Column<'a, u32>,
    masses: Column<'a, f64>,
}

impl<'a> NucleiColumns<'a> {
    pub(crate) fn charges(&self) -> ChargesColumns<'a> {
        self.charges
    }
}

impl<'a> AliasBackend for NucleiColumns<'a> {
    type Element = NucleusRef<'a>;

    fn len(&self) -> usize {
        self.names.len()
    }

    fn element(&self, i: usize) -> NucleusRef<'a> {
        NucleusRef {
            name: self.names.slot(i),
            atomic_number: self.atomic_numbers.slot(i),
            mass: self.masses.slot(i),
            point_charge: self.charges.element(i),
        }
    }

    fn same_storage(&self, other: &Self) -> bool {
        self.names.same_storage(&other.names)
            && self.atomic_numbers.same_storage(&other.atomic_numbers)
            && self.masses.same_storage(&other.masses)
            && self.charges.same_storage(&other.charges)
    }
}

/// A view of a collection of nuclei stored elsewhere.
pub type NucleiView<'a, C = Mutable> = ContainerView<C, NucleiColumns<'a>, NucleusRef<'a>>;

impl<'a, C: Constness> NucleiView<'a, C> {
    /// Returns a view of the aliased nuclei as point charges, with the same storage strategy.
    pub fn charges(&self) -> ChargesView<'a, C> {
        self.project(|columns| columns.charges(), |nucleus| nucleus.point_charge_ref())
    }

    /// Returns a view of the positions of the aliased nuclei.
    pub fn point_set(&self) -> PointSetView<'a, C> {
        self.charges().point_set()
    }

    /// Returns the sum of the nuclear charges.
    pub fn total_charge(&self) -> f64 {
        self.iter().map(|nucleus| nucleus.charge()).sum()
    }

    /// Returns the sum of the atomic numbers.
    pub fn total_atomic_number(&self) -> u32 {
        self.iter().map(|nucleus| nucleus.atomic_number()).sum()
    }

    /// Returns the mass-weighted centre of the aliased nuclei, or `None` if there are no nuclei
    /// or their total mass vanishes.
    pub fn center_of_mass(&self) -> Option<Point> {
        let total_mass: f64 = self.iter().map(|nucleus| nucleus.mass()).sum();
        if self.is_empty() || total_mass.abs() < f64::EPSILON {
            return None;
        }
        let weighted = self
            .iter()
            .fold(Point3::<f64>::origin().coords, |acc, nucleus| {
                acc + Point3::new(nucleus.x(), nucleus.y(), nucleus.z()).coords * nucleus.mass()
            });
        Some(Point3::from(weighted / total_mass).into())
    }

    /// Copies the aliased nuclei into a new [`Nuclei`].
    pub fn as_nuclei(&self) -> Nuclei {
        self.iter().map(|nucleus| nucleus.to_nucleus()).collect()
    }
}

impl<'a> NucleiView<'a, Mutable> {
    /// Overwrites the aliased nuclei with those of `nuclei`, element by element.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::SizeMismatch`] if the sizes differ, in which case nothing is
    /// written.
    pub fn assign(&self, nuclei: &Nuclei) -> Result<(), ChemistError> {
        ChemistError::check_size(self.size(), nuclei.size())?;
        self.iter()
            .zip(nuclei.iter())
            .for_each(|(lhs, rhs)| lhs.assign(&rhs.to_nucleus()));
        Ok(())
    }
}

impl<'a, C: Constness> PartialEq<Nuclei> for NucleiView<'a, C> {
    fn eq(&self, other: &Nuclei) -> bool {
        views_eq(self, &other.view())
    }
}

#[duplicate_item(
    Owned      Aliased;
    [Nucleus]  [NucleusView<'a, C>];
    [Nuclei]   [NucleiView<'a, C>];
)]
impl<'a, C: Constness> PartialEq<Aliased> for Owned {
    fn eq(&self, other: &Aliased) -> bool {
        other == self
    }
}

#[cfg(test)]
#[path = "nucleus_tests.rs"]
mod nucleus_tests;
