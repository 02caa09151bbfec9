//! Atomic basis sets: the shells centred on one nucleus.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::basis_set::contracted_gaussian::{ContractedGaussianColumns, GaussianTerm};
use crate::basis_set::primitive::PrimitiveView;
use crate::basis_set::shell::{ShellRef, ShellType, ShellView};
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointRef, PointView};
use crate::view::column::{Column, Slot};
use crate::view::container_view::views_eq;
use crate::view::{AliasBackend, Const, Constness, ContainerView, Mutable, ViewBase};

// ==================
// Struct definitions
// ==================

/// Structure representing all shells of a basis set that sit on one centre.
///
/// Shells are stored as parallel arrays. The primitives of all shells are stored back to back in
/// `coefficients` and `exponents`, and shell `i` owns the primitives in
/// `primitive_offsets[i]..primitive_offsets[i + 1]`.
///
/// The set is serialised shell by shell, each shell with its own list of primitives, so a
/// deserialised value always has consistent offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "AtomicBasisSetRecord", into = "AtomicBasisSetRecord")]
pub struct AtomicBasisSet {
    /// The name of the basis set, e.g. `"cc-pVDZ"`.
    name: Option<String>,

    /// The atomic number of the element this basis set is for.
    atomic_number: Option<u32>,

    /// The centre shared by every shell.
    center: Point,

    pure: Vec<ShellType>,

    l: Vec<u32>,

    /// Prefix sums of the numbers of primitives per shell. Always starts with zero.
    primitive_offsets: Vec<usize>,

    coefficients: Vec<f64>,

    exponents: Vec<f64>,
}

impl Default for AtomicBasisSet {
    fn default() -> Self {
        Self {
            name: None,
            atomic_number: None,
            center: Point::default(),
            pure: Vec::new(),
            l: Vec::new(),
            primitive_offsets: vec![0],
            coefficients: Vec::new(),
            exponents: Vec::new(),
        }
    }
}

impl AtomicBasisSet {
    /// Creates an atomic basis set without any shells.
    ///
    /// # Arguments
    ///
    /// * `name` - The optional name of the basis set.
    /// * `atomic_number` - The optional atomic number of the element.
    /// * `center` - The centre of every shell.
    pub fn new(name: Option<&str>, atomic_number: Option<u32>, center: Point) -> Self {
        Self {
            name: name.map(str::to_string),
            atomic_number,
            center,
            ..Self::default()
        }
    }

    /// Returns the name of the basis set.
    ///
    /// # Errors
    ///
    /// Errors if the basis set has no name.
    pub fn basis_set_name(&self) -> Result<&str, ChemistError> {
        self.name.as_deref().ok_or(ChemistError::NullState {
            what: "basis set name",
        })
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn set_basis_set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Returns the atomic number of the element this basis set is for.
    ///
    /// # Errors
    ///
    /// Errors if the basis set has no atomic number.
    pub fn atomic_number(&self) -> Result<u32, ChemistError> {
        self.atomic_number.ok_or(ChemistError::NullState {
            what: "atomic number",
        })
    }

    pub fn has_atomic_number(&self) -> bool {
        self.atomic_number.is_some()
    }

    pub fn set_atomic_number(&mut self, atomic_number: u32) {
        self.atomic_number = Some(atomic_number);
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Appends a shell.
    ///
    /// # Arguments
    ///
    /// * `pure` - The kind of angular functions.
    /// * `l` - The angular momentum.
    /// * `coefficients` - The contraction coefficients.
    /// * `exponents` - The exponents, one per coefficient.
    ///
    /// # Errors
    ///
    /// Errors if the numbers of coefficients and exponents differ, in which case nothing is
    /// appended.
    pub fn add_shell(
        &mut self,
        pure: ShellType,
        l: u32,
        coefficients: Vec<f64>,
        exponents: Vec<f64>,
    ) -> Result<(), ChemistError> {
        ChemistError::check_size(coefficients.len(), exponents.len())?;
        self.push_shell(pure, l, coefficients.into_iter().zip(exponents));
        Ok(())
    }

    fn push_shell<I>(&mut self, pure: ShellType, l: u32, primitives: I)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.pure.push(pure);
        self.l.push(l);
        for (coefficient, exponent) in primitives {
            self.coefficients.push(coefficient);
            self.exponents.push(exponent);
        }
        self.primitive_offsets.push(self.coefficients.len());
    }

    /// Returns the total number of atomic orbitals over all shells.
    pub fn n_aos(&self) -> usize {
        self.pure
            .iter()
            .zip(self.l.iter())
            .map(|(pure, &l)| pure.n_aos(l))
            .sum()
    }

    /// Returns the total number of primitives over all shells.
    pub fn n_primitives(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the range of primitive indices belonging to shell `shell`.
    ///
    /// # Errors
    ///
    /// Errors if `shell` is out of range.
    pub fn primitive_range(&self, shell: usize) -> Result<Range<usize>, ChemistError> {
        ChemistError::check_index(shell, self.size())?;
        Ok(self.primitive_offsets[shell]..self.primitive_offsets[shell + 1])
    }

    /// Returns the index of the shell containing primitive `primitive`.
    ///
    /// # Errors
    ///
    /// Errors if `primitive` is out of range.
    pub fn primitive_to_shell(&self, primitive: usize) -> Result<usize, ChemistError> {
        ChemistError::check_index(primitive, self.n_primitives())?;
        Ok(self
            .primitive_offsets
            .partition_point(|&offset| offset <= primitive)
            - 1)
    }

    /// Returns a read-only view of primitive `primitive`, counted across all shells.
    ///
    /// # Errors
    ///
    /// Errors if `primitive` is out of range.
    pub fn primitive(&self, primitive: usize) -> Result<PrimitiveView<'_, Const>, ChemistError> {
        let shell = self.primitive_to_shell(primitive)?;
        self.get(shell)
            .primitive(primitive - self.primitive_offsets[shell])
    }

    pub(crate) fn columns(&self) -> ShellColumns<'_> {
        ShellColumns {
            pure: Column::borrowed(&self.pure),
            l: Column::borrowed(&self.l),
            offsets: &self.primitive_offsets,
            coefficients: Column::borrowed(&self.coefficients),
            exponents: Column::borrowed(&self.exponents),
            center: *self.center.view(),
        }
    }

    pub(crate) fn columns_mut(&mut self) -> ShellColumns<'_> {
        let AtomicBasisSet {
            center,
            pure,
            l,
            primitive_offsets,
            coefficients,
            exponents,
            ..
        } = self;
        ShellColumns {
            pure: Column::aliased(pure),
            l: Column::aliased(l),
            offsets: primitive_offsets.as_slice(),
            coefficients: Column::aliased(coefficients),
            exponents: Column::aliased(exponents),
            center: *center.view_mut(),
        }
    }

    /// Returns a read-only view of this atomic basis set.
    pub fn view(&self) -> AtomicBasisSetView<'_, Const> {
        AtomicBasisSetView {
            header: Some(Header {
                name: Slot::borrowed(&self.name),
                atomic_number: Slot::borrowed(&self.atomic_number),
                center: *self.center.view(),
            }),
            shells: ContainerView::from_backend(self.columns()),
        }
    }

    /// Returns a mutable view of this atomic basis set.
    pub fn view_mut(&mut self) -> AtomicBasisSetView<'_, Mutable> {
        let AtomicBasisSet {
            name,
            atomic_number,
            center,
            pure,
            l,
            primitive_offsets,
            coefficients,
            exponents,
        } = self;
        let center = *center.view_mut();
        AtomicBasisSetView {
            header: Some(Header {
                name: Slot::aliased(name),
                atomic_number: Slot::aliased(atomic_number),
                center,
            }),
            shells: ContainerView::from_backend(ShellColumns {
                pure: Column::aliased(pure),
                l: Column::aliased(l),
                offsets: primitive_offsets.as_slice(),
                coefficients: Column::aliased(coefficients),
                exponents: Column::aliased(exponents),
                center,
            }),
        }
    }

    /// Returns a mutable view of shell `i`.
    ///
    /// # Errors
    ///
    /// Errors if `i` is out of range.
    pub fn at_mut(&mut self, i: usize) -> Result<ShellView<'_, Mutable>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(ViewBase::new(self.columns_mut().element(i)))
    }
}

// =====================
// Trait implementations
// =====================

impl IndexableContainer for AtomicBasisSet {
    type Element<'s> = ShellView<'s, Const>;

    fn size_impl(&self) -> usize {
        self.pure.len()
    }

    fn at_impl(&self, i: usize) -> ShellView<'_, Const> {
        ViewBase::new(self.columns().element(i))
    }
}

/// The serialised form of one shell of an [`AtomicBasisSet`].
#[derive(Serialize, Deserialize)]
struct ShellRecord {
    pure: ShellType,
    l: u32,
    primitives: Vec<GaussianTerm>,
}

/// The serialised form of an [`AtomicBasisSet`].
#[derive(Serialize, Deserialize)]
struct AtomicBasisSetRecord {
    name: Option<String>,
    atomic_number: Option<u32>,
    center: Point,
    shells: Vec<ShellRecord>,
}

impl From<AtomicBasisSetRecord> for AtomicBasisSet {
    fn from(record: AtomicBasisSetRecord) -> Self {
        let mut abs = AtomicBasisSet {
            name: record.name,
            atomic_number: record.atomic_number,
            center: record.center,
            ..AtomicBasisSet::default()
        };
        for shell in record.shells {
            abs.push_shell(
                shell.pure,
                shell.l,
                shell
                    .primitives
                    .iter()
                    .map(|term| (term.coefficient, term.exponent)),
            );
        }
        abs
    }
}

impl From<AtomicBasisSet> for AtomicBasisSetRecord {
    fn from(abs: AtomicBasisSet) -> Self {
        let shells = abs
            .iter()
            .map(|shell| ShellRecord {
                pure: shell.pure(),
                l: shell.l(),
                primitives: shell.to_shell().contracted_gaussian().terms(),
            })
            .collect();
        Self {
            name: abs.name,
            atomic_number: abs.atomic_number,
            center: abs.center,
            shells,
        }
    }
}

impl Hash for AtomicBasisSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl fmt::Display for AtomicBasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

// ============
// ShellColumns
// ============

/// Contiguous storage strategy aliasing the shell arrays of an atomic basis set.
#[derive(Clone, Copy)]
pub struct ShellColumns<'a> {
    pure: Column<'a, ShellType>,
    l: Column<'a, u32>,
    offsets: &'a [usize],
    coefficients: Column<'a, f64>,
    exponents: Column<'a, f64>,
    center: PointRef<'a>,
}

impl<'a> AliasBackend for ShellColumns<'a> {
    type Element = ShellRef<'a>;

    fn len(&self) -> usize {
        self.pure.len()
    }

    fn element(&self, i: usize) -> ShellRef<'a> {
        let start = self.offsets[i];
        let n_primitives = self.offsets[i + 1] - start;
        ShellRef::from_parts(
            self.pure.slot(i),
            self.l.slot(i),
            ContractedGaussianColumns::new(
                self.coefficients.sub(start, n_primitives),
                self.exponents.sub(start, n_primitives),
                self.center,
            ),
        )
    }

    fn same_storage(&self, other: &Self) -> bool {
        self.pure.same_storage(&other.pure)
            && self.l.same_storage(&other.l)
            && self.coefficients.same_storage(&other.coefficients)
            && self.exponents.same_storage(&other.exponents)
            && self.center.same_storage(&other.center)
    }
}

/// A view of a sequence of shells.
pub type ShellsView<'a, C = Mutable> = ContainerView<C, ShellColumns<'a>, ShellRef<'a>>;

// ==================
// AtomicBasisSetView
// ==================

/// Aliases of the per-set fields of an atomic basis set.
#[derive(Clone, Copy)]
struct Header<'a> {
    name: Slot<'a, Option<String>>,
    atomic_number: Slot<'a, Option<u32>>,
    center: PointRef<'a>,
}

/// A view of an atomic basis set stored elsewhere.
///
/// The view aliases the name, the atomic number and the centre of one atomic basis set together
/// with a sequence of shells. The shells need not be all the shells of that set: see
/// [`Self::subset`] and [`Self::with_shells`]. A default-constructed view is null.
pub struct AtomicBasisSetView<'a, C: Constness = Mutable> {
    header: Option<Header<'a>>,
    shells: ShellsView<'a, C>,
}

impl<'a, C: Constness> AtomicBasisSetView<'a, C> {
    /// Returns a null view.
    pub fn null() -> Self {
        Self {
            header: None,
            shells: ContainerView::null(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.header.is_none()
    }

    pub fn is_const(&self) -> bool {
        C::IS_CONST
    }

    fn header(&self) -> Result<Header<'a>, ChemistError> {
        self.header.ok_or(ChemistError::NullState {
            what: "atomic basis set view",
        })
    }

    /// Returns the view of the aliased shells.
    pub fn shells(&self) -> &ShellsView<'a, C> {
        &self.shells
    }

    /// Returns a view with the same name, atomic number and centre, aliasing only the shells
    /// selected by `members`, in the given order.
    ///
    /// # Errors
    ///
    /// Errors if this view is null or if a member index is out of range.
    pub fn subset<I>(&self, members: I) -> Result<Self, ChemistError>
    where
        I: IntoIterator<Item = usize>,
    {
        let header = self.header()?;
        Ok(Self {
            header: Some(header),
            shells: self.shells.subset(members)?,
        })
    }

    /// Returns a view with the same name, atomic number and centre, aliasing the given shells.
    ///
    /// The shells may come from any basis set, but must sit on the centre of this one.
    ///
    /// # Errors
    ///
    /// Errors if this view is null, or with [`ChemistError::NotASubset`] if a shell is centred
    /// elsewhere.
    pub fn with_shells<I>(&self, shells: I) -> Result<Self, ChemistError>
    where
        I: IntoIterator<Item = ShellView<'a, C>>,
    {
        let header = self.header()?;
        let shells = shells.into_iter().collect::<Vec<_>>();
        if let Some(stray) = shells.iter().find(|shell| *shell.center() != header.center) {
            return Err(ChemistError::NotASubset(format!(
                "shell centred at {} does not sit on the centre {} of the atomic basis set",
                *stray.center(),
                header.center
            )));
        }
        Ok(Self {
            header: Some(header),
            shells: ContainerView::from_elements(shells),
        })
    }

    /// Returns the name of the aliased basis set.
    ///
    /// # Errors
    ///
    /// Errors if the view is null or if the aliased basis set has no name.
    pub fn basis_set_name(&self) -> Result<String, ChemistError> {
        self.header()?
            .name
            .get_cloned()
            .ok_or(ChemistError::NullState {
                what: "basis set name",
            })
    }

    /// Returns `true` if the view is bound and the aliased basis set has a name.
    pub fn has_name(&self) -> bool {
        self.header
            .is_some_and(|header| header.name.get_cloned().is_some())
    }

    /// Returns the atomic number of the aliased basis set.
    ///
    /// # Errors
    ///
    /// Errors if the view is null or if the aliased basis set has no atomic number.
    pub fn atomic_number(&self) -> Result<u32, ChemistError> {
        self.header()?
            .atomic_number
            .get()
            .ok_or(ChemistError::NullState {
                what: "atomic number",
            })
    }

    /// Returns `true` if the view is bound and the aliased basis set has an atomic number.
    pub fn has_atomic_number(&self) -> bool {
        self.header
            .is_some_and(|header| header.atomic_number.get().is_some())
    }

    /// Returns a view of the centre of the aliased basis set.
    ///
    /// # Errors
    ///
    /// Errors if the view is null.
    pub fn center(&self) -> Result<PointView<'a, C>, ChemistError> {
        Ok(ViewBase::new(self.header()?.center))
    }

    /// Returns the total number of atomic orbitals over the aliased shells, or zero for a null
    /// view.
    pub fn n_aos(&self) -> usize {
        self.shells.iter().map(|shell| shell.n_aos()).sum()
    }

    /// Returns the total number of primitives over the aliased shells, or zero for a null view.
    pub fn n_primitives(&self) -> usize {
        self.shells.iter().map(|shell| shell.n_primitives()).sum()
    }

    /// Returns the range of primitive indices belonging to shell `shell`.
    ///
    /// # Errors
    ///
    /// Errors if `shell` is out of range.
    pub fn primitive_range(&self, shell: usize) -> Result<Range<usize>, ChemistError> {
        ChemistError::check_index(shell, self.size())?;
        let start = self
            .shells
            .iter()
            .take(shell)
            .map(|shell| shell.n_primitives())
            .sum::<usize>();
        Ok(start..start + self.shells.get(shell).n_primitives())
    }

    /// Returns the index of the shell containing primitive `primitive`.
    ///
    /// # Errors
    ///
    /// Errors if `primitive` is out of range.
    pub fn primitive_to_shell(&self, primitive: usize) -> Result<usize, ChemistError> {
        ChemistError::check_index(primitive, self.n_primitives())?;
        let mut end = 0;
        for (i, shell) in self.shells.iter().enumerate() {
            end += shell.n_primitives();
            if primitive < end {
                return Ok(i);
            }
        }
        Err(ChemistError::OutOfRange {
            index: primitive,
            size: end,
        })
    }

    /// Returns a view of primitive `primitive`, counted across all aliased shells.
    ///
    /// # Errors
    ///
    /// Errors if `primitive` is out of range.
    pub fn primitive(&self, primitive: usize) -> Result<PrimitiveView<'a, C>, ChemistError> {
        let shell = self.primitive_to_shell(primitive)?;
        let start = self.primitive_range(shell)?.start;
        self.shells.get(shell).primitive(primitive - start)
    }

    /// Copies the aliased state into a new [`AtomicBasisSet`].
    ///
    /// # Errors
    ///
    /// Errors if the view is null.
    pub fn as_atomic_basis_set(&self) -> Result<AtomicBasisSet, ChemistError> {
        let header = self.header()?;
        let mut abs = AtomicBasisSet {
            name: header.name.get_cloned(),
            atomic_number: header.atomic_number.get(),
            center: header.center.to_point(),
            ..AtomicBasisSet::default()
        };
        for shell in self.shells.iter() {
            let shell = shell.to_shell();
            let cg = shell.contracted_gaussian();
            abs.add_shell(
                shell.pure(),
                shell.l(),
                cg.coefficients().to_vec(),
                cg.exponents().to_vec(),
            )?;
        }
        Ok(abs)
    }

    /// Returns a read-only view aliasing the same state.
    pub fn as_const(&self) -> AtomicBasisSetView<'a, Const> {
        AtomicBasisSetView {
            header: self.header,
            shells: self.shells.as_const(),
        }
    }
}

impl<'a> AtomicBasisSetView<'a, Mutable> {
    /// # Errors
    ///
    /// Errors if the view is null.
    pub fn set_basis_set_name(&self, name: &str) -> Result<(), ChemistError> {
        self.header()?.name.set(Some(name.to_string()));
        Ok(())
    }

    /// # Errors
    ///
    /// Errors if the view is null.
    pub fn set_atomic_number(&self, atomic_number: u32) -> Result<(), ChemistError> {
        self.header()?.atomic_number.set(Some(atomic_number));
        Ok(())
    }

    /// Overwrites the aliased state with that of `abs`.
    ///
    /// # Errors
    ///
    /// Errors if the view is null, or if the number of shells or the number of primitives of any
    /// shell differs from `abs`. Nothing is written in that case.
    pub fn assign(&self, abs: &AtomicBasisSet) -> Result<(), ChemistError> {
        let header = self.header()?;
        ChemistError::check_size(self.size(), abs.size())?;
        self.shells
            .iter()
            .zip(abs.iter())
            .try_for_each(|(lhs, rhs)| {
                ChemistError::check_size(lhs.n_primitives(), rhs.n_primitives())
            })?;
        header.name.set(abs.name.clone());
        header.atomic_number.set(abs.atomic_number);
        header.center.write(&abs.center);
        self.shells
            .iter()
            .zip(abs.iter())
            .try_for_each(|(lhs, rhs)| lhs.assign(&rhs.to_shell()))
    }
}

impl<'a, C: Constness> Default for AtomicBasisSetView<'a, C> {
    fn default() -> Self {
        Self::null()
    }
}

impl<'a, C: Constness> Clone for AtomicBasisSetView<'a, C> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            shells: self.shells.clone(),
        }
    }
}

impl<'a> From<AtomicBasisSetView<'a, Mutable>> for AtomicBasisSetView<'a, Const> {
    fn from(view: AtomicBasisSetView<'a, Mutable>) -> Self {
        AtomicBasisSetView {
            header: view.header,
            shells: view.shells.into(),
        }
    }
}

impl<'a, C: Constness> IndexableContainer for AtomicBasisSetView<'a, C> {
    type Element<'s> = ShellView<'a, C> where Self: 's;

    fn size_impl(&self) -> usize {
        self.shells.size()
    }

    fn at_impl(&self, i: usize) -> ShellView<'a, C> {
        self.shells.get(i)
    }
}

impl<'a, 'b, C1, C2> PartialEq<AtomicBasisSetView<'b, C2>> for AtomicBasisSetView<'a, C1>
where
    C1: Constness,
    C2: Constness,
{
    fn eq(&self, other: &AtomicBasisSetView<'b, C2>) -> bool {
        match (self.header, other.header) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => {
                lhs.name.get_cloned() == rhs.name.get_cloned()
                    && lhs.atomic_number.get() == rhs.atomic_number.get()
                    && lhs.center == rhs.center
                    && views_eq(&self.shells, &other.shells)
            }
            _ => false,
        }
    }
}

impl<'a, C: Constness> PartialEq<AtomicBasisSet> for AtomicBasisSetView<'a, C> {
    fn eq(&self, other: &AtomicBasisSet) -> bool {
        *self == other.view()
    }
}

impl<'a, C: Constness> PartialEq<AtomicBasisSetView<'a, C>> for AtomicBasisSet {
    fn eq(&self, other: &AtomicBasisSetView<'a, C>) -> bool {
        other == self
    }
}

impl<'a, C: Constness> Hash for AtomicBasisSetView<'a, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(header) = self.header {
            header.name.get_cloned().hash(state);
            header.atomic_number.get().hash(state);
            header.center.hash(state);
        }
        self.shells.hash(state);
    }
}

impl<'a, C: Constness> fmt::Debug for AtomicBasisSetView<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.header {
            Some(header) => f
                .debug_struct("AtomicBasisSetView")
                .field("name", &header.name.get_cloned())
                .field("atomic_number", &header.atomic_number.get())
                .field("center", &header.center)
                .field("shells", &self.shells)
                .finish(),
            None => write!(f, "<null view>"),
        }
    }
}

impl<'a, C: Constness> fmt::Display for AtomicBasisSetView<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(header) = self.header else {
            return write!(f, "<null view>");
        };
        writeln!(
            f,
            "{} (Z = {}) @ {}",
            header.name.get_cloned().as_deref().unwrap_or("<unnamed>"),
            header
                .atomic_number
                .get()
                .map_or("?".to_string(), |z| z.to_string()),
            header.center
        )?;
        for shell in self.shells.iter() {
            write!(f, "{shell}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "atomic_basis_set_tests.rs"]
mod atomic_basis_set_tests;
