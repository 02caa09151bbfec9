//! Field-level aliasing primitives.
//!
//! A [`Column`] aliases one field array of a struct-of-arrays entity and a [`Slot`] aliases one
//! field of one element. Both come in two flavours: a shared borrow for read-only views, and a
//! slice of [`Cell`]s re-exposing a mutable borrow so that several handles in one thread can
//! read and write the same storage.

use std::cell::Cell;

// ----
// Slot
// ----

/// An alias of a single field value.
pub(crate) enum Slot<'a, T> {
    Borrowed(&'a T),
    Aliased(&'a Cell<T>),
}

impl<'a, T> Clone for Slot<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Slot<'a, T> {}

impl<'a, T> Slot<'a, T> {
    pub(crate) fn borrowed(value: &'a T) -> Self {
        Slot::Borrowed(value)
    }

    pub(crate) fn aliased(value: &'a mut T) -> Self {
        Slot::Aliased(Cell::from_mut(value))
    }

    /// Address of the aliased value, used for identity comparisons.
    pub(crate) fn addr(&self) -> *const T {
        match self {
            Slot::Borrowed(value) => *value as *const T,
            Slot::Aliased(cell) => cell.as_ptr() as *const T,
        }
    }

    pub(crate) fn same_storage(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }

    /// Overwrites the aliased value.
    ///
    /// # Panics
    ///
    /// Panics on a shared borrow. Mutating views are only ever built from mutable borrows, so
    /// reaching this is a bug in this crate.
    pub(crate) fn set(&self, value: T) {
        match self {
            Slot::Aliased(cell) => cell.set(value),
            Slot::Borrowed(_) => unreachable!("attempted to write through a read-only alias"),
        }
    }
}

impl<'a, T: Copy> Slot<'a, T> {
    pub(crate) fn get(&self) -> T {
        match self {
            Slot::Borrowed(value) => **value,
            Slot::Aliased(cell) => cell.get(),
        }
    }
}

impl<'a, T: Clone + Default> Slot<'a, T> {
    /// Returns a copy of a non-`Copy` value.
    ///
    /// The aliased cell is briefly swapped with the default value while the clone is taken, so
    /// the clone must not observe the same cell. `Clone` impls of plain data never do.
    pub(crate) fn get_cloned(&self) -> T {
        match self {
            Slot::Borrowed(value) => (*value).clone(),
            Slot::Aliased(cell) => {
                let value = cell.take();
                let copy = value.clone();
                cell.set(value);
                copy
            }
        }
    }
}

// ------
// Column
// ------

/// An alias of one field array.
pub(crate) enum Column<'a, T> {
    Borrowed(&'a [T]),
    Aliased(&'a [Cell<T>]),
}

impl<'a, T> Clone for Column<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Column<'a, T> {}

impl<'a, T> Default for Column<'a, T> {
    fn default() -> Self {
        Column::Borrowed(&[])
    }
}

impl<'a, T> Column<'a, T> {
    pub(crate) fn borrowed(values: &'a [T]) -> Self {
        Column::Borrowed(values)
    }

    pub(crate) fn aliased(values: &'a mut [T]) -> Self {
        Column::Aliased(Cell::from_mut(values).as_slice_of_cells())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Column::Borrowed(values) => values.len(),
            Column::Aliased(cells) => cells.len(),
        }
    }

    /// Returns the alias of element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub(crate) fn slot(&self, i: usize) -> Slot<'a, T> {
        match self {
            Column::Borrowed(values) => Slot::Borrowed(&values[i]),
            Column::Aliased(cells) => Slot::Aliased(&cells[i]),
        }
    }

    /// Returns the alias of the `len` elements starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub(crate) fn sub(&self, start: usize, len: usize) -> Self {
        match self {
            Column::Borrowed(values) => Column::Borrowed(&values[start..start + len]),
            Column::Aliased(cells) => Column::Aliased(&cells[start..start + len]),
        }
    }

    fn addr(&self) -> *const T {
        match self {
            Column::Borrowed(values) => values.as_ptr(),
            Column::Aliased(cells) => cells.as_ptr() as *const T,
        }
    }

    /// Returns `true` if both columns alias exactly the same storage.
    pub(crate) fn same_storage(&self, other: &Self) -> bool {
        self.len() == other.len() && std::ptr::eq(self.addr(), other.addr())
    }
}
