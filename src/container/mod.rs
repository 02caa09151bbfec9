//! Indexable-container behaviour shared by every owning entity and every view.
//!
//! An implementor only supplies its size and an unchecked element accessor; checked access,
//! iteration and element-wise comparison are derived from those two hooks.

use std::iter::FusedIterator;

use crate::error::ChemistError;

/// A trait for random-access containers whose elements are produced on demand.
///
/// The element type is a generic associated type because elements are frequently lightweight
/// views borrowing from the container rather than references to stored values.
pub trait IndexableContainer {
    /// The type yielded for each element.
    type Element<'s>
    where
        Self: 's;

    /// Returns the number of elements. Implementor hook.
    fn size_impl(&self) -> usize;

    /// Returns element `i` without bounds checking beyond what the storage itself performs.
    /// Implementor hook.
    fn at_impl(&self, i: usize) -> Self::Element<'_>;

    /// Returns the number of elements in the container.
    fn size(&self) -> usize {
        self.size_impl()
    }

    /// Returns `true` if the container has no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns element `i` without a recoverable bounds check.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    fn get(&self, i: usize) -> Self::Element<'_> {
        self.at_impl(i)
    }

    /// Returns element `i`.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::OutOfRange`] if `i >= self.size()`.
    fn at(&self, i: usize) -> Result<Self::Element<'_>, ChemistError> {
        ChemistError::check_index(i, self.size())?;
        Ok(self.at_impl(i))
    }

    /// Returns an iterator over the elements in index order.
    fn iter(&self) -> ContainerIter<'_, Self> {
        ContainerIter {
            container: self,
            front: 0,
            back: self.size(),
        }
    }

    /// Compares two containers by size first, then element by element in index order.
    fn eq_elements<'s, 'o, O>(&'s self, other: &'o O) -> bool
    where
        O: IndexableContainer + ?Sized,
        Self::Element<'s>: PartialEq<O::Element<'o>>,
    {
        self.size() == other.size() && self.iter().zip(other.iter()).all(|(lhs, rhs)| lhs == rhs)
    }
}

/// A random-access iterator over an [`IndexableContainer`].
pub struct ContainerIter<'c, T: IndexableContainer + ?Sized> {
    container: &'c T,
    front: usize,
    back: usize,
}

impl<'c, T: IndexableContainer + ?Sized> Clone for ContainerIter<'c, T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'c, T: IndexableContainer + ?Sized> Iterator for ContainerIter<'c, T> {
    type Item = T::Element<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let element = self.container.at_impl(self.front);
            self.front += 1;
            Some(element)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'c, T: IndexableContainer + ?Sized> DoubleEndedIterator for ContainerIter<'c, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.container.at_impl(self.back))
        } else {
            None
        }
    }
}

impl<'c, T: IndexableContainer + ?Sized> ExactSizeIterator for ContainerIter<'c, T> {}

impl<'c, T: IndexableContainer + ?Sized> FusedIterator for ContainerIter<'c, T> {}
