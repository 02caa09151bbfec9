//! Storage strategies behind container views.
//!
//! A container view dispatches every access to a [`ViewPimpl`], a tagged variant over four
//! strategies:
//!
//! * `Contiguous`: one [`AliasBackend`] aliasing the field arrays of an owning entity;
//! * `Subset`: a shared handle to another strategy plus an ordered list of member indices;
//! * `Union`: an ordered concatenation of child strategies;
//! * `List`: an ordered list of individually aliased elements.

use std::rc::Rc;

use crate::error::ChemistError;

// ------------
// AliasBackend
// ------------

/// A trait for the contiguous storage strategy of one entity type.
///
/// Implementors alias the struct-of-arrays fields of an owning container and hand out one
/// aliasing instance per element.
pub trait AliasBackend: Clone {
    /// The aliasing instance for a single element.
    type Element: PartialEq;

    /// Returns the number of aliased elements.
    fn len(&self) -> usize;

    /// Returns `true` if no elements are aliased.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the aliasing instance for element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    fn element(&self, i: usize) -> Self::Element;

    /// Returns `true` if both backends alias exactly the same storage.
    fn same_storage(&self, other: &Self) -> bool;

    /// Value equality of state shared by every element rather than stored per element, such as
    /// the common centre of the primitives of a contracted Gaussian. Compared even when both
    /// backends are empty.
    fn shared_eq(&self, _other: &Self) -> bool {
        true
    }
}

// ---------
// ViewPimpl
// ---------

/// The element type `E` is always `B::Element`. It is spelled out as a parameter so that views
/// stay covariant in the lifetime of the storage they alias.
pub(crate) enum ViewPimpl<B, E> {
    Contiguous(B),
    Subset(SubsetPimpl<B, E>),
    Union(UnionPimpl<B, E>),
    List(Vec<Rc<E>>),
}

pub(crate) struct SubsetPimpl<B, E> {
    superset: Rc<ViewPimpl<B, E>>,
    members: Vec<usize>,
}

pub(crate) struct UnionPimpl<B, E> {
    children: Vec<ViewPimpl<B, E>>,
    /// Prefix sums of the child sizes, starting at zero. One longer than `children`.
    offsets: Vec<usize>,
}

impl<B: Clone, E> Clone for ViewPimpl<B, E> {
    fn clone(&self) -> Self {
        match self {
            ViewPimpl::Contiguous(backend) => ViewPimpl::Contiguous(backend.clone()),
            ViewPimpl::Subset(subset) => ViewPimpl::Subset(SubsetPimpl {
                superset: Rc::clone(&subset.superset),
                members: subset.members.clone(),
            }),
            ViewPimpl::Union(union) => ViewPimpl::Union(UnionPimpl {
                children: union.children.clone(),
                offsets: union.offsets.clone(),
            }),
            ViewPimpl::List(elements) => ViewPimpl::List(elements.clone()),
        }
    }
}

impl<B, E> UnionPimpl<B, E> {
    /// Maps a global index to the owning child and the index within that child.
    fn locate(&self, i: usize) -> (usize, usize) {
        let child = self.offsets.partition_point(|&offset| offset <= i) - 1;
        (child, i - self.offsets[child])
    }
}

impl<B, E> ViewPimpl<B, E>
where
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    /// Builds a subset strategy after checking every member against the superset.
    pub(crate) fn subset(superset: Rc<Self>, members: Vec<usize>) -> Result<Self, ChemistError> {
        let size = superset.size();
        members
            .iter()
            .try_for_each(|&member| ChemistError::check_index(member, size))?;
        log::trace!(
            "Subset strategy selects {} of {size} elements.",
            members.len()
        );
        Ok(ViewPimpl::Subset(SubsetPimpl { superset, members }))
    }

    /// Builds a union strategy. A single child is returned as is and no children give `None`.
    pub(crate) fn union(mut children: Vec<Self>) -> Option<Self> {
        match children.len() {
            0 => None,
            1 => {
                log::trace!("Union of a single child degenerates to that child.");
                children.pop()
            }
            n_children => {
                let mut offsets = Vec::with_capacity(n_children + 1);
                offsets.push(0);
                for child in children.iter() {
                    let last = offsets.last().copied().unwrap_or(0);
                    offsets.push(last + child.size());
                }
                log::trace!(
                    "Union strategy concatenates {n_children} children with boundaries {offsets:?}."
                );
                Some(ViewPimpl::Union(UnionPimpl { children, offsets }))
            }
        }
    }

    pub(crate) fn size(&self) -> usize {
        match self {
            ViewPimpl::Contiguous(backend) => backend.len(),
            ViewPimpl::Subset(subset) => subset.members.len(),
            ViewPimpl::Union(union) => union.offsets.last().copied().unwrap_or(0),
            ViewPimpl::List(elements) => elements.len(),
        }
    }

    /// Returns the aliasing instance of element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub(crate) fn get_element(&self, i: usize) -> Rc<E> {
        match self {
            ViewPimpl::Contiguous(backend) => Rc::new(backend.element(i)),
            ViewPimpl::Subset(subset) => subset.superset.get_element(subset.members[i]),
            ViewPimpl::Union(union) => {
                let (child, local) = union.locate(i);
                union.children[child].get_element(local)
            }
            ViewPimpl::List(elements) => Rc::clone(&elements[i]),
        }
    }

    /// Returns the contiguous backend, if this is the contiguous strategy.
    pub(crate) fn as_contiguous(&self) -> Option<&B> {
        match self {
            ViewPimpl::Contiguous(backend) => Some(backend),
            _ => None,
        }
    }

    /// Returns `true` if both strategies are known to alias the same elements in the same order
    /// without looking at any values.
    fn same_storage(&self, other: &Self) -> bool {
        match (self, other) {
            (ViewPimpl::Contiguous(lhs), ViewPimpl::Contiguous(rhs)) => lhs.same_storage(rhs),
            (ViewPimpl::Subset(lhs), ViewPimpl::Subset(rhs)) => {
                lhs.members == rhs.members
                    && (Rc::ptr_eq(&lhs.superset, &rhs.superset)
                        || lhs.superset.same_storage(&rhs.superset))
            }
            (ViewPimpl::Union(lhs), ViewPimpl::Union(rhs)) => {
                lhs.offsets == rhs.offsets
                    && lhs
                        .children
                        .iter()
                        .zip(rhs.children.iter())
                        .all(|(l, r)| l.same_storage(r))
            }
            (ViewPimpl::List(lhs), ViewPimpl::List(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs.iter()).all(|(l, r)| Rc::ptr_eq(l, r))
            }
            _ => false,
        }
    }

    /// Value equality of the aliased sequences, whatever the two strategies are.
    ///
    /// Two contiguous strategies must also agree on their shared state. Other strategies carry
    /// no shared state of their own and are compared element by element.
    pub(crate) fn are_equal(&self, other: &Self) -> bool {
        if let (ViewPimpl::Contiguous(lhs), ViewPimpl::Contiguous(rhs)) = (self, other) {
            if !lhs.same_storage(rhs) && !lhs.shared_eq(rhs) {
                return false;
            }
        }
        self.elements_equal(other)
    }

    fn elements_equal(&self, other: &Self) -> bool {
        let size = self.size();
        if size != other.size() {
            return false;
        }
        if size == 0 || self.same_storage(other) {
            return true;
        }
        if let (ViewPimpl::Union(lhs), ViewPimpl::Union(rhs)) = (self, other) {
            if lhs.offsets == rhs.offsets {
                return lhs
                    .children
                    .iter()
                    .zip(rhs.children.iter())
                    .all(|(l, r)| l.elements_equal(r));
            }
        }
        (0..size).all(|i| {
            let lhs = self.get_element(i);
            let rhs = other.get_element(i);
            Rc::ptr_eq(&lhs, &rhs) || *lhs == *rhs
        })
    }

    /// Rebuilds the same strategy over a derived backend.
    ///
    /// # Arguments
    ///
    /// * `backend` - Maps a contiguous backend to the derived backend.
    /// * `element` - Maps an element alias to the derived element alias.
    pub(crate) fn project<D, DE, F, G>(&self, backend: &F, element: &G) -> ViewPimpl<D, DE>
    where
        D: AliasBackend<Element = DE>,
        DE: PartialEq,
        F: Fn(&B) -> D,
        G: Fn(&E) -> DE,
    {
        match self {
            ViewPimpl::Contiguous(source) => ViewPimpl::Contiguous(backend(source)),
            ViewPimpl::Subset(subset) => ViewPimpl::Subset(SubsetPimpl {
                superset: Rc::new(subset.superset.project(backend, element)),
                members: subset.members.clone(),
            }),
            ViewPimpl::Union(union) => ViewPimpl::Union(UnionPimpl {
                children: union
                    .children
                    .iter()
                    .map(|child| child.project(backend, element))
                    .collect(),
                offsets: union.offsets.clone(),
            }),
            ViewPimpl::List(elements) => ViewPimpl::List(
                elements
                    .iter()
                    .map(|source| Rc::new(element(source)))
                    .collect(),
            ),
        }
    }
}
