//! The generic container-view facade.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::view::pimpl::{AliasBackend, ViewPimpl};
use crate::view::{Const, Constness, Mutable, ViewBase};

/// A view of a sequence of elements owned elsewhere.
///
/// The view holds an optional storage strategy; without one it is a *null* view of size zero.
/// Cloning a view copies the strategy's bookkeeping only, so the clone aliases the same elements
/// and can later be reseated (by plain assignment) independently. Element `i` is returned as a
/// [`ViewBase`] with the same const-ness as the container view.
///
/// Entity-specific aliases such as [`NucleiView`](crate::nucleus::NucleiView) fix the backend
/// type `B` and add entity-specific accessors.
///
/// The element type `E` is always `B::Element`. It is a separate parameter so that views stay
/// covariant in the lifetime of the storage they alias.
pub struct ContainerView<C: Constness, B, E> {
    pimpl: Option<ViewPimpl<B, E>>,
    constness: PhantomData<C>,
}

impl<C, B, E> ContainerView<C, B, E>
where
    C: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    /// Returns a null view.
    pub fn null() -> Self {
        Self::from_pimpl(None)
    }

    pub(crate) fn from_backend(backend: B) -> Self {
        Self::from_pimpl(Some(ViewPimpl::Contiguous(backend)))
    }

    pub(crate) fn from_pimpl(pimpl: Option<ViewPimpl<B, E>>) -> Self {
        Self {
            pimpl,
            constness: PhantomData,
        }
    }

    pub(crate) fn pimpl(&self) -> Option<&ViewPimpl<B, E>> {
        self.pimpl.as_ref()
    }

    /// Returns a shareable handle to the storage strategy, for building several subsets that
    /// can recognise each other by identity.
    pub(crate) fn shared_pimpl(&self) -> Option<Rc<ViewPimpl<B, E>>> {
        self.pimpl.as_ref().map(|pimpl| Rc::new(pimpl.clone()))
    }

    /// Returns `true` if this view does not alias anything.
    pub fn is_null(&self) -> bool {
        self.pimpl.is_none()
    }

    /// Returns `true` if this is a read-only view.
    pub fn is_const(&self) -> bool {
        C::IS_CONST
    }

    /// Returns a view of the elements of this view selected by `members`, in the given order.
    ///
    /// # Errors
    ///
    /// Errors with [`ChemistError::OutOfRange`] if a member index is not smaller than the size
    /// of this view.
    pub fn subset<I>(&self, members: I) -> Result<Self, ChemistError>
    where
        I: IntoIterator<Item = usize>,
    {
        Self::subset_of(self.shared_pimpl(), members.into_iter().collect())
    }

    pub(crate) fn subset_of(
        superset: Option<Rc<ViewPimpl<B, E>>>,
        members: Vec<usize>,
    ) -> Result<Self, ChemistError> {
        match superset {
            Some(superset) => Ok(Self::from_pimpl(Some(ViewPimpl::subset(superset, members)?))),
            None => match members.first() {
                Some(&index) => Err(ChemistError::OutOfRange { index, size: 0 }),
                None => Ok(Self::null()),
            },
        }
    }

    /// Returns a view listing individually aliased elements in the given order.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = ViewBase<C, E>>,
    {
        Self::from_pimpl(Some(ViewPimpl::List(
            elements.into_iter().map(|element| element.shared()).collect(),
        )))
    }

    /// Returns a view of the concatenation of several views.
    ///
    /// Null views are skipped. A single remaining view is returned as is, and if none remain the
    /// result is a null view.
    pub fn concatenate<I>(views: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::from_pimpl(ViewPimpl::union(
            views.into_iter().filter_map(|view| view.pimpl).collect(),
        ))
    }

    /// Moves the aliased state out of this view, leaving a null view behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Exchanges what two views alias.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Returns a read-only view aliasing the same elements.
    pub fn as_const(&self) -> ContainerView<Const, B, E> {
        ContainerView::from_pimpl(self.pimpl.clone())
    }

    /// Rebuilds this view over a derived backend, keeping its storage strategy.
    pub(crate) fn project<D, DE, F, G>(&self, backend: F, element: G) -> ContainerView<C, D, DE>
    where
        D: AliasBackend<Element = DE>,
        DE: PartialEq,
        F: Fn(&B) -> D,
        G: Fn(&E) -> DE,
    {
        ContainerView::from_pimpl(
            self.pimpl
                .as_ref()
                .map(|pimpl| pimpl.project(&backend, &element)),
        )
    }
}

impl<C, B, E> Default for ContainerView<C, B, E>
where
    C: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    fn default() -> Self {
        Self::null()
    }
}

impl<C: Constness, B: Clone, E> Clone for ContainerView<C, B, E> {
    fn clone(&self) -> Self {
        Self {
            pimpl: self.pimpl.clone(),
            constness: PhantomData,
        }
    }
}

impl<B, E> From<ContainerView<Mutable, B, E>> for ContainerView<Const, B, E> {
    fn from(view: ContainerView<Mutable, B, E>) -> Self {
        ContainerView {
            pimpl: view.pimpl,
            constness: PhantomData,
        }
    }
}

impl<C, B, E> IndexableContainer for ContainerView<C, B, E>
where
    C: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    type Element<'s> = ViewBase<C, E> where Self: 's;

    fn size_impl(&self) -> usize {
        self.pimpl.as_ref().map_or(0, ViewPimpl::size)
    }

    fn at_impl(&self, i: usize) -> ViewBase<C, E> {
        match &self.pimpl {
            Some(pimpl) => ViewBase::from_shared(pimpl.get_element(i)),
            None => panic!("element {i} requested from a null view"),
        }
    }
}

/// Value equality of two views of the same entity type, whatever their const-ness.
///
/// Taking both views as arguments lets their storage lifetimes shrink to a common one.
pub(crate) fn views_eq<C1, C2, B, E>(
    lhs: &ContainerView<C1, B, E>,
    rhs: &ContainerView<C2, B, E>,
) -> bool
where
    C1: Constness,
    C2: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    match (&lhs.pimpl, &rhs.pimpl) {
        (Some(l), Some(r)) => l.are_equal(r),
        _ => lhs.size() == rhs.size(),
    }
}

impl<C1, C2, B, E> PartialEq<ContainerView<C2, B, E>> for ContainerView<C1, B, E>
where
    C1: Constness,
    C2: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq,
{
    fn eq(&self, other: &ContainerView<C2, B, E>) -> bool {
        views_eq(self, other)
    }
}

impl<C, B, E> Hash for ContainerView<C, B, E>
where
    C: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.size());
        self.iter().for_each(|element| element.hash(state));
    }
}

impl<C, B, E> fmt::Debug for ContainerView<C, B, E>
where
    C: Constness,
    B: AliasBackend<Element = E>,
    E: PartialEq + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "<null view>")
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}
