//! The owning/view aliasing framework.
//!
//! Every owning entity has a view type that aliases its storage and presents the same
//! interface. Element views are [`ViewBase`] wrappers around a lightweight aliasing instance;
//! container views are [`ContainerView`]s dispatching to one of several storage strategies.
//! Whether a view may write through its alias is carried in the type by a [`Constness`] marker.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;
use std::rc::Rc;

pub(crate) mod column;
pub mod container_view;
pub mod pimpl;

pub use container_view::ContainerView;
pub use pimpl::AliasBackend;

// ---------
// Constness
// ---------

mod private {
    pub trait Sealed {}
}

/// Type-level marker stating whether a view may mutate the state it aliases.
pub trait Constness: private::Sealed + Copy + Default + fmt::Debug + 'static {
    /// `true` for read-only views.
    const IS_CONST: bool;
}

/// Marker for views that may write through their alias.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mutable;

/// Marker for read-only views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const;

impl private::Sealed for Mutable {}
impl private::Sealed for Const {}

impl Constness for Mutable {
    const IS_CONST: bool = false;
}

impl Constness for Const {
    const IS_CONST: bool = true;
}

// --------
// ViewBase
// --------

/// A view of a single aliased object.
///
/// The aliasing instance `A` is held behind an [`Rc`], so cloning a [`ViewBase`] is shallow and
/// both handles alias the same object. Read access goes through [`Deref`]; write access is
/// provided by inherent methods on `ViewBase<Mutable, A>` for each entity.
pub struct ViewBase<C: Constness, A> {
    aliased: Rc<A>,
    constness: PhantomData<C>,
}

impl<C: Constness, A> ViewBase<C, A> {
    /// Wraps an aliasing instance.
    pub(crate) fn new(aliased: A) -> Self {
        Self::from_shared(Rc::new(aliased))
    }

    pub(crate) fn from_shared(aliased: Rc<A>) -> Self {
        Self {
            aliased,
            constness: PhantomData,
        }
    }

    pub(crate) fn shared(&self) -> Rc<A> {
        Rc::clone(&self.aliased)
    }

    /// Returns the aliasing instance.
    pub fn pimpl(&self) -> &A {
        &self.aliased
    }

    /// Returns `true` if this is a read-only view.
    pub fn is_const(&self) -> bool {
        C::IS_CONST
    }

    /// Returns a read-only view aliasing the same object.
    pub fn as_const(&self) -> ViewBase<Const, A> {
        ViewBase::from_shared(self.shared())
    }
}

impl<C: Constness, A> Clone for ViewBase<C, A> {
    fn clone(&self) -> Self {
        Self::from_shared(self.shared())
    }
}

impl<C: Constness, A> Deref for ViewBase<C, A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.aliased
    }
}

impl<A> From<ViewBase<Mutable, A>> for ViewBase<Const, A> {
    fn from(view: ViewBase<Mutable, A>) -> Self {
        ViewBase::from_shared(view.aliased)
    }
}

impl<C1, C2, A> PartialEq<ViewBase<C2, A>> for ViewBase<C1, A>
where
    C1: Constness,
    C2: Constness,
    A: PartialEq,
{
    fn eq(&self, other: &ViewBase<C2, A>) -> bool {
        Rc::ptr_eq(&self.aliased, &other.aliased) || *self.aliased == *other.aliased
    }
}

impl<C: Constness, A: Hash> Hash for ViewBase<C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.aliased.hash(state);
    }
}

impl<C: Constness, A: fmt::Debug> fmt::Debug for ViewBase<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.aliased, f)
    }
}

impl<C: Constness, A: fmt::Display> fmt::Display for ViewBase<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.aliased, f)
    }
}
