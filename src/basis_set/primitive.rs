//! Primitive Gaussian functions.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::auxiliary::misc::HashableFloat;
use crate::point::{Point, PointRef, PointView};
use crate::view::column::Slot;
use crate::view::{Const, Constness, Mutable, ViewBase};

// ---------
// Primitive
// ---------

/// A structure representing a primitive Gaussian $`c\, e^{-\alpha |\mathbf{r} - \mathbf{A}|^2}`$:
/// a contraction coefficient $`c`$, an exponent $`\alpha`$ and a centre $`\mathbf{A}`$.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    coefficient: f64,
    exponent: f64,
    center: Point,
}

impl Primitive {
    /// Creates a primitive Gaussian.
    pub fn new(coefficient: f64, exponent: f64, center: Point) -> Self {
        Self {
            coefficient,
            exponent,
            center,
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn set_coefficient(&mut self, coefficient: f64) {
        self.coefficient = coefficient;
    }

    pub fn set_exponent(&mut self, exponent: f64) {
        self.exponent = exponent;
    }

    pub fn center_mut(&mut self) -> &mut Point {
        &mut self.center
    }

    /// Returns a read-only view of this primitive.
    pub fn view(&self) -> PrimitiveView<'_, Const> {
        ViewBase::new(PrimitiveRef {
            coefficient: Slot::borrowed(&self.coefficient),
            exponent: Slot::borrowed(&self.exponent),
            center: *self.center.view(),
        })
    }

    /// Returns a mutable view of this primitive.
    pub fn view_mut(&mut self) -> PrimitiveView<'_, Mutable> {
        let Primitive {
            coefficient,
            exponent,
            center,
        } = self;
        ViewBase::new(PrimitiveRef {
            coefficient: Slot::aliased(coefficient),
            exponent: Slot::aliased(exponent),
            center: *center.view_mut(),
        })
    }
}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coefficient.integer_decode().hash(state);
        self.exponent.integer_decode().hash(state);
        self.center.hash(state);
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>+14.8e} {:>14.8e} @ {}",
            self.coefficient, self.exponent, self.center
        )
    }
}

// ------------
// PrimitiveRef
// ------------

/// The aliasing instance behind a [`PrimitiveView`].
#[derive(Clone, Copy)]
pub struct PrimitiveRef<'a> {
    coefficient: Slot<'a, f64>,
    exponent: Slot<'a, f64>,
    center: PointRef<'a>,
}

/// A view of a primitive Gaussian stored elsewhere.
pub type PrimitiveView<'a, C = Mutable> = ViewBase<C, PrimitiveRef<'a>>;

impl<'a> PrimitiveRef<'a> {
    pub(crate) fn from_parts(
        coefficient: Slot<'a, f64>,
        exponent: Slot<'a, f64>,
        center: PointRef<'a>,
    ) -> Self {
        Self {
            coefficient,
            exponent,
            center,
        }
    }

    pub(crate) fn center_ref(&self) -> PointRef<'a> {
        self.center
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient.get()
    }

    pub fn exponent(&self) -> f64 {
        self.exponent.get()
    }

    /// Copies the aliased primitive into a new [`Primitive`].
    pub fn to_primitive(&self) -> Primitive {
        Primitive::new(self.coefficient(), self.exponent(), self.center.to_point())
    }

    pub(crate) fn write(&self, primitive: &Primitive) {
        self.coefficient.set(primitive.coefficient);
        self.exponent.set(primitive.exponent);
        self.center.write(&primitive.center);
    }
}

impl<'a> PartialEq for PrimitiveRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient() == other.coefficient()
            && self.exponent() == other.exponent()
            && self.center == other.center
    }
}

impl<'a> PartialEq<Primitive> for PrimitiveRef<'a> {
    fn eq(&self, other: &Primitive) -> bool {
        self.to_primitive() == *other
    }
}

impl<'a> Hash for PrimitiveRef<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_primitive().hash(state);
    }
}

impl<'a> fmt::Debug for PrimitiveRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_primitive(), f)
    }
}

impl<'a> fmt::Display for PrimitiveRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_primitive(), f)
    }
}

impl<'a, C: Constness> PrimitiveView<'a, C> {
    /// Returns a view of the centre of this primitive. The centre is shared by every primitive
    /// of the same contracted Gaussian.
    pub fn center(&self) -> PointView<'a, C> {
        ViewBase::new(self.pimpl().center)
    }
}

impl<'a> PrimitiveView<'a, Mutable> {
    pub fn set_coefficient(&self, coefficient: f64) {
        self.pimpl().coefficient.set(coefficient);
    }

    pub fn set_exponent(&self, exponent: f64) {
        self.pimpl().exponent.set(exponent);
    }

    /// Overwrites the aliased primitive, including its centre, with the values of `primitive`.
    pub fn assign(&self, primitive: &Primitive) {
        self.pimpl().write(primitive);
    }
}

impl<'a, C: Constness> PartialEq<Primitive> for PrimitiveView<'a, C> {
    fn eq(&self, other: &Primitive) -> bool {
        self.pimpl() == other
    }
}

impl<'a, C: Constness> PartialEq<PrimitiveView<'a, C>> for Primitive {
    fn eq(&self, other: &PrimitiveView<'a, C>) -> bool {
        other == self
    }
}
