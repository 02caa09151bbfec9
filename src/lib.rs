//! # chemviews: owning entities and aliasing views for computational chemistry
//!
//! chemviews provides the data model of a quantum-chemistry code: points, point charges, nuclei,
//! molecules, Gaussian primitives, contracted Gaussians, shells, atomic basis sets, AO basis sets
//! and fragmented nuclei with caps.
//!
//! Every owning entity stores its state as parallel arrays and has a *view* type presenting the
//! same interface while aliasing storage owned elsewhere. A view may alias
//! - the whole of an owning entity,
//! - an index-selected subset of another view,
//! - the concatenation of several views, or
//! - a list of individually aliased elements,
//!
//! and client code cannot tell these apart. Whether a view may write through its alias is
//! carried in its type by a [`view::Constness`] marker: `Mutable` views are built from mutable
//! borrows and `Const` views from shared ones.
//!
//! ## Copy semantics
//!
//! Cloning an owning entity is a deep copy. Cloning a view is a shallow copy: both views alias
//! the same elements, and writing through one is observable through the other.
//!
//! ```
//! use chemviews::container::IndexableContainer;
//! use chemviews::nucleus::{Nuclei, Nucleus};
//! use chemviews::point::Point;
//!
//! let mut nuclei = Nuclei::new();
//! nuclei.push(Nucleus::new("H", 1, 1.008, Point::new(0.0, 0.0, 0.0)));
//! nuclei.push(Nucleus::new("He", 2, 4.003, Point::new(0.0, 0.0, 1.0)));
//!
//! {
//!     let view = nuclei.view_mut();
//!     let alias = view.clone();
//!     view.get(0).set_name("D");
//!     assert_eq!(alias.get(0).name(), "D");
//! }
//! assert_eq!(nuclei.get(0).name(), "D");
//! ```
//!
//! ## Input
//!
//! A chemical system can be described in a YAML file read through [`io::read_chemviews_yaml`]
//! into an [`interfaces::input::ChemistInput`]. Summaries are logged to the `chemviews-output`
//! target of the [`log`] facade.

pub mod auxiliary;
pub mod basis_set;
pub mod container;
pub mod error;
pub mod fragmenting;
pub mod interfaces;
pub mod io;
pub mod molecule;
pub mod nucleus;
pub mod point;
pub mod point_charge;
pub mod view;
