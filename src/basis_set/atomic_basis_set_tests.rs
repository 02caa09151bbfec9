use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::basis_set::{AtomicBasisSet, AtomicBasisSetView, Primitive, ShellType};
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::Point;
use crate::view::{Const, Mutable};

fn sto3g_o(center: Point) -> AtomicBasisSet {
    let mut abs = AtomicBasisSet::new(Some("STO-3G"), Some(8), center);
    abs.add_shell(
        ShellType::Pure,
        0,
        vec![0.1543289673, 0.5353281423, 0.4446345422],
        vec![130.7093214, 23.80886605, 6.443608313],
    )
    .unwrap();
    abs.add_shell(
        ShellType::Pure,
        0,
        vec![-0.09996722919, 0.3995128261, 0.7001154689],
        vec![5.033151319, 1.169596125, 0.3803889600],
    )
    .unwrap();
    abs.add_shell(
        ShellType::Cartesian,
        1,
        vec![0.1559162750, 0.6076837186, 0.3919573931],
        vec![5.033151319, 1.169596125, 0.3803889600],
    )
    .unwrap();
    abs
}

#[test]
fn test_atomic_basis_set_metadata() {
    let mut abs = AtomicBasisSet::default();
    assert!(!abs.has_name());
    assert!(!abs.has_atomic_number());
    assert_eq!(
        abs.basis_set_name(),
        Err(ChemistError::NullState {
            what: "basis set name"
        })
    );
    assert!(abs.atomic_number().is_err());
    assert_eq!(abs.size(), 0);
    assert_eq!(abs.n_aos(), 0);

    abs.set_basis_set_name("cc-pVDZ");
    abs.set_atomic_number(1);
    abs.set_center(Point::new(0.0, 1.0, 0.0));
    assert_eq!(abs.basis_set_name(), Ok("cc-pVDZ"));
    assert_eq!(abs.atomic_number(), Ok(1));
    assert_relative_eq!(abs.center().y(), 1.0);
}

#[test]
fn test_atomic_basis_set_shells() {
    let center = Point::new(0.0, 0.0, 0.1);
    let mut abs = sto3g_o(center);
    assert_eq!(abs.size(), 3);
    assert_eq!(abs.n_aos(), 5);
    assert_eq!(abs.n_primitives(), 9);
    assert_eq!(abs.get(2).l(), 1);
    assert_eq!(abs.get(2).n_aos(), 3);
    assert_eq!(abs.get(1).center(), center);

    assert_eq!(abs.primitive_range(1), Ok(3..6));
    assert!(abs.primitive_range(3).is_err());
    assert_eq!(abs.primitive_to_shell(0), Ok(0));
    assert_eq!(abs.primitive_to_shell(5), Ok(1));
    assert_eq!(abs.primitive_to_shell(6), Ok(2));
    assert!(abs.primitive_to_shell(9).is_err());
    assert_eq!(
        abs.primitive(4).unwrap(),
        Primitive::new(0.3995128261, 1.169596125, center)
    );

    assert_eq!(
        abs.add_shell(ShellType::Pure, 2, vec![1.0, 2.0], vec![1.0]),
        Err(ChemistError::SizeMismatch {
            expected: 2,
            found: 1
        })
    );
    assert_eq!(abs.size(), 3);

    abs.add_shell(ShellType::Pure, 2, vec![], vec![]).unwrap();
    assert_eq!(abs.n_aos(), 10);
    assert_eq!(abs.primitive_range(3), Ok(9..9));
    assert_eq!(abs.primitive_to_shell(8), Ok(2));
}

#[test]
fn test_atomic_basis_set_shells_share_center() {
    let mut abs = sto3g_o(Point::default());
    abs.at_mut(0).unwrap().center().set_z(1.5);
    assert_relative_eq!(abs.center().z(), 1.5);
    assert_relative_eq!(abs.get(2).center().z(), 1.5);
    assert!(abs.at_mut(3).is_err());

    {
        let view = abs.view_mut();
        view.get(2).set_l(2);
        view.get(2).primitive(1).unwrap().set_coefficient(0.0);
        view.center().unwrap().set_x(-1.0);
    }
    assert_eq!(abs.get(2).l(), 2);
    assert_eq!(abs.get(2).n_aos(), 6);
    assert_relative_eq!(abs.primitive(7).unwrap().coefficient(), 0.0);
    assert_relative_eq!(abs.get(0).center().x(), -1.0);
}

#[test]
fn test_atomic_basis_set_view() {
    let abs = sto3g_o(Point::new(0.0, 0.0, 0.1));
    let view = abs.view();
    assert!(!view.is_null());
    assert!(view.is_const());
    assert_eq!(view.basis_set_name(), Ok("STO-3G".to_string()));
    assert!(view.has_name());
    assert_eq!(view.atomic_number(), Ok(8));
    assert!(view.has_atomic_number());
    assert_relative_eq!(view.center().unwrap().z(), 0.1);
    assert_eq!(view.size(), 3);
    assert_eq!(view.shells().size(), 3);
    assert_eq!(view.n_aos(), 5);
    assert_eq!(view.n_primitives(), 9);
    assert_eq!(view.primitive_range(2), Ok(6..9));
    assert_eq!(view.primitive_to_shell(3), Ok(1));
    assert_eq!(view.primitive(8).unwrap(), abs.primitive(8).unwrap());
    assert_eq!(view.as_atomic_basis_set().unwrap(), abs);
    assert_eq!(view, abs);
    assert_eq!(abs, view);
    assert_eq!(calculate_hash(&view), calculate_hash(&abs));
}

#[test]
fn test_atomic_basis_set_view_subset_and_with_shells() {
    let abs = sto3g_o(Point::default());
    let view = abs.view();

    let valence = view.subset([1, 2]).unwrap();
    assert_eq!(valence.size(), 2);
    assert_eq!(valence.n_aos(), 4);
    assert_eq!(valence.n_primitives(), 6);
    assert_eq!(valence.primitive_range(1), Ok(3..6));
    assert_eq!(valence.primitive_to_shell(2), Ok(0));
    assert_eq!(valence.primitive(3).unwrap(), abs.primitive(6).unwrap());
    assert_eq!(valence.basis_set_name(), Ok("STO-3G".to_string()));
    assert!(view.subset([3]).is_err());

    let as_owned = valence.as_atomic_basis_set().unwrap();
    assert_eq!(as_owned.size(), 2);
    assert_eq!(as_owned.primitive_range(1), Ok(3..6));
    assert_eq!(valence, as_owned);

    let listed = view.with_shells([view.get(1), view.get(2)]).unwrap();
    assert_eq!(listed, valence);
    assert_eq!(valence, listed);
    assert_ne!(listed, view);

    let core = view.subset([0]).unwrap();
    assert_ne!(core, valence);
}

#[test]
fn test_atomic_basis_set_view_null() {
    let null = AtomicBasisSetView::<'_, Const>::null();
    assert!(null.is_null());
    assert_eq!(null.size(), 0);
    assert_eq!(null.n_aos(), 0);
    assert_eq!(null.n_primitives(), 0);
    assert!(!null.has_name());
    assert!(!null.has_atomic_number());
    assert_eq!(
        null.basis_set_name(),
        Err(ChemistError::NullState {
            what: "atomic basis set view"
        })
    );
    assert!(null.atomic_number().is_err());
    assert!(null.center().is_err());
    assert!(null.subset([]).is_err());
    assert!(null.as_atomic_basis_set().is_err());
    assert_eq!(null.to_string(), "<null view>");

    let empty = AtomicBasisSet::default();
    assert_eq!(null, AtomicBasisSetView::<'_, Mutable>::default());
    assert_ne!(null, empty.view());
    assert_ne!(empty.view(), null);
    assert_eq!(empty.view(), AtomicBasisSet::default());
}

#[test]
fn test_atomic_basis_set_view_set_and_assign() {
    let mut abs = sto3g_o(Point::default());
    let target = sto3g_o(Point::new(1.0, 2.0, 3.0));
    {
        let view = abs.view_mut();
        view.set_basis_set_name("minimal").unwrap();
        view.set_atomic_number(9).unwrap();
        assert_eq!(view.basis_set_name(), Ok("minimal".to_string()));

        let mut too_short = target.clone();
        too_short.add_shell(ShellType::Pure, 1, vec![1.0], vec![1.0]).unwrap();
        assert_eq!(
            view.assign(&too_short),
            Err(ChemistError::SizeMismatch {
                expected: 3,
                found: 4
            })
        );

        let mut uneven = AtomicBasisSet::new(Some("STO-3G"), Some(8), Point::default());
        for shell in target.iter() {
            let cg = shell.contracted_gaussian().as_contracted_gaussian().unwrap();
            uneven
                .add_shell(
                    shell.pure(),
                    shell.l(),
                    cg.coefficients()[..2].to_vec(),
                    cg.exponents()[..2].to_vec(),
                )
                .unwrap();
        }
        assert!(view.assign(&uneven).is_err());
        assert_eq!(view.atomic_number(), Ok(9));

        view.assign(&target).unwrap();
        assert_eq!(view, target);
    }
    assert_eq!(abs, target);

    let null = AtomicBasisSetView::<'_, Mutable>::null();
    assert!(null.set_basis_set_name("x").is_err());
    assert!(null.set_atomic_number(1).is_err());
    assert!(null.assign(&target).is_err());
}

#[test]
fn test_atomic_basis_set_view_into_const() {
    let mut abs = sto3g_o(Point::default());
    let view = abs.view_mut();
    let alias = view.clone();
    let read_only: AtomicBasisSetView<'_, Const> = view.into();
    assert!(read_only.is_const());
    assert_eq!(read_only, alias);
    assert_eq!(alias.as_const(), read_only);
}

#[test]
fn test_atomic_basis_set_serde_round_trip() {
    let abs = sto3g_o(Point::new(0.0, 0.0, 0.1));
    let yaml = serde_yaml::to_string(&abs).unwrap();
    let read: AtomicBasisSet = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, abs);
    assert!(abs.to_string().starts_with("STO-3G (Z = 8)"));
}

#[test]
fn test_atomic_basis_set_serde_keeps_offsets_consistent() {
    let mut abs = sto3g_o(Point::new(0.0, 0.0, 0.1));
    abs.add_shell(ShellType::Pure, 2, vec![], vec![]).unwrap();
    let bytes = bincode::serialize(&abs).unwrap();
    let read: AtomicBasisSet = bincode::deserialize(&bytes).unwrap();
    assert_eq!(read, abs);
    assert_eq!(read.n_primitives(), 9);
    assert_eq!(read.primitive_range(3), Ok(9..9));
    assert_eq!(read.view().n_primitives(), 9);

    let yaml = "\
name: STO-3G
atomic_number: 1
center: {x: 0.0, y: 0.0, z: 0.0}
shells:
  - pure: Pure
    l: 0
    primitives:
      - {coefficient: 0.15432897, exponent: 3.42525091}
      - {coefficient: 0.53532814, exponent: 0.62391373}
";
    let hydrogen: AtomicBasisSet = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(hydrogen.size(), 1);
    assert_eq!(hydrogen.primitive_range(0), Ok(0..2));
    assert_relative_eq!(hydrogen.primitive(1).unwrap().exponent(), 0.62391373);
}

#[test]
fn test_atomic_basis_set_inconsistent_document_fails_to_load() {
    let missing_exponent = "\
name: STO-3G
atomic_number: 1
center: {x: 0.0, y: 0.0, z: 0.0}
shells:
  - pure: Pure
    l: 0
    primitives:
      - {coefficient: 0.15432897}
";
    assert!(serde_yaml::from_str::<AtomicBasisSet>(missing_exponent).is_err());

    let raw_offsets = "\
name: STO-3G
atomic_number: 1
center: {x: 0.0, y: 0.0, z: 0.0}
pure: [Pure]
l: [0]
primitive_offsets: [0]
coefficients: []
exponents: []
";
    assert!(serde_yaml::from_str::<AtomicBasisSet>(raw_offsets).is_err());
}

#[test]
fn test_atomic_basis_set_view_with_shells_rejects_other_centres() {
    let here = sto3g_o(Point::default());
    let there = sto3g_o(Point::new(0.0, 0.0, 2.0));
    let elsewhere = sto3g_o(Point::default());

    let view = here.view();
    let borrowed = view
        .with_shells([elsewhere.view().get(2), view.get(0)])
        .unwrap();
    assert_eq!(borrowed.size(), 2);
    assert_eq!(borrowed.get(0).l(), 1);

    assert!(matches!(
        view.with_shells([view.get(0), there.view().get(1)]),
        Err(ChemistError::NotASubset(_))
    ));
}
