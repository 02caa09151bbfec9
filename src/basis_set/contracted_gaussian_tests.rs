use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::basis_set::{ContractedGaussian, ContractedGaussianView, Primitive};
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::Point;
use crate::view::Const;

fn sto3g_h(center: Point) -> ContractedGaussian {
    ContractedGaussian::new(
        vec![0.1543289673, 0.5353281423, 0.4446345422],
        vec![3.425250914, 0.6239137298, 0.1688554040],
        center,
    )
    .unwrap()
}

#[test]
fn test_primitive_accessors() {
    let mut prim = Primitive::new(0.5, 1.2, Point::new(0.0, 0.0, 1.0));
    assert_relative_eq!(prim.coefficient(), 0.5);
    assert_relative_eq!(prim.exponent(), 1.2);
    assert_relative_eq!(prim.center().z(), 1.0);

    prim.set_coefficient(0.25);
    prim.set_exponent(2.4);
    prim.center_mut().set_x(3.0);
    assert_eq!(prim, Primitive::new(0.25, 2.4, Point::new(3.0, 0.0, 1.0)));

    {
        let view = prim.view_mut();
        view.set_exponent(4.8);
        view.center().set_y(-1.0);
        assert_eq!(view, Primitive::new(0.25, 4.8, Point::new(3.0, -1.0, 1.0)));
    }
    assert_relative_eq!(prim.exponent(), 4.8);
    assert_eq!(prim.view().to_primitive(), prim);
    assert_eq!(calculate_hash(&prim.view()), calculate_hash(&prim));
}

#[test]
fn test_contracted_gaussian_construction() {
    let center = Point::new(0.0, 0.0, 0.5);
    let cg = sto3g_h(center);
    assert_eq!(cg.size(), 3);
    assert_eq!(cg.center(), &center);
    assert_relative_eq!(cg.coefficients()[1], 0.5353281423);
    assert_relative_eq!(cg.exponents()[2], 0.1688554040);
    assert_eq!(
        cg.get(0),
        Primitive::new(0.1543289673, 3.425250914, center)
    );

    assert_eq!(
        ContractedGaussian::new(vec![1.0], vec![], center),
        Err(ChemistError::SizeMismatch {
            expected: 1,
            found: 0
        })
    );

    let mut pushed = ContractedGaussian::default();
    pushed.set_center(center);
    cg.iter()
        .for_each(|prim| pushed.push(prim.coefficient(), prim.exponent()));
    assert_eq!(pushed, cg);
}

#[test]
fn test_contracted_gaussian_primitives_share_center() {
    let mut cg = sto3g_h(Point::default());
    {
        let view = cg.view_mut();
        view.get(2).center().set_z(1.0);
        assert_relative_eq!(view.get(0).center().z(), 1.0);
        assert_relative_eq!(view.center().unwrap().z(), 1.0);
    }
    assert_relative_eq!(cg.center().z(), 1.0);

    cg.at_mut(1).unwrap().set_coefficient(0.0);
    assert_relative_eq!(cg.coefficients()[1], 0.0);
    assert!(cg.at_mut(3).is_err());
}

#[test]
fn test_contracted_gaussian_view_assign() {
    let mut cg = sto3g_h(Point::default());
    let moved = sto3g_h(Point::new(1.0, 1.0, 1.0));
    {
        let view = cg.view_mut();
        assert!(view.assign(&ContractedGaussian::default()).is_err());
        assert_ne!(view, moved);
        view.assign(&moved).unwrap();
        assert_eq!(view, moved);
    }
    assert_eq!(cg, moved);

    let mut empty = ContractedGaussian::default();
    {
        let view = empty.view_mut();
        let target =
            ContractedGaussian::new(vec![], vec![], Point::new(2.0, 0.0, 0.0)).unwrap();
        view.assign(&target).unwrap();
    }
    assert_relative_eq!(empty.center().x(), 2.0);
}

#[test]
fn test_contracted_gaussian_view_center() {
    let cg = sto3g_h(Point::new(0.0, 1.0, 0.0));
    let view = cg.view();
    assert_eq!(view.as_contracted_gaussian().unwrap(), cg);

    let tail = view.subset([1, 2]).unwrap();
    assert_relative_eq!(tail.center().unwrap().y(), 1.0);
    let tail_cg = tail.as_contracted_gaussian().unwrap();
    assert_eq!(tail_cg.size(), 2);
    assert_relative_eq!(tail_cg.exponents()[0], 0.6239137298);

    let empty_subset = view.subset([]).unwrap();
    assert!(empty_subset.center().is_err());

    let null = ContractedGaussianView::<'_, Const>::null();
    assert_eq!(
        null.center().unwrap_err(),
        ChemistError::NullState {
            what: "contracted Gaussian view"
        }
    );
    assert!(null.as_contracted_gaussian().is_err());
}

#[test]
fn test_contracted_gaussian_equality_includes_center() {
    let at_origin = sto3g_h(Point::default());
    let shifted = sto3g_h(Point::new(0.0, 0.0, 1.0));
    assert_ne!(at_origin, shifted);
    assert_ne!(at_origin.view(), shifted.view());
    assert_eq!(at_origin.view(), sto3g_h(Point::default()));
    assert_eq!(sto3g_h(Point::default()), at_origin.view());
    assert_eq!(
        calculate_hash(&at_origin),
        calculate_hash(&sto3g_h(Point::default()))
    );
}

#[test]
fn test_contracted_gaussian_empty_equality_includes_center() {
    let at_origin = ContractedGaussian::default();
    let shifted = ContractedGaussian::new(vec![], vec![], Point::new(0.0, 0.0, 5.0)).unwrap();
    assert_ne!(at_origin, shifted);
    assert_ne!(at_origin.view(), shifted);
    assert_ne!(shifted, at_origin.view());
    assert_ne!(at_origin.view(), shifted.view());
    assert_eq!(at_origin.view(), ContractedGaussian::default());
    assert_eq!(shifted.view(), shifted.clone());

    // Views without a centre of their own compare by their primitives only.
    let empty_subset = shifted.view().subset([]).unwrap();
    assert_eq!(empty_subset, at_origin.view());
    assert_eq!(empty_subset, ContractedGaussianView::<'_, Const>::null());
}

#[test]
fn test_contracted_gaussian_serde() {
    let cg = sto3g_h(Point::new(0.0, 0.0, 0.5));
    let yaml = serde_yaml::to_string(&cg).unwrap();
    assert!(yaml.contains("primitives:"));
    let read: ContractedGaussian = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, cg);

    let bytes = bincode::serialize(&cg).unwrap();
    let read: ContractedGaussian = bincode::deserialize(&bytes).unwrap();
    assert_eq!(read, cg);

    let empty = ContractedGaussian::new(vec![], vec![], Point::new(1.0, 0.0, 0.0)).unwrap();
    let read: ContractedGaussian =
        serde_yaml::from_str(&serde_yaml::to_string(&empty).unwrap()).unwrap();
    assert_eq!(read, empty);
}

#[test]
fn test_contracted_gaussian_inconsistent_document_fails_to_load() {
    let missing_exponent = "\
center: {x: 0.0, y: 0.0, z: 0.0}
primitives:
  - {coefficient: 1.0, exponent: 3.0}
  - {coefficient: 2.0}
";
    assert!(serde_yaml::from_str::<ContractedGaussian>(missing_exponent).is_err());

    let parallel_arrays = "\
coefficients: [1.0, 2.0]
exponents: [3.0]
center: {x: 0.0, y: 0.0, z: 0.0}
";
    assert!(serde_yaml::from_str::<ContractedGaussian>(parallel_arrays).is_err());
}
