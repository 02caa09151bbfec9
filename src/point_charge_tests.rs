use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::Point;
use crate::point_charge::{Charges, PointCharge};

fn dipole() -> Charges {
    vec![
        PointCharge::new(1.0, Point::new(0.0, 0.0, 1.0)),
        PointCharge::new(-1.0, Point::new(0.0, 0.0, -1.0)),
    ]
    .into()
}

#[test]
fn test_point_charge_accessors() {
    let mut q = PointCharge::new(-0.5, Point::new(1.0, 2.0, 3.0));
    assert_relative_eq!(q.charge(), -0.5);
    assert_relative_eq!(q.point().z(), 3.0);

    q.set_charge(0.25);
    q.point_mut().set_x(-1.0);
    assert_eq!(q, PointCharge::new(0.25, Point::new(-1.0, 2.0, 3.0)));
}

#[test]
fn test_point_charge_view_aliases_owner() {
    let mut q = PointCharge::new(1.0, Point::new(0.0, 0.0, 0.0));
    {
        let view = q.view_mut();
        let point = view.point();
        view.set_charge(2.0);
        point.set_y(4.0);
        assert_relative_eq!(view.y(), 4.0);
        assert_eq!(view, PointCharge::new(2.0, Point::new(0.0, 4.0, 0.0)));
    }
    assert_relative_eq!(q.charge(), 2.0);
    assert_relative_eq!(q.point().y(), 4.0);

    let view = q.view();
    assert_eq!(view.to_point_charge(), q);
    assert_eq!(calculate_hash(&view), calculate_hash(&q));
}

#[test]
fn test_charges_totals_and_points() {
    let charges = dipole();
    assert_eq!(charges.size(), 2);
    assert_relative_eq!(charges.total_charge(), 0.0);
    assert_relative_eq!(charges.point_set().get(1).z(), -1.0);

    let view = charges.view();
    assert_relative_eq!(view.total_charge(), 0.0);
    assert_eq!(view.point_set(), *charges.point_set());
    assert_eq!(view.as_charges(), charges);
}

#[test]
fn test_charges_subset_projects_points() {
    let charges = dipole();
    let negative = charges.view().subset([1]).unwrap();
    assert_relative_eq!(negative.total_charge(), -1.0);

    let points = negative.point_set();
    assert_eq!(points.size(), 1);
    assert_eq!(points.get(0), Point::new(0.0, 0.0, -1.0));
}

#[test]
fn test_charges_view_writes_through() {
    let mut charges = dipole();
    {
        let view = charges.view_mut();
        view.get(0).set_charge(0.5);
        view.point_set().get(1).set_x(2.0);
        assert_eq!(
            view.assign(&Charges::new()),
            Err(ChemistError::SizeMismatch {
                expected: 2,
                found: 0
            })
        );
    }
    assert_relative_eq!(charges.get(0).charge(), 0.5);
    assert_relative_eq!(charges.get(1).x(), 2.0);

    charges.at_mut(1).unwrap().assign(&PointCharge::default());
    assert_eq!(charges.get(1), PointCharge::default());

    {
        let view = charges.view_mut();
        view.assign(&dipole()).unwrap();
    }
    assert_eq!(charges, dipole());
}

#[test]
fn test_charges_serde_round_trip() {
    let charges = dipole();
    let yaml = serde_yaml::to_string(&charges).unwrap();
    let read: Charges = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, charges);
    assert_eq!(calculate_hash(&read), calculate_hash(&charges));
}
