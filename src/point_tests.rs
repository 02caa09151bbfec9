use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::{Point, PointSet, PointView};

fn triangle() -> PointSet {
    vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(3.0, 0.0, 0.0),
        Point::new(0.0, 3.0, 3.0),
    ]
    .into()
}

#[test]
fn test_point_accessors() {
    let mut p = Point::new(1.0, 2.0, 3.0);
    assert_relative_eq!(p.x(), 1.0);
    assert_eq!(p.coord(2), Ok(3.0));
    assert_eq!(p.coord(3), Err(ChemistError::OutOfRange { index: 3, size: 3 }));

    p.set_y(-2.0);
    assert_relative_eq!(p.y(), -2.0);
    assert_relative_eq!(p.magnitude(), 14.0f64.sqrt());
    assert_relative_eq!(p.distance(&Point::new(1.0, 2.0, 3.0)), 4.0);
}

#[test]
fn test_point_view_aliases_owner() {
    let mut p = Point::new(1.0, 2.0, 3.0);
    {
        let view = p.view_mut();
        let alias = view.clone();
        view.set_x(5.0);
        assert_relative_eq!(alias.x(), 5.0);
        assert!(!alias.is_const());
        assert_eq!(alias, Point::new(5.0, 2.0, 3.0));
    }
    assert_relative_eq!(p.x(), 5.0);

    let view = p.view();
    assert!(view.is_const());
    assert_eq!(view.to_point(), p);
    assert_eq!(calculate_hash(&view), calculate_hash(&p));
}

#[test]
fn test_point_view_from_fields() {
    let (mut x, mut y, mut z) = (0.0, 1.0, 2.0);
    {
        let view = PointView::from_fields_mut(&mut x, &mut y, &mut z);
        view.assign(&Point::new(7.0, 8.0, 9.0));
        assert_eq!(view, Point::new(7.0, 8.0, 9.0));
    }
    assert_relative_eq!(x, 7.0);
    assert_relative_eq!(z, 9.0);

    let other = (7.0, 8.0, 9.0);
    let lhs = PointView::from_fields(&x, &y, &z);
    let rhs = PointView::from_fields(&other.0, &other.1, &other.2);
    assert_eq!(lhs, rhs);
}

#[test]
fn test_point_set_basic() {
    let points = triangle();
    assert_eq!(points.size(), 3);
    assert_eq!(points.get(1), Point::new(3.0, 0.0, 0.0));
    assert!(points.at(3).is_err());

    let centroid = points.centroid().unwrap();
    assert_relative_eq!(centroid.x(), 1.0);
    assert_relative_eq!(centroid.y(), 1.0);
    assert_relative_eq!(centroid.z(), 1.0);
    assert!(PointSet::new().centroid().is_none());

    let as_vec: Vec<Point> = points.clone().into();
    assert_eq!(PointSet::from(as_vec), points);
}

#[test]
fn test_point_set_view_writes_through() {
    let mut points = triangle();
    {
        let view = points.view_mut();
        view.get(2).set_z(-3.0);
        view.at(1).unwrap().set_x(4.0);
    }
    assert_relative_eq!(points.get(2).z(), -3.0);
    assert_relative_eq!(points.get(1).x(), 4.0);

    points.at_mut(0).unwrap().set_y(1.0);
    assert_relative_eq!(points.get(0).y(), 1.0);
    assert!(points.at_mut(5).is_err());
}

#[test]
fn test_point_set_view_assign() {
    let mut points = triangle();
    let replacement: PointSet = vec![
        Point::new(1.0, 1.0, 1.0),
        Point::new(2.0, 2.0, 2.0),
        Point::new(3.0, 3.0, 3.0),
    ]
    .into();
    {
        let view = points.view_mut();
        assert_eq!(
            view.assign(&PointSet::new()),
            Err(ChemistError::SizeMismatch {
                expected: 3,
                found: 0
            })
        );
        assert_eq!(view, triangle());
        view.assign(&replacement).unwrap();
    }
    assert_eq!(points, replacement);
}

#[test]
fn test_point_set_view_equality() {
    let points = triangle();
    let copy = triangle();
    assert_eq!(points.view(), copy.view());
    assert_eq!(points.view(), copy);
    assert_eq!(copy, points.view());
    assert_eq!(points.view().as_points(), points);
    assert_eq!(calculate_hash(&points), calculate_hash(&points.view()));

    let reversed = points.view().subset([2, 1, 0]).unwrap();
    assert_ne!(reversed, points.view());
    assert_relative_eq!(reversed.centroid().unwrap().z(), 1.0);
}

#[test]
fn test_point_serde_round_trip() {
    let points = triangle();
    let yaml = serde_yaml::to_string(&points).unwrap();
    let read: PointSet = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, points);
}
