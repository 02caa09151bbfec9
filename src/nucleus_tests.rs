use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::nucleus::{Nuclei, Nucleus};
use crate::point::Point;
use crate::view::column::Slot;

use super::NucleusRef;

fn h() -> Nucleus {
    Nucleus::new("H", 1, 1.008, Point::new(0.0, 0.0, 0.0))
}

fn he() -> Nucleus {
    Nucleus::new("He", 2, 4.003, Point::new(0.0, 0.0, 1.0))
}

fn h_he() -> Nuclei {
    vec![h(), he()].into()
}

#[test]
fn test_nucleus_accessors() {
    let mut nucleus = he();
    assert_eq!(nucleus.name(), "He");
    assert_eq!(nucleus.atomic_number(), 2);
    assert_relative_eq!(nucleus.mass(), 4.003);
    assert_relative_eq!(nucleus.charge(), 2.0);
    assert_relative_eq!(nucleus.point().z(), 1.0);

    let ghost = Nucleus::with_charge("He", 2, 4.003, Point::new(0.0, 0.0, 1.0), 0.0);
    assert_relative_eq!(ghost.charge(), 0.0);
    assert_ne!(ghost, nucleus);

    nucleus.set_name("X");
    nucleus.set_atomic_number(0);
    nucleus.set_mass(0.0);
    nucleus.point_charge_mut().set_charge(-1.0);
    assert_eq!(
        nucleus,
        Nucleus::with_charge("X", 0, 0.0, Point::new(0.0, 0.0, 1.0), -1.0)
    );
}

#[test]
fn test_nucleus_view_aliases_owner() {
    let mut nucleus = h();
    {
        let view = nucleus.view_mut();
        let alias = view.clone();
        view.set_name("D");
        view.set_mass(2.014);
        view.set_charge(0.5);
        view.point().set_x(-1.0);
        assert_eq!(alias.name(), "D");
        assert_relative_eq!(alias.mass(), 2.014);
        assert_relative_eq!(alias.point_charge().charge(), 0.5);
        assert_relative_eq!(alias.x(), -1.0);
    }
    assert_eq!(nucleus.name(), "D");
    assert_relative_eq!(nucleus.point().x(), -1.0);

    let view = nucleus.view();
    assert_eq!(view, nucleus);
    assert_eq!(nucleus, view);
    assert_eq!(view.to_nucleus(), nucleus);
    assert_eq!(calculate_hash(&view), calculate_hash(&nucleus));
}

#[test]
fn test_nucleus_alias_equality_compares_atomic_number() {
    let nucleus = h();
    let view = nucleus.view();
    let alias = *view.pimpl();
    assert!(alias == *view.clone().pimpl());

    // Same name, mass and point charge storage, but a different atomic number.
    let helium_number = 2;
    let relabelled = NucleusRef {
        atomic_number: Slot::borrowed(&helium_number),
        ..alias
    };
    assert!(alias != relabelled);
    assert!(relabelled != alias);
    assert_eq!(relabelled.to_nucleus().atomic_number(), 2);
}

#[test]
fn test_nuclei_h_he() {
    let mut nuclei = h_he();
    assert_eq!(nuclei.size(), 2);
    assert_eq!(nuclei.get(0), h());
    assert_eq!(nuclei.get(1), he());
    assert_eq!(nuclei.find(&he()), Some(1));
    assert_eq!(nuclei.find(&Nucleus::default()), None);
    assert_relative_eq!(nuclei.charges().total_charge(), 3.0);

    let view = nuclei.view();
    assert_eq!(view.total_atomic_number(), 3);
    assert_relative_eq!(view.total_charge(), 3.0);
    assert_relative_eq!(view.point_set().get(1).z(), 1.0);
    assert_eq!(view.charges(), *nuclei.charges());
    assert_eq!(view.as_nuclei(), nuclei);

    let com = view.center_of_mass().unwrap();
    assert_relative_eq!(com.z(), 4.003 / 5.011, epsilon = 1e-12);
    assert!(Nuclei::new().view().center_of_mass().is_none());

    nuclei.at_mut(1).unwrap().set_atomic_number(3);
    assert_eq!(nuclei.get(1).atomic_number(), 3);
}

#[test]
fn test_nuclei_view_assign() {
    let mut nuclei = h_he();
    let swapped: Nuclei = vec![he(), h()].into();
    {
        let view = nuclei.view_mut();
        assert_eq!(
            view.assign(&Nuclei::from(vec![h()])),
            Err(ChemistError::SizeMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(view, h_he());
        view.assign(&swapped).unwrap();
        assert_eq!(view, swapped);
    }
    assert_eq!(nuclei, swapped);
}

#[test]
fn test_nuclei_subset_views() {
    let mut nuclei = h_he();
    {
        let view = nuclei.view_mut();
        let helium = view.subset([1]).unwrap();
        assert_eq!(helium.size(), 1);
        assert_eq!(helium.total_atomic_number(), 2);

        let positions = helium.point_set();
        positions.get(0).set_y(2.0);
        helium.charges().get(0).set_charge(1.5);
    }
    assert_relative_eq!(nuclei.get(1).y(), 2.0);
    assert_relative_eq!(nuclei.get(1).charge(), 1.5);
    assert_relative_eq!(nuclei.get(0).y(), 0.0);
}

#[test]
fn test_nuclei_serde_round_trip() {
    let nuclei = h_he();
    let yaml = serde_yaml::to_string(&nuclei).unwrap();
    let read: Nuclei = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, nuclei);
    assert_eq!(calculate_hash(&read), calculate_hash(&nuclei));

    let bytes = bincode::serialize(&nuclei).unwrap();
    let read: Nuclei = bincode::deserialize(&bytes).unwrap();
    assert_eq!(read, nuclei);
}
