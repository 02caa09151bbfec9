use approx::assert_relative_eq;

use crate::auxiliary::misc::calculate_hash;
use crate::basis_set::{ContractedGaussian, Primitive, Shell, ShellType};
use crate::container::IndexableContainer;
use crate::error::ChemistError;
use crate::point::Point;

fn p_shell(pure: ShellType) -> Shell {
    let cg = ContractedGaussian::new(
        vec![0.1559162750, 0.6076837186, 0.3919573931],
        vec![5.0331513, 1.1695961, 0.3803890],
        Point::new(0.0, 0.0, 0.2),
    )
    .unwrap();
    Shell::new(pure, 1, cg)
}

#[test]
fn test_shell_type_n_aos() {
    let pure_sizes = (0..5).map(|l| ShellType::Pure.n_aos(l)).collect::<Vec<_>>();
    assert_eq!(pure_sizes, vec![1, 3, 5, 7, 9]);
    let cart_sizes = (0..5)
        .map(|l| ShellType::Cartesian.n_aos(l))
        .collect::<Vec<_>>();
    assert_eq!(cart_sizes, vec![1, 3, 6, 10, 15]);
    assert_eq!(ShellType::default(), ShellType::Pure);
    assert_eq!(ShellType::Cartesian.to_string(), "cart");
}

#[test]
fn test_shell_accessors() {
    let shell = p_shell(ShellType::Cartesian);
    assert_eq!(shell.pure(), ShellType::Cartesian);
    assert_eq!(shell.l(), 1);
    assert_eq!(shell.n_aos(), 3);
    assert_eq!(shell.n_primitives(), 3);
    assert_relative_eq!(shell.center().z(), 0.2);
    assert_eq!(shell.contracted_gaussian().size(), 3);

    let d_shell = Shell::new(ShellType::Cartesian, 2, shell.contracted_gaussian().clone());
    assert_eq!(d_shell.n_aos(), 6);
}

#[test]
fn test_shell_view_reads_owner() {
    let shell = p_shell(ShellType::Pure);
    let view = shell.view();
    assert!(view.is_const());
    assert_eq!(view.l(), 1);
    assert_eq!(view.n_aos(), 3);
    assert_eq!(view.n_primitives(), 3);
    assert_eq!(view.contracted_gaussian(), *shell.contracted_gaussian());
    assert_eq!(
        view.primitive(2).unwrap(),
        Primitive::new(0.3919573931, 0.3803890, Point::new(0.0, 0.0, 0.2))
    );
    assert_eq!(
        view.primitive(3).unwrap_err(),
        ChemistError::OutOfRange { index: 3, size: 3 }
    );
    assert_eq!(view.to_shell(), shell);
    assert_eq!(view, shell);
    assert_eq!(shell, view);
    assert_eq!(calculate_hash(&view), calculate_hash(&shell));
}

#[test]
fn test_shell_view_writes_through() {
    let mut shell = p_shell(ShellType::Pure);
    {
        let view = shell.view_mut();
        let alias = view.clone();
        view.set_l(2);
        view.set_pure(ShellType::Cartesian);
        view.center().set_x(1.0);
        view.primitive(0).unwrap().set_exponent(10.0);
        assert_eq!(alias.n_aos(), 6);
        assert_relative_eq!(alias.contracted_gaussian().get(0).exponent(), 10.0);
    }
    assert_eq!(shell.l(), 2);
    assert_eq!(shell.pure(), ShellType::Cartesian);
    assert_relative_eq!(shell.center().x(), 1.0);
    assert_relative_eq!(shell.contracted_gaussian().exponents()[0], 10.0);
}

#[test]
fn test_shell_view_assign() {
    let mut shell = p_shell(ShellType::Pure);
    let s_shell = Shell::new(
        ShellType::Pure,
        0,
        ContractedGaussian::new(vec![1.0], vec![0.5], Point::default()).unwrap(),
    );
    {
        let view = shell.view_mut();
        assert_eq!(
            view.assign(&s_shell),
            Err(ChemistError::SizeMismatch {
                expected: 3,
                found: 1
            })
        );
        assert_eq!(view.l(), 1);

        let target = p_shell(ShellType::Cartesian);
        view.assign(&target).unwrap();
        assert_eq!(view, target);
    }
    assert_eq!(shell, p_shell(ShellType::Cartesian));
}

#[test]
fn test_shell_equality() {
    let pure = p_shell(ShellType::Pure);
    let cart = p_shell(ShellType::Cartesian);
    assert_ne!(pure, cart);
    assert_ne!(pure.view(), cart.view());
    assert_eq!(pure.view(), p_shell(ShellType::Pure).view());

    let mut moved = p_shell(ShellType::Pure);
    moved.view_mut().center().set_y(3.0);
    assert_ne!(pure.view(), moved.view());
    assert!(pure.to_string().starts_with("l = 1 (pure)"));
}

#[test]
fn test_shell_empty_equality_includes_center() {
    let centred = |z: f64| {
        Shell::new(
            ShellType::Pure,
            0,
            ContractedGaussian::new(vec![], vec![], Point::new(0.0, 0.0, z)).unwrap(),
        )
    };
    let at_origin = centred(0.0);
    let shifted = centred(5.0);
    assert_ne!(at_origin, shifted);
    assert_ne!(at_origin.view(), shifted);
    assert_ne!(shifted, at_origin.view());
    assert_ne!(at_origin.view(), shifted.view());
    assert_eq!(at_origin.view(), centred(0.0));
    assert_ne!(
        at_origin.view().contracted_gaussian(),
        shifted.view().contracted_gaussian()
    );
}

#[test]
fn test_shell_serde_round_trip() {
    let shell = p_shell(ShellType::Cartesian);
    let yaml = serde_yaml::to_string(&shell).unwrap();
    let read: Shell = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(read, shell);
}
