use approx::assert_relative_eq;

use crate::auxiliary::atom::ElementMap;
use crate::basis_set::ShellType;
use crate::container::IndexableContainer;
use crate::interfaces::input::basis::{InputAtomicBasis, InputShell};
use crate::interfaces::input::fragments::{InputCap, InputFragments};
use crate::interfaces::input::molecule::{InputMolecule, InputNucleus};
use crate::interfaces::InputHandle;
use crate::io::read_chemviews_yaml;

use super::ChemistInput;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_interfaces_input_water() {
    let name = format!("{ROOT}/tests/input/test_input_water.yml");
    let inp = read_chemviews_yaml::<ChemistInput, _>(&name).unwrap();
    let emap = ElementMap::new();

    let mol = inp.to_molecule(&emap).unwrap();
    assert_eq!(mol.n_nuclei(), 3);
    assert_eq!(mol.n_electrons(), 10);
    assert_eq!(mol.nuclei().get(0).name(), "O");
    assert_eq!(mol.nuclei().get(0).atomic_number(), 8);
    assert_relative_eq!(mol.nuclei().get(1).mass(), 1.008, epsilon = 1e-3);
    assert_relative_eq!(mol.nuclei().get(2).mass(), 2.014);
    assert_relative_eq!(mol.nuclei().get(2).y(), -0.7572);

    let basis = inp.to_ao_basis_set(&mol).unwrap().unwrap();
    assert_eq!(basis.size(), 3);
    assert_eq!(basis.n_shells(), 5);
    assert_eq!(basis.n_aos(), 1 + 1 + 3 + 1 + 1);
    assert_eq!(basis.n_primitives(), 15);
    assert_eq!(basis.get(0).atomic_number(), Ok(8));
    assert_eq!(basis.get(0).basis_set_name(), Ok("STO-3G".to_string()));
    assert_eq!(basis.get(0).get(2).pure(), ShellType::Cartesian);
    assert_relative_eq!(basis.get(1).center().unwrap().y(), 0.7572);

    let fragmented = inp.to_fragmented_nuclei(&mol, &emap).unwrap().unwrap();
    assert_eq!(fragmented.size(), 2);
    assert_eq!(fragmented.supersystem(), mol.nuclei());
    let first = fragmented.at(0).unwrap();
    assert_eq!(first.size(), 3);
    assert_relative_eq!(first.get(2).z(), -0.2);
    let second = fragmented.at(1).unwrap();
    assert_eq!(second.size(), 2);
    assert_relative_eq!(second.total_charge(), 1.0);

    assert!(inp.handle().is_ok());
}

#[test]
fn test_interfaces_input_minimal() {
    let name = format!("{ROOT}/tests/input/test_input_minimal.yml");
    let inp = read_chemviews_yaml::<ChemistInput, _>(&name).unwrap();
    assert_eq!(inp.molecule.charge, 0);
    assert_eq!(inp.molecule.multiplicity, 1);
    assert!(inp.basis.is_none());
    assert!(inp.fragmentation.is_none());

    let emap = ElementMap::new();
    let mol = inp.to_molecule(&emap).unwrap();
    assert_eq!(mol.n_electrons(), 2);
    assert!(inp.to_ao_basis_set(&mol).unwrap().is_none());
    assert!(inp.to_fragmented_nuclei(&mol, &emap).unwrap().is_none());
    assert!(inp.handle().is_ok());
}

#[test]
fn test_interfaces_input_repeated_basis() {
    let name = format!("{ROOT}/tests/input/test_input_repeated_basis.yml");
    let inp = read_chemviews_yaml::<ChemistInput, _>(&name).unwrap();
    let mol = inp.to_molecule(&ElementMap::new()).unwrap();
    assert_eq!(mol.n_electrons(), 1);
    assert!(inp.to_ao_basis_set(&mol).is_err());
    assert!(inp.handle().is_err());
}

#[test]
fn test_interfaces_input_bad_fragment() {
    let name = format!("{ROOT}/tests/input/test_input_bad_fragment.yml");
    let inp = read_chemviews_yaml::<ChemistInput, _>(&name).unwrap();
    let emap = ElementMap::new();
    let mol = inp.to_molecule(&emap).unwrap();
    assert!(inp.to_fragmented_nuclei(&mol, &emap).is_err());
}

#[test]
fn test_interfaces_input_builders() {
    let emap = ElementMap::new();
    let nucleus = InputNucleus::builder()
        .symbol("Li")
        .position([0.0, 0.0, 1.0])
        .build()
        .unwrap();
    let li = nucleus.to_nucleus(&emap).unwrap();
    assert_eq!(li.atomic_number(), 3);
    assert_relative_eq!(li.charge(), 3.0);

    let bogus = InputNucleus::builder()
        .symbol("Qq")
        .position([0.0, 0.0, 0.0])
        .build()
        .unwrap();
    assert!(bogus.to_nucleus(&emap).is_err());

    let mol = InputMolecule::builder()
        .nuclei(vec![nucleus.clone()])
        .build()
        .unwrap();
    assert!(mol.to_molecule(&emap).is_err());
    let mol = InputMolecule::builder()
        .nuclei(vec![nucleus.clone()])
        .multiplicity(2)
        .build()
        .unwrap()
        .to_molecule(&emap)
        .unwrap();

    let shell = InputShell::builder()
        .pure(ShellType::Cartesian)
        .l(2)
        .coefficients(vec![1.0])
        .exponents(vec![0.5, 0.1])
        .build()
        .unwrap();
    assert_eq!(shell.n_funcs(), 6);
    let atomic_basis = InputAtomicBasis::builder()
        .nucleus(0)
        .shells(vec![shell])
        .build()
        .unwrap();
    assert_eq!(atomic_basis.n_funcs(), 6);
    assert!(atomic_basis.to_atomic_basis_set(mol.nuclei()).is_err());

    let out_of_range = InputAtomicBasis::builder()
        .nucleus(1)
        .shells(vec![])
        .build()
        .unwrap();
    assert!(out_of_range.to_atomic_basis_set(mol.nuclei()).is_err());

    let cap = InputCap::builder()
        .anchor(0)
        .replaced(1)
        .nuclei(vec![nucleus])
        .build()
        .unwrap()
        .to_cap(&emap)
        .unwrap();
    assert_eq!(cap.size(), 1);
    assert_eq!(cap.anchor_index(), Ok(0));

    let fragments = InputFragments::builder()
        .fragments(vec![vec![0]])
        .build()
        .unwrap()
        .to_fragmented_nuclei(mol.nuclei().clone(), &emap)
        .unwrap();
    assert_eq!(fragments.size(), 1);
    assert!(fragments.cap_set().is_empty());
}
