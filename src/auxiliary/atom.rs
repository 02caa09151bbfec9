//! Periodic-table look-up for building nuclei from element symbols.

use std::collections::HashMap;

use anyhow::format_err;
use periodic_table;

use crate::io::format::chemviews_warn;
use crate::nucleus::Nucleus;
use crate::point::Point;

/// A struct storing a look-up of element symbols to give atomic numbers
/// and atomic masses.
pub struct ElementMap<'a> {
    /// A [HashMap] from a symbol string to a tuple of atomic number and atomic
    /// mass.
    pub map: HashMap<&'a str, (u32, f64)>,
}

impl Default for ElementMap<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap<'static> {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    ///
    /// Elements whose tabulated mass cannot be parsed are skipped with a warning.
    #[must_use]
    pub fn new() -> ElementMap<'static> {
        let mut map = HashMap::new();
        for element in periodic_table::periodic_table() {
            match parse_atomic_mass(element.atomic_mass) {
                Ok(mass) => {
                    map.insert(element.symbol, (element.atomic_number, mass));
                }
                Err(err) => {
                    chemviews_warn!("Skipping element {}: {err}", element.symbol);
                }
            }
        }
        ElementMap { map }
    }
}

impl<'a> ElementMap<'a> {
    /// Looks up the atomic number and mass of an element.
    ///
    /// # Errors
    ///
    /// Errors if the symbol is not known.
    pub fn get(&self, symbol: &str) -> Result<(u32, f64), anyhow::Error> {
        self.map
            .get(symbol)
            .copied()
            .ok_or_else(|| format_err!("Invalid atomic symbol `{symbol}` encountered."))
    }

    /// Builds a nucleus of the given element at a position, with the charge equal to the atomic
    /// number.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol, which is also used as the nucleus name.
    /// * `position` - The position of the nucleus.
    ///
    /// # Returns
    ///
    /// The nucleus, or an error if the symbol is not known.
    pub fn nucleus(&self, symbol: &str, position: Point) -> Result<Nucleus, anyhow::Error> {
        let (atomic_number, mass) = self.get(symbol)?;
        Ok(Nucleus::new(symbol, atomic_number, mass, position))
    }
}

/// An auxiliary function that parses the atomic mass string in the format of
/// [`periodic_table`] to a single float value.
///
/// # Arguments
///
/// * `mass_str` - A string of mass value that is either `x.y(z)` where the
///     uncertain digit `z` is enclosed in parentheses, or `[x]` where `x`
///     is the mass number in place of precise experimental values.
///
/// # Returns
///
/// The numeric mass value.
fn parse_atomic_mass(mass_str: &str) -> Result<f64, anyhow::Error> {
    let mass = mass_str.replace(&['(', ')', '[', ']'][..], "");
    mass.parse::<f64>()
        .map_err(|err| format_err!("Unable to parse atomic mass string {mass}: {err}"))
}

#[cfg(test)]
#[path = "atom_tests.rs"]
mod atom_tests;
