// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the element table and of the covalent radii lookup.

use hashbrown::HashMap;
use indexmap::IndexSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::ElementError;

/// Bidirectional mapping between element symbols and dense element indices.
///
/// Indices are assigned in the order in which the symbols are first inserted.
/// Inserting a symbol that is already present never changes its index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementTable {
    symbols: IndexSet<String>,
}

impl ElementTable {
    /// Create a new empty element table.
    pub fn new() -> Self {
        ElementTable::default()
    }

    /// Insert a symbol into the table and return its index.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// #
    /// let mut table = ElementTable::new();
    /// assert_eq!(table.insert("Si"), 0);
    /// assert_eq!(table.insert("O"), 1);
    /// assert_eq!(table.insert("Si"), 0);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn insert(&mut self, symbol: &str) -> usize {
        match self.symbols.get_index_of(symbol) {
            Some(index) => index,
            None => self.symbols.insert_full(symbol.to_owned()).0,
        }
    }

    /// Get the index of an element symbol.
    #[inline]
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.get_index_of(symbol)
    }

    /// Get the symbol of an element with the given index.
    #[inline]
    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get_index(index).map(|s| s.as_str())
    }

    /// Get the number of elements in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over the element symbols in the order of their indices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }

    /// Join the symbols of the elements with the provided indices using `-`.
    ///
    /// ## Panics
    /// Panics if any of the indices is not part of the table.
    pub(crate) fn join(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .map(|&i| {
                self.symbol(i).unwrap_or_else(|| {
                    panic!(
                        "FATAL CORRELATION ERROR | ElementTable::join | Element index `{}` does not exist.",
                        i
                    )
                })
            })
            .collect::<Vec<&str>>()
            .join("-")
    }
}

/// Lookup of covalent radii by element symbol.
///
/// Implementors must report unknown elements as errors instead of returning a default value.
pub trait CovalentRadius {
    /// Get the covalent radius of the element with the given symbol.
    fn covalent_radius(&self, symbol: &str) -> Result<f64, ElementError>;
}

/// Table of covalent radii of the elements.
///
/// The default table is parsed from `src/config/covalent_radii.yaml`
/// which is included in the library at compile time.
#[derive(Debug, Clone)]
pub struct CovalentRadii {
    radii: HashMap<String, f64>,
}

impl Default for CovalentRadii {
    /// Construct the default table of covalent radii (in angstroms).
    ///
    /// ## Notes
    /// - Parsing the table is relatively slow. If you need it multiple times, clone it.
    fn default() -> Self {
        let yaml = include_str!("../config/covalent_radii.yaml");

        CovalentRadii::new_from_string(yaml).expect(
            "FATAL CORRELATION ERROR | CovalentRadii::default | Default `covalent_radii.yaml` file could not be parsed.",
        )
    }
}

impl CovalentRadius for CovalentRadii {
    fn covalent_radius(&self, symbol: &str) -> Result<f64, ElementError> {
        self.radii
            .get(symbol)
            .copied()
            .ok_or_else(|| ElementError::UnknownElement(symbol.to_owned()))
    }
}

impl CovalentRadii {
    /// Create an empty table of covalent radii.
    pub fn empty() -> Self {
        CovalentRadii {
            radii: HashMap::new(),
        }
    }

    /// Construct a new table of covalent radii from the provided YAML file.
    ///
    /// The file should map element symbols to radii:
    /// ```yaml
    /// ---
    /// Si: 1.11
    /// O: 0.66
    /// ...
    /// ```
    pub fn new_from_file(filename: impl AsRef<Path>) -> Result<Self, ElementError> {
        CovalentRadii::new_from_string(&CovalentRadii::load_yaml_to_string(filename)?)
    }

    /// Update the table using radii from the provided YAML file.
    /// Radii of elements listed in the file are replaced or added, other radii are kept.
    ///
    /// ## Returns
    /// `Ok` if the parsing was successful.
    /// `ElementError` otherwise. If an error occurs, the table is not changed.
    ///
    /// ## Example
    /// ```no_run
    /// # use correlation_rs::prelude::*;
    /// #
    /// let mut radii = CovalentRadii::default();
    /// radii.update_from_file("my_radii.yaml").unwrap();
    /// ```
    pub fn update_from_file(&mut self, filename: impl AsRef<Path>) -> Result<(), ElementError> {
        let parsed = CovalentRadii::new_from_file(filename)?;
        self.radii.extend(parsed.radii);
        Ok(())
    }

    /// Set the covalent radius of an element.
    pub fn set_radius(&mut self, symbol: &str, radius: f64) -> Result<(), ElementError> {
        CovalentRadii::check_radius(symbol, radius)?;
        self.radii.insert(symbol.to_owned(), radius);
        Ok(())
    }

    /// Get the number of elements with a known radius.
    #[inline]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Parse yaml string into `CovalentRadii` structure.
    fn new_from_string(yaml: &str) -> Result<Self, ElementError> {
        let parsed: std::collections::HashMap<String, f64> =
            serde_yaml::from_str(yaml).map_err(ElementError::CouldNotParseYaml)?;

        for (symbol, &radius) in parsed.iter() {
            CovalentRadii::check_radius(symbol, radius)?;
        }

        Ok(CovalentRadii {
            radii: parsed.into_iter().collect(),
        })
    }

    fn check_radius(symbol: &str, radius: f64) -> Result<(), ElementError> {
        if !radius.is_finite() || radius <= 0.0 {
            Err(ElementError::InvalidRadius(symbol.to_owned(), radius))
        } else {
            Ok(())
        }
    }

    /// Opens the specified file and loads its contents into a string.
    fn load_yaml_to_string(filename: impl AsRef<Path>) -> Result<String, ElementError> {
        let mut yaml_file = match File::open(&filename) {
            Ok(x) => x,
            Err(_) => return Err(ElementError::FileNotFound(Box::from(filename.as_ref()))),
        };

        let mut yaml_string = String::new();
        match yaml_file.read_to_string(&mut yaml_string) {
            Ok(_) => Ok(yaml_string),
            Err(_) => Err(ElementError::FileCouldNotBeRead(Box::from(
                filename.as_ref(),
            ))),
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn table_first_appearance_order() {
        let mut table = ElementTable::new();
        for symbol in ["O", "Si", "O", "Ge", "Si"] {
            table.insert(symbol);
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of("O"), Some(0));
        assert_eq!(table.index_of("Si"), Some(1));
        assert_eq!(table.index_of("Ge"), Some(2));
        assert_eq!(table.index_of("C"), None);

        assert_eq!(table.symbol(2), Some("Ge"));
        assert_eq!(table.symbol(3), None);
        assert_eq!(table.iter().collect::<Vec<&str>>(), vec!["O", "Si", "Ge"]);
    }

    #[test]
    fn table_join() {
        let mut table = ElementTable::new();
        table.insert("Si");
        table.insert("O");

        assert_eq!(table.join(&[0, 1]), "Si-O");
        assert_eq!(table.join(&[1, 0, 1]), "O-Si-O");
    }

    #[test]
    #[should_panic(expected = "FATAL CORRELATION ERROR | ElementTable::join")]
    fn table_join_panics() {
        let table = ElementTable::new();
        table.join(&[0]);
    }

    #[test]
    fn default_radii() {
        let radii = CovalentRadii::default();

        assert_approx_eq!(f64, radii.covalent_radius("Si").unwrap(), 1.11);
        assert_approx_eq!(f64, radii.covalent_radius("O").unwrap(), 0.66);
        assert_approx_eq!(f64, radii.covalent_radius("Ge").unwrap(), 1.20);
        assert_approx_eq!(f64, radii.covalent_radius("Y").unwrap(), 1.90);
        assert_eq!(radii.len(), 96);
    }

    #[test]
    fn unknown_element() {
        let radii = CovalentRadii::default();

        match radii.covalent_radius("Xx") {
            Err(ElementError::UnknownElement(s)) => assert_eq!(s, "Xx"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn set_radius() {
        let mut radii = CovalentRadii::empty();
        assert!(radii.is_empty());

        radii.set_radius("Si", 1.2).unwrap();
        assert_approx_eq!(f64, radii.covalent_radius("Si").unwrap(), 1.2);

        match radii.set_radius("O", -0.5) {
            Err(ElementError::InvalidRadius(s, r)) => {
                assert_eq!(s, "O");
                assert_eq!(r, -0.5);
            }
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(radii.covalent_radius("O").is_err());
    }

    #[test]
    fn update_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "---\nSi: 1.25\nXx: 0.5\n...").unwrap();

        let mut radii = CovalentRadii::default();
        radii.update_from_file(file.path()).unwrap();

        assert_approx_eq!(f64, radii.covalent_radius("Si").unwrap(), 1.25);
        assert_approx_eq!(f64, radii.covalent_radius("Xx").unwrap(), 0.5);
        assert_approx_eq!(f64, radii.covalent_radius("O").unwrap(), 0.66);
    }

    #[test]
    fn update_from_file_invalid_keeps_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "---\nSi: 1.25\nO: -1.0\n...").unwrap();

        let mut radii = CovalentRadii::default();
        match radii.update_from_file(file.path()) {
            Err(ElementError::InvalidRadius(s, _)) => assert_eq!(s, "O"),
            other => panic!("Unexpected result: {:?}", other),
        }

        assert_approx_eq!(f64, radii.covalent_radius("Si").unwrap(), 1.11);
    }

    #[test]
    fn new_from_file_nonexistent() {
        match CovalentRadii::new_from_file("this_file_does_not_exist.yaml") {
            Err(ElementError::FileNotFound(_)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn new_from_file_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "---\nSi: [1.0, 2.0]\n...").unwrap();

        match CovalentRadii::new_from_file(file.path()) {
            Err(ElementError::CouldNotParseYaml(_)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
