//! Reading and writing chemviews files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, format_err};
use serde::{de::DeserializeOwned, Serialize};

pub(crate) mod format;

/// An enumerated type for chemviews file types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChemviewsFileType {
    /// Variant for binary files containing nuclei.
    Nuc,

    /// Variant for binary files containing molecules.
    Mol,

    /// Variant for binary files containing AO basis sets.
    Bas,

    /// Variant for binary files containing fragmented nuclei.
    Frg,
}

impl ChemviewsFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            ChemviewsFileType::Nuc => "chemviews.nuc".to_string(),
            ChemviewsFileType::Mol => "chemviews.mol".to_string(),
            ChemviewsFileType::Bas => "chemviews.bas".to_string(),
            ChemviewsFileType::Frg => "chemviews.frg".to_string(),
        }
    }
}

/// Reads a chemviews binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without chemviews-specific extensions).
/// * `file_type` - The type of the chemviews file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_chemviews_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: ChemviewsFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    log::debug!("Reading binary file {}.", path.display());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes it into a chemviews binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without chemviews-specific extensions).
/// * `file_type` - The type of the chemviews file to be written.
/// * `value` - The structure to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_chemviews_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: ChemviewsFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    log::debug!("Writing binary file {}.", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a chemviews YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_chemviews_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes it into a chemviews YAML file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension.
/// * `value` - The structure to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_chemviews_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension("yml");
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))
}
