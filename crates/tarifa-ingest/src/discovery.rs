//! Locating the catalog and structure sheets inside a data directory.

use std::path::{Path, PathBuf};

use tarifa_model::StructureEntry;
use tracing::{info, warn};

use crate::catalog::{CatalogLoad, load_catalog};
use crate::error::{IngestError, Result};
use crate::structure::{default_structure, load_structure};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV_VAR: &str = "TARIFA_DATA_DIR";

const CATALOG_STEM: &str = "catalog";
const STRUCTURE_STEM: &str = "structure";

/// Sheets found in a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub catalog: PathBuf,
    /// `None` means the built-in default structure applies.
    pub structure: Option<PathBuf>,
}

/// Everything read from a data directory.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub files: DataFiles,
    pub catalog: CatalogLoad,
    pub structure: Vec<StructureEntry>,
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_stem(path: &Path, stem: &str) -> bool {
    path.file_stem()
        .and_then(|value| value.to_str())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(stem))
}

/// Picks the catalog sheet (`catalog.csv`, else the first other CSV by name)
/// and the optional `structure.csv`.
pub fn discover_data_files(dir: &Path) -> Result<DataFiles> {
    let files = list_csv_files(dir)?;
    let structure = files
        .iter()
        .find(|path| has_stem(path, STRUCTURE_STEM))
        .cloned();
    let catalog = files
        .iter()
        .find(|path| has_stem(path, CATALOG_STEM))
        .or_else(|| files.iter().find(|path| !has_stem(path, STRUCTURE_STEM)))
        .cloned()
        .ok_or_else(|| IngestError::CatalogNotFound {
            path: dir.to_path_buf(),
        })?;
    Ok(DataFiles { catalog, structure })
}

/// Loads both sheets from `dir`. Structure rows with a blank
/// `MaxAdditional` get `default_max` additional lines.
pub fn load_data_dir(dir: &Path, default_max: usize) -> Result<LoadedData> {
    let files = discover_data_files(dir)?;
    let catalog = load_catalog(&files.catalog)?;
    let structure = match &files.structure {
        Some(path) => load_structure(path, default_max)?,
        None => {
            warn!(dir = %dir.display(), "no structure sheet, using default structure");
            default_structure()
        }
    };
    info!(
        catalog = %files.catalog.display(),
        rows = catalog.rows.len(),
        structure_entries = structure.len(),
        "data directory loaded"
    );
    Ok(LoadedData {
        files,
        catalog,
        structure,
    })
}
