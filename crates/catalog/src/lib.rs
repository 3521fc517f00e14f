//! Static reference datasets for Path Finder.
//!
//! Three JSON documents, each a mapping from program name to an
//! implementation-defined structured value:
//!
//! - `modules.json` — the module catalog per program
//! - `career_profiles.json` — career profiles per program
//! - `examination_regulations.json` — regulation excerpts per program
//!
//! Loaded once at process start and read-only afterwards, so unsynchronized
//! concurrent reads across sessions are safe. A program key missing from a
//! catalog is a normal, non-error condition; a missing or unparseable
//! *file* is fatal at startup.

use pathfinder_core::error::CatalogError;
use pathfinder_core::profile::Program;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// File names of the three datasets inside the data directory.
pub const MODULES_FILE: &str = "modules.json";
pub const CAREER_PROFILES_FILE: &str = "career_profiles.json";
pub const REGULATIONS_FILE: &str = "examination_regulations.json";

/// The three reference catalogs, keyed by official program name.
#[derive(Debug, Clone)]
pub struct ReferenceCatalogs {
    modules: HashMap<String, Value>,
    career_profiles: HashMap<String, Value>,
    regulations: HashMap<String, Value>,
}

impl ReferenceCatalogs {
    /// Load all three datasets from `dir`.
    ///
    /// Any failure names the offending file so startup aborts with a
    /// useful message.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let modules = load_catalog(&dir.join(MODULES_FILE))?;
        let career_profiles = load_catalog(&dir.join(CAREER_PROFILES_FILE))?;
        let regulations = load_catalog(&dir.join(REGULATIONS_FILE))?;

        tracing::debug!(
            modules = modules.len(),
            career_profiles = career_profiles.len(),
            regulations = regulations.len(),
            "Reference catalogs loaded"
        );

        Ok(Self {
            modules,
            career_profiles,
            regulations,
        })
    }

    /// Module catalog entry for a program.
    pub fn modules_for(&self, program: Program) -> Option<&Value> {
        self.modules.get(program.name())
    }

    /// Career profile entry for a program.
    pub fn careers_for(&self, program: Program) -> Option<&Value> {
        self.career_profiles.get(program.name())
    }

    /// Examination regulation excerpt for a program.
    pub fn regulation_for(&self, program: Program) -> Option<&Value> {
        self.regulations.get(program.name())
    }

    /// Entry counts per catalog (modules, career profiles, regulations).
    pub fn entry_counts(&self) -> (usize, usize, usize) {
        (
            self.modules.len(),
            self.career_profiles.len(),
            self.regulations.len(),
        )
    }

    /// Build catalogs directly from in-memory mappings. Test seam.
    pub fn from_parts(
        modules: HashMap<String, Value>,
        career_profiles: HashMap<String, Value>,
        regulations: HashMap<String, Value>,
    ) -> Self {
        Self {
            modules,
            career_profiles,
            regulations,
        }
    }
}

fn load_catalog(path: &Path) -> Result<HashMap<String, Value>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::Missing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| CatalogError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
