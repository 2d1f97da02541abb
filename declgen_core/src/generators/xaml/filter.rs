//! Loading and querying the XAML applicability allow-list.
//!
//! The allow-list maps XAML-enabled assemblies to their CLR namespaces and
//! markup namespace URIs, plus a deny-list of base classes whose subclasses
//! never get usage examples. Entries come from the inline configuration and
//! from filter files discovered on disk at initialization time.

use crate::config::{XamlAssemblyConfig, XamlConfig};
use crate::error::{DeclgenError, Result};
use crate::model::TypeInfo;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// The on-disk shape of one filter file. Same table layout as the inline
/// `[generator.xaml]` section, restricted to allow-list content.
#[derive(Debug, serde::Deserialize)]
struct FilterDocument {
    #[serde(default)]
    assembly: Vec<XamlAssemblyConfig>,
    #[serde(default)]
    excluded_classes: Vec<String>,
}

/// The merged, query-ready allow-list.
#[derive(Debug, Clone, Default)]
pub struct XamlFilter {
    /// assembly name -> namespace name -> markup URIs
    assemblies: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    excluded_classes: Vec<String>,
}

impl XamlFilter {
    /// Builds the filter from inline configuration plus any filter files
    /// found under the configured directory. A filter file that exists but
    /// cannot be read or parsed is a fatal initialization error.
    pub fn from_config(config: &XamlConfig) -> Result<XamlFilter> {
        let mut filter = XamlFilter::default();
        filter.merge_entries(&config.assembly, &config.excluded_classes);

        if let Some(directory) = &config.filter_directory {
            filter.load_directory(directory, &config.filter_pattern)?;
        }

        info!(
            assemblies = filter.assemblies.len(),
            excluded_classes = filter.excluded_classes.len(),
            "XAML allow-list ready"
        );
        Ok(filter)
    }

    fn load_directory(&mut self, directory: &Path, pattern: &str) -> Result<()> {
        debug!("Scanning {:?} for XAML filter files", directory);
        let name_pattern = Regex::new(pattern)?;

        for entry in WalkDir::new(directory).into_iter() {
            let entry = entry.map_err(|e| {
                DeclgenError::filter_file(directory, e.to_string())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !name_pattern.is_match(&file_name) {
                continue;
            }
            self.load_file(entry.path())?;
        }
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        debug!("Loading XAML filter file {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(|e| DeclgenError::filter_file(path, e.to_string()))?;
        let document: FilterDocument = toml::from_str(&contents)
            .map_err(|e| DeclgenError::filter_file(path, e.to_string()))?;

        if document.assembly.is_empty() && document.excluded_classes.is_empty() {
            warn!("XAML filter file {:?} contributes no entries", path);
        }
        self.merge_entries(&document.assembly, &document.excluded_classes);
        Ok(())
    }

    fn merge_entries(&mut self, assemblies: &[XamlAssemblyConfig], excluded: &[String]) {
        for assembly in assemblies {
            let namespaces = self.assemblies.entry(assembly.name.clone()).or_default();
            for namespace in &assembly.namespace {
                namespaces
                    .entry(namespace.name.clone())
                    .or_default()
                    .extend(namespace.uris.iter().cloned());
            }
        }
        for class in excluded {
            if !self.excluded_classes.contains(class) {
                self.excluded_classes.push(class.clone());
            }
        }
    }

    /// Whether the assembly is XAML-enabled at all. Members of assemblies
    /// outside the allow-list short-circuit every other applicability check.
    pub fn assembly_allowed(&self, assembly: &str) -> bool {
        self.assemblies.contains_key(assembly)
    }

    /// The markup namespace URIs mapped to a CLR namespace, if any.
    pub fn markup_uris(&self, assembly: &str, namespace: &str) -> &[String] {
        self.assemblies
            .get(assembly)
            .and_then(|namespaces| namespaces.get(namespace))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the type is, or derives from, a deny-listed base class.
    pub fn is_excluded(&self, info: &TypeInfo) -> bool {
        self.excluded_classes
            .iter()
            .any(|class| info.is_or_derives_from(class))
    }
}
