// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A session around a single source catalog.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{
    multi::{parse_fit_result_file, FitResult},
    write_source_list, xml, FreeSourcesError, ReadFitResultError, ReadSourceListError, Selection,
    Source, SourceCatalog, SourceListType, UpdateMultiError, ValidSelection,
    WriteSourceListError, SELECTION_PARAMS_COMMA_SEPARATED,
};
use crate::constants::DEFAULT_LOG_TARGET;

/// Owns a [`SourceCatalog`] and remembers where it came from. All messages
/// are logged with the target given to [`SourcesLibrary::new`], so that a
/// caller can tell sessions apart.
#[derive(Debug)]
pub struct SourcesLibrary {
    log_target: String,

    /// The directory containing the XML catalog that was loaded. Output files
    /// are written here.
    dir: Option<PathBuf>,

    catalog: SourceCatalog,
}

impl Default for SourcesLibrary {
    fn default() -> Self {
        SourcesLibrary::new(DEFAULT_LOG_TARGET)
    }
}

impl SourcesLibrary {
    /// A library with an empty catalog.
    pub fn new<S: Into<String>>(log_target: S) -> SourcesLibrary {
        SourcesLibrary {
            log_target: log_target.into(),
            dir: None,
            catalog: SourceCatalog::new(),
        }
    }

    /// A library around an existing catalog. Output files are written to
    /// `dir`, or the current directory if it isn't given.
    pub fn from_catalog<S: Into<String>>(
        log_target: S,
        catalog: SourceCatalog,
        dir: Option<PathBuf>,
    ) -> SourcesLibrary {
        SourcesLibrary {
            log_target: log_target.into(),
            dir,
            catalog,
        }
    }

    /// Replace the catalog with the contents of an XML file. On failure, the
    /// current catalog is kept.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ReadSourceListError> {
        let path = path.as_ref();
        info!(target: self.log_target.as_str(), "Parsing {} ...", path.display());
        let catalog = xml::parse_source_list_file(path)?;
        info!(
            target: self.log_target.as_str(),
            "Read {} sources from {}",
            catalog.len(),
            path.display()
        );
        self.catalog = catalog;
        self.dir = path.parent().map(Path::to_path_buf);
        Ok(())
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn get_sources(&self) -> &[Source] {
        &self.catalog.sources
    }

    pub fn get_source_names(&self) -> Vec<&str> {
        self.catalog.get_names()
    }

    /// Validate a selection, logging any attributes that had to be dropped.
    fn validate(&self, selection: &Selection) -> ValidSelection {
        debug!(target: self.log_target.as_str(), "Selecting with: {selection}");
        let valid = selection.validate();
        for name in valid.dropped() {
            warn!(
                target: self.log_target.as_str(),
                "The selection parameter '{name}' is not supported and won't be used! Supported parameters: {}",
                *SELECTION_PARAMS_COMMA_SEPARATED
            );
        }
        if valid.is_empty() {
            warn!(target: self.log_target.as_str(), "No selection parameters are used");
        }
        valid
    }

    /// The sources picked by `selection`, in catalog order.
    pub fn select_sources(&self, selection: &Selection) -> Vec<&Source> {
        let valid = self.validate(selection);
        self.catalog.select(&valid)
    }

    /// Set the free flag of `parameter` on the sources picked by `selection`.
    /// The sources that were picked are returned.
    pub fn free_sources(
        &mut self,
        selection: &Selection,
        parameter: &str,
        free: u8,
    ) -> Result<Vec<&Source>, FreeSourcesError> {
        let valid = self.validate(selection);
        let log_target = self.log_target.as_str();
        let sources = self.catalog.free_sources(&valid, parameter, free)?;
        debug!(
            target: log_target,
            "Set '{parameter}' free={free} on {} sources",
            sources.len()
        );
        Ok(sources)
    }

    /// Remove the sources picked by `selection` and return them.
    pub fn delete_sources(&mut self, selection: &Selection) -> Vec<Source> {
        let valid = self.validate(selection);
        let deleted = self.catalog.delete_sources(&valid);
        info!(
            target: self.log_target.as_str(),
            "Deleted {} sources; {} remain",
            deleted.len(),
            self.catalog.len()
        );
        deleted
    }

    /// Read a fitter-output ".source" file.
    pub fn parse_source_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<FitResult, ReadFitResultError> {
        let path = path.as_ref();
        debug!(target: self.log_target.as_str(), "Parsing fit result {}", path.display());
        parse_fit_result_file(path)
    }

    /// Attach a fit result to the sources it belongs to; see
    /// [`SourceCatalog::update_multi`].
    pub fn update_multi(
        &mut self,
        fit: FitResult,
        map_centre_l: f64,
        map_centre_b: f64,
    ) -> Result<Vec<&Source>, UpdateMultiError> {
        let label = fit.label.clone();
        let log_target = self.log_target.as_str();
        let updated = self
            .catalog
            .update_multi(fit, map_centre_l, map_centre_b)?;
        info!(
            target: log_target,
            "Source '{label}' has been updated with the multi-source fit output"
        );
        Ok(updated)
    }

    /// Write the catalog next to the loaded XML file, as `<prefix>.txt` (AG)
    /// or `<prefix>.xml`. The path of the new file is returned.
    pub fn write_to_file(
        &self,
        prefix: &str,
        output_type: SourceListType,
    ) -> Result<PathBuf, WriteSourceListError> {
        let dir = self.dir.clone().unwrap_or_default();
        let path = dir.join(format!("{prefix}.{}", output_type.extension()));
        write_source_list(&self.catalog, &path, Some(output_type))?;
        info!(
            target: self.log_target.as_str(),
            "Source catalog in the {output_type} format written to {}",
            path.display()
        );
        Ok(path)
    }
}
