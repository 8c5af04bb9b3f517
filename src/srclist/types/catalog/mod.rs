// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Source catalogs, and the operations that select, mutate and delete their
//! sources.

#[cfg(test)]
mod tests;

use std::str::FromStr;

use indexmap::IndexMap;
use marlu::RADec;
use serde::{Deserialize, Serialize};

use super::{FreeParam, Source, SpatialModel, SpatialType, SpectrumType};
use crate::{
    constants::POSITION_NOT_FITTED,
    srclist::{multi::FitResult, FreeSourcesError, UpdateMultiError, ValidSelection},
};

/// An ordered list of sources, and the metadata attached to the catalog as a
/// whole.
///
/// Source names are assumed, but not enforced, to be unique. Operations keyed
/// on a name act on every source with that name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCatalog {
    /// Catalog-level metadata, in the order it was read.
    pub attributes: IndexMap<String, String>,

    pub sources: Vec<Source>,
}

/// A summary of what's in a [`SourceCatalog`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub num_sources: usize,
    pub num_power_laws: usize,
    pub num_exp_cutoffs: usize,
    pub num_super_exp_cutoffs: usize,
    pub num_log_parabolas: usize,
    pub num_point_sources: usize,
    pub num_extended_sources: usize,
    /// How many sources carry a fit result.
    pub num_with_multi: usize,
}

impl SourceCatalog {
    pub fn new() -> SourceCatalog {
        SourceCatalog::default()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The names of all sources, in catalog order.
    pub fn get_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn get_counts(&self) -> CatalogCounts {
        let mut counts = CatalogCounts {
            num_sources: self.sources.len(),
            ..Default::default()
        };
        for source in &self.sources {
            match source.spectrum.spectrum_type {
                SpectrumType::PowerLaw => counts.num_power_laws += 1,
                SpectrumType::PLExpCutoff => counts.num_exp_cutoffs += 1,
                SpectrumType::PLSuperExpCutoff => counts.num_super_exp_cutoffs += 1,
                SpectrumType::LogParabola => counts.num_log_parabolas += 1,
            }
            match source.spatial_model.spatial_type {
                SpatialType::PointSource => counts.num_point_sources += 1,
                SpatialType::ExtendedSource => counts.num_extended_sources += 1,
            }
            if source.multi.is_some() {
                counts.num_with_multi += 1;
            }
        }
        counts
    }

    /// The sources picked by `selection`, in catalog order.
    pub fn select(&self, selection: &ValidSelection) -> Vec<&Source> {
        self.sources
            .iter()
            .filter(|s| selection.matches(s))
            .collect()
    }

    fn select_indices(&self, selection: &ValidSelection) -> Vec<usize> {
        self.sources
            .iter()
            .enumerate()
            .filter(|(_, s)| selection.matches(s))
            .map(|(i, _)| i)
            .collect()
    }

    /// Set the free flag of `parameter` to `free` on every selected source,
    /// and return the selected sources. The parameter and value are checked
    /// before any source is touched. Selected sources that don't have the
    /// parameter are returned unchanged.
    pub fn free_sources(
        &mut self,
        selection: &ValidSelection,
        parameter: &str,
        free: u8,
    ) -> Result<Vec<&Source>, FreeSourcesError> {
        let param = FreeParam::from_str(parameter)
            .map_err(|_| FreeSourcesError::UnknownParameter(parameter.to_string()))?;
        if free > param.max_value() {
            return Err(FreeSourcesError::InvalidFreeValue {
                parameter: parameter.to_string(),
                free,
                max: param.max_value(),
            });
        }

        let indices = self.select_indices(selection);
        for &i in &indices {
            self.sources[i].set_free(param, free);
        }
        Ok(indices.into_iter().map(|i| &self.sources[i]).collect())
    }

    /// Remove the selected sources from the catalog and return them. The
    /// remaining sources keep their order.
    pub fn delete_sources(&mut self, selection: &ValidSelection) -> Vec<Source> {
        let indices = self.select_indices(selection);
        if indices.is_empty() {
            return vec![];
        }

        let mut to_delete = indices.into_iter().peekable();
        let mut deleted = vec![];
        let mut kept = Vec::with_capacity(self.sources.len());
        for (i, source) in std::mem::take(&mut self.sources).into_iter().enumerate() {
            if to_delete.next_if_eq(&i).is_some() {
                deleted.push(source);
            } else {
                kept.push(source);
            }
        }
        self.sources = kept;
        deleted
    }

    /// Attach a fit result to every source named by its label, and set its
    /// `dist` to the angular distance between the source and the map centre.
    /// All angles are in degrees.
    pub fn update_multi(
        &mut self,
        fit: FitResult,
        map_centre_l: f64,
        map_centre_b: f64,
    ) -> Result<Vec<&Source>, UpdateMultiError> {
        let indices: Vec<usize> = self
            .sources
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == fit.label)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            return Err(UpdateMultiError::SourceNotFound(fit.label));
        }

        let centre = RADec::from_degrees(map_centre_l, map_centre_b);
        for &i in &indices {
            let source = &mut self.sources[i];
            let mut multi = fit.clone();
            let (l, b) = resolve_position(&multi, &source.spatial_model);
            multi.dist = Some(RADec::from_degrees(l, b).separation(centre).to_degrees());
            source.multi = Some(multi);
        }
        Ok(indices.into_iter().map(|i| &self.sources[i]).collect())
    }
}

/// Where a fitted source is. Coordinates that weren't fitted fall back to
/// where the fit started, then to the spatial model.
fn resolve_position(fit: &FitResult, spatial_model: &SpatialModel) -> (f64, f64) {
    fn pick(fitted: f64, start: f64, model: Option<f64>) -> f64 {
        if fitted != POSITION_NOT_FITTED {
            fitted
        } else if start != POSITION_NOT_FITTED {
            start
        } else {
            model.unwrap_or(start)
        }
    }

    (
        pick(fit.l, fit.start_l, spatial_model.glon()),
        pick(fit.b, fit.start_b, spatial_model.glat()),
    )
}
