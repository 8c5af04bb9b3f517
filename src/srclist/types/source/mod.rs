// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structures to describe catalogued sources.


use serde::{Deserialize, Serialize};

use super::{ParameterSet, SpatialModel, Spectrum};
use crate::srclist::multi::FitResult;

/// One catalogued emitter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Assumed, but not enforced, to be unique within a catalog.
    pub name: String,

    #[serde(rename = "type")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    pub spectrum: Spectrum,

    pub spatial_model: SpatialModel,

    /// The output of the multi-source fitter for this source, if it's been
    /// merged in.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi: Option<FitResult>,
}

impl Source {
    /// Set the free flag associated with `param`. Returns `false` if this
    /// source's spectrum has no such parameter (nothing is changed).
    ///
    /// The caller must have checked `free` against [`FreeParam::max_value`].
    pub(crate) fn set_free(&mut self, param: FreeParam, free: u8) -> bool {
        match param {
            FreeParam::Pos => {
                self.spatial_model.free = free;
                true
            }
            _ => match self.spectrum.get_parameter_mut(param.into()) {
                Some(p) => {
                    p.free = free;
                    true
                }
                None => false,
            },
        }
    }

    /// The free flag associated with `param`; 0 if the parameter doesn't
    /// exist.
    pub fn get_free(&self, param: FreeParam) -> u8 {
        match param {
            FreeParam::Pos => self.spatial_model.free,
            _ => self.spectrum.free_of(param.into()),
        }
    }
}

/// Everything that can be freed or fixed for the fitter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
pub enum FreeParam {
    Flux,
    Index,
    Index1,
    Index2,
    CutoffEnergy,
    PivotEnergy,
    Curvature,

    /// The position (the spatial model's `free`).
    Pos,
}

impl FreeParam {
    /// The largest allowed free value.
    pub fn max_value(self) -> u8 {
        match self {
            FreeParam::Pos => crate::constants::SPATIAL_FREE_EXTENDED,
            _ => 1,
        }
    }
}
