// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spectrum and spatial models of a source.
//!
//! Each model type has a fixed set of parameters that must be present; see
//! [`SpectrumType::required_parameters`] and
//! [`SpatialType::required_parameters`]. Models can only be constructed if
//! their parameters satisfy this table.


use serde::{Deserialize, Serialize};

use super::{Parameter, ParameterSet};
use crate::{constants::SPATIAL_FREE_EXTENDED, srclist::SchemaError};

/// All of the supported spectral models.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum SpectrumType {
    PowerLaw,
    PLExpCutoff,
    PLSuperExpCutoff,
    LogParabola,
}

impl SpectrumType {
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            SpectrumType::PowerLaw => &["Flux", "Index"],
            SpectrumType::PLExpCutoff => &["Flux", "Index", "CutoffEnergy"],
            SpectrumType::PLSuperExpCutoff => &["Flux", "Index1", "CutoffEnergy", "Index2"],
            SpectrumType::LogParabola => &["Flux", "Index", "PivotEnergy", "Curvature"],
        }
    }

    /// The name of the parameter holding the (first) spectral index.
    pub fn index_parameter(self) -> &'static str {
        match self {
            SpectrumType::PLSuperExpCutoff => "Index1",
            _ => "Index",
        }
    }

    /// The model-family discriminator understood by the fitter, and the
    /// family-specific parameters that accompany it.
    pub(crate) fn family(self) -> (u8, [Option<&'static str>; 2]) {
        match self {
            SpectrumType::PowerLaw => (0, [None, None]),
            SpectrumType::PLExpCutoff => (1, [Some("CutoffEnergy"), None]),
            SpectrumType::PLSuperExpCutoff => (2, [Some("CutoffEnergy"), Some("Index2")]),
            SpectrumType::LogParabola => (3, [Some("PivotEnergy"), Some("Curvature")]),
        }
    }
}

/// All of the supported spatial models.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum SpatialType {
    PointSource,
    ExtendedSource,
}

impl SpatialType {
    pub fn required_parameters(self) -> &'static [&'static str] {
        &["GLON", "GLAT"]
    }
}

/// How a source's emission depends on energy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    #[serde(rename = "type")]
    pub spectrum_type: SpectrumType,

    pub parameters: Vec<Parameter>,
}

impl Spectrum {
    pub fn new(
        spectrum_type: SpectrumType,
        parameters: Vec<Parameter>,
    ) -> Result<Spectrum, SchemaError> {
        check_parameters(
            "spectrum",
            &spectrum_type.to_string(),
            spectrum_type.required_parameters(),
            &parameters,
        )?;
        for p in &parameters {
            if p.free > 1 {
                return Err(SchemaError::InvalidFreeFlag {
                    name: p.name.clone(),
                    free: p.free,
                    max: 1,
                });
            }
        }
        Ok(Spectrum {
            spectrum_type,
            parameters,
        })
    }
}

impl ParameterSet for Spectrum {
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

/// Where a source is and what shape it has.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialModel {
    #[serde(rename = "type")]
    pub spatial_type: SpatialType,

    /// 0 (position fixed), 1 (position free) or 2 (position free, and the
    /// bitmask uses the extended layout).
    pub free: u8,

    pub location_limit: String,

    pub parameters: Vec<Parameter>,
}

impl SpatialModel {
    pub fn new(
        spatial_type: SpatialType,
        free: u8,
        location_limit: String,
        parameters: Vec<Parameter>,
    ) -> Result<SpatialModel, SchemaError> {
        if free > SPATIAL_FREE_EXTENDED {
            return Err(SchemaError::InvalidFreeFlag {
                name: "spatialModel".to_string(),
                free,
                max: SPATIAL_FREE_EXTENDED,
            });
        }
        check_parameters(
            "spatialModel",
            &spatial_type.to_string(),
            spatial_type.required_parameters(),
            &parameters,
        )?;
        Ok(SpatialModel {
            spatial_type,
            free,
            location_limit,
            parameters,
        })
    }

    /// Galactic longitude \[degrees\]
    pub fn glon(&self) -> Option<f64> {
        self.get_parameter("GLON").map(|p| p.value)
    }

    /// Galactic latitude \[degrees\]
    pub fn glat(&self) -> Option<f64> {
        self.get_parameter("GLAT").map(|p| p.value)
    }
}

impl ParameterSet for SpatialModel {
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }
}

fn check_parameters(
    model: &'static str,
    model_type: &str,
    required: &[&'static str],
    parameters: &[Parameter],
) -> Result<(), SchemaError> {
    for &name in required {
        if !parameters.iter().any(|p| p.name == name) {
            return Err(SchemaError::MissingParameter {
                model,
                model_type: model_type.to_string(),
                parameter: name,
            });
        }
    }
    Ok(())
}
