// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Named, bounded model parameters.


use serde::{Deserialize, Serialize};

/// A single numeric attribute of a spectrum or spatial model.
///
/// Nothing here checks that `min <= value <= max`; the fitter owns physical
/// validity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    pub value: f64,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// 0 (fixed) or 1 (free).
    #[serde(default)]
    pub free: u8,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Parameter {
    /// A fixed parameter without bounds or scale.
    pub fn new<S: Into<String>>(name: S, value: f64) -> Parameter {
        Parameter {
            name: name.into(),
            value,
            min: None,
            max: None,
            free: 0,
            scale: None,
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Parameter {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_free(mut self, free: bool) -> Parameter {
        self.free = u8::from(free);
        self
    }

    pub fn is_free(&self) -> bool {
        self.free != 0
    }
}

/// Anything that owns an ordered list of [`Parameter`]s, looked up by name.
pub trait ParameterSet {
    fn parameters(&self) -> &[Parameter];

    fn parameters_mut(&mut self) -> &mut Vec<Parameter>;

    /// The first parameter called `name`.
    fn get_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters().iter().find(|p| p.name == name)
    }

    fn get_parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters_mut().iter_mut().find(|p| p.name == name)
    }

    /// The free flag of the parameter called `name`, or 0 if there's no such
    /// parameter.
    fn free_of(&self, name: &str) -> u8 {
        self.get_parameter(name).map(|p| p.free).unwrap_or(0)
    }
}

/// Format a number for the text formats. The shortest representation that
/// parses back to the same `f64` is used; very small and very large magnitudes
/// use exponent notation (e.g. "1.193e-6").
pub(crate) fn format_number(x: f64) -> String {
    let abs = x.abs();
    if x == 0.0 || !x.is_finite() || (1e-4..1e15).contains(&abs) {
        format!("{x}")
    } else {
        format!("{x:e}")
    }
}
