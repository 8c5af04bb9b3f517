// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types for catalogued sources and source catalogs.

mod catalog;
mod models;
mod parameter;
mod source;

pub use catalog::*;
pub use models::*;
pub use parameter::*;
pub use source::*;

/// Sources shared by tests across the crate.
#[cfg(test)]
pub(crate) mod test_sources {
    use super::*;

    fn spatial(glon: f64, glat: f64) -> SpatialModel {
        SpatialModel::new(
            SpatialType::PointSource,
            0,
            "0".to_string(),
            vec![Parameter::new("GLON", glon), Parameter::new("GLAT", glat)],
        )
        .unwrap()
    }

    fn flux() -> Parameter {
        let mut p = Parameter::new("Flux", 1.193e-6)
            .with_bounds(0.0, 1e-3)
            .with_free(true);
        p.scale = Some(1e-8);
        p
    }

    fn make(name: &str, spectrum: Spectrum, glon: f64, glat: f64) -> Source {
        Source {
            name: name.to_string(),
            source_type: Some("PointSource".to_string()),
            spectrum,
            spatial_model: spatial(glon, glat),
            multi: None,
        }
    }

    pub(crate) fn power_law(name: &str, glon: f64, glat: f64) -> Source {
        let spectrum = Spectrum::new(
            SpectrumType::PowerLaw,
            vec![flux(), Parameter::new("Index", 2.1).with_bounds(0.5, 5.0)],
        )
        .unwrap();
        make(name, spectrum, glon, glat)
    }

    pub(crate) fn exp_cutoff(name: &str, glon: f64, glat: f64) -> Source {
        let spectrum = Spectrum::new(
            SpectrumType::PLExpCutoff,
            vec![
                flux(),
                Parameter::new("Index", 1.75).with_bounds(0.5, 5.0),
                Parameter::new("CutoffEnergy", 3307.63).with_bounds(20.0, 10000.0),
            ],
        )
        .unwrap();
        make(name, spectrum, glon, glat)
    }

    pub(crate) fn super_exp_cutoff(name: &str, glon: f64, glat: f64) -> Source {
        let spectrum = Spectrum::new(
            SpectrumType::PLSuperExpCutoff,
            vec![
                flux(),
                Parameter::new("Index1", 1.7).with_bounds(0.5, 5.0),
                Parameter::new("CutoffEnergy", 2500.0).with_bounds(20.0, 10000.0),
                Parameter::new("Index2", 1.3).with_bounds(0.0, 100.0),
            ],
        )
        .unwrap();
        make(name, spectrum, glon, glat)
    }

    /// The vela fit result from the test files, relabelled.
    pub(crate) fn fit_result(label: &str) -> crate::srclist::multi::FitResult {
        let mut f = std::io::Cursor::new(include_str!("../../../test_files/vela.source"));
        let mut fit = crate::srclist::multi::parse_fit_result(&mut f).unwrap();
        fit.label = label.to_string();
        fit
    }

    pub(crate) fn log_parabola(name: &str, glon: f64, glat: f64) -> Source {
        let spectrum = Spectrum::new(
            SpectrumType::LogParabola,
            vec![
                flux(),
                Parameter::new("Index", 2.2).with_bounds(1.0, 4.0),
                Parameter::new("PivotEnergy", 500.0).with_bounds(100.0, 1000.0),
                Parameter::new("Curvature", 0.1).with_bounds(0.0, 3.0),
            ],
        )
        .unwrap();
        make(name, spectrum, glon, glat)
    }
}
