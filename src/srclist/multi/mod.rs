// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Results of the external multi-source fitter ("multi" results).
//!
//! The fitter writes one ".source" file per source. Ignoring comment lines
//! (starting with '!'), it has exactly 17 lines. Every token of every line,
//! in order, maps onto a field of [`FitResult`]; the order of the fields in
//! the struct is therefore the same as the order in the file.

mod read;

pub use read::{parse_fit_result, parse_fit_result_file};

use serde::{Deserialize, Serialize};

use crate::srclist::SelectionParam;

/// Everything the fitter reports about a single source.
///
/// Angles are in degrees, energies in MeV, fluxes in ph cm^-2 s^-1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    // Line 0: how the fit was set up.
    /// The name of the source this result is for.
    pub label: String,
    pub fix: f64,
    pub si_start: f64,
    pub ul_conf_level: f64,
    pub src_loc_conf_level: f64,
    pub start_l: f64,
    pub start_b: f64,
    pub start_flux: f64,
    pub lmin: f64,
    pub lmax: f64,
    pub bmin: f64,
    pub bmax: f64,

    // Line 1.
    pub typefun: f64,
    pub par2_start: f64,
    pub par3_start: f64,
    pub galmode2: f64,
    pub galmode2fit: f64,
    pub isomode2: f64,
    pub isomode2fit: f64,
    pub edpcor: f64,
    pub fluxcor: f64,
    pub integratortype: f64,
    pub expratio_eval: f64,
    pub expratio_minthr: f64,
    pub expratio_maxthr: f64,
    pub expratio_size: f64,

    // Line 2.
    pub sqrt_ts: f64,
    pub l_peak: f64,
    pub b_peak: f64,
    pub dist_peak: f64,

    // Line 3: the fitted position and its confidence ellipse. `l` and `b` are
    // -1 if the position was not fitted.
    pub l: f64,
    pub b: f64,
    pub r: f64,
    pub ell_a: f64,
    pub ell_b: f64,
    pub ell_phi: f64,

    // Line 4.
    pub counts: f64,
    pub counts_err: f64,
    pub counts_ul: f64,
    pub flux: f64,
    pub flux_err: f64,
    pub flux_ul: f64,

    // Line 5.
    pub exp: f64,
    pub exp_ratio: f64,
    pub flux_per_channel: Vec<f64>,

    // Line 6.
    pub index: f64,
    pub index_err: f64,
    pub par2: f64,
    pub par2_err: f64,
    pub par3: f64,
    pub par3_err: f64,

    // Line 7.
    pub erg_log: f64,
    pub erg_log_err: f64,
    pub erg_log_ul: f64,

    // Lines 8 to 11: diffuse-emission coefficients.
    pub gal_coeffs: Vec<f64>,
    pub gal_coeffs_err: Vec<f64>,
    pub gal_zero_coeffs: Vec<f64>,
    pub gal_zero_coeffs_err: Vec<f64>,
    pub iso_coeffs: Vec<f64>,
    pub iso_coeffs_err: Vec<f64>,
    pub iso_zero_coeffs: Vec<f64>,
    pub iso_zero_coeffs_err: Vec<f64>,

    // Line 12.
    pub start_data_tt: f64,
    pub end_data_tt: f64,
    pub start_data_utc: String,
    pub end_data_utc: String,
    pub start_data_mjd: f64,
    pub end_data_mjd: f64,

    // Line 13: energy and field-of-view bins.
    pub emins: Vec<f64>,
    pub emaxs: Vec<f64>,
    pub fov_mins: Vec<f64>,
    pub fov_maxs: Vec<f64>,
    pub albedo: f64,
    pub binsize: f64,
    pub expstep: f64,
    pub phasecode: f64,
    pub skytype: f64,

    // Lines 14 and 15: minimiser status of the two fitting steps.
    pub fit_status0: f64,
    pub fcn0: f64,
    pub edm0: f64,
    pub nvpar0: f64,
    pub nparx0: f64,
    pub iter0: f64,
    pub fit_status1: f64,
    pub fcn1: f64,
    pub edm1: f64,
    pub nvpar1: f64,
    pub nparx1: f64,
    pub iter1: f64,

    // Line 16.
    pub fit_src_cts: f64,
    pub fit_gal_cts: f64,
    pub fit_iso_cts: f64,

    /// Not in the file; the angular distance between the source and a map
    /// centre, set when this result is merged into a catalog \[degrees\]
    #[serde(default)]
    pub dist: Option<f64>,
}

impl FitResult {
    /// Get the numeric value that a selection parameter refers to. `Name`
    /// isn't numeric, and `Dist` is `None` until it has been computed.
    pub fn value_of(&self, param: SelectionParam) -> Option<f64> {
        let v = match param {
            SelectionParam::Name => return None,
            SelectionParam::Dist => return self.dist,
            SelectionParam::Flux => self.flux,
            SelectionParam::FluxErr => self.flux_err,
            SelectionParam::FluxUL => self.flux_ul,
            SelectionParam::SqrtTS => self.sqrt_ts,
            SelectionParam::L => self.l,
            SelectionParam::B => self.b,
            SelectionParam::Counts => self.counts,
            SelectionParam::CountsErr => self.counts_err,
            SelectionParam::CountsUL => self.counts_ul,
            SelectionParam::Exp => self.exp,
            SelectionParam::Index => self.index,
            SelectionParam::IndexErr => self.index_err,
            SelectionParam::Par2 => self.par2,
            SelectionParam::Par2Err => self.par2_err,
            SelectionParam::Par3 => self.par3,
            SelectionParam::Par3Err => self.par3_err,
            SelectionParam::ErgLog => self.erg_log,
            SelectionParam::ErgLogErr => self.erg_log_err,
        };
        Some(v)
    }
}
