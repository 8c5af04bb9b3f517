// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Most of these are fixed by the external multi-source fitter; changing them
changes what the fitter reads.
 */

/// The number of non-comment lines in a fitter-output ".source" file.
pub const FIT_RESULT_NUM_LINES: usize = 17;

/// Lines of a fitter-output file starting with this are comments.
pub const FIT_RESULT_COMMENT: char = '!';

/// The fitter reports this value for a longitude or latitude that it did not
/// fit.
pub const POSITION_NOT_FITTED: f64 = -1.0;

/// A spatial model with this `free` value has its position free *and* the
/// free-flag bitmask uses the 9-digit layout.
pub const SPATIAL_FREE_EXTENDED: u8 = 2;

/// Written into every AG-format line after the bitmask.
pub const AG_FORMAT_CONSTANT: &str = "2";

/// Written in place of a bound that doesn't apply to a spectrum type.
pub const AG_FORMAT_NO_BOUND: &str = "-1";

/// The log target used by a [`crate::SourcesLibrary`] if none is given.
pub const DEFAULT_LOG_TARGET: &str = "agile_sources";
