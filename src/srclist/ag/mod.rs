// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! "AG" text source lists, read by the multi-source fitter.
//!
//! One line per source, with space-separated fields:
//!
//! ```text
//! flux glon glat index fix_flag 2 name location_limit family p1 p2 index_min index_max b1 b2 b3 b4
//! ```
//!
//! `index` is `Index1` for `PLSuperExpCutoff` spectra and `Index` otherwise.
//! `family` and the parameters following it depend on the spectrum type:
//!
//! | spectrum           | family | p1           | p2        | b1 b2                | b3 b4          |
//! |--------------------|--------|--------------|-----------|----------------------|----------------|
//! | `PowerLaw`         | 0      | 0            | 0         | -1 -1                | -1 -1          |
//! | `PLExpCutoff`      | 1      | CutoffEnergy | 0         | CutoffEnergy min max | -1 -1          |
//! | `PLSuperExpCutoff` | 2      | CutoffEnergy | Index2    | CutoffEnergy min max | Index2 min max |
//! | `LogParabola`      | 3      | PivotEnergy  | Curvature | PivotEnergy min max  | Curvature min max |
//!
//! `fix_flag` packs the free flags into an integer; see [`fix_flag`].

mod fix_flag;
mod write;

pub use fix_flag::fix_flag;
pub use write::{encode_source, write_source_list};
