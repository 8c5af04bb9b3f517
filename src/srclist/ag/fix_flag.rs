// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The free-flag bitmask of AG source lists.

use crate::{
    constants::SPATIAL_FREE_EXTENDED,
    srclist::{ParameterSet, Source, WriteSourceListError},
};

/// Pack a source's free flags into the integer the fitter expects.
///
/// The flags are written as binary digits, most significant first, in one of
/// two fixed orders, depending on whether the spatial model's `free` is 2:
///
/// ```text
/// free == 2: 1 Curvature Index2 CutoffEnergy PivotEnergy Index Index1 0 Flux
/// otherwise:   Curvature Index2 CutoffEnergy PivotEnergy Index Index1 free Flux
/// ```
///
/// Parameters the spectrum doesn't have contribute a 0. If the flux is fixed,
/// the result is 0 regardless of the other flags.
pub fn fix_flag(source: &Source) -> Result<u32, WriteSourceListError> {
    let spectrum = &source.spectrum;
    let flux = spectrum.free_of("Flux");
    if flux == 0 {
        return Ok(0);
    }

    let spatial = source.spatial_model.free;
    let digits = if spatial == SPATIAL_FREE_EXTENDED {
        vec![
            1,
            spectrum.free_of("Curvature"),
            spectrum.free_of("Index2"),
            spectrum.free_of("CutoffEnergy"),
            spectrum.free_of("PivotEnergy"),
            spectrum.free_of("Index"),
            spectrum.free_of("Index1"),
            0,
            flux,
        ]
    } else {
        vec![
            spectrum.free_of("Curvature"),
            spectrum.free_of("Index2"),
            spectrum.free_of("CutoffEnergy"),
            spectrum.free_of("PivotEnergy"),
            spectrum.free_of("Index"),
            spectrum.free_of("Index1"),
            spatial,
            flux,
        ]
    };

    let bits: String = digits.iter().map(|d| d.to_string()).collect();
    u32::from_str_radix(&bits, 2).map_err(|_| WriteSourceListError::InvalidFreeFlags {
        source_name: source.name.clone(),
        flags: bits,
    })
}
