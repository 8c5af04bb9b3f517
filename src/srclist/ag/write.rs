// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing AG source lists.

use log::debug;

use super::fix_flag;
use crate::{
    constants::{AG_FORMAT_CONSTANT, AG_FORMAT_NO_BOUND},
    srclist::{format_number, Parameter, ParameterSet, Source, SourceCatalog, WriteSourceListError},
};

/// Write every source of a catalog as an AG line. Nothing is written if any
/// source can't be encoded.
pub fn write_source_list<T: std::io::Write>(
    buf: &mut T,
    catalog: &SourceCatalog,
) -> Result<(), WriteSourceListError> {
    let lines = catalog
        .sources
        .iter()
        .map(encode_source)
        .collect::<Result<Vec<_>, _>>()?;
    for line in lines {
        writeln!(buf, "{line}")?;
    }
    debug!("Encoded {} sources in the AG format", catalog.sources.len());
    Ok(())
}

/// Encode a single source as an AG line (without a trailing newline).
pub fn encode_source(source: &Source) -> Result<String, WriteSourceListError> {
    let spectrum_type = source.spectrum.spectrum_type;
    let spectral = |name| parameter(source, "spectrum", &source.spectrum, name);
    let spatial = |name| parameter(source, "spatialModel", &source.spatial_model, name);

    let flux = spectral("Flux")?;
    let glon = spatial("GLON")?;
    let glat = spatial("GLAT")?;
    let index_name = spectrum_type.index_parameter();
    let index = spectral(index_name)?;
    let (family, family_params) = spectrum_type.family();

    let mut fields = vec![
        format_number(flux.value),
        format_number(glon.value),
        format_number(glat.value),
        format_number(index.value),
        fix_flag(source)?.to_string(),
        AG_FORMAT_CONSTANT.to_string(),
        source.name.clone(),
        source.spatial_model.location_limit.clone(),
        family.to_string(),
    ];

    let mut bounds = vec![];
    for name in family_params {
        match name {
            Some(name) => {
                let p = spectral(name)?;
                fields.push(format_number(p.value));
                let (min, max) = bounds_of(source, p, name)?;
                bounds.push(min);
                bounds.push(max);
            }
            None => {
                fields.push("0".to_string());
                bounds.push(AG_FORMAT_NO_BOUND.to_string());
                bounds.push(AG_FORMAT_NO_BOUND.to_string());
            }
        }
    }

    let (index_min, index_max) = bounds_of(source, index, index_name)?;
    fields.push(index_min);
    fields.push(index_max);
    fields.extend(bounds);

    Ok(fields.join(" "))
}

fn parameter<'a>(
    source: &Source,
    model: &'static str,
    set: &'a dyn ParameterSet,
    name: &'static str,
) -> Result<&'a Parameter, WriteSourceListError> {
    set.get_parameter(name)
        .ok_or_else(|| WriteSourceListError::MissingParameter {
            source_name: source.name.clone(),
            model,
            parameter: name,
        })
}

fn bounds_of(
    source: &Source,
    p: &Parameter,
    name: &'static str,
) -> Result<(String, String), WriteSourceListError> {
    let missing = |bound| WriteSourceListError::MissingBound {
        source_name: source.name.clone(),
        parameter: name,
        bound,
    };
    let min = p.min.ok_or_else(|| missing("min"))?;
    let max = p.max.ok_or_else(|| missing("max"))?;
    Ok((format_number(min), format_number(max)))
}
