// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing XML source catalogs.

use log::debug;

use crate::srclist::{format_number, Parameter, SourceCatalog, WriteSourceListError};

/// The root element's tag. Catalogs read from XML don't remember theirs.
const ROOT_TAG: &str = "source_library";

/// Write a catalog as XML. Everything that was read from an XML catalog is
/// written back; fit results are not.
pub fn write_source_list<T: std::io::Write>(
    buf: &mut T,
    catalog: &SourceCatalog,
) -> Result<(), WriteSourceListError> {
    writeln!(buf, r#"<?xml version="1.0" ?>"#)?;
    write!(buf, "<{ROOT_TAG}")?;
    for (key, value) in &catalog.attributes {
        write!(buf, r#" {}="{}""#, key, escape(value))?;
    }
    writeln!(buf, ">")?;

    for source in &catalog.sources {
        write!(buf, r#"  <source name="{}""#, escape(&source.name))?;
        if let Some(t) = &source.source_type {
            write!(buf, r#" type="{}""#, escape(t))?;
        }
        writeln!(buf, ">")?;

        writeln!(
            buf,
            r#"    <spectrum type="{}">"#,
            source.spectrum.spectrum_type
        )?;
        for p in &source.spectrum.parameters {
            write_parameter(buf, p)?;
        }
        writeln!(buf, "    </spectrum>")?;

        let spatial = &source.spatial_model;
        writeln!(
            buf,
            r#"    <spatialModel type="{}" location_limit="{}" free="{}">"#,
            spatial.spatial_type,
            escape(&spatial.location_limit),
            spatial.free
        )?;
        for p in &spatial.parameters {
            write_parameter(buf, p)?;
        }
        writeln!(buf, "    </spatialModel>")?;

        writeln!(buf, "  </source>")?;
    }
    writeln!(buf, "</{ROOT_TAG}>")?;
    debug!("Encoded {} sources as XML", catalog.sources.len());

    Ok(())
}

fn write_parameter<T: std::io::Write>(
    buf: &mut T,
    p: &Parameter,
) -> Result<(), WriteSourceListError> {
    write!(
        buf,
        r#"      <parameter name="{}" value="{}""#,
        escape(&p.name),
        format_number(p.value)
    )?;
    if let Some(min) = p.min {
        write!(buf, r#" min="{}""#, format_number(min))?;
    }
    if let Some(max) = p.max {
        write!(buf, r#" max="{}""#, format_number(max))?;
    }
    write!(buf, r#" free="{}""#, p.free)?;
    if let Some(scale) = p.scale {
        write!(buf, r#" scale="{}""#, format_number(scale))?;
    }
    writeln!(buf, "/>")?;
    Ok(())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
