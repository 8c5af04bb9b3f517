// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of XML source catalogs.
//!
//! Any deviation from the expected structure aborts the whole parse; a
//! catalog is only returned if every source was read.

use std::{path::Path, str::FromStr};

use log::{debug, trace};
use roxmltree::{Document, Node};

use crate::srclist::{
    Parameter, ReadSourceListError, Source, SourceCatalog, SpatialModel, SpatialType, Spectrum,
    SpectrumType,
};

/// Read an XML source catalog file.
pub fn parse_source_list_file<P: AsRef<Path>>(
    path: P,
) -> Result<SourceCatalog, ReadSourceListError> {
    fn inner(path: &Path) -> Result<SourceCatalog, ReadSourceListError> {
        debug!("Parsing XML source catalog {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        parse_source_list(&contents)
    }
    inner(path.as_ref())
}

/// Parse the contents of an XML source catalog.
pub fn parse_source_list(xml: &str) -> Result<SourceCatalog, ReadSourceListError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut catalog = SourceCatalog::new();
    // roxmltree doesn't report namespace declarations as attributes.
    for ns in root.namespaces().filter(|ns| ns.name() != Some("xml")) {
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        catalog.attributes.insert(key, ns.uri().to_string());
    }
    for attr in root.attributes() {
        let key = match attr.namespace().and_then(|uri| root.lookup_prefix(uri)) {
            Some(prefix) => format!("{prefix}:{}", attr.name()),
            None => attr.name().to_string(),
        };
        catalog.attributes.insert(key, attr.value().to_string());
    }

    for node in root.children().filter(Node::is_element) {
        expect_tag(node, "source")?;
        catalog.sources.push(parse_source(node)?);
    }
    trace!("Read {} sources", catalog.sources.len());

    Ok(catalog)
}

fn parse_source(node: Node<'_, '_>) -> Result<Source, ReadSourceListError> {
    let name = required_attribute(node, "source", "name")?.to_string();
    let source_type = node.attribute("type").map(str::to_string);

    let mut spectrum = None;
    let mut spatial_model = None;
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "spectrum" => {
                if spectrum.is_some() {
                    return Err(ReadSourceListError::DuplicateModel {
                        line_num: line_num(child),
                        source_name: name,
                        tag: "spectrum",
                    });
                }
                spectrum = Some(parse_spectrum(child, &name)?);
            }

            "spatialModel" => {
                if spatial_model.is_some() {
                    return Err(ReadSourceListError::DuplicateModel {
                        line_num: line_num(child),
                        source_name: name,
                        tag: "spatialModel",
                    });
                }
                spatial_model = Some(parse_spatial_model(child, &name)?);
            }

            other => {
                return Err(ReadSourceListError::UnexpectedTag {
                    line_num: line_num(child),
                    expected: "spectrum> or <spatialModel",
                    found: other.to_string(),
                })
            }
        }
    }

    let spectrum = match spectrum {
        Some(s) => s,
        None => {
            return Err(ReadSourceListError::MissingModel {
                line_num: line_num(node),
                source_name: name,
                tag: "spectrum",
            })
        }
    };
    let spatial_model = match spatial_model {
        Some(s) => s,
        None => {
            return Err(ReadSourceListError::MissingModel {
                line_num: line_num(node),
                source_name: name,
                tag: "spatialModel",
            })
        }
    };

    Ok(Source {
        name,
        source_type,
        spectrum,
        spatial_model,
        multi: None,
    })
}

fn parse_spectrum(node: Node<'_, '_>, source_name: &str) -> Result<Spectrum, ReadSourceListError> {
    let type_str = required_attribute(node, "spectrum", "type")?;
    let spectrum_type =
        SpectrumType::from_str(type_str).map_err(|_| ReadSourceListError::UnknownSpectrumType {
            line_num: line_num(node),
            found: type_str.to_string(),
        })?;
    let parameters = parse_parameters(node)?;
    Spectrum::new(spectrum_type, parameters).map_err(|err| ReadSourceListError::Schema {
        line_num: line_num(node),
        source_name: source_name.to_string(),
        err,
    })
}

fn parse_spatial_model(
    node: Node<'_, '_>,
    source_name: &str,
) -> Result<SpatialModel, ReadSourceListError> {
    let type_str = required_attribute(node, "spatialModel", "type")?;
    let spatial_type =
        SpatialType::from_str(type_str).map_err(|_| ReadSourceListError::UnknownSpatialType {
            line_num: line_num(node),
            found: type_str.to_string(),
        })?;
    let location_limit = required_attribute(node, "spatialModel", "location_limit")?.to_string();
    let free = parse_free(node)?;
    let parameters = parse_parameters(node)?;
    SpatialModel::new(spatial_type, free, location_limit, parameters).map_err(|err| {
        ReadSourceListError::Schema {
            line_num: line_num(node),
            source_name: source_name.to_string(),
            err,
        }
    })
}

fn parse_parameters(node: Node<'_, '_>) -> Result<Vec<Parameter>, ReadSourceListError> {
    let mut parameters = vec![];
    for child in node.children().filter(Node::is_element) {
        expect_tag(child, "parameter")?;
        parameters.push(Parameter {
            name: required_attribute(child, "parameter", "name")?.to_string(),
            value: match optional_number(child, "value")? {
                Some(v) => v,
                None => {
                    return Err(ReadSourceListError::MissingAttribute {
                        line_num: line_num(child),
                        tag: "parameter",
                        attribute: "value",
                    })
                }
            },
            min: optional_number(child, "min")?,
            max: optional_number(child, "max")?,
            free: parse_free(child)?,
            scale: optional_number(child, "scale")?,
        });
    }
    Ok(parameters)
}

/// The line of the document that a node starts on.
fn line_num(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

fn expect_tag(node: Node<'_, '_>, expected: &'static str) -> Result<(), ReadSourceListError> {
    let found = node.tag_name().name();
    if found == expected {
        Ok(())
    } else {
        Err(ReadSourceListError::UnexpectedTag {
            line_num: line_num(node),
            expected,
            found: found.to_string(),
        })
    }
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    tag: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ReadSourceListError> {
    node.attribute(attribute)
        .ok_or_else(|| ReadSourceListError::MissingAttribute {
            line_num: line_num(node),
            tag,
            attribute,
        })
}

fn optional_number(
    node: Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<f64>, ReadSourceListError> {
    node.attribute(attribute)
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| ReadSourceListError::ParseNumber {
                    line_num: line_num(node),
                    attribute,
                    string: s.to_string(),
                })
        })
        .transpose()
}

/// A missing "free" attribute means fixed.
fn parse_free(node: Node<'_, '_>) -> Result<u8, ReadSourceListError> {
    match node.attribute("free") {
        None => Ok(0),
        Some(s) => s.trim().parse().map_err(|_| ReadSourceListError::ParseFree {
            line_num: line_num(node),
            string: s.to_string(),
        }),
    }
}
