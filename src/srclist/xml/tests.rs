// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use indoc::indoc;

use super::*;
use crate::srclist::{
    ParameterSet, ReadSourceListError, SchemaError, SpatialType, SpectrumType,
};

const SOURCES: &str = include_str!("../../../test_files/sources.xml");

/// Wrap source XML in a root element.
fn catalog(sources: &str) -> String {
    format!("<source_library title=\"t\">\n{sources}</source_library>\n")
}

#[test]
fn test_parse_fixture() {
    let cat = parse_source_list(SOURCES).unwrap();
    assert_eq!(cat.attributes.len(), 2);
    assert_eq!(cat.attributes["title"], "Galactic plane sources & friends");
    assert_eq!(cat.attributes.get_index(1).unwrap().0, "release");

    assert_eq!(
        cat.get_names(),
        vec![
            "2AGLJ0835-4514",
            "2AGLJ2021+4029",
            "2AGLJ0633+1751",
            "2AGLJ2254+1609",
            "2AGLJ2021+4029"
        ]
    );

    let vela = &cat.sources[0];
    assert_eq!(vela.source_type.as_deref(), Some("PointSource"));
    assert_eq!(vela.spectrum.spectrum_type, SpectrumType::PLExpCutoff);
    let flux = vela.spectrum.get_parameter("Flux").unwrap();
    assert_abs_diff_eq!(flux.value, 969.539e-8);
    assert_eq!(flux.min, Some(0.0));
    assert_eq!(flux.max, Some(1000.0));
    assert_eq!(flux.free, 1);
    assert_eq!(flux.scale, Some(1e-8));
    assert_eq!(vela.spatial_model.spatial_type, SpatialType::PointSource);
    assert_eq!(vela.spatial_model.location_limit, "0");
    assert_abs_diff_eq!(vela.spatial_model.glon().unwrap(), 263.585);
    assert_abs_diff_eq!(vela.spatial_model.glat().unwrap(), -2.84083);
    assert!(vela.multi.is_none());

    // No type attribute, and no scales.
    let geminga = &cat.sources[2];
    assert!(geminga.source_type.is_none());
    assert_eq!(geminga.spectrum.spectrum_type, SpectrumType::PLSuperExpCutoff);
    assert!(geminga.spectrum.parameters.iter().all(|p| p.scale.is_none()));
    assert_eq!(geminga.spatial_model.free, 1);

    assert_eq!(cat.sources[1].spatial_model.free, 2);

    let blazar = &cat.sources[3];
    assert_eq!(blazar.spatial_model.spatial_type, SpatialType::ExtendedSource);
    assert_eq!(blazar.spatial_model.location_limit, "3");
}

#[test]
fn test_parameter_order_is_kept() {
    let cat = parse_source_list(SOURCES).unwrap();
    let names: Vec<&str> = cat.sources[3]
        .spectrum
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Flux", "Index", "PivotEnergy", "Curvature"]);
}

#[test]
fn test_xml_round_trip() {
    let cat = parse_source_list(SOURCES).unwrap();
    let mut buf = vec![];
    write_source_list(&mut buf, &cat).unwrap();
    let xml = String::from_utf8(buf).unwrap();
    let again = parse_source_list(&xml).unwrap();
    assert_eq!(cat, again);
    // The attribute needing escaping survived.
    assert!(xml.contains(r#"title="Galactic plane sources &amp; friends""#));
}

#[test]
fn test_namespaced_root_attributes_round_trip() {
    let xml = indoc! {r#"
        <source_library xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" title="t" xsi:noNamespaceSchemaLocation="catalog.xsd">
        </source_library>
    "#};
    let cat = parse_source_list(xml).unwrap();
    let keys: Vec<&str> = cat.attributes.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["xmlns:xsi", "title", "xsi:noNamespaceSchemaLocation"]
    );
    assert_eq!(
        cat.attributes["xmlns:xsi"],
        "http://www.w3.org/2001/XMLSchema-instance"
    );

    let mut buf = vec![];
    write_source_list(&mut buf, &cat).unwrap();
    let written = String::from_utf8(buf).unwrap();
    assert!(written.contains(r#" xsi:noNamespaceSchemaLocation="catalog.xsd""#));
    // The prefix is still bound, so the output parses to the same catalog.
    assert_eq!(parse_source_list(&written).unwrap(), cat);
}

#[test]
fn test_write_format() {
    let cat = parse_source_list(&catalog(indoc! {r#"
        <source name="a&quot;b">
          <spectrum type="PowerLaw">
            <parameter name="Flux" value="1.193e-06" min="0" max="1e-3" free="1" scale="1e-8"/>
            <parameter name="Index" value="2.1"/>
          </spectrum>
          <spatialModel type="PointSource" location_limit="0">
            <parameter name="GLON" value="1"/>
            <parameter name="GLAT" value="-2"/>
          </spatialModel>
        </source>
    "#}))
    .unwrap();
    let mut buf = vec![];
    write_source_list(&mut buf, &cat).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        indoc! {r#"
            <?xml version="1.0" ?>
            <source_library title="t">
              <source name="a&quot;b">
                <spectrum type="PowerLaw">
                  <parameter name="Flux" value="1.193e-6" min="0" max="0.001" free="1" scale="1e-8"/>
                  <parameter name="Index" value="2.1" free="0"/>
                </spectrum>
                <spatialModel type="PointSource" location_limit="0" free="0">
                  <parameter name="GLON" value="1" free="0"/>
                  <parameter name="GLAT" value="-2" free="0"/>
                </spatialModel>
              </source>
            </source_library>
        "#}
    );
}

#[test]
fn test_unexpected_root_child() {
    let xml = catalog(indoc! {r#"
        <src name="x"/>
    "#});
    match parse_source_list(&xml) {
        Err(ReadSourceListError::UnexpectedTag {
            line_num,
            expected,
            found,
        }) => {
            assert_eq!(line_num, 2);
            assert_eq!(expected, "source");
            assert_eq!(found, "src");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_unexpected_source_child() {
    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectra type="PowerLaw"/>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::UnexpectedTag { line_num: 3, .. })
    ));
}

#[test]
fn test_unexpected_model_child() {
    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PowerLaw">
            <param name="Flux" value="1"/>
          </spectrum>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::UnexpectedTag {
            line_num: 4,
            expected: "parameter",
            ..
        })
    ));
}

#[test]
fn test_missing_and_duplicated_models() {
    let spectrum = indoc! {r#"
        <spectrum type="PowerLaw">
          <parameter name="Flux" value="1"/>
          <parameter name="Index" value="2"/>
        </spectrum>
    "#};
    let spatial = indoc! {r#"
        <spatialModel type="PointSource" location_limit="0">
          <parameter name="GLON" value="1"/>
          <parameter name="GLAT" value="2"/>
        </spatialModel>
    "#};

    let xml = catalog(&format!("<source name=\"x\">\n{spectrum}</source>\n"));
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::MissingModel {
            tag: "spatialModel",
            ..
        })
    ));

    let xml = catalog(&format!("<source name=\"x\">\n{spatial}</source>\n"));
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::MissingModel { tag: "spectrum", .. })
    ));

    let xml = catalog(&format!(
        "<source name=\"x\">\n{spectrum}{spatial}{spectrum}</source>\n"
    ));
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::DuplicateModel { tag: "spectrum", .. })
    ));
}

#[test]
fn test_missing_attributes() {
    let xml = catalog(indoc! {r#"
        <source>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::MissingAttribute {
            tag: "source",
            attribute: "name",
            ..
        })
    ));

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spatialModel type="PointSource">
            <parameter name="GLON" value="1"/>
            <parameter name="GLAT" value="2"/>
          </spatialModel>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::MissingAttribute {
            attribute: "location_limit",
            ..
        })
    ));

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PowerLaw">
            <parameter name="Flux"/>
          </spectrum>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::MissingAttribute {
            line_num: 4,
            attribute: "value",
            ..
        })
    ));
}

#[test]
fn test_bad_values() {
    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PowerLaw">
            <parameter name="Flux" value="1" min="zero"/>
          </spectrum>
        </source>
    "#});
    match parse_source_list(&xml) {
        Err(ReadSourceListError::ParseNumber {
            attribute, string, ..
        }) => {
            assert_eq!(attribute, "min");
            assert_eq!(string, "zero");
        }
        other => panic!("unexpected result {other:?}"),
    }

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PowerLaw">
            <parameter name="Flux" value="1" free="yes"/>
          </spectrum>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::ParseFree { .. })
    ));

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="BrokenPowerLaw"/>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::UnknownSpectrumType { .. })
    ));

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spatialModel type="Disk" location_limit="0"/>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::UnknownSpatialType { .. })
    ));

    assert!(matches!(
        parse_source_list("<source_library><source>"),
        Err(ReadSourceListError::Xml(_))
    ));

    // Bounds are checked on every parameter, even the spatial ones that are
    // never written with their bounds.
    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PowerLaw">
            <parameter name="Flux" value="1"/>
            <parameter name="Index" value="2"/>
          </spectrum>
          <spatialModel type="PointSource" location_limit="0">
            <parameter name="GLON" value="1" max="lots"/>
            <parameter name="GLAT" value="-2"/>
          </spatialModel>
        </source>
    "#});
    match parse_source_list(&xml) {
        Err(ReadSourceListError::ParseNumber {
            attribute, string, ..
        }) => {
            assert_eq!(attribute, "max");
            assert_eq!(string, "lots");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_schema_violations() {
    let xml = catalog(indoc! {r#"
        <source name="x">
          <spectrum type="PLExpCutoff">
            <parameter name="Flux" value="1"/>
            <parameter name="Index" value="2"/>
          </spectrum>
        </source>
    "#});
    match parse_source_list(&xml) {
        Err(ReadSourceListError::Schema {
            source_name, err, ..
        }) => {
            assert_eq!(source_name, "x");
            assert_eq!(
                err,
                SchemaError::MissingParameter {
                    model: "spectrum",
                    model_type: "PLExpCutoff".to_string(),
                    parameter: "CutoffEnergy"
                }
            );
        }
        other => panic!("unexpected result {other:?}"),
    }

    let xml = catalog(indoc! {r#"
        <source name="x">
          <spatialModel type="PointSource" location_limit="0" free="3">
            <parameter name="GLON" value="1"/>
            <parameter name="GLAT" value="2"/>
          </spatialModel>
        </source>
    "#});
    assert!(matches!(
        parse_source_list(&xml),
        Err(ReadSourceListError::Schema {
            err: SchemaError::InvalidFreeFlag { free: 3, .. },
            ..
        })
    ));
}

#[test]
fn test_parse_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/test_files/sources.xml");
    let cat = parse_source_list_file(path).unwrap();
    assert_eq!(cat.len(), 5);

    assert!(matches!(
        parse_source_list_file("/does/not/exist.xml"),
        Err(ReadSourceListError::IO(_))
    ));
}
