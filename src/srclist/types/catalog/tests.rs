// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use approx::assert_abs_diff_eq;

use super::*;
use crate::srclist::{
    types::test_sources::{exp_cutoff, fit_result, log_parabola, power_law, super_exp_cutoff},
    Selection,
};

fn catalog() -> SourceCatalog {
    let mut attributes = IndexMap::new();
    attributes.insert("name".to_string(), "test".to_string());
    SourceCatalog {
        attributes,
        sources: vec![
            power_law("vela", 263.55, -2.78),
            exp_cutoff("crab", 184.55, -5.78),
            super_exp_cutoff("geminga", 195.13, 4.27),
            log_parabola("3C454.3", 86.11, -38.18),
            power_law("vela", 263.6, -2.8),
        ],
    }
}

fn valid(s: &str) -> ValidSelection {
    Selection::from_str(s).unwrap().validate()
}

#[test]
fn test_names_and_counts() {
    let mut cat = catalog();
    assert_eq!(cat.get_names(), vec!["vela", "crab", "geminga", "3C454.3", "vela"]);

    cat.sources[2].multi = Some(fit_result("geminga"));
    cat.sources[3].spatial_model.spatial_type = SpatialType::ExtendedSource;
    assert_eq!(
        cat.get_counts(),
        CatalogCounts {
            num_sources: 5,
            num_power_laws: 2,
            num_exp_cutoffs: 1,
            num_super_exp_cutoffs: 1,
            num_log_parabolas: 1,
            num_point_sources: 4,
            num_extended_sources: 1,
            num_with_multi: 1,
        }
    );
}

#[test]
fn test_select_by_name_keeps_catalog_order() {
    let cat = catalog();
    let selected = cat.select(&valid(r#"Name == "vela""#));
    assert_eq!(selected.len(), 2);
    assert_abs_diff_eq!(selected[0].spatial_model.glon().unwrap(), 263.55);
    assert_abs_diff_eq!(selected[1].spatial_model.glon().unwrap(), 263.6);

    let selected = cat.select(&valid("Name == crab || Name == vela"));
    let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["vela", "crab", "vela"]);

    assert!(cat.select(&valid("Name == pulsar")).is_empty());
    // An unknown attribute selects nothing.
    assert!(cat.select(&valid("Colour == red")).is_empty());
}

#[test]
fn test_select_skips_sources_without_fit_results() {
    let mut cat = catalog();
    cat.sources[1].multi = Some(fit_result("crab"));
    let selected = cat.select(&valid("Flux > 0"));
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "crab");
}

#[test]
fn test_free_sources() {
    let mut cat = catalog();
    let freed = cat
        .free_sources(&valid("Name == vela"), "Index", 1)
        .unwrap();
    assert_eq!(freed.len(), 2);
    assert!(cat
        .sources
        .iter()
        .filter(|s| s.name == "vela")
        .all(|s| s.get_free(FreeParam::Index) == 1));
    assert_eq!(cat.sources[1].get_free(FreeParam::Index), 0);

    // Position can be 2.
    cat.free_sources(&valid("Name == crab"), "Pos", 2).unwrap();
    assert_eq!(cat.sources[1].spatial_model.free, 2);
}

#[test]
fn test_free_sources_is_idempotent() {
    let mut once = catalog();
    once.free_sources(&valid("Name != crab"), "CutoffEnergy", 1)
        .unwrap();

    let mut twice = catalog();
    for _ in 0..2 {
        twice
            .free_sources(&valid("Name != crab"), "CutoffEnergy", 1)
            .unwrap();
    }
    assert_eq!(once, twice);
    // Only geminga has a cutoff energy amongst the selected sources.
    assert_eq!(once.sources[2].get_free(FreeParam::CutoffEnergy), 1);
    assert_eq!(once.sources[1].get_free(FreeParam::CutoffEnergy), 0);
}

#[test]
fn test_free_sources_returns_sources_lacking_the_parameter() {
    let mut cat = catalog();
    let before = cat.clone();
    let freed = cat.free_sources(&valid("Name == vela"), "Curvature", 1).unwrap();
    assert_eq!(freed.len(), 2);
    assert_eq!(cat, before);
}

#[test]
fn test_free_sources_rejects_bad_requests_before_mutating() {
    let mut cat = catalog();
    let before = cat.clone();

    let result = cat.free_sources(&valid("Name == vela"), "GLON", 1);
    assert_eq!(
        result,
        Err(FreeSourcesError::UnknownParameter("GLON".to_string()))
    );

    let result = cat.free_sources(&valid("Name == vela"), "Flux", 2);
    assert_eq!(
        result,
        Err(FreeSourcesError::InvalidFreeValue {
            parameter: "Flux".to_string(),
            free: 2,
            max: 1
        })
    );
    assert_eq!(cat, before);
}

#[test]
fn test_delete_sources() {
    let mut cat = catalog();
    let deleted = cat.delete_sources(&valid("Name == vela || Name == geminga"));
    let deleted_names: Vec<&str> = deleted.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(deleted_names, vec!["vela", "geminga", "vela"]);
    assert_eq!(cat.get_names(), vec!["crab", "3C454.3"]);
}

#[test]
fn test_delete_nothing() {
    let mut cat = catalog();
    let before = cat.clone();
    assert!(cat.delete_sources(&valid("Name == pulsar")).is_empty());
    assert!(cat.delete_sources(&valid("Colour == red")).is_empty());
    assert_eq!(cat, before);
}

#[test]
fn test_delete_one_of_a_duplicated_name() {
    let mut cat = catalog();
    cat.sources[4].multi = Some(fit_result("vela"));
    let deleted = cat.delete_sources(&valid("Name == vela && Flux > 0"));
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0].multi.is_some());
    assert_eq!(cat.get_names(), vec!["vela", "crab", "geminga", "3C454.3"]);
    assert!(cat.sources[0].multi.is_none());
}

#[test]
fn test_update_multi_unknown_source() {
    let mut cat = catalog();
    let before = cat.clone();
    let result = cat.update_multi(fit_result("pulsar"), 0.0, 0.0);
    assert_eq!(
        result,
        Err(UpdateMultiError::SourceNotFound("pulsar".to_string()))
    );
    assert_eq!(cat, before);
}

#[test]
fn test_update_multi_distance() {
    let mut cat = catalog();
    let mut fit = fit_result("crab");
    fit.l = 90.0;
    fit.b = 0.0;
    let updated = cat.update_multi(fit, 0.0, 0.0).unwrap();
    assert_eq!(updated.len(), 1);
    let multi = cat.sources[1].multi.as_ref().unwrap();
    assert_abs_diff_eq!(multi.dist.unwrap(), 90.0, epsilon = 1e-10);

    // Against the spherical law of cosines.
    let (l1, b1, l2, b2) = (263.59_f64, -2.81_f64, 250.0_f64, 10.0_f64);
    let expected = (b1.to_radians().sin() * b2.to_radians().sin()
        + b1.to_radians().cos() * b2.to_radians().cos() * (l1 - l2).to_radians().cos())
    .acos()
    .to_degrees();
    cat.update_multi(fit_result("geminga"), l2, b2).unwrap();
    let multi = cat.sources[2].multi.as_ref().unwrap();
    assert_eq!(multi.label, "geminga");
    assert_abs_diff_eq!(multi.dist.unwrap(), expected, epsilon = 1e-8);
}

#[test]
fn test_update_multi_falls_back_when_position_not_fitted() {
    let mut cat = catalog();

    // Not fitted: the fit's starting position is used.
    let mut fit = fit_result("crab");
    fit.l = -1.0;
    fit.b = -1.0;
    let (start_l, start_b) = (fit.start_l, fit.start_b);
    cat.update_multi(fit, start_l, start_b).unwrap();
    assert_abs_diff_eq!(
        cat.sources[1].multi.as_ref().unwrap().dist.unwrap(),
        0.0,
        epsilon = 1e-6
    );

    // Nothing in the fit result: the spatial model is used.
    let mut fit = fit_result("3C454.3");
    fit.l = -1.0;
    fit.start_l = -1.0;
    fit.b = -38.18;
    cat.update_multi(fit, 86.11, -38.18).unwrap();
    assert_abs_diff_eq!(
        cat.sources[3].multi.as_ref().unwrap().dist.unwrap(),
        0.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_update_multi_updates_every_match() {
    let mut cat = catalog();
    let updated = cat.update_multi(fit_result("vela"), 263.59, -2.81).unwrap();
    assert_eq!(updated.len(), 2);
    for i in [0, 4] {
        let multi = cat.sources[i].multi.as_ref().unwrap();
        assert_abs_diff_eq!(multi.dist.unwrap(), 0.0, epsilon = 1e-6);
    }
    // Now selectable by fit-result attributes.
    assert_eq!(cat.select(&valid("Dist < 1")).len(), 2);
}
