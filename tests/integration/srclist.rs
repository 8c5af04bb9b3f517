// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the source catalog subcommands.

use indoc::indoc;
use tempfile::TempDir;

use crate::{agsources, get_cmd_output, get_test_files, Files};

#[test]
fn test_verify_reports_counts() {
    let Files { catalog, .. } = get_test_files();
    let (stdout, _) = get_cmd_output(agsources().args(["srclist-verify", &catalog]).ok());
    assert!(stdout.contains("5 sources (4 point, 1 extended)"), "{stdout}");
    assert!(
        stdout.contains("2 power laws, 1 exponential cutoffs, 1 super-exponential cutoffs, 1 log parabolas"),
        "{stdout}"
    );
}

#[test]
fn test_verify_fails_on_a_bad_catalog() {
    let tmp_dir = TempDir::new().unwrap();
    let bad = tmp_dir.path().join("bad.xml");
    std::fs::write(&bad, "<source_library><src/></source_library>").unwrap();

    let Files { catalog, .. } = get_test_files();
    let cmd = agsources()
        .args(["srclist-verify", &catalog, &bad.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    // The good catalog is still reported.
    assert!(stdout.contains("5 sources"), "{stdout}");
    assert!(stderr.contains("1 of 2 source catalogs"), "{stderr}");
}

#[test]
fn test_convert_to_ag() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("sources.txt");
    let Files { catalog, .. } = get_test_files();

    let cmd = agsources()
        .args(["srclist-convert", &catalog, &output.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "srclist-convert failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        indoc! {"
            9.69539e-6 263.585 -2.84083 1.71345 1 2 2AGLJ0835-4514 0 1 3913.06 0 0.5 5 20 10000 -1 -1
            1.193e-6 78.2375 2.12298 2.1 257 2 2AGLJ2021+4029 0 0 0 0 0.5 5 -1 -1 -1 -1
            3.4e-6 195.134 4.2657 1.7 7 2 2AGLJ0633+1751 0 2 2500 1.3 0.5 5 20 10000 0 100
            7.1e-7 86.111 -38.184 2.2 0 2 2AGLJ2254+1609 3 3 500 0.1 1 4 100 1000 0 3
            2.5e-7 78.3 2.1 2.4 0 2 2AGLJ2021+4029 0 0 0 0 0.5 5 -1 -1 -1 -1
        "}
    );
}

#[test]
fn test_convert_needs_a_known_type() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("sources.yaml");
    let Files { catalog, .. } = get_test_files();

    let cmd = agsources()
        .args(["srclist-convert", &catalog, &output.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("'yaml' is not a recognised"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_select_prints_sources() {
    let Files { catalog, .. } = get_test_files();
    let (stdout, _) = get_cmd_output(
        agsources()
            .args(["srclist-select", "-c", &catalog, "-s", "Name == '2AGLJ2021+4029'"])
            .ok(),
    );
    assert!(stdout.contains("2 of 5 sources selected"), "{stdout}");
    assert!(stdout.contains("2AGLJ2021+4029 PowerLaw (78.2375, 2.12298)"), "{stdout}");
}

#[test]
fn test_select_warns_about_unknown_names() {
    let Files { catalog, .. } = get_test_files();
    let (stdout, _) = get_cmd_output(
        agsources()
            .args(["srclist-select", "-c", &catalog, "-s", "Colour == red"])
            .ok(),
    );
    assert!(stdout.contains("'Colour' is not supported"), "{stdout}");
    assert!(stdout.contains("0 of 5 sources selected"), "{stdout}");
}

#[test]
fn test_select_with_arguments_file() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("out.xml");
    let Files {
        catalog,
        fit_result,
    } = get_test_files();
    let arg_file = tmp_dir.path().join("args.toml");
    std::fs::write(
        &arg_file,
        format!(
            indoc! {r#"
                catalog = "{}"
                fit_results = ["{}"]
                map_centre = [263.585, -2.84083]
                selection = "Dist < 1"
                delete = true
                output = "{}"
            "#},
            catalog,
            fit_result,
            output.display()
        ),
    )
    .unwrap();

    let cmd = agsources()
        .args(["srclist-select", &arg_file.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "srclist-select failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(!contents.contains("2AGLJ0835-4514"));
    assert_eq!(contents.matches("<source ").count(), 4);
}

#[test]
fn test_select_bad_expression() {
    let Files { catalog, .. } = get_test_files();
    let cmd = agsources()
        .args(["srclist-select", "-c", &catalog, "-s", "Flux >"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Supported selection parameters"), "{stderr}");
}
