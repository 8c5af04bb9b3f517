// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod no_stderr;
mod srclist;

use std::{path::PathBuf, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn agsources() -> Command {
    Command::cargo_bin("agsources").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Absolute paths to the test catalog and fit result.
struct Files {
    catalog: String,
    fit_result: String,
}

fn get_test_files() -> Files {
    let test_files = PathBuf::from("test_files").canonicalize().unwrap();
    let catalog = test_files.join("sources.xml");
    let fit_result = test_files.join("vela.source");
    for file in [&catalog, &fit_result] {
        assert!(
            file.exists(),
            "Could not find '{}', which is required for this test",
            file.display()
        );
    }
    Files {
        catalog: catalog.display().to_string(),
        fit_result: fit_result.display().to_string(),
    }
}
