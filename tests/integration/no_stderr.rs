// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{agsources, get_cmd_output, get_test_files, Files};

#[test]
fn test_verify_no_stderr() {
    let Files { catalog, .. } = get_test_files();

    let cmd = agsources().args(["srclist-verify", &catalog]).ok();
    assert!(
        cmd.is_ok(),
        "srclist-verify failed on test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_select_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("out.txt");
    let Files {
        catalog,
        fit_result,
    } = get_test_files();

    #[rustfmt::skip]
    let cmd = agsources()
        .args([
            "srclist-select",
            "-c", &catalog,
            "--fit-results", &fit_result,
            "--map-centre", "263.585", "-2.84083",
            "-s", "SqrtTS > 5",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "srclist-select failed on test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
