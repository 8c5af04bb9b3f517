// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to verify source catalog files.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use crate::{
    srclist::{xml::parse_source_list_file, CatalogCounts},
    AgSourcesError,
};

/// Verify that source catalogs can be read, and print what's in them.
#[derive(Parser, Debug)]
pub struct SrclistVerifyArgs {
    /// Path to the XML source catalog(s) to be verified.
    #[clap(name = "SOURCE_CATALOGS", required = true, parse(from_os_str))]
    source_catalogs: Vec<PathBuf>,
}

impl SrclistVerifyArgs {
    pub fn run(&self) -> Result<(), AgSourcesError> {
        let num_bad = verify(&self.source_catalogs);
        if num_bad > 0 {
            return Err(AgSourcesError::Srclist(format!(
                "{num_bad} of {} source catalogs couldn't be read",
                self.source_catalogs.len()
            )));
        }
        Ok(())
    }
}

/// Read and print stats out for each input source catalog. If a catalog
/// couldn't be read, print the error, and continue trying to read the other
/// catalogs. The number of catalogs that couldn't be read is returned.
fn verify<P: AsRef<Path>>(source_catalogs: &[P]) -> usize {
    let mut num_bad = 0;
    for source_catalog in source_catalogs {
        let source_catalog = source_catalog.as_ref();
        info!("{}:", source_catalog.display());

        let catalog = match parse_source_list_file(source_catalog) {
            Ok(c) => c,
            Err(e) => {
                info!("{}", e);
                info!("");
                num_bad += 1;
                continue;
            }
        };
        let CatalogCounts {
            num_sources,
            num_power_laws,
            num_exp_cutoffs,
            num_super_exp_cutoffs,
            num_log_parabolas,
            num_point_sources,
            num_extended_sources,
            num_with_multi,
        } = catalog.get_counts();
        info!("    {num_sources} sources ({num_point_sources} point, {num_extended_sources} extended)");
        info!(
            "    Spectrum types: {num_power_laws} power laws, {num_exp_cutoffs} exponential cutoffs, {num_super_exp_cutoffs} super-exponential cutoffs, {num_log_parabolas} log parabolas"
        );
        if num_with_multi > 0 {
            info!("    {num_with_multi} sources have fit results");
        }
        info!("");
    }

    num_bad
}
