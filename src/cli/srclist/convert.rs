// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to convert source catalogs.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::super::common::{parse_output_type, SOURCE_LIST_OUTPUT_TYPE_HELP};
use crate::{
    srclist::{write_source_list, xml::parse_source_list_file},
    AgSourcesError,
};

/// Convert an XML source catalog to another format (e.g. the fitter's text
/// format).
#[derive(Parser, Debug, Default)]
pub struct SrclistConvertArgs {
    /// Path to the XML source catalog to be converted.
    #[clap(name = "INPUT_SOURCE_CATALOG", parse(from_os_str))]
    input: PathBuf,

    /// Path to the output source catalog. Files ending in ".txt" are written
    /// in the fitter's text format, and ".xml" files as XML.
    #[clap(name = "OUTPUT_SOURCE_CATALOG", parse(from_os_str))]
    output: PathBuf,

    #[clap(short = 'o', long, help = SOURCE_LIST_OUTPUT_TYPE_HELP.as_str())]
    output_type: Option<String>,
}

impl SrclistConvertArgs {
    pub fn run(self) -> Result<(), AgSourcesError> {
        let output_type = self
            .output_type
            .as_deref()
            .map(parse_output_type)
            .transpose()?;

        let catalog = parse_source_list_file(&self.input)?;
        info!(
            "Read {} sources from {}",
            catalog.len(),
            self.input.display()
        );
        let output_type = write_source_list(&catalog, &self.output, output_type)?;

        info!(
            "Converted {} to {} ({output_type})",
            self.input.display(),
            self.output.display()
        );

        Ok(())
    }
}
