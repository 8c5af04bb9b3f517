// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to select, free, fix or delete sources in a source catalog.

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::super::common::{parse_output_type, ARG_FILE_HELP, SOURCE_LIST_OUTPUT_TYPE_HELP};
use crate::{
    srclist::{write_source_list, Selection, Source, SourcesLibrary},
    AgSourcesError,
};

/// Select sources from an XML source catalog, optionally after merging the
/// multi-source fitter's results, then print, free/fix or delete them.
///
/// Example selections: 'Name == "2AGLJ0835-4514"', 'SqrtTS > 5 && Dist < 10'
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SrclistSelectArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    /// Path to the XML source catalog.
    #[clap(short = 'c', long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) catalog: Option<PathBuf>,

    /// Output files of the multi-source fitter (".source" files). Each is
    /// merged into the source with the same name before selecting.
    #[clap(long, multiple_values(true), parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) fit_results: Option<Vec<PathBuf>>,

    /// The Galactic longitude and latitude of the map centre, used to work
    /// out each fitted source's distance ("Dist") [degrees]. Required with
    /// --fit-results.
    #[clap(long, number_of_values = 2, allow_hyphen_values = true, value_names = &["L", "B"])]
    pub(super) map_centre: Option<Vec<f64>>,

    /// The selection expression.
    #[clap(short, long)]
    pub(super) selection: Option<String>,

    /// Delete the selected sources.
    #[clap(long, help_heading = "ACTIONS")]
    #[serde(default)]
    pub(super) delete: bool,

    /// Set a free flag on the selected sources, e.g. "Index=1" or "Pos=2".
    #[clap(long, conflicts_with = "delete", help_heading = "ACTIONS")]
    pub(super) free: Option<String>,

    /// Write the whole (changed) catalog to this file.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    #[clap(long, help = SOURCE_LIST_OUTPUT_TYPE_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output_type: Option<String>,
}

impl SrclistSelectArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(crate) fn merge(self) -> Result<SrclistSelectArgs, AgSourcesError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let SrclistSelectArgs {
                args_file: _,
                catalog,
                fit_results,
                map_centre,
                selection,
                delete,
                free,
                output,
                output_type,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(SrclistSelectArgs {
                args_file: None,
                catalog: cli_args.catalog.or(catalog),
                fit_results: cli_args.fit_results.or(fit_results),
                map_centre: cli_args.map_centre.or(map_centre),
                selection: cli_args.selection.or(selection),
                delete: cli_args.delete || delete,
                free: cli_args.free.or(free),
                output: cli_args.output.or(output),
                output_type: cli_args.output_type.or(output_type),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(crate) fn run(self) -> Result<(), AgSourcesError> {
        let catalog = self.catalog.ok_or(SrclistSelectArgsError::NoCatalog)?;
        let selection = self.selection.ok_or(SrclistSelectArgsError::NoSelection)?;
        let selection = Selection::from_str(&selection)?;
        let free = self.free.as_deref().map(parse_free).transpose()?;
        let output_type = self
            .output_type
            .as_deref()
            .map(parse_output_type)
            .transpose()?;
        let fit_results = self.fit_results.unwrap_or_default();
        let map_centre = match self.map_centre.as_deref() {
            Some(&[l, b]) => Some((l, b)),
            Some(other) => return Err(SrclistSelectArgsError::BadMapCentre(other.len()).into()),
            None => None,
        };

        let mut library = SourcesLibrary::default();
        library.load(&catalog)?;

        if !fit_results.is_empty() {
            let (l, b) = map_centre.ok_or(SrclistSelectArgsError::NoMapCentre)?;
            for fit_result in fit_results {
                let fit = library.parse_source_file(&fit_result)?;
                library.update_multi(fit, l, b)?;
            }
        }

        if self.delete {
            let deleted = library.delete_sources(&selection);
            for source in &deleted {
                info!("Deleted {}", source.name);
            }
        } else if let Some((parameter, value)) = free {
            let freed = library.free_sources(&selection, &parameter, value)?;
            info!("Set {parameter}={value} on {} sources", freed.len());
            for source in freed {
                print_source(source);
            }
        } else {
            let selected = library.select_sources(&selection);
            info!(
                "{} of {} sources selected",
                selected.len(),
                library.get_sources().len()
            );
            for source in selected {
                print_source(source);
            }
        }

        if let Some(output) = self.output {
            write_source_list(library.catalog(), &output, output_type)?;
        }

        Ok(())
    }
}

/// Parse "PARAM=VALUE", e.g. "Index=1".
pub(super) fn parse_free(s: &str) -> Result<(String, u8), SrclistSelectArgsError> {
    let (parameter, value) = s
        .split_once('=')
        .ok_or_else(|| SrclistSelectArgsError::BadFree(s.to_string()))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| SrclistSelectArgsError::BadFree(s.to_string()))?;
    Ok((parameter.trim().to_string(), value))
}

fn print_source(source: &Source) {
    let pos = match (source.spatial_model.glon(), source.spatial_model.glat()) {
        (Some(l), Some(b)) => format!("({l}, {b})"),
        _ => "(?, ?)".to_string(),
    };
    match &source.multi {
        Some(multi) => info!(
            "    {} {} {pos} SqrtTS {} Dist {}",
            source.name,
            source.spectrum.spectrum_type,
            multi.sqrt_ts,
            multi
                .dist
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string())
        ),
        None => info!("    {} {} {pos}", source.name, source.spectrum.spectrum_type),
    }
}

#[derive(Error, Debug)]
pub(crate) enum SrclistSelectArgsError {
    #[error("No source catalog was supplied")]
    NoCatalog,

    #[error("No selection expression was supplied")]
    NoSelection,

    #[error("Fit results were supplied, but the map centre wasn't")]
    NoMapCentre,

    #[error("The map centre needs exactly 2 values (L B), but {0} were given")]
    BadMapCentre(usize),

    #[error("Couldn't parse '{0}' as PARAM=VALUE, e.g. 'Index=1'")]
    BadFree(String),
}
