// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `agsources`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `AgSources`,
//! `AgSources::run`, and `AgSourcesError`.

#[macro_use]
mod common;
mod error;
mod srclist;

pub use error::AgSourcesError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Manage sky-model source catalogs for the AGILE multi-source fitter"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct AgSources {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run. Only used by subcommands taking an arguments file.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "verify-srclist")]
    SrclistVerify(srclist::SrclistVerifyArgs),

    #[clap(alias = "convert-srclist")]
    SrclistConvert(srclist::SrclistConvertArgs),

    #[clap(alias = "select-srclist")]
    SrclistSelect(srclist::SrclistSelectArgs),
}

impl AgSources {
    pub fn run(self) -> Result<(), AgSourcesError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        // Print the version of agsources and its build-time information.
        let sub_command = match &self.command {
            Command::SrclistVerify(_) => "srclist-verify",
            Command::SrclistConvert(_) => "srclist-convert",
            Command::SrclistSelect(_) => "srclist-select",
        };
        info!("agsources {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        match self.command {
            Command::SrclistVerify(args) => args.run()?,
            Command::SrclistConvert(args) => args.run()?,
            Command::SrclistSelect(args) => {
                let args = args.merge()?;
                if let Some(toml) = save_toml {
                    let toml_str = toml::to_string(&args)?;
                    std::fs::write(&toml, toml_str)?;
                    info!("Arguments saved to {}", toml.display());
                }
                args.run()?;
            }
        }

        info!("agsources {} complete.", sub_command);
        log::logger().flush();
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write info-level log lines of how this executable was compiled.
fn display_build_info() {
    info!("Compiled {}", BUILT_TIME_UTC);
    info!("    with compiler {}", RUSTC_VERSION);
    info!("");
}
