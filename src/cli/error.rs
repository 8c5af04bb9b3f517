// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all agsources-related errors. This should be the *only*
//! error enum that is publicly visible from the binary's point of view.

use thiserror::Error;

use super::srclist::SrclistSelectArgsError;
use crate::srclist::{
    FreeSourcesError, ReadFitResultError, ReadSourceListError, SelectionParseError,
    UpdateMultiError, WriteSourceListError, SELECTION_PARAMS_COMMA_SEPARATED,
};

/// The *only* publicly visible error from agsources. Each error message
/// should include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum AgSourcesError {
    /// Generic error surrounding source catalogs.
    #[error("{0}")]
    Srclist(String),

    /// An error related to selection expressions.
    #[error("{0}\n\nSupported selection parameters: {}", *SELECTION_PARAMS_COMMA_SEPARATED)]
    Selection(String),

    /// An error related to freeing or fixing parameters.
    #[error("{0}")]
    Free(String),

    /// An error related to multi-source fitter output.
    #[error("{0}")]
    FitResult(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<SrclistSelectArgsError> for AgSourcesError {
    fn from(e: SrclistSelectArgsError) -> Self {
        let s = e.to_string();
        match e {
            SrclistSelectArgsError::NoCatalog
            | SrclistSelectArgsError::NoMapCentre
            | SrclistSelectArgsError::BadMapCentre(_) => Self::ArgFile(s),
            SrclistSelectArgsError::BadFree(_) => Self::Free(s),
            SrclistSelectArgsError::NoSelection => Self::Selection(s),
        }
    }
}

// Library code errors.

impl From<ReadSourceListError> for AgSourcesError {
    fn from(e: ReadSourceListError) -> Self {
        let s = e.to_string();
        match e {
            ReadSourceListError::IO(_) => Self::Generic(s),
            _ => Self::Srclist(s),
        }
    }
}

impl From<WriteSourceListError> for AgSourcesError {
    fn from(e: WriteSourceListError) -> Self {
        let s = e.to_string();
        match e {
            WriteSourceListError::MissingParameter { .. }
            | WriteSourceListError::MissingBound { .. }
            | WriteSourceListError::InvalidFreeFlags { .. }
            | WriteSourceListError::UnknownOutputType(_) => Self::Srclist(s),
            WriteSourceListError::IO(e) => Self::from(e),
        }
    }
}

impl From<ReadFitResultError> for AgSourcesError {
    fn from(e: ReadFitResultError) -> Self {
        let s = e.to_string();
        match e {
            ReadFitResultError::IO(e) => Self::from(e),
            _ => Self::FitResult(s),
        }
    }
}

impl From<FreeSourcesError> for AgSourcesError {
    fn from(e: FreeSourcesError) -> Self {
        Self::Free(e.to_string())
    }
}

impl From<UpdateMultiError> for AgSourcesError {
    fn from(e: UpdateMultiError) -> Self {
        Self::Srclist(e.to_string())
    }
}

impl From<SelectionParseError> for AgSourcesError {
    fn from(e: SelectionParseError) -> Self {
        Self::Selection(e.to_string())
    }
}

impl From<toml::ser::Error> for AgSourcesError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(e.to_string())
    }
}

impl From<std::io::Error> for AgSourcesError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
