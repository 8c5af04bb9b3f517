// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::srclist::{
    FREE_PARAMS_COMMA_SEPARATED, SOURCE_LIST_TYPES_COMMA_SEPARATED,
    SPATIAL_TYPES_COMMA_SEPARATED, SPECTRUM_TYPES_COMMA_SEPARATED,
};

/// A model's parameters don't satisfy the requirements of its type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("A {model} of type {model_type} requires a '{parameter}' parameter, but it is missing")]
    MissingParameter {
        model: &'static str,
        model_type: String,
        parameter: &'static str,
    },

    #[error("'{name}' has a free value of {free}, but the largest allowed is {max}")]
    InvalidFreeFlag { name: String, free: u8, max: u8 },
}

/// Errors associated with reading in an XML source catalog. All of these
/// abort the whole read.
#[derive(Error, Debug)]
pub enum ReadSourceListError {
    #[error("Source catalog line {line_num}: Expected a <{expected}> tag, but found <{found}>")]
    UnexpectedTag {
        line_num: u32,
        expected: &'static str,
        found: String,
    },

    #[error("Source catalog line {line_num}: <{tag}> is missing its '{attribute}' attribute")]
    MissingAttribute {
        line_num: u32,
        tag: &'static str,
        attribute: &'static str,
    },

    #[error("Source catalog line {line_num}: Error converting '{attribute}' value '{string}' to a number")]
    ParseNumber {
        line_num: u32,
        attribute: &'static str,
        string: String,
    },

    #[error("Source catalog line {line_num}: '{string}' is not a valid free value; expected a small non-negative integer")]
    ParseFree { line_num: u32, string: String },

    #[error("Source catalog line {line_num}: Unrecognised spectrum type '{found}'; supported types: {}", *SPECTRUM_TYPES_COMMA_SEPARATED)]
    UnknownSpectrumType { line_num: u32, found: String },

    #[error("Source catalog line {line_num}: Unrecognised spatial model type '{found}'; supported types: {}", *SPATIAL_TYPES_COMMA_SEPARATED)]
    UnknownSpatialType { line_num: u32, found: String },

    #[error("Source catalog line {line_num}: Source '{source_name}' has more than one <{tag}>")]
    DuplicateModel {
        line_num: u32,
        source_name: String,
        tag: &'static str,
    },

    #[error("Source catalog line {line_num}: Source '{source_name}' has no <{tag}>")]
    MissingModel {
        line_num: u32,
        source_name: String,
        tag: &'static str,
    },

    #[error("Source catalog line {line_num}: Source '{source_name}': {err}")]
    Schema {
        line_num: u32,
        source_name: String,
        err: SchemaError,
    },

    #[error("Couldn't parse the source catalog as XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors associated with writing out a source catalog.
#[derive(Error, Debug)]
pub enum WriteSourceListError {
    #[error("Source '{source_name}': Can't write the {model} without its '{parameter}' parameter")]
    MissingParameter {
        source_name: String,
        model: &'static str,
        parameter: &'static str,
    },

    #[error("Source '{source_name}': Can't write the '{parameter}' parameter without its '{bound}' bound")]
    MissingBound {
        source_name: String,
        parameter: &'static str,
        bound: &'static str,
    },

    #[error("Source '{source_name}': Free flags {flags} can't be packed into a bitmask")]
    InvalidFreeFlags { source_name: String, flags: String },

    #[error("'{0}' is not a recognised source catalog type; supported types: {}", *SOURCE_LIST_TYPES_COMMA_SEPARATED)]
    UnknownOutputType(String),

    /// An IO error.
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors associated with reading the fitter's output.
#[derive(Error, Debug)]
pub enum ReadFitResultError {
    #[error("Expected {expected} non-comment lines in the fit-result file, but found {got}")]
    WrongNumberOfLines { expected: usize, got: usize },

    #[error("Fit-result line {0}: Couldn't split the line into its expected parts")]
    MalformedLine(usize),

    #[error("Fit-result line {line_num}: '{range}' is not a 'min..max' range")]
    MalformedRange { line_num: usize, range: String },

    #[error("Fit-result file ended at field {position} ({field}); more fields were expected")]
    MissingField { field: &'static str, position: usize },

    #[error("Fit-result file has {got} fields, but only {expected} were expected")]
    SurplusFields { expected: usize, got: usize },

    #[error("Fit-result line {line_num}: Expected a single value for '{field}', but found a list")]
    UnexpectedList { line_num: usize, field: &'static str },

    #[error("Fit-result line {line_num}: Expected a comma-separated list for '{field}'")]
    ExpectedList { line_num: usize, field: &'static str },

    #[error("Fit-result line {line_num}: Error converting {field} value '{string}' to a float")]
    ParseFloat {
        line_num: usize,
        field: &'static str,
        string: String,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Errors when changing which parameters are free.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FreeSourcesError {
    #[error("The parameter '{0}' cannot be freed or fixed; supported parameters: {}", *FREE_PARAMS_COMMA_SEPARATED)]
    UnknownParameter(String),

    #[error("'{parameter}' can't have a free value of {free}; the largest allowed is {max}")]
    InvalidFreeValue {
        parameter: String,
        free: u8,
        max: u8,
    },
}

/// Errors when merging fit results into a catalog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UpdateMultiError {
    #[error("Source '{0}' was not found in the source catalog")]
    SourceNotFound(String),
}

/// Errors when parsing a textual selection expression.
#[derive(Error, Debug, PartialEq)]
pub enum SelectionParseError {
    #[error("The selection expression is empty")]
    Empty,

    #[error("Unexpected character '{ch}' at position {pos} of the selection expression")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("Unterminated string starting at position {0} of the selection expression")]
    UnterminatedString(usize),

    #[error("'{0}' is not a valid number in the selection expression")]
    InvalidNumber(String),

    #[error("Expected {expected} in the selection expression, but found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("Expected {0} in the selection expression, but it ended")]
    UnexpectedEnd(&'static str),
}
