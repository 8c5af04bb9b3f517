// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Source catalogs: reading them from XML, selecting and changing their
//! sources, merging fit results into them, and writing them out for the
//! multi-source fitter.

pub mod ag;
mod library;
pub mod multi;
mod select;
pub(crate) mod types;
pub mod xml;
mod write;

mod error;

pub use error::*;
pub use library::SourcesLibrary;
pub use select::*;
pub use types::*;
pub use write::write_source_list;

use itertools::Itertools;
use strum::IntoEnumIterator;

/// All of the source catalog formats that can be written.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum SourceListType {
    /// The XML interchange format.
    #[strum(serialize = "xml")]
    Xml,

    /// The text format read by the multi-source fitter.
    #[strum(serialize = "ag")]
    Ag,
}

impl SourceListType {
    /// The file extension used when writing this type.
    pub fn extension(self) -> &'static str {
        match self {
            SourceListType::Xml => "xml",
            SourceListType::Ag => "txt",
        }
    }

    /// Guess the type from a file extension.
    pub fn from_extension(ext: &str) -> Option<SourceListType> {
        match ext.to_lowercase().as_str() {
            "xml" => Some(SourceListType::Xml),
            "txt" => Some(SourceListType::Ag),
            _ => None,
        }
    }
}

lazy_static::lazy_static! {
    pub(crate) static ref SOURCE_LIST_TYPES_COMMA_SEPARATED: String = SourceListType::iter().join(", ");

    pub(crate) static ref SPECTRUM_TYPES_COMMA_SEPARATED: String = SpectrumType::iter().join(", ");

    pub(crate) static ref SPATIAL_TYPES_COMMA_SEPARATED: String = SpatialType::iter().join(", ");

    pub(crate) static ref FREE_PARAMS_COMMA_SEPARATED: String = FreeParam::iter().join(", ");

    pub(crate) static ref SELECTION_PARAMS_COMMA_SEPARATED: String = SelectionParam::iter().join(", ");
}
