// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sky-model source catalogs for the AGILE multi-source fitter.
//!
//! Catalogs are read from XML, sources are picked with selection expressions
//! (e.g. `Name == "2AGLJ0835-4514" || SqrtTS > 5`), freed, fixed or deleted,
//! fitter output is merged back in, and the result is written either as XML
//! or as the fixed-column text consumed by the fitter.
//!
//! [`SourcesLibrary`] is the entry point for library users.

mod cli;
pub mod constants;
pub mod srclist;

pub use cli::{AgSources, AgSourcesError};
pub use srclist::{
    multi::FitResult, CatalogCounts, FreeParam, Parameter, Selection, SelectionParam, Source,
    SourceCatalog, SourceListType, SourcesLibrary, SpatialModel, SpatialType, Spectrum,
    SpectrumType,
};
