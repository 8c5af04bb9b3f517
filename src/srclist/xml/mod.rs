// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! XML source catalogs.
//!
//! The root element's attributes are the catalog's metadata. Each child is a
//! `<source>` containing exactly one `<spectrum>` and one `<spatialModel>`,
//! which in turn contain `<parameter>`s:
//!
//! ```xml
//! <source_library title="source library">
//!   <source name="2AGLJ0835-4514" type="PointSource">
//!     <spectrum type="PLExpCutoff">
//!       <parameter name="Flux" free="1" scale="1e-08" value="969.539e-08" min="0" max="1000.0"/>
//!       <parameter name="Index" free="0" value="1.71345" min="0.5" max="5"/>
//!       <parameter name="CutoffEnergy" free="0" value="3913.06" min="20" max="10000"/>
//!     </spectrum>
//!     <spatialModel type="PointSource" location_limit="0" free="0">
//!       <parameter name="GLON" value="263.585" free="0"/>
//!       <parameter name="GLAT" value="-2.84083" free="0"/>
//!     </spatialModel>
//!   </source>
//! </source_library>
//! ```

mod read;
#[cfg(test)]
mod tests;
mod write;

pub use read::{parse_source_list, parse_source_list_file};
pub use write::write_source_list;
