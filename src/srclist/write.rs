// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use log::{info, trace};

use super::{ag, xml, SourceCatalog, SourceListType, WriteSourceListError};

/// Write a catalog to `path`. If the output type isn't given, it's guessed
/// from the file extension. The whole catalog is encoded before the file is
/// created, so nothing is written if encoding fails.
pub fn write_source_list(
    catalog: &SourceCatalog,
    path: &Path,
    output_type: Option<SourceListType>,
) -> Result<SourceListType, WriteSourceListError> {
    trace!("Attempting to write output source list");
    let output_type = match output_type {
        Some(t) => t,
        None => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            SourceListType::from_extension(ext).ok_or_else(|| {
                WriteSourceListError::UnknownOutputType(if ext.is_empty() {
                    "<no extension>".to_string()
                } else {
                    ext.to_string()
                })
            })?
        }
    };

    let mut buf = vec![];
    match output_type {
        SourceListType::Xml => xml::write_source_list(&mut buf, catalog)?,
        SourceListType::Ag => ag::write_source_list(&mut buf, catalog)?,
    }
    std::fs::write(path, buf)?;
    info!(
        "Wrote {}-style source list to {}",
        output_type,
        path.display()
    );

    Ok(output_type)
}
