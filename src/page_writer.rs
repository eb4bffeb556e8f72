use std::path::Path;

use lopdf::Document;

use crate::error::ScanError;

/// Write a copy of one page of `source` as a new single-page document at
/// `dest`. The document handle is scoped here, so it is released on every
/// exit path, error or not.
pub(crate) fn write_match_page(
    source: &Path,
    dest: &Path,
    page_number: u32,
) -> Result<(), ScanError> {
    let mut document = Document::load(source)?;
    let pages = document.get_pages();
    if !pages.contains_key(&page_number) {
        return Err(ScanError::PageOutOfRange {
            file: source.display().to_string(),
            page: page_number,
        });
    }

    let discard = pages
        .keys()
        .copied()
        .filter(|candidate| *candidate != page_number)
        .collect::<Vec<_>>();
    if !discard.is_empty() {
        document.delete_pages(&discard);
    }
    document.prune_objects();
    document.compress();
    document.save(dest)?;
    Ok(())
}
