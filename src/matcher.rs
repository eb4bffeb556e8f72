use regex::{Regex, RegexBuilder};

use crate::error::ScanError;
use crate::model::{MatchRecord, PageText};

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ScanError> {
    Ok(RegexBuilder::new(pattern).multi_line(true).build()?)
}

pub(crate) fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Maps byte offsets of the joined text back to source page numbers.
pub(crate) struct PageMap {
    starts: Vec<(usize, u32)>,
}

impl PageMap {
    pub(crate) fn new(pages: &[PageText]) -> Self {
        let mut starts = Vec::with_capacity(pages.len());
        let mut offset = 0_usize;
        for page in pages {
            starts.push((offset, page.page_number));
            offset += page.text.len() + 1;
        }
        Self { starts }
    }

    pub(crate) fn page_at(&self, byte_offset: usize) -> Option<u32> {
        self.starts
            .iter()
            .take_while(|(start, _)| *start <= byte_offset)
            .last()
            .map(|(_, page)| *page)
    }
}

/// Matches in first-occurrence order, duplicates preserved, each paired
/// with its byte offset in `text`.
pub(crate) fn find_matches(
    regex: &Regex,
    filename: &str,
    text: &str,
) -> Vec<(MatchRecord, usize)> {
    regex
        .find_iter(text)
        .map(|found| {
            (
                MatchRecord {
                    filename: filename.to_string(),
                    text: found.as_str().to_string(),
                },
                found.start(),
            )
        })
        .collect()
}
