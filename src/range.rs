//! Page-range parsing.
//!
//! A range string is a comma-separated list of terms, each either a single
//! page `N` or an inclusive interval `N-M`:
//! - "1" - single page
//! - "1-5" - range of pages (inclusive)
//! - "4,1-2" - pages 4, 1 and 2, in that order
//! - "1-2,2,3" - pages 1, 2 and 3 (the repeated 2 is dropped)
//!
//! Page numbers are 1-indexed. The parsed sequence keeps the order the terms
//! were written in; it is never sorted.
//!
//! Terms are stored as inclusive intervals and only expanded on demand, so
//! a range like `1-4000000000` costs nothing until something iterates it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{PdfCombineError, Result};

/// An ordered, duplicate-free sequence of 1-based page numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    source: String,
    terms: Vec<(u32, u32)>,
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// Whitespace around commas and hyphens is ignored. Later repeats of a
    /// page number already produced by an earlier term are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::InvalidRange`] naming the offending term
    /// when the string or one of its terms is empty, a token is not a
    /// positive integer, an interval is descending, or a term has more than
    /// one hyphen.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfcombine::range::PageRange;
    ///
    /// let range = PageRange::parse("4,1-2").unwrap();
    /// assert_eq!(range.pages(), &[4, 1, 2]);
    ///
    /// assert!(PageRange::parse("3-1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(PdfCombineError::invalid_range(s, s, "is empty"));
        }

        let terms = s
            .split(',')
            .map(|term| parse_term(s, term))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: s.trim().to_string(),
            terms,
        })
    }

    /// The inclusive `(start, end)` terms in the order they were written.
    pub fn terms(&self) -> &[(u32, u32)] {
        &self.terms
    }

    /// Page numbers in the order they were written, with repeats dropped.
    ///
    /// This expands every interval; bound the range first (see
    /// [`max_page`](Self::max_page)) when it comes from user input.
    pub fn pages(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Iterate over the page numbers in order, skipping repeats.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let mut seen = HashSet::new();
        self.terms
            .iter()
            .flat_map(|&(start, end)| start..=end)
            .filter(move |page| seen.insert(*page))
    }

    /// Number of distinct pages in the range.
    pub fn len(&self) -> usize {
        let mut intervals = self.terms.clone();
        intervals.sort_unstable();

        let mut total: u64 = 0;
        let mut covered_to: u64 = 0;
        for (start, end) in intervals {
            let (start, end) = (u64::from(start), u64::from(end));
            if end > covered_to {
                total += end - start.max(covered_to + 1) + 1;
                covered_to = end;
            }
        }
        usize::try_from(total).unwrap_or(usize::MAX)
    }

    /// Always false for a successfully parsed range.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if a page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        self.terms
            .iter()
            .any(|&(start, end)| (start..=end).contains(&page))
    }

    /// Largest page number in the range.
    pub fn max_page(&self) -> Option<u32> {
        self.terms.iter().map(|&(_, end)| end).max()
    }

    /// The range string as it was given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for PageRange {
    type Err = PdfCombineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse one comma-separated term into an inclusive `(start, end)` pair.
fn parse_term(range: &str, term: &str) -> Result<(u32, u32)> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(PdfCombineError::invalid_range(range, term, "is empty"));
    }

    let parts: Vec<&str> = trimmed.split('-').collect();
    match parts.as_slice() {
        [single] => {
            let page = parse_page(range, trimmed, single)?;
            Ok((page, page))
        }
        [start, end] => {
            let start = parse_page(range, trimmed, start)?;
            let end = parse_page(range, trimmed, end)?;
            if start > end {
                return Err(PdfCombineError::invalid_range(
                    range,
                    trimmed,
                    format!("is descending: start page {start} is after end page {end}"),
                ));
            }
            Ok((start, end))
        }
        _ => Err(PdfCombineError::invalid_range(
            range,
            trimmed,
            "has more than one '-'; expected a form like '1-5'",
        )),
    }
}

fn parse_page(range: &str, term: &str, token: &str) -> Result<u32> {
    let token = token.trim();
    if token.is_empty() {
        return Err(PdfCombineError::invalid_range(
            range,
            term,
            "is missing a page number",
        ));
    }

    // `u32::from_str` accepts a leading '+', which is not part of the grammar.
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PdfCombineError::invalid_range(
            range,
            term,
            format!("contains '{token}', which is not a page number"),
        ));
    }

    let page: u32 = token.parse().map_err(|_| {
        PdfCombineError::invalid_range(range, term, format!("page number '{token}' is too large"))
    })?;

    if page == 0 {
        return Err(PdfCombineError::invalid_range(
            range,
            term,
            "uses page 0; page numbers start at 1",
        ));
    }

    Ok(page)
}
