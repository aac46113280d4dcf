//! Parsing of user-provided row indices.
//!
//! [`IndexParser`] turns input like `1 3-5,8` into a sorted, de-duplicated
//! list of 1-based indices and checks it against the number of rows on
//! screen.
//!
//! # Supported Formats
//! - **Single indices**: `1`, `3`
//! - **Space or comma separated**: `1 3 5`, `1,3,5`
//! - **Inclusive ranges**: `3-6`
//! - **Mixed**: `1 3-5,8`

use crate::core::error::{ExplorerError, Result};
use std::collections::BTreeSet;

pub struct IndexParser;

impl IndexParser {
    /// Parse `input` into sorted, unique indices.
    ///
    /// Ranges are expanded no further than one past `max_index`, which is
    /// enough for [`validate`](Self::validate) to report them out of range.
    pub fn parse(input: &str, max_index: usize) -> Result<Vec<usize>> {
        let limit = max_index.saturating_add(1);
        let mut indices = BTreeSet::new();

        for part in input.split([' ', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_number(start, part)?;
                    let end = parse_number(end, part)?;
                    if start > end {
                        return Err(ExplorerError::invalid_range_order(start, end));
                    }
                    if start > limit {
                        indices.insert(start);
                    } else {
                        indices.extend(start..=end.min(limit));
                    }
                }
                None => {
                    let value = part
                        .parse()
                        .map_err(|_| ExplorerError::invalid_index_format(part))?;
                    indices.insert(value);
                }
            }
        }

        Ok(indices.into_iter().collect())
    }

    pub fn validate(indices: &[usize], max_index: usize) -> Result<()> {
        if max_index == 0 {
            return Err(ExplorerError::NoDisplayedEntities);
        }

        for &index in indices {
            if index == 0 {
                return Err(ExplorerError::ZeroIndex);
            }
            if index > max_index {
                return Err(ExplorerError::index_out_of_range(index, max_index));
            }
        }
        Ok(())
    }

    /// Parse CLI arguments (`["1", "3-5,8"]`) and validate them against the
    /// number of displayed rows.
    pub fn parse_args(args: &[String], max_index: usize) -> Result<Vec<usize>> {
        if args.is_empty() {
            return Err(ExplorerError::NoIndicesProvided);
        }

        let indices = Self::parse(&args.join(" "), max_index)?;
        if indices.is_empty() {
            return Err(ExplorerError::NoIndicesProvided);
        }

        Self::validate(&indices, max_index)?;
        Ok(indices)
    }
}

fn parse_number(text: &str, range: &str) -> Result<usize> {
    let text = text.trim();
    if text.is_empty() || text.contains('-') {
        return Err(ExplorerError::invalid_range_format(range));
    }
    text.parse()
        .map_err(|_| ExplorerError::invalid_range_format(range))
}
