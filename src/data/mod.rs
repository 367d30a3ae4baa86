//! Training-input loading
//!
//! Reads labeled review records from a flat CSV source. Required columns:
//! `review_text` (string, empty cells coerced to "") and `rating` (1–5).
//! Optional columns: `sentiment` (overrides derived labeling) and
//! `review_date`.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, SentimentError};
use crate::types::{ReviewRecord, Sentiment};

/// CSV row shape. Kept separate from [`ReviewRecord`] so column naming and
/// defaulting stay a concern of this module.
#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    review_text: String,
    rating: u8,
    #[serde(default)]
    sentiment: Option<Sentiment>,
    #[serde(default)]
    review_date: Option<NaiveDate>,
}

/// Load review records from a CSV file.
///
/// Fails with [`SentimentError::Io`] when the file cannot be opened and
/// [`SentimentError::Record`] (carrying the zero-based record index) when a
/// row cannot be parsed.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ReviewRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SentimentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for (index, row) in reader.deserialize().enumerate() {
        let raw: RawReview = row.map_err(|source| SentimentError::Record { index, source })?;
        records.push(ReviewRecord {
            text: raw.review_text,
            rating: raw.rating,
            sentiment: raw.sentiment,
            review_date: raw.review_date,
        });
    }
    Ok(records)
}
