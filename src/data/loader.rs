use std::io::Read;
use std::path::Path;

use crate::error::FormatError;

use super::model::{Feature, WineDataset, WineRecord, FEATURE_COUNT, QUALITY_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a wine-quality CSV from disk.
///
/// Expected layout: a header row naming the eleven measurement columns and
/// `quality`, in any order, followed by one numeric row per wine. Empty cells
/// load as `NaN`.
pub fn load_file(path: &Path, delimiter: u8) -> Result<WineDataset, FormatError> {
    let file = std::fs::File::open(path).map_err(|source| FormatError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_reader(file, delimiter)
}

/// Load a wine-quality CSV from any reader.
pub fn load_reader<R: Read>(reader: R, delimiter: u8) -> Result<WineDataset, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(FormatError::Empty);
    }

    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let mut features = [f64::NAN; FEATURE_COUNT];
        for feature in Feature::ALL {
            let cell = record.get(layout.features[feature.index()]).unwrap_or("");
            features[feature.index()] = parse_cell(cell, row_no, feature.column_name())?;
        }
        let cell = record.get(layout.quality).unwrap_or("");
        let quality = parse_cell(cell, row_no, QUALITY_COLUMN)?;

        records.push(WineRecord { features, quality });
    }

    Ok(WineDataset::new(records))
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

/// Position of every known column in the file.
struct ColumnLayout {
    features: [usize; FEATURE_COUNT],
    quality: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Result<Self, FormatError> {
        let mut features: [Option<usize>; FEATURE_COUNT] = [None; FEATURE_COUNT];
        let mut quality = None;

        for (idx, name) in headers.iter().enumerate() {
            let slot = if name == QUALITY_COLUMN {
                &mut quality
            } else if let Some(feature) = Feature::from_column_name(name) {
                &mut features[feature.index()]
            } else {
                return Err(FormatError::UnexpectedColumn(name.clone()));
            };
            if slot.replace(idx).is_some() {
                return Err(FormatError::DuplicateColumn(name.clone()));
            }
        }

        let mut resolved = [0usize; FEATURE_COUNT];
        for feature in Feature::ALL {
            resolved[feature.index()] = features[feature.index()]
                .ok_or_else(|| FormatError::MissingColumn(feature.column_name().to_string()))?;
        }
        let quality = quality.ok_or_else(|| FormatError::MissingColumn(QUALITY_COLUMN.to_string()))?;

        Ok(ColumnLayout {
            features: resolved,
            quality,
        })
    }
}

/// Parse one numeric cell. Empty means missing; anything else must be a number.
fn parse_cell(s: &str, row: usize, column: &str) -> Result<f64, FormatError> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("na") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| FormatError::InvalidValue {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}
