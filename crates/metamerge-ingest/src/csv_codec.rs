//! CSV reading and writing on top of the `csv` crate.

use metamerge_core::CanonicalRow;

use crate::error::IngestError;
use crate::mapper::RawRow;

const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];
const SNIFF_LINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Pick the delimiter that splits the first lines most consistently.
///
/// A candidate must split the first line into more than one field. Among
/// viable candidates the score is the number of sampled lines sharing the
/// first line's field count, times that count. Comma wins ties.
#[must_use]
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best = b',';
    let mut best_score = 0usize;
    for &delimiter in DELIMITERS {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delimiter)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(Result::ok)
                    .map_or(1, |r| r.len())
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }
    best
}

/// Parse a CSV document into header-keyed records.
///
/// Cells past the header width are kept as `column_<n>` (1-based); short
/// records omit their missing cells. Records whose cells are all blank are
/// skipped.
///
/// # Errors
///
/// Returns [`IngestError::Validation`] for empty or header-only input, and
/// [`IngestError::Parse`] with the line number when a record cannot be read.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, IngestError> {
    let parsed = read_records(text, None)?;
    if parsed.rows.is_empty() {
        return Err(IngestError::Validation(
            "CSV has a header row but no data rows".to_string(),
        ));
    }
    tracing::debug!(
        columns = parsed.headers.len(),
        rows = parsed.rows.len(),
        "parsed CSV"
    );
    Ok(parsed)
}

/// Headers plus at most `limit` records. A header-only document yields no
/// records rather than an error.
///
/// # Errors
///
/// Same as [`parse_csv`], except that missing data rows are not an error.
pub fn preview_csv(text: &str, limit: usize) -> Result<ParsedCsv, IngestError> {
    read_records(text, Some(limit))
}

fn read_records(text: &str, limit: Option<usize>) -> Result<ParsedCsv, IngestError> {
    let text = prepare(text)?;
    let mut reader = reader_for(text);
    let headers = headers_of(&mut reader)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        if limit.is_some_and(|n| rows.len() >= n) {
            break;
        }
        let record = result.map_err(parse_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = record
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let header = headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| positional_header(i));
                (header, cell.to_string())
            })
            .collect();
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}

/// Every key used by `rows`, in first-seen order.
#[must_use]
pub fn header_union(rows: &[CanonicalRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

/// Serialize a header row and records as comma-separated text.
///
/// # Errors
///
/// Returns [`IngestError::Write`] if the writer fails.
pub fn write_records(
    headers: &[String],
    records: &[Vec<String>],
) -> Result<String, IngestError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn prepare(text: &str) -> Result<&str, IngestError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(IngestError::Validation("CSV input is empty".to_string()));
    }
    Ok(text)
}

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn headers_of(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, IngestError> {
    let record = reader.headers().map_err(parse_error)?;
    Ok(record
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim_start_matches('\u{FEFF}');
            if h.trim().is_empty() {
                positional_header(i)
            } else {
                h.to_string()
            }
        })
        .collect())
}

fn positional_header(index: usize) -> String {
    format!("column_{}", index + 1)
}

fn parse_error(error: csv::Error) -> IngestError {
    let line = error.position().map_or(0, csv::Position::line);
    IngestError::Parse {
        line,
        reason: error.to_string(),
    }
}

#[cfg(test)]
#[path = "csv_codec_test.rs"]
mod tests;
