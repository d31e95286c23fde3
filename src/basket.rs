//! Loading baskets from CSV.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::StringRecord;
use tracing::debug;

use crate::{error::Result, types::Basket};

/// Read one basket per CSV row.
///
/// There is no header row and rows may have any number of fields. Fields are
/// trimmed and blank ones dropped; a blank line or a row of blank fields is an
/// empty basket and still counts toward the total. Quoted fields may span
/// lines.
pub fn read_baskets<R: Read>(mut reader: R) -> Result<Vec<Basket>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut baskets = Vec::new();
    let mut row = String::new();
    for line in text.split_inclusive('\n') {
        row.push_str(line);
        // an odd number of quotes leaves a quoted field open past this newline
        if row.matches('"').count() % 2 == 1 {
            continue;
        }
        baskets.push(parse_row(&row)?);
        row.clear();
    }
    if !row.is_empty() {
        baskets.push(parse_row(&row)?);
    }

    Ok(baskets)
}

/// The csv reader skips empty lines, so each row is parsed on its own and an
/// empty line leaves `record` empty.
fn parse_row(row: &str) -> Result<Basket> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());

    let mut record = StringRecord::new();
    csv_reader.read_record(&mut record)?;

    Ok(record
        .iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect())
}

pub fn load_baskets(path: impl AsRef<Path>) -> Result<Vec<Basket>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let baskets = read_baskets(BufReader::new(file))?;
    debug!(path = %path.display(), baskets = baskets.len(), "Loaded baskets");
    Ok(baskets)
}
