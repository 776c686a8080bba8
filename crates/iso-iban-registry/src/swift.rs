//! Parser for the SWIFT IBAN registry release file.
//!
//! SWIFT publishes the ISO 13616 registry as a tab-separated text file that
//! is anything but machine friendly: prose columns, multi-country rows, and
//! field positions spelled out as sentences ("Positions 1-5. Branch
//! identifier positions: 6-10"). This module extracts what the engine needs:
//!
//! - column 0: country name
//! - column 1: 2-letter code(s); territories share one row
//! - column 4: BBAN structure, column 5: BBAN length
//! - column 6: bank/branch identifier positions (prose, 1-based in the BBAN)
//! - column 11: IBAN structure, column 12: IBAN length
//!
//! Rows that do not yield these fields are skipped with a warning; a row
//! that yields them but fails specification validation is a hard error, as
//! the table would silently misvalidate IBANs otherwise.
//!
//! The file is consumed as `&str`; decoding the release's legacy encoding
//! (historically Windows-1252) is the caller's concern.

use std::fs;
use std::path::Path;

use iso_iban::{FieldRange, Specification, SpecificationTable};
use tracing::{info, warn};

use crate::error::RegistryError;

const COL_COUNTRY_NAME: usize = 0;
const COL_COUNTRY_CODES: usize = 1;
const COL_BBAN_STRUCTURE: usize = 4;
const COL_BBAN_LENGTH: usize = 5;
const COL_POSITIONS: usize = 6;
const COL_IBAN_STRUCTURE: usize = 11;
const COL_IBAN_LENGTH: usize = 12;

/// Parse the registry release text into a specification table.
///
/// The first line (column headers) is ignored.
pub fn parse_swift_registry(text: &str) -> Result<SpecificationTable, RegistryError> {
    let mut table = SpecificationTable::new();

    for (number, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let columns: Vec<&str> = line.split('\t').collect();
        let Some(row) = read_row(&columns) else {
            warn!(line = number + 1, "skipping unusable registry row");
            continue;
        };

        for code in &row.codes {
            // Territories listed on a shared row reuse the primary
            // country's structure with their own prefix.
            let structure = extract_structure(row.iban_structure_raw, code)
                .or_else(|| {
                    extract_structure(row.iban_structure_raw, row.codes[0])
                        .map(|primary| format!("{code}{}", &primary[2..]))
                });
            let Some(structure) = structure else {
                warn!(line = number + 1, code, "no IBAN structure found for code");
                continue;
            };

            let specification = Specification::new(
                row.name,
                code,
                &structure,
                row.iban_length,
                &row.bban_structure,
                row.bban_length,
                row.bank,
                row.branch,
            )?;
            table.insert(specification);
        }
    }

    if table.is_empty() {
        return Err(RegistryError::Empty);
    }
    info!(countries = table.len(), "loaded specification table from SWIFT registry");
    Ok(table)
}

/// Read the registry release from a file.
pub fn load_swift_registry(path: impl AsRef<Path>) -> Result<SpecificationTable, RegistryError> {
    let text = fs::read_to_string(path)?;
    parse_swift_registry(&text)
}

struct Row<'l> {
    name: &'l str,
    codes: Vec<&'l str>,
    bban_structure: String,
    bban_length: usize,
    iban_structure_raw: &'l str,
    iban_length: usize,
    bank: Option<FieldRange>,
    branch: Option<FieldRange>,
}

fn read_row<'l>(columns: &[&'l str]) -> Option<Row<'l>> {
    if columns.len() <= COL_IBAN_LENGTH {
        return None;
    }
    let name = columns[COL_COUNTRY_NAME].trim();
    let codes = extract_codes(columns[COL_COUNTRY_CODES]);
    if name.is_empty() || codes.is_empty() {
        return None;
    }
    let bban_structure = leading_structure(columns[COL_BBAN_STRUCTURE].trim());
    let bban_length = leading_number(columns[COL_BBAN_LENGTH])?;
    let iban_length = leading_number(columns[COL_IBAN_LENGTH])?;

    let positions = columns[COL_POSITIONS];
    let bank = position_pair(positions).map(to_field_range);
    let branch = positions
        .find("Branch identifier position")
        .and_then(|at| position_pair(&positions[at..]))
        .map(to_field_range);

    Some(Row {
        name,
        codes,
        bban_structure,
        bban_length,
        iban_structure_raw: columns[COL_IBAN_STRUCTURE],
        iban_length,
        bank,
        branch,
    })
}

/// Registry positions are 1-based within the BBAN; the compact IBAN offset
/// is 3 further along (2 country letters + 2 check digits - 1 for the base).
fn to_field_range((from, to): (usize, usize)) -> FieldRange {
    FieldRange::new(from + 3, to + 3)
}

/// Every standalone 2-letter uppercase code in the column (rows for shared
/// formats list several, e.g. "FR GF GP MQ RE").
fn extract_codes(column: &str) -> Vec<&str> {
    column
        .split(|c: char| !c.is_ascii_uppercase())
        .filter(|part| part.len() == 2)
        .collect()
}

/// The structure for `code`: the code itself followed by the longest run of
/// descriptor characters.
fn extract_structure(raw: &str, code: &str) -> Option<String> {
    let at = raw.find(code)?;
    let tail = &raw[at + code.len()..];
    let end = tail
        .find(|c: char| !matches!(c, 'a' | 'c' | 'e' | 'n' | '!' | '0'..='9'))
        .unwrap_or(tail.len());
    Some(format!("{code}{}", &tail[..end]))
}

/// Longest leading run of descriptor characters.
fn leading_structure(column: &str) -> String {
    let end = column
        .find(|c: char| !matches!(c, 'a' | 'c' | 'e' | 'n' | '!' | '0'..='9'))
        .unwrap_or(column.len());
    column[..end].to_string()
}

fn leading_number(column: &str) -> Option<usize> {
    let trimmed = column.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// The first "N-N" pair in a prose positions column.
fn position_pair(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'-') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            let from: usize = text[start..i].parse().ok()?;
            i += 1;
            let second_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let to: usize = text[second_start..i].parse().ok()?;
            return Some((from, to));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_line(
        name: &str,
        codes: &str,
        bban_structure: &str,
        bban_length: usize,
        positions: &str,
        iban_structure: &str,
        iban_length: usize,
    ) -> String {
        let mut columns = vec![String::new(); 13];
        columns[COL_COUNTRY_NAME] = name.to_string();
        columns[COL_COUNTRY_CODES] = codes.to_string();
        columns[COL_BBAN_STRUCTURE] = bban_structure.to_string();
        columns[COL_BBAN_LENGTH] = bban_length.to_string();
        columns[COL_POSITIONS] = positions.to_string();
        columns[COL_IBAN_STRUCTURE] = iban_structure.to_string();
        columns[COL_IBAN_LENGTH] = iban_length.to_string();
        columns.join("\t")
    }

    #[test]
    fn test_parse_single_country_row() {
        let text = format!(
            "HEADER\n{}",
            registry_line(
                "Switzerland", "CH", "5!n12!c", 17,
                "Positions 1-5", "CH2!n5!n12!c", 21,
            )
        );
        let table = parse_swift_registry(&text).unwrap();
        let spec = table.get("CH").unwrap();
        assert_eq!(spec.structure(), "CH2!n5!n12!c");
        assert_eq!(spec.bank_range().map(|r| (r.from, r.to)), Some((4, 8)));
        assert_eq!(spec.branch_range(), None);
    }

    #[test]
    fn test_parse_branch_positions() {
        let text = format!(
            "HEADER\n{}",
            registry_line(
                "United Kingdom", "GB", "4!a6!n8!n", 18,
                "Positions 1-4, Branch identifier positions: 5-10",
                "GB2!n4!a6!n8!n", 22,
            )
        );
        let table = parse_swift_registry(&text).unwrap();
        let spec = table.get("GB").unwrap();
        assert_eq!(spec.bank_range().map(|r| (r.from, r.to)), Some((4, 7)));
        assert_eq!(spec.branch_range().map(|r| (r.from, r.to)), Some((8, 13)));
    }

    #[test]
    fn test_shared_row_reuses_primary_structure() {
        let text = format!(
            "HEADER\n{}",
            registry_line(
                "France", "FR Includes: GF, GP, MQ", "5!n5!n11!c2!n", 23,
                "Positions 1-5", "FR2!n5!n5!n11!c2!n", 27,
            )
        );
        let table = parse_swift_registry(&text).unwrap();
        assert_eq!(table.get("FR").unwrap().structure(), "FR2!n5!n5!n11!c2!n");
        assert_eq!(table.get("GP").unwrap().structure(), "GP2!n5!n5!n11!c2!n");
        assert_eq!(
            table.get("MQ").unwrap().bank_range(),
            table.get("FR").unwrap().bank_range()
        );
    }

    #[test]
    fn test_unusable_rows_are_skipped() {
        let text = format!(
            "HEADER\nnot\ta\tuseful\trow\n{}",
            registry_line(
                "Switzerland", "CH", "5!n12!c", 17,
                "Positions 1-5", "CH2!n5!n12!c", 21,
            )
        );
        let table = parse_swift_registry(&text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        assert!(matches!(
            parse_swift_registry("HEADER\n"),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn test_position_pair_scans_past_prose() {
        assert_eq!(position_pair("Positions 1-5"), Some((1, 5)));
        assert_eq!(position_pair("ISO 13616 positions: 10-14"), Some((10, 14)));
        assert_eq!(position_pair("1, then 2-3"), Some((2, 3)));
        assert_eq!(position_pair("no positions here"), None);
    }
}
