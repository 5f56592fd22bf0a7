//! CSV exports of the evidence table, with encoding and delimiter auto-detection.

use super::{non_empty, RawTable};
use crate::error::{LoadError, LoadResult};

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // latin1 labels resolve to windows-1252, as browsers do
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read CSV bytes into a [`RawTable`], detecting encoding and delimiter.
pub fn read_csv_bytes(bytes: &[u8]) -> LoadResult<RawTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let content = content.trim_start_matches('\u{feff}');

    if content.trim().is_empty() {
        return Err(LoadError::EmptySheet);
    }

    let delimiter = detect_delimiter(content);
    read_csv_str(content, delimiter)
}

/// Read CSV text with an explicit delimiter.
pub fn read_csv_str(content: &str, delimiter: char) -> LoadResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(non_empty).collect());
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_quoted_values_keep_delimiters() {
        let table = read_csv_str("Title,Outcome\n\"Pain, chronic\",Score\n", ',').unwrap();
        assert_eq!(table.headers, vec!["Title", "Outcome"]);
        assert_eq!(table.rows[0][0].as_deref(), Some("Pain, chronic"));
        assert_eq!(table.rows[0][1].as_deref(), Some("Score"));
    }

    #[test]
    fn test_empty_cells_become_none() {
        let table = read_csv_str("a;b;c\n1;;3\n", ';').unwrap();
        assert_eq!(table.rows[0], vec![Some("1".into()), None, Some("3".into())]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "País" in ISO-8859-1
        let bytes: &[u8] = &[0x50, 0x61, 0xED, 0x73];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "País");
    }

    #[test]
    fn test_latin1_keeps_currency_and_fraction_signs() {
        let bytes: &[u8] = &[0xA4, 0x20, 0xBD];
        assert_eq!(decode_content(bytes, "iso-8859-1"), "¤ ½");
        assert_eq!(decode_content(bytes, "latin1"), "¤ ½");
    }

    #[test]
    fn test_empty_bytes_is_error() {
        let err = read_csv_bytes(b"   \n").unwrap_err();
        assert!(matches!(err, LoadError::EmptySheet));
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = read_csv_bytes("\u{feff}Title;Year\nA;2020\n".as_bytes()).unwrap();
        assert_eq!(table.headers[0], "Title");
    }
}
