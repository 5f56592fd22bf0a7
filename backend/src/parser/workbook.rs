//! Excel / ODS workbooks through calamine.

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};

use super::RawTable;
use crate::error::{LoadError, LoadResult};

/// Render a cell as text.
pub fn cell_to_string(cell: &DataType) -> String {
    use calamine::DataType as Ct;
    match cell {
        Ct::String(s) => s.clone(),
        Ct::Empty => String::new(),
        Ct::Bool(b) => b.to_string(),
        Ct::Error(e) => format!("ERR({e:?})"),
        Ct::Float(n) | Ct::Duration(n) => n.to_string(),
        Ct::Int(i) => i.to_string(),
        Ct::DateTime(f) => f.to_string(),
        Ct::DateTimeIso(s) | Ct::DurationIso(s) => s.clone(),
    }
}

/// Cell as optional text: empty and blank cells are `None`.
pub fn cell_to_option(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        other => super::non_empty(&cell_to_string(other)),
    }
}

/// Read the first worksheet; its first row is the header.
pub fn read_workbook(path: &Path) -> LoadResult<RawTable> {
    if !path.exists() {
        return Err(LoadError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }

    let mut wb = open_workbook_auto(path)?;
    let range = wb.worksheet_range_at(0).ok_or(LoadError::NoWorksheet)??;

    table_from_cells(range.rows())
}

/// Build a [`RawTable`] from worksheet rows.
pub fn table_from_cells<'a, I>(mut rows: I) -> LoadResult<RawTable>
where
    I: Iterator<Item = &'a [DataType]>,
{
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::EmptySheet)?
        .iter()
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(cell_to_option).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&DataType::Float(2019.0)), "2019");
        assert_eq!(cell_to_string(&DataType::Int(7)), "7");
        assert_eq!(cell_to_string(&DataType::String("Alto".into())), "Alto");
        assert_eq!(cell_to_string(&DataType::Empty), "");
    }

    #[test]
    fn test_cell_to_option() {
        assert_eq!(cell_to_option(&DataType::Empty), None);
        assert_eq!(cell_to_option(&DataType::String("  ".into())), None);
        assert_eq!(cell_to_option(&DataType::String(" Brazil ".into())), Some("Brazil".into()));
    }

    #[test]
    fn test_table_from_cells() {
        let sheet = vec![
            vec![DataType::String("Title ".into()), DataType::String("Year".into())],
            vec![DataType::String("Study A".into()), DataType::Float(2020.0)],
            vec![DataType::Empty, DataType::Int(2021)],
        ];
        let table = table_from_cells(sheet.iter().map(|r| r.as_slice())).unwrap();

        assert_eq!(table.headers, vec!["Title", "Year"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1].as_deref(), Some("2020"));
        assert_eq!(table.rows[1][0], None);
    }

    #[test]
    fn test_empty_sheet() {
        let sheet: Vec<Vec<DataType>> = Vec::new();
        let err = table_from_cells(sheet.iter().map(|r| r.as_slice())).unwrap_err();
        assert!(matches!(err, LoadError::EmptySheet));
    }

    #[test]
    fn test_missing_workbook() {
        let err = read_workbook(Path::new("/nonexistent/mapa.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
