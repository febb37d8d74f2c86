use crate::domain::model::{Cell, PageTables, Record, RecordSet, TableGrid};

fn cell_text(cell: &Cell) -> String {
    cell.as_deref().unwrap_or_default().trim().to_string()
}

/// Turns one table into header-keyed records.
///
/// Row 0 supplies the keys. Cells past the header width are dropped and a
/// short row simply yields fewer keys. When two header cells carry the same
/// text the later column's value wins. Rows that produce no entries at all
/// are skipped.
pub fn flatten_table(table: &TableGrid) -> RecordSet {
    let Some((header_row, data_rows)) = table.split_first() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    data_rows
        .iter()
        .filter_map(|row| {
            let record: Record = headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.clone(), cell_text(cell)))
                .collect();
            (!record.is_empty()).then_some(record)
        })
        .collect()
}

/// Flattens every table of every page, preserving page then row order.
pub fn flatten_pages(pages: &[PageTables]) -> RecordSet {
    pages
        .iter()
        .flat_map(|page| page.tables.iter())
        .flat_map(flatten_table)
        .collect()
}
