use std::{collections::HashMap, io, path::Path};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::fields::{ColumnBindings, FieldKind, LogicalField};

/// A CSV file held column by column. Every cell is text; missing cells
/// are stored as empty strings.
#[derive(Debug, Default)]
pub(crate) struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
    len: usize,
}

impl Table {
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub(crate) fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = reader
            .headers()
            .context("failed to read the header row")?
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut columns = vec![Vec::new(); headers.len()];

        let mut len = 0;
        for record in reader.records() {
            let record = record.with_context(|| format!("invalid record at row {}", len + 1))?;
            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or_default().to_string());
            }
            len += 1;
        }

        Ok(Self {
            headers,
            columns,
            len,
        })
    }

    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Cells of the first column named `name`.
    pub(crate) fn column(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Cells of `row` in header order.
    pub(crate) fn row(&self, row: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.get(row).cloned().unwrap_or_default())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

/// The loaded table together with its logical column bindings. Immutable
/// once built.
#[derive(Debug, Default)]
pub(crate) struct Dataset {
    table: Table,
    bindings: ColumnBindings,
    codes: HashMap<LogicalField, Vec<Option<i64>>>,
}

impl Dataset {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let table = Table::from_path(path)?;
        info!("Loaded {} job postings from {}", table.len(), path.display());
        Ok(Self::new(table))
    }

    /// Binds logical fields to columns and parses numeric fields.
    ///
    /// A numeric field stays numeric while most of its non-blank cells are
    /// integer codes; the remaining cells carry no code. Otherwise the
    /// column is read as text labels.
    pub(crate) fn new(table: Table) -> Self {
        let bindings = ColumnBindings::resolve(table.headers());
        let mut codes = HashMap::new();

        for field in LogicalField::ALL {
            let Some(name) = bindings.get(field) else {
                warn!("No column found for {field:?}; tried {:?}", field.candidates());
                continue;
            };
            if field.kind() != FieldKind::NumericCode {
                continue;
            }
            let cells = table.column(name).unwrap_or_default();
            let (parsed, rejected) = parse_codes(cells);
            let filled = cells.iter().filter(|cell| !cell.trim().is_empty()).count();
            if !rejected.is_empty() && rejected.len() * 2 >= filled {
                warn!("Column `{name}` is not numeric; {field:?} is filtered as text");
                continue;
            }
            if let Some(sample) = rejected.first() {
                warn!(
                    "Column `{name}` has {} non-numeric values such as {sample:?}; \
                     those rows carry no {field:?} code",
                    rejected.len()
                );
            }
            codes.insert(field, parsed);
        }

        for (field, name) in bindings.iter() {
            info!("{field:?} is bound to column `{name}`");
        }

        Self {
            table,
            bindings,
            codes,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn bindings(&self) -> &ColumnBindings {
        &self.bindings
    }

    pub(crate) fn table(&self) -> &Table {
        &self.table
    }

    /// How a resolved field is compared. A numeric field whose column did
    /// not hold codes is compared as text.
    pub(crate) fn kind(&self, field: LogicalField) -> Option<FieldKind> {
        self.bindings.get(field)?;
        if self.codes.contains_key(&field) {
            Some(FieldKind::NumericCode)
        } else {
            Some(FieldKind::Text)
        }
    }

    /// Text cells of a resolved field.
    pub(crate) fn text(&self, field: LogicalField) -> Option<&[String]> {
        self.bindings
            .get(field)
            .and_then(|name| self.table.column(name))
    }

    /// Parsed codes of a resolved numeric field.
    pub(crate) fn codes(&self, field: LogicalField) -> Option<&[Option<i64>]> {
        self.codes.get(&field).map(Vec::as_slice)
    }

    /// The cell of `field` at `row`, or `None` when the field is unresolved
    /// or the cell is empty.
    pub(crate) fn text_at(&self, field: LogicalField, row: usize) -> Option<&str> {
        self.text(field)
            .and_then(|cells| cells.get(row))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    pub(crate) fn code_at(&self, field: LogicalField, row: usize) -> Option<i64> {
        self.codes(field).and_then(|codes| codes.get(row).copied().flatten())
    }
}

/// Parses every cell, returning the codes and the cells that were not codes.
fn parse_codes(cells: &[String]) -> (Vec<Option<i64>>, Vec<&str>) {
    let mut rejected = Vec::new();
    let codes = cells
        .iter()
        .map(|cell| {
            parse_code(cell).unwrap_or_else(|| {
                rejected.push(cell.as_str());
                None
            })
        })
        .collect();
    (codes, rejected)
}

/// Parses an integer code. Integral floats such as `50.0` are accepted;
/// an empty cell has no code.
fn parse_code(cell: &str) -> Option<Option<i64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(None);
    }
    if let Ok(code) = cell.parse::<i64>() {
        return Some(Some(code));
    }
    let value = cell.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        num_traits::ToPrimitive::to_i64(&value).map(Some)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn dataset_from_csv(csv: &str) -> Dataset {
    Dataset::new(Table::from_reader(csv.as_bytes()).unwrap())
}
