use crate::process::Cell;

/// An untyped grid of cells from one uploaded file, anchored at `A1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    /// Each spreadsheet row; rows may be ragged.
    rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (`row`, `col`); out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

impl<R> FromIterator<R> for RawSheet
where
    R: IntoIterator,
    R::Item: Into<Cell>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        RawSheet::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
