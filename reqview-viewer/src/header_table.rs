use reqview_core::HeaderEntry;

use crate::error::ViewerError;

/// Grid-like editing surface. Implemented by the headers tab so front-ends
/// can render and edit it without knowing its row model.
pub trait TabularEditor {
    type Column: Copy;

    fn columns(&self) -> &[Self::Column];
    fn row_count(&self) -> usize;
    fn cell(&self, row: usize, column: Self::Column) -> Option<&str>;
    fn is_column_editable(&self, column: Self::Column) -> bool;
    fn set_cell(
        &mut self,
        row: usize,
        column: Self::Column,
        value: &str,
    ) -> Result<(), ViewerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderColumn {
    Name,
    Value,
}

impl HeaderColumn {
    pub fn title(self) -> &'static str {
        match self {
            HeaderColumn::Name => "Name",
            HeaderColumn::Value => "Value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    MoveUp,
    MoveDown,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::MoveUp, RowAction::MoveDown, RowAction::Delete];

    pub fn icon(self) -> &'static str {
        match self {
            RowAction::MoveUp => "go-up",
            RowAction::MoveDown => "go-down",
            RowAction::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowAction::MoveUp => "Move up",
            RowAction::MoveDown => "Move down",
            RowAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub entry: HeaderEntry,
}

impl HeaderRow {
    pub fn actions(&self) -> [RowAction; 3] {
        RowAction::ALL
    }
}

const COLUMNS: [HeaderColumn; 2] = [HeaderColumn::Name, HeaderColumn::Value];

#[derive(Debug, Clone, Default)]
pub struct HeaderTable {
    rows: Vec<HeaderRow>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, headers: &[HeaderEntry]) {
        self.rows = headers
            .iter()
            .cloned()
            .map(|entry| HeaderRow { entry })
            .collect();
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[HeaderRow] {
        &self.rows
    }

    pub fn entries(&self) -> Vec<HeaderEntry> {
        self.rows.iter().map(|row| row.entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn edit(&mut self, row: usize, new_value: &str) -> Result<(), ViewerError> {
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(ViewerError::RowOutOfRange { row, len })?;
        tracing::info!(
            row,
            name = %target.entry.name,
            old = %target.entry.value,
            new = %new_value,
            "header value edited"
        );
        target.entry.value = new_value.to_string();
        Ok(())
    }

    pub fn add(&mut self, name: &str, value: &str) {
        self.rows.push(HeaderRow {
            entry: HeaderEntry::new(name, value),
        });
    }

    /// Moving the first row up or the last row down leaves the table as is.
    pub fn apply(&mut self, row: usize, action: RowAction) -> Result<(), ViewerError> {
        let len = self.rows.len();
        if row >= len {
            return Err(ViewerError::RowOutOfRange { row, len });
        }
        match action {
            RowAction::MoveUp => {
                if row > 0 {
                    self.rows.swap(row, row - 1);
                }
            }
            RowAction::MoveDown => {
                if row + 1 < len {
                    self.rows.swap(row, row + 1);
                }
            }
            RowAction::Delete => {
                self.rows.remove(row);
            }
        }
        Ok(())
    }
}

impl TabularEditor for HeaderTable {
    type Column = HeaderColumn;

    fn columns(&self) -> &[HeaderColumn] {
        &COLUMNS
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: HeaderColumn) -> Option<&str> {
        let row = self.rows.get(row)?;
        Some(match column {
            HeaderColumn::Name => row.entry.name.as_str(),
            HeaderColumn::Value => row.entry.value.as_str(),
        })
    }

    fn is_column_editable(&self, column: HeaderColumn) -> bool {
        column == HeaderColumn::Value
    }

    fn set_cell(&mut self, row: usize, column: HeaderColumn, value: &str) -> Result<(), ViewerError> {
        match column {
            HeaderColumn::Name => Err(ViewerError::ColumnNotEditable(column.title())),
            HeaderColumn::Value => self.edit(row, value),
        }
    }
}
