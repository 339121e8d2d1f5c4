//! Lesson 6: two-dimensional lists.
//!
//! A matrix owns a vector of row handles. Rows are lists in their own right,
//! so handing a row out shares it: writing through the returned row writes
//! into the matrix.

use crate::error::{LessonError, Result};
use crate::report::Report;
use crate::value::{normalize_index, ListRef, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: Vec<ListRef>,
}

/// Builds a matrix from `rows`, copying each row so the source is never
/// written through.
pub fn create_matrix(rows: &[ListRef]) -> Matrix {
    Matrix {
        rows: rows.iter().map(ListRef::copy).collect(),
    }
}

/// Convenience for integer literals in walkthroughs and tests.
pub fn from_ints<R: AsRef<[i64]>>(rows: &[R]) -> Matrix {
    Matrix {
        rows: rows
            .iter()
            .map(|row| ListRef::from_vec(row.as_ref().iter().copied().map(Value::from).collect()))
            .collect(),
    }
}

impl Matrix {
    fn row_slot(&self, row: isize) -> Result<usize> {
        normalize_index(row, self.rows.len())
            .ok_or_else(|| LessonError::out_of_range(row, self.rows.len()))
    }

    pub fn rows(&self) -> &[ListRef] {
        &self.rows
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn get_cell(&self, row: isize, col: isize) -> Option<Value> {
        self.get_row(row).and_then(|r| r.get(col))
    }

    /// The row itself, not a copy.
    pub fn get_row(&self, row: isize) -> Option<ListRef> {
        normalize_index(row, self.rows.len()).map(|i| self.rows[i].clone())
    }

    /// `None` as soon as one row is too short for `col`.
    pub fn get_column(&self, col: isize) -> Option<Vec<Value>> {
        self.rows.iter().map(|row| row.get(col)).collect()
    }

    // =========================================================================
    // Update
    // =========================================================================

    pub fn update_cell(&mut self, row: isize, col: isize, value: impl Into<Value>) -> Result<&mut Self> {
        let slot = self.row_slot(row)?;
        self.rows[slot].set(col, value.into())?;
        Ok(self)
    }

    /// Replaces a whole row. The matrix keeps `new_row` itself, so later
    /// writes through the caller's handle show up here too.
    pub fn update_row(&mut self, row: isize, new_row: ListRef) -> Result<&mut Self> {
        let slot = self.row_slot(row)?;
        self.rows[slot] = new_row;
        Ok(self)
    }

    // =========================================================================
    // Add / remove
    // =========================================================================

    pub fn add_row(&mut self, row: ListRef) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn remove_row(&mut self, row: isize) -> Result<ListRef> {
        let slot = self.row_slot(row)?;
        Ok(self.rows.remove(slot))
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn has_columns(&self) -> bool {
        self.rows.first().is_some_and(|row| !row.is_empty())
    }

    /// `(rows, columns of the first row)`.
    pub fn matrix_shape(&self) -> (usize, usize) {
        match self.rows.first() {
            Some(first) => (self.rows.len(), first.len()),
            None => (0, 0),
        }
    }
}

impl From<&Matrix> for Value {
    fn from(matrix: &Matrix) -> Self {
        Value::list(matrix.rows.iter().cloned())
    }
}

pub fn walkthrough(report: &mut Report) {
    report.section("Two-dimensional lists");

    let mut m = from_ints(&[[1, 2], [3, 4]]);
    report.show("matrix", Value::from(&m));
    report.check("get_cell(0, 1) = 2", m.get_cell(0, 1) == Some(Value::from(2)));
    report.check("get_column(0) = [1, 3]", m.get_column(0) == Some(vec![Value::from(1), Value::from(3)]));
    report.check("get_cell(5, 0) is None", m.get_cell(5, 0).is_none());

    let wrote = m.get_row(0).map(|row| row.set(0, Value::from(10)));
    report.check("set(0, 10) on row 0 succeeds", matches!(wrote, Some(Ok(()))));
    report.check("writing through get_row changes the matrix", m.get_cell(0, 0) == Some(Value::from(10)));

    report.check("update_cell(9, 0) fails", m.update_cell(9, 0, 1).is_err());
    report.check("shape is (2, 2)", m.matrix_shape() == (2, 2));

    let original = from_ints(&[[1, 2], [3, 4]]);
    let copied = create_matrix(original.rows());
    let wrote = copied.rows().first().map(|row| row.set(0, Value::from(99)));
    report.check("set(0, 99) on the copy succeeds", matches!(wrote, Some(Ok(()))));
    report.check("create_matrix copies every row", original.get_cell(0, 0) == Some(Value::from(1)));
    report.note("Copying the outer list alone would still share the rows.");
}
