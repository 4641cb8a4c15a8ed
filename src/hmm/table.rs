//!
//! Table definitions
//!
//! ## Table
//!
//! the prob assigned for each (row, state)
//!
//! F[t][s], B[t][s] or G[t][s], where a row is usually a time step.
//!
use crate::prob::Prob;
use std::ops::{Index, IndexMut};

///
/// Dense 2D table of `Prob`, stored row-major.
///
/// Rows are time steps for Forward/Backward/Viterbi and columns are
/// state indices. A fresh table is allocated for each calculation.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    n_cols: usize,
    cells: Vec<Prob>,
}

/// Constructors of Table
impl Table {
    pub fn new(n_rows: usize, n_cols: usize, value: Prob) -> Self {
        Table {
            n_cols,
            cells: vec![value; n_rows * n_cols],
        }
    }
    pub fn zero(n_rows: usize, n_cols: usize) -> Self {
        Table::new(n_rows, n_cols, Prob::zero())
    }
}

/// Accessors of Table
impl Table {
    /// number of rows (e.g. time steps)
    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.cells.len() / self.n_cols
        }
    }
    /// number of columns (e.g. states)
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
    pub fn row(&self, row: usize) -> &[Prob] {
        &self.cells[row * self.n_cols..(row + 1) * self.n_cols]
    }
    pub fn row_mut(&mut self, row: usize) -> &mut [Prob] {
        &mut self.cells[row * self.n_cols..(row + 1) * self.n_cols]
    }
    /// the last row, if any
    pub fn last_row(&self) -> Option<&[Prob]> {
        match self.n_rows() {
            0 => None,
            n => Some(self.row(n - 1)),
        }
    }
    /// `\sum_s T[row][s]`
    pub fn row_sum(&self, row: usize) -> Prob {
        self.row(row).iter().sum()
    }
    /// `\sum_t T[t][col]` over the rows in the range
    pub fn col_sum(&self, col: usize, rows: std::ops::Range<usize>) -> Prob {
        rows.map(|t| self[(t, col)]).sum()
    }
    /// Convert into linear-scale values, row by row
    pub fn to_values(&self) -> Vec<Vec<f64>> {
        (0..self.n_rows())
            .map(|t| self.row(t).iter().map(|p| p.to_value()).collect())
            .collect()
    }
}

impl Index<(usize, usize)> for Table {
    type Output = Prob;
    fn index(&self, (row, col): (usize, usize)) -> &Prob {
        assert!(col < self.n_cols);
        &self.cells[row * self.n_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Table {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Prob {
        assert!(col < self.n_cols);
        &mut self.cells[row * self.n_cols + col]
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Header
        for s in 0..self.n_cols {
            write!(f, "\t{}", s)?;
        }
        writeln!(f)?;
        for t in 0..self.n_rows() {
            write!(f, "{}", t)?;
            for p in self.row(t) {
                write!(f, "\t{:.4}", p.to_value())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
