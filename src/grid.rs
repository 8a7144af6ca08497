//! Read-only grid: passability plus the ASCII loader that builds one.

use std::fs;

use crate::error::MapfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Blocked,
}

/// An immutable, row-major 2D grid. Every row has exactly `width` cells.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn passable(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cells[y][x] == Cell::Free
    }

    /// Parses the row-strings format used throughout this crate's fixtures:
    /// `.` is free, `#` is blocked. Every line must be non-empty and all
    /// lines must share the same length.
    pub fn from_ascii_lines<S: AsRef<str>>(lines: &[S]) -> Result<Grid, MapfError> {
        if lines.is_empty() {
            return Err(MapfError::InvalidGrid("grid has no rows".to_string()));
        }

        let width = lines[0].as_ref().len();
        if width == 0 {
            return Err(MapfError::InvalidGrid("grid rows are empty".to_string()));
        }

        let mut cells = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != width {
                return Err(MapfError::InvalidGrid(format!(
                    "row {y} has length {} but expected {width}",
                    line.len()
                )));
            }

            let mut row = Vec::with_capacity(width);
            for (x, ch) in line.chars().enumerate() {
                row.push(match ch {
                    '.' => Cell::Free,
                    '#' => Cell::Blocked,
                    other => {
                        return Err(MapfError::InvalidGrid(format!(
                            "unrecognized cell '{other}' at ({x}, {y})"
                        )))
                    }
                });
            }
            cells.push(row);
        }

        Ok(Grid {
            width,
            height: cells.len(),
            cells,
        })
    }

    pub fn from_file(path: &str) -> Result<Grid, MapfError> {
        let text = fs::read_to_string(path)
            .map_err(|e| MapfError::InvalidGrid(format!("reading {path}: {e}")))?;
        let lines: Vec<&str> = text.lines().collect();
        Grid::from_ascii_lines(&lines)
    }
}
