use rayon::prelude::*;

/// Access outside the bounds of a [`PixelBuffer`], reported in panics
struct OutOfBounds {
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
}

impl std::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pixel ({}, {}) outside buffer of {}x{}",
            self.row, self.col, self.rows, self.cols
        )
    }
}

/// Dense row-major `f32` grid addressed by (row, col).
///
/// Both coordinates are checked on every access, so a column past the end
/// of a row can never land in the next row.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Zero-initialized buffer
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Buffer with every sample set to `value`
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap existing row-major samples. Returns `None` if the length does not
    /// match `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    /// Build a buffer by evaluating `f(row, col)` for every pixel
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    #[inline]
    fn out_of_bounds(&self, row: usize, col: usize) -> OutOfBounds {
        OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Read a sample.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the buffer.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        match self.index(row, col) {
            Some(i) => self.data[i],
            None => panic!("{}", self.out_of_bounds(row, col)),
        }
    }

    /// Write a sample.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the buffer.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        match self.index(row, col) {
            Some(i) => self.data[i] = value,
            None => panic!("{}", self.out_of_bounds(row, col)),
        }
    }

    /// One row as a slice
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        assert!(row < self.rows, "{}", self.out_of_bounds(row, 0));
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }

    /// Fill every row in parallel. `f` receives the row index and the
    /// row's mutable slice; rows are disjoint so the result does not depend
    /// on scheduling.
    pub fn par_fill_rows<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [f32]) + Send + Sync,
    {
        if self.data.is_empty() {
            return;
        }
        self.data
            .par_chunks_mut(self.cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }

    /// Smallest and largest sample, `None` when empty
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
