/// Contiguous Column Major Matrix data container.
///
/// This structure holds a dense matrix of values in a single contiguous memory block,
/// in column-major order, which allows cheap column slicing during split search.
///
/// Only the rows listed in `index` take part in fitting and prediction, so a
/// train/test partition is expressed as two views over the same buffer.
///
/// # Type Parameters
/// * `T` - The numeric type of the data.
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Indices into the data row-wise.
    pub index: Vec<usize>,
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride1: usize,
    stride2: usize,
}

impl<'a, T> Matrix<'a, T> {
    // Defaults to column major
    /// Create a new Matrix.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix {
            data,
            index: (0..rows).collect(),
            rows,
            cols,
            stride1: rows,
            stride2: 1,
        }
    }

    /// Restrict the active rows of the matrix.
    ///
    /// * `index` - Row numbers, relative to the full matrix, to keep.
    pub fn with_index(mut self, index: Vec<usize>) -> Self {
        self.index = index;
        self
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        let mut idx = self.stride2 * i;
        idx += j * self.stride1;
        idx
    }

    /// Get access to a row of the data, as an iterator.
    pub fn get_row_iter(&self, row: usize) -> std::iter::StepBy<std::iter::Skip<std::slice::Iter<'a, T>>> {
        self.data.iter().skip(row).step_by(self.rows)
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        let i = self.item_index(0, col);
        let j = self.item_index(self.rows, col);
        &self.data[i..j]
    }
}

impl<'a, T> Matrix<'a, T>
where
    T: Copy,
{
    /// Get a row of the data as a vector.
    pub fn get_row(&self, row: usize) -> Vec<T> {
        self.get_row_iter(row).copied().collect()
    }
}

/// Flatten row-major records into the column-major layout `Matrix` expects.
pub fn columns_from_rows<const N: usize>(rows: &[[f64; N]]) -> Vec<f64> {
    (0..N).flat_map(|col| rows.iter().map(move |r| r[col])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_get() {
        let v = vec![1., 2., 3., 4., 5., 6.];
        let m = Matrix::new(&v, 3, 2);
        assert_eq!(*m.get(0, 0), 1.);
        assert_eq!(*m.get(2, 0), 3.);
        assert_eq!(*m.get(1, 1), 5.);
    }

    #[test]
    fn test_matrix_get_row_and_col() {
        let v = vec![1., 2., 3., 4., 5., 6.];
        let m = Matrix::new(&v, 3, 2);
        assert_eq!(m.get_row(1), vec![2., 5.]);
        assert_eq!(m.get_col(1), &[4., 5., 6.]);
    }

    #[test]
    fn test_with_index() {
        let v = vec![1., 2., 3., 4.];
        let m = Matrix::new(&v, 2, 2).with_index(vec![1]);
        assert_eq!(m.index, vec![1]);
        assert_eq!(m.rows, 2);
    }

    #[test]
    fn test_columns_from_rows() {
        let rows = [[1., 2.], [3., 4.], [5., 6.]];
        let flat = columns_from_rows(&rows);
        assert_eq!(flat, vec![1., 3., 5., 2., 4., 6.]);
        let m = Matrix::new(&flat, 3, 2);
        assert_eq!(m.get_row(2), vec![5., 6.]);
    }
}
