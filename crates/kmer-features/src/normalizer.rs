//! L2 normalization of feature vectors

use ndarray::{Array2, ArrayView1, ArrayViewMut1};

/// Which lanes of a matrix are scaled to unit length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormAxis {
    /// Every row independently
    Rows,
    /// Every column independently
    Columns,
}

/// Euclidean norm of a vector
pub fn l2_norm(values: ArrayView1<'_, f64>) -> f64 {
    values.dot(&values).sqrt()
}

/// Scale a vector in place to unit L2 norm.
///
/// A zero vector is left untouched.
pub fn normalize_vector(mut values: ArrayViewMut1<'_, f64>) {
    let norm = values.dot(&values).sqrt();
    if norm > 0.0 {
        values.mapv_inplace(|v| v / norm);
    }
}

/// Scale every lane of `matrix` along `axis` to unit L2 norm
pub fn normalize(matrix: &mut Array2<f64>, axis: NormAxis) {
    match axis {
        NormAxis::Rows => matrix.rows_mut().into_iter().for_each(normalize_vector),
        NormAxis::Columns => matrix.columns_mut().into_iter().for_each(normalize_vector),
    }
}

/// Row-wise (per sample) L2 normalization
pub fn normalize_rows(matrix: &mut Array2<f64>) {
    normalize(matrix, NormAxis::Rows)
}
