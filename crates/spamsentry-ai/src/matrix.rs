/// One sparse row: `(column, value)` pairs sorted by column, zeros omitted.
pub type SparseRow = Vec<(usize, f32)>;

/// Sparse feature matrix with a fixed column count.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<SparseRow>,
    n_features: usize,
}

impl FeatureMatrix {
    /// Build a matrix from rows. Columns at or beyond `n_features` are dropped.
    pub fn new(rows: Vec<SparseRow>, n_features: usize) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.retain(|&(col, value)| col < n_features && value != 0.0);
                row.sort_by_key(|&(col, _)| col);
                row
            })
            .collect();
        Self { rows, n_features }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&SparseRow> {
        self.rows.get(i)
    }

    /// Dot product of each row with `weights`.
    pub fn dot_rows(&self, weights: &[f32]) -> Vec<f32> {
        self.rows.iter().map(|row| dot(row, weights)).collect()
    }
}

/// Dot product of a sparse row with dense weights. Out-of-range columns count as zero.
pub(crate) fn dot(row: &[(usize, f32)], weights: &[f32]) -> f32 {
    row.iter()
        .filter_map(|&(col, value)| weights.get(col).map(|w| w * value))
        .sum()
}
