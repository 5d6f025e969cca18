use std::collections::{BTreeSet, HashMap};

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1};

use crate::{MlErr, Result};

/// One-hot encoder over a single categorical feature.
///
/// Categories are kept sorted, so the column of a category does not depend on the order in which
/// the values were seen. Values outside the fitted categories encode as all zeros.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl OneHotEncoder {
    /// Learns the categories of `values`.
    ///
    /// # Errors
    /// Returns `MlErr::EmptyInput` if `values` yields nothing.
    pub fn fit<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if categories.is_empty() {
            return Err(MlErr::EmptyInput("vocabulary"));
        }

        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        Ok(Self { categories, index })
    }

    /// Returns the number of categories, which is also the width of an encoded value.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Writes the one-hot vector of `value` into `out`.
    ///
    /// # Errors
    /// Returns `MlErr::SizeMismatch` if `out` is not exactly `len()` wide.
    pub fn encode_into(&self, value: &str, mut out: ArrayViewMut1<f64>) -> Result<()> {
        if out.len() != self.len() {
            return Err(MlErr::SizeMismatch {
                what: "one-hot buffer",
                got: out.len(),
                expected: self.len(),
            });
        }

        out.fill(0.0);
        if let Some(i) = self.index_of(value) {
            out[i] = 1.0;
        }

        Ok(())
    }

    /// Encodes each value as one row.
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Array2<f64> {
        let mut encoded = Array2::zeros((values.len(), self.len()));

        for (mut row, value) in encoded.rows_mut().into_iter().zip(values) {
            if let Some(i) = self.index_of(value.as_ref()) {
                row[i] = 1.0;
            }
        }

        encoded
    }

    /// Maps a vector of scores back to the category scoring highest.
    ///
    /// The first category wins ties. A NaN score compares above everything else, so the first NaN
    /// wins, a row of NaN yields the first category.
    ///
    /// # Errors
    /// Returns `MlErr::SizeMismatch` if `scores` is not exactly `len()` wide.
    pub fn inverse_transform(&self, scores: ArrayView1<f64>) -> Result<&str> {
        if scores.len() != self.len() {
            return Err(MlErr::SizeMismatch {
                what: "scores",
                got: scores.len(),
                expected: self.len(),
            });
        }

        let mut best = 0;
        for (i, &s) in scores.iter().enumerate() {
            if scores[best].is_nan() {
                break;
            }
            if s > scores[best] || s.is_nan() {
                best = i;
            }
        }

        Ok(&self.categories[best])
    }

    /// Applies `inverse_transform` to every row of `scores`.
    ///
    /// # Errors
    /// Returns `MlErr::SizeMismatch` if the rows are not exactly `len()` wide.
    pub fn inverse_transform_rows(&self, scores: ArrayView2<f64>) -> Result<Vec<&str>> {
        scores
            .rows()
            .into_iter()
            .map(|row| self.inverse_transform(row))
            .collect()
    }
}
