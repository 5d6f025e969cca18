use ndarray::{Array2, ArrayView2};

use crate::{Result, metrics::r2_score};

/// A model mapping feature rows to continuous output rows.
pub trait Regressor {
    /// Fits the model to the samples in `x` and `y`, replacing any previous fit.
    ///
    /// # Errors
    /// Returns an `MlErr` if the shapes of `x` and `y` disagree or there are no samples.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()>;

    /// Predicts one output row per row of `x`.
    ///
    /// # Errors
    /// Returns an `MlErr` if the model is not fitted or `x` has the wrong width.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>;

    /// Returns the R² of the predictions for `x` against `y`.
    ///
    /// # Errors
    /// Returns an `MlErr` if predicting fails or the shapes disagree.
    fn score(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        r2_score(y, y_pred.view())
    }
}
