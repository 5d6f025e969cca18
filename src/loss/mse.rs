use ndarray::{Array1, Array2, ArrayView2, Axis};

use super::LossFn;

/// Mean squared error, averaged over the samples of each output separately.
///
/// Outputs do not share coefficients, so each column of the gradient only depends on its own
/// residuals and adding targets does not shrink the step taken on the others.
#[derive(Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> Array1<f64> {
        (&y_pred - &y)
            .mapv(|r| r * r)
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(y.ncols()))
    }

    fn coef_grad(
        &self,
        x: ArrayView2<f64>,
        y_pred: ArrayView2<f64>,
        y: ArrayView2<f64>,
    ) -> Array2<f64> {
        let n = x.nrows().max(1) as f64;
        x.t().dot(&(&y_pred - &y)) * (2.0 / n)
    }
}
