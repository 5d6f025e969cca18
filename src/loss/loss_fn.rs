use ndarray::{Array1, Array2, ArrayView2};

/// A loss over the outputs of a linear model `y_pred = x b`.
pub trait LossFn {
    /// Returns the loss of every output column.
    fn loss(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> Array1<f64>;

    /// Returns the gradient of the summed per output loss with respect to the `(features, outputs)`
    /// coefficients.
    fn coef_grad(
        &self,
        x: ArrayView2<f64>,
        y_pred: ArrayView2<f64>,
        y: ArrayView2<f64>,
    ) -> Array2<f64>;
}
