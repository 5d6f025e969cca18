use ndarray::{ArrayView2, ArrayViewMut2};

use super::Optimizer;

/// Gradient descent optimization algorithm.
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameters according to the algorithm's learning rule, that is, making a step in
    /// the opposite direction of the gradient, with a length of `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    fn update_params(&mut self, mut params: ArrayViewMut2<f64>, grad: ArrayView2<f64>) {
        params.scaled_add(-self.learning_rate, &grad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn steps_against_the_gradient() {
        let mut params = array![[1.0, 2.0], [3.0, 4.0]];
        let grad = array![[1.0, -1.0], [0.0, 2.0]];
        GradientDescent::new(0.5).update_params(params.view_mut(), grad.view());
        assert_eq!(params, array![[0.5, 2.5], [3.0, 3.0]]);
    }
}
