use ndarray::{ArrayView2, ArrayViewMut2};

pub trait Optimizer {
    fn update_params(&mut self, params: ArrayViewMut2<f64>, grad: ArrayView2<f64>);
}
