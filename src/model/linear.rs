use std::num::NonZeroUsize;

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::{Regressor, gradient_descent, least_squares};
use crate::{MlErr, Result, loss::Mse, optimization::GradientDescent};

/// How `LinearRegression` solves for its coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solver {
    NormalEquations,
    GradientDescent {
        learning_rate: f64,
        epochs: NonZeroUsize,
    },
}

#[derive(Debug, Clone)]
struct Params {
    coef: Array2<f64>,
    intercept: Array1<f64>,
}

/// Ordinary least squares regression with any number of outputs.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    fit_intercept: bool,
    solver: Solver,
    params: Option<Params>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true, Solver::NormalEquations)
    }
}

impl LinearRegression {
    /// Creates a new, unfitted `LinearRegression`.
    ///
    /// # Arguments
    /// * `fit_intercept` - Whether to learn an intercept per output, if not the data is assumed
    ///   to be centered.
    /// * `solver` - The method used for solving the coefficients.
    pub fn new(fit_intercept: bool, solver: Solver) -> Self {
        Self {
            fit_intercept,
            solver,
            params: None,
        }
    }

    /// Returns the `(features, outputs)` coefficients, if fitted.
    pub fn coef(&self) -> Option<ArrayView2<'_, f64>> {
        self.params.as_ref().map(|p| p.coef.view())
    }

    /// Returns the per output intercept, if fitted.
    pub fn intercept(&self) -> Option<ArrayView1<'_, f64>> {
        self.params.as_ref().map(|p| p.intercept.view())
    }

    fn offsets(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        if !self.fit_intercept {
            return Ok((Array1::zeros(x.ncols()), Array1::zeros(y.ncols())));
        }

        let x_offset = x
            .mean_axis(Axis(0))
            .ok_or(MlErr::EmptyInput("training set"))?;
        let y_offset = y
            .mean_axis(Axis(0))
            .ok_or(MlErr::EmptyInput("training set"))?;

        Ok((x_offset, y_offset))
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()> {
        if x.nrows() != y.nrows() {
            return Err(MlErr::SizeMismatch {
                what: "target rows",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        if x.nrows() == 0 {
            return Err(MlErr::EmptyInput("training set"));
        }

        let (x_offset, y_offset) = self.offsets(x, y)?;
        let xc = &x - &x_offset;
        let yc = &y - &y_offset;

        let coef = match self.solver {
            Solver::NormalEquations => {
                let (coef, rank) = least_squares(xc.view(), yc.view());
                debug!(rank = rank, features = x.ncols(); "normal equations solved");
                coef
            }
            Solver::GradientDescent {
                learning_rate,
                epochs,
            } => {
                let mut optimizer = GradientDescent::new(learning_rate);
                gradient_descent(xc.view(), yc.view(), &mut optimizer, &Mse, epochs.get())
            }
        };

        let intercept = &y_offset - &x_offset.dot(&coef);
        self.params = Some(Params { coef, intercept });

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let Params { coef, intercept } = self.params.as_ref().ok_or(MlErr::NotFitted)?;

        if x.ncols() != coef.nrows() {
            return Err(MlErr::SizeMismatch {
                what: "features",
                got: x.ncols(),
                expected: coef.nrows(),
            });
        }

        Ok(x.dot(coef) + intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn recovers_slope_and_intercept() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = x.mapv(|v| 2.0 * v + 1.0);

        let mut model = LinearRegression::default();
        model.fit(x.view(), y.view()).unwrap();

        assert_close(model.coef().unwrap()[[0, 0]], 2.0);
        assert_close(model.intercept().unwrap()[0], 1.0);
        assert_close(model.score(x.view(), y.view()).unwrap(), 1.0);
    }

    #[test]
    fn gradient_descent_solver_recovers_the_same_line() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = x.mapv(|v| 2.0 * v + 1.0);

        let solver = Solver::GradientDescent {
            learning_rate: 0.1,
            epochs: NonZeroUsize::new(1000).unwrap(),
        };
        let mut model = LinearRegression::new(true, solver);
        model.fit(x.view(), y.view()).unwrap();

        assert_close(model.coef().unwrap()[[0, 0]], 2.0);
        assert_close(model.intercept().unwrap()[0], 1.0);
    }

    #[test]
    fn without_intercept_the_fit_goes_through_the_origin() {
        let x = array![[1.0], [2.0]];
        let y = array![[3.0], [5.0]];

        let mut model = LinearRegression::new(false, Solver::NormalEquations);
        model.fit(x.view(), y.view()).unwrap();

        // argmin of (3 - b)² + (5 - 2b)²
        assert_close(model.coef().unwrap()[[0, 0]], 13.0 / 5.0);
        assert_eq!(model.intercept().unwrap()[0], 0.0);
    }

    #[test]
    fn collinear_one_hot_features_still_fit_exactly() {
        // two one-hot slots over the same two words, each row sums to 2
        let x = array![
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
        ];
        let y = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [0.0, 1.0]];

        let mut model = LinearRegression::default();
        model.fit(x.view(), y.view()).unwrap();

        let y_pred = model.predict(x.view()).unwrap();
        for (p, t) in y_pred.iter().zip(&y) {
            assert_close(*p, *t);
        }
    }

    #[test]
    fn both_solvers_pick_the_same_coefficients_on_collinear_features() {
        let x = array![
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
        ];
        let y = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 0.0]];

        let mut exact = LinearRegression::default();
        exact.fit(x.view(), y.view()).unwrap();

        let solver = Solver::GradientDescent {
            learning_rate: 0.1,
            epochs: NonZeroUsize::new(2000).unwrap(),
        };
        let mut descent = LinearRegression::new(true, solver);
        descent.fit(x.view(), y.view()).unwrap();

        // descent from zero never leaves the row space, so it lands on the least norm solution
        for (a, b) in exact.coef().unwrap().iter().zip(descent.coef().unwrap()) {
            assert_close(*a, *b);
        }
        for (a, b) in exact.intercept().unwrap().iter().zip(descent.intercept().unwrap()) {
            assert_close(*a, *b);
        }
    }

    #[test]
    fn predicting_before_fitting_fails() {
        let model = LinearRegression::default();
        let err = model.predict(array![[1.0]].view()).unwrap_err();
        assert!(matches!(err, MlErr::NotFitted));
    }

    #[test]
    fn wrong_feature_width_is_rejected() {
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let mut model = LinearRegression::default();
        model.fit(x.view(), x.view()).unwrap();

        let err = model.predict(array![[1.0]].view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 1,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let mut model = LinearRegression::default();
        let err = model
            .fit(array![[1.0], [2.0]].view(), array![[1.0]].view())
            .unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { .. }));
    }
}
