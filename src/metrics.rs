use ndarray::{ArrayView2, Axis};

use crate::{MlErr, Result};

/// Coefficient of determination, averaged uniformly over the output columns.
///
/// A column whose residuals are all zero scores 1.0. A column with residuals but no variance in
/// `y_true` scores 0.0, so constant columns never produce infinities.
///
/// # Arguments
/// * `y_true` - The expected values, one sample per row.
/// * `y_pred` - The predicted values, same shape as `y_true`.
///
/// # Errors
/// Returns an `MlErr` if the shapes differ or there are no samples.
pub fn r2_score(y_true: ArrayView2<f64>, y_pred: ArrayView2<f64>) -> Result<f64> {
    if y_true.dim() != y_pred.dim() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.nrows() == 0 || y_true.ncols() == 0 {
        return Err(MlErr::EmptyInput("targets"));
    }

    let scores = y_true
        .axis_iter(Axis(1))
        .zip(y_pred.axis_iter(Axis(1)))
        .map(|(truth, pred)| {
            let mean = truth.sum() / truth.len() as f64;
            let ss_res: f64 = truth.iter().zip(pred).map(|(t, p)| (t - p).powi(2)).sum();
            let ss_tot: f64 = truth.iter().map(|t| (t - mean).powi(2)).sum();

            match (ss_res == 0.0, ss_tot == 0.0) {
                (true, _) => 1.0,
                (false, true) => 0.0,
                (false, false) => 1.0 - ss_res / ss_tot,
            }
        });

    Ok(scores.sum::<f64>() / y_true.ncols() as f64)
}
