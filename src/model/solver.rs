use log::debug;
use ndarray::{Array2, ArrayView2, Axis};

use crate::{loss::LossFn, optimization::Optimizer};

/// Pivots below this fraction of the largest diagonal entry are treated as zero.
const RANK_TOL: f64 = 1e-9;

/// Solves `min ||x b - y||²` through the normal equations, returning the minimum norm `b`.
///
/// `xᵀx` is factorized with a diagonally pivoted Cholesky that stops once the remaining pivots
/// are numerically zero, leaving `p xᵀx pᵀ = l lᵀ` with `l` of full column rank. The pseudo
/// inverse is then `pᵀ l (lᵀl)⁻² lᵀ p`, so rank deficient designs get the same coefficients as
/// an SVD based `lstsq`.
///
/// # Returns
/// The `(x.ncols(), y.ncols())` coefficients and the numerical rank of `x`.
pub fn least_squares(x: ArrayView2<f64>, y: ArrayView2<f64>) -> (Array2<f64>, usize) {
    let gram = x.t().dot(&x);
    let rhs = x.t().dot(&y);

    let factor = PivotedCholesky::new(gram);
    (factor.min_norm_solve(rhs.view()), factor.rank)
}

/// Minimizes `loss_fn` over the coefficients with full batch descent, starting from zero.
///
/// # Arguments
/// * `x` - The features.
/// * `y` - The targets.
/// * `optimizer` - Dictates how the coefficients move on each gradient.
/// * `loss_fn` - The loss being minimized.
/// * `epochs` - The number of full passes.
pub fn gradient_descent<O, L>(
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    optimizer: &mut O,
    loss_fn: &L,
    epochs: usize,
) -> Array2<f64>
where
    O: Optimizer,
    L: LossFn,
{
    let mut coef = Array2::<f64>::zeros((x.ncols(), y.ncols()));

    for epoch in 0..epochs {
        let y_pred = x.dot(&coef);
        let grad = loss_fn.coef_grad(x, y_pred.view(), y);

        if epoch % 1000 == 0 {
            let loss = loss_fn.loss(y_pred.view(), y);
            let worst = loss.fold(0.0_f64, |m, &l| m.max(l));
            debug!(
                epoch = epoch,
                mean_loss = loss.mean().unwrap_or_default(),
                worst_loss = worst;
                "gradient descent"
            );
        }

        optimizer.update_params(coef.view_mut(), grad.view());
    }

    coef
}

/// Lower triangular factor of a symmetric positive semidefinite matrix under a symmetric
/// permutation: `a[perm][:, perm] ≈ l lᵀ`, only the first `rank` columns of `l` are meaningful.
struct PivotedCholesky {
    l: Array2<f64>,
    perm: Vec<usize>,
    rank: usize,
}

impl PivotedCholesky {
    fn new(mut a: Array2<f64>) -> Self {
        let n = a.nrows();
        let mut perm: Vec<usize> = (0..n).collect();
        let max_diag = a.diag().iter().fold(0.0_f64, |m, &d| m.max(d));
        let tol = RANK_TOL * max_diag;
        let mut rank = 0;

        for k in 0..n {
            let mut pivot = k;
            for i in k + 1..n {
                if a[[i, i]] > a[[pivot, pivot]] {
                    pivot = i;
                }
            }

            if a[[pivot, pivot]] <= tol {
                break;
            }

            if pivot != k {
                for c in 0..n {
                    a.swap([k, c], [pivot, c]);
                }
                for r in 0..n {
                    a.swap([r, k], [r, pivot]);
                }
                perm.swap(k, pivot);
            }

            let lkk = a[[k, k]].sqrt();
            a[[k, k]] = lkk;
            for i in k + 1..n {
                a[[i, k]] /= lkk;
            }

            // Schur complement of the trailing block, kept symmetric.
            for j in k + 1..n {
                let ljk = a[[j, k]];
                for i in k + 1..n {
                    a[[i, j]] -= a[[i, k]] * ljk;
                }
            }

            rank += 1;
        }

        Self { l: a, perm, rank }
    }

    /// Returns the `(n, rank)` lower trapezoidal factor in pivoted order.
    fn factor(&self) -> Array2<f64> {
        let n = self.l.nrows();
        Array2::from_shape_fn((n, self.rank), |(i, c)| {
            if i >= c { self.l[[i, c]] } else { 0.0 }
        })
    }

    /// Solves `a b = rhs` for the `b` of least norm.
    fn min_norm_solve(&self, rhs: ArrayView2<f64>) -> Array2<f64> {
        let l = self.factor();
        let rhs = rhs.select(Axis(0), &self.perm);

        // lᵀl is full rank, two solves against it apply (lᵀl)⁻²
        let inner = PivotedCholesky::new(l.t().dot(&l));
        let w = l.t().dot(&rhs);
        let v = inner.solve(inner.solve(w.view()).view());
        let b = l.dot(&v);

        let mut coef = Array2::<f64>::zeros(b.dim());
        for (row, &col) in b.rows().into_iter().zip(&self.perm) {
            coef.row_mut(col).assign(&row);
        }

        coef
    }

    /// Solves `a b = rhs` restricted to the pivoted columns, the others get zero rows.
    fn solve(&self, rhs: ArrayView2<f64>) -> Array2<f64> {
        let Self { l, perm, rank } = self;
        let rank = *rank;
        let mut z = Array2::<f64>::zeros((rank, rhs.ncols()));

        // l z = rhs[perm]
        for i in 0..rank {
            let mut row = rhs.row(perm[i]).to_owned();
            for c in 0..i {
                row.scaled_add(-l[[i, c]], &z.row(c));
            }
            z.row_mut(i).assign(&(row / l[[i, i]]));
        }

        // lᵀ b = z, in place
        for i in (0..rank).rev() {
            let mut row = z.row(i).to_owned();
            for r in i + 1..rank {
                row.scaled_add(-l[[r, i]], &z.row(r));
            }
            z.row_mut(i).assign(&(row / l[[i, i]]));
        }

        let mut coef = Array2::<f64>::zeros((l.nrows(), rhs.ncols()));
        for (i, &col) in perm.iter().take(rank).enumerate() {
            coef.row_mut(col).assign(&z.row(i));
        }

        coef
    }
}
