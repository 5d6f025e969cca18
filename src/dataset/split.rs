use ndarray::{Array2, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::{MlErr, Result};

/// A dataset partitioned into training and testing rows.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array2<f64>,
    pub y_test: Array2<f64>,
}

/// Shuffles the rows of `x` and `y` together and holds out a fraction of them for testing.
///
/// The test split takes the first `ceil(test_size * n)` shuffled rows, the training split the
/// rest. The same `rng` state always yields the same partition.
///
/// # Arguments
/// * `x` - The features, one sample per row.
/// * `y` - The targets, one sample per row.
/// * `test_size` - The held out fraction, in `(0, 1)`.
/// * `rng` - The source of the shuffle.
///
/// # Errors
/// Returns an `MlErr` if the row counts differ, `test_size` is out of range or either split
/// would end up empty.
pub fn train_test_split<R: Rng + ?Sized>(
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    test_size: f64,
    rng: &mut R,
) -> Result<Split> {
    let n = x.nrows();
    if y.nrows() != n {
        return Err(MlErr::SizeMismatch {
            what: "target rows",
            got: y.nrows(),
            expected: n,
        });
    }

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(MlErr::InvalidConfig(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 {
        return Err(MlErr::EmptyInput("test split"));
    }
    if n_test >= n {
        return Err(MlErr::EmptyInput("train split"));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use rand::{SeedableRng, rngs::StdRng};

    fn data(n: usize) -> (Array2<f64>, Array2<f64>) {
        let x = Array::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64);
        let y = Array::from_shape_fn((n, 1), |(i, _)| i as f64);
        (x, y)
    }

    #[test]
    fn sizes_follow_ceil_of_test_fraction() {
        let (x, y) = data(140);
        let mut rng = StdRng::seed_from_u64(42);
        let split = train_test_split(x.view(), y.view(), 0.2, &mut rng).unwrap();

        assert_eq!(split.x_test.nrows(), 28);
        assert_eq!(split.x_train.nrows(), 112);
        assert_eq!(split.y_test.nrows(), 28);
        assert_eq!(split.y_train.nrows(), 112);

        let (x, y) = data(11);
        let split = train_test_split(x.view(), y.view(), 0.2, &mut rng).unwrap();
        assert_eq!(split.x_test.nrows(), 3);
    }

    #[test]
    fn rows_stay_paired_and_disjoint() {
        let (x, y) = data(20);
        let mut rng = StdRng::seed_from_u64(1);
        let split = train_test_split(x.view(), y.view(), 0.25, &mut rng).unwrap();

        let mut seen: Vec<usize> = Vec::new();
        for (xs, ys) in [(&split.x_train, &split.y_train), (&split.x_test, &split.y_test)] {
            for (xr, yr) in xs.rows().into_iter().zip(ys.rows()) {
                let i = yr[0] as usize;
                assert_eq!(xr[0], (i * 2) as f64);
                seen.push(i);
            }
        }

        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let (x, y) = data(50);
        let a = train_test_split(x.view(), y.view(), 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = train_test_split(x.view(), y.view(), 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.y_test, b.y_test);
        assert_eq!(a.y_train, b.y_train);
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let (x, _) = data(10);
        let (_, y) = data(9);
        let err = train_test_split(x.view(), y.view(), 0.2, &mut StdRng::seed_from_u64(0));
        assert!(matches!(err, Err(MlErr::SizeMismatch { .. })));
    }

    #[test]
    fn degenerate_splits_are_rejected() {
        let (x, y) = data(1);
        let err = train_test_split(x.view(), y.view(), 0.5, &mut StdRng::seed_from_u64(0));
        assert!(matches!(err, Err(MlErr::EmptyInput("train split"))));
    }
}
