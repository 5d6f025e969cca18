mod linear;
mod regressor;
mod solver;

pub use linear::{LinearRegression, Solver};
pub use regressor::Regressor;
pub use solver::{gradient_descent, least_squares};
