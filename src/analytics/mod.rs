//! Analytics computations over the static dataset.

pub mod regression;

pub use regression::LinearModel;
