//! matcell: typed multi-channel element accessors over a dense matrix.
//!
//! The crate wraps an `ndarray`-backed, dynamically-depthed matrix
//! ([`Mat`]) and layers ergonomic element access on top of it: raw
//! signed/float transfer primitives, unsigned 8/16-bit views that
//! bit-reinterpret against the signed storage, typed per-cell
//! accessors ([`Mat::at`]) for scalar and 2/3/4-channel values, and
//! small fixed-arity tuple carriers with optional components.
//!
//! All access is synchronous call-and-return; accessors hold no state
//! beyond their coordinate and borrow of the matrix, and every failure
//! is surfaced to the immediate caller as a [`MatError`].
pub mod cell;
pub mod error;
pub mod mat;
pub mod tuple;
pub mod unsigned;

pub use cell::{Cell, CellElement};
pub use error::MatError;
pub use mat::{CellIndex, Depth, Mat};
pub use tuple::{t2, t3, t4, Tuple2, Tuple3, Tuple4};
