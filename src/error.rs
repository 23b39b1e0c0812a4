use std::error::Error;
use std::fmt;

use crate::mat::Depth;

/// Failures surfaced by matrix construction and element access.
///
/// Every variant is terminal for the call that produced it: there is no
/// retry and no partially-applied transfer to clean up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatError {
    /// The provided buffer does not match the requested shape.
    InvalidShape {
        sizes: Vec<usize>,
        channels: usize,
        len: usize,
    },
    /// A coordinate has the wrong number of dimensions for this matrix.
    DimsMismatch { expected: usize, got: usize },
    /// A coordinate component is outside the matrix extent on its axis.
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        size: usize,
    },
    /// A channel count outside the supported 1..=4 range.
    BadChannelCount(usize),
    /// A transfer primitive of one depth was called on a matrix of another.
    DepthMismatch { requested: Depth, actual: Depth },
    /// A transfer buffer length that is zero or not a multiple of the
    /// channel count.
    BadBufferLength { len: usize, channels: usize },
    /// The backing array is not in standard contiguous layout. All
    /// constructors produce contiguous storage, so a transfer only
    /// reports this if the backing array was built some other way.
    NonContiguous,
    /// A cell accessor was requested for an element type this matrix
    /// cannot serve. Raised at accessor construction; no accessor exists
    /// afterwards and no element was touched.
    UnsupportedType {
        requested: &'static str,
        depth: Depth,
    },
}

impl fmt::Display for MatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatError::InvalidShape {
                sizes,
                channels,
                len,
            } => write!(
                f,
                "invalid shape {:?} with {} channel(s) for buffer of length {}",
                sizes, channels, len
            ),
            MatError::DimsMismatch { expected, got } => write!(
                f,
                "coordinate has {} dimension(s), matrix has {}",
                got, expected
            ),
            MatError::IndexOutOfBounds { axis, index, size } => write!(
                f,
                "index {} out of bounds for axis {} of size {}",
                index, axis, size
            ),
            MatError::BadChannelCount(channels) => {
                write!(f, "channel count {} not in supported range 1..=4", channels)
            }
            MatError::DepthMismatch { requested, actual } => write!(
                f,
                "requested {} transfer on a matrix of depth {}",
                requested, actual
            ),
            MatError::BadBufferLength { len, channels } => write!(
                f,
                "buffer length {} is not a non-zero multiple of {} channel(s)",
                len, channels
            ),
            MatError::NonContiguous => {
                write!(f, "matrix storage is not in contiguous standard layout")
            }
            MatError::UnsupportedType { requested, depth } => write!(
                f,
                "element type {} is not supported by a matrix of depth {}",
                requested, depth
            ),
        }
    }
}

impl Error for MatError {}
