use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::MatError;

/// Native storage depths of a [`Mat`].
///
/// Storage is always signed or floating point; unsigned 8/16-bit views
/// are provided by the adapter layer on top of `I8`/`I16` storage.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    I8,
    I16,
    I32,
    F32,
    F64,
}

impl Depth {
    pub fn size_bytes(&self) -> usize {
        match self {
            Depth::I8 => 1,
            Depth::I16 => 2,
            Depth::I32 | Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Depth::I8 => "i8",
            Depth::I16 => "i16",
            Depth::I32 => "i32",
            Depth::F32 => "f32",
            Depth::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i8" => Ok(Depth::I8),
            "i16" => Ok(Depth::I16),
            "i32" => Ok(Depth::I32),
            "f32" => Ok(Depth::F32),
            "f64" => Ok(Depth::F64),
            _ => Err(format!("Unknown depth: {}", s)),
        }
    }
}

/// A coordinate addressing one logical cell of a [`Mat`].
///
/// Implemented for `(row, col)` pairs on 2-D matrices and for general
/// index vectors with one component per dimension.
pub trait CellIndex {
    /// Flat cell offset (in cells, before channels) for a matrix with
    /// the given axis sizes. Validates rank and per-axis bounds.
    fn cell_offset(&self, sizes: &[usize]) -> Result<usize, MatError>;

    /// The raw coordinate, without validation.
    fn indices(&self) -> Vec<usize>;
}

fn offset_of(indices: &[usize], sizes: &[usize]) -> Result<usize, MatError> {
    if indices.len() != sizes.len() {
        return Err(MatError::DimsMismatch {
            expected: sizes.len(),
            got: indices.len(),
        });
    }
    let mut offset = 0;
    for (axis, (&index, &size)) in indices.iter().zip(sizes).enumerate() {
        if index >= size {
            return Err(MatError::IndexOutOfBounds { axis, index, size });
        }
        offset = offset * size + index;
    }
    Ok(offset)
}

impl CellIndex for (usize, usize) {
    fn cell_offset(&self, sizes: &[usize]) -> Result<usize, MatError> {
        offset_of(&[self.0, self.1], sizes)
    }

    fn indices(&self) -> Vec<usize> {
        vec![self.0, self.1]
    }
}

impl CellIndex for &[usize] {
    fn cell_offset(&self, sizes: &[usize]) -> Result<usize, MatError> {
        offset_of(self, sizes)
    }

    fn indices(&self) -> Vec<usize> {
        self.to_vec()
    }
}

impl<const N: usize> CellIndex for [usize; N] {
    fn cell_offset(&self, sizes: &[usize]) -> Result<usize, MatError> {
        offset_of(self, sizes)
    }

    fn indices(&self) -> Vec<usize> {
        self.to_vec()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum MatData {
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

impl MatData {
    fn depth(&self) -> Depth {
        match self {
            MatData::I8(_) => Depth::I8,
            MatData::I16(_) => Depth::I16,
            MatData::I32(_) => Depth::I32,
            MatData::F32(_) => Depth::F32,
            MatData::F64(_) => Depth::F64,
        }
    }
}

/// A dense multi-channel matrix with a runtime element depth.
///
/// Storage is an `ndarray::ArrayD` of shape `sizes + [channels]` in
/// standard layout; each logical cell holds `channels` scalars (1..=4).
/// Transfers run in raster order starting at channel 0 of the addressed
/// cell and may span cells, mirroring the flat element layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    sizes: Vec<usize>,
    channels: usize,
    data: MatData,
}

fn storage_shape(sizes: &[usize], channels: usize) -> Result<IxDyn, MatError> {
    if sizes.is_empty() {
        return Err(MatError::DimsMismatch {
            expected: 1,
            got: 0,
        });
    }
    if channels == 0 || channels > 4 {
        return Err(MatError::BadChannelCount(channels));
    }
    let mut shape = sizes.to_vec();
    shape.push(channels);
    Ok(IxDyn(&shape))
}

fn build_array<T>(
    sizes: &[usize],
    channels: usize,
    data: Vec<T>,
) -> Result<ArrayD<T>, MatError> {
    let shape = storage_shape(sizes, channels)?;
    let len = data.len();
    ArrayD::from_shape_vec(shape, data).map_err(|_| MatError::InvalidShape {
        sizes: sizes.to_vec(),
        channels,
        len,
    })
}

impl Mat {
    /// Zero-filled matrix of the given axis sizes, channels, and depth.
    pub fn zeros(sizes: &[usize], channels: usize, depth: Depth) -> Result<Self, MatError> {
        let shape = storage_shape(sizes, channels)?;
        let data = match depth {
            Depth::I8 => MatData::I8(ArrayD::zeros(shape)),
            Depth::I16 => MatData::I16(ArrayD::zeros(shape)),
            Depth::I32 => MatData::I32(ArrayD::zeros(shape)),
            Depth::F32 => MatData::F32(ArrayD::zeros(shape)),
            Depth::F64 => MatData::F64(ArrayD::zeros(shape)),
        };
        log::debug!(
            "allocated {:?} x{} matrix of depth {}",
            sizes,
            channels,
            depth
        );
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data,
        })
    }

    pub fn from_shape_vec_i8(
        sizes: &[usize],
        channels: usize,
        data: Vec<i8>,
    ) -> Result<Self, MatError> {
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data: MatData::I8(build_array(sizes, channels, data)?),
        })
    }

    pub fn from_shape_vec_i16(
        sizes: &[usize],
        channels: usize,
        data: Vec<i16>,
    ) -> Result<Self, MatError> {
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data: MatData::I16(build_array(sizes, channels, data)?),
        })
    }

    pub fn from_shape_vec_i32(
        sizes: &[usize],
        channels: usize,
        data: Vec<i32>,
    ) -> Result<Self, MatError> {
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data: MatData::I32(build_array(sizes, channels, data)?),
        })
    }

    pub fn from_shape_vec_f32(
        sizes: &[usize],
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, MatError> {
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data: MatData::F32(build_array(sizes, channels, data)?),
        })
    }

    pub fn from_shape_vec_f64(
        sizes: &[usize],
        channels: usize,
        data: Vec<f64>,
    ) -> Result<Self, MatError> {
        Ok(Mat {
            sizes: sizes.to_vec(),
            channels,
            data: MatData::F64(build_array(sizes, channels, data)?),
        })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Extent of the first axis.
    pub fn rows(&self) -> usize {
        self.sizes[0]
    }

    /// Extent of the second axis of a 2-D matrix, if there is one.
    pub fn cols(&self) -> Option<usize> {
        self.sizes.get(1).copied()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn depth(&self) -> Depth {
        self.data.depth()
    }

    /// Number of logical cells.
    pub fn cell_count(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Number of scalars across all cells and channels.
    pub fn scalar_count(&self) -> usize {
        self.cell_count() * self.channels
    }

    /// Validates the buffer length and coordinate, returning the flat
    /// scalar offset a transfer starts at.
    fn transfer_start<I: CellIndex>(&self, index: &I, len: usize) -> Result<usize, MatError> {
        if len == 0 || len % self.channels != 0 {
            return Err(MatError::BadBufferLength {
                len,
                channels: self.channels,
            });
        }
        let cell = index.cell_offset(&self.sizes)?;
        Ok(cell * self.channels)
    }

    pub fn get_i8<I: CellIndex>(&self, index: I, buf: &mut [i8]) -> Result<usize, MatError> {
        let arr = match &self.data {
            MatData::I8(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I8,
                    actual: other.depth(),
                })
            }
        };
        let start = self.transfer_start(&index, buf.len())?;
        copy_out(arr, start, buf)
    }

    pub fn put_i8<I: CellIndex>(&mut self, index: I, buf: &[i8]) -> Result<usize, MatError> {
        let start = self.transfer_start(&index, buf.len())?;
        let arr = match &mut self.data {
            MatData::I8(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I8,
                    actual: other.depth(),
                })
            }
        };
        copy_in(arr, start, buf)
    }

    pub fn get_i16<I: CellIndex>(&self, index: I, buf: &mut [i16]) -> Result<usize, MatError> {
        let arr = match &self.data {
            MatData::I16(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I16,
                    actual: other.depth(),
                })
            }
        };
        let start = self.transfer_start(&index, buf.len())?;
        copy_out(arr, start, buf)
    }

    pub fn put_i16<I: CellIndex>(&mut self, index: I, buf: &[i16]) -> Result<usize, MatError> {
        let start = self.transfer_start(&index, buf.len())?;
        let arr = match &mut self.data {
            MatData::I16(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I16,
                    actual: other.depth(),
                })
            }
        };
        copy_in(arr, start, buf)
    }

    pub fn get_i32<I: CellIndex>(&self, index: I, buf: &mut [i32]) -> Result<usize, MatError> {
        let arr = match &self.data {
            MatData::I32(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I32,
                    actual: other.depth(),
                })
            }
        };
        let start = self.transfer_start(&index, buf.len())?;
        copy_out(arr, start, buf)
    }

    pub fn put_i32<I: CellIndex>(&mut self, index: I, buf: &[i32]) -> Result<usize, MatError> {
        let start = self.transfer_start(&index, buf.len())?;
        let arr = match &mut self.data {
            MatData::I32(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::I32,
                    actual: other.depth(),
                })
            }
        };
        copy_in(arr, start, buf)
    }

    pub fn get_f32<I: CellIndex>(&self, index: I, buf: &mut [f32]) -> Result<usize, MatError> {
        let arr = match &self.data {
            MatData::F32(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::F32,
                    actual: other.depth(),
                })
            }
        };
        let start = self.transfer_start(&index, buf.len())?;
        copy_out(arr, start, buf)
    }

    pub fn put_f32<I: CellIndex>(&mut self, index: I, buf: &[f32]) -> Result<usize, MatError> {
        let start = self.transfer_start(&index, buf.len())?;
        let arr = match &mut self.data {
            MatData::F32(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::F32,
                    actual: other.depth(),
                })
            }
        };
        copy_in(arr, start, buf)
    }

    pub fn get_f64<I: CellIndex>(&self, index: I, buf: &mut [f64]) -> Result<usize, MatError> {
        let arr = match &self.data {
            MatData::F64(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::F64,
                    actual: other.depth(),
                })
            }
        };
        let start = self.transfer_start(&index, buf.len())?;
        copy_out(arr, start, buf)
    }

    pub fn put_f64<I: CellIndex>(&mut self, index: I, buf: &[f64]) -> Result<usize, MatError> {
        let start = self.transfer_start(&index, buf.len())?;
        let arr = match &mut self.data {
            MatData::F64(arr) => arr,
            other => {
                return Err(MatError::DepthMismatch {
                    requested: Depth::F64,
                    actual: other.depth(),
                })
            }
        };
        copy_in(arr, start, buf)
    }
}

// Storage is always constructed in standard layout; a non-contiguous
// array surfaces as an error rather than a panic.
fn copy_out<T: Copy>(arr: &ArrayD<T>, start: usize, buf: &mut [T]) -> Result<usize, MatError> {
    let flat = arr.as_slice().ok_or(MatError::NonContiguous)?;
    let count = buf.len().min(flat.len() - start);
    buf[..count].copy_from_slice(&flat[start..start + count]);
    Ok(count)
}

fn copy_in<T: Copy>(arr: &mut ArrayD<T>, start: usize, buf: &[T]) -> Result<usize, MatError> {
    let flat = arr.as_slice_mut().ok_or(MatError::NonContiguous)?;
    let count = buf.len().min(flat.len() - start);
    flat[start..start + count].copy_from_slice(&buf[..count]);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_shape_and_depth() {
        let mat = Mat::zeros(&[3, 4], 2, Depth::I16).unwrap();
        assert_eq!(mat.sizes(), &[3, 4]);
        assert_eq!(mat.rows(), 3);
        assert_eq!(mat.cols(), Some(4));
        assert_eq!(mat.channels(), 2);
        assert_eq!(mat.depth(), Depth::I16);
        assert_eq!(mat.cell_count(), 12);
        assert_eq!(mat.scalar_count(), 24);
    }

    #[test]
    fn bad_channel_count_rejected() {
        assert_eq!(
            Mat::zeros(&[2, 2], 0, Depth::I8),
            Err(MatError::BadChannelCount(0))
        );
        assert_eq!(
            Mat::zeros(&[2, 2], 5, Depth::I8),
            Err(MatError::BadChannelCount(5))
        );
    }

    #[test]
    fn from_shape_vec_length_mismatch() {
        let err = Mat::from_shape_vec_i8(&[2, 2], 1, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, MatError::InvalidShape { len: 3, .. }));
    }

    #[test]
    fn put_then_get_row_col() {
        let mut mat = Mat::zeros(&[2, 3], 1, Depth::I8).unwrap();
        assert_eq!(mat.put_i8((1, 2), &[-7]).unwrap(), 1);
        let mut buf = [0i8; 1];
        assert_eq!(mat.get_i8((1, 2), &mut buf).unwrap(), 1);
        assert_eq!(buf, [-7]);
    }

    #[test]
    fn put_then_get_index_vector() {
        let mut mat = Mat::zeros(&[2, 2, 2], 1, Depth::I32).unwrap();
        mat.put_i32(&[1, 0, 1][..], &[42]).unwrap();
        let mut buf = [0i32; 1];
        mat.get_i32(&[1, 0, 1][..], &mut buf).unwrap();
        assert_eq!(buf, [42]);
    }

    #[test]
    fn transfer_spans_cells_in_raster_order() {
        let mut mat =
            Mat::from_shape_vec_i8(&[2, 2], 1, vec![1, 2, 3, 4]).unwrap();
        let mut buf = [0i8; 3];
        assert_eq!(mat.get_i8((0, 1), &mut buf).unwrap(), 3);
        assert_eq!(buf, [2, 3, 4]);
        assert_eq!(mat.put_i8((0, 1), &[9, 8, 7]).unwrap(), 3);
        let mut all = [0i8; 4];
        mat.get_i8((0, 0), &mut all).unwrap();
        assert_eq!(all, [1, 9, 8, 7]);
    }

    #[test]
    fn transfer_clamps_at_end() {
        let mat = Mat::from_shape_vec_i8(&[2, 2], 1, vec![1, 2, 3, 4]).unwrap();
        let mut buf = [0i8; 4];
        assert_eq!(mat.get_i8((1, 1), &mut buf).unwrap(), 1);
        assert_eq!(buf, [4, 0, 0, 0]);
    }

    #[test]
    fn buffer_length_must_be_channel_multiple() {
        let mat = Mat::zeros(&[2, 2], 3, Depth::I8).unwrap();
        let mut buf = [0i8; 2];
        assert_eq!(
            mat.get_i8((0, 0), &mut buf),
            Err(MatError::BadBufferLength {
                len: 2,
                channels: 3
            })
        );
        let mut empty: [i8; 0] = [];
        assert_eq!(
            mat.get_i8((0, 0), &mut empty),
            Err(MatError::BadBufferLength {
                len: 0,
                channels: 3
            })
        );
    }

    #[test]
    fn depth_mismatch_is_reported() {
        let mat = Mat::zeros(&[2, 2], 1, Depth::F32).unwrap();
        let mut buf = [0i8; 1];
        assert_eq!(
            mat.get_i8((0, 0), &mut buf),
            Err(MatError::DepthMismatch {
                requested: Depth::I8,
                actual: Depth::F32
            })
        );
    }

    #[test]
    fn coordinate_rank_and_bounds_checked() {
        let mat = Mat::zeros(&[2, 2, 2], 1, Depth::I8).unwrap();
        let mut buf = [0i8; 1];
        assert_eq!(
            mat.get_i8((0, 0), &mut buf),
            Err(MatError::DimsMismatch {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            mat.get_i8(&[0, 2, 0][..], &mut buf),
            Err(MatError::IndexOutOfBounds {
                axis: 1,
                index: 2,
                size: 2
            })
        );
    }

    #[test]
    fn contiguous_transfers_never_report_layout_errors() {
        let mut mat = Mat::zeros(&[4, 4], 2, Depth::F32).unwrap();
        assert_eq!(mat.put_f32((3, 3), &[1.0, 2.0]).unwrap(), 2);
        let mut buf = [0.0f32; 2];
        assert_eq!(mat.get_f32((3, 3), &mut buf).unwrap(), 2);
        assert_eq!(buf, [1.0, 2.0]);
        assert_eq!(
            MatError::NonContiguous.to_string(),
            "matrix storage is not in contiguous standard layout"
        );
    }

    #[test]
    fn depth_parses_and_displays() {
        assert_eq!("i16".parse::<Depth>().unwrap(), Depth::I16);
        assert_eq!("F64".parse::<Depth>().unwrap(), Depth::F64);
        assert!("u8".parse::<Depth>().is_err());
        assert_eq!(Depth::F32.to_string(), "f32");
        assert_eq!(Depth::F64.size_bytes(), 8);
    }
}
