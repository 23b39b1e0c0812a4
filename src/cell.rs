//! Typed per-cell accessors.
//!
//! [`Mat::at`] resolves a requested element type against the matrix
//! depth once, at construction, and hands back a [`Cell`] bound to one
//! coordinate. Native signed/float element types forward straight to
//! the matrix transfer primitives; `u8`/`u16` route through the
//! unsigned adapters. A type the matrix cannot serve is rejected
//! immediately, before any element is touched.

use std::marker::PhantomData;

use num_traits::Zero;

use crate::error::MatError;
use crate::mat::{CellIndex, Depth, Mat};
use crate::tuple::{Tuple2, Tuple3, Tuple4};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Element types a [`Cell`] can be constructed for.
///
/// The set is closed: the five native storage depths plus the two
/// unsigned widths served by the adapter layer.
pub trait CellElement: Copy + Zero + sealed::Sealed {
    /// Name used in the unsupported-type error.
    const NAME: &'static str;

    /// Storage depth a matrix must have to serve this element type.
    const DEPTH: Depth;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError>;

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError>;
}

impl CellElement for i8 {
    const NAME: &'static str = "i8";
    const DEPTH: Depth = Depth::I8;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_i8(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_i8(indices, buf)
    }
}

impl CellElement for i16 {
    const NAME: &'static str = "i16";
    const DEPTH: Depth = Depth::I16;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_i16(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_i16(indices, buf)
    }
}

impl CellElement for i32 {
    const NAME: &'static str = "i32";
    const DEPTH: Depth = Depth::I32;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_i32(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_i32(indices, buf)
    }
}

impl CellElement for f32 {
    const NAME: &'static str = "f32";
    const DEPTH: Depth = Depth::F32;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_f32(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_f32(indices, buf)
    }
}

impl CellElement for f64 {
    const NAME: &'static str = "f64";
    const DEPTH: Depth = Depth::F64;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_f64(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_f64(indices, buf)
    }
}

impl CellElement for u8 {
    const NAME: &'static str = "u8";
    const DEPTH: Depth = Depth::I8;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_u8(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_u8(indices, buf)
    }
}

impl CellElement for u16 {
    const NAME: &'static str = "u16";
    const DEPTH: Depth = Depth::I16;

    fn read(mat: &Mat, indices: &[usize], buf: &mut [Self]) -> Result<usize, MatError> {
        mat.get_u16(indices, buf)
    }

    fn write(mat: &mut Mat, indices: &[usize], buf: &[Self]) -> Result<usize, MatError> {
        mat.put_u16(indices, buf)
    }
}

/// Accessor for one logical cell, typed by element.
///
/// Holds the coordinate and a mutable borrow of the matrix; no state is
/// retained across calls. Coordinate bounds are checked by the
/// underlying transfer on each use, as the matrix primitives do.
#[derive(Debug)]
pub struct Cell<'m, T: CellElement> {
    mat: &'m mut Mat,
    indices: Vec<usize>,
    _elem: PhantomData<T>,
}

impl Mat {
    /// Typed accessor for the cell at `index`.
    ///
    /// Fails with [`MatError::UnsupportedType`] when this matrix cannot
    /// serve `T`; in that case no element is accessed and no accessor
    /// exists.
    pub fn at<T: CellElement>(
        &mut self,
        index: impl CellIndex,
    ) -> Result<Cell<'_, T>, MatError> {
        if T::DEPTH != self.depth() {
            log::trace!(
                "rejected {} cell accessor on matrix of depth {}",
                T::NAME,
                self.depth()
            );
            return Err(MatError::UnsupportedType {
                requested: T::NAME,
                depth: self.depth(),
            });
        }
        Ok(Cell {
            indices: index.indices(),
            mat: self,
            _elem: PhantomData,
        })
    }
}

impl<'m, T: CellElement> Cell<'m, T> {
    /// Scalar value at channel 0.
    pub fn get(&self) -> Result<T, MatError> {
        let mut buf = [T::zero(); 1];
        T::read(self.mat, &self.indices, &mut buf)?;
        Ok(buf[0])
    }

    pub fn set(&mut self, v: T) -> Result<(), MatError> {
        T::write(self.mat, &self.indices, &[v])?;
        Ok(())
    }

    pub fn get2(&self) -> Result<Tuple2<T>, MatError> {
        let mut buf = [T::zero(); 2];
        T::read(self.mat, &self.indices, &mut buf)?;
        Ok(Tuple2::new(buf[0], buf[1]))
    }

    /// Writes a two-channel value; absent components are written as zero.
    pub fn set2(&mut self, v: Tuple2<T>) -> Result<(), MatError> {
        let buf = [
            v.get_0().unwrap_or_else(T::zero),
            v.get_1().unwrap_or_else(T::zero),
        ];
        T::write(self.mat, &self.indices, &buf)?;
        Ok(())
    }

    pub fn get3(&self) -> Result<Tuple3<T>, MatError> {
        let mut buf = [T::zero(); 3];
        T::read(self.mat, &self.indices, &mut buf)?;
        Ok(Tuple3::new(buf[0], buf[1], buf[2]))
    }

    /// Writes a three-channel value; absent components are written as zero.
    pub fn set3(&mut self, v: Tuple3<T>) -> Result<(), MatError> {
        let buf = [
            v.get_0().unwrap_or_else(T::zero),
            v.get_1().unwrap_or_else(T::zero),
            v.get_2().unwrap_or_else(T::zero),
        ];
        T::write(self.mat, &self.indices, &buf)?;
        Ok(())
    }

    pub fn get4(&self) -> Result<Tuple4<T>, MatError> {
        let mut buf = [T::zero(); 4];
        T::read(self.mat, &self.indices, &mut buf)?;
        Ok(Tuple4::new(buf[0], buf[1], buf[2], buf[3]))
    }

    /// Writes a four-channel value; absent components are written as zero.
    pub fn set4(&mut self, v: Tuple4<T>) -> Result<(), MatError> {
        let buf = [
            v.get_0().unwrap_or_else(T::zero),
            v.get_1().unwrap_or_else(T::zero),
            v.get_2().unwrap_or_else(T::zero),
            v.get_3().unwrap_or_else(T::zero),
        ];
        T::write(self.mat, &self.indices, &buf)?;
        Ok(())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
