//! Unsigned 8/16-bit views over signed matrix storage.
//!
//! The matrix only stores signed widths natively; these methods bridge
//! to unsigned buffers by reinterpreting each scalar bit-for-bit in
//! both directions (stored -1 reads back as 255 or 65535, never
//! saturated). Buffer lengths are preserved exactly and every
//! underlying error propagates unchanged.

use crate::error::MatError;
use crate::mat::{CellIndex, Mat};

impl Mat {
    pub fn get_u8<I: CellIndex>(&self, index: I, buf: &mut [u8]) -> Result<usize, MatError> {
        let mut signed = vec![0i8; buf.len()];
        let count = self.get_i8(index, &mut signed)?;
        for (dst, src) in buf.iter_mut().zip(&signed) {
            *dst = *src as u8;
        }
        Ok(count)
    }

    pub fn put_u8<I: CellIndex>(&mut self, index: I, buf: &[u8]) -> Result<usize, MatError> {
        let signed: Vec<i8> = buf.iter().map(|&v| v as i8).collect();
        self.put_i8(index, &signed)
    }

    pub fn get_u16<I: CellIndex>(&self, index: I, buf: &mut [u16]) -> Result<usize, MatError> {
        let mut signed = vec![0i16; buf.len()];
        let count = self.get_i16(index, &mut signed)?;
        for (dst, src) in buf.iter_mut().zip(&signed) {
            *dst = *src as u16;
        }
        Ok(count)
    }

    pub fn put_u16<I: CellIndex>(&mut self, index: I, buf: &[u16]) -> Result<usize, MatError> {
        let signed: Vec<i16> = buf.iter().map(|&v| v as i16).collect();
        self.put_i16(index, &signed)
    }
}
