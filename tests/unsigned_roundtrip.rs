//! Round-trip tests for the unsigned 8/16-bit views over signed storage.

use matcell::{Depth, Mat, MatError};
use rand::Rng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// u8 views
// ---------------------------------------------------------------------------

#[test]
fn u8_roundtrip_every_value() -> anyhow::Result<()> {
    init_logging();
    let mut mat = Mat::zeros(&[16, 16], 1, Depth::I8)?;
    let written: Vec<u8> = (0..=255u8).collect();

    assert_eq!(mat.put_u8((0, 0), &written)?, 256);

    let mut read = vec![0u8; 256];
    assert_eq!(mat.get_u8((0, 0), &mut read)?, 256);
    assert_eq!(read, written);
    Ok(())
}

#[test]
fn u8_reinterpretation_is_wraparound_not_saturation() {
    init_logging();
    let mut mat = Mat::zeros(&[1, 2], 1, Depth::I8).unwrap();
    // 128 and 255 land on the signed boundary bit patterns.
    mat.put_u8((0, 0), &[128, 255]).unwrap();

    let mut signed = [0i8; 2];
    mat.get_i8((0, 0), &mut signed).unwrap();
    assert_eq!(signed, [-128, -1]);

    let mut unsigned = [0u8; 2];
    mat.get_u8((0, 0), &mut unsigned).unwrap();
    assert_eq!(unsigned, [128, 255]);
}

#[test]
fn u8_multichannel_roundtrip_via_index_vector() {
    init_logging();
    let mut mat = Mat::zeros(&[4, 4], 3, Depth::I8).unwrap();
    mat.put_u8([2, 1], &[10, 200, 30]).unwrap();

    let mut pixel = [0u8; 3];
    mat.get_u8([2, 1], &mut pixel).unwrap();
    assert_eq!(pixel, [10, 200, 30]);
}

#[test]
fn u8_random_buffers_roundtrip() {
    init_logging();
    let mut rng = rand::thread_rng();
    let mut mat = Mat::zeros(&[8, 8], 4, Depth::I8).unwrap();

    for _ in 0..32 {
        let row = rng.gen_range(0..8);
        let written: Vec<u8> = (0..4).map(|_| rng.gen()).collect();
        mat.put_u8((row, 0), &written).unwrap();

        let mut read = vec![0u8; 4];
        mat.get_u8((row, 0), &mut read).unwrap();
        assert_eq!(read, written);
    }
}

// ---------------------------------------------------------------------------
// u16 views
// ---------------------------------------------------------------------------

#[test]
fn u16_roundtrip_boundary_values() -> anyhow::Result<()> {
    init_logging();
    let mut mat = Mat::zeros(&[1, 6], 1, Depth::I16)?;
    let written = [0u16, 1, 32767, 32768, 65534, 65535];

    assert_eq!(mat.put_u16((0, 0), &written)?, 6);

    let mut signed = [0i16; 6];
    mat.get_i16((0, 0), &mut signed)?;
    assert_eq!(signed, [0, 1, 32767, -32768, -2, -1]);

    let mut read = [0u16; 6];
    assert_eq!(mat.get_u16((0, 0), &mut read)?, 6);
    assert_eq!(read, written);
    Ok(())
}

#[test]
fn u16_random_buffers_roundtrip() {
    init_logging();
    let mut rng = rand::thread_rng();
    let mut mat = Mat::zeros(&[32, 32], 1, Depth::I16).unwrap();

    for _ in 0..16 {
        let row = rng.gen_range(0..32);
        let written: Vec<u16> = (0..32).map(|_| rng.gen()).collect();
        mat.put_u16((row, 0), &written).unwrap();

        let mut read = vec![0u16; 32];
        mat.get_u16((row, 0), &mut read).unwrap();
        assert_eq!(read, written);
    }
}

// ---------------------------------------------------------------------------
// Error propagation and transfer counts
// ---------------------------------------------------------------------------

#[test]
fn unsigned_length_errors_match_underlying_primitive() {
    init_logging();
    let mut mat = Mat::zeros(&[2, 2], 3, Depth::I8).unwrap();
    let mut buf = [0u8; 2];
    assert_eq!(
        mat.get_u8((0, 0), &mut buf),
        Err(MatError::BadBufferLength {
            len: 2,
            channels: 3
        })
    );
    assert_eq!(
        mat.put_u8((0, 0), &[1, 2]),
        Err(MatError::BadBufferLength {
            len: 2,
            channels: 3
        })
    );
}

#[test]
fn unsigned_depth_mismatch_propagates() {
    init_logging();
    let mut mat = Mat::zeros(&[2, 2], 1, Depth::F64).unwrap();
    assert_eq!(
        mat.put_u16((0, 0), &[7]),
        Err(MatError::DepthMismatch {
            requested: Depth::I16,
            actual: Depth::F64
        })
    );
}

#[test]
fn unsigned_transfer_reports_clamped_count() {
    init_logging();
    let mut mat = Mat::zeros(&[2, 2], 1, Depth::I8).unwrap();
    // Start at the last cell; only one scalar remains.
    assert_eq!(mat.put_u8((1, 1), &[9, 9, 9]).unwrap(), 1);
    let mut buf = [0u8; 3];
    assert_eq!(mat.get_u8((1, 1), &mut buf).unwrap(), 1);
    assert_eq!(buf, [9, 0, 0]);
}
