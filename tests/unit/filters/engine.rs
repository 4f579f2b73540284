use super::*;

fn one_px(rgba: [u8; 4], key: FilterKey) -> [u8; 4] {
    let mut buf = rgba;
    apply_filter(&mut buf, key).unwrap();
    buf
}

#[test]
fn none_is_bit_identical() {
    let mut buf = vec![0u8, 1, 2, 3, 250, 251, 252, 253];
    let before = buf.clone();
    apply_filter(&mut buf, FilterKey::None).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn ragged_buffer_is_rejected() {
    let mut buf = vec![0u8; 7];
    assert!(apply_filter(&mut buf, FilterKey::Grayscale).is_err());
}

#[test]
fn grayscale_equalizes_channels() {
    let out = one_px([200, 100, 50, 255], FilterKey::Grayscale);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
    assert_eq!(out[3], 255);
}

#[test]
fn grayscale_is_idempotent() {
    for rgba in [[200u8, 100, 50, 255], [3, 254, 77, 10], [255, 255, 255, 0]] {
        let once = one_px(rgba, FilterKey::Grayscale);
        let twice = one_px(once, FilterKey::Grayscale);
        assert_eq!(once, twice, "input {rgba:?}");
    }
}

#[test]
fn sepia_on_white_matches_truncated_matrix() {
    // 0.393 + 0.769 + 0.189 = 1.351 overflows and clamps; blue lands on
    // 238 only if the final value is truncated, not rounded.
    let out = one_px([255, 255, 255, 255], FilterKey::Sepia);
    assert_eq!(out, [255, 255, 238, 255]);
}

#[test]
fn alpha_is_never_touched() {
    for key in FilterKey::all() {
        let out = one_px([120, 30, 200, 77], key);
        assert_eq!(out[3], 77, "filter {key}");
    }
}

#[test]
fn all_filters_stay_in_range() {
    let extremes = [
        [0u8, 0, 0, 255],
        [255, 255, 255, 255],
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 0, 255, 255],
    ];
    for key in FilterKey::all() {
        for rgba in extremes {
            // quantize() guarantees range; this guards the u8 cast path.
            let _ = one_px(rgba, key);
        }
    }
}

#[test]
fn steps_chain_without_intermediate_clamp() {
    // brightness(2) then contrast(0.5) on a bright pixel: if the
    // intermediate were clamped to 255 the result would differ.
    let steps = [
        FilterStep::Brightness { amount: 2.0 },
        FilterStep::Contrast { amount: 0.5 },
    ];
    let out = apply_steps(&steps, [200.0, 200.0, 200.0]);
    // (400/255 - 0.5) * 0.5 + 0.5 = 1.0343..., * 255 = 263.75
    assert!((out[0] - 263.75).abs() < 1e-9);
}

#[test]
fn saturate_identity_at_one() {
    let steps = [FilterStep::Saturate { amount: 1.0 }];
    let out = apply_steps(&steps, [10.0, 20.0, 30.0]);
    assert!((out[0] - 10.0).abs() < 1e-9);
    assert!((out[1] - 20.0).abs() < 1e-9);
    assert!((out[2] - 30.0).abs() < 1e-9);
}

#[test]
fn hue_rotate_preserves_gray() {
    // The rotation matrix rows each sum to 1, so neutral pixels are fixed.
    let steps = [FilterStep::HueRotate { degrees: 20.0 }];
    let out = apply_steps(&steps, [128.0, 128.0, 128.0]);
    for c in out {
        assert!((c - 128.0).abs() < 1e-6);
    }
}

#[test]
fn vintage_applies_sepia_then_contrast() {
    let manual = apply_steps(
        &[
            FilterStep::Sepia { amount: 0.5 },
            FilterStep::Contrast { amount: 0.9 },
        ],
        [90.0, 140.0, 60.0],
    );
    let via_key = apply_steps(FilterKey::Vintage.steps(), [90.0, 140.0, 60.0]);
    assert_eq!(manual, via_key);
}
