#![no_main]
use libfuzzer_sys::fuzz_target;
use zenzoom::*;

fuzz_target!(|data: &[u8]| {
    // First 5 bytes pick the window and factor, the rest is the bitmap.
    let Some((params, bitmap)) = data.split_first_chunk::<5>() else {
        return;
    };
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let Ok(source) = bmp::DecodeRequest::new(bitmap)
        .with_limits(&limits)
        .decode(&enough::Unstoppable)
    else {
        return;
    };

    let rect = Rect::new(
        u32::from(params[0]),
        u32::from(params[1]),
        u32::from(params[2]),
        u32::from(params[3]),
    );
    let Ok(factor) = ScaleFactor::new(u32::from(params[4] % 8)) else {
        return;
    };

    // Invalid windows must be rejected, valid ones must agree across variants.
    let Ok(window) = Variant::Scalar.crop(&source, rect, &enough::Unstoppable) else {
        return;
    };
    let expected = Variant::Scalar.zoom(&window, factor, &enough::Unstoppable).unwrap();
    for v in [Variant::Vectorized, Variant::AlternateVectorized] {
        let w = v.crop(&source, rect, &enough::Unstoppable).unwrap();
        assert_eq!(w, window, "{v} window mismatch");
        let z = v.zoom(&w, factor, &enough::Unstoppable).unwrap();
        assert_eq!(z, expected, "{v} zoom mismatch");
    }

    // Re-encoding and decoding must reproduce the zoomed pixels.
    let encoded = bmp::encode_bmp(&expected, &enough::Unstoppable).unwrap();
    let decoded = bmp::decode_bmp(&encoded, &enough::Unstoppable).unwrap();
    assert_eq!(decoded, expected, "roundtrip pixel mismatch");
});
