#![no_main]
use libfuzzer_sys::fuzz_target;
use zenzoom::bmp::{DecodeMode, DecodeRequest};
use zenzoom::Limits;

fuzz_target!(|data: &[u8]| {
    // Keep hostile headers from asking for gigabytes.
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Every mode must return an error instead of panicking.
    for mode in [DecodeMode::Strict, DecodeMode::Standard, DecodeMode::Reference] {
        let _ = DecodeRequest::new(data)
            .with_mode(mode)
            .with_limits(&limits)
            .decode(&enough::Unstoppable);
    }
    let _ = zenzoom::bmp::probe(data);
});
