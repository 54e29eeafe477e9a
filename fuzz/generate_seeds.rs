#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32) -> Vec<u8> {
    let row = (width as usize * 3 + 3) & !3;
    let size = 54 + row * height as usize;
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    bmp[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 31 % 251) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let decode_dir = "fuzz/corpus/fuzz_decode";
    let zoom_dir = "fuzz/corpus/fuzz_zoom";
    fs::create_dir_all(decode_dir).unwrap();
    fs::create_dir_all(zoom_dir).unwrap();

    for (w, h) in [(1, 1), (4, 2), (5, 3), (10, 10)] {
        let data = bmp(w, h);
        fs::write(format!("{decode_dir}/bmp_{w}x{h}.bmp"), &data).unwrap();

        // window (0,0) size (w,h), factor 3
        let mut seed = vec![0, 0, w as u8, h as u8, 3];
        seed.extend_from_slice(&data);
        fs::write(format!("{zoom_dir}/zoom_{w}x{h}.bin"), seed).unwrap();
    }

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{decode_dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{decode_dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut negative = bmp(2, 2);
    negative[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    fs::write(format!("{decode_dir}/top_down.bmp"), negative).unwrap();

    println!("Generated seed corpora in {decode_dir}/ and {zoom_dir}/");
}
