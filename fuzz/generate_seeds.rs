#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn words(ws: &[u16]) -> Vec<u8> {
    ws.iter().flat_map(|w| w.to_le_bytes()).collect()
}

fn tim(
    flags: u32,
    clut: Option<([u16; 4], usize)>,
    image: [u16; 4],
    pixel_words: usize,
) -> Vec<u8> {
    let mut out = words(&[0x0010, 0x0000]);
    out.extend_from_slice(&flags.to_le_bytes());
    if let Some((header, colors)) = clut {
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend(words(&header));
        out.extend((0..colors as u16).flat_map(|c| (c.wrapping_mul(0x0421)).to_le_bytes()));
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend(words(&image));
    out.extend((0..pixel_words as u16).flat_map(|p| p.wrapping_mul(0x1357).to_le_bytes()));
    out
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_scan", "fuzz/corpus/fuzz_decode"] {
        fs::create_dir_all(dir).unwrap();
        let seed = |name: &str, bytes: Vec<u8>| fs::write(format!("{dir}/{name}"), bytes).unwrap();

        // One TIM per pixel mode
        seed("4bpp.tim", tim(0x8, Some(([0, 480, 16, 1], 16)), [0, 0, 2, 2], 4));
        seed("8bpp.tim", tim(0x9, Some(([0, 481, 256, 1], 256)), [320, 256, 2, 2], 4));
        seed("16bpp.tim", tim(0x2, None, [640, 0, 3, 2], 6));
        seed("24bpp.tim", tim(0x3, None, [0, 0, 4, 2], 12));
        seed("mode4.tim", tim(0x4, None, [0, 0, 1, 1], 1));

        // Embedded in junk
        let mut packed = vec![0xAAu8; 37];
        packed.extend(tim(0x2, None, [0, 0, 1, 1], 1));
        packed.extend(tim(0x8, Some(([0, 480, 16, 1], 16)), [64, 0, 1, 1], 1));
        packed.extend([0x10, 0x00, 0x00, 0x00, 0x08]);
        seed("packed.bin", packed);

        // Truncated/malformed seeds for edge coverage
        seed("empty.bin", Vec::new());
        seed("magic_only.bin", b"\x10\x00\x00\x00".to_vec());
        seed("zero_clut.bin", tim(0x8, Some(([0, 0, 0, 1], 16)), [0, 0, 1, 1], 1));
        // Huge declared size with no pixel data behind it
        seed("huge_header.bin", tim(0x2, None, [0, 0, 0xFFFF, 0xFFFF], 0));
    }

    println!("Generated seed corpora in fuzz/corpus/");
}
