#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Scanning arbitrary bytes must never panic or fail
    let found = zentim::scan_bytes(data, "fuzz", enough::Unstoppable)
        .expect("scan of in-memory data cannot fail");

    let mut last_end = 0;
    for f in &found {
        assert!(f.offset >= last_end, "overlapping or out-of-order results");
        assert!(f.end > f.offset && f.end <= data.len() as u64);
        assert!(f.texture.page <= 31);
        assert_eq!(
            f.texture.pixels().len(),
            f.texture.width as usize * f.texture.height as usize * zentim::BYTES_PER_PIXEL
        );
        last_end = f.end;
    }
});
