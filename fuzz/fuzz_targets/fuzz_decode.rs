#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Single-resource decode and header reads must never panic
    let _ = zentim::decode(data, enough::Unstoppable);
    let _ = zentim::TimInfo::from_bytes(data);
});
