#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header or row errors are fine; panics are not.
    let _ = profiler_config::parse_shot_log_csv(data);
});
