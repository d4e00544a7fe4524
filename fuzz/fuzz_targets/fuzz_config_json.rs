#![no_main]

use libfuzzer_sys::fuzz_target;

use scssync::ProjectConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and spec conversion never panic
        if let Ok(config) = serde_json::from_str::<ProjectConfig>(content) {
            let _ = config.watcher_specs();
        }
    }
});
