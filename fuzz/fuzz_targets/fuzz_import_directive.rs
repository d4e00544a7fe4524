#![no_main]

use libfuzzer_sys::fuzz_target;

use scssync::ImportId;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        // Parsing an arbitrary line never panics; parsed ids print back.
        if let Some(id) = ImportId::from_directive(line) {
            assert_eq!(ImportId::from_directive(&id.to_directive()), Some(id));
        }
    }
});
