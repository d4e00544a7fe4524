#![no_main]

use libfuzzer_sys::fuzz_target;

use scssync::domain::services::marker_region;
use scssync::OwnerId;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(owner) = OwnerId::new("fuzz") else {
        return;
    };
    let body = vec!["@import \"a\";".to_string(), "@import \"b/c\";".to_string()];

    // Never panics, and a second pass changes nothing.
    let once = marker_region::synchronize(text, &owner, &body, 3);
    let twice = marker_region::synchronize(&once, &owner, &body, 3);
    assert_eq!(once, twice);

    let _ = marker_region::remove(text, &owner, true);
    let _ = marker_region::remove(text, &owner, false);
});
