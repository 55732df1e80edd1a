#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(scalar) = fsym_scalar::parse_scalar(data) {
        let rendered = scalar.to_string();
        let reparsed = fsym_scalar::parse_scalar(&rendered)
            .unwrap_or_else(|err| panic!("rendered `{rendered}` failed to reparse: {err}"));
        assert_eq!(reparsed, scalar);
    }
});
