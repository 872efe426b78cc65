#![no_main]

use libfuzzer_sys::fuzz_target;

use calcof_core::fraction::decimal_to_fraction;
use calcof_core::gcd;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Any string either fails to parse or yields a reduced fraction.
    if let Ok(f) = decimal_to_fraction(text) {
        assert!(f.denominator > 0);
        assert!(f.numerator == 0 || gcd(f.numerator, f.denominator) == 1);
    }
});
