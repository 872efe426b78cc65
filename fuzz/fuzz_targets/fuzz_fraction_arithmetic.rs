#![no_main]

use libfuzzer_sys::fuzz_target;

use calcof_core::fraction::{simplify_fraction, FractionPair};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let word = |i: usize| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&data[i * 8..i * 8 + 8]);
        i64::from_le_bytes(buf)
    };
    let lhs = FractionPair::new(word(0), word(1));
    let rhs = FractionPair::new(word(2), word(3));

    // Should not panic, including at i64::MIN.
    let _ = simplify_fraction(lhs.numerator, lhs.denominator);
    for result in [
        lhs.checked_add(rhs),
        lhs.checked_sub(rhs),
        lhs.checked_mul(rhs),
        lhs.checked_div(rhs),
    ] {
        if let Ok(f) = result {
            assert!(f.denominator > 0);
        }
    }
});
