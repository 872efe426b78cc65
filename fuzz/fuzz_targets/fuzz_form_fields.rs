#![no_main]

use libfuzzer_sys::fuzz_target;

use calcof_core::{CalculatorFactory, DefaultFactory, FormFields, CALCULATOR_NAMES};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let name = CALCULATOR_NAMES[usize::from(selector) % CALCULATOR_NAMES.len()];
    let Ok(fields) = FormFields::parse_pairs(text.split('&')) else {
        return;
    };
    let factory = DefaultFactory::new();
    if let Ok(calc) = factory.get(name) {
        // Arbitrary form input must produce a result or an error, never a panic.
        let _ = calc.calculate_fields(&fields);
    }
});
