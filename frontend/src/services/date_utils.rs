use js_sys::Date;

/// Current calendar (year, month) in the browser's local time, month 1-12
pub fn current_year_month() -> (i32, u32) {
    let now = Date::new_0();
    (now.get_full_year() as i32, now.get_month() + 1)
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_current_year_month_is_in_range() {
        let (year, month) = current_year_month();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
    }
}
