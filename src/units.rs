use alloy_primitives::U256;

/// Scale a whole-token amount up to the token's raw integer representation.
pub fn to_base_units(whole: u64, decimals: u32) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(decimals))
}

/// Render a raw on-chain integer as a human-readable quantity. Exact integer
/// arithmetic, trailing fractional zeros trimmed.
pub fn format_units(raw: U256, decimals: u32) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = raw / scale;
    let frac = raw % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let mut frac = format!("{:0>width$}", frac, width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{}.{}", whole, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_have_no_fraction() {
        let raw = U256::from(25u64) * U256::from(10u64).pow(U256::from(18));
        assert_eq!(format_units(raw, 18), "25");
    }

    #[test]
    fn receipt_scale_keeps_all_digits() {
        assert_eq!(format_units(U256::from(123456789u64), 8), "1.23456789");
    }

    #[test]
    fn sub_unit_values_pad_leading_zeros() {
        assert_eq!(format_units(U256::from(42u64), 8), "0.00000042");
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        assert_eq!(format_units(U256::from(150000000u64), 8), "1.5");
    }

    #[test]
    fn zero_is_plain() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(7u64), 0), "7");
    }

    #[test]
    fn base_units_round_trip_through_display() {
        let raw = to_base_units(10, 18);
        assert_eq!(raw.to_string(), "10000000000000000000");
        assert_eq!(format_units(raw, 18), "10");
    }
}
