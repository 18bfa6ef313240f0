/// Currency the gateway quotes and verifies amounts in.
pub const REFERENCE_CURRENCY: &str = "IRR";

/// Fixed Rial/Toman protocol factor, not configurable.
const UNIT_FACTOR: i64 = 10;

/// Converts an order's minor-unit amount into the gateway's expected unit.
/// Must be applied identically on the request and verify paths.
pub fn normalize_amount(amount_minor: i64, currency_code: &str) -> i64 {
    if currency_code == REFERENCE_CURRENCY {
        amount_minor * UNIT_FACTOR
    } else {
        amount_minor
    }
}
