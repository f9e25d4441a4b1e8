//! Denomination formatting.

use alloy::primitives::U256;

/// Decimal places between Wei and Ether.
pub const ETHER_DECIMALS: usize = 18;

const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Render a Wei amount as Ether with exactly 18 fractional digits.
///
/// The conversion is exact integer arithmetic, so very large amounts keep
/// every digit.
pub fn wei_to_ether(wei: U256) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = (wei % WEI_PER_ETHER).to_string();
    format!("{}.{:0>width$}", whole, fraction, width = ETHER_DECIMALS)
}
