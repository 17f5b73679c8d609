use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, U256};

/// Default tolerance on a quoted output, in whole percent.
pub const DEFAULT_SLIPPAGE_PCT: u64 = 3;

/// `quoted * (100 - pct) / 100`, floor-divided. `pct` saturates at 100.
pub fn apply_slippage_pct(quoted: U256, pct: u64) -> U256 {
    let keep = U256::from(100u64 - pct.min(100));
    quoted * keep / U256::from(100u64)
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub fn deadline_at(now_secs: u64, minutes: u64) -> U256 {
    U256::from(now_secs + minutes * 60)
}

/// Unix timestamp `minutes` from now, as the router expects it.
pub fn deadline_in_minutes(minutes: u64) -> U256 {
    deadline_at(unix_now(), minutes)
}

pub fn path2(token_in: Address, token_out: Address) -> Vec<Address> {
    vec![token_in, token_out]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_percent_slippage_floors() {
        assert_eq!(apply_slippage_pct(U256::from(1000u64), 3), U256::from(970u64));
        // 99 * 97 = 9603 -> 96.03 -> 96
        assert_eq!(apply_slippage_pct(U256::from(99u64), 3), U256::from(96u64));
        assert_eq!(apply_slippage_pct(U256::from(1u64), 3), U256::ZERO);
        assert_eq!(apply_slippage_pct(U256::ZERO, 3), U256::ZERO);
    }

    #[test]
    fn slippage_matches_mul_div_for_large_amounts() {
        let quoted = U256::from(123_456_789_012_345_678_901_234u128);
        let expected = quoted * U256::from(97u64) / U256::from(100u64);
        assert_eq!(apply_slippage_pct(quoted, DEFAULT_SLIPPAGE_PCT), expected);
    }

    #[test]
    fn slippage_saturates() {
        assert_eq!(apply_slippage_pct(U256::from(500u64), 150), U256::ZERO);
    }

    #[test]
    fn deadline_is_now_plus_offset() {
        assert_eq!(deadline_at(1_700_000_000, 30), U256::from(1_700_001_800u64));
        assert_eq!(deadline_at(1_700_000_000, 20), U256::from(1_700_001_200u64));

        let before = unix_now();
        let d = deadline_in_minutes(30);
        let after = unix_now();
        assert!(d >= U256::from(before + 1800) && d <= U256::from(after + 1800));
    }

    #[test]
    fn path2_orders_tokens() {
        let a = Address::repeat_byte(0x11);
        let b = Address::repeat_byte(0x22);
        assert_eq!(path2(a, b), vec![a, b]);
    }
}
