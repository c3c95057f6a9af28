//! Calldata gas pricing assumed by the probe.
//!
//! These are the EIP-2028 per-byte costs. Later rule changes (e.g. the
//! EIP-7623 calldata floor) make the expected figures stale; they describe
//! what the probe checks against, the node's actual pricing is never
//! overridden.

/// Gas charged per zero calldata byte.
pub const ZERO_BYTE_GAS: u64 = 4;

/// Gas charged per non-zero calldata byte.
pub const NON_ZERO_BYTE_GAS: u64 = 16;

/// Size of one ABI-encoded static argument.
pub const WORD_BYTES: u64 = 32;

/// Intrinsic calldata cost of `data`.
pub fn calldata_cost(data: &[u8]) -> u64 {
    data.iter()
        .map(|byte| {
            if *byte == 0 {
                ZERO_BYTE_GAS
            } else {
                NON_ZERO_BYTE_GAS
            }
        })
        .sum()
}

/// Expected increase when one argument word changes from all-zero to
/// all-non-zero bytes: `32 * (16 - 4) = 384`.
pub const fn expected_word_difference() -> u64 {
    WORD_BYTES * (NON_ZERO_BYTE_GAS - ZERO_BYTE_GAS)
}

/// Calldata cost difference between two payloads.
pub fn calldata_cost_difference(low: &[u8], high: &[u8]) -> i128 {
    i128::from(calldata_cost(high)) - i128::from(calldata_cost(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_difference_is_384() {
        assert_eq!(expected_word_difference(), 384);
    }

    #[test]
    fn cost_counts_zero_and_non_zero_bytes() {
        assert_eq!(calldata_cost(&[]), 0);
        assert_eq!(calldata_cost(&[0, 0, 1]), 4 + 4 + 16);
    }

    #[test]
    fn all_ones_word_costs_384_more_than_zero_word() {
        let selector = [0xb3, 0xde, 0x64, 0x8b];
        let zero: Vec<u8> = selector.iter().copied().chain([0u8; 32]).collect();
        let max: Vec<u8> = selector.iter().copied().chain([0xffu8; 32]).collect();

        assert_eq!(calldata_cost_difference(&zero, &max), 384);
        assert_eq!(calldata_cost_difference(&max, &zero), -384);
    }
}
