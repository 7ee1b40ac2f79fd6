/// Denominator applied to the configured rate.
///
/// The rate is a whole percentage credited per elapsed period, so a rate of
/// `6` means 6 / 100 of the staked amount per period.
pub const RATE_DENOMINATOR: i128 = 100;

// ── Core accrual step ───────────────────────────────────────────────────────

/// Reward earned by a constant `staked` balance over `periods` whole periods.
///
/// ```text
/// increment = staked × rate × periods / RATE_DENOMINATOR
/// ```
///
/// Integer arithmetic with truncation; fractional reward units are dropped.
/// The product is formed before dividing so that splitting a stretch of
/// periods at a checkpoint never loses more than the single truncation of
/// each stretch.
///
/// A zero balance never accrues, whatever the elapsed time. This is what
/// freezes a position's reward after a full withdrawal.
///
/// Returns `None` when the intermediate product overflows `i128`.
///
/// # Arguments
/// * `staked`  – balance held constant across the stretch (never negative)
/// * `rate`    – percentage of `staked` credited per period
/// * `periods` – whole periods elapsed, see [`crate::clock::periods_elapsed`]
pub fn accrue(staked: i128, rate: u32, periods: u64) -> Option<i128> {
    if staked <= 0 || rate == 0 || periods == 0 {
        return Some(0);
    }

    // u32 and u64 both widen losslessly into i128.
    let scaled = staked
        .checked_mul(i128::from(rate))?
        .checked_mul(i128::from(periods))?;

    Some(scaled / RATE_DENOMINATOR)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
