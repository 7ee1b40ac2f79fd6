/// Number of whole reward periods between `last_checkpoint` and `now`.
///
/// ```text
/// periods = floor((now − last_checkpoint) / period_duration)
/// ```
///
/// Sub-period time yields zero; rewards are never pro-rated. A `now` that
/// precedes `last_checkpoint` also yields zero rather than wrapping, and a
/// zero `period_duration` (rejected at initialization) yields zero instead of
/// dividing by zero.
pub fn periods_elapsed(last_checkpoint: u64, now: u64, period_duration: u64) -> u64 {
    now.saturating_sub(last_checkpoint)
        .checked_div(period_duration)
        .unwrap_or(0)
}
