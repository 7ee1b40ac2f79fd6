use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{clock, extend_persistent_ttl, registry, rewards, ContractError, StakingConfig};

// ── Storage key constants ───────────────────────────────────────────────────

/// Prefix of the per-(staker, token) position key.
const POSITION: Symbol = symbol_short!("POS");

// ── Types ───────────────────────────────────────────────────────────────────

/// One staker's holding of one token.
///
/// The three fields are always read and written together as a single
/// storage entry, so no reader can observe a half-updated position.
///
/// At any `now >= last_checkpoint` the effective reward is
/// `accumulated_reward + accrue(staked_amount, rate, periods since last_checkpoint)`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    /// Tokens currently held for the staker, in the token's smallest unit.
    pub staked_amount: i128,
    /// Ledger timestamp of the last balance change.
    pub last_checkpoint: u64,
    /// Reward locked in as of `last_checkpoint`. Never decreases.
    pub accumulated_reward: i128,
}

impl StakePosition {
    /// Reward as of `now`, without touching the stored position.
    pub fn projected_reward(&self, config: &StakingConfig, now: u64) -> Result<i128, ContractError> {
        let periods = clock::periods_elapsed(self.last_checkpoint, now, config.period_duration);
        let increment =
            rewards::accrue(self.staked_amount, config.rate, periods).ok_or(ContractError::Overflow)?;

        self.accumulated_reward
            .checked_add(increment)
            .ok_or(ContractError::Overflow)
    }

    /// Roll every whole elapsed period into `accumulated_reward` and restart
    /// the accrual clock at `now`.
    ///
    /// Any sub-period remainder is dropped: the clock snaps to `now` rather
    /// than to the last period boundary. Carrying the remainder forward
    /// would let a balance added late in a period collect that period's
    /// reward in full.
    ///
    /// The cost lands on the staker: any balance change, however small,
    /// forfeits the partial period in progress. With 999 staked at rate 6,
    /// a 1-unit top-up 1.5 periods in leaves 59 after two periods instead
    /// of the 119 an untouched position would show.
    pub fn checkpoint(&self, config: &StakingConfig, now: u64) -> Result<StakePosition, ContractError> {
        Ok(StakePosition {
            staked_amount: self.staked_amount,
            last_checkpoint: now.max(self.last_checkpoint),
            accumulated_reward: self.projected_reward(config, now)?,
        })
    }

    /// Apply a signed balance change. A result below zero is rejected.
    pub fn apply_delta(mut self, delta: i128) -> Result<StakePosition, ContractError> {
        let new_amount = self
            .staked_amount
            .checked_add(delta)
            .ok_or(ContractError::Overflow)?;
        if new_amount < 0 {
            return Err(ContractError::InsufficientStake);
        }
        self.staked_amount = new_amount;
        Ok(self)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(staker: &Address, token: &Address) -> (Symbol, Address, Address) {
    (POSITION, staker.clone(), token.clone())
}

/// Load the stored position, or an all-zero one if the staker never staked
/// `token`.
pub fn load(env: &Env, staker: &Address, token: &Address) -> StakePosition {
    let key = position_key(staker, token);
    match env.storage().persistent().get::<_, StakePosition>(&key) {
        Some(position) => {
            extend_persistent_ttl(env, &key);
            position
        }
        None => StakePosition::default(),
    }
}

/// Persist a position.
pub fn store(env: &Env, staker: &Address, token: &Address, position: &StakePosition) {
    let key = position_key(staker, token);
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}

// ── Checkpoint protocol ─────────────────────────────────────────────────────

/// Checkpoint the (staker, token) position at `now`, then apply `delta`.
///
/// Nothing is written unless every step succeeds: the new position is
/// computed in full first, then stored together with the token registry
/// entry and the per-token total.
pub fn checkpoint_and_mutate(
    env: &Env,
    config: &StakingConfig,
    staker: &Address,
    token: &Address,
    delta: i128,
    now: u64,
) -> Result<StakePosition, ContractError> {
    let updated = load(env, staker, token)
        .checkpoint(config, now)?
        .apply_delta(delta)?;
    let new_total = registry::total_staked(env, token)
        .checked_add(delta)
        .ok_or(ContractError::Overflow)?;

    store(env, staker, token, &updated);
    registry::set_total_staked(env, token, new_total);
    registry::register(env, staker, token);

    Ok(updated)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
