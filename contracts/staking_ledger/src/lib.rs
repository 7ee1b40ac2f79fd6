#![no_std]

#[cfg(test)]
extern crate std;

pub mod clock;
pub mod events;
pub mod gateway;
pub mod position;
pub mod registry;
pub mod rewards;
pub mod valuation;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val, Vec,
};

use position::StakePosition;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const PRICE_ORACLE: Symbol = symbol_short!("ORACLE");

const INSTANCE_TTL_THRESHOLD: u32 = 100_800; // ~7 days
const INSTANCE_TTL_EXTEND_TO: u32 = 518_400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 518_400; // ~30 days
const PERSISTENT_TTL_EXTEND_TO: u32 = 3_110_400; // ~180 days

// ── Contract errors ──────────────────────────────────────────────────────────

/// Codes start at 100 so they never share a value with a token contract's
/// own errors, which the gateway re-raises unchanged. The Stellar asset
/// contract uses 1..=13.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 100,
    AlreadyInitialized = 101,
    ZeroAmount = 102,
    InvalidAmount = 103,
    InsufficientStake = 104,
    TransferFailed = 105,
    Overflow = 106,
    InvalidConfig = 107,
    InvalidPrice = 108,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Fixed for the lifetime of the contract once `initialize` has run.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Percentage of the staked amount credited per whole period.
    pub rate: u32,
    /// Length of one reward period, in seconds.
    pub period_duration: u64,
}

/// One entry of `get_staked_tokens`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    pub token: Address,
    pub staked_amount: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Multi-token staking ledger.
///
/// Each (staker, token) pair owns an independent [`StakePosition`]. Reward
/// is never computed on a timer: it is rolled forward on every balance
/// change and projected on read, as if it had accrued continuously in whole
/// periods.
#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `config`       – reward rate and period length, immutable afterwards.
    /// * `price_oracle` – contract answering `price_of(token)` for valuation.
    pub fn initialize(
        env: Env,
        config: StakingConfig,
        price_oracle: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if config.period_duration == 0 {
            return Err(ContractError::InvalidConfig);
        }

        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&PRICE_ORACLE, &price_oracle);
        env.storage().instance().set(&INITIALIZED, &true);
        extend_instance_ttl(&env);

        events::publish_initialized(&env, config.rate, config.period_duration, price_oracle);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of `token`.
    ///
    /// The tokens are pulled first, using an allowance the staker granted
    /// this contract; the position is only checkpointed and credited once
    /// the transfer has gone through.
    pub fn stake(
        env: Env,
        staker: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();
        Self::require_positive(amount)?;

        gateway::pull(&env, &token, &staker, amount)?;

        let now = env.ledger().timestamp();
        let updated = position::checkpoint_and_mutate(&env, &config, &staker, &token, amount, now)?;
        extend_instance_ttl(&env);

        events::publish_staked(
            &env,
            staker,
            token,
            amount,
            updated.staked_amount,
            updated.accumulated_reward,
        );

        Ok(())
    }

    /// Withdraw `amount` of previously staked `token`.
    ///
    /// The position is checkpointed and debited before the tokens leave
    /// custody. A failed outbound transfer fails the whole call, which
    /// discards the debit along with it.
    pub fn withdraw(
        env: Env,
        staker: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();
        Self::require_positive(amount)?;

        // Accrual never changes the staked amount, so the stored value is
        // authoritative for the balance check.
        if position::load(&env, &staker, &token).staked_amount < amount {
            return Err(ContractError::InsufficientStake);
        }

        let now = env.ledger().timestamp();
        let delta = amount.checked_neg().ok_or(ContractError::Overflow)?;
        let updated = position::checkpoint_and_mutate(&env, &config, &staker, &token, delta, now)?;

        gateway::push(&env, &token, &staker, amount)?;
        extend_instance_ttl(&env);

        events::publish_withdrawn(
            &env,
            staker,
            token,
            amount,
            updated.staked_amount,
            updated.accumulated_reward,
        );

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Stored staked amount; pending accrual never changes it.
    pub fn get_staked_amount(env: Env, staker: Address, token: Address) -> i128 {
        position::load(&env, &staker, &token).staked_amount
    }

    /// Reward for (staker, token) as of the current ledger time, including
    /// whole periods not yet checkpointed. Zero for a pair that never staked.
    pub fn get_reward(env: Env, staker: Address, token: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        position::load(&env, &staker, &token).projected_reward(&config, env.ledger().timestamp())
    }

    /// Raw stored position, as of its last checkpoint.
    pub fn get_position(env: Env, staker: Address, token: Address) -> StakePosition {
        position::load(&env, &staker, &token)
    }

    /// Every token the staker has ever staked, with its current staked amount.
    pub fn get_staked_tokens(env: Env, staker: Address) -> Vec<StakeRecord> {
        let mut records = Vec::new(&env);
        for token in registry::tokens_of(&env, &staker).iter() {
            let staked_amount = position::load(&env, &staker, &token).staked_amount;
            records.push_back(StakeRecord {
                token,
                staked_amount,
            });
        }
        records
    }

    /// Total reward across all of the staker's tokens, converted through the
    /// price oracle.
    pub fn get_rewards_in_valuation_unit(
        env: Env,
        staker: Address,
    ) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        let oracle = Self::get_price_oracle(env.clone())?;
        valuation::total_reward_in_valuation_unit(
            &env,
            &config,
            &oracle,
            &staker,
            env.ledger().timestamp(),
        )
    }

    /// Sum of every staker's balance of `token`.
    pub fn get_total_staked(env: Env, token: Address) -> i128 {
        registry::total_staked(&env, &token)
    }

    /// Allowance the staker has granted this contract on `token`.
    pub fn get_allowance(env: Env, staker: Address, token: Address) -> i128 {
        gateway::allowance(&env, &token, &staker)
    }

    /// Balance of `token` held in custody by this contract.
    pub fn get_custody_balance(env: Env, token: Address) -> i128 {
        gateway::custody_balance(&env, &token)
    }

    pub fn get_rate(env: Env) -> Result<u32, ContractError> {
        Ok(Self::load_config(&env)?.rate)
    }

    pub fn get_period_duration(env: Env) -> Result<u64, ContractError> {
        Ok(Self::load_config(&env)?.period_duration)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn get_price_oracle(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&PRICE_ORACLE)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Stored configuration; `NotInitialized` until `initialize` has run.
    fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn require_positive(amount: i128) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        Ok(())
    }
}

// ── Storage TTL ──────────────────────────────────────────────────────────────

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

/// Keep a persistent entry alive; positions and registries must outlive any
/// idle stretch between a staker's calls.
pub(crate) fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
