use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Emitted once, when the contract is configured.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub rate: u32,
    pub period_duration: u64,
    pub price_oracle: Address,
}

/// Emitted after a successful stake; amounts are post-checkpoint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub amount: i128,
    pub staked_amount: i128,
    pub accumulated_reward: i128,
    pub timestamp: u64,
}

/// Emitted after a successful withdrawal; amounts are post-checkpoint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub amount: i128,
    pub staked_amount: i128,
    pub accumulated_reward: i128,
    pub timestamp: u64,
}

/// Emitted the first time a staker stakes a given token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRegisteredEvent {
    pub staker: Address,
    pub token: Address,
}

pub fn publish_initialized(env: &Env, rate: u32, period_duration: u64, price_oracle: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            rate,
            period_duration,
            price_oracle,
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    token: Address,
    amount: i128,
    staked_amount: i128,
    accumulated_reward: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker, token),
        StakedEvent {
            amount,
            staked_amount,
            accumulated_reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    token: Address,
    amount: i128,
    staked_amount: i128,
    accumulated_reward: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker, token),
        WithdrawnEvent {
            amount,
            staked_amount,
            accumulated_reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_registered(env: &Env, staker: Address, token: Address) {
    env.events().publish(
        (symbol_short!("TKN_REG"), staker.clone(), token.clone()),
        TokenRegisteredEvent { staker, token },
    );
}
