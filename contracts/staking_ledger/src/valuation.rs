use soroban_sdk::{contractclient, Address, Env};

use crate::{position, registry, ContractError, StakingConfig};

/// Price lookup collaborator.
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracleInterface {
    /// Valuation units per unit of `token` reward.
    fn price_of(env: Env, token: Address) -> i128;
}

/// Sum of `projected_reward × price_of(token)` across every token in the
/// staker's registry.
///
/// Tokens whose reward is still zero are skipped without consulting the
/// oracle; they contribute nothing whatever the price.
pub fn total_reward_in_valuation_unit(
    env: &Env,
    config: &StakingConfig,
    oracle: &Address,
    staker: &Address,
    now: u64,
) -> Result<i128, ContractError> {
    let prices = PriceOracleClient::new(env, oracle);
    let mut total: i128 = 0;

    for token in registry::tokens_of(env, staker).iter() {
        let reward = position::load(env, staker, &token).projected_reward(config, now)?;
        if reward == 0 {
            continue;
        }

        let price = prices.price_of(&token);
        if price < 0 {
            return Err(ContractError::InvalidPrice);
        }

        let value = reward.checked_mul(price).ok_or(ContractError::Overflow)?;
        total = total.checked_add(value).ok_or(ContractError::Overflow)?;
    }

    Ok(total)
}
