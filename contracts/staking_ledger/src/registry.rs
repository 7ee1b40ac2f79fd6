use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::{events, extend_persistent_ttl};

const TOKENS: Symbol = symbol_short!("TOKENS");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

/// Every token `staker` has ever staked, in first-stake order.
///
/// Entries are never removed; a fully withdrawn token stays listed so its
/// locked-in reward remains visible to valuation.
pub fn tokens_of(env: &Env, staker: &Address) -> Vec<Address> {
    let key = (TOKENS, staker.clone());
    match env.storage().persistent().get::<_, Vec<Address>>(&key) {
        Some(tokens) => {
            extend_persistent_ttl(env, &key);
            tokens
        }
        None => Vec::new(env),
    }
}

/// Add `token` to the staker's registry. Returns `true` on first insertion.
pub fn register(env: &Env, staker: &Address, token: &Address) -> bool {
    let mut tokens = tokens_of(env, staker);
    if tokens.contains(token) {
        return false;
    }

    tokens.push_back(token.clone());
    let key = (TOKENS, staker.clone());
    env.storage().persistent().set(&key, &tokens);
    extend_persistent_ttl(env, &key);

    events::publish_token_registered(env, staker.clone(), token.clone());
    true
}

/// Sum of every staker's balance of `token`.
pub fn total_staked(env: &Env, token: &Address) -> i128 {
    let key = (TOTAL_STAKED, token.clone());
    let total = env.storage().persistent().get::<_, i128>(&key);
    if total.is_some() {
        extend_persistent_ttl(env, &key);
    }
    total.unwrap_or(0)
}

pub fn set_total_staked(env: &Env, token: &Address, total: i128) {
    let key = (TOTAL_STAKED, token.clone());
    env.storage().persistent().set(&key, &total);
    extend_persistent_ttl(env, &key);
}
