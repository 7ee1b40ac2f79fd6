#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};
use staking_ledger::{StakingConfig, StakingContract, StakingContractClient};

const STAKERS: usize = 2;
const TOKENS: usize = 2;
const MINTED: i128 = 1_000_000_000_000;

#[derive(Arbitrary, Debug)]
enum Op {
    Stake { staker: u8, token: u8, amount: u32 },
    Withdraw { staker: u8, token: u8, amount: u32 },
    Advance { seconds: u32 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    rate: u8,
    period_hours: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let config = StakingConfig {
        rate: u32::from(input.rate),
        period_duration: u64::from(input.period_hours.max(1)) * 3_600,
    };
    client.initialize(&config, &Address::generate(&env));

    let admin = Address::generate(&env);
    let stakers: Vec<Address> = (0..STAKERS).map(|_| Address::generate(&env)).collect();
    let tokens: Vec<token::Client> = (0..TOKENS)
        .map(|_| {
            let sac = env.register_stellar_asset_contract_v2(admin.clone());
            token::Client::new(&env, &sac.address())
        })
        .collect();
    for t in &tokens {
        let minter = token::StellarAssetClient::new(&env, &t.address);
        for s in &stakers {
            minter.mint(s, &MINTED);
            t.approve(s, &contract_id, &MINTED, &1_000);
        }
    }

    for op in input.ops.iter().take(64) {
        match *op {
            Op::Stake { staker, token, amount } => {
                let s = &stakers[staker as usize % STAKERS];
                let t = &tokens[token as usize % TOKENS];
                let before = client.get_position(s, &t.address);
                let reward_before = client.get_reward(s, &t.address);
                let amount = i128::from(amount);

                match client.try_stake(s, &t.address, &amount) {
                    Ok(_) => {
                        let after = client.get_position(s, &t.address);
                        assert_eq!(after.staked_amount, before.staked_amount + amount);
                        assert!(after.accumulated_reward >= before.accumulated_reward);
                        assert_eq!(client.get_reward(s, &t.address), reward_before);
                    }
                    Err(_) => {
                        assert_eq!(amount, 0);
                        assert_eq!(client.get_position(s, &t.address), before);
                    }
                }
            }
            Op::Withdraw { staker, token, amount } => {
                let s = &stakers[staker as usize % STAKERS];
                let t = &tokens[token as usize % TOKENS];
                let before = client.get_position(s, &t.address);
                let reward_before = client.get_reward(s, &t.address);
                let amount = i128::from(amount);

                match client.try_withdraw(s, &t.address, &amount) {
                    Ok(_) => {
                        let after = client.get_position(s, &t.address);
                        assert_eq!(after.staked_amount, before.staked_amount - amount);
                        assert!(after.staked_amount >= 0);
                        assert_eq!(client.get_reward(s, &t.address), reward_before);
                    }
                    Err(_) => {
                        assert!(amount == 0 || amount > before.staked_amount);
                        assert_eq!(client.get_position(s, &t.address), before);
                    }
                }
            }
            Op::Advance { seconds } => {
                env.ledger().with_mut(|li| li.timestamp += u64::from(seconds));
            }
        }

        for t in &tokens {
            let total: i128 = stakers
                .iter()
                .map(|s| client.get_staked_amount(s, &t.address))
                .sum();
            assert_eq!(client.get_total_staked(&t.address), total);
            assert_eq!(client.get_custody_balance(&t.address), total);
        }
    }
});
