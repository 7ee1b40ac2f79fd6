use soroban_sdk::{
    contractclient, panic_with_error, Address, ConversionError, Env, Error, InvokeError,
};

use crate::ContractError;

/// The slice of the SEP-41 token interface the ledger relies on.
///
/// Any token contract exposing these entry points can be staked; each token
/// address resolves to its own implementation at call time.
#[contractclient(name = "StakeTokenClient")]
pub trait StakeTokenInterface {
    fn balance(env: Env, id: Address) -> i128;
    fn allowance(env: Env, from: Address, spender: Address) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
}

type TokenCallResult = Result<Result<(), ConversionError>, Result<Error, InvokeError>>;

/// Pull `amount` of `token` from `from` into ledger custody.
///
/// Spends an allowance `from` must have granted to this contract beforehand.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    let result = StakeTokenClient::new(env, token).try_transfer_from(&custody, from, &custody, &amount);
    settle(env, result)
}

/// Return `amount` of `token` from ledger custody to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    let result = StakeTokenClient::new(env, token).try_transfer(&custody, to, &amount);
    settle(env, result)
}

/// Allowance `owner` has granted the ledger on `token`.
pub fn allowance(env: &Env, token: &Address, owner: &Address) -> i128 {
    StakeTokenClient::new(env, token).allowance(owner, &env.current_contract_address())
}

/// Balance of `token` held by the ledger itself.
pub fn custody_balance(env: &Env, token: &Address) -> i128 {
    StakeTokenClient::new(env, token).balance(&env.current_contract_address())
}

/// A token failure that names its own reason is re-raised unchanged so the
/// caller sees, e.g., the token's insufficient-allowance error rather than a
/// ledger error. Only reasonless aborts become `TransferFailed`.
fn settle(env: &Env, result: TokenCallResult) -> Result<(), ContractError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Err(Ok(reason)) => panic_with_error!(env, reason),
        Err(Err(InvokeError::Contract(code))) => {
            panic_with_error!(env, Error::from_contract_error(code))
        }
        Err(Err(InvokeError::Abort)) | Ok(Err(_)) => Err(ContractError::TransferFailed),
    }
}
