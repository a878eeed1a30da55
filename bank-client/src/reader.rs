use bank_account::state::BankAccount;
use solana_sdk::pubkey::Pubkey;

use crate::cluster::Cluster;
use crate::error::{Error, Result};


/// Fetches and decodes the bank account.
pub fn read_account(
    cluster: &impl Cluster,
    address: &Pubkey,
) -> Result<BankAccount> {
    let account =
        cluster.account(address)?.ok_or(Error::AccountNotFound(*address))?;
    Ok(BankAccount::decode(&account.data)?)
}
