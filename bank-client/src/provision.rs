//! Creation of the bank account.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::signer::keypair::Keypair;
use solana_sdk::transaction::Transaction;

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::program::VerifiedProgram;


/// The payer’s bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataAccount {
    pub address: Pubkey,
    /// Signature of the transaction which created the account or `None` if
    /// the account already existed.
    pub created: Option<Signature>,
}


/// Makes sure the payer’s bank account exists.
///
/// The address is derived from the payer, `seed` and the program.  If
/// there’s no account at that address yet, a rent-exempt account of
/// `record_size` bytes owned by the program is created.  Otherwise nothing
/// is sent.  Running this multiple times creates the account at most once.
pub fn provision_account(
    cluster: &impl Cluster,
    payer: &Keypair,
    program: &VerifiedProgram,
    seed: &str,
    record_size: usize,
) -> Result<DataAccount> {
    let payer_key = payer.pubkey();
    let address = bank_account::instruction::account_address(
        &payer_key,
        seed,
        program.id(),
    )?;

    if let Some(account) = cluster.account(&address)? {
        tracing::info!("Bank account {address} already exists");
        if account.owner != *program.id() {
            tracing::warn!(
                "Bank account {address} is owned by {} rather than {}",
                account.owner,
                program.id()
            );
        }
        if account.data.len() != record_size {
            tracing::warn!(
                "Bank account {address} holds {} bytes rather than \
                 {record_size}",
                account.data.len()
            );
        }
        return Ok(DataAccount { address, created: None });
    }

    let lamports = cluster.minimum_balance_for_rent_exemption(record_size)?;
    let (instruction, address) = bank_account::instruction::create_account(
        &payer_key,
        seed,
        program.id(),
        lamports,
        record_size as u64,
    )?;
    tracing::info!(
        "Creating bank account {address} with {lamports} lamports…"
    );

    let blockhash = cluster.latest_blockhash()?;
    let tx = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer_key),
        &[payer],
        blockhash,
    );
    let sig =
        cluster.send_and_confirm(&tx).map_err(Error::TransactionRejected)?;
    tracing::info!("Bank account created; signature: {sig}");
    Ok(DataAccount { address, created: Some(sig) })
}
