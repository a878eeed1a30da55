use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::signer::keypair::Keypair;
use solana_sdk::transaction::Transaction;

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::program::VerifiedProgram;


/// Calls the bank program on given account and waits for confirmation.
///
/// Once the transaction is confirmed, its log messages are fetched and
/// logged at debug level.  Failure to fetch the logs is not an error.
pub fn dispatch(
    cluster: &impl Cluster,
    payer: &Keypair,
    program: &VerifiedProgram,
    account: &Pubkey,
) -> Result<Signature> {
    let instruction =
        bank_account::instruction::update(*program.id(), *account);
    let blockhash = cluster.latest_blockhash()?;
    tracing::debug!("Latest blockhash: {blockhash}");
    tracing::info!("Sending transaction to {}…", program.id());

    let tx = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        &[payer],
        blockhash,
    );
    let sig =
        cluster.send_and_confirm(&tx).map_err(Error::TransactionRejected)?;
    tracing::info!("Signature: {sig}");

    match cluster.transaction_logs(&sig) {
        Ok(Some(messages)) => {
            for msg in messages {
                tracing::debug!("{msg}");
            }
        }
        Ok(None) => tracing::debug!("No log messages"),
        Err(err) => tracing::warn!("Failed to fetch transaction {sig}: {err}"),
    }
    Ok(sig)
}
