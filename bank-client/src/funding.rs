//! Payer identity and its funding.

use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use solana_sdk::signer::keypair::Keypair;

use crate::cluster::Cluster;
use crate::config::{FeeBudget, PayerSource};
use crate::error::{Error, Result};


/// Loads or generates the payer keypair.
pub fn resolve_payer(source: &PayerSource) -> Result<Keypair> {
    match source {
        PayerSource::Ephemeral => Ok(Keypair::new()),
        PayerSource::File(path) => {
            solana_sdk::signer::keypair::read_keypair_file(path).map_err(
                |err| Error::IdentityUnavailable { path: path.clone(), err },
            )
        }
    }
}


/// Returns number of lamports the payer needs to run the workflow.
///
/// That’s the rent exemption minimum for an account of `record_size` bytes
/// plus the fee budget.  Per-signature fee is what the cluster charges for
/// a message with a single signature.
pub fn required_lamports(
    cluster: &impl Cluster,
    payer: &Pubkey,
    record_size: usize,
    budget: FeeBudget,
) -> Result<u64> {
    let blockhash = cluster.latest_blockhash()?;
    let message = Message::new_with_blockhash(&[], Some(payer), &blockhash);
    let signatures = u64::from(message.header.num_required_signatures).max(1);
    let per_signature = cluster.fee_for_message(&message)? / signatures;
    let rent = cluster.minimum_balance_for_rent_exemption(record_size)?;
    let fees = per_signature
        .saturating_mul(budget.signatures)
        .saturating_mul(budget.multiplier);
    tracing::debug!(
        "Rent: {rent} lamports; fee per signature: {per_signature} lamports"
    );
    Ok(rent.saturating_add(fees))
}


/// Makes sure the payer holds at least `required` lamports.
///
/// If the balance is short, requests an airdrop of the difference and waits
/// for it to be confirmed.  Airdrops are available on test clusters only;
/// anywhere else the payer must be funded beforehand.
///
/// Returns the payer’s balance.
pub fn ensure_funded(
    cluster: &impl Cluster,
    payer: &Keypair,
    required: u64,
) -> Result<u64> {
    let address = payer.pubkey();
    let available = cluster.balance(&address)?;
    tracing::info!("Payer {address} holds {available} lamports");
    if available >= required {
        return Ok(available);
    }

    let shortfall = required - available;
    tracing::info!("Requesting airdrop of {shortfall} lamports…");
    let insufficient = |available| Error::InsufficientFunds {
        required,
        available,
    };
    let sig = cluster.request_airdrop(&address, shortfall).map_err(|err| {
        tracing::warn!("Airdrop request failed: {err}");
        insufficient(available)
    })?;
    cluster.confirm(&sig).map_err(|err| {
        tracing::warn!("Airdrop {sig} not confirmed: {err}");
        insufficient(available)
    })?;

    let available = cluster.balance(&address)?;
    tracing::info!("Payer {address} holds {available} lamports");
    if available < required {
        return Err(insufficient(available));
    }
    Ok(available)
}
