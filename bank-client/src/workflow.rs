//! The provisioning workflow.
//!
//! Stages run strictly one after another and each waits for its effects to
//! be confirmed by the cluster before the next one starts:
//!
//! 1. connect — query the cluster version,
//! 2. fund — load the payer and make sure it can pay for rent and fees,
//! 3. verify — check the bank program is deployed and executable,
//! 4. provision — create the bank account unless it already exists,
//! 5. dispatch — call the bank program on the account,
//! 6. read — fetch and decode the account.
//!
//! The first failure aborts the workflow.  Nothing is retried; since account
//! creation is skipped when the account exists, re-running after a failure
//! is safe.

use bank_account::state::BankAccount;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};

use crate::cluster::Cluster;
use crate::config::Config;
use crate::error::Result;
use crate::{dispatch, funding, program, provision, reader};


/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub payer: Pubkey,
    pub program_id: Pubkey,
    pub account: Pubkey,
    /// Signature of the account creation transaction if the account was
    /// created in this run.
    pub created: Option<Signature>,
    /// Signature of the bank program call.
    pub signature: Signature,
    pub record: BankAccount,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "payer": self.payer.to_string(),
            "program_id": self.program_id.to_string(),
            "account": self.account.to_string(),
            "created": self.created.map(|sig| sig.to_string()),
            "signature": self.signature.to_string(),
            "balance": self.record.balance,
        })
    }
}


/// Runs the workflow against given cluster.
pub fn run(cluster: &impl Cluster, config: &Config) -> Result<Report> {
    let version = cluster.version()?;
    tracing::info!(
        "Connection to cluster established: {} (version {version})",
        cluster.url()
    );

    let payer = funding::resolve_payer(&config.payer)?;
    let required = funding::required_lamports(
        cluster,
        &payer.pubkey(),
        config.record_size,
        config.fee_budget,
    )?;
    funding::ensure_funded(cluster, &payer, required)?;

    let program = program::verify_program(cluster, &config.program)?;

    let account = provision::provision_account(
        cluster,
        &payer,
        &program,
        &config.seed,
        config.record_size,
    )?;

    let signature =
        dispatch::dispatch(cluster, &payer, &program, &account.address)?;

    let record = reader::read_account(cluster, &account.address)?;

    Ok(Report {
        payer: payer.pubkey(),
        program_id: *program.id(),
        account: account.address,
        created: account.created,
        signature,
        record,
    })
}
