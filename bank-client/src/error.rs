use std::path::PathBuf;

use bank_account::state::MalformedRecord;
use solana_client::client_error::ClientError;
use solana_sdk::pubkey::{Pubkey, PubkeyError};


pub type Result<T = (), E = Error> = core::result::Result<T, E>;


/// Reasons the workflow may abort.
///
/// Each stage of the workflow fails with its own variant so the message
/// printed to the user identifies the prerequisite which was not met.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum Error {
    #[display("failed to read payer keypair at ‘{}’: {err}", path.display())]
    #[from(ignore)]
    IdentityUnavailable { path: PathBuf, err: Box<dyn std::error::Error> },

    #[display(
        "insufficient funds: {required} lamports required but payer holds \
         {available}"
    )]
    #[from(ignore)]
    InsufficientFunds { required: u64, available: u64 },

    #[display(
        "failed to read program keypair at ‘{}’: {err}; program may need to \
         be deployed with `solana program deploy {}`",
        path.display(),
        so_path.display()
    )]
    #[from(ignore)]
    ProgramKeypairMissing {
        path: PathBuf,
        so_path: PathBuf,
        err: Box<dyn std::error::Error>,
    },

    #[display("{}", deploy_hint(*program_id, so_path.as_ref()))]
    #[from(ignore)]
    ProgramNotDeployed { program_id: Pubkey, so_path: Option<PathBuf> },

    #[display("program {_0} is not executable")]
    #[from(ignore)]
    ProgramNotExecutable(Pubkey),

    #[display("transaction rejected: {_0}")]
    #[from(ignore)]
    TransactionRejected(ClientError),

    #[display("cannot find the bank account {_0}")]
    #[from(ignore)]
    AccountNotFound(Pubkey),

    MalformedRecord(MalformedRecord),

    #[display("cannot derive bank account address: {_0}")]
    AddressDerivation(PubkeyError),

    #[display("{_0}")]
    #[from(ignore)]
    Config(String),

    Client(ClientError),
}

impl std::error::Error for Error {}


/// Formats the message for a program which has no account on the cluster.
///
/// `so_path` is set if the program’s shared object exists locally which
/// means the program has been built but not deployed.
fn deploy_hint(program_id: Pubkey, so_path: Option<&PathBuf>) -> String {
    match so_path {
        Some(path) => format!(
            "program {program_id} needs to be deployed with `solana program \
             deploy {}`",
            path.display()
        ),
        None => format!("program {program_id} needs to be built and deployed"),
    }
}
