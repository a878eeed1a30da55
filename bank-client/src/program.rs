//! Verification of the bank program deployment.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;

use crate::cluster::Cluster;
use crate::config::ProgramArtifacts;
use crate::error::{Error, Result};


/// Address of a program which has been verified to be deployed and
/// executable.
///
/// Only [`verify_program`] creates values of this type so holding one proves
/// the check has been done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedProgram(Pubkey);

impl VerifiedProgram {
    pub fn id(&self) -> &Pubkey { &self.0 }

    #[cfg(test)]
    pub(crate) fn new_unchecked(program_id: Pubkey) -> Self { Self(program_id) }
}


/// Checks that the bank program is deployed and executable.
///
/// The program address is the one given in `artifacts` or, if not set, the
/// public key of the program keypair produced by the build.
pub fn verify_program(
    cluster: &impl Cluster,
    artifacts: &ProgramArtifacts,
) -> Result<VerifiedProgram> {
    let program_id = match artifacts.program_id {
        Some(program_id) => program_id,
        None => read_program_id(artifacts)?,
    };
    tracing::debug!("Checking program {program_id}");

    let Some(account) = cluster.account(&program_id)? else {
        let so_path = artifacts.so_path.exists().then(|| {
            artifacts.so_path.clone()
        });
        return Err(Error::ProgramNotDeployed { program_id, so_path });
    };
    if !account.executable {
        return Err(Error::ProgramNotExecutable(program_id));
    }
    tracing::info!("Using program {program_id}");
    Ok(VerifiedProgram(program_id))
}


fn read_program_id(artifacts: &ProgramArtifacts) -> Result<Pubkey> {
    let path = &artifacts.keypair_path;
    solana_sdk::signer::keypair::read_keypair_file(path)
        .map(|keypair| keypair.pubkey())
        .map_err(|err| Error::ProgramKeypairMissing {
            path: path.clone(),
            so_path: artifacts.so_path.clone(),
            err,
        })
}
