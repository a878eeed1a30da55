//! Client helpers for provisioning and updating bank accounts.

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::{Pubkey, PubkeyError};

type Result<T = (), E = PubkeyError> = core::result::Result<T, E>;

/// Default seed used to derive the bank account address.
pub const DEFAULT_SEED: &str = "bank";

/// Returns address of the bank account belonging to `owner`.
///
/// The address is derived with [`Pubkey::create_with_seed`] using `owner` as
/// the base, the text `seed` and the bank program id as the owner of the
/// account.  Derivation is a pure function of its arguments so the same
/// owner and seed always map to the same account.
///
/// Fails with `MaxSeedLengthExceeded` if `seed` is longer than 32 bytes or
/// `IllegalOwner` if `program_id` looks like a PDA marker.
pub fn account_address(
    owner: &Pubkey,
    seed: &str,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    Pubkey::create_with_seed(owner, seed, program_id)
}

/// Generates instruction creating the bank account for `payer`.
///
/// The account is created by the system program at the address returned by
/// [`account_address`] with `payer` being both the funding account and the
/// base of the derivation.  It is allocated `space` bytes, funded with
/// `lamports` and assigned to `program_id`.  Normally `space` is
/// [`crate::state::BankAccount::LEN`] and `lamports` is the rent exemption
/// minimum for that size.
///
/// Returns the instruction and the address of the new account.  Only
/// `payer` needs to sign the transaction.
pub fn create_account(
    payer: &Pubkey,
    seed: &str,
    program_id: &Pubkey,
    lamports: u64,
    space: u64,
) -> Result<(Instruction, Pubkey)> {
    let address = account_address(payer, seed, program_id)?;
    let instruction =
        solana_system_interface::instruction::create_account_with_seed(
            payer, &address, payer, seed, lamports, space, program_id,
        );
    Ok((instruction, address))
}

/// Generates instruction calling the bank program on given account.
///
/// The program supports a single operation and takes no instruction data.
/// The account is passed writable but not as a signer.
pub fn update(program_id: Pubkey, account: Pubkey) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![AccountMeta::new(account, false)],
        data: Vec::new(),
    }
}
