//! In-memory cluster used in tests.
//!
//! [`MockCluster`] keeps accounts in a map and executes transactions
//! synchronously.  It understands the system program’s CreateAccountWithSeed
//! instruction and treats every other executable account as the bank program,
//! i.e. increments the counter of the first account passed to it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use bank_account::state::BankAccount;
use solana_client::client_error::{
    ClientError, ClientErrorKind, Result as ClientResult,
};
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::InstructionError;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::rent::Rent;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use solana_system_interface::instruction::SystemInstruction;

use crate::cluster::Cluster;


pub const LAMPORTS_PER_SIGNATURE: u64 = 5000;


pub struct MockCluster {
    accounts: RefCell<HashMap<Pubkey, Account>>,
    logs: RefCell<HashMap<Signature, Vec<String>>>,
    /// All transactions which were successfully executed.
    pub transactions: RefCell<Vec<Transaction>>,
    /// Number of lamports each airdrop request is short by.
    pub airdrop_shortfall: Cell<u64>,
    pub airdrop_enabled: Cell<bool>,
    pub airdrops: Cell<usize>,
}

impl MockCluster {
    pub fn new() -> Self {
        Self {
            accounts: Default::default(),
            logs: Default::default(),
            transactions: Default::default(),
            airdrop_shortfall: Cell::new(0),
            airdrop_enabled: Cell::new(true),
            airdrops: Cell::new(0),
        }
    }

    /// Creates a cluster with the bank program deployed; returns the
    /// cluster and the program id.
    pub fn with_program() -> (Self, Pubkey) {
        let cluster = Self::new();
        let program_id = Pubkey::new_unique();
        cluster.deploy(program_id, true);
        (cluster, program_id)
    }

    /// Adds a program account.
    pub fn deploy(&self, program_id: Pubkey, executable: bool) {
        self.set_account(program_id, Account {
            lamports: 1_141_440,
            data: vec![0; 36],
            owner: solana_sdk::bpf_loader_upgradeable::ID,
            executable,
            rent_epoch: 0,
        });
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.borrow_mut().insert(address, account);
    }

    pub fn get(&self, address: &Pubkey) -> Option<Account> {
        self.accounts.borrow().get(address).cloned()
    }

    pub fn fund(&self, address: &Pubkey, lamports: u64) {
        self.accounts
            .borrow_mut()
            .entry(*address)
            .or_insert_with(|| {
                Account::new(0, 0, &solana_system_interface::program::ID)
            })
            .lamports += lamports;
    }

    /// Returns number of executed transactions calling given program.
    pub fn calls_to(&self, program_id: &Pubkey) -> usize {
        self.transactions
            .borrow()
            .iter()
            .flat_map(|tx| {
                let keys = &tx.message.account_keys;
                tx.message.instructions.iter().map(move |ix| {
                    keys[usize::from(ix.program_id_index)]
                })
            })
            .filter(|id| id == program_id)
            .count()
    }

    fn execute(&self, tx: &Transaction) -> Result<(), TransactionError> {
        tx.verify()?;
        let keys = &tx.message.account_keys;
        let payer = keys.first().ok_or(TransactionError::AccountNotFound)?;
        let fee = LAMPORTS_PER_SIGNATURE *
            u64::from(tx.message.header.num_required_signatures);

        let mut accounts = self.accounts.borrow().clone();
        let balance = accounts.get_mut(payer).map(|acc| &mut acc.lamports);
        match balance {
            Some(lamports) if *lamports >= fee => *lamports -= fee,
            _ => return Err(TransactionError::InsufficientFundsForFee),
        }

        for (index, ix) in tx.message.instructions.iter().enumerate() {
            let index = index as u8;
            let program_id = keys[usize::from(ix.program_id_index)];
            let ix_keys: Vec<Pubkey> = ix
                .accounts
                .iter()
                .map(|idx| keys[usize::from(*idx)])
                .collect();
            let res = if program_id == solana_system_interface::program::ID {
                execute_system(&mut accounts, &ix_keys, &ix.data)
            } else {
                match accounts.get(&program_id) {
                    Some(program) if program.executable => {}
                    Some(_) => {
                        return Err(TransactionError::InvalidProgramForExecution)
                    }
                    None => {
                        return Err(TransactionError::ProgramAccountNotFound)
                    }
                }
                execute_bank(&mut accounts, &program_id, &ix_keys)
            };
            res.map_err(|err| TransactionError::InstructionError(index, err))?;
        }

        *self.accounts.borrow_mut() = accounts;
        let logs = tx
            .message
            .instructions
            .iter()
            .map(|ix| keys[usize::from(ix.program_id_index)])
            .flat_map(|id| {
                [
                    format!("Program {id} invoke [1]"),
                    format!("Program {id} success"),
                ]
            })
            .collect();
        self.logs.borrow_mut().insert(tx.signatures[0], logs);
        self.transactions.borrow_mut().push(tx.clone());
        Ok(())
    }
}


fn execute_system(
    accounts: &mut HashMap<Pubkey, Account>,
    keys: &[Pubkey],
    data: &[u8],
) -> Result<(), InstructionError> {
    let ix: SystemInstruction = bincode::deserialize(data)
        .map_err(|_| InstructionError::InvalidInstructionData)?;
    let SystemInstruction::CreateAccountWithSeed {
        base,
        seed,
        lamports,
        space,
        owner,
    } = ix
    else {
        return Err(InstructionError::InvalidInstructionData);
    };
    let (from, to) = match keys {
        [from, to, ..] => (from, to),
        _ => return Err(InstructionError::NotEnoughAccountKeys),
    };
    let address = Pubkey::create_with_seed(&base, &seed, &owner)
        .map_err(|_| InstructionError::InvalidSeeds)?;
    if address != *to {
        return Err(InstructionError::InvalidSeeds);
    }
    if accounts.contains_key(to) {
        // SystemError::AccountAlreadyInUse
        return Err(InstructionError::Custom(0));
    }
    let from = accounts
        .get_mut(from)
        .filter(|acc| acc.lamports >= lamports)
        // SystemError::ResultWithNegativeLamports
        .ok_or(InstructionError::Custom(1))?;
    from.lamports -= lamports;
    let space = usize::try_from(space)
        .map_err(|_| InstructionError::InvalidAccountData)?;
    accounts.insert(*to, Account {
        lamports,
        data: vec![0; space],
        owner,
        executable: false,
        rent_epoch: 0,
    });
    Ok(())
}


fn execute_bank(
    accounts: &mut HashMap<Pubkey, Account>,
    program_id: &Pubkey,
    keys: &[Pubkey],
) -> Result<(), InstructionError> {
    let key = keys.first().ok_or(InstructionError::NotEnoughAccountKeys)?;
    let account = accounts
        .get_mut(key)
        .ok_or(InstructionError::MissingAccount)?;
    if account.owner != *program_id {
        return Err(InstructionError::IncorrectProgramId);
    }
    let mut state = BankAccount::decode(&account.data)
        .map_err(|_| InstructionError::InvalidAccountData)?;
    state.balance = state
        .balance
        .checked_add(1)
        .ok_or(InstructionError::ArithmeticOverflow)?;
    account.data.copy_from_slice(&state.encode());
    Ok(())
}


fn custom(msg: &str) -> ClientError {
    ClientErrorKind::Custom(msg.to_string()).into()
}


impl Cluster for MockCluster {
    fn url(&self) -> String { "mock://cluster".to_string() }

    fn version(&self) -> ClientResult<String> { Ok("2.3.0".to_string()) }

    fn latest_blockhash(&self) -> ClientResult<Hash> { Ok(Hash::new_unique()) }

    fn fee_for_message(&self, message: &Message) -> ClientResult<u64> {
        let signatures = u64::from(message.header.num_required_signatures);
        Ok(LAMPORTS_PER_SIGNATURE * signatures)
    }

    fn minimum_balance_for_rent_exemption(
        &self,
        len: usize,
    ) -> ClientResult<u64> {
        Ok(Rent::default().minimum_balance(len))
    }

    fn balance(&self, address: &Pubkey) -> ClientResult<u64> {
        Ok(self.get(address).map_or(0, |acc| acc.lamports))
    }

    fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> ClientResult<Signature> {
        if !self.airdrop_enabled.get() {
            return Err(custom("airdrops are not available"));
        }
        let lamports = lamports.saturating_sub(self.airdrop_shortfall.get());
        self.fund(address, lamports);
        self.airdrops.set(self.airdrops.get() + 1);
        Ok(Signature::new_unique())
    }

    fn confirm(&self, _signature: &Signature) -> ClientResult<()> { Ok(()) }

    fn account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        Ok(self.get(address))
    }

    fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature> {
        self.execute(tx)?;
        Ok(tx.signatures[0])
    }

    fn transaction_logs(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<Vec<String>>> {
        self.logs
            .borrow()
            .get(signature)
            .cloned()
            .map(Some)
            .ok_or_else(|| custom("transaction not found"))
    }
}
