//! Network operations the workflow performs against a Solana cluster.

use solana_client::client_error::Result as ClientResult;
use solana_client::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::UiTransactionEncoding;


/// Subset of the cluster’s JSON-RPC interface used by the workflow.
///
/// All calls block until the cluster responds.  Calls which confirm
/// something (airdrops and transactions) return only once the cluster reports
/// it at the commitment level the handle was configured with.
pub trait Cluster {
    /// Returns URL of the cluster endpoint.
    fn url(&self) -> String;

    /// Returns version of the software the cluster node is running.
    fn version(&self) -> ClientResult<String>;

    fn latest_blockhash(&self) -> ClientResult<Hash>;

    /// Returns fee the cluster would charge for the message.
    fn fee_for_message(&self, message: &Message) -> ClientResult<u64>;

    /// Returns minimum balance an account of `len` bytes must hold to be
    /// exempt from rent.
    fn minimum_balance_for_rent_exemption(
        &self,
        len: usize,
    ) -> ClientResult<u64>;

    fn balance(&self, address: &Pubkey) -> ClientResult<u64>;

    /// Requests an airdrop.  Only test clusters support it.
    fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> ClientResult<Signature>;

    /// Blocks until transaction with given signature is confirmed.
    fn confirm(&self, signature: &Signature) -> ClientResult<()>;

    /// Returns account at given address or `None` if there’s no account.
    fn account(&self, address: &Pubkey) -> ClientResult<Option<Account>>;

    /// Sends a signed transaction and blocks until it’s confirmed.
    fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature>;

    /// Returns log messages of a confirmed transaction if the cluster
    /// recorded any.
    fn transaction_logs(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<Vec<String>>>;
}


impl Cluster for RpcClient {
    fn url(&self) -> String { RpcClient::url(self) }

    fn version(&self) -> ClientResult<String> {
        self.get_version().map(|version| version.solana_core)
    }

    fn latest_blockhash(&self) -> ClientResult<Hash> {
        self.get_latest_blockhash()
    }

    fn fee_for_message(&self, message: &Message) -> ClientResult<u64> {
        self.get_fee_for_message(message)
    }

    fn minimum_balance_for_rent_exemption(
        &self,
        len: usize,
    ) -> ClientResult<u64> {
        self.get_minimum_balance_for_rent_exemption(len)
    }

    fn balance(&self, address: &Pubkey) -> ClientResult<u64> {
        self.get_balance(address)
    }

    fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> ClientResult<Signature> {
        RpcClient::request_airdrop(self, address, lamports)
    }

    fn confirm(&self, signature: &Signature) -> ClientResult<()> {
        self.poll_for_signature_with_commitment(signature, self.commitment())
    }

    fn account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        self.get_account_with_commitment(address, self.commitment())
            .map(|response| response.value)
    }

    fn send_and_confirm(&self, tx: &Transaction) -> ClientResult<Signature> {
        self.send_and_confirm_transaction(tx)
    }

    fn transaction_logs(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<Vec<String>>> {
        let encoding = UiTransactionEncoding::Binary;
        let resp = self.get_transaction(signature, encoding)?;
        let logs = resp
            .transaction
            .meta
            .map(|meta| meta.log_messages)
            .and_then(|messages| match messages {
                OptionSerializer::Some(messages) => Some(messages),
                _ => None,
            });
        Ok(logs)
    }
}
