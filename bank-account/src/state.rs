//! Layout of the data stored in bank accounts.

/// State of a bank account.
///
/// The on-wire representation is the counter in 4-byte little-endian
/// encoding with no framing or padding.  This is the same format Borsh uses
/// for a struct with a single `u32` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BankAccount {
    pub balance: u32,
}

/// Error returned when account data doesn’t have the length of an encoded
/// [`BankAccount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
#[display(
    "malformed bank account: expected {} bytes but got {len}",
    BankAccount::LEN
)]
pub struct MalformedRecord {
    /// Length of the data which failed to decode.
    pub len: usize,
}

impl std::error::Error for MalformedRecord {}

impl BankAccount {
    /// Length of the encoded account.
    ///
    /// This is the size bank accounts are created with and what their rent
    /// exemption is calculated for.  Changing the layout of the account
    /// requires changing this constant.
    pub const LEN: usize = core::mem::size_of::<u32>();

    /// Creates state with given counter value.
    pub const fn new(balance: u32) -> Self { Self { balance } }

    /// Serialises the state into its fixed-length on-wire representation.
    pub fn encode(&self) -> [u8; Self::LEN] { self.balance.to_le_bytes() }

    /// Deserialises the state from account data.
    ///
    /// Fails unless `bytes` is exactly [`Self::LEN`] bytes long.  Trailing
    /// bytes are not accepted since accounts are created with exact size.
    pub fn decode(bytes: &[u8]) -> Result<Self, MalformedRecord> {
        bytes
            .try_into()
            .map(|bytes| Self::new(u32::from_le_bytes(bytes)))
            .map_err(|_| MalformedRecord { len: bytes.len() })
    }
}
