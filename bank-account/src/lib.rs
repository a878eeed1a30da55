// bank-account — account layout and client helpers for the Solana bank
//                program
// © 2025 by Michał Nazarewicz <mina86@mina86.com>
//
// This program is free software; you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation; either version 2 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program; if not, see <https://www.gnu.org/licenses/>.

//! Account layout of the bank program and helpers for off-chain clients
//! which provision and update bank accounts.
//!
//! The bank program keeps a single unsigned 32-bit counter in each account it
//! owns.  The account data is exactly [`state::BankAccount::LEN`] bytes long
//! and holds the counter in little-endian encoding.  Anything reading accounts
//! created for the bank program must use this very layout.
//!
//! Bank accounts are not PDAs.  Their addresses are derived with
//! [`Pubkey::create_with_seed`] from the owner’s address, a text seed and the
//! bank program id which means that a client can find its account again
//! without storing the address anywhere (see
//! [`instruction::account_address`], available with `client` feature).
//!
//! [`Pubkey::create_with_seed`]: solana_program::pubkey::Pubkey::create_with_seed
//!
//! ## Features
#![doc = document_features::document_features!()]

#[cfg(feature = "client")]
pub mod instruction;

pub mod state;
