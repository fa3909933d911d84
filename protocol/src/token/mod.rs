//! # Token Accounting
//!
//! Fungible tokens on top of the ledger. A **mint** defines a token type
//! (decimals, supply, who may mint). A **token account** holds a balance of
//! one mint for one controlling authority. Both are ordinary ledger accounts
//! owned by the token program, so they carry allocation reserves and obey
//! the same atomic scopes as native balances.
//!
//! The canonical token account for `(wallet, mint)` lives at the
//! *associated token address*, a program-derived address, so anybody can
//! find it without a lookup. The authority of a token account may itself be
//! a program-derived address; such an account can only be debited or
//! closed by the program presenting the matching seeds.
//!
//! ```text
//! state.rs   — Mint and TokenAccount records
//! program.rs — create_mint, create_associated_token_account, mint_to,
//!              transfer_checked, close_account
//! error.rs   — TokenError
//! ```

pub mod error;
pub mod program;
pub mod state;

pub use error::TokenError;
pub use program::{
    close_account, create_associated_token_account, create_mint, get_associated_token_address,
    load_mint, load_token_account, mint_to, transfer_checked,
};
pub use state::{Mint, TokenAccount};
