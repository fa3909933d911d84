//! # Token Program Operations
//!
//! Each function mutates a [`LedgerState`] and is meant to run inside a
//! [`Ledger::transact`](crate::ledger::Ledger::transact) scope together with
//! whatever else the caller is doing.

use super::error::TokenError;
use super::state::{Mint, TokenAccount};
use crate::address::Address;
use crate::config::{
    ASSOCIATED_TOKEN_PROGRAM_ID, MINT_SPACE, TOKEN_ACCOUNT_SPACE, TOKEN_PROGRAM_ID,
};
use crate::crypto::hash::account_discriminator;
use crate::derivation::{find_program_address, DerivationError};
use crate::ledger::{read_record, write_record, Authority, LedgerError, LedgerState};

/// The associated token address for `(wallet, mint)`:
/// `find_program_address([wallet, token_program, mint], associated_token_program)`.
pub fn get_associated_token_address(
    wallet: &Address,
    mint: &Address,
) -> Result<Address, DerivationError> {
    let (address, _) = find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )?;
    Ok(address)
}

/// Reads the mint record at `mint`.
pub fn load_mint(state: &LedgerState, mint: &Address) -> Result<Mint, TokenError> {
    let data = token_owned_data(state, mint)?;
    Ok(read_record(
        mint,
        data,
        account_discriminator(Mint::RECORD_NAME),
    )?)
}

/// Reads the token account record at `account`.
pub fn load_token_account(
    state: &LedgerState,
    account: &Address,
) -> Result<TokenAccount, TokenError> {
    let data = token_owned_data(state, account)?;
    Ok(read_record(
        account,
        data,
        account_discriminator(TokenAccount::RECORD_NAME),
    )?)
}

/// Allocates and initializes a mint at `mint`, paid for by `payer`.
pub fn create_mint(
    state: &mut LedgerState,
    payer: &Address,
    mint: &Address,
    mint_authority: &Address,
    decimals: u8,
) -> Result<(), TokenError> {
    state.allocate(payer, mint, MINT_SPACE, &TOKEN_PROGRAM_ID)?;
    let record = Mint {
        mint_authority: *mint_authority,
        supply: 0,
        decimals,
    };
    store_mint(state, mint, &record)?;
    tracing::debug!(%mint, decimals, "mint created");
    Ok(())
}

/// Allocates the associated token account of `wallet` for `mint`, paid for
/// by `payer`. Returns its address.
pub fn create_associated_token_account(
    state: &mut LedgerState,
    payer: &Address,
    wallet: &Address,
    mint: &Address,
) -> Result<Address, TokenError> {
    load_mint(state, mint)?;
    let address = get_associated_token_address(wallet, mint).map_err(LedgerError::from)?;
    state.allocate(payer, &address, TOKEN_ACCOUNT_SPACE, &TOKEN_PROGRAM_ID)?;
    let record = TokenAccount {
        mint: *mint,
        owner: *wallet,
        amount: 0,
    };
    store_token_account(state, &address, &record)?;
    tracing::debug!(%wallet, %mint, account = %address, "associated token account created");
    Ok(address)
}

/// Creates `amount` new units of `mint` in `destination`.
pub fn mint_to(
    state: &mut LedgerState,
    mint: &Address,
    destination: &Address,
    amount: u64,
    authority: &Address,
) -> Result<(), TokenError> {
    let mut mint_record = load_mint(state, mint)?;
    if mint_record.mint_authority != *authority {
        return Err(TokenError::OwnerMismatch {
            account: *mint,
            expected: mint_record.mint_authority,
            actual: *authority,
        });
    }
    let mut dest = load_token_account(state, destination)?;
    ensure_mint(destination, &dest, mint)?;

    mint_record.supply = mint_record
        .supply
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    dest.amount = dest.amount.checked_add(amount).ok_or(TokenError::Overflow)?;

    store_mint(state, mint, &mint_record)?;
    store_token_account(state, destination, &dest)?;
    Ok(())
}

/// Moves `amount` units of `mint` from `source` to `destination`.
///
/// `decimals` must match the mint, both accounts must hold `mint`, and the
/// authority must resolve to the source account's owner.
pub fn transfer_checked(
    state: &mut LedgerState,
    source: &Address,
    mint: &Address,
    destination: &Address,
    amount: u64,
    decimals: u8,
    authority: &Authority<'_>,
) -> Result<(), TokenError> {
    let mint_record = load_mint(state, mint)?;
    if mint_record.decimals != decimals {
        return Err(TokenError::DecimalsMismatch {
            actual: mint_record.decimals,
            supplied: decimals,
        });
    }

    let mut from = load_token_account(state, source)?;
    ensure_mint(source, &from, mint)?;
    let mut to = load_token_account(state, destination)?;
    ensure_mint(destination, &to, mint)?;
    ensure_owner(source, &from, authority)?;

    if from.amount < amount {
        return Err(TokenError::InsufficientFunds {
            account: *source,
            available: from.amount,
            required: amount,
        });
    }
    if source == destination {
        return Ok(());
    }

    from.amount -= amount;
    to.amount = to.amount.checked_add(amount).ok_or(TokenError::Overflow)?;

    store_token_account(state, source, &from)?;
    store_token_account(state, destination, &to)?;
    Ok(())
}

/// Closes an empty token account, sweeping its reserve to `destination`.
/// Returns the lamports swept.
pub fn close_account(
    state: &mut LedgerState,
    account: &Address,
    destination: &Address,
    authority: &Authority<'_>,
) -> Result<u64, TokenError> {
    let record = load_token_account(state, account)?;
    ensure_owner(account, &record, authority)?;
    if record.amount != 0 {
        return Err(TokenError::NonZeroBalance {
            account: *account,
            amount: record.amount,
        });
    }
    Ok(state.close(account, destination, &TOKEN_PROGRAM_ID)?)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_owned_data<'s>(state: &'s LedgerState, address: &Address) -> Result<&'s [u8], TokenError> {
    let account = state
        .account(address)
        .ok_or(LedgerError::AccountNotFound(*address))?;
    if account.owner != TOKEN_PROGRAM_ID {
        return Err(LedgerError::OwnerMismatch {
            account: *address,
            expected: TOKEN_PROGRAM_ID,
            actual: account.owner,
        }
        .into());
    }
    Ok(&account.data)
}

fn store_mint(state: &mut LedgerState, address: &Address, mint: &Mint) -> Result<(), TokenError> {
    let data = state.data_mut(address, &TOKEN_PROGRAM_ID)?;
    write_record(address, data, account_discriminator(Mint::RECORD_NAME), mint)?;
    Ok(())
}

fn store_token_account(
    state: &mut LedgerState,
    address: &Address,
    record: &TokenAccount,
) -> Result<(), TokenError> {
    let data = state.data_mut(address, &TOKEN_PROGRAM_ID)?;
    write_record(
        address,
        data,
        account_discriminator(TokenAccount::RECORD_NAME),
        record,
    )?;
    Ok(())
}

fn ensure_mint(address: &Address, record: &TokenAccount, mint: &Address) -> Result<(), TokenError> {
    if record.mint != *mint {
        return Err(TokenError::MintMismatch {
            account: *address,
            expected: *mint,
            actual: record.mint,
        });
    }
    Ok(())
}

fn ensure_owner(
    address: &Address,
    record: &TokenAccount,
    authority: &Authority<'_>,
) -> Result<(), TokenError> {
    let actual = authority.resolve()?;
    if actual != record.owner {
        return Err(TokenError::OwnerMismatch {
            account: *address,
            expected: record.owner,
            actual,
        });
    }
    Ok(())
}
