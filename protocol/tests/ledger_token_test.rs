//! Integration tests for the ledger and token primitives.
//!
//! These compose derivation, allocation, token accounting and closing the
//! way a program does, and check that a failed scope leaves nothing behind.

use std::sync::Arc;

use timelock_protocol::config::{TOKEN_ACCOUNT_SPACE, TOKEN_PROGRAM_ID};
use timelock_protocol::token::{
    close_account, create_associated_token_account, create_mint, get_associated_token_address,
    load_mint, load_token_account, mint_to, transfer_checked, TokenError,
};
use timelock_protocol::{
    find_program_address, Address, Authority, Ledger, LedgerError, RentConfig,
};

const FUNDS: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A ledger with a funded payer who is also the authority of a 6-decimal mint.
fn setup() -> (Ledger, Address, Address) {
    let ledger = Ledger::new(RentConfig::default());
    let payer = Address::new_unique();
    let mint = Address::new_unique();
    ledger.airdrop(&payer, FUNDS).unwrap();
    ledger
        .transact(|state| create_mint(state, &payer, &mint, &payer, 6))
        .unwrap();
    (ledger, payer, mint)
}

// ---------------------------------------------------------------------------
// Program-controlled custody
// ---------------------------------------------------------------------------

#[test]
fn derived_address_custody_round_trip() {
    let (ledger, payer, mint) = setup();
    let program = Address::new_unique();
    let (custody, bump) = find_program_address(&[b"custody", payer.as_ref()], &program).unwrap();
    let bump_seed = [bump];
    let seeds: [&[u8]; 3] = [b"custody", payer.as_ref(), &bump_seed];
    let authority = Authority::Program {
        program_id: program,
        seeds: &seeds,
    };

    // Fund the payer's token account and move half into custody.
    let payer_ata = ledger
        .transact(|state| -> Result<Address, TokenError> {
            let ata = create_associated_token_account(state, &payer, &payer, &mint)?;
            mint_to(state, &mint, &ata, 1_000, &payer)?;
            let custody_ata = create_associated_token_account(state, &payer, &custody, &mint)?;
            transfer_checked(state, &ata, &mint, &custody_ata, 500, 6, &Authority::Signer(payer))?;
            Ok(ata)
        })
        .unwrap();
    let custody_ata = get_associated_token_address(&custody, &mint).unwrap();

    // Only the program's seeds can move custody funds back.
    let stolen = ledger.transact(|state| {
        transfer_checked(
            state,
            &custody_ata,
            &mint,
            &payer_ata,
            500,
            6,
            &Authority::Signer(payer),
        )
    });
    assert!(matches!(stolen, Err(TokenError::OwnerMismatch { .. })));

    let swept = ledger
        .transact(|state| -> Result<u64, TokenError> {
            transfer_checked(state, &custody_ata, &mint, &payer_ata, 500, 6, &authority)?;
            close_account(state, &custody_ata, &payer, &authority)
        })
        .unwrap();

    assert_eq!(swept, ledger.minimum_balance(TOKEN_ACCOUNT_SPACE));
    assert!(!ledger.exists(&custody_ata));
    let balance = ledger.read(|state| load_token_account(state, &payer_ata).unwrap().amount);
    assert_eq!(balance, 1_000);
    let supply = ledger.read(|state| load_mint(state, &mint).unwrap().supply);
    assert_eq!(supply, 1_000);
}

#[test]
fn closing_funded_token_account_is_refused() {
    let (ledger, payer, mint) = setup();
    let ata = ledger
        .transact(|state| -> Result<Address, TokenError> {
            let ata = create_associated_token_account(state, &payer, &payer, &mint)?;
            mint_to(state, &mint, &ata, 1, &payer)?;
            Ok(ata)
        })
        .unwrap();

    let err = ledger
        .transact(|state| close_account(state, &ata, &payer, &Authority::Signer(payer)))
        .unwrap_err();
    assert_eq!(
        err,
        TokenError::NonZeroBalance {
            account: ata,
            amount: 1
        }
    );
    assert!(ledger.exists(&ata));
}

#[test]
fn duplicate_associated_account_is_in_use() {
    let (ledger, payer, mint) = setup();
    ledger
        .transact(|state| create_associated_token_account(state, &payer, &payer, &mint))
        .unwrap();
    let before = ledger.lamports(&payer);

    let err = ledger
        .transact(|state| create_associated_token_account(state, &payer, &payer, &mint))
        .unwrap_err();
    assert!(matches!(
        err,
        TokenError::Ledger(LedgerError::AccountInUse(_))
    ));
    assert_eq!(ledger.lamports(&payer), before);
}

#[test]
fn token_accounts_belong_to_the_token_program() {
    let (ledger, payer, mint) = setup();
    let ata = ledger
        .transact(|state| create_associated_token_account(state, &payer, &payer, &mint))
        .unwrap();
    assert_eq!(ledger.account(&ata).unwrap().owner, TOKEN_PROGRAM_ID);
    assert_eq!(ledger.account(&mint).unwrap().owner, TOKEN_PROGRAM_ID);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn parallel_transfers_conserve_lamports() {
    let ledger = Arc::new(Ledger::new(RentConfig::default()));
    let source = Address::new_unique();
    ledger.airdrop(&source, 1_000).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                let dest = Address::new_unique();
                ledger
                    .transact(|state| state.transfer(&source, &dest, 150, &Authority::Signer(source)))
                    .map(|_| dest)
            })
        })
        .collect();

    let winners: Vec<Address> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap().ok())
        .collect();

    // 1_000 / 150 = 6 transfers fit.
    assert_eq!(winners.len(), 6);
    let moved: u64 = winners.iter().map(|d| ledger.lamports(d)).sum();
    assert_eq!(moved + ledger.lamports(&source), 1_000);
}
