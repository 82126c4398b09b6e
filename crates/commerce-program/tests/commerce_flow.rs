//! Integration tests exercising the full client pipeline:
//! derive PDAs -> build instructions -> encode/decode account state.
//!
//! These tests use the public API only (the same surface the UI hooks
//! consume) to catch regressions at crate boundaries.

use commerce_program::state::{MERCHANT_ACCOUNT_TAG, PAYMENT_ACCOUNT_TAG};
use commerce_program::{
    clear_payment, create_payment, initialize_merchant, pda, refund_payment, update_refund_policy,
    AccountRole, Address, Merchant, Payment, RefundPolicy, Status, PROGRAM_ID,
};

fn authority() -> Address {
    Address::new([0x02; 32])
}

fn mints() -> [Address; 3] {
    [
        Address::new([0xA1; 32]),
        Address::new([0xA2; 32]),
        Address::new([0xA3; 32]),
    ]
}

// ─── merchant onboarding ────────────────────────────────────────────

#[test]
fn merchant_onboarding_pipeline() {
    let payer = Address::new([0x01; 32]);

    // 1. Build the registration instruction.
    let ix = initialize_merchant(&payer, &authority(), &mints()).unwrap();
    assert_eq!(ix.program_id, PROGRAM_ID);
    assert_eq!(ix.accounts.len(), 13);

    // 2. The merchant PDA slot and the bump in the data must agree with a
    //    fresh derivation.
    let (merchant_pda, bump) = pda::derive_merchant_address(&authority()).unwrap();
    assert_eq!(ix.accounts[2].address, merchant_pda);
    assert_eq!(ix.data, vec![0x00, bump]);

    // 3. Simulate the chain storing the resulting account, then read it
    //    back the way the UI layer would.
    let stored = Merchant {
        authority: authority(),
        bump,
        refund_policy: RefundPolicy {
            max_amount: 0,
            max_time_after_purchase: 0,
        },
        accepted_mints: mints().to_vec(),
    };
    let bytes = stored.encode();
    assert_eq!(bytes[0], MERCHANT_ACCOUNT_TAG);

    let decoded = Merchant::decode(&bytes).unwrap();
    assert_eq!(decoded, stored);

    let json = serde_json::to_value(&decoded).unwrap();
    assert_eq!(json["authority"], authority().to_base58());
}

#[test]
fn refund_policy_update_pipeline() {
    let policy = RefundPolicy {
        max_amount: 25_000_000,
        max_time_after_purchase: 30 * 86_400,
    };

    let ix = update_refund_policy(&authority(), &policy).unwrap();
    assert_eq!(ix.data[0], 0x01);

    // The argument bytes are exactly the policy's own encoding.
    assert_eq!(&ix.data[1..], policy.encode().as_slice());
}

// ─── payment lifecycle ──────────────────────────────────────────────

#[test]
fn payment_lifecycle_pipeline() {
    let buyer = Address::new([0x33; 32]);
    let mint = mints()[0];
    let order_id = [0x5A; 32];
    let (merchant_pda, _) = pda::derive_merchant_address(&authority()).unwrap();

    // 1. The buyer pays.
    let ix = create_payment(
        &buyer,
        &merchant_pda,
        &mint,
        5_250_000,
        &order_id,
        Some("order #42"),
    )
    .unwrap();
    let (payment_pda, bump) = pda::derive_payment_address(&merchant_pda, &order_id).unwrap();
    assert_eq!(ix.accounts[2].address, payment_pda);
    assert!(ix.accounts[0].role.is_signer());

    // 2. Simulate the stored payment account.
    let mut stored = Payment {
        merchant: merchant_pda,
        buyer,
        mint,
        amount: 5_250_000,
        order_id,
        created_at: 1_754_000_000,
        status: Status::Paid,
        bump,
        memo: Some("order #42".into()),
    };
    assert_eq!(stored.encode()[0], PAYMENT_ACCOUNT_TAG);
    assert_eq!(Payment::decode(&stored.encode()).unwrap(), stored);

    // 3. The operator clears it; state moves Paid -> Cleared.
    let operator_authority = Address::new([0x0F; 32]);
    let ix = clear_payment(&operator_authority, &merchant_pda, &payment_pda, &mint).unwrap();
    assert_eq!(ix.data, vec![0x03]);

    stored.status = Status::Cleared;
    let decoded = Payment::decode(&stored.encode()).unwrap();
    assert_eq!(decoded.status, Status::Cleared);

    // 4. The merchant issues a partial refund.
    let ix = refund_payment(
        &authority(),
        &merchant_pda,
        &payment_pda,
        &buyer,
        &mint,
        1_000_000,
    )
    .unwrap();
    assert_eq!(ix.data[0], 0x04);
    assert_eq!(&ix.data[1..], &1_000_000u64.to_le_bytes());
    assert!(ix.accounts.iter().any(|meta| {
        meta.address == pda::derive_token_account(&buyer, &mint).unwrap()
            && meta.role == AccountRole::Writable
    }));
}

#[test]
fn derivations_are_stable_across_calls() {
    let (merchant_a, bump_a) = pda::derive_merchant_address(&authority()).unwrap();
    let (merchant_b, bump_b) = pda::derive_merchant_address(&authority()).unwrap();
    assert_eq!(merchant_a, merchant_b);
    assert_eq!(bump_a, bump_b);

    // Payments for different orders land on different addresses.
    let (payment_1, _) = pda::derive_payment_address(&merchant_a, &[0x01; 32]).unwrap();
    let (payment_2, _) = pda::derive_payment_address(&merchant_a, &[0x02; 32]).unwrap();
    assert_ne!(payment_1, payment_2);
}

#[test]
fn account_kinds_do_not_decode_as_each_other() {
    let merchant = Merchant {
        authority: authority(),
        bump: 255,
        refund_policy: RefundPolicy {
            max_amount: 1,
            max_time_after_purchase: 1,
        },
        accepted_mints: vec![],
    };
    // A merchant account is not a payment account.
    assert!(Payment::decode(&merchant.encode()).is_err());
}
