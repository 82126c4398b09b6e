//! Instruction schemas and builders.
//!
//! Each instruction is declared once as a `static` schema — discriminator
//! byte, ordered account slots with their roles, and the argument layout —
//! and assembled by one generic [`InstructionSchema::build`]. The typed
//! builder functions below derive the program's PDAs, fill the account
//! list in schema order, and hand back an [`Instruction`] for an external
//! transaction builder to sign and submit. Nothing here performs I/O.

use commerce_codec::{encode_struct, Address, FieldLayout, StructLayout, TypeLayout, Value};

use crate::error::ClientError;
use crate::pda;
use crate::state::{RefundPolicy, REFUND_POLICY_LAYOUT};
use crate::{ASSOCIATED_TOKEN_PROGRAM_ID, PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};

/// How an account participates in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Readonly,
    Writable,
    ReadonlySigner,
    WritableSigner,
}

impl AccountRole {
    pub const fn is_signer(self) -> bool {
        matches!(self, AccountRole::ReadonlySigner | AccountRole::WritableSigner)
    }

    pub const fn is_writable(self) -> bool {
        matches!(self, AccountRole::Writable | AccountRole::WritableSigner)
    }
}

/// An account reference plus its role, in instruction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub address: Address,
    pub role: AccountRole,
}

/// A fully assembled instruction.
///
/// `data` is the discriminator byte followed by the encoded argument
/// struct (just the discriminator for argless instructions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// One positional account slot declared by an instruction schema.
#[derive(Debug)]
pub struct AccountSpec {
    pub name: &'static str,
    pub role: AccountRole,
}

/// Wire schema of one instruction.
#[derive(Debug)]
pub struct InstructionSchema {
    pub name: &'static str,
    pub discriminator: u8,
    pub accounts: &'static [AccountSpec],
    pub args: &'static StructLayout,
}

impl InstructionSchema {
    /// Assemble an instruction from ordered account addresses and argument
    /// values.
    ///
    /// Addresses must arrive in the schema's declared order; roles are
    /// taken from the schema. Only the shape is validated (account count)
    /// — whether each address is semantically the right account is the
    /// caller's responsibility.
    pub fn build(
        &self,
        program_id: Address,
        addresses: &[Address],
        args: &Value,
    ) -> Result<Instruction, ClientError> {
        if addresses.len() != self.accounts.len() {
            return Err(ClientError::AccountCount {
                expected: self.accounts.len(),
                actual: addresses.len(),
            });
        }

        let accounts = self
            .accounts
            .iter()
            .zip(addresses)
            .map(|(spec, address)| AccountMeta {
                address: *address,
                role: spec.role,
            })
            .collect();

        let mut data = vec![self.discriminator];
        data.extend_from_slice(&encode_struct(self.args, args));

        Ok(Instruction {
            program_id,
            accounts,
            data,
        })
    }
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

static INITIALIZE_MERCHANT_ARGS: StructLayout = StructLayout {
    name: "InitializeMerchantArgs",
    fields: &[FieldLayout {
        name: "bump",
        ty: TypeLayout::U8,
    }],
};

static UPDATE_REFUND_POLICY_ARGS: StructLayout = StructLayout {
    name: "UpdateRefundPolicyArgs",
    fields: &[FieldLayout {
        name: "refund_policy",
        ty: TypeLayout::Struct(&REFUND_POLICY_LAYOUT),
    }],
};

static CREATE_PAYMENT_ARGS: StructLayout = StructLayout {
    name: "CreatePaymentArgs",
    fields: &[
        FieldLayout {
            name: "amount",
            ty: TypeLayout::U64,
        },
        FieldLayout {
            name: "order_id",
            ty: TypeLayout::FixedBytes(32),
        },
        FieldLayout {
            name: "memo",
            ty: TypeLayout::Option(&TypeLayout::Str),
        },
        FieldLayout {
            name: "bump",
            ty: TypeLayout::U8,
        },
    ],
};

static REFUND_PAYMENT_ARGS: StructLayout = StructLayout {
    name: "RefundPaymentArgs",
    fields: &[FieldLayout {
        name: "amount",
        ty: TypeLayout::U64,
    }],
};

pub static INITIALIZE_MERCHANT: InstructionSchema = InstructionSchema {
    name: "initialize_merchant",
    discriminator: 0,
    accounts: &[
        AccountSpec {
            name: "payer",
            role: AccountRole::WritableSigner,
        },
        AccountSpec {
            name: "authority",
            role: AccountRole::ReadonlySigner,
        },
        AccountSpec {
            name: "merchant",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "operator",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "mint_a",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "vault_a",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "mint_b",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "vault_b",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "mint_c",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "vault_c",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "system_program",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "token_program",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "associated_token_program",
            role: AccountRole::Readonly,
        },
    ],
    args: &INITIALIZE_MERCHANT_ARGS,
};

pub static UPDATE_REFUND_POLICY: InstructionSchema = InstructionSchema {
    name: "update_refund_policy",
    discriminator: 1,
    accounts: &[
        AccountSpec {
            name: "authority",
            role: AccountRole::ReadonlySigner,
        },
        AccountSpec {
            name: "merchant",
            role: AccountRole::Writable,
        },
    ],
    args: &UPDATE_REFUND_POLICY_ARGS,
};

pub static CREATE_PAYMENT: InstructionSchema = InstructionSchema {
    name: "create_payment",
    discriminator: 2,
    accounts: &[
        AccountSpec {
            name: "buyer",
            role: AccountRole::WritableSigner,
        },
        AccountSpec {
            name: "merchant",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "payment",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "mint",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "buyer_token_account",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "escrow_vault",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "system_program",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "token_program",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "associated_token_program",
            role: AccountRole::Readonly,
        },
    ],
    args: &CREATE_PAYMENT_ARGS,
};

pub static CLEAR_PAYMENT: InstructionSchema = InstructionSchema {
    name: "clear_payment",
    discriminator: 3,
    accounts: &[
        AccountSpec {
            name: "operator_authority",
            role: AccountRole::ReadonlySigner,
        },
        AccountSpec {
            name: "operator",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "merchant",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "payment",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "escrow_vault",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "merchant_vault",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "token_program",
            role: AccountRole::Readonly,
        },
    ],
    args: &StructLayout::EMPTY,
};

pub static REFUND_PAYMENT: InstructionSchema = InstructionSchema {
    name: "refund_payment",
    discriminator: 4,
    accounts: &[
        AccountSpec {
            name: "authority",
            role: AccountRole::ReadonlySigner,
        },
        AccountSpec {
            name: "merchant",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "payment",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "escrow_vault",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "buyer_token_account",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "token_program",
            role: AccountRole::Readonly,
        },
    ],
    args: &REFUND_PAYMENT_ARGS,
};

pub static CHARGEBACK_PAYMENT: InstructionSchema = InstructionSchema {
    name: "chargeback_payment",
    discriminator: 5,
    accounts: &[
        AccountSpec {
            name: "operator_authority",
            role: AccountRole::ReadonlySigner,
        },
        AccountSpec {
            name: "operator",
            role: AccountRole::Readonly,
        },
        AccountSpec {
            name: "payment",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "escrow_vault",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "buyer_token_account",
            role: AccountRole::Writable,
        },
        AccountSpec {
            name: "token_program",
            role: AccountRole::Readonly,
        },
    ],
    args: &StructLayout::EMPTY,
};

// ---------------------------------------------------------------------------
// Typed builders
// ---------------------------------------------------------------------------

const NO_ARGS: Value = Value::Struct(Vec::new());

/// Creates an `initialize_merchant` instruction.
///
/// Registers a merchant for `authority` with three settlement mints and
/// their vaults. The merchant PDA, operator PDA, and vault ATAs are
/// derived internally.
///
/// Accounts:
///
/// 0. `[ws]` payer
/// 1. `[s]`  authority
/// 2. `[w]`  merchant PDA
/// 3. `[]`   operator PDA
/// 4. `[]`   mint A
/// 5. `[w]`  merchant vault A
/// 6. `[]`   mint B
/// 7. `[w]`  merchant vault B
/// 8. `[]`   mint C
/// 9. `[w]`  merchant vault C
/// 10. `[]`  system program
/// 11. `[]`  token program
/// 12. `[]`  associated token program
pub fn initialize_merchant(
    payer: &Address,
    authority: &Address,
    mints: &[Address; 3],
) -> Result<Instruction, ClientError> {
    let (merchant, bump) = pda::derive_merchant_address(authority)?;
    let (operator, _) = pda::derive_operator_address()?;

    let mut addresses = vec![*payer, *authority, merchant, operator];
    for mint in mints {
        addresses.push(*mint);
        addresses.push(pda::derive_token_account(&merchant, mint)?);
    }
    addresses.extend([
        SYSTEM_PROGRAM_ID,
        TOKEN_PROGRAM_ID,
        ASSOCIATED_TOKEN_PROGRAM_ID,
    ]);

    INITIALIZE_MERCHANT.build(
        PROGRAM_ID,
        &addresses,
        &Value::Struct(vec![Value::U8(bump)]),
    )
}

/// Creates an `update_refund_policy` instruction.
///
/// Accounts:
///
/// 0. `[s]` authority
/// 1. `[w]` merchant PDA
pub fn update_refund_policy(
    authority: &Address,
    policy: &RefundPolicy,
) -> Result<Instruction, ClientError> {
    let (merchant, _) = pda::derive_merchant_address(authority)?;

    UPDATE_REFUND_POLICY.build(
        PROGRAM_ID,
        &[*authority, merchant],
        &Value::Struct(vec![policy.to_value()]),
    )
}

/// Creates a `create_payment` instruction.
///
/// Moves `amount` of `mint` from the buyer into the payment escrow. The
/// payment PDA and both token accounts are derived internally.
///
/// Accounts:
///
/// 0. `[ws]` buyer
/// 1. `[]`   merchant PDA
/// 2. `[w]`  payment PDA
/// 3. `[]`   mint
/// 4. `[w]`  buyer token account
/// 5. `[w]`  escrow vault (payment PDA's ATA)
/// 6. `[]`   system program
/// 7. `[]`   token program
/// 8. `[]`   associated token program
pub fn create_payment(
    buyer: &Address,
    merchant: &Address,
    mint: &Address,
    amount: u64,
    order_id: &[u8; 32],
    memo: Option<&str>,
) -> Result<Instruction, ClientError> {
    let (payment, bump) = pda::derive_payment_address(merchant, order_id)?;
    let buyer_token_account = pda::derive_token_account(buyer, mint)?;
    let escrow_vault = pda::derive_token_account(&payment, mint)?;

    CREATE_PAYMENT.build(
        PROGRAM_ID,
        &[
            *buyer,
            *merchant,
            payment,
            *mint,
            buyer_token_account,
            escrow_vault,
            SYSTEM_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
        ],
        &Value::Struct(vec![
            Value::U64(amount),
            Value::FixedBytes(order_id.to_vec()),
            match memo {
                Some(memo) => Value::some(Value::Str(memo.to_owned())),
                None => Value::NONE,
            },
            Value::U8(bump),
        ]),
    )
}

/// Creates a `clear_payment` instruction.
///
/// Settles an escrowed payment into the merchant's vault. Signed by the
/// platform operator authority.
///
/// Accounts:
///
/// 0. `[s]` operator authority
/// 1. `[]`  operator PDA
/// 2. `[]`  merchant PDA
/// 3. `[w]` payment PDA
/// 4. `[w]` escrow vault
/// 5. `[w]` merchant vault
/// 6. `[]`  token program
pub fn clear_payment(
    operator_authority: &Address,
    merchant: &Address,
    payment: &Address,
    mint: &Address,
) -> Result<Instruction, ClientError> {
    let (operator, _) = pda::derive_operator_address()?;
    let escrow_vault = pda::derive_token_account(payment, mint)?;
    let merchant_vault = pda::derive_token_account(merchant, mint)?;

    CLEAR_PAYMENT.build(
        PROGRAM_ID,
        &[
            *operator_authority,
            operator,
            *merchant,
            *payment,
            escrow_vault,
            merchant_vault,
            TOKEN_PROGRAM_ID,
        ],
        &NO_ARGS,
    )
}

/// Creates a `refund_payment` instruction.
///
/// Returns up to the merchant's policy limits from escrow to the buyer.
/// Signed by the merchant authority.
///
/// Accounts:
///
/// 0. `[s]` authority
/// 1. `[]`  merchant PDA
/// 2. `[w]` payment PDA
/// 3. `[w]` escrow vault
/// 4. `[w]` buyer token account
/// 5. `[]`  token program
pub fn refund_payment(
    authority: &Address,
    merchant: &Address,
    payment: &Address,
    buyer: &Address,
    mint: &Address,
    amount: u64,
) -> Result<Instruction, ClientError> {
    let escrow_vault = pda::derive_token_account(payment, mint)?;
    let buyer_token_account = pda::derive_token_account(buyer, mint)?;

    REFUND_PAYMENT.build(
        PROGRAM_ID,
        &[
            *authority,
            *merchant,
            *payment,
            escrow_vault,
            buyer_token_account,
            TOKEN_PROGRAM_ID,
        ],
        &Value::Struct(vec![Value::U64(amount)]),
    )
}

/// Creates a `chargeback_payment` instruction.
///
/// Forcibly returns the full escrow to the buyer. Signed by the platform
/// operator authority.
///
/// Accounts:
///
/// 0. `[s]` operator authority
/// 1. `[]`  operator PDA
/// 2. `[w]` payment PDA
/// 3. `[w]` escrow vault
/// 4. `[w]` buyer token account
/// 5. `[]`  token program
pub fn chargeback_payment(
    operator_authority: &Address,
    payment: &Address,
    buyer: &Address,
    mint: &Address,
) -> Result<Instruction, ClientError> {
    let (operator, _) = pda::derive_operator_address()?;
    let escrow_vault = pda::derive_token_account(payment, mint)?;
    let buyer_token_account = pda::derive_token_account(buyer, mint)?;

    CHARGEBACK_PAYMENT.build(
        PROGRAM_ID,
        &[
            *operator_authority,
            operator,
            *payment,
            escrow_vault,
            buyer_token_account,
            TOKEN_PROGRAM_ID,
        ],
        &NO_ARGS,
    )
}
