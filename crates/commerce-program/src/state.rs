//! Typed account state.
//!
//! Stored account data is one account tag byte followed by the account's
//! struct fields. The byte-level layouts are `static` tables consumed by
//! the generic engine in `commerce-codec`; the types here only map fields.
//! Every type derives serde so the presentation layer can consume decoded
//! state as JSON.

use serde::{Deserialize, Serialize};

use commerce_codec::{
    decode_enum, decode_struct, encode_enum, encode_struct, Address, CodecError, EnumLayout,
    FieldLayout, StructLayout, TypeLayout, Value, VariantLayout,
};

use crate::error::ClientError;

/// Account tag of stored merchant accounts.
pub const MERCHANT_ACCOUNT_TAG: u8 = 0;
/// Account tag of stored payment accounts.
pub const PAYMENT_ACCOUNT_TAG: u8 = 1;

fn strip_account_tag(data: &[u8], expected: u8) -> Result<&[u8], ClientError> {
    match data.first() {
        None => Err(CodecError::InvalidLength {
            expected: 1,
            actual: 0,
        }
        .into()),
        Some(&tag) if tag == expected => Ok(&data[1..]),
        Some(&tag) => Err(CodecError::UnknownVariant { tag }.into()),
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of an escrowed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Paid,
    Cleared,
    Chargedback,
    Refunded,
}

pub static STATUS_LAYOUT: EnumLayout = EnumLayout {
    name: "Status",
    variants: &[
        VariantLayout {
            tag: 0,
            name: "Paid",
            payload: &StructLayout::EMPTY,
        },
        VariantLayout {
            tag: 1,
            name: "Cleared",
            payload: &StructLayout::EMPTY,
        },
        VariantLayout {
            tag: 2,
            name: "Chargedback",
            payload: &StructLayout::EMPTY,
        },
        VariantLayout {
            tag: 3,
            name: "Refunded",
            payload: &StructLayout::EMPTY,
        },
    ],
};

impl Status {
    /// The declared wire tag.
    pub const fn tag(self) -> u8 {
        match self {
            Status::Paid => 0,
            Status::Cleared => 1,
            Status::Chargedback => 2,
            Status::Refunded => 3,
        }
    }

    pub fn encode(self) -> Vec<u8> {
        encode_enum(&STATUS_LAYOUT, &self.to_value())
    }

    pub fn decode(data: &[u8]) -> Result<Self, ClientError> {
        let value = decode_enum(&STATUS_LAYOUT, data)?;
        Ok(Self::from_value(&value))
    }

    pub(crate) fn to_value(self) -> Value {
        Value::Enum(self.tag(), Box::new(Value::Struct(vec![])))
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        let (tag, _) = value.as_enum();
        match tag {
            0 => Status::Paid,
            1 => Status::Cleared,
            2 => Status::Chargedback,
            3 => Status::Refunded,
            tag => panic!("status layout declares no tag {tag}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RefundPolicy
// ---------------------------------------------------------------------------

/// Per-merchant limits on after-purchase refunds.
///
/// 16 bytes on the wire: both fields are u64, amounts in token base units
/// and the window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundPolicy {
    pub max_amount: u64,
    pub max_time_after_purchase: u64,
}

pub static REFUND_POLICY_LAYOUT: StructLayout = StructLayout {
    name: "RefundPolicy",
    fields: &[
        FieldLayout {
            name: "max_amount",
            ty: TypeLayout::U64,
        },
        FieldLayout {
            name: "max_time_after_purchase",
            ty: TypeLayout::U64,
        },
    ],
};

impl RefundPolicy {
    pub fn encode(&self) -> Vec<u8> {
        encode_struct(&REFUND_POLICY_LAYOUT, &self.to_value())
    }

    pub fn decode(data: &[u8]) -> Result<Self, ClientError> {
        let value = decode_struct(&REFUND_POLICY_LAYOUT, data)?;
        Ok(Self::from_value(&value))
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U64(self.max_amount),
            Value::U64(self.max_time_after_purchase),
        ])
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        RefundPolicy {
            max_amount: value.field(&REFUND_POLICY_LAYOUT, "max_amount").as_u64(),
            max_time_after_purchase: value
                .field(&REFUND_POLICY_LAYOUT, "max_time_after_purchase")
                .as_u64(),
        }
    }
}

// ---------------------------------------------------------------------------
// Merchant
// ---------------------------------------------------------------------------

/// A merchant registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub authority: Address,
    pub bump: u8,
    pub refund_policy: RefundPolicy,
    /// Mints the merchant settles in, in registration order.
    pub accepted_mints: Vec<Address>,
}

pub static MERCHANT_LAYOUT: StructLayout = StructLayout {
    name: "Merchant",
    fields: &[
        FieldLayout {
            name: "authority",
            ty: TypeLayout::Address,
        },
        FieldLayout {
            name: "bump",
            ty: TypeLayout::U8,
        },
        FieldLayout {
            name: "refund_policy",
            ty: TypeLayout::Struct(&REFUND_POLICY_LAYOUT),
        },
        FieldLayout {
            name: "accepted_mints",
            ty: TypeLayout::List(&TypeLayout::Address),
        },
    ],
};

impl Merchant {
    /// Stored account bytes: the account tag, then the struct fields.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![MERCHANT_ACCOUNT_TAG];
        out.extend_from_slice(&encode_struct(&MERCHANT_LAYOUT, &self.to_value()));
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self, ClientError> {
        let body = strip_account_tag(data, MERCHANT_ACCOUNT_TAG)?;
        let value = decode_struct(&MERCHANT_LAYOUT, body)?;
        Ok(Self::from_value(&value))
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::Address(self.authority),
            Value::U8(self.bump),
            self.refund_policy.to_value(),
            Value::List(
                self.accepted_mints
                    .iter()
                    .map(|mint| Value::Address(*mint))
                    .collect(),
            ),
        ])
    }

    fn from_value(value: &Value) -> Self {
        Merchant {
            authority: value.field(&MERCHANT_LAYOUT, "authority").as_address(),
            bump: value.field(&MERCHANT_LAYOUT, "bump").as_u8(),
            refund_policy: RefundPolicy::from_value(
                value.field(&MERCHANT_LAYOUT, "refund_policy"),
            ),
            accepted_mints: value
                .field(&MERCHANT_LAYOUT, "accepted_mints")
                .as_list()
                .iter()
                .map(Value::as_address)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// One escrowed payment from a buyer to a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub merchant: Address,
    pub buyer: Address,
    pub mint: Address,
    /// Token base units held in escrow.
    pub amount: u64,
    pub order_id: [u8; 32],
    /// Unix timestamp of the purchase.
    pub created_at: u64,
    pub status: Status,
    pub bump: u8,
    pub memo: Option<String>,
}

pub static PAYMENT_LAYOUT: StructLayout = StructLayout {
    name: "Payment",
    fields: &[
        FieldLayout {
            name: "merchant",
            ty: TypeLayout::Address,
        },
        FieldLayout {
            name: "buyer",
            ty: TypeLayout::Address,
        },
        FieldLayout {
            name: "mint",
            ty: TypeLayout::Address,
        },
        FieldLayout {
            name: "amount",
            ty: TypeLayout::U64,
        },
        FieldLayout {
            name: "order_id",
            ty: TypeLayout::FixedBytes(32),
        },
        FieldLayout {
            name: "created_at",
            ty: TypeLayout::U64,
        },
        FieldLayout {
            name: "status",
            ty: TypeLayout::Enum(&STATUS_LAYOUT),
        },
        FieldLayout {
            name: "bump",
            ty: TypeLayout::U8,
        },
        FieldLayout {
            name: "memo",
            ty: TypeLayout::Option(&TypeLayout::Str),
        },
    ],
};

impl Payment {
    /// Stored account bytes: the account tag, then the struct fields.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![PAYMENT_ACCOUNT_TAG];
        out.extend_from_slice(&encode_struct(&PAYMENT_LAYOUT, &self.to_value()));
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self, ClientError> {
        let body = strip_account_tag(data, PAYMENT_ACCOUNT_TAG)?;
        let value = decode_struct(&PAYMENT_LAYOUT, body)?;
        Ok(Self::from_value(&value))
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::Address(self.merchant),
            Value::Address(self.buyer),
            Value::Address(self.mint),
            Value::U64(self.amount),
            Value::FixedBytes(self.order_id.to_vec()),
            Value::U64(self.created_at),
            self.status.to_value(),
            Value::U8(self.bump),
            match &self.memo {
                Some(memo) => Value::some(Value::Str(memo.clone())),
                None => Value::NONE,
            },
        ])
    }

    fn from_value(value: &Value) -> Self {
        let order_id: [u8; 32] = value
            .field(&PAYMENT_LAYOUT, "order_id")
            .as_fixed_bytes()
            .try_into()
            .expect("layout declares 32 bytes");
        Payment {
            merchant: value.field(&PAYMENT_LAYOUT, "merchant").as_address(),
            buyer: value.field(&PAYMENT_LAYOUT, "buyer").as_address(),
            mint: value.field(&PAYMENT_LAYOUT, "mint").as_address(),
            amount: value.field(&PAYMENT_LAYOUT, "amount").as_u64(),
            order_id,
            created_at: value.field(&PAYMENT_LAYOUT, "created_at").as_u64(),
            status: Status::from_value(value.field(&PAYMENT_LAYOUT, "status")),
            bump: value.field(&PAYMENT_LAYOUT, "bump").as_u8(),
            memo: value
                .field(&PAYMENT_LAYOUT, "memo")
                .as_option()
                .map(|memo| memo.as_str().to_owned()),
        }
    }
}
