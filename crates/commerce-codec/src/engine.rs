//! Generic schema-driven encode/decode engine.
//!
//! One engine walks every layout table in the SDK; per-type code upstream
//! only converts between typed structs and the dynamic [`Value`] tree.
//! Encoding concatenates field encodings in declared order. Decoding
//! advances a cursor field by field and is atomic: it either returns a
//! fully decoded value or an error, never a partial result.
//!
//! Top-level decodes ([`decode_struct`], [`decode_enum`]) also reject
//! buffers with trailing bytes, and validate the buffer length eagerly
//! when the layout's total width is statically known.

use crate::address::Address;
use crate::error::CodecError;
use crate::layout::{EnumLayout, StructLayout, TypeLayout};
use crate::primitives;

/// A dynamically typed wire value, shaped by some layout.
///
/// `Struct` fields are ordered exactly as the layout declares them; `Enum`
/// carries the declared tag byte and the variant's payload struct.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bool(bool),
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    Str(String),
    Option(Option<Box<Value>>),
    List(Vec<Value>),
    Struct(Vec<Value>),
    Enum(u8, Box<Value>),
}

/// Shape accessors.
///
/// The engine guarantees that decoding against a layout produces a value
/// of exactly that layout's shape, so typed adapters may use these without
/// a fallible path. Each accessor panics on a shape mismatch, which can
/// only mean the adapter and its layout table disagree — a bug in the SDK,
/// not in the input bytes.
impl Value {
    pub const NONE: Value = Value::Option(None);

    pub fn some(value: Value) -> Value {
        Value::Option(Some(Box::new(value)))
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Value::U8(v) => *v,
            other => shape_mismatch("u8", other),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            Value::U16(v) => *v,
            other => shape_mismatch("u16", other),
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            Value::U32(v) => *v,
            other => shape_mismatch("u32", other),
        }
    }

    pub fn as_u64(&self) -> u64 {
        match self {
            Value::U64(v) => *v,
            other => shape_mismatch("u64", other),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            other => shape_mismatch("bool", other),
        }
    }

    pub fn as_address(&self) -> Address {
        match self {
            Value::Address(v) => *v,
            other => shape_mismatch("address", other),
        }
    }

    pub fn as_fixed_bytes(&self) -> &[u8] {
        match self {
            Value::FixedBytes(v) => v,
            other => shape_mismatch("fixed bytes", other),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Bytes(v) => v,
            other => shape_mismatch("bytes", other),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::Str(v) => v,
            other => shape_mismatch("string", other),
        }
    }

    pub fn as_option(&self) -> Option<&Value> {
        match self {
            Value::Option(v) => v.as_deref(),
            other => shape_mismatch("option", other),
        }
    }

    pub fn as_list(&self) -> &[Value] {
        match self {
            Value::List(v) => v,
            other => shape_mismatch("list", other),
        }
    }

    pub fn as_struct(&self) -> &[Value] {
        match self {
            Value::Struct(v) => v,
            other => shape_mismatch("struct", other),
        }
    }

    pub fn as_enum(&self) -> (u8, &Value) {
        match self {
            Value::Enum(tag, payload) => (*tag, payload),
            other => shape_mismatch("enum", other),
        }
    }

    /// Struct field by its declared name.
    pub fn field(&self, layout: &StructLayout, name: &str) -> &Value {
        let index = layout
            .field_index(name)
            .unwrap_or_else(|| panic!("layout {} has no field `{name}`", layout.name));
        &self.as_struct()[index]
    }
}

fn shape_mismatch(expected: &str, got: &Value) -> ! {
    panic!("value shape mismatch: expected {expected}, got {got:?}")
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a struct-shaped value against its layout.
pub fn encode_struct(layout: &StructLayout, value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_struct_fields(layout, value, &mut out);
    out
}

/// Encode an enum-shaped value: declared tag byte, then variant payload.
pub fn encode_enum(layout: &EnumLayout, value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_enum_value(layout, value, &mut out);
    out
}

fn encode_struct_fields(layout: &StructLayout, value: &Value, out: &mut Vec<u8>) {
    let fields = value.as_struct();
    assert_eq!(
        fields.len(),
        layout.fields.len(),
        "layout {} declares {} fields, value has {}",
        layout.name,
        layout.fields.len(),
        fields.len()
    );
    for (field, field_value) in layout.fields.iter().zip(fields) {
        encode_value(&field.ty, field_value, out);
    }
}

fn encode_enum_value(layout: &EnumLayout, value: &Value, out: &mut Vec<u8>) {
    let (tag, payload) = value.as_enum();
    let variant = layout
        .variant(tag)
        .unwrap_or_else(|| panic!("enum {} declares no variant with tag {tag}", layout.name));
    primitives::write_u8(out, tag);
    encode_struct_fields(variant.payload, payload, out);
}

fn encode_value(ty: &TypeLayout, value: &Value, out: &mut Vec<u8>) {
    match (ty, value) {
        (TypeLayout::U8, Value::U8(v)) => primitives::write_u8(out, *v),
        (TypeLayout::U16, Value::U16(v)) => primitives::write_u16(out, *v),
        (TypeLayout::U32, Value::U32(v)) => primitives::write_u32(out, *v),
        (TypeLayout::U64, Value::U64(v)) => primitives::write_u64(out, *v),
        (TypeLayout::Bool, Value::Bool(v)) => primitives::write_bool(out, *v),
        (TypeLayout::Address, Value::Address(v)) => primitives::write_address(out, v),
        (TypeLayout::FixedBytes(width), Value::FixedBytes(bytes)) => {
            assert_eq!(
                bytes.len(),
                *width,
                "fixed bytes value has {} bytes, layout declares {width}",
                bytes.len()
            );
            out.extend_from_slice(bytes);
        }
        (TypeLayout::Bytes, Value::Bytes(bytes)) => primitives::write_bytes(out, bytes),
        (TypeLayout::Str, Value::Str(text)) => primitives::write_str(out, text),
        (TypeLayout::Option(inner), Value::Option(opt)) => match opt {
            None => primitives::write_u8(out, 0),
            Some(payload) => {
                primitives::write_u8(out, 1);
                encode_value(inner, payload, out);
            }
        },
        (TypeLayout::List(inner), Value::List(items)) => {
            primitives::write_u32(out, items.len() as u32);
            for item in items {
                encode_value(inner, item, out);
            }
        }
        (TypeLayout::Struct(layout), value @ Value::Struct(_)) => {
            encode_struct_fields(layout, value, out);
        }
        (TypeLayout::Enum(layout), value @ Value::Enum(..)) => {
            encode_enum_value(layout, value, out);
        }
        (ty, value) => panic!("value shape mismatch: cannot encode {value:?} as {ty:?}"),
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a full buffer as a struct.
///
/// Fails with [`CodecError::InvalidLength`] if the buffer is shorter than
/// the layout requires or carries trailing bytes. For layouts whose width
/// is statically known the length check happens before any field is read.
pub fn decode_struct(layout: &StructLayout, data: &[u8]) -> Result<Value, CodecError> {
    if let Some(expected) = layout.fixed_size() {
        if data.len() != expected {
            return Err(CodecError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
    }
    let (value, consumed) = decode_struct_fields(layout, data, 0)?;
    expect_consumed(consumed, data.len())?;
    Ok(value)
}

/// Decode a full buffer as an enum: tag byte lookup, then variant payload.
pub fn decode_enum(layout: &EnumLayout, data: &[u8]) -> Result<Value, CodecError> {
    if let Some(expected) = layout.fixed_size() {
        if data.len() != expected {
            return Err(CodecError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
    }
    let (value, consumed) = decode_enum_value(layout, data, 0)?;
    expect_consumed(consumed, data.len())?;
    Ok(value)
}

fn expect_consumed(consumed: usize, len: usize) -> Result<(), CodecError> {
    if consumed != len {
        return Err(CodecError::InvalidLength {
            expected: consumed,
            actual: len,
        });
    }
    Ok(())
}

fn decode_struct_fields(
    layout: &StructLayout,
    data: &[u8],
    offset: usize,
) -> Result<(Value, usize), CodecError> {
    let mut consumed = 0;
    let mut fields = Vec::with_capacity(layout.fields.len());
    for field in layout.fields {
        let (value, used) = decode_value(&field.ty, data, offset + consumed)?;
        fields.push(value);
        consumed += used;
    }
    Ok((Value::Struct(fields), consumed))
}

fn decode_enum_value(
    layout: &EnumLayout,
    data: &[u8],
    offset: usize,
) -> Result<(Value, usize), CodecError> {
    let (tag, _) = primitives::read_u8(data, offset)?;
    let variant = layout
        .variant(tag)
        .ok_or(CodecError::UnknownVariant { tag })?;
    let (payload, used) = decode_struct_fields(variant.payload, data, offset + 1)?;
    Ok((Value::Enum(tag, Box::new(payload)), 1 + used))
}

fn decode_value(
    ty: &TypeLayout,
    data: &[u8],
    offset: usize,
) -> Result<(Value, usize), CodecError> {
    match ty {
        TypeLayout::U8 => primitives::read_u8(data, offset).map(|(v, n)| (Value::U8(v), n)),
        TypeLayout::U16 => primitives::read_u16(data, offset).map(|(v, n)| (Value::U16(v), n)),
        TypeLayout::U32 => primitives::read_u32(data, offset).map(|(v, n)| (Value::U32(v), n)),
        TypeLayout::U64 => primitives::read_u64(data, offset).map(|(v, n)| (Value::U64(v), n)),
        TypeLayout::Bool => primitives::read_bool(data, offset).map(|(v, n)| (Value::Bool(v), n)),
        TypeLayout::Address => {
            primitives::read_address(data, offset).map(|(v, n)| (Value::Address(v), n))
        }
        TypeLayout::FixedBytes(width) => {
            let remaining = data.len().saturating_sub(offset);
            if remaining < *width {
                return Err(CodecError::InvalidLength {
                    expected: *width,
                    actual: remaining,
                });
            }
            let bytes = data[offset..offset + width].to_vec();
            Ok((Value::FixedBytes(bytes), *width))
        }
        TypeLayout::Bytes => primitives::read_bytes(data, offset).map(|(v, n)| (Value::Bytes(v), n)),
        TypeLayout::Str => primitives::read_str(data, offset).map(|(v, n)| (Value::Str(v), n)),
        TypeLayout::Option(inner) => {
            let (presence, _) = primitives::read_u8(data, offset)?;
            match presence {
                0 => Ok((Value::NONE, 1)),
                1 => {
                    let (payload, used) = decode_value(inner, data, offset + 1)?;
                    Ok((Value::some(payload), 1 + used))
                }
                tag => Err(CodecError::UnknownVariant { tag }),
            }
        }
        TypeLayout::List(inner) => {
            let (count, prefix) = primitives::read_u32(data, offset)?;
            let mut consumed = prefix;
            let mut items = Vec::with_capacity(count.min(1024) as usize);
            for _ in 0..count {
                let (item, used) = decode_value(inner, data, offset + consumed)?;
                items.push(item);
                consumed += used;
            }
            Ok((Value::List(items), consumed))
        }
        TypeLayout::Struct(layout) => decode_struct_fields(layout, data, offset),
        TypeLayout::Enum(layout) => decode_enum_value(layout, data, offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FieldLayout, VariantLayout};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Test schemas: a fixed-width struct, a variable struct, and an enum
    // with non-sequential tags and one payload-carrying variant.

    static LIMITS: StructLayout = StructLayout {
        name: "Limits",
        fields: &[
            FieldLayout {
                name: "cap",
                ty: TypeLayout::U64,
            },
            FieldLayout {
                name: "window",
                ty: TypeLayout::U64,
            },
        ],
    };

    static PERCENT: StructLayout = StructLayout {
        name: "Percent",
        fields: &[FieldLayout {
            name: "bps",
            ty: TypeLayout::U16,
        }],
    };

    static DISCOUNT: EnumLayout = EnumLayout {
        name: "Discount",
        variants: &[
            VariantLayout {
                tag: 1,
                name: "None",
                payload: &StructLayout::EMPTY,
            },
            VariantLayout {
                tag: 4,
                name: "Percent",
                payload: &PERCENT,
            },
        ],
    };

    static ORDER: StructLayout = StructLayout {
        name: "Order",
        fields: &[
            FieldLayout {
                name: "buyer",
                ty: TypeLayout::Address,
            },
            FieldLayout {
                name: "id",
                ty: TypeLayout::FixedBytes(32),
            },
            FieldLayout {
                name: "amounts",
                ty: TypeLayout::List(&TypeLayout::U64),
            },
            FieldLayout {
                name: "memo",
                ty: TypeLayout::Option(&TypeLayout::Str),
            },
            FieldLayout {
                name: "discount",
                ty: TypeLayout::Enum(&DISCOUNT),
            },
        ],
    };

    fn limits(cap: u64, window: u64) -> Value {
        Value::Struct(vec![Value::U64(cap), Value::U64(window)])
    }

    fn sample_order() -> Value {
        Value::Struct(vec![
            Value::Address(Address::new([0xAA; 32])),
            Value::FixedBytes(vec![0x11; 32]),
            Value::List(vec![Value::U64(5), Value::U64(10)]),
            Value::some(Value::Str("two espressos".into())),
            Value::Enum(4, Box::new(Value::Struct(vec![Value::U16(250)]))),
        ])
    }

    // -- struct encoding ----------------------------------------------------

    #[test]
    fn fixed_struct_encodes_to_declared_width() {
        let encoded = encode_struct(&LIMITS, &limits(1_000_000, 86_400));
        assert_eq!(encoded.len(), 16);
        assert_eq!(&encoded[..8], &1_000_000u64.to_le_bytes());
        assert_eq!(&encoded[8..], &86_400u64.to_le_bytes());
    }

    #[test]
    fn fixed_struct_roundtrip_extremes() {
        for value in [limits(0, 0), limits(u64::MAX, u64::MAX)] {
            let encoded = encode_struct(&LIMITS, &value);
            assert_eq!(decode_struct(&LIMITS, &encoded).unwrap(), value);
        }
    }

    #[test]
    fn fixed_struct_wrong_length_fails_eagerly() {
        for len in [0, 15, 17] {
            let result = decode_struct(&LIMITS, &vec![0u8; len]);
            assert!(
                matches!(
                    result,
                    Err(CodecError::InvalidLength {
                        expected: 16,
                        actual
                    }) if actual == len
                ),
                "length {len} must be rejected"
            );
        }
    }

    #[test]
    fn variable_struct_roundtrip() {
        let value = sample_order();
        let encoded = encode_struct(&ORDER, &value);
        assert_eq!(decode_struct(&ORDER, &encoded).unwrap(), value);
    }

    #[test]
    fn encode_of_decode_is_identity() {
        let encoded = encode_struct(&ORDER, &sample_order());
        let decoded = decode_struct(&ORDER, &encoded).unwrap();
        assert_eq!(encode_struct(&ORDER, &decoded), encoded);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut encoded = encode_struct(&ORDER, &sample_order());
        encoded.push(0x00);
        assert!(matches!(
            decode_struct(&ORDER, &encoded),
            Err(CodecError::InvalidLength { .. })
        ));
    }

    #[test]
    fn truncated_variable_struct_fails() {
        let encoded = encode_struct(&ORDER, &sample_order());
        let result = decode_struct(&ORDER, &encoded[..encoded.len() - 1]);
        assert!(result.is_err());
    }

    #[test]
    fn roundtrip_sweep_random_limits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let value = limits(rng.gen(), rng.gen());
            let encoded = encode_struct(&LIMITS, &value);
            assert_eq!(decode_struct(&LIMITS, &encoded).unwrap(), value);
        }
    }

    // -- option -------------------------------------------------------------

    #[test]
    fn absent_option_is_one_zero_byte() {
        let mut value = sample_order();
        if let Value::Struct(fields) = &mut value {
            fields[3] = Value::NONE;
        }
        let encoded = encode_struct(&ORDER, &value);
        assert_eq!(decode_struct(&ORDER, &encoded).unwrap(), value);

        // 32 + 32 + (4 + 16) + 1 + (1 + 2)
        assert_eq!(encoded.len(), 88);
    }

    #[test]
    fn option_presence_byte_must_be_zero_or_one() {
        let value = sample_order();
        let mut encoded = encode_struct(&ORDER, &value);
        // The presence byte sits after buyer, id, and the two-element list.
        let presence = 32 + 32 + 4 + 16;
        assert_eq!(encoded[presence], 1);
        encoded[presence] = 2;
        assert!(matches!(
            decode_struct(&ORDER, &encoded),
            Err(CodecError::UnknownVariant { tag: 2 })
        ));
    }

    // -- enum ---------------------------------------------------------------

    #[test]
    fn enum_emits_declared_tag_first() {
        let value = Value::Enum(1, Box::new(Value::Struct(vec![])));
        assert_eq!(encode_enum(&DISCOUNT, &value), vec![0x01]);

        let value = Value::Enum(4, Box::new(Value::Struct(vec![Value::U16(100)])));
        assert_eq!(encode_enum(&DISCOUNT, &value), vec![0x04, 0x64, 0x00]);
    }

    #[test]
    fn enum_undeclared_tag_rejected() {
        for tag in [0u8, 2, 3, 5, 255] {
            assert!(matches!(
                decode_enum(&DISCOUNT, &[tag]),
                Err(CodecError::UnknownVariant { tag: t }) if t == tag
            ));
        }
    }

    #[test]
    fn enum_struct_variant_roundtrip() {
        let value = Value::Enum(4, Box::new(Value::Struct(vec![Value::U16(9999)])));
        let encoded = encode_enum(&DISCOUNT, &value);
        assert_eq!(decode_enum(&DISCOUNT, &encoded).unwrap(), value);
    }

    #[test]
    fn enum_payload_shorter_than_variant_needs_fails() {
        // Tag 4 requires a u16 payload.
        assert!(matches!(
            decode_enum(&DISCOUNT, &[0x04, 0x64]),
            Err(CodecError::InvalidLength { .. })
        ));
    }

    #[test]
    fn empty_buffer_fails() {
        assert!(decode_enum(&DISCOUNT, &[]).is_err());
        assert!(decode_struct(&LIMITS, &[]).is_err());
    }

    // -- accessors ----------------------------------------------------------

    #[test]
    fn field_access_by_name() {
        let value = sample_order();
        assert_eq!(value.field(&ORDER, "amounts").as_list().len(), 2);
        assert_eq!(
            value.field(&ORDER, "memo").as_option().unwrap().as_str(),
            "two espressos"
        );
    }

    #[test]
    #[should_panic(expected = "no field")]
    fn unknown_field_name_panics() {
        sample_order().field(&ORDER, "nope");
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn shape_mismatch_panics() {
        Value::U8(1).as_u64();
    }
}
