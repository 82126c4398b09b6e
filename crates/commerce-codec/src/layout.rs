//! Schema descriptors for the wire format.
//!
//! Account and instruction shapes are declared once as `static` tables and
//! consumed by the generic engine, instead of generating one specialized
//! encode/decode pair per type. A descriptor never changes after
//! declaration; the engine treats it as the single source of truth for
//! field order, enum tags, and sizes.

/// Wire type of a single encoded field.
#[derive(Debug, Clone, Copy)]
pub enum TypeLayout {
    U8,
    U16,
    U32,
    U64,
    Bool,
    /// 32-byte public key.
    Address,
    /// Raw byte array of a fixed width, no length prefix.
    FixedBytes(usize),
    /// u32 byte-count prefix, then raw bytes.
    Bytes,
    /// u32 byte-count prefix, then UTF-8 bytes.
    Str,
    /// One presence byte (0 = absent, 1 = present), then the payload.
    Option(&'static TypeLayout),
    /// u32 element-count prefix, then that many element encodings.
    List(&'static TypeLayout),
    Struct(&'static StructLayout),
    Enum(&'static EnumLayout),
}

/// One named field of a struct layout.
#[derive(Debug)]
pub struct FieldLayout {
    pub name: &'static str,
    pub ty: TypeLayout,
}

/// An ordered sequence of named fields.
///
/// Encoding a struct concatenates each field's encoding in declared order;
/// decoding consumes them back in the same order.
#[derive(Debug)]
pub struct StructLayout {
    pub name: &'static str,
    pub fields: &'static [FieldLayout],
}

/// One variant of an enum layout. The tag is a declared constant, not the
/// declaration position.
#[derive(Debug)]
pub struct VariantLayout {
    pub tag: u8,
    pub name: &'static str,
    pub payload: &'static StructLayout,
}

/// A tagged union: one tag byte, then the matching variant's payload.
#[derive(Debug)]
pub struct EnumLayout {
    pub name: &'static str,
    pub variants: &'static [VariantLayout],
}

impl TypeLayout {
    /// Encoded width when it is statically known, `None` for
    /// variable-length types.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            TypeLayout::U8 | TypeLayout::Bool => Some(1),
            TypeLayout::U16 => Some(2),
            TypeLayout::U32 => Some(4),
            TypeLayout::U64 => Some(8),
            TypeLayout::Address => Some(32),
            TypeLayout::FixedBytes(width) => Some(*width),
            TypeLayout::Bytes | TypeLayout::Str => None,
            TypeLayout::Option(_) | TypeLayout::List(_) => None,
            TypeLayout::Struct(layout) => layout.fixed_size(),
            TypeLayout::Enum(layout) => layout.fixed_size(),
        }
    }
}

impl StructLayout {
    /// A struct with no fields; used as the payload of data-less enum
    /// variants.
    pub const EMPTY: StructLayout = StructLayout {
        name: "",
        fields: &[],
    };

    /// Total encoded width when every field is fixed-width.
    ///
    /// Used to validate buffer lengths eagerly before any field is read.
    pub fn fixed_size(&self) -> Option<usize> {
        let mut total = 0;
        for field in self.fields {
            total += field.ty.fixed_size()?;
        }
        Some(total)
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl EnumLayout {
    /// The variant declared with `tag`, if any.
    pub fn variant(&self, tag: u8) -> Option<&'static VariantLayout> {
        self.variants.iter().find(|v| v.tag == tag)
    }

    /// Tag byte plus payload width, when every variant payload is
    /// fixed-width and all widths agree.
    pub fn fixed_size(&self) -> Option<usize> {
        let mut payload_size: Option<usize> = None;
        for variant in self.variants {
            let size = variant.payload.fixed_size()?;
            match payload_size {
                None => payload_size = Some(size),
                Some(prev) if prev == size => {}
                Some(_) => return None,
            }
        }
        payload_size.map(|size| 1 + size)
    }
}
