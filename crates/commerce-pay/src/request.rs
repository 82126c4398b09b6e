//! Transfer-request URL build and parse.
//!
//! The wire form is a `solana:` URL:
//!
//! ```text
//! solana:<recipient>?amount=1.50&spl-token=<mint>&reference=<address>
//!        &label=Coffee%20Shop&message=...&memo=...&order=<64 hex chars>
//! ```
//!
//! Addresses travel as Base58, the order id as hex, and display text is
//! percent-encoded. This module implements just enough URL handling for
//! that shape without pulling in a full URL parser: query values may not
//! contain `&` or `=` unescaped, which percent-encoding guarantees for
//! everything we emit.

use commerce_codec::Address;

use crate::error::PayError;

const SCHEME: &str = "solana:";

/// A payment request a checkout page hands to a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub recipient: Address,
    /// Decimal token amount as text ("1.50"), kept textual so no float
    /// rounding ever touches it. Absent means the payer chooses.
    pub amount: Option<String>,
    /// Mint for an SPL token transfer; absent means native SOL.
    pub spl_token: Option<Address>,
    /// Client-generated addresses used to find the transaction later.
    pub reference: Vec<Address>,
    pub label: Option<String>,
    pub message: Option<String>,
    pub memo: Option<String>,
    /// Commerce order id, hex-encoded in the URL.
    pub order_id: Option<[u8; 32]>,
}

impl PaymentRequest {
    pub fn new(recipient: Address) -> Self {
        PaymentRequest {
            recipient,
            amount: None,
            spl_token: None,
            reference: Vec::new(),
            label: None,
            message: None,
            memo: None,
            order_id: None,
        }
    }

    /// Render the request as a `solana:` URL.
    pub fn to_url(&self) -> String {
        let mut url = format!("{SCHEME}{}", self.recipient);
        let mut query: Vec<String> = Vec::new();

        if let Some(amount) = &self.amount {
            query.push(format!("amount={amount}"));
        }
        if let Some(mint) = &self.spl_token {
            query.push(format!("spl-token={mint}"));
        }
        for reference in &self.reference {
            query.push(format!("reference={reference}"));
        }
        if let Some(label) = &self.label {
            query.push(format!("label={}", percent_encode(label)));
        }
        if let Some(message) = &self.message {
            query.push(format!("message={}", percent_encode(message)));
        }
        if let Some(memo) = &self.memo {
            query.push(format!("memo={}", percent_encode(memo)));
        }
        if let Some(order_id) = &self.order_id {
            query.push(format!("order={}", hex::encode(order_id)));
        }

        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    /// Parse a `solana:` URL.
    ///
    /// Unknown query fields are skipped so newer URLs stay readable;
    /// duplicates of single-valued fields are rejected.
    pub fn parse(url: &str) -> Result<Self, PayError> {
        let rest = url
            .strip_prefix(SCHEME)
            .ok_or_else(|| PayError::InvalidUrl(format!("expected `{SCHEME}` scheme")))?;

        let (recipient_text, query) = match rest.split_once('?') {
            Some((recipient, query)) => (recipient, Some(query)),
            None => (rest, None),
        };

        let mut request = PaymentRequest::new(Address::from_base58(recipient_text)?);

        if let Some(query) = query {
            for pair in query.split('&') {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    PayError::InvalidUrl(format!("field `{pair}` has no value"))
                })?;
                match key {
                    "amount" => set_once(&mut request.amount, key, parse_amount(value)?)?,
                    "spl-token" => {
                        set_once(&mut request.spl_token, key, Address::from_base58(value)?)?;
                    }
                    "reference" => request.reference.push(Address::from_base58(value)?),
                    "label" => set_once(&mut request.label, key, percent_decode(value)?)?,
                    "message" => set_once(&mut request.message, key, percent_decode(value)?)?,
                    "memo" => set_once(&mut request.memo, key, percent_decode(value)?)?,
                    "order" => set_once(&mut request.order_id, key, parse_order_id(value)?)?,
                    _ => {}
                }
            }
        }

        Ok(request)
    }
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> Result<(), PayError> {
    if slot.is_some() {
        return Err(PayError::InvalidUrl(format!("duplicate field `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}

/// Amounts are plain decimal text: ASCII digits with at most one point and
/// at least one digit.
fn parse_amount(text: &str) -> Result<String, PayError> {
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in text.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            '.' => {
                return Err(PayError::InvalidAmount(format!(
                    "`{text}` has more than one decimal point"
                )))
            }
            _ => {
                return Err(PayError::InvalidAmount(format!(
                    "`{text}` is not a decimal number"
                )))
            }
        }
    }
    if !seen_digit {
        return Err(PayError::InvalidAmount(format!("`{text}` has no digits")));
    }
    Ok(text.to_owned())
}

fn parse_order_id(text: &str) -> Result<[u8; 32], PayError> {
    let bytes = hex::decode(text)
        .map_err(|e| PayError::InvalidUrl(format!("order id is not hex: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        PayError::InvalidUrl(format!("order id must be 32 bytes, got {}", bytes.len()))
    })
}

// ---------------------------------------------------------------------------
// Percent encoding
// ---------------------------------------------------------------------------

/// Bytes that travel unescaped in a query value.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn percent_decode(text: &str) -> Result<String, PayError> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes
                .get(i + 1..i + 3)
                .ok_or_else(|| PayError::InvalidUrl("truncated percent escape".into()))?;
            let decoded = hex::decode(escape)
                .map_err(|_| PayError::InvalidUrl("malformed percent escape".into()))?;
            out.push(decoded[0]);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}
