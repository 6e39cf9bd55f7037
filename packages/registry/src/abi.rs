//! # Solidity ABI encoding for the registry contract
//!
//! Only the subset of the ABI the registry surface needs: addresses, unsigned
//! integers up to 128 bits, booleans, strings, `uint256[]` and tuples of those.
//!
//! Encoding follows the head/tail layout: static values sit inline in the head,
//! dynamic values (strings, arrays, tuples containing either) are replaced by a
//! byte offset into the tail.
//!
//! Decoding is done through [`Decoder`], which reads 32-byte slots relative to
//! a base offset so nested tuples can be walked with the same calls.

use sha3::{Digest, Keccak256};

use crate::models::Address;

pub const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("ABI data truncated: need {needed} bytes at offset {offset}, have {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("integer does not fit in {0} bits")]
    Overflow(u32),
    #[error("invalid boolean word")]
    InvalidBool,
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid hex data: {0}")]
    InvalidHex(String),
}

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    Keccak256::digest(input).into()
}

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Topic 0 of an event log.
pub fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(u128),
    Bool(bool),
    String(String),
    UintArray(Vec<u128>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) | Token::UintArray(_) => true,
            Token::Tuple(members) => members.iter().any(Token::is_dynamic),
            Token::Address(_) | Token::Uint(_) | Token::Bool(_) => false,
        }
    }

    fn head_len(&self) -> usize {
        match self {
            Token::Tuple(members) if !self.is_dynamic() => {
                members.iter().map(Token::head_len).sum()
            }
            _ => WORD,
        }
    }
}

pub fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode a sequence of tokens as a top-level argument list.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        let encoded = encode_token(token);
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    head
}

fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(address) => address_word(address).to_vec(),
        Token::Uint(value) => uint_word(*value).to_vec(),
        Token::Bool(value) => uint_word(u128::from(*value)).to_vec(),
        Token::String(value) => {
            let bytes = value.as_bytes();
            let padded = bytes.len().div_ceil(WORD) * WORD;
            let mut out = Vec::with_capacity(WORD + padded);
            out.extend_from_slice(&uint_word(bytes.len() as u128));
            out.extend_from_slice(bytes);
            out.resize(WORD + padded, 0);
            out
        }
        Token::UintArray(values) => {
            let mut out = Vec::with_capacity(WORD * (values.len() + 1));
            out.extend_from_slice(&uint_word(values.len() as u128));
            for value in values {
                out.extend_from_slice(&uint_word(*value));
            }
            out
        }
        Token::Tuple(members) => encode(members),
    }
}

/// Selector followed by the encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(encode(tokens));
    data
}

/// `0x`-prefixed hex, as the JSON-RPC layer expects.
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn from_hex(data: &str) -> Result<Vec<u8>, AbiError> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(digits).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

/// Reads ABI slots relative to `base`.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    data: &'a [u8],
    base: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, base: 0 }
    }

    fn bytes_at(&self, offset: usize, needed: usize) -> Result<&'a [u8], AbiError> {
        let truncated = AbiError::Truncated {
            offset,
            needed,
            len: self.data.len(),
        };
        let end = offset.checked_add(needed).ok_or(truncated.clone())?;
        self.data.get(offset..end).ok_or(truncated)
    }

    fn word_at(&self, offset: usize) -> Result<&'a [u8], AbiError> {
        self.bytes_at(offset, WORD)
    }

    fn uint_at(&self, offset: usize) -> Result<u128, AbiError> {
        let word = self.word_at(offset)?;
        if word[..16].iter().any(|b| *b != 0) {
            return Err(AbiError::Overflow(128));
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(low))
    }

    fn usize_at(&self, offset: usize) -> Result<usize, AbiError> {
        usize::try_from(self.uint_at(offset)?).map_err(|_| AbiError::Overflow(usize::BITS))
    }

    fn offset_at(&self, offset: usize) -> Result<usize, AbiError> {
        let relative = self.usize_at(offset)?;
        self.base
            .checked_add(relative)
            .ok_or(AbiError::Overflow(usize::BITS))
    }

    fn slot(&self, index: usize) -> usize {
        self.base + index * WORD
    }

    pub fn uint(&self, index: usize) -> Result<u128, AbiError> {
        self.uint_at(self.slot(index))
    }

    pub fn uint64(&self, index: usize) -> Result<u64, AbiError> {
        u64::try_from(self.uint(index)?).map_err(|_| AbiError::Overflow(64))
    }

    pub fn address(&self, index: usize) -> Result<Address, AbiError> {
        let word = self.word_at(self.slot(index))?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Ok(Address(bytes))
    }

    pub fn bool(&self, index: usize) -> Result<bool, AbiError> {
        match self.uint(index)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(AbiError::InvalidBool),
        }
    }

    pub fn string(&self, index: usize) -> Result<String, AbiError> {
        let start = self.offset_at(self.slot(index))?;
        let len = self.usize_at(start)?;
        let bytes = self.bytes_at(start + WORD, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
    }

    pub fn uint_array(&self, index: usize) -> Result<Vec<u128>, AbiError> {
        let start = self.offset_at(self.slot(index))?;
        let len = self.usize_at(start)?;
        // Bound the allocation by what the buffer can actually hold.
        self.bytes_at(start + WORD, len.saturating_mul(WORD))?;
        (0..len)
            .map(|i| self.uint_at(start + WORD * (i + 1)))
            .collect()
    }

    /// A dynamic tuple referenced by the offset stored in `index`.
    pub fn tuple(&self, index: usize) -> Result<Decoder<'a>, AbiError> {
        let base = self.offset_at(self.slot(index))?;
        self.word_at(base)?;
        Ok(Decoder {
            data: self.data,
            base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_known_values() {
        // Standard ERC-20 selectors.
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn event_topic_matches_transfer() {
        assert_eq!(
            hex::encode(event_topic("Transfer(address,address,uint256)")),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn encodes_static_arguments_inline() {
        let data = encode(&[Token::Uint(7), Token::Bool(true)]);
        assert_eq!(data.len(), 64);
        assert_eq!(data[31], 7);
        assert_eq!(data[63], 1);
    }

    #[test]
    fn encodes_string_with_offset_and_padding() {
        let data = encode(&[Token::String("plot 9".into()), Token::Uint(250)]);
        // head: offset, uint; tail: len, one padded word
        assert_eq!(data.len(), 4 * WORD);
        let decoder = Decoder::new(&data);
        assert_eq!(decoder.uint(0).unwrap(), 64);
        assert_eq!(decoder.string(0).unwrap(), "plot 9");
        assert_eq!(decoder.uint(1).unwrap(), 250);
    }

    #[test]
    fn decodes_uint_array() {
        let data = encode(&[Token::UintArray(vec![3, 1, 4])]);
        assert_eq!(Decoder::new(&data).uint_array(0).unwrap(), vec![3, 1, 4]);
    }

    #[test]
    fn decodes_nested_dynamic_tuple() {
        let owner = Address([0xab; 20]);
        let data = encode(&[Token::Tuple(vec![
            Token::Tuple(vec![Token::Address(owner), Token::String("Asha".into())]),
            Token::Uint(12),
        ])]);
        let outer = Decoder::new(&data).tuple(0).unwrap();
        let inner = outer.tuple(0).unwrap();
        assert_eq!(inner.address(0).unwrap(), owner);
        assert_eq!(inner.string(1).unwrap(), "Asha");
        assert_eq!(outer.uint(1).unwrap(), 12);
    }

    #[test]
    fn static_tuple_is_inlined() {
        let data = encode(&[Token::Tuple(vec![Token::Uint(1), Token::Uint(2)]), Token::Uint(3)]);
        assert_eq!(data.len(), 3 * WORD);
        assert_eq!(Decoder::new(&data).uint(2).unwrap(), 3);
    }

    #[test]
    fn truncated_input_is_an_error() {
        let data = [0u8; 16];
        assert!(matches!(
            Decoder::new(&data).uint(0),
            Err(AbiError::Truncated { .. })
        ));
    }

    #[test]
    fn oversized_uint_is_an_error() {
        let data = [0xffu8; 32];
        assert_eq!(Decoder::new(&data).uint(0), Err(AbiError::Overflow(128)));
    }

    #[test]
    fn out_of_range_string_offset_is_an_error() {
        let data = uint_word(4096);
        assert!(Decoder::new(&data).string(0).is_err());
    }

    #[test]
    fn bool_must_be_zero_or_one() {
        let data = uint_word(2);
        assert_eq!(Decoder::new(&data).bool(0), Err(AbiError::InvalidBool));
    }

    #[test]
    fn hex_round_trip_accepts_prefix() {
        assert_eq!(from_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(to_hex(&[1, 2]), "0x0102");
        assert!(from_hex("0xzz").is_err());
    }
}
