//! Short code generation and custom alias validation.
//!
//! Generated codes are the Base62 form of a 64-bit id built from the
//! instance's machine id and a storage-backed sequence number.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Base62 alphabet: lowercase, then uppercase, then digits.
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of low bits reserved for the sequence number.
pub const MACHINE_OFFSET: u32 = 20;

/// Bits reserved for the machine id above the sequence.
const MACHINE_BITS: u32 = 10;

const SEQUENCE_MASK: u64 = (1 << MACHINE_OFFSET) - 1;

/// Largest machine id accepted by [`compose_id`] callers.
pub const MAX_MACHINE_ID: u32 = 1023;

/// Maximum alias length, matching the `short_url` column width.
pub const MAX_ALIAS_LENGTH: usize = 50;

/// Aliases that would shadow service routes.
const RESERVED_ALIASES: &[&str] = &["docs", "openapi.json", "redoc", "shorten", "stats", "health"];

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("alias pattern is valid"));

/// Encodes a number using the Base62 alphabet.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(base62_encode(0), "a");
/// assert_eq!(base62_encode(62), "ba");
/// ```
pub fn base62_encode(mut num: u64) -> String {
    if num == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::new();
    while num > 0 {
        digits.push(ALPHABET[(num % 62) as usize]);
        num /= 62;
    }
    digits.reverse();

    // Alphabet is pure ASCII.
    digits.into_iter().map(char::from).collect()
}

/// Combines a machine id and a sequence number into a single id.
///
/// The low 20 bits of the sequence come first, then 10 machine bits. Higher
/// sequence bits are moved above the machine bits, so for sequences below
/// 2^20 this is `(machine_id << 20) | sequence`.
pub fn compose_id(machine_id: u32, sequence: u64) -> u64 {
    let machine = u64::from(machine_id) & ((1 << MACHINE_BITS) - 1);
    let overflow = sequence >> MACHINE_OFFSET;

    (overflow << (MACHINE_OFFSET + MACHINE_BITS))
        | (machine << MACHINE_OFFSET)
        | (sequence & SEQUENCE_MASK)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1-50 characters
/// - Allowed characters: letters, digits, hyphens, underscores
/// - Cannot be a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::validation(
            "Custom alias must be 1-50 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::validation(
            "Custom alias can only contain letters, numbers, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    let lowered = alias.to_ascii_lowercase();
    if RESERVED_ALIASES.contains(&lowered.as_str()) {
        return Err(AppError::validation(
            format!("Custom alias \"{}\" is reserved", alias),
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
