//! Form field validators used by registration and profile updates.
//!
//! All of them accept masked input (`529.982.247-25`, `(13) 99999-0000`) and only look at the
//! digits where it makes sense.
//!

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::{digits_only, CEP_DIGITS};

/// Digits in a CPF
const CPF_DIGITS: usize = 11;

/// Special characters accepted for the password strength check.
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length
const PASSWORD_MIN_LEN: usize = 8;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail regex"))
}

/// All characters are the same one (`111.111.111-11`).
///
fn is_repeated(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Check digit for the first `len` digits of a CPF, weights going down from `len + 1`.
///
fn cpf_check_digit(digits: &[u32], len: usize) -> u32 {
    let sum: u32 = digits[..len]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (len as u32 + 1 - i as u32))
        .sum();
    match 11 - (sum % 11) {
        10 | 11 => 0,
        rest => rest,
    }
}

/// Validate a CPF number, mask allowed.
///
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = digits_only(cpf)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != CPF_DIGITS || is_repeated(&digits) {
        return false;
    }
    cpf_check_digit(&digits, 9) == digits[9] && cpf_check_digit(&digits, 10) == digits[10]
}

/// Validate a CEP, mask allowed.
///
#[inline]
pub fn validate_cep(cep: &str) -> bool {
    digits_only(cep).len() == CEP_DIGITS
}

/// Validate a Brazilian phone number: 10 digits for land lines, 11 for mobiles.
///
pub fn validate_phone(phone: &str) -> bool {
    let digits: Vec<u32> = digits_only(phone)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    (10..=11).contains(&digits.len()) && !is_repeated(&digits)
}

/// Validate an e-mail address (`local@domain.tld`, no whitespace).
///
#[inline]
pub fn validate_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Password strength report, one flag per rule so a UI can show them separately.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PasswordCheck {
    pub min_length: bool,
    pub uppercase: bool,
    pub number: bool,
    pub special_char: bool,
}

impl PasswordCheck {
    pub fn new(password: &str) -> Self {
        PasswordCheck {
            min_length: password.chars().count() >= PASSWORD_MIN_LEN,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
        }
    }

    /// Every rule is satisfied.
    ///
    pub fn is_valid(&self) -> bool {
        self.min_length && self.uppercase && self.number && self.special_char
    }
}
