// ── Input validation ──
//
// Pure predicates over user-entered text. None of them allocate errors;
// forms decide how to report a failed check.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CPF_LEN: usize = 11;
const MIN_PASSWORD_LEN: usize = 6;

/// Keep only ASCII digits.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn digits(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Check digit for the first `weights.len()` digits. Weights run down to 2.
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    let digit = 11 - (sum % 11);
    if digit > 9 { 0 } else { digit }
}

/// Validate a Brazilian CPF, formatted or not.
pub fn is_valid_cpf(raw: &str) -> bool {
    let d = digits(raw);
    if d.len() != CPF_LEN {
        return false;
    }
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }
    check_digit(&d[..9], 10) == d[9] && check_digit(&d[..10], 11) == d[10]
}

/// Landline (10 digits) or mobile (11 digits), formatting ignored.
pub fn is_valid_phone(raw: &str) -> bool {
    matches!(strip_non_digits(raw).len(), 10 | 11)
}

pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn is_valid_password(raw: &str) -> bool {
    raw.chars().count() >= MIN_PASSWORD_LEN
}

/// Login identifier: anything with exactly 11 digits is treated as a CPF,
/// everything else as an email address.
pub fn is_valid_email_or_cpf(raw: &str) -> bool {
    if strip_non_digits(raw).len() == CPF_LEN {
        is_valid_cpf(raw)
    } else {
        is_valid_email(raw)
    }
}

pub fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn is_valid_date(raw: &str) -> bool {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(raw).is_ok()
}

// ── Cpf ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CPF: {0:?}")]
pub struct InvalidCpf(pub String);

/// A validated CPF, stored as its 11 digits.
///
/// Displays in the `XXX.XXX.XXX-XX` form; serializes as bare digits, which
/// is what the API expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(raw: &str) -> Result<Self, InvalidCpf> {
        if is_valid_cpf(raw) {
            Ok(Self(strip_non_digits(raw)))
        } else {
            Err(InvalidCpf(raw.to_owned()))
        }
    }

    /// The bare 11 digits.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_cpf(&self.0))
    }
}

impl FromStr for Cpf {
    type Err = InvalidCpf;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = InvalidCpf;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID: &str = "52998224725";

    #[test]
    fn accepts_valid_cpf_with_or_without_mask() {
        assert!(is_valid_cpf(VALID));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn rejects_any_check_digit_mutation() {
        for pos in [9, 10] {
            for replacement in '0'..='9' {
                let mut mutated: Vec<char> = VALID.chars().collect();
                if mutated[pos] == replacement {
                    continue;
                }
                mutated[pos] = replacement;
                let mutated: String = mutated.into_iter().collect();
                assert!(!is_valid_cpf(&mutated), "{mutated} should be invalid");
            }
        }
    }

    #[test]
    fn rejects_repeated_digits() {
        for d in '0'..='9' {
            let repeated: String = std::iter::repeat_n(d, 11).collect();
            assert!(!is_valid_cpf(&repeated), "{repeated}");
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247250"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn phone_length_rule() {
        assert!(is_valid_phone("(11) 98765-4321"));
        assert!(is_valid_phone("1133334444"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("119876543210"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@escola.com.br"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ana@escola"));
        assert!(!is_valid_email("ana escola@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@@x.com"));
        assert!(!is_valid_email("a@x."));
    }

    #[test]
    fn password_minimum() {
        assert!(is_valid_password("123456"));
        assert!(!is_valid_password("12345"));
    }

    #[test]
    fn email_or_cpf_dispatches_on_digit_count() {
        assert!(is_valid_email_or_cpf("529.982.247-25"));
        assert!(!is_valid_email_or_cpf("529.982.247-26"));
        assert!(is_valid_email_or_cpf("caixa@cantina.dev"));
        assert!(!is_valid_email_or_cpf("caixa"));
    }

    #[test]
    fn cpf_newtype_normalizes() {
        let cpf: Cpf = "529.982.247-25".parse().unwrap();
        assert_eq!(cpf.digits(), VALID);
        assert_eq!(cpf.to_string(), "529.982.247-25");
        assert_eq!(serde_json::to_string(&cpf).unwrap(), "\"52998224725\"");
        assert!(serde_json::from_str::<Cpf>("\"00000000000\"").is_err());
    }

    #[test]
    fn dates_and_amounts() {
        assert!(is_valid_date("2024-02-29"));
        assert!(is_valid_date("2024-02-01T10:00:00Z"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(is_positive_amount(0.01));
        assert!(!is_positive_amount(0.0));
        assert!(!is_positive_amount(f64::NAN));
    }
}
