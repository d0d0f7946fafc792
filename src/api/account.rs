use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;

pub const ACCOUNT_DIGITS: usize = 8;

/// A utility account number: exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ACCOUNT_DIGITS && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(AccountNumber(s.to_string()))
        } else {
            Err(AccountError::Invalid(s.to_string()))
        }
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
