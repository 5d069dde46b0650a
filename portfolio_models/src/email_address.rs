use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Requires a `local@domain.tld` shape before handing the address to lettre.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// An email address, trimmed and lowercased on parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please provide a valid email address.")]
pub struct InvalidEmailAddressError;

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: String) -> EmailAddressWithName {
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name),
            email: self.0,
        })
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        EmailAddressWithName(lettre::message::Mailbox {
            name: None,
            email: value.0,
        })
    }
}

impl FromStr for EmailAddress {
    type Err = InvalidEmailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if !EMAIL_ADDRESS_REGEX.is_match(&s) {
            return Err(InvalidEmailAddressError);
        }
        s.parse().map(Self).map_err(|_| InvalidEmailAddressError)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_and_trims() {
        let email = "  Max.Mustermann@Example.COM ".parse::<EmailAddress>().unwrap();
        assert_eq!(email.as_str(), "max.mustermann@example.com");
    }

    #[test]
    fn parse_rejects_invalid_addresses() {
        for input in ["", "foo", "foo@bar", "foo bar@example.com", "@example.com", "foo@"] {
            assert_eq!(input.parse::<EmailAddress>(), Err(InvalidEmailAddressError));
        }
    }

    #[test]
    fn deserialize() {
        let email: EmailAddress = serde_json::from_value("a@b.com".into()).unwrap();
        assert_eq!(email.as_str(), "a@b.com");
        assert!(serde_json::from_value::<EmailAddress>("a@b".into()).is_err());
    }
}
