//! Order status values reported by the VTEX OMS.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Order workflow status.
///
/// Known states get their own variant so pages can style them; anything
/// else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    PaymentPending,
    PaymentApproved,
    ReadyForHandling,
    Handling,
    Invoiced,
    Canceled,
    Other(String),
}

impl OrderStatus {
    /// The OMS wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PaymentPending => "payment-pending",
            Self::PaymentApproved => "payment-approved",
            Self::ReadyForHandling => "ready-for-handling",
            Self::Handling => "handling",
            Self::Invoiced => "invoiced",
            Self::Canceled => "canceled",
            Self::Other(raw) => raw,
        }
    }

    /// CSS badge class for status pills.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::PaymentPending => "bg-yellow-500",
            Self::PaymentApproved => "bg-green-500",
            Self::ReadyForHandling => "bg-blue-500",
            Self::Handling => "bg-blue-600",
            Self::Invoiced => "bg-purple-500",
            Self::Canceled => "bg-red-500",
            Self::Other(_) => "bg-gray-500",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "payment-pending" => Self::PaymentPending,
            "payment-approved" => Self::PaymentApproved,
            "ready-for-handling" => Self::ReadyForHandling,
            "handling" => Self::Handling,
            "invoiced" => Self::Invoiced,
            "canceled" => Self::Canceled,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        })
    }
}
