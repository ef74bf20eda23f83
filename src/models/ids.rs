//! Strongly-typed ID wrappers for host identifiers
//!
//! Every identifier the host hands out is a 32-bit value. Newtype wrappers
//! keep department, purpose and building-type IDs from being mixed up at
//! compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from its raw value
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Get the raw value
            pub const fn value(&self) -> u32 {
                self.0
            }

            /// Parse an ID from `0x`-prefixed hex or plain decimal
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                parse_u32(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:08X}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        // Serialized as the hex display form; numbers are accepted on input
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match RawId::deserialize(deserializer)? {
                    RawId::Number(value) => Ok(Self(value)),
                    RawId::Text(text) => Self::parse(&text).map_err(|e| {
                        serde::de::Error::custom(format!("invalid identifier '{}': {}", text, e))
                    }),
                }
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u32),
    Text(String),
}

fn parse_u32(s: &str) -> Result<u32, ParseIntError> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        // Without a prefix "10" and "1A" would read in different bases
        None => s.parse::<u32>(),
    }
}

define_id!(DepartmentId);
define_id!(PurposeId);
define_id!(BuildingType);
define_id!(PropertyId);
define_id!(OccupantId);
define_id!(MessageId);
define_id!(CheatId);
define_id!(DirectorId);
