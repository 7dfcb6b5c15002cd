/// Content encodings and gzip quality presets
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{BEST_LEVEL, FASTEST_LEVEL};

/// Representation currently held by a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Raw bytes
    Identity,
    /// GZIP framed DEFLATE stream (RFC 1952)
    Gzip,
}

impl Encoding {
    /// Convert encoding to HTTP Content-Encoding header value
    pub fn to_header_value(&self) -> &'static str {
        match self {
            Encoding::Identity => "identity",
            Encoding::Gzip => "gzip",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_header_value())
    }
}

/// Speed-versus-ratio preference, fixed for a unit's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionPreference {
    /// Fastest gzip level, lower ratio
    #[default]
    Speed,
    /// Best gzip level, slower
    Ratio,
}

impl CompressionPreference {
    /// Build a preference from the "prefer speed" flag
    pub fn from_prefer_speed(prefer_speed: bool) -> Self {
        if prefer_speed {
            CompressionPreference::Speed
        } else {
            CompressionPreference::Ratio
        }
    }

    /// The flate2 level this preference compresses with
    pub fn level(&self) -> u32 {
        match self {
            CompressionPreference::Speed => FASTEST_LEVEL,
            CompressionPreference::Ratio => BEST_LEVEL,
        }
    }

    pub fn to_flate2(&self) -> flate2::Compression {
        flate2::Compression::new(self.level())
    }
}
