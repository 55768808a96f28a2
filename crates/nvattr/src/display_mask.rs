//! # Display Device Masks
//!
//! A display device is identified by a category (CRT, TV or DFP) and an index
//! in `0..=7`. A set of devices is a 32-bit mask:
//!
//! | Bits  | Meaning             |
//! |-------|---------------------|
//! | 0-7   | `CRT-0` .. `CRT-7`  |
//! | 8-15  | `TV-0` .. `TV-7`    |
//! | 16-23 | `DFP-0` .. `DFP-7`  |
//! | 24    | every CRT           |
//! | 25    | every TV            |
//! | 26    | every DFP           |
//!
//! The human form is a comma-separated list such as `CRT-1,DFP-0`. A bare
//! category keyword (`DFP`) sets that category's wildcard bit, which must be
//! expanded with [`DisplayDeviceMask::expand_wildcards`] before the mask can
//! address real devices.
//!
//! Converting a mask back to a string yields the canonical spelling, so
//! `"DFP-1,CRT-0,CRT-0"` prints as `"CRT-0,DFP-1"`.

use crate::error::ScanError;
use crate::scan::{tokenize, Cursor};
use serde::Serialize;
use std::str::FromStr;

/// One of the three display device categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceCategory {
    Crt,
    Tv,
    Dfp,
}

impl DeviceCategory {
    /// Categories in canonical output order.
    pub const ALL: [DeviceCategory; 3] = [DeviceCategory::Crt, DeviceCategory::Tv, DeviceCategory::Dfp];

    pub fn keyword(self) -> &'static str {
        match self {
            DeviceCategory::Crt => "CRT",
            DeviceCategory::Tv => "TV",
            DeviceCategory::Dfp => "DFP",
        }
    }

    fn shift(self) -> u32 {
        match self {
            DeviceCategory::Crt => 0,
            DeviceCategory::Tv => 8,
            DeviceCategory::Dfp => 16,
        }
    }

    /// The eight per-device bits of this category.
    pub fn all_bits(self) -> u32 {
        0xff << self.shift()
    }

    /// The wildcard bit meaning "every device of this category".
    pub fn wildcard_bit(self) -> u32 {
        match self {
            DeviceCategory::Crt => DisplayDeviceMask::WILDCARD_CRT,
            DeviceCategory::Tv => DisplayDeviceMask::WILDCARD_TV,
            DeviceCategory::Dfp => DisplayDeviceMask::WILDCARD_DFP,
        }
    }

    /// The bit for device `index` of this category.
    pub fn bit(self, index: u8) -> u32 {
        1 << (self.shift() + u32::from(index))
    }

    fn from_keyword(s: &str) -> Option<DeviceCategory> {
        DeviceCategory::ALL
            .into_iter()
            .find(|c| c.keyword().eq_ignore_ascii_case(s))
    }
}

/// A set of display devices, possibly containing per-category wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DisplayDeviceMask(pub u32);

impl DisplayDeviceMask {
    pub const WILDCARD_CRT: u32 = 1 << 24;
    pub const WILDCARD_TV: u32 = 1 << 25;
    pub const WILDCARD_DFP: u32 = 1 << 26;

    /// Bits that name concrete devices.
    pub const VALID_DEVICES: u32 = 0x00ff_ffff;
    /// Bits reserved for wildcards.
    pub const WILDCARDS: u32 = 0xff00_0000;

    /// Reserved "unset" value.
    pub const INVALID: DisplayDeviceMask = DisplayDeviceMask(0xffff_ffff);
    pub const EMPTY: DisplayDeviceMask = DisplayDeviceMask(0);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when only wildcard bits are set; such a mask must be expanded
    /// before it can address devices.
    pub fn is_wildcard_only(self) -> bool {
        self.0 != 0 && self.0 & Self::VALID_DEVICES == 0
    }

    /// Replaces each set wildcard bit with all eight bits of its category.
    ///
    /// Categories without a wildcard are left untouched, and expanding an
    /// already-expanded mask changes nothing.
    #[must_use]
    pub fn expand_wildcards(self) -> DisplayDeviceMask {
        if self.is_invalid() {
            return self;
        }
        let mut bits = self.0;
        for category in DeviceCategory::ALL {
            if bits & category.wildcard_bit() != 0 {
                bits |= category.all_bits();
                bits &= !category.wildcard_bit();
            }
        }
        DisplayDeviceMask(bits)
    }

    /// Number of set bits; used to tell single-device masks from multi-device ones.
    pub fn count(self) -> u32 {
        count_number_of_bits(self.0)
    }

    pub fn contains(self, category: DeviceCategory, index: u8) -> bool {
        self.0 & category.bit(index) != 0
    }
}

/// Population count of `mask`.
pub fn count_number_of_bits(mask: u32) -> u32 {
    mask.count_ones()
}

impl FromStr for DisplayDeviceMask {
    type Err = ScanError;

    /// Parses a comma-separated list of `CRT`, `TV` or `DFP`, each optionally
    /// followed by `-<index>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u32;
        for token in tokenize(s, ',') {
            bits |= parse_device_token(token.trim())?;
        }
        // A wildcard subsumes any explicit index in the same category.
        for category in DeviceCategory::ALL {
            if bits & category.wildcard_bit() != 0 {
                bits &= !category.all_bits();
            }
        }
        Ok(DisplayDeviceMask(bits))
    }
}

fn parse_device_token(token: &str) -> Result<u32, ScanError> {
    let (keyword, index) = match token.split_once('-') {
        Some((keyword, index)) => (keyword, Some(index)),
        None => (token, None),
    };
    let category = DeviceCategory::from_keyword(keyword)
        .ok_or_else(|| ScanError::UnknownDeviceCategory(token.to_string()))?;

    let Some(index) = index else {
        return Ok(category.wildcard_bit());
    };
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScanError::NoDigits);
    }
    let index: i64 = index
        .parse()
        .map_err(|_| ScanError::DeviceIndexOutOfRange(i64::MAX))?;
    if !(0..=7).contains(&index) {
        return Err(ScanError::DeviceIndexOutOfRange(index));
    }
    Ok(category.bit(index as u8))
}

impl std::fmt::Display for DisplayDeviceMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens = Vec::new();
        for category in DeviceCategory::ALL {
            if self.0 & category.wildcard_bit() != 0 {
                tokens.push(category.keyword().to_string());
                continue;
            }
            for index in 0..8u8 {
                if self.contains(category, index) {
                    tokens.push(format!("{}-{}", category.keyword(), index));
                }
            }
        }
        write!(f, "{}", tokens.join(","))
    }
}

/// Reads a device list such as `CRT-0,DFP-1` at the cursor, stopping at the
/// first character that cannot belong to one.
pub fn read_display_device_name(cursor: &mut Cursor<'_>) -> Result<DisplayDeviceMask, ScanError> {
    let mut ahead = *cursor;
    let text = ahead.read_until(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == ','));
    let mask = text.parse::<DisplayDeviceMask>()?;
    *cursor = ahead;
    Ok(mask)
}
