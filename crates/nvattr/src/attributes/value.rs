//! Attribute values.
//!
//! An [`AttrValue`] is the parsed right-hand side of an assignment. Its variant
//! is dictated by the attribute's [`ValueType`]; [`AttrValue::value_type`] and
//! [`AttrValue::matches`] let the record enforce that agreement.

use super::entry::{AttributeEntry, ValueType};
use serde::Serialize;

/// Number of coefficients in an SDI colour space conversion matrix.
pub const CSC_MATRIX_LEN: usize = 15;

/// A colour space conversion matrix laid out as
///
/// ```text
/// { YR,  YG,  YB,  YOffset,  YScale,
///   CrR, CrG, CrB, CrOffset, CrScale,
///   CbR, CbG, CbB, CbOffset, CbScale }
/// ```
pub type CscMatrix = [f32; CSC_MATRIX_LEN];

static CSC_ITU601: CscMatrix = [
    0.2991, 0.5870, 0.1141, 0.0625, 0.85547, //
    0.5000, -0.4185, -0.0810, 0.5000, 0.87500, //
    -0.1686, -0.3311, 0.5000, 0.5000, 0.87500,
];

static CSC_ITU709: CscMatrix = [
    0.2130, 0.7156, 0.0725, 0.0625, 0.85547, //
    0.5000, -0.4542, -0.0455, 0.5000, 0.87500, //
    -0.1146, -0.3850, 0.5000, 0.5000, 0.87500,
];

static CSC_ITU177: CscMatrix = [
    0.4124, 0.3576, 0.1805, 0.0625, 0.85547, //
    0.5000, -0.4540, -0.0460, 0.5000, 0.87500, //
    -0.1140, -0.3850, 0.5000, 0.5000, 0.87500,
];

/// Looks up a standard colour space conversion matrix by name
/// (`itu601`, `itu709` or `itu177`, case-insensitive).
pub fn sdi_csc_matrix(name: &str) -> Option<&'static CscMatrix> {
    match name.to_ascii_lowercase().as_str() {
        "itu601" => Some(&CSC_ITU601),
        "itu709" => Some(&CSC_ITU709),
        "itu177" => Some(&CSC_ITU177),
        _ => None,
    }
}

/// Runtime representation of a parsed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "value")]
pub enum AttrValue {
    Integer(i32),
    Float(f32),
    /// A `min-max` float range; `min <= max` always holds.
    FloatRange { min: f32, max: f32 },
    /// Reference to a static colour space conversion matrix.
    FloatArray(&'static CscMatrix),
    String(String),
}

impl AttrValue {
    /// The catalog value type this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            AttrValue::Integer(_) => ValueType::Integer,
            AttrValue::Float(_) | AttrValue::FloatRange { .. } => ValueType::Float,
            AttrValue::FloatArray(_) => ValueType::SdiCsc,
            AttrValue::String(_) => ValueType::String,
        }
    }

    pub fn matches(&self, value_type: ValueType) -> bool {
        self.value_type() == value_type
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            AttrValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders `value` the way a user would type it for `entry`.
///
/// Scaled integers print as fractions, packed integers as `a,b`, and display
/// masks as device lists.
pub fn format_value(entry: &AttributeEntry, value: &AttrValue) -> String {
    match value {
        AttrValue::Integer(v) => {
            let flags = &entry.int_flags;
            if flags.is_100hz {
                format!("{:.2}", f64::from(*v) / 100.0)
            } else if flags.is_1000hz {
                format!("{:.3}", f64::from(*v) / 1000.0)
            } else if flags.is_packed {
                let (a, b) = unpack_integer(*v);
                format!("{},{}", a, b)
            } else if flags.takes_device_names() {
                crate::DisplayDeviceMask(*v as u32).to_string()
            } else if flags.is_display_id {
                format!("DPY-{}", v)
            } else {
                v.to_string()
            }
        }
        AttrValue::Float(v) => v.to_string(),
        AttrValue::FloatRange { min, max } => format!("{}-{}", min, max),
        AttrValue::FloatArray(m) => {
            let parts: Vec<String> = m.iter().map(|f| f.to_string()).collect();
            parts.join(",")
        }
        AttrValue::String(s) => s.clone(),
    }
}

/// Packs two 16-bit halves into one integer value: `a` high, `b` low.
pub fn pack_integer(a: i32, b: i32) -> i32 {
    ((((a as u32) & 0xffff) << 16) | ((b as u32) & 0xffff)) as i32
}

/// Inverse of [`pack_integer`] for non-negative halves.
pub fn unpack_integer(v: i32) -> (i32, i32) {
    let v = v as u32;
    ((v >> 16) as i32, (v & 0xffff) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Catalog;

    #[test]
    fn test_value_type_follows_variant() {
        assert_eq!(AttrValue::Integer(1).value_type(), ValueType::Integer);
        assert_eq!(
            AttrValue::FloatRange { min: 0.0, max: 1.0 }.value_type(),
            ValueType::Float
        );
        assert_eq!(
            AttrValue::FloatArray(&CSC_ITU709).value_type(),
            ValueType::SdiCsc
        );
        assert!(AttrValue::String("x".into()).matches(ValueType::String));
        assert!(!AttrValue::String("x".into()).matches(ValueType::Integer));
    }

    #[test]
    fn test_typed_accessors() {
        let int = AttrValue::Integer(-3);
        assert_eq!(int.as_integer(), Some(-3));
        assert_eq!(int.as_float(), None);
        assert_eq!(int.as_str(), None);

        assert_eq!(AttrValue::Float(0.5).as_float(), Some(0.5));
        assert_eq!(AttrValue::Float(0.5).as_integer(), None);
        assert_eq!(AttrValue::FloatRange { min: 0.0, max: 1.0 }.as_float(), None);

        let s = AttrValue::String("ITU709".into());
        assert_eq!(s.as_str(), Some("ITU709"));
        assert_eq!(s.as_integer(), None);
    }

    #[test]
    fn test_csc_lookup_ignores_case() {
        assert!(sdi_csc_matrix("ITU709").is_some());
        assert!(std::ptr::eq(
            sdi_csc_matrix("itu601").unwrap(),
            sdi_csc_matrix("Itu601").unwrap()
        ));
        assert!(sdi_csc_matrix("srgb").is_none());
    }

    #[test]
    fn test_pack_and_unpack() {
        let v = pack_integer(1350, 3505);
        assert_eq!(v, (1350 << 16) | 3505);
        assert_eq!(unpack_integer(v), (1350, 3505));
    }

    #[test]
    fn test_format_scaled_and_packed_values() {
        let catalog = Catalog::builtin();
        let rate = catalog.by_name("RefreshRate").unwrap();
        assert_eq!(format_value(rate, &AttrValue::Integer(5995)), "59.95");

        let rate3 = catalog.by_name("RefreshRate3").unwrap();
        assert_eq!(format_value(rate3, &AttrValue::Integer(59940)), "59.940");

        let clocks = catalog.by_name("GPU3DClockFreqs").unwrap();
        assert_eq!(
            format_value(clocks, &AttrValue::Integer(pack_integer(500, 900))),
            "500,900"
        );

        let displays = catalog.by_name("AssociatedDisplays").unwrap();
        assert_eq!(
            format_value(displays, &AttrValue::Integer(0x1_0001)),
            "CRT-0,DFP-0"
        );

        let plain = catalog.by_name("Brightness").unwrap();
        assert_eq!(format_value(plain, &AttrValue::Integer(-3)), "-3");
    }
}
