//! Attribute definitions.
//!
//! This module defines the schema for one catalog entry: its protocol id, the
//! kind of value it carries, and the flags that change how it is parsed,
//! written to config files, and swept by "query all".

use serde::Serialize;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    /// Signed 32-bit integer, possibly with extra semantics from [`IntFlags`].
    Integer,

    /// Single-precision float, or a `min-max` range.
    Float,

    /// Free-form string token.
    String,

    /// Named SDI colour space conversion matrix (`itu601`, `itu709`, `itu177`).
    SdiCsc,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::SdiCsc => "sdi-csc",
        };
        f.write_str(s)
    }
}

/// Flags common to all attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttributeFlags {
    /// Only meaningful to the graphical client.
    pub is_gui_attribute: bool,

    /// Applies to frame lock devices.
    pub is_framelock_attribute: bool,

    /// Applies to SDI output.
    pub is_sdi_attribute: bool,

    /// The `[...]` after the attribute name carries attribute-specific syntax
    /// instead of a display device list.
    pub hijack_display_device: bool,

    /// Never written to the configuration file.
    pub no_config_write: bool,

    /// Skipped by "query all" sweeps.
    pub no_query_all: bool,
}

impl AttributeFlags {
    pub const NONE: AttributeFlags = AttributeFlags {
        is_gui_attribute: false,
        is_framelock_attribute: false,
        is_sdi_attribute: false,
        hijack_display_device: false,
        no_config_write: false,
        no_query_all: false,
    };
}

/// Numeric semantics of integer attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IntFlags {
    /// Value is in hundredths (e.g. refresh rate in 0.01 Hz).
    pub is_100hz: bool,

    /// Value is in thousandths.
    pub is_1000hz: bool,

    /// Value packs two 16-bit integers, written `a,b`.
    pub is_packed: bool,

    /// Value is a display device mask, written `CRT-0,DFP-1`.
    pub is_display_mask: bool,

    /// Value is a display id, written `DPY-3`.
    pub is_display_id: bool,

    /// Zero is not an accepted value.
    pub no_zero: bool,

    /// Value selects displays to switch to; accepts `all`.
    pub is_switch_display: bool,
}

impl IntFlags {
    pub const NONE: IntFlags = IntFlags {
        is_100hz: false,
        is_1000hz: false,
        is_packed: false,
        is_display_mask: false,
        is_display_id: false,
        no_zero: false,
        is_switch_display: false,
    };

    /// Whether the value is written as a display device list.
    pub fn takes_device_names(&self) -> bool {
        self.is_display_mask || self.is_switch_display
    }
}

/// One entry of the attribute catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEntry {
    /// Name used on the command line; matched case-insensitively.
    pub name: &'static str,

    /// Protocol attribute id.
    pub id: u32,

    pub value_type: ValueType,

    pub flags: AttributeFlags,

    /// Only meaningful when `value_type` is [`ValueType::Integer`].
    pub int_flags: IntFlags,

    pub desc: &'static str,
}

impl AttributeEntry {
    /// Create an entry with all flags cleared.
    pub const fn new(name: &'static str, id: u32, value_type: ValueType, desc: &'static str) -> Self {
        Self {
            name,
            id,
            value_type,
            flags: AttributeFlags::NONE,
            int_flags: IntFlags::NONE,
            desc,
        }
    }

    pub const fn gui(mut self) -> Self {
        self.flags.is_gui_attribute = true;
        self
    }

    pub const fn framelock(mut self) -> Self {
        self.flags.is_framelock_attribute = true;
        self
    }

    pub const fn sdi(mut self) -> Self {
        self.flags.is_sdi_attribute = true;
        self
    }

    pub const fn hijack_display_device(mut self) -> Self {
        self.flags.hijack_display_device = true;
        self
    }

    pub const fn no_config_write(mut self) -> Self {
        self.flags.no_config_write = true;
        self
    }

    pub const fn no_query_all(mut self) -> Self {
        self.flags.no_query_all = true;
        self
    }

    pub const fn hz100(mut self) -> Self {
        self.int_flags.is_100hz = true;
        self
    }

    pub const fn hz1000(mut self) -> Self {
        self.int_flags.is_1000hz = true;
        self
    }

    pub const fn packed(mut self) -> Self {
        self.int_flags.is_packed = true;
        self
    }

    pub const fn display_mask(mut self) -> Self {
        self.int_flags.is_display_mask = true;
        self
    }

    pub const fn display_id(mut self) -> Self {
        self.int_flags.is_display_id = true;
        self
    }

    pub const fn no_zero(mut self) -> Self {
        self.int_flags.no_zero = true;
        self
    }

    pub const fn switch_display(mut self) -> Self {
        self.int_flags.is_switch_display = true;
        self
    }

    /// Integer flags, or `None` for non-integer attributes.
    pub fn integer_flags(&self) -> Option<&IntFlags> {
        match self.value_type {
            ValueType::Integer => Some(&self.int_flags),
            _ => None,
        }
    }
}
