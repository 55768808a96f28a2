//! # Attribute Catalog
//!
//! Every name that may appear in an attribute string is described by an
//! [`AttributeEntry`] in a [`Catalog`]:
//!
//! - **Identity**: the user-facing name (matched case-insensitively) and the
//!   protocol attribute id.
//! - **Value type**: what the `={value}` segment must look like.
//! - **Behavior flags**: GUI-only, frame lock, SDI, whether the `[...]` after
//!   the name is a display device list or attribute-specific syntax, and
//!   whether the attribute takes part in config writes and "query all".
//! - **Integer semantics**: scaling, packing, display masks and ids.
//!
//! ## Value Types
//!
//! | Type | Written as | Stored as |
//! |------|------------|-----------|
//! | `Integer` | `50`, `-3`, `500,900`, `CRT-0,DFP-1`, `DPY-2` | `AttrValue::Integer` |
//! | `Float` | `1.2`, `0.5-1.5` | `AttrValue::Float` / `AttrValue::FloatRange` |
//! | `String` | `token` | `AttrValue::String` |
//! | `SdiCsc` | `itu709` | `AttrValue::FloatArray` |
//!
//! The catalog is immutable once built. [`Catalog::builtin`] returns the
//! process-wide table; callers with their own attribute data build a
//! [`Catalog`] over a `'static` slice.

mod catalog;
mod entry;
mod value;

pub use catalog::{Catalog, BUILTIN_ATTRIBUTES};
pub use entry::{AttributeEntry, AttributeFlags, IntFlags, ValueType};
pub use value::{
    format_value, pack_integer, sdi_csc_matrix, unpack_integer, AttrValue, CscMatrix,
    CSC_MATRIX_LEN,
};
