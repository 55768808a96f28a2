//! # nvattr Architecture
//!
//! nvattr is a **UI-agnostic attribute string parser**. It turns strings such as
//!
//! ```text
//! localhost:0.1/Brightness[DFP-0]=50
//! [gpu:1]/GPUTargetFanSpeed=40
//! /RedGamma=0.5-1.5
//! ```
//!
//! into a structured [`ParsedAttribute`]: an optional X display, an optional
//! target, the catalog entry for the attribute, an optional display device
//! list and a typed value. The `nvattr` binary is a thin client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (nvattr-cli)                                           │
//! │  - Arguments, config overrides, terminal and JSON output    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Parser (parser.rs)                                         │
//! │  - Address → name → device bracket → value, left to right   │
//! │  - Returns ParsedAttribute or a ParseError with a status    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Grammar pieces                                             │
//! │  - target.rs: display names and [type:id] targets           │
//! │  - display_mask.rs: CRT/TV/DFP device lists                 │
//! │  - attributes/: the catalog and typed values                │
//! │  - scan.rs: the cursor every stage reads through            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Library
//!
//! Nothing in this crate writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; failures are returned as values.
//! Resolving a parsed address to concrete hardware targets is left to the
//! caller through the [`TargetResolver`] trait.
//!
//! ## Module Overview
//!
//! - [`parser`]: The entry point, [`parse_attribute_string`]
//! - [`parsed`]: Parsed records and ordered record lists
//! - [`attributes`]: The attribute catalog, value types and value formatting
//! - [`target`]: Address prefixes, target types and the resolver seam
//! - [`display_mask`]: Display device mask codec
//! - [`scan`]: Cursor and string helpers
//! - [`token_pairs`]: `key=value,key=value` option lists
//! - [`config`]: Client configuration
//! - [`error`]: Status codes and error types

pub mod attributes;
pub mod config;
pub mod display_mask;
pub mod error;
pub mod parsed;
pub mod parser;
pub mod scan;
pub mod target;
pub mod token_pairs;

pub use attributes::{AttrValue, AttributeEntry, Catalog, ValueType};
pub use display_mask::{DeviceCategory, DisplayDeviceMask};
pub use error::{ParseError, ParseStatus, Result, ScanError};
pub use parsed::{ParsedAttribute, ParsedAttributeList, ParserFlags};
pub use parser::{parse_attribute_string, ParseMode, Parser};
pub use target::{TargetHandle, TargetResolver, TargetType};
