//! # Attribute String Parser
//!
//! Parses one attribute string into a [`ParsedAttribute`]:
//!
//! ```text
//! input          := [address "/"] attr-name [device-bracket] ["=" value]
//! address        := screen | host-display | bracket-target
//! host-display   := host ":" display ["." screen] [bracket-target]
//! bracket-target := "[" target-type ":" target-id "]" | "[" free-form "]"
//! device-bracket := "[" device-spec "]"
//! ```
//!
//! The stages run strictly left to right over a single [`Cursor`]:
//!
//! 1. **Address**: [`parse_address`](crate::target::parse_address)
//! 2. **Name**: terminated by `[`, `=`, whitespace or end of input, then
//!    looked up case-insensitively in the [`Catalog`]
//! 3. **Device bracket**: a display device list, unless the attribute
//!    hijacks the bracket for its own syntax
//! 4. **Value**: required in [`ParseMode::Assignment`], forbidden in
//!    [`ParseMode::Query`]
//!
//! The first stage that fails aborts the parse with its [`ParseStatus`]. The
//! parser never backtracks into an earlier stage.

use crate::attributes::{
    pack_integer, sdi_csc_matrix, AttrValue, AttributeEntry, Catalog, ValueType,
};
use crate::display_mask::{read_display_device_name, DisplayDeviceMask};
use crate::error::{ParseError, ParseStatus, Result, ScanError};
use crate::parsed::ParsedAttribute;
use crate::scan::Cursor;
use crate::target::{parse_address, TargetSpec};
use serde::{Deserialize, Serialize};

/// Attribute names must be shorter than this many bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Whether the string assigns a value or queries the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Assignment,
    Query,
}

/// Parses attribute strings against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    catalog: &'static Catalog,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Parser {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Parses `input` into a new record.
    pub fn parse(&self, input: &str, mode: ParseMode) -> Result<ParsedAttribute> {
        let mut out = ParsedAttribute::new();
        self.parse_into(input, mode, &mut out)?;
        Ok(out)
    }

    /// Parses `input` into `out`, which is cleaned first. On error `out` holds
    /// whatever the stages before the failure recorded and should be cleaned
    /// or dropped, not used.
    pub fn parse_into(
        &self,
        input: &str,
        mode: ParseMode,
        out: &mut ParsedAttribute,
    ) -> Result<()> {
        out.clean();
        let result = self.run(input, mode, out);
        match &result {
            Ok(()) => tracing::debug!(
                input,
                attribute = out.attribute_name(),
                ?mode,
                "parsed attribute string"
            ),
            Err(e) => tracing::debug!(
                input,
                status = ?e.status,
                position = e.position,
                "attribute string rejected"
            ),
        }
        result
    }

    fn run(&self, input: &str, mode: ParseMode, out: &mut ParsedAttribute) -> Result<()> {
        if input.trim().is_empty() {
            return Err(ParseError::new(ParseStatus::EmptyString, 0));
        }

        let mut cursor = Cursor::new(input);
        cursor.skip_whitespace();

        let address_at = cursor.position();
        let address = parse_address(&mut cursor)?;
        if cursor.position() != address_at {
            out.flags.has_x_display = address.display.is_some();
            out.display = address.display;
            match address.target {
                Some(TargetSpec::Typed {
                    target_type,
                    target_id,
                }) => out.set_target(target_type, target_id),
                Some(TargetSpec::Free(spec)) => {
                    out.target_specification = Some(spec);
                    out.flags.has_target = true;
                }
                None => {}
            }
        }

        let entry = self.read_attribute_name(&mut cursor)?;
        out.set_attribute(entry);

        cursor.skip_whitespace();
        if cursor.peek() == Some('[') {
            read_device_bracket(&mut cursor, entry, out)?;
        }

        cursor.skip_whitespace();
        match mode {
            ParseMode::Query => {
                if !cursor.is_end() {
                    return Err(ParseError::new(ParseStatus::TrailingGarbage, cursor.position()));
                }
            }
            ParseMode::Assignment => {
                if !cursor.eat('=') {
                    return Err(ParseError::new(ParseStatus::MissingEqualSign, cursor.position()));
                }
                cursor.skip_whitespace();
                if cursor.is_end() {
                    return Err(ParseError::new(ParseStatus::NoValue, cursor.position()));
                }
                let value_at = cursor.position();
                let value = read_value(&mut cursor, entry, out)?;
                tracing::trace!(?value, "parsed value");
                out.set_value(value)
                    .map_err(|_| ParseError::new(ParseStatus::BadArgument, value_at))?;
                cursor.skip_whitespace();
                if !cursor.is_end() {
                    return Err(ParseError::new(ParseStatus::TrailingGarbage, cursor.position()));
                }
            }
        }
        Ok(())
    }

    fn read_attribute_name(&self, cursor: &mut Cursor<'_>) -> Result<&'static AttributeEntry> {
        cursor.skip_whitespace();
        let at = cursor.position();
        let name = cursor.read_until(|c| c == '[' || c == '=' || c.is_ascii_whitespace());
        if name.is_empty() {
            return Err(ParseError::new(ParseStatus::AttrNameMissing, at));
        }
        if name.len() >= MAX_NAME_LEN {
            return Err(ParseError::new(ParseStatus::AttrNameTooLong, at));
        }
        let entry = self
            .catalog
            .by_name(name)
            .ok_or_else(|| ParseError::new(ParseStatus::UnknownAttrName, at))?;
        tracing::trace!(name, id = entry.id, "resolved attribute name");
        Ok(entry)
    }
}

/// Parses `input` against the built-in catalog.
pub fn parse_attribute_string(input: &str, mode: ParseMode) -> Result<ParsedAttribute> {
    Parser::default().parse(input, mode)
}

/// Reads `[...]` after the attribute name. For attributes that hijack the
/// bracket the content is only recorded; otherwise it must be a device list.
fn read_device_bracket(
    cursor: &mut Cursor<'_>,
    entry: &AttributeEntry,
    out: &mut ParsedAttribute,
) -> Result<()> {
    let at = cursor.position();
    let rest = cursor.rest();
    let close = rest
        .find(']')
        .ok_or_else(|| ParseError::new(ParseStatus::BadDisplayDevice, at))?;
    let content = rest[1..close].trim();
    if content.is_empty() {
        return Err(ParseError::new(ParseStatus::BadDisplayDevice, at + 1));
    }

    if !entry.flags.hijack_display_device {
        let mask = content
            .parse::<DisplayDeviceMask>()
            .map_err(|e| ParseError::with_cause(ParseStatus::BadDisplayDevice, at + 1, e))?;
        out.display_device_mask = mask;
    }
    out.display_device_specification = Some(content.to_string());
    out.flags.has_display_device = true;
    cursor.advance(close + 1);
    Ok(())
}

/// Maps a numeric scanner failure onto the status a user sees.
fn numeric_error(e: ScanError, at: usize) -> ParseError {
    let status = match e {
        ScanError::NoDigits => ParseStatus::NoValue,
        ScanError::MissingSeparator(',') => ParseStatus::MissingComma,
        _ => ParseStatus::BadArgument,
    };
    ParseError::with_cause(status, at, e)
}

fn read_value(
    cursor: &mut Cursor<'_>,
    entry: &AttributeEntry,
    out: &mut ParsedAttribute,
) -> Result<AttrValue> {
    let at = cursor.position();
    match entry.value_type {
        ValueType::Integer => read_integer_value(cursor, entry, out),
        ValueType::Float => match cursor.read_float_range() {
            Ok((min, max)) => Ok(AttrValue::FloatRange { min, max }),
            // No `-` after the first number: a plain float.
            Err(ScanError::MissingSeparator('-')) => cursor
                .read_float()
                .map(AttrValue::Float)
                .map_err(|e| numeric_error(e, at)),
            Err(e) => Err(numeric_error(e, at)),
        },
        ValueType::String => {
            let token = cursor.read_until(|c| c.is_ascii_whitespace());
            Ok(AttrValue::String(token.to_string()))
        }
        ValueType::SdiCsc => {
            let token = cursor.read_until(|c| c.is_ascii_whitespace());
            sdi_csc_matrix(token).map(AttrValue::FloatArray).ok_or_else(|| {
                ParseError::with_cause(
                    ParseStatus::BadArgument,
                    at,
                    ScanError::UnknownMatrix(token.to_string()),
                )
            })
        }
    }
}

fn read_integer_value(
    cursor: &mut Cursor<'_>,
    entry: &AttributeEntry,
    out: &mut ParsedAttribute,
) -> Result<AttrValue> {
    let at = cursor.position();
    let flags = &entry.int_flags;

    let value = if flags.is_packed {
        let (a, b) = cursor
            .read_integer_pair(',')
            .map_err(|e| numeric_error(e, at))?;
        pack_integer(a, b)
    } else if flags.takes_device_names() {
        if flags.is_switch_display && is_keyword(cursor.rest(), "all") {
            cursor.advance(3);
            out.flags.assign_all_displays = true;
            DisplayDeviceMask::VALID_DEVICES as i32
        } else {
            let mask = read_display_device_name(cursor)
                .map_err(|e| ParseError::with_cause(ParseStatus::BadDisplayDevice, at, e))?;
            mask.expand_wildcards().bits() as i32
        }
    } else if flags.is_display_id {
        let id = cursor
            .read_display_id()
            .map_err(|e| ParseError::with_cause(ParseStatus::BadDisplayDevice, at, e))?;
        i32::try_from(id).map_err(|_| {
            ParseError::with_cause(ParseStatus::BadDisplayDevice, at, ScanError::OutOfRange)
        })?
    } else {
        cursor.read_integer().map_err(|e| numeric_error(e, at))?
    };

    if flags.no_zero && value == 0 {
        return Err(ParseError::with_cause(
            ParseStatus::BadArgument,
            at,
            ScanError::ZeroNotAllowed,
        ));
    }
    Ok(AttrValue::Integer(value))
}

/// True when `s` starts with `keyword` (ignoring case) followed by whitespace
/// or end of input.
fn is_keyword(s: &str, keyword: &str) -> bool {
    s.len() >= keyword.len()
        && s.is_char_boundary(keyword.len())
        && s[..keyword.len()].eq_ignore_ascii_case(keyword)
        && s[keyword.len()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_ascii_whitespace())
}
