//! # Targets and Addresses
//!
//! The part of an attribute string before the `/` says *where* the attribute
//! applies. Three spellings are accepted:
//!
//! ```text
//! {screen}/                                   X screen on the default display
//! {host}:{display}[.{screen}]/                explicit X display, optional screen
//! [{target-type}:{target-id}]/                typed target
//! {host}:{display}[{target-type}:{target-id}]/  explicit display plus typed target
//! ```
//!
//! A bracket whose content is not `keyword:id` (e.g. `[GPU-0]`, `[DPY-1]`) is
//! kept verbatim as a free-form target specification for the resolver.
//!
//! A `.{screen}` and a bracket are mutually exclusive: `host:0.1[gpu:0]/` is
//! rejected rather than silently preferring one of them.
//!
//! This module only records *what* was asked for. Turning a type/id pair or a
//! specification string into concrete handles is the job of a
//! [`TargetResolver`] supplied by the caller.

use crate::error::{ParseError, ParseStatus, Result};
use crate::parsed::ParsedAttribute;
use crate::scan::Cursor;
use serde::Serialize;
use thiserror::Error;

/// Separator between the address and the attribute name.
pub const DISPLAY_NAME_SEPARATOR: char = '/';

/// Kinds of addressable hardware and display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    XScreen,
    Gpu,
    FrameLock,
    Vcsc,
    Gvi,
    Cooler,
    ThermalSensor,
    Svp,
    Display,
}

impl TargetType {
    pub const ALL: [TargetType; 9] = [
        TargetType::XScreen,
        TargetType::Gpu,
        TargetType::FrameLock,
        TargetType::Vcsc,
        TargetType::Gvi,
        TargetType::Cooler,
        TargetType::ThermalSensor,
        TargetType::Svp,
        TargetType::Display,
    ];

    /// Canonical keyword used in `[keyword:id]`.
    pub fn keyword(self) -> &'static str {
        self.keywords()[0]
    }

    /// Every spelling accepted for this type; the first is canonical.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TargetType::XScreen => &["x-screen", "screen", "xscreen"],
            TargetType::Gpu => &["gpu"],
            TargetType::FrameLock => &["framelock"],
            TargetType::Vcsc => &["vcsc", "vcs"],
            TargetType::Gvi => &["gvi"],
            TargetType::Cooler => &["fan", "cooler"],
            TargetType::ThermalSensor => &["thermal-sensor", "thermalsensor"],
            TargetType::Svp => &["svp"],
            TargetType::Display => &["display", "dpy"],
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn from_keyword(s: &str) -> Option<TargetType> {
        TargetType::ALL
            .into_iter()
            .find(|t| t.keywords().iter().any(|k| k.eq_ignore_ascii_case(s)))
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What the bracketed part of an address named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// `[gpu:0]`
    Typed { target_type: TargetType, target_id: u32 },
    /// Anything else, e.g. `[GPU-0]`; resolved later.
    Free(String),
}

/// The parsed address prefix of an attribute string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub display: Option<String>,
    pub target: Option<TargetSpec>,
}

/// A concrete target produced by a [`TargetResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetHandle {
    pub target_type: TargetType,
    pub target_id: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no targets match '{0}'")]
    NoTargets(String),

    #[error("target resolution failed: {0}")]
    Failed(String),
}

/// Turns the address recorded in a [`ParsedAttribute`] into target handles.
///
/// Implementations must ignore `target_type`/`target_id` whenever
/// `target_specification` is set.
pub trait TargetResolver {
    fn resolve(&self, attr: &ParsedAttribute) -> std::result::Result<Vec<TargetHandle>, ResolveError>;
}

/// Parses the optional address prefix, consuming it and the `/` separator.
///
/// The separator is searched for only before the first `=` and outside any
/// `[...]` group, so string values and bracket contents may contain `/`.
/// When there is no separator the cursor is left untouched and an empty
/// [`Address`] is returned.
pub fn parse_address(cursor: &mut Cursor<'_>) -> Result<Address> {
    let rest = cursor.rest();
    let Some(sep) = find_separator(rest) else {
        return Ok(Address::default());
    };

    let base = cursor.position();
    let raw = &rest[..sep];
    let lead = raw.len() - raw.trim_start().len();
    let prefix = raw.trim();
    let at = |offset: usize| base + lead + offset;

    let address = if prefix.is_empty() {
        Address::default()
    } else if prefix.starts_with('[') {
        let (target, consumed) = parse_bracket_target(prefix, at(0))?;
        if consumed != prefix.len() {
            return Err(ParseError::new(
                ParseStatus::TargetSpecTrailingGarbage,
                at(consumed),
            ));
        }
        Address {
            display: None,
            target: Some(target),
        }
    } else if prefix.bytes().all(|b| b.is_ascii_digit()) {
        let screen = prefix
            .parse::<u32>()
            .map_err(|_| ParseError::new(ParseStatus::BadArgument, at(0)))?;
        Address {
            display: None,
            target: Some(TargetSpec::Typed {
                target_type: TargetType::XScreen,
                target_id: screen,
            }),
        }
    } else {
        parse_display_address(prefix, at(0))?
    };

    cursor.advance(sep + DISPLAY_NAME_SEPARATOR.len_utf8());
    tracing::trace!(?address, "parsed address prefix");
    Ok(address)
}

/// Position of the address separator in `s`. Stops at the first `=`; a
/// closed `[...]` group is skipped whole, an unclosed `[` is not.
fn find_separator(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => {
                if let Some(close) = s[i..].find(']') {
                    i += close + 1;
                    continue;
                }
            }
            b'=' => return None,
            b'/' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_display_address(prefix: &str, base: usize) -> Result<Address> {
    let (display, bracket) = match prefix.find('[') {
        Some(i) => (prefix[..i].trim_end(), Some(i)),
        None => (prefix, None),
    };

    let screen = split_screen(display).map_err(|(status, offset)| ParseError::new(status, base + offset))?;

    let target = match bracket {
        None => screen.map(|id| TargetSpec::Typed {
            target_type: TargetType::XScreen,
            target_id: id,
        }),
        Some(i) if screen.is_some() => {
            return Err(ParseError::new(ParseStatus::TargetSpecTrailingGarbage, base + i));
        }
        Some(i) => {
            let (target, consumed) = parse_bracket_target(&prefix[i..], base + i)?;
            if i + consumed != prefix.len() {
                return Err(ParseError::new(
                    ParseStatus::TargetSpecTrailingGarbage,
                    base + i + consumed,
                ));
            }
            Some(target)
        }
    };

    Ok(Address {
        display: Some(display.to_string()),
        target,
    })
}

/// Validates `{host}:{display}[.{screen}]` and returns the screen, if any.
/// Errors carry the byte offset of the offending part.
fn split_screen(display: &str) -> std::result::Result<Option<u32>, (ParseStatus, usize)> {
    let colon = display.rfind(':').ok_or((ParseStatus::BadArgument, 0))?;
    let after = &display[colon + 1..];
    let mut cursor = Cursor::new(after);
    let number = cursor.read_until(|c| !c.is_ascii_digit());
    if number.is_empty() {
        return Err((ParseStatus::BadArgument, colon + 1));
    }
    if cursor.is_end() {
        return Ok(None);
    }
    if !cursor.eat('.') {
        return Err((ParseStatus::TrailingGarbage, colon + 1 + cursor.position()));
    }
    let screen_at = colon + 1 + cursor.position();
    let screen = cursor.read_until(|c| !c.is_ascii_digit());
    if screen.is_empty() {
        return Err((ParseStatus::BadArgument, screen_at));
    }
    if !cursor.is_end() {
        return Err((ParseStatus::TrailingGarbage, colon + 1 + cursor.position()));
    }
    screen
        .parse::<u32>()
        .map(Some)
        .map_err(|_| (ParseStatus::BadArgument, screen_at))
}

/// Returns the screen number embedded in a display name, if it has a
/// well-formed one.
pub fn display_screen(display: &str) -> Option<u32> {
    split_screen(display).ok().flatten()
}

/// Parses `[...]` at the start of `s`; returns the target and the number of
/// bytes consumed including both brackets.
fn parse_bracket_target(s: &str, base: usize) -> Result<(TargetSpec, usize)> {
    debug_assert!(s.starts_with('['));
    let close = s
        .find(']')
        .ok_or_else(|| ParseError::new(ParseStatus::TargetSpecBadTarget, base))?;
    let content = &s[1..close];
    let target = parse_target_spec(content, base + 1)?;
    Ok((target, close + 1))
}

/// Parses the content of a target bracket.
pub fn parse_target_spec(content: &str, base: usize) -> Result<TargetSpec> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(ParseStatus::TargetSpecNoTargets, base));
    }

    let Some((keyword, id)) = trimmed.split_once(':') else {
        if TargetType::from_keyword(trimmed).is_some() {
            return Err(ParseError::new(
                ParseStatus::TargetSpecNoColon,
                base + content.len(),
            ));
        }
        return Ok(TargetSpec::Free(trimmed.to_string()));
    };

    let target_type = TargetType::from_keyword(keyword.trim())
        .ok_or_else(|| ParseError::new(ParseStatus::TargetSpecBadTarget, base))?;

    let id_at = base + content.find(':').map_or(0, |i| i + 1);
    let mut cursor = Cursor::new(id);
    cursor.skip_whitespace();
    if cursor.is_end() {
        return Err(ParseError::new(ParseStatus::TargetSpecNoTargetId, id_at));
    }
    let digits = cursor.read_until(|c| !c.is_ascii_digit());
    if digits.is_empty() {
        return Err(ParseError::new(ParseStatus::TargetSpecBadTargetId, id_at));
    }
    let target_id = digits
        .parse::<u32>()
        .map_err(|_| ParseError::new(ParseStatus::TargetSpecBadTargetId, id_at))?;
    cursor.skip_whitespace();
    if !cursor.is_end() {
        return Err(ParseError::new(
            ParseStatus::TargetSpecTrailingGarbage,
            id_at + cursor.position(),
        ));
    }

    Ok(TargetSpec::Typed {
        target_type,
        target_id,
    })
}

/// Rewrites `display` to name X screen `screen`, replacing any existing
/// `.screen` suffix. Returns `None` when `display` has no `:`.
pub fn standardize_screen_name(display: &str, screen: u32) -> Option<String> {
    let colon = display.rfind(':')?;
    let (host, rest) = (&display[..colon], &display[colon + 1..]);
    let number = rest.split_once('.').map_or(rest, |(n, _)| n);
    Some(format!("{}:{}.{}", host, number, screen))
}
