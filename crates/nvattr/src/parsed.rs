//! Parsed attribute records.
//!
//! A [`ParsedAttribute`] is the output of one call to
//! [`parse_attribute_string`](crate::parse_attribute_string). Callers that
//! process a batch collect them in a [`ParsedAttributeList`], which keeps
//! insertion order.
//!
//! Records own all of their data. [`ParsedAttribute::clean`] resets a record
//! for reuse and is safe to call any number of times on a record in any state,
//! including one left half-filled by a failed parse; dropping the record
//! releases it.

use crate::attributes::{AttrValue, AttributeEntry, ValueType};
use crate::display_mask::DisplayDeviceMask;
use crate::target::{display_screen, ResolveError, TargetHandle, TargetResolver, TargetType};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Which optional parts of the attribute string were present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParserFlags {
    pub has_x_display: bool,
    pub has_target: bool,
    pub has_display_device: bool,
    pub has_value: bool,
    pub assign_all_displays: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("no attribute has been resolved for this record")]
    NoAttribute,

    #[error("attribute '{name}' takes {expected} values, not {found}")]
    ValueTypeMismatch {
        name: &'static str,
        expected: ValueType,
        found: ValueType,
    },
}

/// The structured result of parsing one attribute string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAttribute {
    /// X display name, e.g. `localhost:0.1`.
    pub display: Option<String>,

    /// Free-form target specification from `[...]`. When set, consumers must
    /// ignore `target_type` and `target_id`.
    pub target_specification: Option<String>,

    pub target_type: Option<TargetType>,
    pub target_id: Option<u32>,

    #[serde(rename = "attribute", serialize_with = "serialize_entry_name")]
    pub attr_entry: Option<&'static AttributeEntry>,

    value: Option<AttrValue>,

    /// Raw content of the `[...]` after the attribute name.
    pub display_device_specification: Option<String>,

    /// Devices named by `display_device_specification`, or
    /// [`DisplayDeviceMask::INVALID`] when none were given.
    pub display_device_mask: DisplayDeviceMask,

    pub flags: ParserFlags,

    /// Filled in by [`ParsedAttribute::resolve_targets`], never by the parser.
    pub targets: Vec<TargetHandle>,
}

fn serialize_entry_name<S: Serializer>(
    entry: &Option<&'static AttributeEntry>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    entry.map(|e| e.name).serialize(serializer)
}

impl Default for ParsedAttribute {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsedAttribute {
    pub fn new() -> Self {
        Self {
            display: None,
            target_specification: None,
            target_type: None,
            target_id: None,
            attr_entry: None,
            value: None,
            display_device_specification: None,
            display_device_mask: DisplayDeviceMask::INVALID,
            flags: ParserFlags::default(),
            targets: Vec::new(),
        }
    }

    /// Resets every field; the `targets` buffer keeps its capacity.
    pub fn clean(&mut self) {
        self.display = None;
        self.target_specification = None;
        self.display_device_specification = None;
        self.target_type = None;
        self.target_id = None;
        self.attr_entry = None;
        self.value = None;
        self.display_device_mask = DisplayDeviceMask::INVALID;
        self.flags = ParserFlags::default();
        self.targets.clear();
    }

    pub fn value(&self) -> Option<&AttrValue> {
        self.value.as_ref()
    }

    /// Stores `value`, which must match the resolved attribute's value type.
    pub fn set_value(&mut self, value: AttrValue) -> Result<(), RecordError> {
        let entry = self.attr_entry.ok_or(RecordError::NoAttribute)?;
        if !value.matches(entry.value_type) {
            return Err(RecordError::ValueTypeMismatch {
                name: entry.name,
                expected: entry.value_type,
                found: value.value_type(),
            });
        }
        self.value = Some(value);
        self.flags.has_value = true;
        Ok(())
    }

    /// Binds the catalog entry, dropping any value that no longer fits it.
    pub fn set_attribute(&mut self, entry: &'static AttributeEntry) {
        self.attr_entry = Some(entry);
        if self.value.as_ref().is_some_and(|v| !v.matches(entry.value_type)) {
            self.value = None;
            self.flags.has_value = false;
        }
    }

    /// Records a typed target.
    pub fn set_target(&mut self, target_type: TargetType, target_id: u32) {
        self.target_type = Some(target_type);
        self.target_id = Some(target_id);
        self.flags.has_target = true;
    }

    pub fn attribute_name(&self) -> Option<&'static str> {
        self.attr_entry.map(|e| e.name)
    }

    /// Uses `display` when the string named no X display. If that display
    /// carries a `.screen` and no target was given, the screen becomes the
    /// target.
    pub fn assign_default_display(&mut self, display: &str) {
        if self.display.is_some() {
            return;
        }
        self.display = Some(display.to_string());
        if self.flags.has_target || self.target_specification.is_some() {
            return;
        }
        if let Some(screen) = display_screen(display) {
            self.set_target(TargetType::XScreen, screen);
        }
    }

    /// Short description of where this attribute applies.
    pub fn target_description(&self) -> String {
        if let Some(spec) = &self.target_specification {
            return format!("[{}]", spec);
        }
        match (self.target_type, self.target_id) {
            (Some(t), Some(id)) => format!("[{}:{}]", t, id),
            _ => "all targets".to_string(),
        }
    }

    /// Asks `resolver` for the concrete targets of this record.
    pub fn resolve_targets(&mut self, resolver: &dyn TargetResolver) -> Result<(), ResolveError> {
        let targets = resolver.resolve(self)?;
        if targets.is_empty() {
            return Err(ResolveError::NoTargets(self.target_description()));
        }
        tracing::debug!(
            attribute = self.attribute_name(),
            count = targets.len(),
            "resolved targets"
        );
        self.targets = targets;
        Ok(())
    }
}

/// Owned, insertion-ordered collection of parsed records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedAttributeList {
    items: Vec<ParsedAttribute>,
}

impl ParsedAttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `attr` after every record already in the list.
    pub fn add(&mut self, attr: ParsedAttribute) {
        self.items.push(attr);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParsedAttribute> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ParsedAttribute> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ParsedAttributeList {
    type Item = &'a ParsedAttribute;
    type IntoIter = std::slice::Iter<'a, ParsedAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ParsedAttributeList {
    type Item = ParsedAttribute;
    type IntoIter = std::vec::IntoIter<ParsedAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Catalog;

    fn entry(name: &str) -> &'static AttributeEntry {
        Catalog::builtin().by_name(name).unwrap()
    }

    struct FixedResolver(Vec<TargetHandle>);

    impl TargetResolver for FixedResolver {
        fn resolve(&self, _attr: &ParsedAttribute) -> Result<Vec<TargetHandle>, ResolveError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_new_record_is_empty() {
        let p = ParsedAttribute::new();
        assert!(p.display.is_none());
        assert!(p.value().is_none());
        assert!(p.display_device_mask.is_invalid());
        assert_eq!(p.flags, ParserFlags::default());
    }

    #[test]
    fn test_set_value_enforces_type() {
        let mut p = ParsedAttribute::new();
        assert_eq!(
            p.set_value(AttrValue::Integer(1)),
            Err(RecordError::NoAttribute)
        );

        p.set_attribute(entry("Brightness"));
        assert!(matches!(
            p.set_value(AttrValue::Float(1.0)),
            Err(RecordError::ValueTypeMismatch { .. })
        ));
        assert!(!p.flags.has_value);

        p.set_value(AttrValue::Integer(50)).unwrap();
        assert!(p.flags.has_value);
        assert_eq!(p.value(), Some(&AttrValue::Integer(50)));
    }

    #[test]
    fn test_rebinding_attribute_drops_mismatched_value() {
        let mut p = ParsedAttribute::new();
        p.set_attribute(entry("Brightness"));
        p.set_value(AttrValue::Integer(5)).unwrap();
        p.set_attribute(entry("RedGamma"));
        assert!(p.value().is_none());
        assert!(!p.flags.has_value);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut p = ParsedAttribute::new();
        p.display = Some("host:0".into());
        p.set_attribute(entry("Brightness"));
        p.set_value(AttrValue::Integer(5)).unwrap();
        p.set_target(TargetType::Gpu, 1);

        p.clean();
        assert_eq!(p, ParsedAttribute::new());
        p.clean();
        assert_eq!(p, ParsedAttribute::new());
    }

    #[test]
    fn test_default_display_sets_screen_target() {
        let mut p = ParsedAttribute::new();
        p.assign_default_display("host:0.2");
        assert_eq!(p.display.as_deref(), Some("host:0.2"));
        assert_eq!(p.target_type, Some(TargetType::XScreen));
        assert_eq!(p.target_id, Some(2));
        assert!(p.flags.has_target);
    }

    #[test]
    fn test_default_display_does_not_override() {
        let mut p = ParsedAttribute::new();
        p.display = Some(":1".into());
        p.assign_default_display("host:0.2");
        assert_eq!(p.display.as_deref(), Some(":1"));
        assert!(!p.flags.has_target);

        let mut p = ParsedAttribute::new();
        p.set_target(TargetType::Gpu, 0);
        p.assign_default_display("host:0.2");
        assert_eq!(p.display.as_deref(), Some("host:0.2"));
        assert_eq!(p.target_type, Some(TargetType::Gpu));
    }

    #[test]
    fn test_resolve_targets_rejects_empty_result() {
        let mut p = ParsedAttribute::new();
        p.target_specification = Some("GPU-9".into());
        let err = p.resolve_targets(&FixedResolver(vec![])).unwrap_err();
        assert_eq!(err, ResolveError::NoTargets("[GPU-9]".into()));

        let handle = TargetHandle {
            target_type: TargetType::Gpu,
            target_id: 9,
        };
        p.resolve_targets(&FixedResolver(vec![handle])).unwrap();
        assert_eq!(p.targets, vec![handle]);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut list = ParsedAttributeList::new();
        for name in ["Brightness", "Contrast", "FSAA"] {
            let mut p = ParsedAttribute::new();
            p.set_attribute(entry(name));
            list.add(p);
        }
        let names: Vec<_> = list.iter().filter_map(|p| p.attribute_name()).collect();
        assert_eq!(names, vec!["Brightness", "Contrast", "FSAA"]);
        assert_eq!(list.len(), 3);
        list.clear();
        assert!(list.is_empty());
    }
}
