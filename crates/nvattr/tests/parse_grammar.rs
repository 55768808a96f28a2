use nvattr::attributes::{format_value, Catalog};
use nvattr::{
    parse_attribute_string, AttrValue, DisplayDeviceMask, ParseMode, ParseStatus,
    ParsedAttributeList, TargetType,
};
use proptest::prelude::*;

fn status_of(input: &str, mode: ParseMode) -> ParseStatus {
    match parse_attribute_string(input, mode) {
        Ok(_) => ParseStatus::Success,
        Err(e) => e.status,
    }
}

#[test]
fn test_reference_strings() {
    assert_eq!(
        status_of("gpu:0/ x", ParseMode::Assignment),
        ParseStatus::UnknownAttrName
    );
    assert_eq!(
        status_of("/Brightness=", ParseMode::Assignment),
        ParseStatus::NoValue
    );
    assert_eq!(
        status_of("/Brightness=50extra", ParseMode::Assignment),
        ParseStatus::TrailingGarbage
    );

    let p = parse_attribute_string("/Brightness=50", ParseMode::Assignment).unwrap();
    assert_eq!(p.value(), Some(&AttrValue::Integer(50)));
    assert!(p.display.is_none());
    assert!(p.target_specification.is_none());
    assert!(p.target_type.is_none());
    assert!(!p.flags.has_x_display && !p.flags.has_target);
}

#[test]
fn test_screen_and_bracket_target_conflict() {
    let err = parse_attribute_string("localhost:1.2[gpu:0]/Foo=1", ParseMode::Assignment)
        .unwrap_err();
    assert_eq!(err.status, ParseStatus::TargetSpecTrailingGarbage);
}

#[test]
fn test_wildcard_mask_round_trip_after_expansion() {
    let mask: DisplayDeviceMask = "CRT-0,CRT-3,DFP".parse().unwrap();
    let reparsed: DisplayDeviceMask = mask.to_string().parse().unwrap();
    assert_eq!(reparsed.expand_wildcards(), mask.expand_wildcards());
    assert_eq!(mask.expand_wildcards().bits(), 0x9 | 0xff_0000);
}

#[test]
fn test_full_address() {
    let p = parse_attribute_string(
        "  myhost:0.1/AssociatedDisplays[DFP-0]=CRT-1,TV  ",
        ParseMode::Assignment,
    )
    .unwrap();
    assert_eq!(p.display.as_deref(), Some("myhost:0.1"));
    assert_eq!(p.target_type, Some(TargetType::XScreen));
    assert_eq!(p.target_id, Some(1));
    assert_eq!(p.display_device_mask.bits(), 0x1_0000);
    assert_eq!(p.value(), Some(&AttrValue::Integer(0x2 | 0xff00)));

    let entry = p.attr_entry.unwrap();
    assert_eq!(format_value(entry, p.value().unwrap()), "CRT-1,TV-0,TV-1,TV-2,TV-3,TV-4,TV-5,TV-6,TV-7");
}

#[test]
fn test_records_accumulate_in_order() {
    let mut list = ParsedAttributeList::new();
    for input in ["/Brightness=1", "[gpu:0]/GPUTargetFanSpeed=60", ":0/Contrast=2"] {
        list.add(parse_attribute_string(input, ParseMode::Assignment).unwrap());
    }
    let names: Vec<_> = list.iter().filter_map(|p| p.attribute_name()).collect();
    assert_eq!(names, ["Brightness", "GPUTargetFanSpeed", "Contrast"]);
}

#[test]
fn test_record_serializes_to_json() {
    let p = parse_attribute_string("[gpu:1]/Brightness=7", ParseMode::Assignment).unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["attribute"], "Brightness");
    assert_eq!(json["target_id"], 1);
    assert_eq!(json["value"]["type"], "integer");
    assert_eq!(json["value"]["value"], 7);
    assert_eq!(json["flags"]["has_target"], true);
}

#[test]
fn test_every_queryable_attribute_parses_in_query_mode() {
    for entry in Catalog::builtin().query_all() {
        let input = format!("/{}", entry.name);
        let p = parse_attribute_string(&input, ParseMode::Query).unwrap();
        assert_eq!(p.attribute_name(), Some(entry.name));
    }
}

fn catalog_name() -> impl Strategy<Value = &'static str> {
    let names: Vec<&'static str> = Catalog::builtin().iter().map(|e| e.name).collect();
    proptest::sample::select(names)
}

fn device_token() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("CRT"), Just("TV"), Just("DFP"), Just("crt"), Just("dfp")],
        proptest::option::of(0u8..8),
    )
        .prop_map(|(kw, idx)| match idx {
            Some(i) => format!("{}-{}", kw, i),
            None => kw.to_string(),
        })
}

proptest! {
    #[test]
    fn test_prop_name_lookup_ignores_case(name in catalog_name(), flips in proptest::collection::vec(any::<bool>(), 64)) {
        let mangled: String = name
            .chars()
            .zip(flips.iter().cycle())
            .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        let a = parse_attribute_string(&format!("/{}", name), ParseMode::Query).unwrap();
        let b = parse_attribute_string(&format!("/{}", mangled), ParseMode::Query).unwrap();
        prop_assert!(std::ptr::eq(a.attr_entry.unwrap(), b.attr_entry.unwrap()));
    }

    #[test]
    fn test_prop_query_with_value_is_trailing_garbage(name in catalog_name(), value in "[a-z0-9]{1,8}") {
        let input = format!("/{}={}", name, value);
        prop_assert_eq!(status_of(&input, ParseMode::Query), ParseStatus::TrailingGarbage);
    }

    #[test]
    fn test_prop_mask_canonical_form_reparses(tokens in proptest::collection::vec(device_token(), 1..6)) {
        let mask: DisplayDeviceMask = tokens.join(",").parse().unwrap();
        let reparsed: DisplayDeviceMask = mask.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, mask);
    }

    #[test]
    fn test_prop_expand_is_idempotent(bits in any::<u32>()) {
        let once = DisplayDeviceMask(bits).expand_wildcards();
        prop_assert_eq!(once.expand_wildcards(), once);
    }

    #[test]
    fn test_prop_parser_never_panics(input in "\\PC{0,40}") {
        let _ = parse_attribute_string(&input, ParseMode::Assignment);
        let _ = parse_attribute_string(&input, ParseMode::Query);
    }
}
