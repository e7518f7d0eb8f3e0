use chrono::{FixedOffset, TimeZone, Utc};
use jsontree_core::{Decimal, Guid, JsonError, Number, Object, Uri, Value, WriteOptions, UNDEFINED};

fn compact(value: &Value) -> String {
    value
        .to_text(&WriteOptions::compact())
        .expect("write failed")
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn encode_literals() {
    assert_eq!(compact(&Value::Null), "null");
    assert_eq!(compact(&Value::from(true)), "true");
    assert_eq!(compact(&Value::from(false)), "false");
}

#[test]
fn encode_integers() {
    assert_eq!(compact(&Value::from(0)), "0");
    assert_eq!(compact(&Value::from(-42i8)), "-42");
    assert_eq!(compact(&Value::from(i64::MIN)), "-9223372036854775808");
    assert_eq!(compact(&Value::from(u64::MAX)), "18446744073709551615");
}

#[test]
fn encode_floats_shortest_round_trip() {
    assert_eq!(compact(&Value::from(12.34)), "12.34");
    assert_eq!(compact(&Value::from(0.1f32)), "0.1");
    assert_eq!(compact(&Value::from(-0.5)), "-0.5");
    assert_eq!(compact(&Value::from(1e300)), "1e300");
    assert_eq!(compact(&Value::from(2.5e-8)), "2.5e-8");
}

#[test]
fn encode_decimal_normalized() {
    let d: Decimal = "1.2500".parse().unwrap();
    assert_eq!(compact(&Value::from(d)), "1.25");
}

#[test]
fn encode_non_finite_fails() {
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            Value::from(v).to_text(&WriteOptions::compact()),
            Err(JsonError::InvalidState(_))
        ));
    }
    assert!(Value::Number(Number::F32(f32::NAN))
        .to_text(&WriteOptions::compact())
        .is_err());
}

#[test]
fn encode_undefined_fails() {
    assert!(matches!(
        UNDEFINED.to_text(&WriteOptions::compact()),
        Err(JsonError::InvalidState(_))
    ));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn encode_string_short_escapes() {
    assert_eq!(
        compact(&Value::from("q\"b\\n\nr\rt\tb\u{8}f\u{c}")),
        r#""q\"b\\n\nr\rt\tb\bf\f""#
    );
}

#[test]
fn encode_string_escapes_solidus() {
    assert_eq!(compact(&Value::from("</script>")), r#""<\/script>""#);
}

#[test]
fn encode_string_control_characters_as_unicode() {
    assert_eq!(compact(&Value::from("\u{0}\u{1f}")), r#""\u0000\u001f""#);
}

#[test]
fn encode_string_non_ascii_as_unicode() {
    assert_eq!(compact(&Value::from("café")), r#""caf\u00e9""#);
    assert_eq!(compact(&Value::from("你")), r#""\u4f60""#);
    assert_eq!(compact(&Value::from("😀")), r#""\ud83d\ude00""#);
}

#[test]
fn encode_string_raw_when_escaping_relaxed() {
    let options = WriteOptions::compact()
        .with_escape_non_ascii(false)
        .with_escape_solidus(false);
    assert_eq!(
        Value::from("a/é\u{1}").to_text(&options).unwrap(),
        "\"a/é\\u0001\""
    );
}

#[test]
fn encode_object_keys_are_escaped() {
    let value = Value::object([("a/\"b", 1)]).unwrap();
    assert_eq!(compact(&value), r#"{"a\/\"b":1}"#);
}

// ============================================================================
// Host scalars stored as text
// ============================================================================

#[test]
fn encode_datetime_canonical_text() {
    let utc = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
    assert_eq!(compact(&Value::from(utc)), r#""2024-03-01T12:30:05.000Z""#);

    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let local = offset.with_ymd_and_hms(2024, 3, 1, 7, 30, 5).unwrap();
    assert_eq!(
        compact(&Value::from(local)),
        r#""2024-03-01T07:30:05.000-05:00""#
    );
}

#[test]
fn encode_guid_and_uri() {
    let guid: Guid = "0F8FAD5B-D9CB-469F-A165-70867728950E".parse().unwrap();
    assert_eq!(
        compact(&Value::from(guid)),
        r#""0f8fad5b-d9cb-469f-a165-70867728950e""#
    );
    let uri = Uri::parse("HTTP://example.com/a").unwrap();
    assert_eq!(compact(&Value::from(uri)), r#""http:\/\/example.com\/a""#);
}

#[test]
fn encode_char_as_string() {
    assert_eq!(compact(&Value::from('x')), r#""x""#);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn encode_compact_object() {
    let value = Value::object([
        ("a", Value::from(1)),
        (
            "b",
            Value::array([Value::from(false), Value::Null, Value::from(12.34)]).unwrap(),
        ),
    ])
    .unwrap();
    assert_eq!(compact(&value), r#"{"a":1,"b":[false,null,12.34]}"#);
}

#[test]
fn encode_preserves_insertion_order() {
    let mut obj = Object::new();
    obj.add("zeta", 1).unwrap();
    obj.add("alpha", 2).unwrap();
    obj.add("mid", 3).unwrap();
    assert_eq!(
        compact(&Value::from(obj)),
        r#"{"zeta":1,"alpha":2,"mid":3}"#
    );
}

#[test]
fn encode_empty_containers() {
    assert_eq!(compact(&Value::from(Object::new())), "{}");
    assert_eq!(compact(&Value::array(Vec::<Value>::new()).unwrap()), "[]");
}

#[test]
fn encode_indented() {
    let value = Value::object([
        ("a", Value::from(1)),
        ("b", Value::array([1, 2]).unwrap()),
        ("c", Value::from(Object::new())),
    ])
    .unwrap();
    let expected = "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ],\n  \"c\": {}\n}";
    assert_eq!(value.to_text(&WriteOptions::indented(2)).unwrap(), expected);
}

#[test]
fn encode_indented_scalar_has_no_whitespace() {
    assert_eq!(
        Value::from(5).to_text(&WriteOptions::indented(4)).unwrap(),
        "5"
    );
}

#[test]
fn encode_nested_undefined_is_impossible() {
    let mut obj = Object::new();
    assert!(matches!(
        obj.add("x", UNDEFINED.clone()),
        Err(JsonError::InvalidArgument(_))
    ));
    assert_eq!(compact(&Value::from(obj)), "{}");
}

// ============================================================================
// Streams
// ============================================================================

#[test]
fn save_writes_to_any_writer() {
    let value = Value::array([1, 2]).unwrap();
    let mut out: Vec<u8> = Vec::new();
    value.save(&mut out, &WriteOptions::compact()).unwrap();
    assert_eq!(out, b"[1,2]");
}

#[test]
fn save_writes_nothing_on_failure() {
    let mut out: Vec<u8> = Vec::new();
    assert!(UNDEFINED.save(&mut out, &WriteOptions::compact()).is_err());
    assert!(out.is_empty());
}

#[test]
fn default_options_are_compact() {
    assert_eq!(WriteOptions::default(), WriteOptions::compact());
    assert_eq!(WriteOptions::default().indent, None);
    assert!(WriteOptions::default().escape_solidus);
    assert!(WriteOptions::default().escape_non_ascii);
}
