/// Property-Based Tests for the Value Model
///
/// Uses the `proptest` crate to generate random value trees and verify that
/// `parse(to_text(value)) == value` holds for compact and indented output,
/// along with a handful of container and coercion invariants.
///
/// Strategies generate:
/// - Arbitrary Unicode strings, including control characters and quotes
/// - Integers across the whole `i64` and `u64` ranges
/// - Finite doubles, including subnormals and very large magnitudes
/// - Singles within the range their shortest text reads back exactly
/// - Decimals across the full mantissa and scale range
/// - Booleans and null
/// - Objects with unique keys and arrays, nested up to 4 levels deep
///
/// Text equality is checked after one cycle only: a double written as
/// `1e-7` reads back as the exact decimal `0.0000001`, which then writes
/// in positional form.
use jsontree_core::{parse, Decimal, JsonError, Object, Value, WriteOptions, UNDEFINED};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies for generating values
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,15}").unwrap(),
        1 => any::<String>(),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        any::<String>(),
        Just(String::new()),
        Just("\"quoted\" \\ back/slash".to_string()),
        Just("\u{0}\u{1f}\u{7f}\n\t".to_string()),
        Just("caf\u{00e9} \u{4f60}\u{597d} \u{1f600}".to_string()),
    ]
}

fn arb_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e15f64..1e15f64,
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        Just(f64::MIN_POSITIVE),
        Just(f64::MAX),
        Just(-0.0),
    ]
}

fn arb_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1e9f32..1e9f32,
        -1.0f32..1.0f32,
        Just(f32::EPSILON),
        Just(-0.0f32),
    ]
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    let limit = Decimal::MAX.mantissa();
    (-limit..=limit, 0u32..=28)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale).unwrap())
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        arb_f64().prop_map(Value::from),
        arb_f32().prop_map(Value::from),
        arb_decimal().prop_map(Value::from),
        arb_string().prop_map(Value::from),
    ]
}

fn arb_value_inner(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        return arb_scalar().boxed();
    }
    let element = arb_value_inner(depth - 1);
    prop_oneof![
        4 => arb_scalar(),
        1 => prop::collection::vec(element.clone(), 0..6)
            .prop_map(|items| Value::array(items).unwrap()),
        1 => prop::collection::btree_map(arb_key(), element, 0..6)
            .prop_map(|members: BTreeMap<String, Value>| Value::object(members).unwrap()),
    ]
    .boxed()
}

fn arb_value() -> BoxedStrategy<Value> {
    arb_value_inner(4)
}

// ============================================================================
// Roundtrip properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn compact_roundtrip(value in arb_value()) {
        let text = value.to_text(&WriteOptions::compact()).unwrap();
        let reread = parse(&text).unwrap();
        prop_assert_eq!(&reread, &value);

        let again = reread.to_text(&WriteOptions::compact()).unwrap();
        let rewritten = parse(&again)
            .unwrap()
            .to_text(&WriteOptions::compact())
            .unwrap();
        prop_assert_eq!(rewritten, again);
    }

    #[test]
    fn indented_roundtrip(value in arb_value(), width in 0usize..6) {
        let text = value.to_text(&WriteOptions::indented(width)).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn unescaped_output_roundtrips(value in arb_value()) {
        let options = WriteOptions::compact()
            .with_escape_solidus(false)
            .with_escape_non_ascii(false);
        let text = value.to_text(&options).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn default_output_is_ascii(value in arb_value()) {
        let text = value.to_text(&WriteOptions::compact()).unwrap();
        prop_assert!(text.is_ascii());
    }

    #[test]
    fn save_matches_to_text(value in arb_value()) {
        let mut buffer: Vec<u8> = Vec::new();
        value.save(&mut buffer, &WriteOptions::indented(2)).unwrap();
        prop_assert_eq!(
            String::from_utf8(buffer).unwrap(),
            value.to_text(&WriteOptions::indented(2)).unwrap()
        );
    }
}

// ============================================================================
// Container and coercion properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn duplicate_add_leaves_object_unchanged(
        members in prop::collection::btree_map(arb_key(), arb_scalar(), 1..8),
        replacement in arb_scalar(),
    ) {
        let mut object = Object::from_pairs(members.clone()).unwrap();
        let before = object.clone();
        let key = members.keys().next().unwrap().clone();

        let result = object.add(key.clone(), replacement);
        prop_assert!(matches!(
            result,
            Err(JsonError::DuplicateKey(k)) if k == key
        ));
        prop_assert_eq!(object, before);
    }

    #[test]
    fn insertion_order_is_preserved(keys in prop::collection::btree_set(arb_key(), 0..10)) {
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.reverse();
        let object = Object::from_pairs(keys.iter().map(|k| (k.clone(), Value::Null))).unwrap();
        let text = Value::from(object)
            .to_text(&WriteOptions::compact())
            .unwrap();
        let reread = parse(&text).unwrap();
        let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(reread.keys().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn undefined_chains_stay_undefined(path in prop::collection::vec(arb_key(), 0..6)) {
        let found = UNDEFINED.value_or_default(&path).unwrap();
        prop_assert!(std::ptr::eq(found, &UNDEFINED));
        prop_assert!(found.to_text(&WriteOptions::compact()).is_err());
    }

    #[test]
    fn i32_accepts_exactly_its_range(n in any::<i64>()) {
        let result = Value::from(n).read_as::<i32>();
        if i32::try_from(n).is_ok() {
            prop_assert_eq!(result.unwrap() as i64, n);
        } else {
            prop_assert!(matches!(result, Err(JsonError::Overflow { .. })), "{}", n);
        }
    }

    #[test]
    fn canonical_integer_text_reads_back(n in any::<i64>()) {
        let text = Value::from(n).read_as::<String>().unwrap();
        prop_assert_eq!(&text, &n.to_string());
        prop_assert_eq!(Value::from(text).read_as::<i64>().unwrap(), n);
    }

    #[test]
    fn doubles_survive_text(f in arb_f64()) {
        let text = Value::from(f).to_text(&WriteOptions::compact()).unwrap();
        prop_assert_eq!(parse(&text).unwrap().read_as::<f64>().unwrap(), f);
    }

    #[test]
    fn singles_survive_text(f in arb_f32()) {
        let text = Value::from(f).to_text(&WriteOptions::compact()).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), Value::from(f));
    }

    #[test]
    fn decimals_survive_text(d in arb_decimal()) {
        let text = Value::from(d).to_text(&WriteOptions::compact()).unwrap();
        let reread = parse(&text).unwrap();
        prop_assert_eq!(&reread, &Value::from(d));
        prop_assert_eq!(reread.read_as::<Decimal>().unwrap(), d);
    }
}
