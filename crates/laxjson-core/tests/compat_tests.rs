//! Table-driven compatibility cases and a real-world document.
//!
//! Each case pairs raw JSON text with the generic value it must decode to.
//! The Twitter user fixture exercises nested 64-bit identifiers, escaped
//! slashes and `null` members inside a large object.

use laxjson_core::{decode, parse, Object, Value};

struct Case {
    desc: &'static str,
    raw: &'static str,
    expected: Value,
}

fn object<const N: usize>(members: [(&str, Value); N]) -> Value {
    Value::Object(
        members
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Object>(),
    )
}

fn cases() -> Vec<Case> {
    let foo_bar = || object([("foo", Value::from("bar"))]);
    let number_and_string = || Value::Array(vec![Value::Int(1234), Value::from("foobar")]);
    vec![
        Case {
            desc: "Number",
            raw: "1234",
            expected: Value::Int(1234),
        },
        Case {
            desc: "Number - negative",
            raw: "-1234",
            expected: Value::Int(-1234),
        },
        Case {
            desc: "Number - float",
            raw: "1234.5678",
            expected: Value::Float(1234.5678),
        },
        Case {
            desc: "Number - negative float",
            raw: "-1234.5678",
            expected: Value::Float(-1234.5678),
        },
        Case {
            desc: "String",
            raw: "\"foobar\"",
            expected: Value::from("foobar"),
        },
        Case {
            desc: "String with encoded UTF-8",
            raw: r#""\u6211\u7231\u4f60""#,
            expected: Value::from("我爱你"),
        },
        Case {
            desc: "String with big-U encoded multibyte UTF-8",
            raw: r#""\U0001D11E""#,
            expected: Value::from("𝄞"),
        },
        Case {
            desc: "String with small-U encoded multibyte UTF-8",
            raw: r#""\uD834\uDD1E""#,
            expected: Value::from("𝄞"),
        },
        Case {
            desc: "String with hex encoded multibyte UTF-8",
            raw: r#""\xF0\x9D\x84\x9E""#,
            expected: Value::from("𝄞"),
        },
        Case {
            desc: "String with encoded UTF-8 and backslash",
            raw: r#""10\\10 ~ \u2764""#,
            expected: Value::from("10\\10 ~ ❤"),
        },
        Case {
            desc: "String with backslash",
            raw: r#""10\\10""#,
            expected: Value::from("10\\10"),
        },
        Case {
            desc: "String with backslash and tab",
            raw: "\"10\\\\\t10\"",
            expected: Value::from("10\\\t10"),
        },
        Case {
            desc: "String with backslash and backspace",
            raw: "\"10\\\\\u{8}10\"",
            expected: Value::from("10\\\u{8}10"),
        },
        Case {
            desc: "String with escaped forward slash",
            raw: r#""\\\/""#,
            expected: Value::from("\\/"),
        },
        Case {
            desc: "Object",
            raw: r#"{"foo":"bar"}"#,
            expected: foo_bar(),
        },
        Case {
            desc: "Object with spaces",
            raw: r#"{ "foo" : "bar" }"#,
            expected: foo_bar(),
        },
        Case {
            desc: "Object with UTF-8 value",
            raw: r#"{ "foo" : "\u6211" }"#,
            expected: object([("foo", Value::from("我"))]),
        },
        Case {
            desc: "Object with tabs",
            raw: "{\t\"foo\"\t:\t\"bar\"\t}",
            expected: foo_bar(),
        },
        Case {
            desc: "Object with empty nested object",
            raw: r#"{ "foo": {}}"#,
            expected: object([("foo", Value::Object(Object::new()))]),
        },
        Case {
            desc: "Object with empty nested array",
            raw: r#"{"foo": []}"#,
            expected: object([("foo", Value::Array(vec![]))]),
        },
        Case {
            desc: "Array",
            raw: r#"[1234,"foobar"]"#,
            expected: number_and_string(),
        },
        Case {
            desc: "Array with spaces",
            raw: r#"[ 1234 , "foobar" ]"#,
            expected: number_and_string(),
        },
        Case {
            desc: "Array with tabs",
            raw: "[\t1234\t,\t\"foobar\"\t]",
            expected: number_and_string(),
        },
        Case {
            desc: "Array with multiple tabs",
            raw: "[\t\t\t\t1234,\"foobar\"]",
            expected: number_and_string(),
        },
        Case {
            desc: "Array with no contents",
            raw: "[]",
            expected: Value::Array(vec![]),
        },
        Case {
            desc: "Array with empty object",
            raw: "[{}]",
            expected: Value::Array(vec![Value::Object(Object::new())]),
        },
    ]
}

#[test]
fn compatibility_cases() {
    for case in cases() {
        let mut decoded = Value::Null;
        if let Err(err) = decode(case.raw.as_bytes(), &mut decoded) {
            panic!("Error decoding '{}': {}", case.desc, err);
        }
        assert_eq!(
            decoded, case.expected,
            "Problem decoding '{}' ({:?})",
            case.desc, case.raw
        );
    }
}

// ============================================================================
// Real-world document
// ============================================================================

const TWITTER_USER: &str = include_str!("fixtures/twitter_user.json");

#[test]
fn twitter_user_top_level_fields() {
    let user = parse(TWITTER_USER.as_bytes()).unwrap();
    assert_eq!(user.get("id"), Some(&Value::Int(370773112)));
    assert_eq!(user.get("name").and_then(Value::as_str), Some("fakekurrik"));
    assert_eq!(user.get("utc_offset"), Some(&Value::Int(-28800)));
    assert_eq!(user.get("following"), Some(&Value::Bool(true)));
    assert_eq!(
        user.get("url").and_then(Value::as_str),
        Some("http://blog.roomanna.com")
    );
}

#[test]
fn twitter_user_nested_64_bit_id() {
    let user = parse(TWITTER_USER.as_bytes()).unwrap();
    let status = user.get("status").unwrap();
    assert_eq!(status.get("id"), Some(&Value::Int(291983420479905792)));
    assert_eq!(
        status.get("id_str").and_then(Value::as_str),
        Some("291983420479905792")
    );
    assert!(status.get("in_reply_to_status_id").is_some_and(Value::is_null));
}

#[test]
fn twitter_user_deep_members() {
    let user = parse(TWITTER_USER.as_bytes()).unwrap();
    assert_eq!(
        user.lookup("entities.url.urls.0.indices"),
        Some(&Value::Array(vec![Value::Int(0), Value::Int(24)]))
    );
    assert_eq!(
        user.lookup("entities.description.urls"),
        Some(&Value::Array(vec![]))
    );
    assert_eq!(
        user.lookup("status.entities.urls.0.display_url")
            .and_then(Value::as_str),
        Some("youtube.com/watch?v=BS-FyA\u{2026}")
    );
}

#[test]
fn twitter_user_into_typed_mapping() {
    let mut user = Object::new();
    decode(TWITTER_USER.as_bytes(), &mut user).unwrap();
    assert_eq!(user.len(), 40);
    assert_eq!(user["statuses_count"], Value::Int(576));
}

#[test]
fn twitter_user_matches_serde_json() {
    let ours: serde_json::Value = parse(TWITTER_USER.as_bytes()).unwrap().into();
    let reference: serde_json::Value = serde_json::from_str(TWITTER_USER).unwrap();
    assert_eq!(ours, reference);
}
