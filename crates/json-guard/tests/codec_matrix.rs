//! Encoder/decoder behavior: byte budget, validation hook, raw messages and
//! output framing.

use std::io;

use json_guard::{
    marshal, marshal_indent, marshal_stream, unmarshal, unmarshal_stream, validate, BoxError,
    Decoder, Encoder, Error, JsonObject, Number, RawMessage, Validator, MAX_READER_SIZE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Inner {
    #[serde(rename = "M")]
    m: RawMessage,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Outer {
    #[serde(rename = "F")]
    f: Inner,
}

impl Validator for Outer {}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NonNegative {
    #[serde(rename = "X")]
    x: i64,
    #[serde(rename = "Label", default)]
    label: String,
}

impl Validator for NonNegative {
    fn validate(&self) -> Result<(), BoxError> {
        if self.x < 0 {
            return Err(Box::new(NegativeX(self.x)));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("X must be non-negative (got {0})")]
struct NegativeX(i64);

// ---------------------------------------------------------------------------
// Raw messages
// ---------------------------------------------------------------------------

#[test]
fn nested_nil_raw_message_marshals_as_null() {
    let out = marshal(&Outer::default()).expect("marshal must succeed");
    assert_eq!(String::from_utf8(out).unwrap(), "{\"F\":{\"M\":null}}\n");
}

#[test]
fn raw_message_round_trips_verbatim() {
    let input = br#"{"F":{"M":{"z": 1,   "a": [true]}}}"#;
    let outer: Outer = unmarshal(input).expect("decode must succeed");
    assert_eq!(
        outer.f.m.as_bytes().expect("message must be set"),
        br#"{"z": 1,   "a": [true]}"#
    );
    let out = marshal(&outer).expect("marshal must succeed");
    assert_eq!(out, b"{\"F\":{\"M\":{\"z\": 1,   \"a\": [true]}}}\n");
}

// ---------------------------------------------------------------------------
// Validation hook
// ---------------------------------------------------------------------------

#[test]
fn decode_validation_failure_is_the_hook_error() {
    let err = unmarshal::<NonNegative>(br#"{"X":-1}"#).expect_err("validation must fail");
    let Error::Validation(inner) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    let negative = inner
        .downcast_ref::<NegativeX>()
        .expect("hook error must pass through unchanged");
    assert_eq!(negative.0, -1);
    assert_eq!(err.to_string(), "X must be non-negative (got -1)");
}

#[test]
fn decode_runs_hook_only_after_full_parse() {
    // Malformed input never reaches the hook, even when X is negative.
    let err = unmarshal::<NonNegative>(br#"{"X":-1,"Label":}"#).expect_err("must fail");
    assert!(err.is_invalid_json(), "{err:?}");
}

#[test]
fn encode_validation_failure_writes_nothing() {
    let mut out = Vec::new();
    let value = NonNegative {
        x: -5,
        label: "neg".into(),
    };
    let err = marshal_stream(&mut out, &value).expect_err("validation must fail");
    assert!(err.as_validation().is_some());
    assert!(out.is_empty());
}

#[test]
fn passing_values_flow_through_both_directions() {
    let value = NonNegative {
        x: 9,
        label: "ok".into(),
    };
    let bytes = marshal(&value).expect("marshal must succeed");
    assert_eq!(bytes, b"{\"X\":9,\"Label\":\"ok\"}\n");
    let back: NonNegative = unmarshal(&bytes).expect("decode must succeed");
    assert_eq!(back.x, 9);
    assert_eq!(back.label, "ok");
}

// ---------------------------------------------------------------------------
// Byte budget
// ---------------------------------------------------------------------------

#[test]
fn default_budget_is_twenty_million_bytes() {
    assert_eq!(MAX_READER_SIZE, 20_000_000);
    assert_eq!(Decoder::new(io::empty()).limit(), MAX_READER_SIZE);
}

#[test]
fn endless_whitespace_hits_the_default_budget() {
    let err = unmarshal_stream::<JsonObject, _>(io::repeat(b' ')).expect_err("must fail");
    assert!(
        matches!(err, Error::TooLarge { limit } if limit == MAX_READER_SIZE),
        "{err:?}"
    );
}

#[test]
fn truncated_broken_prefix_reports_too_large() {
    let input = br#"{"a": ]]]] this is not json at all"#;
    for limit in 1..8 {
        let mut dec = Decoder::with_limit(&input[..], limit);
        let err = dec.decode::<JsonObject>().expect_err("must fail");
        assert!(err.is_too_large(), "limit {limit}: {err:?}");
    }
}

#[test]
fn broken_input_inside_budget_is_invalid_json() {
    let input = br#"{"a": ]]]]"#;
    let mut dec = Decoder::with_limit(&input[..], 64);
    let err = dec.decode::<JsonObject>().expect_err("must fail");
    assert!(err.is_invalid_json(), "{err:?}");
    assert!(dec.remaining() > 0);
}

#[test]
fn value_fitting_exactly_in_budget_decodes() {
    let input = br#"{"a":1}"#;
    let mut dec = Decoder::with_limit(&input[..], input.len() as u64);
    let obj = dec.decode::<JsonObject>().expect("decode must succeed");
    assert_eq!(obj.len(), 1);
}

#[test]
fn budget_spans_successive_decodes() {
    let input = b"{\"a\":1} {\"b\":2} {\"c\":3}";
    let mut dec = Decoder::with_limit(&input[..], 16);
    dec.decode::<JsonObject>().expect("first value fits");
    dec.decode::<JsonObject>().expect("second value fits");
    let err = dec.decode::<JsonObject>().expect_err("third is past the budget");
    assert!(err.is_too_large(), "{err:?}");
}

// ---------------------------------------------------------------------------
// Streams, validate, indentation
// ---------------------------------------------------------------------------

#[test]
fn encoder_emits_newline_framed_values() {
    let mut enc = Encoder::new(Vec::new());
    enc.encode(&Number::new("1.50").expect("valid number"))
        .expect("encode must succeed");
    enc.encode(&RawMessage::nil()).expect("encode must succeed");
    assert_eq!(enc.into_inner(), b"1.50\nnull\n");
}

#[test]
fn validate_checks_well_formedness() {
    assert!(validate(&br#"{"deep": {"er": [1, 2, {"est": null}]}}"#[..]).is_ok());
    let err = validate(&br#"{"deep": }"#[..]).expect_err("must fail");
    assert!(err.is_invalid_json());
}

#[test]
fn indent_ignores_validator() {
    let value = NonNegative {
        x: -1,
        label: String::new(),
    };
    let out = marshal_indent(&value, "", "    ").expect("indent skips validation");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n    \"X\": -1,\n    \"Label\": \"\"\n}"
    );
}
