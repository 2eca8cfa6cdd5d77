//! YAML document loading.
//!
//! `serde_yaml::Value` rejects integers outside the 64-bit range even though
//! they are valid YAML. Documents are loaded through [`LenientValue`], which
//! builds the same `Value` tree but widens such integers to floats.

use std::fmt;

use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Number, Value};

/// Parses a single YAML document.
///
/// # Errors
///
/// Returns the parser error if `text` is not valid YAML.
pub fn parse_document(text: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str::<LenientValue>(text).map(|doc| doc.0)
}

/// A `Value` whose deserializer accepts 128-bit integers.
struct LenientValue(Value);

impl<'de> Deserialize<'de> for LenientValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientVisitor).map(LenientValue)
    }
}

struct LenientVisitor;

fn wide_number(value: f64) -> Value {
    Value::Number(Number::from(value))
}

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| wide_number(v as f64), |n| Value::Number(n.into())))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Ok(u64::try_from(v).map_or_else(|_| wide_number(v as f64), |n| Value::Number(n.into())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(wide_number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        LenientValue::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LenientValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        while let Some((LenientValue(key), LenientValue(value))) = map.next_entry()? {
            if mapping.contains_key(&key) {
                let shown = key
                    .as_str()
                    .map_or_else(|| format!("{key:?}"), str::to_string);
                return Err(de::Error::custom(format!(
                    "duplicate entry with key \"{shown}\""
                )));
            }
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, contents) = data.variant::<String>()?;
        let LenientValue(value) = contents.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        parse_document(text).expect("valid yaml")
    }

    #[test]
    fn integer_beyond_u64_becomes_float() {
        let doc = parse("version: 99999999999999999999999999\n");
        let version = doc.get("version").and_then(Value::as_f64).expect("number");
        assert!(version > 9.0e25);
    }

    #[test]
    fn integer_below_i64_becomes_float() {
        let doc = parse("n: -99999999999999999999999999\n");
        let n = doc.get("n").and_then(Value::as_f64).expect("number");
        assert!(n < -9.0e25);
    }

    #[test]
    fn ordinary_values_match_serde_yaml() {
        let text = "name: x\nversion: 1\nratio: 0.5\nflag: true\nnothing: ~\nlist: [a, 2]\nnested: {k: v}\n";
        let expected: Value = serde_yaml::from_str(text).expect("valid yaml");
        assert_eq!(parse(text), expected);
    }

    #[test]
    fn tagged_values_are_kept() {
        let doc = parse("key: !custom value\n");
        match doc.get("key") {
            Some(Value::Tagged(tagged)) => {
                assert_eq!(tagged.value, Value::String("value".to_string()));
            }
            other => panic!("expected tagged value, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = parse_document("name: a\nname: b\n").unwrap_err();
        assert!(err.to_string().contains("duplicate entry"), "{err}");
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(parse_document("name: [unclosed\n").is_err());
    }
}
