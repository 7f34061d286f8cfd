//! The closed set of values a Parse object field can hold.
//!
//! [`ParseValue`] is the only representation the object layer stores, so a
//! field can never hold something the wire encoder cannot write. The invalid
//! states the enum can still express are a non-finite float and a map keyed
//! by `__type`, both of which [`ParseValue::is_valid`] rejects.
//!
//! Values arriving from untyped caller code go through [`ParseValue::from_any`],
//! the single list of Rust types accepted at the dynamic boundary.
//! [`is_valid_type`] is defined in terms of it, and both are kept in step
//! with [`ParseValue::to_json`] / [`ParseValue::from_json`].

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::constants::{fields, type_tags};
use crate::date::{decode_date, encode_date};
use crate::error::{TypeError, TypeResult};
use crate::geo::GeoPoint;
use crate::reference::{ParseFile, ParseRelation, Pointer};

/// The protocol's explicit null. Storing it in a field is different from
/// leaving the field unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// A JSON number, kept as an integer when it has no fractional part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Integers are always finite; floats must not be NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(f) => f.is_finite(),
        }
    }

    /// The value as a float; integers are converted.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// The integer value, if this number is integral.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            Self::Float(_) => None,
        }
    }
}

/// A value the backend protocol can transport.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Bytes(Vec<u8>),
    /// JSON array or list.
    Array(Vec<ParseValue>),
    /// JSON object or generic string-keyed map.
    Map(BTreeMap<String, ParseValue>),
    /// Nested remote object, carried by reference.
    Pointer(Pointer),
    File(ParseFile),
    Relation(ParseRelation),
    GeoPoint(GeoPoint),
}

impl ParseValue {
    /// Returns `false` if the value cannot survive a trip through REST JSON:
    /// a non-finite float, or a map with a `__type` key (which the decoder
    /// reads as a typed value), anywhere in the value.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Number(n) => n.is_finite(),
            Self::Array(items) => items.iter().all(Self::is_valid),
            Self::Map(entries) => {
                !entries.contains_key(fields::TYPE) && entries.values().all(Self::is_valid)
            }
            _ => true,
        }
    }

    /// Short lowercase name of the value's category.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Pointer(_) => "pointer",
            Self::File(_) => "file",
            Self::Relation(_) => "relation",
            Self::GeoPoint(_) => "geopoint",
        }
    }

    /// True for the explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an integral number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Any number as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The timestamp, if this is a date.
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// The raw bytes, if this is a byte array.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[ParseValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ParseValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The reference, if this is a pointer.
    pub fn as_pointer(&self) -> Option<&Pointer> {
        match self {
            Self::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// The file reference, if this is a file.
    pub fn as_file(&self) -> Option<&ParseFile> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    /// The relation, if this is one.
    pub fn as_relation(&self) -> Option<&ParseRelation> {
        match self {
            Self::Relation(r) => Some(r),
            _ => None,
        }
    }

    /// The location, if this is a geopoint.
    pub fn as_geo_point(&self) -> Option<&GeoPoint> {
        match self {
            Self::GeoPoint(g) => Some(g),
            _ => None,
        }
    }

    /// Convert an arbitrary Rust value into a `ParseValue`.
    ///
    /// Returns `None` when the value's type is not one the protocol can
    /// carry, or when it is a supported type holding an invalid value
    /// (a NaN float, an integer beyond `i64`, a map keyed by `__type`).
    /// Lists and string-keyed maps are accepted for every supported element
    /// type.
    pub fn from_any(value: &dyn Any) -> Option<ParseValue> {
        macro_rules! widen {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<$t>() {
                    return Some(Self::Number(Number::Integer(i64::from(*v))));
                }
            )*};
        }
        macro_rules! narrow {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<$t>() {
                    return i64::try_from(*v).ok().map(|i| Self::Number(Number::Integer(i)));
                }
            )*};
        }
        // Lists and string-keyed maps of any supported element type. Each
        // element goes back through this function.
        macro_rules! containers {
            ($($t:ty),*) => {$(
                if let Some(v) = value.downcast_ref::<Vec<$t>>() {
                    return v
                        .iter()
                        .map(|item| Self::from_any(item))
                        .collect::<Option<Vec<_>>>()
                        .map(Self::Array);
                }
                if let Some(v) = value.downcast_ref::<BTreeMap<String, $t>>() {
                    return v
                        .iter()
                        .map(|(k, item)| Some((k.clone(), Self::from_any(item)?)))
                        .collect::<Option<BTreeMap<_, _>>>()
                        .map(Self::Map)
                        .filter(Self::is_valid);
                }
                if let Some(v) = value.downcast_ref::<HashMap<String, $t>>() {
                    return v
                        .iter()
                        .map(|(k, item)| Some((k.clone(), Self::from_any(item)?)))
                        .collect::<Option<BTreeMap<_, _>>>()
                        .map(Self::Map)
                        .filter(Self::is_valid);
                }
            )*};
        }

        if let Some(v) = value.downcast_ref::<ParseValue>() {
            return v.is_valid().then(|| v.clone());
        }
        if value.is::<Null>() {
            return Some(Self::Null);
        }
        if let Some(v) = value.downcast_ref::<bool>() {
            return Some(Self::Bool(*v));
        }
        widen!(i8, i16, i32, i64, u8, u16, u32);
        narrow!(isize, usize, u64, i128, u128);
        if let Some(v) = value.downcast_ref::<f64>() {
            return v.is_finite().then_some(Self::Number(Number::Float(*v)));
        }
        if let Some(v) = value.downcast_ref::<f32>() {
            return v.is_finite().then_some(Self::Number(Number::Float(f64::from(*v))));
        }
        if let Some(v) = value.downcast_ref::<String>() {
            return Some(Self::String(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<&'static str>() {
            return Some(Self::String((*v).to_owned()));
        }
        if let Some(v) = value.downcast_ref::<DateTime<Utc>>() {
            return Some(Self::Date(*v));
        }
        if let Some(v) = value.downcast_ref::<Vec<u8>>() {
            return Some(Self::Bytes(v.clone()));
        }
        containers!(
            ParseValue,
            Value,
            String,
            &'static str,
            bool,
            i32,
            i64,
            u32,
            u64,
            f32,
            f64,
            DateTime<Utc>,
            Vec<u8>,
            Pointer,
            ParseFile,
            ParseRelation,
            GeoPoint
        );
        if let Some(v) = value.downcast_ref::<Value>() {
            return Self::from_json(v).ok().filter(Self::is_valid);
        }
        if let Some(v) = value.downcast_ref::<Map<String, Value>>() {
            return Self::from_json(&Value::Object(v.clone()))
                .ok()
                .filter(Self::is_valid);
        }
        if let Some(v) = value.downcast_ref::<Pointer>() {
            return Some(Self::Pointer(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<ParseFile>() {
            return Some(Self::File(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<ParseRelation>() {
            return Some(Self::Relation(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<GeoPoint>() {
            return Some(Self::GeoPoint(*v));
        }
        None
    }

    /// Encode as REST JSON.
    ///
    /// Fails only for a non-finite float, which JSON cannot represent.
    pub fn to_json(&self) -> TypeResult<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(Number::Integer(i)) => Value::from(*i),
            Self::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| TypeError::UnsupportedNumber(f.to_string()))?,
            Self::String(s) => Value::String(s.clone()),
            Self::Date(d) => json!({ "__type": type_tags::DATE, "iso": encode_date(d) }),
            Self::Bytes(b) => json!({ "__type": type_tags::BYTES, "base64": BASE64.encode(b) }),
            Self::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Self::to_json)
                    .collect::<TypeResult<Vec<_>>>()?,
            ),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<TypeResult<Map<_, _>>>()?,
            ),
            Self::Pointer(p) => json!({
                "__type": type_tags::POINTER,
                "className": p.class_name,
                "objectId": p.object_id,
            }),
            Self::File(f) => {
                let mut obj = json!({ "__type": type_tags::FILE, "name": f.name });
                if let Some(url) = &f.url {
                    obj["url"] = Value::String(url.clone());
                }
                obj
            }
            Self::Relation(r) => {
                let mut obj = json!({ "__type": type_tags::RELATION });
                if let Some(class) = &r.target_class {
                    obj[fields::CLASS_NAME] = Value::String(class.clone());
                }
                obj
            }
            Self::GeoPoint(g) => json!({
                "__type": type_tags::GEO_POINT,
                "latitude": g.latitude(),
                "longitude": g.longitude(),
            }),
        })
    }

    /// Decode REST JSON.
    ///
    /// Objects carrying a `__type` discriminator become the matching typed
    /// value; other objects become maps.
    pub fn from_json(json: &Value) -> TypeResult<ParseValue> {
        Ok(match json {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(match n.as_i64() {
                Some(i) => Number::Integer(i),
                None => Number::Float(
                    n.as_f64()
                        .ok_or_else(|| TypeError::UnsupportedNumber(n.to_string()))?,
                ),
            }),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(
                items
                    .iter()
                    .map(Self::from_json)
                    .collect::<TypeResult<Vec<_>>>()?,
            ),
            Value::Object(obj) => match obj.get(fields::TYPE).and_then(Value::as_str) {
                Some(tag) => decode_typed(tag, obj)?,
                None => Self::Map(
                    obj.iter()
                        .map(|(k, v)| Ok((k.clone(), Self::from_json(v)?)))
                        .collect::<TypeResult<BTreeMap<_, _>>>()?,
                ),
            },
        })
    }
}

fn decode_typed(tag: &str, obj: &Map<String, Value>) -> TypeResult<ParseValue> {
    Ok(match tag {
        type_tags::DATE => {
            let iso = str_field(obj, "date", "iso")?;
            ParseValue::Date(decode_date(iso).ok_or_else(|| TypeError::InvalidDate(iso.to_owned()))?)
        }
        type_tags::BYTES => {
            let encoded = str_field(obj, "bytes", "base64")?;
            ParseValue::Bytes(
                BASE64
                    .decode(encoded)
                    .map_err(|e| TypeError::InvalidBase64(e.to_string()))?,
            )
        }
        // Included objects arrive as "Object" with their fields inline; only
        // the reference survives at this layer.
        type_tags::POINTER | "Object" => ParseValue::Pointer(Pointer::new(
            str_field(obj, "pointer", fields::CLASS_NAME)?,
            str_field(obj, "pointer", fields::OBJECT_ID)?,
        )),
        type_tags::FILE => ParseValue::File(ParseFile {
            name: str_field(obj, "file", "name")?.to_owned(),
            url: obj.get("url").and_then(Value::as_str).map(str::to_owned),
        }),
        type_tags::GEO_POINT => ParseValue::GeoPoint(GeoPoint::new(
            f64_field(obj, "geopoint", "latitude")?,
            f64_field(obj, "geopoint", "longitude")?,
        )?),
        type_tags::RELATION => ParseValue::Relation(ParseRelation {
            target_class: obj
                .get(fields::CLASS_NAME)
                .and_then(Value::as_str)
                .map(str::to_owned),
        }),
        other => return Err(TypeError::UnknownType(other.to_owned())),
    })
}

fn str_field<'a>(obj: &'a Map<String, Value>, kind: &'static str, key: &str) -> TypeResult<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| TypeError::Malformed {
            kind,
            reason: format!("missing string field `{key}`"),
        })
}

fn f64_field(obj: &Map<String, Value>, kind: &'static str, key: &str) -> TypeResult<f64> {
    obj.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| TypeError::Malformed {
            kind,
            reason: format!("missing numeric field `{key}`"),
        })
}

/// Returns `true` if `value` is of a type the protocol can transport.
///
/// Total and side-effect free: every input yields `true` or `false`.
pub fn is_valid_type(value: &dyn Any) -> bool {
    ParseValue::from_any(value).is_some()
}

impl From<Null> for ParseValue {
    fn from(_: Null) -> Self {
        Self::Null
    }
}

impl From<bool> for ParseValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Number> for ParseValue {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for ParseValue {
    fn from(v: i32) -> Self {
        Self::Number(Number::Integer(i64::from(v)))
    }
}

impl From<i64> for ParseValue {
    fn from(v: i64) -> Self {
        Self::Number(Number::Integer(v))
    }
}

impl From<u32> for ParseValue {
    fn from(v: u32) -> Self {
        Self::Number(Number::Integer(i64::from(v)))
    }
}

impl From<f64> for ParseValue {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<String> for ParseValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for ParseValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<DateTime<Utc>> for ParseValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Vec<u8>> for ParseValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<ParseValue>> for ParseValue {
    fn from(v: Vec<ParseValue>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, ParseValue>> for ParseValue {
    fn from(v: BTreeMap<String, ParseValue>) -> Self {
        Self::Map(v)
    }
}

impl From<Pointer> for ParseValue {
    fn from(v: Pointer) -> Self {
        Self::Pointer(v)
    }
}

impl From<ParseFile> for ParseValue {
    fn from(v: ParseFile) -> Self {
        Self::File(v)
    }
}

impl From<ParseRelation> for ParseValue {
    fn from(v: ParseRelation) -> Self {
        Self::Relation(v)
    }
}

impl From<GeoPoint> for ParseValue {
    fn from(v: GeoPoint) -> Self {
        Self::GeoPoint(v)
    }
}
