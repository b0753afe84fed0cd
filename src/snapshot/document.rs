use std::fmt;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::warn;
use super::hash::ContentHash;

/// A text extraction of one monitored document at a point in time.
///
/// Owned by whatever stores snapshots; the engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct Snapshot {
    pub url: String,
    pub title: String,
    pub content: String,
    pub content_hash: ContentHash,
    pub last_modified: Option<DateTime<Utc>>,
    pub extracted_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            url: url.into(),
            title: title.into(),
            content_hash: ContentHash::of(&content),
            content,
            last_modified: None,
            extracted_at: Utc::now(),
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_extracted_at(mut self, extracted_at: DateTime<Utc>) -> Self {
        self.extracted_at = extracted_at;
        self
    }
}

/// Wire form of a snapshot. Content that is missing or not a string becomes
/// the empty string, and the hash is always recomputed from the content.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub extracted_at: DateTime<Utc>,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        let content_hash = ContentHash::of(&raw.content);

        if let Some(stored) = raw.content_hash.as_deref() {
            if stored != content_hash.to_string() {
                warn!(url = %raw.url, stored, computed = %content_hash, "stored content hash does not match content, using computed hash");
            }
        }

        Snapshot {
            url: raw.url,
            title: raw.title,
            content: raw.content,
            content_hash,
            last_modified: raw.last_modified,
            extracted_at: raw.extracted_at,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientTextVisitor)
}

struct LenientTextVisitor;

impl LenientTextVisitor {
    fn malformed<T: fmt::Display>(kind: T) -> String {
        warn!("snapshot content is {}, treating as empty", kind);
        String::new()
    }
}

impl<'de> Visitor<'de> for LenientTextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("document text")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(Self::malformed("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(Self::malformed("null"))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(LenientTextVisitor)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<String, E> {
        Ok(Self::malformed("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<String, E> {
        Ok(Self::malformed("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<String, E> {
        Ok(Self::malformed("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<String, E> {
        Ok(Self::malformed("a number"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Self::malformed("a sequence"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Self::malformed("a map"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_hash() {
        let snapshot = Snapshot::new("https://example.com/p", "Policy", "Ads must comply.");
        assert_eq!(snapshot.content_hash, ContentHash::of("Ads must comply."));
        assert!(snapshot.last_modified.is_none());
    }

    #[test]
    fn test_deserialize_recomputes_hash() {
        let json = r#"{"url": "u", "content": "abc", "content_hash": "00000000000000ff"}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.content_hash, ContentHash::of("abc"));
    }

    #[test]
    fn test_null_content_is_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"url": "u", "content": null}"#).unwrap();
        assert_eq!(snapshot.content, "");
    }

    #[test]
    fn test_non_string_content_is_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"url": "u", "content": {"html": "<p>x</p>"}}"#).unwrap();
        assert_eq!(snapshot.content, "");

        let snapshot: Snapshot = serde_json::from_str(r#"{"url": "u", "content": 42}"#).unwrap();
        assert_eq!(snapshot.content, "");
    }

    #[test]
    fn test_missing_content_is_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"url": "u", "title": "t"}"#).unwrap();
        assert_eq!(snapshot.content, "");
        assert_eq!(snapshot.title, "t");
    }

    #[test]
    fn test_serialize_roundtrip() {
        let snapshot = Snapshot::new("u", "t", "Body text here.");
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
