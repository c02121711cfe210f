//! Decoding of the loosely-typed JSON the CMS returns.
//!
//! WordPress and ACF are inconsistent about shapes: ids come back as numbers
//! or strings, titles as plain strings or `{ "rendered": ... }` objects, and
//! empty ACF fields as `false`. Everything here funnels those variants into
//! the typed model so nothing past the fetch boundary has to care.

use crate::model::{Image, MegaMenuData, MenuItem, SiteSettings};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Field helpers (used through `#[serde(deserialize_with = ...)]`)
// ---------------------------------------------------------------------------

/// Number or string id.
pub(crate) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Int(n) => n.to_string(),
        Raw::Str(s) => s.trim().to_string(),
    })
}

/// Plain string, `{ "rendered": ... }`, or null. HTML entities are decoded.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Plain(String),
        Rendered { rendered: String },
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Plain(s) | Raw::Rendered { rendered: s } => decode_entities(&s),
        Raw::Other(_) => String::new(),
    })
}

/// Like [`text`] but without entity decoding; used for URLs.
pub(crate) fn raw_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Plain(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Plain(s) => s.trim().to_string(),
        Raw::Other(_) => String::new(),
    })
}

/// CSS classes as a string or an array of strings.
pub(crate) fn classes<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::One(s) => s,
        Raw::Many(v) => v
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Raw::Other(_) => String::new(),
    })
}

/// ACF true/false: `true`, `1`, `"1"`, `"true"`. Everything else is false.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Bool(b) => b,
        Raw::Int(n) => n != 0,
        Raw::Str(s) => matches!(s.trim(), "1" | "true" | "yes"),
        Raw::Other(_) => false,
    })
}

/// ACF image: an object with `url`, a bare URL string, or a falsy value.
pub(crate) fn image<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Image>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Object {
            #[serde(default)]
            url: Option<String>,
            #[serde(default)]
            width: Option<u32>,
            #[serde(default)]
            height: Option<u32>,
            #[serde(default, deserialize_with = "text")]
            alt: String,
        },
        Url(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Object {
            url: Some(url),
            width,
            height,
            alt,
        } if !url.trim().is_empty() => Some(Image {
            url: url.trim().to_string(),
            width,
            height,
            alt,
        }),
        Raw::Url(url) if !url.trim().is_empty() => Some(Image {
            url: url.trim().to_string(),
            width: None,
            height: None,
            alt: String::new(),
        }),
        _ => None,
    })
}

/// Optional nested object where ACF sends `false` / `null` / `""` for "unset".
pub(crate) fn acf_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Raw::<T>::deserialize(d)? {
        Raw::Value(v) => Some(v),
        Raw::Other(_) => None,
    })
}

/// A list that may be `false` or `null` instead of `[]`.
pub(crate) fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(acf_object::<D, Vec<T>>(d)?.unwrap_or_default())
}

fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s.trim()).into_owned()
}

// ---------------------------------------------------------------------------
// Response decoders
// ---------------------------------------------------------------------------

/// Decode a menu response: `{ "items": [...] }` or a bare array.
pub fn menu_items(body: &str) -> serde_json::Result<Vec<MenuItem>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Wrapped {
            #[serde(deserialize_with = "list")]
            items: Vec<MenuItem>,
        },
        Bare(Vec<MenuItem>),
    }

    Ok(match serde_json::from_str::<Raw>(body)? {
        Raw::Wrapped { items } | Raw::Bare(items) => items,
    })
}

/// Decode the mega menu list.
pub fn mega_menus(body: &str) -> serde_json::Result<Vec<MegaMenuData>> {
    serde_json::from_str(body)
}

/// Decode site settings.
pub fn site_settings(body: &str) -> serde_json::Result<SiteSettings> {
    serde_json::from_str(body)
}
