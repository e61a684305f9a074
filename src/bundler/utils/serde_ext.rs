//! Serde helpers for esbuild's "string or list of strings" options.
//!
//! esbuild accepts `target: "es2020"` as well as `target: ["es2020", "chrome90"]`,
//! and the same holds for `entryPoints`. Both shapes deserialize into a `Vec<String>`.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) if s.is_empty() => Vec::new(),
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Deserializes a string or list of strings. An empty string yields an empty list.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(Vec::from)
}

/// Like [`one_or_many`], but `null`, `""` and `[]` all become `None`.
pub fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(value.map(Vec::from).filter(|items| !items.is_empty()))
}

/// One entry of an `entryPoints` list: a path or an `{ in, out }` pair.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryPoint {
    Path(String),
    Named {
        #[serde(rename = "in")]
        input: String,
        out: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryPoints {
    One(String),
    Many(Vec<EntryPoint>),
    Named(BTreeMap<String, String>),
}

/// Deserializes every `entryPoints` shape esbuild accepts into CLI form.
///
/// Plain paths stay as they are; named entries (`{ "out": "in.js" }` or
/// `[{ "in": "in.js", "out": "out" }]`) become `out=in.js`.
pub fn entry_points<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let named = |out: String, input: String| format!("{out}={input}");
    Ok(match EntryPoints::deserialize(deserializer)? {
        EntryPoints::One(path) => vec![path],
        EntryPoints::Many(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                EntryPoint::Path(path) => path,
                EntryPoint::Named { input, out } => named(out, input),
            })
            .collect(),
        EntryPoints::Named(map) => map
            .into_iter()
            .map(|(out, input)| named(out, input))
            .collect(),
    })
}
