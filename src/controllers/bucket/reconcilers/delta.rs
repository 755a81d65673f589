use serde_json::Value;

use crate::resources::buckets::BucketSpec;
use crate::Result;

/// A field path where desired and observed state disagree
#[derive(Clone, Debug, PartialEq)]
pub struct Difference {
    pub path: String,
    pub desired: Value,
    pub observed: Value,
}

/// The set of dotted field paths, rooted at `spec`, where two bucket specs differ.
///
/// Objects are compared key by key and a missing key is the same as `null`. Lists are compared
/// as a whole, so a difference anywhere in a list is reported at the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delta {
    differences: Vec<Difference>,
}

impl Delta {
    pub fn new(desired: &BucketSpec, observed: &BucketSpec) -> Result<Self> {
        let mut differences = Vec::new();
        compare(
            "spec",
            &serde_json::to_value(desired)?,
            &serde_json::to_value(observed)?,
            &mut differences,
        );
        Ok(Self { differences })
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// True if `path` or anything below it differs
    pub fn different_at(&self, path: &str) -> bool {
        self.differences.iter().any(|d| {
            d.path == path
                || d.path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.differences.iter().map(|d| d.path.as_str())
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }
}

fn compare(path: &str, desired: &Value, observed: &Value, out: &mut Vec<Difference>) {
    match (desired, observed) {
        (Value::Object(a), Value::Object(b)) => {
            let mut keys: Vec<&String> = a.keys().chain(b.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                compare(
                    &format!("{path}.{key}"),
                    a.get(key).unwrap_or(&Value::Null),
                    b.get(key).unwrap_or(&Value::Null),
                    out,
                );
            }
        }
        (a, b) if a != b => out.push(Difference {
            path: path.to_string(),
            desired: a.clone(),
            observed: b.clone(),
        }),
        _ => {}
    }
}
