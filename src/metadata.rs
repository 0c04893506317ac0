//! Extraction of seed and model name from host generation metadata
//!
//! The host hands the node the executed prompt graph (and optionally extra
//! PNG-info) as nested JSON. Neither has a fixed shape, so extraction is a
//! depth-first walk that picks the first value whose key matches one of
//! the known key sets.

use serde_json::Value;

/// Keys under which different upstream nodes publish the model name
const MODEL_KEYS: &[&str] = &["model", "model_name", "ckpt_name"];

/// Keys under which upstream samplers publish the seed
const SEED_KEYS: &[&str] = &["seed"];

/// Seed and model name pulled out of the host metadata, if present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationMetadata {
    pub seed: Option<i64>,
    pub model_name: Option<String>,
}

/// Extract generation metadata from the available sources.
///
/// `extra_pnginfo` is consulted before `prompt` for each field. Missing
/// values stay `None` and resolve to `"unknown"` at template time.
pub fn extract(extra_pnginfo: Option<&Value>, prompt: Option<&Value>) -> GenerationMetadata {
    let model = find_in_sources(extra_pnginfo, prompt, MODEL_KEYS);
    let seed = find_in_sources(extra_pnginfo, prompt, SEED_KEYS);

    GenerationMetadata {
        seed: seed.and_then(value_as_seed),
        model_name: model.and_then(value_as_text),
    }
}

fn find_in_sources<'a>(
    first: Option<&'a Value>,
    second: Option<&'a Value>,
    keys: &[&str],
) -> Option<&'a Value> {
    first
        .and_then(|v| find_key(v, keys))
        .or_else(|| second.and_then(|v| find_key(v, keys)))
}

/// Depth-first search for the first value under a matching key
fn find_key<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if keys.contains(&key.as_str()) {
                    return Some(nested);
                }
                if let Some(found) = find_key(nested, keys) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| find_key(item, keys)),
        _ => None,
    }
}

/// Samplers emit seeds as JSON numbers; serialized workflows sometimes as
/// numeric strings. Accept both.
fn value_as_seed(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
