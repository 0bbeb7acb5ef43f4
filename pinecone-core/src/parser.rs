//! Turns raw response bodies into typed responses.
//!
//! Two shapes matter: the `matches` array of a query and the `vectors` map
//! (keyed by id) of a fetch. Field paths in errors use `a.b[i].c` notation.
//! Bodies are parsed from the bytes the transport buffered; a body that is not
//! UTF-8 JSON fails at `$`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::{PineconeError, PineconeResult};
use crate::models::{FetchResponse, IndexStats, NamespaceStats, QueryResponse, UpsertResponse};
use crate::vector::Values;

fn parse_root(body: &[u8]) -> PineconeResult<Value> {
    serde_json::from_slice(body).map_err(|e| PineconeError::malformed("$", format!("invalid JSON: {}", e)))
}

/// Parses a query response. A body without a `matches` array (for instance a
/// vendor error envelope) yields no matches rather than an error.
pub fn parse_query_response(body: &[u8]) -> PineconeResult<Vec<QueryResponse>> {
    let root = parse_root(body)?;
    let matches = match root.get("matches").and_then(Value::as_array) {
        Some(matches) => matches,
        None => {
            debug!("Query response carries no matches array");
            return Ok(Vec::new());
        }
    };

    matches
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_match(entry, &format!("matches[{}]", i)))
        .collect()
}

fn parse_match(entry: &Value, path: &str) -> PineconeResult<QueryResponse> {
    let id_path = format!("{}.id", path);
    let raw_id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| PineconeError::malformed(&id_path, "expected a string"))?;
    let id = Uuid::parse_str(raw_id)
        .map_err(|e| PineconeError::malformed(&id_path, format!("'{}' is not a UUID: {}", raw_id, e)))?;

    let score = entry
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| PineconeError::malformed(format!("{}.score", path), "expected a number"))?;

    Ok(QueryResponse {
        id,
        score,
        values: parse_values(entry.get("values"), &format!("{}.values", path))?,
        metadata: metadata_text(entry.get("metadata")),
    })
}

/// Parses a fetch response and returns the first vector in document order,
/// or `None` when the `vectors` map is empty.
pub fn parse_fetch_response(body: &[u8]) -> PineconeResult<Option<FetchResponse>> {
    let root = parse_root(body)?;
    let namespace = namespace_of(&root)?;
    let vectors = vectors_of(&root)?;
    match vectors.iter().next() {
        Some((key, vector)) => parse_fetched(key, vector, &namespace).map(Some),
        None => Ok(None),
    }
}

/// Parses every vector of a fetch response, in document order.
pub fn parse_fetch_all(body: &[u8]) -> PineconeResult<Vec<FetchResponse>> {
    let root = parse_root(body)?;
    let namespace = namespace_of(&root)?;
    vectors_of(&root)?
        .iter()
        .map(|(key, vector)| parse_fetched(key, vector, &namespace))
        .collect()
}

/// `dimension` and `totalVectorCount` are required, so an error envelope
/// fails here instead of reading as an empty index.
pub fn parse_index_stats(body: &[u8]) -> PineconeResult<IndexStats> {
    let root = parse_root(body)?;
    let dimension = required_u64(&root, "dimension", "dimension")?;
    let dimension = u32::try_from(dimension)
        .map_err(|_| PineconeError::malformed("dimension", format!("{} is out of range", dimension)))?;
    let index_fullness = match root.get("indexFullness") {
        None | Some(Value::Null) => 0.0,
        Some(value) => value
            .as_f64()
            .ok_or_else(|| PineconeError::malformed("indexFullness", "expected a number"))?,
    };
    let total_vector_count = required_u64(&root, "totalVectorCount", "totalVectorCount")?;

    let namespaces: BTreeMap<String, NamespaceStats> = match root.get("namespaces") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(ns, entry)| {
                let vector_count = required_u64(entry, "vectorCount", &format!("namespaces.{}.vectorCount", ns))?;
                Ok((ns.clone(), NamespaceStats { vector_count }))
            })
            .collect::<PineconeResult<_>>()?,
        Some(_) => return Err(PineconeError::malformed("namespaces", "expected an object keyed by namespace")),
    };

    Ok(IndexStats {
        namespaces,
        dimension,
        index_fullness,
        total_vector_count,
    })
}

pub fn parse_upsert_response(body: &[u8]) -> PineconeResult<UpsertResponse> {
    let root = parse_root(body)?;
    Ok(UpsertResponse {
        upserted_count: required_u64(&root, "upsertedCount", "upsertedCount")?,
    })
}

fn required_u64(object: &Value, key: &str, path: &str) -> PineconeResult<u64> {
    match object.get(key) {
        None => Err(PineconeError::malformed(path, "missing")),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| PineconeError::malformed(path, "expected a non-negative integer")),
    }
}

fn vectors_of(root: &Value) -> PineconeResult<&Map<String, Value>> {
    root.get("vectors")
        .and_then(Value::as_object)
        .ok_or_else(|| PineconeError::malformed("vectors", "expected an object keyed by vector id"))
}

fn namespace_of(root: &Value) -> PineconeResult<String> {
    match root.get("namespace") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(ns)) => Ok(ns.clone()),
        Some(_) => Err(PineconeError::malformed("namespace", "expected a string")),
    }
}

fn parse_fetched(key: &str, vector: &Value, namespace: &str) -> PineconeResult<FetchResponse> {
    let path = format!("vectors.{}", key);
    let id = match vector.get("id") {
        None | Some(Value::Null) => key.to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(_) => return Err(PineconeError::malformed(format!("{}.id", path), "expected a string")),
    };

    Ok(FetchResponse {
        id,
        values: parse_values(vector.get("values"), &format!("{}.values", path))?,
        namespace: namespace.to_string(),
        metadata: metadata_text(vector.get("metadata")),
    })
}

fn parse_values(values: Option<&Value>, path: &str) -> PineconeResult<Values> {
    match values {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_f64()
                    .ok_or_else(|| PineconeError::malformed(format!("{}[{}]", path, i), "expected a number"))
            })
            .collect(),
        Some(_) => Err(PineconeError::malformed(path, "expected an array of numbers")),
    }
}

// Metadata stays opaque: compact JSON text, not a parsed structure.
fn metadata_text(metadata: Option<&Value>) -> Option<String> {
    match metadata {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_string()),
    }
}
