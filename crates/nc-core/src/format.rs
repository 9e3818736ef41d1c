//! Canvas graph file format (JSON).
//!
//! ```text
//! { "nodes": [ { "id", "type": "text"|"file", "text"?, "file"?, "x", "y", "width", "height" } ],
//!   "edges": [ { "id", "fromNode", "fromSide"?, "toNode", "toSide"? } ] }
//! ```
//!
//! Decoding is per entry: one malformed node or edge is dropped on its
//! own and the rest of the file still loads. Unknown fields are kept in
//! `extra` maps, and nodes of a type this engine does not edit (`group`,
//! `link`, ...) are kept whole as [`OpaqueEntry`] values; both are written
//! back out. Geometry is read and written as `f64` and integral values
//! are written as integers, so saving an unchanged graph reproduces the
//! file byte for byte.

use crate::error::FormatError;
use crate::geometry::Side;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Node `type` values this engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNodeType {
    Text,
    File,
}

impl FileNodeType {
    fn is_known(tag: &str) -> bool {
        matches!(tag, "text" | "file")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FileNodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(serialize_with = "write_coord")]
    pub x: f64,
    #[serde(serialize_with = "write_coord")]
    pub y: f64,
    #[serde(serialize_with = "write_coord")]
    pub width: f64,
    #[serde(serialize_with = "write_coord")]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_side: Option<Side>,
    pub to_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_side: Option<Side>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry kept verbatim. `position` is the number of regular entries of
/// the same section that preceded it in the file, so it is written back
/// in the same place.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueEntry {
    pub position: usize,
    pub value: Value,
}

impl OpaqueEntry {
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }
}

/// A decoded graph file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphFile {
    pub nodes: Vec<FileNode>,
    pub edges: Vec<FileEdge>,
    /// Nodes of a type this engine does not edit.
    pub opaque_nodes: Vec<OpaqueEntry>,
    /// Connections that touch an opaque node.
    pub opaque_edges: Vec<OpaqueEntry>,
    pub extra: Map<String, Value>,
}

impl Serialize for GraphFile {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(2 + self.extra.len()))?;
        map.serialize_entry("nodes", &Interleaved(&self.nodes, &self.opaque_nodes))?;
        map.serialize_entry("edges", &Interleaved(&self.edges, &self.opaque_edges))?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Regular entries with opaque ones slotted back at their positions.
struct Interleaved<'a, T>(&'a [T], &'a [OpaqueEntry]);

impl<T: Serialize> Serialize for Interleaved<'_, T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let Interleaved(regular, opaque) = *self;
        let mut seq = s.serialize_seq(Some(regular.len() + opaque.len()))?;
        let mut pending = opaque.iter().peekable();
        for (i, entry) in regular.iter().enumerate() {
            while let Some(o) = pending.next_if(|o| o.position <= i) {
                seq.serialize_element(&o.value)?;
            }
            seq.serialize_element(entry)?;
        }
        for o in pending {
            seq.serialize_element(&o.value)?;
        }
        seq.end()
    }
}

/// An entry dropped while decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub section: &'static str,
    pub index: usize,
    pub reason: String,
}

/// Result of [`parse_graph_file`]: everything salvageable, plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct DecodedGraph {
    pub file: GraphFile,
    pub skipped: Vec<SkippedEntry>,
}

impl DecodedGraph {
    pub fn skipped_in(&self, section: &str) -> usize {
        self.skipped.iter().filter(|s| s.section == section).count()
    }
}

/// Decode a graph file, salvaging every well-formed entry.
pub fn parse_graph_file(input: &str) -> Result<DecodedGraph, FormatError> {
    let root: Value = serde_json::from_str(input)?;
    let Value::Object(mut root) = root else {
        return Err(FormatError::NotAnObject(json_kind(&root)));
    };

    let mut decoded = DecodedGraph::default();
    let nodes = take_array(&mut root, "nodes", &mut decoded.skipped);
    let edges = take_array(&mut root, "edges", &mut decoded.skipped);

    for (index, entry) in nodes.into_iter().enumerate() {
        if is_foreign_node(&entry) {
            decoded.file.opaque_nodes.push(OpaqueEntry {
                position: decoded.file.nodes.len(),
                value: entry,
            });
            continue;
        }
        match serde_json::from_value::<FileNode>(entry) {
            Ok(node) => decoded.file.nodes.push(node),
            Err(e) => skip(&mut decoded.skipped, "nodes", index, e.to_string()),
        }
    }
    for (index, entry) in edges.into_iter().enumerate() {
        match serde_json::from_value::<FileEdge>(entry) {
            Ok(edge) => decoded.file.edges.push(edge),
            Err(e) => skip(&mut decoded.skipped, "edges", index, e.to_string()),
        }
    }

    decoded.file.extra = root;
    Ok(decoded)
}

/// Encode a graph file as tab-indented JSON.
pub fn to_canvas_json(file: &GraphFile) -> String {
    let mut out = Vec::with_capacity(256 + file.nodes.len() * 160);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if let Err(e) = file.serialize(&mut ser) {
        // Only reachable through non-string map keys, which `GraphFile` cannot hold.
        log::warn!("graph file serialization failed: {e}");
        return String::from("{\"nodes\":[],\"edges\":[]}");
    }
    String::from_utf8(out).unwrap_or_default()
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn take_array(root: &mut Map<String, Value>, key: &'static str, skipped: &mut Vec<SkippedEntry>) -> Vec<Value> {
    match root.remove(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            skip(skipped, key, 0, format!("expected an array, found {}", json_kind(&other)));
            Vec::new()
        }
    }
}

fn skip(skipped: &mut Vec<SkippedEntry>, section: &'static str, index: usize, reason: String) {
    log::warn!("skipping {section}[{index}]: {reason}");
    skipped.push(SkippedEntry {
        section,
        index,
        reason,
    });
}

/// An object with an id and a `type` other than `text` or `file`.
fn is_foreign_node(entry: &Value) -> bool {
    let has_id = entry.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty());
    let foreign_type = entry
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|tag| !FileNodeType::is_known(tag));
    has_id && foreign_type
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Integral coordinates are written without a fractional part.
fn write_coord<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        s.serialize_i64(*v as i64)
    } else {
        s.serialize_f64(*v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_file() {
        let input = r#"{"nodes":[{"id":"a","type":"text","text":"hi","x":0,"y":0,"width":250,"height":120}],"edges":[]}"#;
        let decoded = parse_graph_file(input).unwrap();
        assert_eq!(decoded.file.nodes.len(), 1);
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.file.nodes[0].text.as_deref(), Some("hi"));
    }

    #[test]
    fn bad_entries_are_skipped_individually() {
        let input = r#"{
            "nodes": [
                {"id":"a","type":"text","text":"ok","x":0,"y":0,"width":250,"height":120},
                {"id":"g","type":"group","x":0,"y":0,"width":250,"height":120},
                {"type":"text","x":0,"y":0,"width":250,"height":120},
                {"id":"b","type":"text","x":"left","y":0,"width":250,"height":120}
            ],
            "edges": [
                {"id":"e1","fromNode":"a","toNode":"a2","toSide":"middle"},
                {"id":"e2","fromNode":"a"}
            ]
        }"#;
        let decoded = parse_graph_file(input).unwrap();
        assert_eq!(decoded.file.nodes.len(), 1);
        assert_eq!(decoded.file.opaque_nodes.len(), 1);
        assert_eq!(decoded.skipped_in("nodes"), 2);
        assert_eq!(decoded.skipped_in("edges"), 2);
    }

    #[test]
    fn non_object_is_an_error() {
        assert!(matches!(
            parse_graph_file("[1, 2]"),
            Err(FormatError::NotAnObject("an array"))
        ));
        assert!(matches!(parse_graph_file("{nope"), Err(FormatError::Json(_))));
    }

    #[test]
    fn output_uses_tabs_and_integral_coords() {
        let input = r#"{"nodes":[{"id":"a","type":"text","text":"hi","x":10,"y":-20.5,"width":250,"height":120}],"edges":[]}"#;
        let decoded = parse_graph_file(input).unwrap();
        let out = to_canvas_json(&decoded.file);
        assert!(out.contains("\n\t\"nodes\""));
        assert!(out.contains("\"x\": 10,"));
        assert!(out.contains("\"y\": -20.5,"));
    }

    #[test]
    fn coordinates_keep_double_precision() {
        let input = r#"{"nodes":[{"id":"a","type":"text","text":"hi","x":16777217,"y":0.123456789,"width":250.5,"height":120}],"edges":[]}"#;
        let decoded = parse_graph_file(input).unwrap();
        let out = to_canvas_json(&decoded.file);
        assert!(out.contains("\"x\": 16777217,"));
        assert!(out.contains("\"y\": 0.123456789,"));
        assert!(out.contains("\"width\": 250.5,"));
    }

    #[test]
    fn foreign_nodes_are_written_back_in_place() {
        let input = r#"{"nodes":[
            {"id":"g","type":"group","label":"cluster","x":0,"y":0,"width":900,"height":600},
            {"id":"a","type":"text","text":"hi","x":0,"y":0,"width":250,"height":120},
            {"id":"l","type":"link","url":"https://example.com","x":0,"y":0,"width":250,"height":120}
        ],"edges":[]}"#;
        let decoded = parse_graph_file(input).unwrap();
        assert_eq!(decoded.file.opaque_nodes[0].position, 0);
        assert_eq!(decoded.file.opaque_nodes[1].position, 1);

        let out = to_canvas_json(&decoded.file);
        let ids: Vec<String> = serde_json::from_str::<Value>(&out).unwrap()["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["g", "a", "l"]);
        assert!(out.contains("\"label\": \"cluster\""));
    }

    #[test]
    fn unknown_fields_survive_reencoding() {
        let input = r#"{"nodes":[{"id":"a","type":"text","text":"hi","x":0,"y":0,"width":250,"height":120,"styleAttributes":{"shape":"pill"}}],"edges":[],"metadata":{"version":"1.0"}}"#;
        let decoded = parse_graph_file(input).unwrap();
        let out = to_canvas_json(&decoded.file);
        let again = parse_graph_file(&out).unwrap();
        assert_eq!(again.file, decoded.file);
        assert!(out.contains("styleAttributes"));
        assert!(out.contains("metadata"));
    }
}
