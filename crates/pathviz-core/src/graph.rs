//! A user-drawn, undirected, weighted node/edge graph and its JSON exchange
//! format.
//!
//! Edits mirror what a graph editor needs: add/move/remove nodes, connect
//! and reweight edges, pick start and end. Every mutator reports whether it
//! changed anything so callers can skip invalidating derived state on a
//! rejected edit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GraphError;

/// Lattice spacing used when snapping is on.
pub const SNAP_SPACING: f64 = 20.0;

const LETTER_IDS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A graph node with an on-canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// An undirected weighted edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub weight: i32,
}

impl GraphEdge {
    /// Whether this edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Whether `id` is one of this edge's endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// Nodes, edges and the two distinguished endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub start_id: Option<String>,
    pub end_id: Option<String>,
    pub snap: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            start_id: None,
            end_id: None,
            snap: true,
        }
    }
}

impl Graph {
    /// Create an empty graph with snapping on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether a node with this id exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The first edge joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.joins(a, b))
    }

    fn snap_coord(&self, v: f64) -> f64 {
        let step = if self.snap { SNAP_SPACING } else { 1.0 };
        (v / step).round() * step
    }

    /// The id the next [`add_node`](Self::add_node) call will use: the first
    /// unused letter, then the first unused positive integer.
    pub fn next_node_id(&self) -> String {
        for ch in LETTER_IDS.chars() {
            let id = ch.to_string();
            if !self.has_node(&id) {
                return id;
            }
        }
        let mut i = 1u32;
        while self.has_node(&i.to_string()) {
            i += 1;
        }
        i.to_string()
    }

    /// Add a node at the snapped position and return its id.
    pub fn add_node(&mut self, x: f64, y: f64) -> String {
        let id = self.next_node_id();
        let node = GraphNode {
            id: id.clone(),
            x: self.snap_coord(x),
            y: self.snap_coord(y),
        };
        self.nodes.push(node);
        id
    }

    /// Move a node to the snapped position.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        let (nx, ny) = (self.snap_coord(x), self.snap_coord(y));
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.x = nx;
                node.y = ny;
                true
            }
            None => false,
        }
    }

    /// Join two existing, distinct, not-yet-connected nodes.
    ///
    /// Returns the new edge id (`"{from}-{to}"`), or `None` if rejected.
    pub fn connect(&mut self, from: &str, to: &str, weight: i32) -> Option<String> {
        if from == to || !self.has_node(from) || !self.has_node(to) {
            return None;
        }
        if self.edge_between(from, to).is_some() {
            return None;
        }
        let id = format!("{from}-{to}");
        self.edges.push(GraphEdge {
            id: id.clone(),
            from: from.to_string(),
            to: to.to_string(),
            weight: weight.max(1),
        });
        Some(id)
    }

    /// Change an edge's weight, clamped to at least 1.
    pub fn set_edge_weight(&mut self, edge_id: &str, weight: i32) -> bool {
        match self.edges.iter_mut().find(|e| e.id == edge_id) {
            Some(edge) => {
                edge.weight = weight.max(1);
                true
            }
            None => false,
        }
    }

    /// Delete a node, its incident edges, and any endpoint role it held.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| !e.touches(id));
        if self.start_id.as_deref() == Some(id) {
            self.start_id = None;
        }
        if self.end_id.as_deref() == Some(id) {
            self.end_id = None;
        }
        true
    }

    /// Delete an edge.
    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        self.edges.len() != before
    }

    /// Make an existing node the start.
    pub fn set_start(&mut self, id: &str) -> bool {
        if !self.has_node(id) || self.start_id.as_deref() == Some(id) {
            return false;
        }
        self.start_id = Some(id.to_string());
        true
    }

    /// Make an existing node the end.
    pub fn set_end(&mut self, id: &str) -> bool {
        if !self.has_node(id) || self.end_id.as_deref() == Some(id) {
            return false;
        }
        self.end_id = Some(id.to_string());
        true
    }

    /// Remove every node and edge and unset both endpoints. Snapping is
    /// switched back on.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // -----------------------------------------------------------------------
    // JSON exchange
    // -----------------------------------------------------------------------

    /// Export as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import from JSON text, coercing loosely typed fields.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Import from an already-parsed JSON value.
    ///
    /// Ids become strings (numbers keep their decimal text), weights become
    /// integers ≥ 1, coordinates become numbers (0 when unreadable), blank or
    /// absent endpoints become unset.
    pub fn from_value(value: &Value) -> Result<Self, GraphError> {
        let nodes = value
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or(GraphError::MissingField("nodes"))?;
        let edges = value
            .get("edges")
            .and_then(Value::as_array)
            .ok_or(GraphError::MissingField("edges"))?;

        let nodes = nodes
            .iter()
            .enumerate()
            .map(|(index, n)| -> Result<GraphNode, GraphError> {
                let id = coerce_id(n.get("id"))
                    .ok_or(GraphError::InvalidId { item: "node", index })?;
                Ok(GraphNode {
                    id,
                    x: coerce_number(n.get("x")).unwrap_or(0.0),
                    y: coerce_number(n.get("y")).unwrap_or(0.0),
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let edges = edges
            .iter()
            .enumerate()
            .map(|(index, e)| -> Result<GraphEdge, GraphError> {
                let invalid = GraphError::InvalidId { item: "edge", index };
                let (Some(id), Some(from), Some(to)) = (
                    coerce_id(e.get("id")),
                    coerce_id(e.get("from")),
                    coerce_id(e.get("to")),
                ) else {
                    return Err(invalid);
                };
                Ok(GraphEdge {
                    id,
                    from,
                    to,
                    weight: coerce_weight(e.get("weight")),
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        Ok(Self {
            nodes,
            edges,
            start_id: coerce_id(value.get("startId")).filter(|s| !s.is_empty()),
            end_id: coerce_id(value.get("endId")).filter(|s| !s.is_empty()),
            snap: value.get("snap").and_then(Value::as_bool).unwrap_or(false),
        })
    }
}

fn coerce_id(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_weight(v: Option<&Value>) -> i32 {
    match coerce_number(v) {
        Some(w) if w >= 1.0 => w.min(f64::from(i32::MAX)).trunc() as i32,
        _ => 1,
    }
}
