//! Substrate adapters: a uniform neighbor/weight/identity view over either a
//! weighted grid or a node/edge graph.

use std::collections::HashMap;

use pathviz_core::{Graph, Grid, Point, PosKey};

use crate::distance::{euclidean, manhattan};
use crate::traits::{HeuristicSubstrate, Substrate};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// 4-connected view of a [`Grid`].
///
/// Moving into a cell costs that cell's weight; walls and out-of-bounds
/// cells are not neighbors at all.
#[derive(Debug, Clone, Copy)]
pub struct GridSubstrate<'a> {
    grid: &'a Grid,
}

impl<'a> GridSubstrate<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    fn passable_key(&self, p: Point) -> Option<PosKey> {
        self.grid.is_passable(p).then_some(PosKey::Cell(p))
    }
}

impl Substrate for GridSubstrate<'_> {
    fn start(&self) -> Option<PosKey> {
        self.passable_key(self.grid.start())
    }

    fn goal(&self) -> Option<PosKey> {
        self.passable_key(self.grid.end())
    }

    fn neighbors(&self, u: &PosKey, buf: &mut Vec<(PosKey, i32)>) {
        let Some(p) = u.as_point() else {
            return;
        };
        for n in p.neighbors_4() {
            if let Some(w) = self.grid.weight(n) {
                buf.push((PosKey::Cell(n), w));
            }
        }
    }

    fn cost(&self, from: &PosKey, to: &PosKey) -> Option<i32> {
        let (a, b) = (from.as_point()?, to.as_point()?);
        if manhattan(a, b) != 1 {
            return None;
        }
        self.grid.weight(b)
    }
}

impl HeuristicSubstrate for GridSubstrate<'_> {
    /// Manhattan distance to the end, less the free step onto the end
    /// itself: every other cell costs at least 1 to enter.
    fn estimate(&self, u: &PosKey) -> f64 {
        match u.as_point() {
            Some(p) => f64::from((manhattan(p, self.grid.end()) - 1).max(0)),
            None => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Undirected view of a [`Graph`].
///
/// Every edge is usable in both directions at its stored weight. Edges whose
/// endpoints are not both present among the nodes are ignored.
///
/// The A* estimate is the straight-line distance to the end node scaled by
/// the smallest weight-per-unit-length over all edges (at most 1), so no
/// edge is ever cheaper than the estimate says its length should be.
#[derive(Debug, Clone)]
pub struct GraphSubstrate<'a> {
    graph: &'a Graph,
    adjacency: HashMap<&'a str, Vec<(&'a str, i32)>>,
    positions: HashMap<&'a str, (f64, f64)>,
    scale: f64,
}

impl<'a> GraphSubstrate<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let positions: HashMap<&str, (f64, f64)> = graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), (n.x, n.y)))
            .collect();
        let mut adjacency: HashMap<&str, Vec<(&str, i32)>> = HashMap::new();
        let mut scale = 1.0_f64;
        for e in &graph.edges {
            let (Some(&a), Some(&b)) = (positions.get(e.from.as_str()), positions.get(e.to.as_str()))
            else {
                continue;
            };
            let w = e.weight.max(1);
            let length = euclidean(a, b);
            if length > 0.0 {
                scale = scale.min(f64::from(w) / length);
            }
            adjacency.entry(e.from.as_str()).or_default().push((e.to.as_str(), w));
            adjacency.entry(e.to.as_str()).or_default().push((e.from.as_str(), w));
        }
        log::trace!("graph estimate scale {scale}");
        Self {
            graph,
            adjacency,
            positions,
            scale,
        }
    }

    /// Factor applied to straight-line distances by [`estimate`](HeuristicSubstrate::estimate).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    fn resolve(&self, id: Option<&str>) -> Option<PosKey> {
        let id = id?;
        self.positions.contains_key(id).then(|| PosKey::node(id))
    }
}

impl Substrate for GraphSubstrate<'_> {
    fn start(&self) -> Option<PosKey> {
        self.resolve(self.graph.start_id.as_deref())
    }

    fn goal(&self) -> Option<PosKey> {
        self.resolve(self.graph.end_id.as_deref())
    }

    fn neighbors(&self, u: &PosKey, buf: &mut Vec<(PosKey, i32)>) {
        let Some(id) = u.as_node() else {
            return;
        };
        if let Some(adj) = self.adjacency.get(id) {
            buf.extend(adj.iter().map(|&(v, w)| (PosKey::node(v), w)));
        }
    }
}

impl HeuristicSubstrate for GraphSubstrate<'_> {
    fn estimate(&self, u: &PosKey) -> f64 {
        let goal = self.graph.end_id.as_deref().and_then(|id| self.positions.get(id));
        let here = u.as_node().and_then(|id| self.positions.get(id));
        match (here, goal) {
            (Some(&a), Some(&b)) => self.scale * euclidean(a, b),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(buf: &[(PosKey, i32)]) -> Vec<PosKey> {
        buf.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn grid_neighbors_skip_walls_and_bounds() {
        let mut grid = Grid::new(3, 3);
        grid.toggle_wall(Point::cell(0, 1));
        grid.set_weight(Point::cell(1, 0), 5);
        let s = GridSubstrate::new(&grid);

        let mut buf = Vec::new();
        s.neighbors(&PosKey::cell(0, 0), &mut buf);
        assert_eq!(buf, vec![(PosKey::cell(1, 0), 5)]);

        buf.clear();
        s.neighbors(&PosKey::cell(1, 1), &mut buf);
        assert_eq!(
            keys(&buf),
            vec![PosKey::cell(1, 2), PosKey::cell(2, 1), PosKey::cell(1, 0)]
        );

        buf.clear();
        s.neighbors(&PosKey::node("A"), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn grid_cost_is_entered_cell_weight() {
        let mut grid = Grid::new(2, 2);
        grid.set_weight(Point::cell(0, 1), 10);
        let s = GridSubstrate::new(&grid);
        assert_eq!(s.cost(&PosKey::cell(0, 0), &PosKey::cell(0, 1)), Some(10));
        assert_eq!(s.cost(&PosKey::cell(1, 1), &PosKey::cell(1, 0)), Some(1));
        // Endpoints are free to enter.
        assert_eq!(s.cost(&PosKey::cell(0, 1), &PosKey::cell(1, 1)), Some(0));
        assert_eq!(s.cost(&PosKey::cell(0, 1), &PosKey::cell(0, 0)), Some(0));
        assert_eq!(s.cost(&PosKey::cell(0, 0), &PosKey::cell(1, 1)), None);
        let path = [PosKey::cell(0, 0), PosKey::cell(0, 1), PosKey::cell(1, 1)];
        assert_eq!(s.path_cost(&path), Some(10));
        assert_eq!(s.path_cost(&path[..1]), Some(0));
    }

    #[test]
    fn grid_endpoints_and_heuristic() {
        let grid = Grid::new(3, 4);
        let s = GridSubstrate::new(&grid);
        assert_eq!(s.start(), Some(PosKey::cell(0, 0)));
        assert_eq!(s.goal(), Some(PosKey::cell(2, 3)));
        assert_eq!(s.estimate(&PosKey::cell(0, 0)), 4.0);
        assert_eq!(s.estimate(&PosKey::cell(1, 3)), 0.0);
        assert_eq!(s.estimate(&PosKey::cell(2, 3)), 0.0);
    }

    fn abc() -> Graph {
        let mut g = Graph::new();
        g.snap = false;
        g.add_node(0.0, 0.0);
        g.add_node(1.0, 0.0);
        g.add_node(2.0, 0.0);
        g.connect("A", "B", 1);
        g.connect("B", "C", 2);
        g.set_start("A");
        g.set_end("C");
        g
    }

    #[test]
    fn graph_edges_are_undirected() {
        let g = abc();
        let s = GraphSubstrate::new(&g);
        let mut buf = Vec::new();
        s.neighbors(&PosKey::node("B"), &mut buf);
        assert_eq!(buf, vec![(PosKey::node("A"), 1), (PosKey::node("C"), 2)]);
        assert_eq!(s.cost(&PosKey::node("C"), &PosKey::node("B")), Some(2));
        assert_eq!(s.cost(&PosKey::node("A"), &PosKey::node("C")), None);
        // No edge is cheaper than its drawn length, so distances are unscaled.
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.estimate(&PosKey::node("A")), 2.0);
    }

    #[test]
    fn graph_estimate_shrinks_to_cheapest_edge() {
        let mut g = Graph::new();
        g.add_node(0.0, 0.0);
        g.add_node(40.0, 0.0);
        g.add_node(80.0, 0.0);
        g.connect("A", "B", 1);
        g.connect("B", "C", 10);
        g.set_start("A");
        g.set_end("C");
        let s = GraphSubstrate::new(&g);
        assert_eq!(s.scale(), 1.0 / 40.0);
        assert!((s.estimate(&PosKey::node("B")) - 1.0).abs() < 1e-12);
        assert_eq!(s.estimate(&PosKey::node("C")), 0.0);
    }

    #[test]
    fn graph_endpoints_must_resolve() {
        let mut g = abc();
        g.end_id = Some("Q".to_string());
        let s = GraphSubstrate::new(&g);
        assert_eq!(s.start(), Some(PosKey::node("A")));
        assert_eq!(s.goal(), None);

        g.start_id = None;
        let s = GraphSubstrate::new(&g);
        assert_eq!(s.start(), None);
    }

    #[test]
    fn graph_ignores_dangling_edges() {
        let mut g = abc();
        g.edges.push(pathviz_core::GraphEdge {
            id: "A-Z".to_string(),
            from: "A".to_string(),
            to: "Z".to_string(),
            weight: 1,
        });
        let s = GraphSubstrate::new(&g);
        let mut buf = Vec::new();
        s.neighbors(&PosKey::node("A"), &mut buf);
        assert_eq!(buf, vec![(PosKey::node("B"), 1)]);
    }
}
