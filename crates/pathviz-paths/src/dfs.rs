use crate::algorithm::Algorithm;
use crate::engine::{SearchResult, SearchState};
use crate::frontier::Lifo;
use crate::traits::Substrate;

/// Depth-first search from the substrate's start to its goal.
///
/// Uses an explicit stack. Keys are marked seen when pushed, so each is
/// pushed at most once; the path found is valid but not necessarily
/// shortest.
pub fn dfs<S: Substrate + ?Sized>(substrate: &S) -> SearchResult {
    SearchState::new(Algorithm::Dfs).explore_unweighted(substrate, Lifo::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::{GraphSubstrate, GridSubstrate};
    use crate::trace::Event;
    use pathviz_core::{Graph, Grid, PosKey};

    #[test]
    fn dives_along_last_pushed_neighbor() {
        let grid = Grid::new(3, 3);
        let r = dfs(&GridSubstrate::new(&grid));
        // Neighbors are pushed right then down, so down is explored first.
        assert_eq!(r.visited_order[1], PosKey::cell(1, 0));
        assert_eq!(r.visited_order.last(), Some(&PosKey::cell(2, 2)));
        assert!(r.shortest_path.len() >= 5);
        assert!(GridSubstrate::new(&grid).path_cost(&r.shortest_path).is_some());
    }

    #[test]
    fn logs_pushes_and_stack_order() {
        let grid = Grid::new(2, 2);
        let r = dfs(&GridSubstrate::new(&grid));
        let lines = r.trace.log_lines();
        assert_eq!(lines[0], "DFS: start at (0,0)");
        assert_eq!(lines[1], "Visit (0,0)");
        assert_eq!(lines[2], "Push (0,1)");
        assert_eq!(lines[3], "Push (1,0)");
        assert!(!r.trace.events().iter().any(|e| matches!(e, Event::Enqueue { .. })));
        let top: Vec<&str> = r.trace.frontier_at(0).unwrap().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(top, ["(1,0)", "(0,1)"]);
    }

    #[test]
    fn can_take_the_long_way() {
        // A-E-D is two hops, but A-B-C-D is on top of the stack first.
        let mut g = Graph::new();
        for i in 0..5 {
            g.add_node(f64::from(i) * 40.0, 0.0);
        }
        g.connect("A", "E", 1);
        g.connect("A", "B", 1);
        g.connect("B", "C", 1);
        g.connect("C", "D", 1);
        g.connect("E", "D", 1);
        g.set_start("A");
        g.set_end("D");
        let r = dfs(&GraphSubstrate::new(&g));
        assert_eq!(
            r.shortest_path,
            vec![PosKey::node("A"), PosKey::node("B"), PosKey::node("C"), PosKey::node("D")]
        );
        let bfs = crate::bfs(&GraphSubstrate::new(&g));
        assert_eq!(
            bfs.shortest_path,
            vec![PosKey::node("A"), PosKey::node("E"), PosKey::node("D")]
        );
    }
}
