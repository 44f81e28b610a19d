use crate::algorithm::Algorithm;
use crate::engine::{SearchResult, SearchState};
use crate::frontier::MinQueue;
use crate::traits::HeuristicSubstrate;

/// A* search from the substrate's start to its goal.
///
/// Identical to [`dijkstra`](crate::dijkstra) except entries are ordered by
/// `g + h`, where `h` is [`HeuristicSubstrate::estimate`]. With an
/// admissible estimate the returned path is a minimum-cost one; both
/// substrates provide one (see [`GridSubstrate`](crate::GridSubstrate) and
/// [`GraphSubstrate`](crate::GraphSubstrate)).
pub fn astar<S: HeuristicSubstrate + ?Sized>(substrate: &S) -> SearchResult {
    SearchState::new(Algorithm::AStar).explore_weighted(substrate, MinQueue::default(), |k| {
        Some(substrate.estimate(k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::{GraphSubstrate, GridSubstrate};
    use crate::trace::Rank;
    use pathviz_core::{Graph, Grid, Point, PosKey};

    #[test]
    fn explores_less_than_dijkstra_on_open_grid() {
        let mut grid = Grid::new(8, 8);
        grid.set_end(Point::cell(0, 7));
        let s = GridSubstrate::new(&grid);
        let a = astar(&s);
        let d = crate::dijkstra(&s);
        assert_eq!(a.best_cost, d.best_cost);
        assert_eq!(a.visited_order.len(), 8);
        assert!(a.visited_order.len() < d.visited_order.len());
    }

    #[test]
    fn logs_scores() {
        let grid = Grid::new(2, 2);
        let r = astar(&GridSubstrate::new(&grid));
        let lines = r.trace.log_lines();
        assert_eq!(lines[0], "A*: start at (0,0)");
        assert_eq!(lines[2], "Relax (0,1) g=1 h=0 f=1");
        let first = r.trace.frontier_at(0).unwrap();
        assert_eq!(
            first[0].rank,
            Rank::Estimate {
                f: 1.0,
                g: 1,
                h: 0.0
            }
        );
        assert_eq!(lines.last().map(String::as_str), Some("Reached the end; path length = 3, cost = 1"));
    }

    #[test]
    fn euclidean_on_graph() {
        let mut g = Graph::new();
        g.snap = false;
        g.add_node(0.0, 0.0);
        g.add_node(3.0, 4.0);
        g.add_node(6.0, 8.0);
        g.connect("A", "B", 5);
        g.connect("B", "C", 5);
        g.connect("A", "C", 20);
        g.set_start("A");
        g.set_end("C");
        let r = astar(&GraphSubstrate::new(&g));
        assert_eq!(
            r.shortest_path,
            vec![PosKey::node("A"), PosKey::node("B"), PosKey::node("C")]
        );
        assert_eq!(r.best_cost, Some(10));
        assert_eq!(r.meta[&PosKey::node("A")].heuristic, Some(10.0));
        assert_eq!(r.meta[&PosKey::node("B")].heuristic, Some(5.0));
    }

    #[test]
    fn snapped_layout_still_finds_cheapest_route() {
        let mut g = Graph::new();
        g.add_node(0.0, 0.0);
        g.add_node(40.0, 0.0);
        g.add_node(80.0, 0.0);
        g.connect("A", "B", 1);
        g.connect("B", "C", 1);
        g.connect("A", "C", 5);
        g.set_start("A");
        g.set_end("C");
        let s = GraphSubstrate::new(&g);
        let r = astar(&s);
        assert_eq!(
            r.shortest_path,
            vec![PosKey::node("A"), PosKey::node("B"), PosKey::node("C")]
        );
        assert_eq!(r.best_cost, Some(2));
        assert_eq!(r.best_cost, crate::dijkstra(&s).best_cost);
        assert!(r.meta[&PosKey::node("A")].heuristic.is_some_and(|h| h <= 2.0));
    }
}
