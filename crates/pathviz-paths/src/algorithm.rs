use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::SearchResult;
use crate::traits::HeuristicSubstrate;

/// The four interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    /// Every strategy, in menu order.
    pub const ALL: [Algorithm; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::AStar];

    /// Display name used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    /// Whether edge weights influence the search order.
    pub fn is_weighted(self) -> bool {
        matches!(self, Self::Dijkstra | Self::AStar)
    }

    /// Whether the reported path is guaranteed shortest: by hop count for
    /// BFS, by total weight for Dijkstra and A*.
    pub fn guarantees_shortest(self) -> bool {
        !matches!(self, Self::Dfs)
    }

    /// Heading for a frontier panel.
    pub fn frontier_title(self) -> &'static str {
        match self {
            Self::Bfs => "Queue (front → back)",
            Self::Dfs => "Stack (top → bottom)",
            Self::Dijkstra => "Priority Queue (min dist →)",
            Self::AStar => "Open Set (min f=g+h →)",
        }
    }

    /// Run this strategy over `substrate`.
    pub fn run<S: HeuristicSubstrate + ?Sized>(self, substrate: &S) -> SearchResult {
        match self {
            Self::Bfs => crate::bfs(substrate),
            Self::Dfs => crate::dfs(substrate),
            Self::Dijkstra => crate::dijkstra(substrate),
            Self::AStar => crate::astar(substrate),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm `{}` (expected bfs, dfs, dijkstra or astar)", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("bfs".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!(" DFS ".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert_eq!("Dijkstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!("greedy".parse::<Algorithm>().is_err());
    }

    #[test]
    fn properties() {
        assert!(!Algorithm::Bfs.is_weighted());
        assert!(Algorithm::AStar.is_weighted());
        assert!(!Algorithm::Dfs.guarantees_shortest());
        assert_eq!(Algorithm::AStar.to_string(), "A*");
        assert_eq!(Algorithm::Dfs.frontier_title(), "Stack (top → bottom)");
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Algorithm::AStar).unwrap();
        assert_eq!(json, "\"astar\"");
        let back: Algorithm = serde_json::from_str("\"dijkstra\"").unwrap();
        assert_eq!(back, Algorithm::Dijkstra);
    }
}
