//! Prime implicants from Karnaugh maps.
//!
//! Candidate groups are built by iterative doubling: singleton groups of
//! `1` cells first, then every pair of accepted groups of size `k` whose
//! union has exactly `2k` cells and forms a valid group. A valid group is a
//! power-of-two sized rectangle on the torus, connected through cell
//! adjacency.
//!
//! All candidates are then handed, largest first, to a [`Cover`] strategy
//! that picks the groups forming the result. The default [`GreedyCover`]
//! takes a group whenever it covers at least one not-yet-covered cell; this
//! is a heuristic, not a minimum set cover.

use std::collections::{BTreeSet, HashSet, VecDeque};

use itertools::Itertools;
use log::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::karnaugh::{Cell, KarnaughMap};

/// Set of `(row, col)` coordinates.
pub type Coords = BTreeSet<(usize, usize)>;

/// A rectangle of `1` cells and the product term it stands for.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Group {
    pub cells: Vec<Cell>,
    pub size: usize,
    pub term: String,
    /// Fixed variables of the term with their polarity, in variable order.
    pub literals: Vec<(String, bool)>,
}

impl Group {
    fn new(map: &KarnaughMap, coords: &Coords) -> Self {
        let literals = deciding_literals(map, coords);
        let term = if literals.is_empty() {
            "true".to_string()
        } else {
            literals
                .iter()
                .map(|(name, positive)| if *positive { name.clone() } else { format!("!{}", name) })
                .join(" & ")
        };
        Self {
            cells: coords.iter().map(|&(r, c)| map.cell(r, c)).collect(),
            size: coords.len(),
            term,
            literals,
        }
    }

    /// The product term as an expression; `true` for a group without deciding variables.
    pub fn to_expr(&self) -> Expr {
        Expr::and_all(self.literals.iter().map(|(name, positive)| {
            let var = Expr::var(name.clone());
            if *positive {
                var
            } else {
                Expr::not(var)
            }
        }))
    }
}

/// Variables whose bit is constant over all cells of the group.
fn deciding_literals(map: &KarnaughMap, coords: &Coords) -> Vec<(String, bool)> {
    let mut literals = Vec::new();
    for (i, name) in map.variables().iter().enumerate() {
        let mut bits = coords.iter().map(|&cell| map.bit(cell, i));
        if let Some(first) = bits.next() {
            if bits.all(|b| b == first) {
                literals.push((name.clone(), first));
            }
        }
    }
    literals
}

/// Strategy choosing which candidate groups make up the final cover.
pub trait Cover {
    /// Returns indices into `candidates` (sorted by size, largest first)
    /// whose union covers every cell in `ones`.
    fn select(&self, candidates: &[Coords], ones: &[(usize, usize)]) -> Vec<usize>;
}

/// Largest-first greedy cover.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedyCover;

impl Cover for GreedyCover {
    fn select(&self, candidates: &[Coords], ones: &[(usize, usize)]) -> Vec<usize> {
        let mut covered: HashSet<(usize, usize)> = HashSet::with_capacity(ones.len());
        let mut selected = Vec::new();
        for (i, group) in candidates.iter().enumerate() {
            if covered.len() == ones.len() {
                break;
            }
            if group.iter().any(|cell| !covered.contains(cell)) {
                covered.extend(group.iter().copied());
                selected.push(i);
            }
        }
        selected
    }
}

/// Checks that `coords` is a valid Karnaugh group: power-of-two size,
/// connected on the torus, and a full rectangle.
pub fn is_valid_group(map: &KarnaughMap, coords: &Coords) -> bool {
    coords.len().is_power_of_two() && is_connected(map, coords) && is_rectangle(coords)
}

/// Breadth-first search from one cell must reach every cell of the group.
fn is_connected(map: &KarnaughMap, coords: &Coords) -> bool {
    let Some(&start) = coords.iter().next() else {
        return false;
    };
    let mut seen: HashSet<(usize, usize)> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for &other in coords {
            if !seen.contains(&other) && map.is_adjacent(cell, other) {
                seen.insert(other);
                queue.push_back(other);
            }
        }
    }
    seen.len() == coords.len()
}

/// The group fills the product of the rows and columns it touches.
fn is_rectangle(coords: &Coords) -> bool {
    let rows = coords.iter().map(|&(r, _)| r).unique().count();
    let cols = coords.iter().map(|&(_, c)| c).unique().count();
    rows * cols == coords.len()
}

/// All valid groups of `1` cells, sorted by size, largest first.
pub fn candidate_groups(map: &KarnaughMap) -> Vec<Coords> {
    let ones = map.ones();
    let max_size = (1usize << map.variables().len()).min(16);

    let mut previous: Vec<Coords> = ones.iter().map(|&cell| Coords::from([cell])).collect();
    let mut accepted = previous.clone();

    let mut size = 2;
    while size <= max_size && !previous.is_empty() {
        let mut next: Vec<Coords> = Vec::new();
        for (a, b) in previous.iter().tuple_combinations() {
            let union: Coords = a.union(b).copied().collect();
            if union.len() == size && !next.contains(&union) && is_valid_group(map, &union) {
                next.push(union);
            }
        }
        debug!("candidate_groups: {} groups of size {}", next.len(), size);
        accepted.extend(next.iter().cloned());
        previous = next;
        size *= 2;
    }

    // Stable: equal sizes keep their generation order.
    accepted.sort_by(|a, b| b.len().cmp(&a.len()));
    accepted
}

/// Groups chosen by `cover`, sorted by term.
pub fn prime_implicant_groups_with(map: &KarnaughMap, cover: &impl Cover) -> Vec<Group> {
    let candidates = candidate_groups(map);
    let ones = map.ones();
    let selected = cover.select(&candidates, &ones);
    debug!(
        "prime_implicants: selected {} of {} candidates for {} ones",
        selected.len(),
        candidates.len(),
        ones.len()
    );
    let mut groups: Vec<Group> = selected.into_iter().map(|i| Group::new(map, &candidates[i])).collect();
    groups.sort_by(|a, b| a.term.cmp(&b.term));
    groups
}

pub fn prime_implicant_groups(map: &KarnaughMap) -> Vec<Group> {
    prime_implicant_groups_with(map, &GreedyCover)
}

/// Prime implicant terms of `expr` over `variables` (2, 3 or 4 of them).
///
/// An empty list means the function is constantly false.
pub fn prime_implicants<S: AsRef<str>>(expr: &Expr, variables: &[S]) -> Result<Vec<String>> {
    let map = KarnaughMap::new(expr, variables)?;
    Ok(prime_implicant_groups(&map).into_iter().map(|g| g.term).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;
    use crate::parser::parse_expr;

    fn implicants(s: &str, vars: &[&str]) -> Vec<String> {
        prime_implicants(&parse_expr(s).unwrap(), vars).unwrap()
    }

    fn map(s: &str, vars: &[&str]) -> KarnaughMap {
        KarnaughMap::new(&parse_expr(s).unwrap(), vars).unwrap()
    }

    #[test]
    fn test_factored_pair() {
        assert_eq!(implicants("x & y | x & z", &["x", "y", "z"]), vec!["x & y", "x & z"]);
    }

    #[test]
    fn test_wraparound_group() {
        // Columns 00 and 10 are neighbours across the edge.
        assert_eq!(implicants("!z", &["x", "y", "z"]), vec!["!z"]);
        assert_eq!(implicants("!b & !d", &["a", "b", "c", "d"]), vec!["!b & !d"]);
    }

    #[test]
    fn test_corners() {
        let m = map("!b & !d", &["a", "b", "c", "d"]);
        assert_eq!(m.ones(), vec![(0, 0), (0, 3), (3, 0), (3, 3)]);
        let groups = prime_implicant_groups(&m);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 4);
    }

    #[test]
    fn test_xor_has_no_merges() {
        assert_eq!(implicants("a & !b | !a & b", &["a", "b"]), vec!["!a & b", "a & !b"]);
    }

    #[test]
    fn test_constants() {
        assert_eq!(implicants("a | !a", &["a", "b"]), vec!["true"]);
        assert!(implicants("a & !a", &["a", "b", "c"]).is_empty());
    }

    #[test]
    fn test_four_variable_cover() {
        let terms = implicants("a & b | c & d", &["a", "b", "c", "d"]);
        assert_eq!(terms, vec!["a & b", "c & d"]);
    }

    #[test]
    fn test_group_literals() {
        let groups = prime_implicant_groups(&map("x & !z", &["x", "y", "z"]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].literals, vec![("x".to_string(), true), ("z".to_string(), false)]);
        assert_eq!(groups[0].to_expr(), Expr::var("x") & !Expr::var("z"));
        assert_eq!(groups[0].cells.len(), 2);
    }

    #[test]
    fn test_invalid_groups() {
        let m = map("a", &["a", "b", "c", "d"]);
        // Not adjacent.
        assert!(!is_valid_group(&m, &Coords::from([(0, 0), (0, 2)])));
        // Diagonal.
        assert!(!is_valid_group(&m, &Coords::from([(0, 0), (1, 1)])));
        // L-shape of size 4.
        assert!(!is_valid_group(&m, &Coords::from([(0, 0), (0, 1), (0, 2), (1, 0)])));
        // Size 3.
        assert!(!is_valid_group(&m, &Coords::from([(0, 0), (0, 1), (0, 2)])));
        // Wrapping row of four and wrapping square.
        assert!(is_valid_group(&m, &Coords::from([(0, 0), (1, 0), (2, 0), (3, 0)])));
        assert!(is_valid_group(&m, &Coords::from([(0, 0), (0, 3), (3, 0), (3, 3)])));
    }

    #[test]
    fn test_candidates_sorted_by_size() {
        let candidates = candidate_groups(&map("a | b", &["a", "b", "c"]));
        assert!(candidates.windows(2).all(|w| w[0].len() >= w[1].len()));
        assert_eq!(candidates[0].len(), 4);
    }

    struct TakeAll;

    impl Cover for TakeAll {
        fn select(&self, candidates: &[Coords], _ones: &[(usize, usize)]) -> Vec<usize> {
            (0..candidates.len()).collect()
        }
    }

    #[test]
    fn test_custom_cover() {
        let m = map("x & y | x & z", &["x", "y", "z"]);
        let groups = prime_implicant_groups_with(&m, &TakeAll);
        // Two pairs plus three singletons.
        assert_eq!(groups.len(), 5);
    }

    #[test]
    fn test_unsupported_variable_count() {
        let e = parse_expr("a").unwrap();
        assert!(matches!(prime_implicants(&e, &["a"]), Err(Error::UnsupportedVariableCount(1))));
        assert!(matches!(
            prime_implicants(&e, &["a", "b", "c", "d", "e"]),
            Err(Error::UnsupportedVariableCount(5))
        ));
    }
}
