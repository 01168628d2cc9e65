//! Automaton domain types: states, symbols, and a map-backed transition table.
//!
//! The search engines only ever see the `TransitionFn` trait; `TransitionTable`
//! is the batteries-included implementation used by tests and by callers who
//! want to describe an automaton as plain edge data instead of a closure.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::TableParseError;
use crate::traits::TransitionFn;

/// Opaque identifier for an automaton state.
///
/// States carry no structure beyond equality; the newtype keeps them from
/// being confused with depths, counts, or other bare integers in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input symbol drawn from the automaton's alphabet.
pub type Symbol = char;

/// Map-backed nondeterministic transition relation.
///
/// Absent entries mean "no outgoing edges", which the search treats as a
/// normal dead end rather than an error. Duplicate edges are collapsed so the
/// relation stays a set.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    edges: HashMap<(StateId, Symbol), Vec<StateId>>,
}

impl TransitionTable {
    /// Create an empty transition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single edge `from -symbol-> to`.
    pub fn add_edge(&mut self, from: impl Into<StateId>, symbol: Symbol, to: impl Into<StateId>) {
        let targets = self.edges.entry((from.into(), symbol)).or_default();
        let to = to.into();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Builder-style variant of [`add_edge`](Self::add_edge).
    pub fn with_edge(
        mut self,
        from: impl Into<StateId>,
        symbol: Symbol,
        to: impl Into<StateId>,
    ) -> Self {
        self.add_edge(from, symbol, to);
        self
    }

    /// Number of distinct edges in the table.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl TransitionFn for TransitionTable {
    fn next_states(&self, state: StateId, symbol: Symbol) -> Vec<StateId> {
        self.edges
            .get(&(state, symbol))
            .cloned()
            .unwrap_or_default()
    }
}

/// Parse the compact edge-list notation used throughout the test suites:
///
/// ```text
/// # fan out on 'a', then converge
/// 0 -a-> 1 2
/// 1 -b-> 3
/// 2 -c-> 3
/// ```
///
/// One source state and symbol per line, one or more target states separated
/// by spaces or commas. Blank lines and `#` comments are ignored.
impl FromStr for TransitionTable {
    type Err = TableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = TransitionTable::new();

        for (idx, raw) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let from = tokens
                .next()
                .ok_or_else(|| TableParseError::MalformedEdge {
                    line: line_no,
                    text: line.to_string(),
                })?;
            let arrow = tokens
                .next()
                .ok_or_else(|| TableParseError::MalformedEdge {
                    line: line_no,
                    text: line.to_string(),
                })?;

            // The arrow token carries the symbol: `-a->`
            let symbol = arrow
                .strip_prefix('-')
                .and_then(|rest| rest.strip_suffix("->"))
                .and_then(|middle| {
                    let mut chars = middle.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(c),
                        _ => None,
                    }
                })
                .ok_or_else(|| TableParseError::MalformedEdge {
                    line: line_no,
                    text: line.to_string(),
                })?;

            let from = parse_state(from, line_no)?;

            let mut targets = Vec::new();
            for token in tokens {
                for piece in token.split(',').filter(|p| !p.is_empty()) {
                    targets.push(parse_state(piece, line_no)?);
                }
            }
            if targets.is_empty() {
                return Err(TableParseError::MissingTargets { line: line_no });
            }

            for to in targets {
                table.add_edge(from, symbol, to);
            }
        }

        Ok(table)
    }
}

fn parse_state(token: &str, line: usize) -> Result<StateId, TableParseError> {
    token
        .parse::<u32>()
        .map(StateId)
        .map_err(|_| TableParseError::InvalidState {
            line,
            token: token.to_string(),
        })
}
