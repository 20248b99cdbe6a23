//! ChangeMove - reassigns one client to another resource.
//!
//! The move is a plain value: it names the client, the resource it leaves
//! (if any) and the resource it joins. Applying it is the job of the
//! neighborhood explorer, which keeps the loads in sync.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use allocforge_core::Assignment;

use crate::error::MoveParseError;

/// Reassignment of `client` from `from` to `to`.
///
/// Two moves are equal when they send the same client to the same resource;
/// the recorded origin does not take part in equality, hashing or ordering.
///
/// The textual form is `client:from->to`, with `-` for an unassigned origin:
///
/// ```
/// use allocforge_solver::ChangeMove;
///
/// let mv = ChangeMove::new(3, Some(1), 4);
/// assert_eq!(mv.to_string(), "3:1->4");
///
/// let parsed: ChangeMove = "3:-->4".parse().unwrap();
/// assert_eq!(parsed.from, None);
/// assert_eq!(parsed, mv);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChangeMove {
    pub client: usize,
    pub from: Option<usize>,
    pub to: usize,
}

impl ChangeMove {
    pub const fn new(client: usize, from: Option<usize>, to: usize) -> Self {
        Self { client, from, to }
    }

    /// Move of `client` to `to`, taking the origin from `state`.
    pub fn from_state(state: &Assignment<'_>, client: usize, to: usize) -> Self {
        Self::new(client, state.assignment(client), to)
    }

    /// True when the client would stay where it is.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.from == Some(self.to)
    }

    /// The move that undoes this one, if the client had an origin.
    pub fn undo(&self) -> Option<ChangeMove> {
        self.from.map(|from| ChangeMove::new(self.client, Some(self.to), from))
    }

    #[inline]
    fn key(&self) -> (usize, usize) {
        (self.client, self.to)
    }
}

impl PartialEq for ChangeMove {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ChangeMove {}

impl Hash for ChangeMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for ChangeMove {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChangeMove {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for ChangeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "{}:{}->{}", self.client, from, self.to),
            None => write!(f, "{}:-->{}", self.client, self.to),
        }
    }
}

impl FromStr for ChangeMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (client, rest) = s
            .split_once(':')
            .ok_or_else(|| MoveParseError::new(format!("missing ':' in '{}'", s)))?;
        let (from, to) = rest
            .rsplit_once("->")
            .ok_or_else(|| MoveParseError::new(format!("missing '->' in '{}'", s)))?;

        let client = parse_index(client, "client")?;
        let from = match from.trim() {
            "-" => None,
            other => Some(parse_index(other, "origin resource")?),
        };
        let to = parse_index(to, "target resource")?;
        Ok(ChangeMove::new(client, from, to))
    }
}

fn parse_index(s: &str, what: &str) -> Result<usize, MoveParseError> {
    s.trim()
        .parse()
        .map_err(|_| MoveParseError::new(format!("invalid {} '{}'", what, s.trim())))
}
