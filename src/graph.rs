//! Competency prerequisite graph.
//!
//! Stores each competency's direct prerequisites (edge competency →
//! prerequisite) and keeps the structure a DAG: every insertion is staged,
//! the whole graph is checked for cycles, and a cycle-closing insertion is
//! rolled back.
//!
//! Holding a competency implies holding everything reachable through its
//! prerequisite chain, so a `PSE2` holder satisfies a `PSE1` need.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS colouring)

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::HierarchyConfig;
use crate::error::ConfigError;

/// DFS node colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not visited yet.
    White,
    /// On the current recursion stack.
    Gray,
    /// Fully explored.
    Black,
}

/// A competency hierarchy.
///
/// Owned by the caller and passed by reference into every engine call.
/// The transitive closure of each competency is cached and rebuilt after
/// every successful mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetencyGraph {
    prerequisites: BTreeMap<String, Vec<String>>,
    closure: BTreeMap<String, BTreeSet<String>>,
}

impl CompetencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a hierarchy, applying entries in order.
    ///
    /// # Errors
    /// [`ConfigError::CyclicHierarchy`] naming the first entry that would
    /// close a cycle.
    pub fn from_hierarchy(hierarchy: &HierarchyConfig) -> Result<Self, ConfigError> {
        let mut graph = Self::new();
        for entry in &hierarchy.competencies {
            if !graph.add_competency(&entry.name, entry.prerequisites.iter().cloned()) {
                return Err(ConfigError::CyclicHierarchy {
                    competency: entry.name.clone(),
                });
            }
        }
        Ok(graph)
    }

    /// Inserts a competency or replaces its prerequisite list.
    ///
    /// Returns `false` and leaves the graph untouched if the change would
    /// introduce a cycle (including a self-reference).
    pub fn add_competency<I, S>(&mut self, name: &str, prerequisites: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let staged: Vec<String> = prerequisites.into_iter().map(Into::into).collect();
        let previous = self.prerequisites.insert(name.to_string(), staged);

        if !self.verify_acyclic() {
            match previous {
                Some(prev) => {
                    self.prerequisites.insert(name.to_string(), prev);
                }
                None => {
                    self.prerequisites.remove(name);
                }
            }
            tracing::warn!(competency = name, "rejected competency: prerequisite cycle");
            return false;
        }

        self.rebuild_closure();
        tracing::debug!(
            competency = name,
            prerequisites = ?self.prerequisites.get(name),
            "competency added"
        );
        true
    }

    /// Three-colour DFS over every node in the map.
    ///
    /// Returns `false` if any back edge (an edge into a gray node) exists.
    pub fn verify_acyclic(&self) -> bool {
        let mut colors: HashMap<&str, Color> = HashMap::new();
        for node in self.prerequisites.keys() {
            if colors.get(node.as_str()).copied().unwrap_or(Color::White) == Color::White
                && self.has_back_edge(node, &mut colors)
            {
                return false;
            }
        }
        true
    }

    fn has_back_edge<'a>(&'a self, node: &'a str, colors: &mut HashMap<&'a str, Color>) -> bool {
        colors.insert(node, Color::Gray);

        if let Some(prereqs) = self.prerequisites.get(node) {
            for next in prereqs {
                match colors.get(next.as_str()).copied().unwrap_or(Color::White) {
                    Color::Gray => return true,
                    Color::White => {
                        if self.has_back_edge(next, colors) {
                            return true;
                        }
                    }
                    Color::Black => {}
                }
            }
        }

        colors.insert(node, Color::Black);
        false
    }

    /// Whether `held` covers `required`, directly or by implication.
    ///
    /// Answers from the cached closure; agrees with [`Self::implies`].
    pub fn satisfies<S: AsRef<str>>(&self, held: &BTreeSet<S>, required: &str) -> bool
    where
        S: Ord,
    {
        held.iter().any(|h| {
            let h: &str = h.as_ref();
            h == required
                || self
                    .closure
                    .get(h)
                    .is_some_and(|ancestors| ancestors.contains(required))
        })
    }

    /// Uncached implication: recursive OR over each held competency's
    /// prerequisite chain. Terminates because the graph is acyclic.
    pub fn implies<'a, I>(&self, held: I, required: &str) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        held.into_iter()
            .any(|h| h == required || self.reaches(h, required))
    }

    fn reaches(&self, from: &str, target: &str) -> bool {
        self.prerequisites.get(from).is_some_and(|prereqs| {
            prereqs
                .iter()
                .any(|p| p == target || self.reaches(p, target))
        })
    }

    fn rebuild_closure(&mut self) {
        let mut closure = BTreeMap::new();
        for name in self.prerequisites.keys() {
            let mut ancestors = BTreeSet::new();
            self.collect_ancestors(name, &mut ancestors);
            closure.insert(name.clone(), ancestors);
        }
        self.closure = closure;
    }

    fn collect_ancestors(&self, name: &str, out: &mut BTreeSet<String>) {
        if let Some(prereqs) = self.prerequisites.get(name) {
            for p in prereqs {
                if out.insert(p.clone()) {
                    self.collect_ancestors(p, out);
                }
            }
        }
    }

    /// Direct prerequisites of a competency, if it was inserted.
    pub fn prerequisites(&self, name: &str) -> Option<&[String]> {
        self.prerequisites.get(name).map(Vec::as_slice)
    }

    /// Every competency reachable through the prerequisite chain.
    pub fn all_prerequisites(&self, name: &str) -> BTreeSet<String> {
        self.closure.get(name).cloned().unwrap_or_default()
    }

    /// Whether the name is known, as an inserted node or as a referenced
    /// prerequisite.
    pub fn contains(&self, name: &str) -> bool {
        self.prerequisites.contains_key(name)
            || self
                .prerequisites
                .values()
                .any(|prereqs| prereqs.iter().any(|p| p == name))
    }

    /// Inserted competency names, sorted.
    pub fn competencies(&self) -> impl Iterator<Item = &str> {
        self.prerequisites.keys().map(String::as_str)
    }

    /// Number of inserted competencies.
    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    /// Whether no competency was inserted.
    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }
}
