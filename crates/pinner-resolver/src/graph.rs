//! Graph of who declared a dependency on whom, as discovered.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use pinner_core::constraint::Constraint;
use pinner_core::library::LibraryName;

/// Discovered dependency graph backed by petgraph.
///
/// The root node is the project itself; edges carry the constraint the
/// dependent declared.
pub struct DependencyGraph {
    graph: DiGraph<String, String>,
    index: HashMap<LibraryName, NodeIndex>,
    root: NodeIndex,
}

impl DependencyGraph {
    pub fn new(root_name: &str) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root_name.to_string());
        Self {
            graph,
            index: HashMap::new(),
            root,
        }
    }

    fn node_for(&mut self, library: &LibraryName) -> NodeIndex {
        if let Some(&idx) = self.index.get(library) {
            return idx;
        }
        let idx = self.graph.add_node(library.to_string());
        self.index.insert(library.clone(), idx);
        idx
    }

    /// Record that `from` (or the project root when `None`) depends on `to`.
    ///
    /// Only the first edge between two nodes is kept.
    pub fn add_dependency(
        &mut self,
        from: Option<&LibraryName>,
        to: &LibraryName,
        constraint: &Constraint,
    ) {
        let from = match from {
            Some(lib) => self.node_for(lib),
            None => self.root,
        };
        let to = self.node_for(to);
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, constraint.expression().to_string());
        }
    }

    pub fn contains(&self, library: &LibraryName) -> bool {
        self.index.contains_key(library)
    }

    /// Number of libraries in the graph, excluding the root.
    pub fn library_count(&self) -> usize {
        self.index.len()
    }

    /// Names of the libraries declaring a dependency on `library`.
    pub fn dependents_of(&self, library: &LibraryName) -> Vec<String> {
        let Some(&idx) = self.index.get(library) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| self.graph[e.source()].clone())
            .collect();
        names.sort();
        names
    }

    /// Render the tree below the root. `label` supplies the text shown after
    /// each library name (typically its resolved version).
    pub fn print_tree<F>(&self, max_depth: Option<usize>, label: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut output = format!("{}\n", self.graph[self.root]);
        let mut visited = HashSet::new();
        visited.insert(self.root);

        let children = self.sorted_children(self.root);
        let count = children.len();
        for (i, (child, constraint)) in children.into_iter().enumerate() {
            let walk = Walk {
                prefix: String::new(),
                is_last: i + 1 == count,
                depth: 1,
                max_depth,
            };
            self.print_subtree(&mut output, child, &constraint, walk, &label, &mut visited);
        }
        output
    }

    fn sorted_children(&self, idx: NodeIndex) -> Vec<(NodeIndex, String)> {
        let mut children: Vec<(NodeIndex, String)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight().clone()))
            .collect();
        children.sort_by(|a, b| self.graph[a.0].cmp(&self.graph[b.0]));
        children
    }

    fn print_subtree<F>(
        &self,
        output: &mut String,
        idx: NodeIndex,
        constraint: &str,
        walk: Walk,
        label: &F,
        visited: &mut HashSet<NodeIndex>,
    ) where
        F: Fn(&str) -> String,
    {
        let connector = if walk.is_last { "└── " } else { "├── " };
        let name = &self.graph[idx];
        output.push_str(&format!(
            "{}{connector}{name} {} ({constraint})\n",
            walk.prefix,
            label(name)
        ));

        if walk.max_depth.is_some_and(|max| walk.depth >= max) {
            return;
        }
        // A node already on the current path is a cycle; print it once.
        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{}{}", walk.prefix, if walk.is_last { "    " } else { "│   " });
        let children = self.sorted_children(idx);
        let count = children.len();
        for (i, (child, c)) in children.into_iter().enumerate() {
            let next = Walk {
                prefix: child_prefix.clone(),
                is_last: i + 1 == count,
                depth: walk.depth + 1,
                max_depth: walk.max_depth,
            };
            self.print_subtree(output, child, &c, next, label, visited);
        }

        visited.remove(&idx);
    }
}

struct Walk {
    prefix: String,
    is_last: bool,
    depth: usize,
    max_depth: Option<usize>,
}
