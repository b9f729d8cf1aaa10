//! Service graph type definitions.
//!
//! A graph is an ordered list of services. Each service owns its outgoing
//! edges, and every edge points at a strictly higher index, so index order
//! is always a valid topological order.

/// A single service in the generated topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    index: usize,
    edges: Vec<usize>,
}

impl Service {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            edges: Vec::new(),
        }
    }

    /// Position of this service in the graph.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Indices of the services this one calls, in insertion order.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    pub(crate) fn add_edge(&mut self, target: usize) {
        debug_assert!(target > self.index, "edges must point forward");
        self.edges.push(target);
    }
}

/// Directed acyclic service-dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceGraph {
    services: Vec<Service>,
}

impl ServiceGraph {
    pub(crate) fn from_services(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// Services in ascending index order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// All edges as `(source, target)` pairs, service by service.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.services
            .iter()
            .flat_map(|srv| srv.edges.iter().map(move |&target| (srv.index, target)))
    }

    pub fn edge_count(&self) -> usize {
        self.services.iter().map(|srv| srv.edges.len()).sum()
    }

    /// Render the graph as a Graphviz `digraph` edge list.
    ///
    /// One `"<i> -> <j>;"` line per edge, ordered by source service and then
    /// by edge insertion order.
    pub fn describe(&self) -> String {
        let all_edges: Vec<String> = self
            .edges()
            .map(|(from, to)| format!("{} -> {};", from, to))
            .collect();
        format!("digraph{{\n{}\n}}\n", all_edges.join("\n"))
    }
}
