//! Node arena and edge list

use bpmn_types::{FlowElement, GatewayDirection, Process, SequenceFlow};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Position of a node in the graph arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A flow node with its derived connectivity
#[derive(Clone, Debug)]
pub struct GraphNode<'a> {
    pub element: FlowElement<'a>,
    /// Ids of flows targeting this node, in flow-list order
    pub incoming: Vec<&'a str>,
    /// Ids of flows leaving this node, in flow-list order
    pub outgoing: Vec<&'a str>,
    in_edges: Vec<usize>,
    out_edges: Vec<usize>,
}

impl<'a> GraphNode<'a> {
    fn new(element: FlowElement<'a>) -> Self {
        Self {
            element,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    pub fn id(&self) -> &'a str {
        self.element.id()
    }

    fn clear(&mut self) {
        self.incoming.clear();
        self.outgoing.clear();
        self.in_edges.clear();
        self.out_edges.clear();
    }
}

/// A sequence flow with resolved endpoints
#[derive(Clone, Copy, Debug)]
pub struct Edge<'a> {
    pub flow: &'a SequenceFlow,
    /// `None` when `sourceRef` names no node
    pub source: Option<NodeIndex>,
    /// `None` when `targetRef` names no node
    pub target: Option<NodeIndex>,
}

impl<'a> Edge<'a> {
    pub fn id(&self) -> &'a str {
        &self.flow.id
    }

    pub fn is_dangling(&self) -> bool {
        self.source.is_none() || self.target.is_none()
    }

    /// Both endpoints when the edge is fully resolved
    pub fn endpoints(&self) -> Option<(NodeIndex, NodeIndex)> {
        Some((self.source?, self.target?))
    }
}

/// Connectivity derived from a process
#[derive(Clone, Debug)]
pub struct ProcessGraph<'a> {
    process: &'a Process,
    nodes: Vec<GraphNode<'a>>,
    index: HashMap<&'a str, NodeIndex>,
    edges: Vec<Edge<'a>>,
}

impl<'a> ProcessGraph<'a> {
    /// Lay out the arena and derive connectivity
    pub fn build(process: &'a Process) -> Self {
        let nodes: Vec<GraphNode<'a>> = process.flow_elements().map(GraphNode::new).collect();
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id()).or_insert(NodeIndex(i));
        }

        let mut graph = Self {
            process,
            nodes,
            index,
            edges: Vec::new(),
        };
        graph.connect();
        graph
    }

    /// Re-derive `incoming`/`outgoing` for every node from the flow list
    pub fn connect(&mut self) {
        for node in &mut self.nodes {
            node.clear();
        }
        self.edges.clear();

        let process = self.process;
        for flow in &process.elements.sequence_flows {
            let source = self.index.get(flow.source_ref.as_str()).copied();
            let target = self.index.get(flow.target_ref.as_str()).copied();
            let position = self.edges.len();

            if let Some(s) = source {
                let node = &mut self.nodes[s.0];
                node.outgoing.push(&flow.id);
                node.out_edges.push(position);
            }
            if let Some(t) = target {
                let node = &mut self.nodes[t.0];
                node.incoming.push(&flow.id);
                node.in_edges.push(position);
            }
            self.edges.push(Edge {
                flow,
                source,
                target,
            });
        }

        tracing::debug!(
            process_id = %self.process.id,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            dangling = self.dangling_edges().count(),
            "Derived process connectivity"
        );
    }

    pub fn process(&self) -> &'a Process {
        self.process
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges with both endpoints resolved
    pub fn resolved_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_dangling()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[GraphNode<'a>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<'a>] {
        &self.edges
    }

    /// All node indices in arena (document) order
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// # Panics
    ///
    /// Panics if `index` did not come from this graph.
    pub fn node(&self, index: NodeIndex) -> &GraphNode<'a> {
        &self.nodes[index.0]
    }

    pub fn element(&self, index: NodeIndex) -> FlowElement<'a> {
        self.nodes[index.0].element
    }

    pub fn id(&self, index: NodeIndex) -> &'a str {
        self.nodes[index.0].id()
    }

    /// Arena position of the first node declared with `id`
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// True for the node its id resolves to; false for later duplicates,
    /// which carry no connectivity
    pub fn is_canonical(&self, index: NodeIndex) -> bool {
        self.index_of(self.id(index)) == Some(index)
    }

    pub fn outgoing_edges(&self, index: NodeIndex) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.nodes[index.0]
            .out_edges
            .iter()
            .map(move |&e| &self.edges[e])
    }

    pub fn incoming_edges(&self, index: NodeIndex) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.nodes[index.0]
            .in_edges
            .iter()
            .map(move |&e| &self.edges[e])
    }

    /// Resolved targets of outgoing edges, in flow order
    pub fn successors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing_edges(index).filter_map(|e| e.target).collect()
    }

    /// Resolved sources of incoming edges, in flow order
    pub fn predecessors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.incoming_edges(index).filter_map(|e| e.source).collect()
    }

    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.nodes[index.0].incoming.len()
    }

    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.nodes[index.0].outgoing.len()
    }

    pub fn start_events(&self) -> Vec<NodeIndex> {
        self.indices()
            .filter(|&i| self.element(i).is_start())
            .collect()
    }

    pub fn end_events(&self) -> Vec<NodeIndex> {
        self.indices().filter(|&i| self.element(i).is_end()).collect()
    }

    pub fn gateways(&self) -> Vec<NodeIndex> {
        self.indices()
            .filter(|&i| self.element(i).as_gateway().is_some())
            .collect()
    }

    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.edges.iter().filter(|e| e.is_dangling())
    }

    /// Whether a gateway splits the flow: declared `diverging`, or
    /// undeclared with more than one outgoing flow
    pub fn is_diverging(&self, index: NodeIndex) -> bool {
        match self.element(index).gateway_direction() {
            Some(GatewayDirection::Diverging) => true,
            Some(GatewayDirection::Converging) => false,
            Some(GatewayDirection::Mixed) | None => {
                self.element(index).as_gateway().is_some() && self.out_degree(index) > 1
            }
        }
    }

    /// Whether a gateway merges the flow: declared `converging`, or
    /// undeclared with more than one incoming flow
    pub fn is_converging(&self, index: NodeIndex) -> bool {
        match self.element(index).gateway_direction() {
            Some(GatewayDirection::Converging) => true,
            Some(GatewayDirection::Diverging) => false,
            Some(GatewayDirection::Mixed) | None => {
                self.element(index).as_gateway().is_some() && self.in_degree(index) > 1
            }
        }
    }

    /// Comparable snapshot: node id to `(incoming, outgoing)` flow ids
    pub fn connectivity(&self) -> BTreeMap<String, (Vec<String>, Vec<String>)> {
        let mut snapshot = BTreeMap::new();
        for node in &self.nodes {
            snapshot.entry(node.id().to_string()).or_insert_with(|| {
                (
                    node.incoming.iter().map(|s| s.to_string()).collect(),
                    node.outgoing.iter().map(|s| s.to_string()).collect(),
                )
            });
        }
        snapshot
    }
}
