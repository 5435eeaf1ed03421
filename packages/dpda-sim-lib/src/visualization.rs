use std::{fmt::Display, str::FromStr};

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::DiGraph,
    visit::{Bfs, EdgeRef},
};
use serde::Serialize;

use crate::{
    automaton::{Letter, State, dpda::Dpda},
    utils::display_or_epsilon,
};

/// The output kinds a state graph can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Graphviz,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(ExportFormat::Graphviz),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Invalid export format: {}", s)),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Graphviz => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub initial: bool,
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub label: String,
    pub epsilon: bool,
}

#[derive(Debug, Serialize)]
struct JsonEdge {
    from: String,
    to: String,
    label: String,
    epsilon: bool,
}

#[derive(Debug, Serialize)]
struct JsonGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<JsonEdge>,
}

/// Builds the state graph of a definition: one node per state, one edge per
/// transition, labeled `input,pop→push` with `ε` for absences.
///
/// Transitions whose endpoints are not in the state set are left out; the
/// validator reports those as property (d) violations.
pub fn to_graph<Q, S>(dpda: &Dpda<Q, S>) -> DiGraph<GraphNode, GraphEdge>
where
    Q: State + Display,
    S: Letter + Display,
{
    let mut graph = DiGraph::new();
    let mut indices = HashMap::new();

    for state in dpda.states().iter().sorted() {
        let node = graph.add_node(GraphNode {
            id: state.to_string(),
            initial: state == dpda.initial_state(),
            accepting: dpda.is_accepting(state),
        });
        indices.insert(state.clone(), node);
    }

    for transition in dpda.transitions() {
        let (Some(&from), Some(&to)) = (
            indices.get(&transition.from_state),
            indices.get(&transition.to_state),
        ) else {
            continue;
        };

        let push = if transition.push.is_empty() {
            "ε".to_string()
        } else {
            transition.push.iter().join("")
        };

        graph.add_edge(
            from,
            to,
            GraphEdge {
                label: format!(
                    "{},{}→{}",
                    display_or_epsilon(&transition.input_symbol),
                    display_or_epsilon(&transition.stack_top),
                    push
                ),
                epsilon: transition.is_epsilon(),
            },
        );
    }

    graph
}

/// Renders the state graph in DOT format for Graphviz.
pub fn to_graphviz<Q, S>(dpda: &Dpda<Q, S>) -> String
where
    Q: State + Display,
    S: Letter + Display,
{
    let graph = to_graph(dpda);

    let mut dot = String::new();
    dot.push_str("digraph dpda {\n");
    dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
    dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("rankdir=LR;\n");
    dot.push_str("node [shape=point,label=\"\"]START\n");

    let accepting = graph
        .node_indices()
        .filter(|&node| graph[node].accepting)
        .map(|node| format!("\"{}\"", graph[node].id))
        .join(" ");
    dot.push_str(&format!("node [shape = doublecircle]; {};\n", accepting));
    dot.push_str("node [shape = circle];\n");

    if let Some(initial) = graph.node_indices().find(|&node| graph[node].initial) {
        dot.push_str(&format!("START -> \"{}\";\n", graph[initial].id));
    }

    for edge in graph.edge_references() {
        dot.push_str(&format!(
            "\"{}\" -> \"{}\" [ label=\"{}\" ];\n",
            graph[edge.source()].id,
            graph[edge.target()].id,
            edge.weight().label
        ));
    }

    dot.push_str("}\n");

    dot
}

/// Renders the state graph as a `{nodes, edges}` JSON document for rendering
/// libraries.
pub fn to_json<Q, S>(dpda: &Dpda<Q, S>) -> anyhow::Result<String>
where
    Q: State + Display,
    S: Letter + Display,
{
    let graph = to_graph(dpda);

    let nodes = graph
        .node_indices()
        .map(|node| graph[node].clone())
        .collect();
    let edges = graph
        .edge_references()
        .map(|edge| JsonEdge {
            from: graph[edge.source()].id.clone(),
            to: graph[edge.target()].id.clone(),
            label: edge.weight().label.clone(),
            epsilon: edge.weight().epsilon,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&JsonGraph { nodes, edges })?)
}

pub fn export<Q, S>(dpda: &Dpda<Q, S>, format: ExportFormat) -> anyhow::Result<String>
where
    Q: State + Display,
    S: Letter + Display,
{
    match format {
        ExportFormat::Graphviz => Ok(to_graphviz(dpda)),
        ExportFormat::Json => to_json(dpda),
    }
}

/// The states reachable from the initial state in the state graph, sorted by
/// id. Stack contents are ignored, so this is an over-approximation of what a
/// run can actually visit.
pub fn reachable_states<Q, S>(dpda: &Dpda<Q, S>) -> Vec<String>
where
    Q: State + Display,
    S: Letter + Display,
{
    let graph = to_graph(dpda);

    let Some(initial) = graph.node_indices().find(|&node| graph[node].initial) else {
        return vec![];
    };

    let mut reachable = vec![];
    let mut bfs = Bfs::new(&graph, initial);
    while let Some(node) = bfs.next(&graph) {
        reachable.push(graph[node].id.clone());
    }

    reachable.sort();
    reachable
}
