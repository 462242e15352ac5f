//! Export a closure as DOT (Graphviz) or Mermaid flowchart.

use crate::closure::Closure;
use crate::oracle::DependencyOracle;
use crate::package::PackageId;
use std::collections::HashMap;
use std::fmt::Write;

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

/// Edges between closure members, re-queried from the oracle. Edges to pruned
/// packages are omitted.
fn closure_edges<O: DependencyOracle>(
    closure: &Closure,
    oracle: &O,
) -> Vec<(PackageId, PackageId)> {
    let mut edges = Vec::new();
    for package in closure.all() {
        let Ok(deps) = oracle.direct_dependencies(package) else {
            continue;
        };
        for dep in deps {
            if closure.contains(&dep) && &dep != package {
                edges.push((package.clone(), dep));
            }
        }
    }
    edges
}

/// Export the closure as a DOT (Graphviz) string.
pub fn export_dot<O: DependencyOracle>(closure: &Closure, oracle: &O) -> String {
    let mut out = String::new();
    writeln!(out, "digraph Closure {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [shape=box, fontsize=10];").unwrap();
    writeln!(out).unwrap();

    for package in closure.all() {
        let is_seed = closure.dependencies_of(package).is_some();
        let (shape, color) = if is_seed {
            ("folder", "#e0e0ff")
        } else {
            ("box", "#ffffff")
        };
        writeln!(
            out,
            "  \"{}\" [shape={}, style=filled, fillcolor=\"{}\"];",
            dot_escape(package.as_str()),
            shape,
            color
        )
        .unwrap();
    }

    writeln!(out).unwrap();

    for (from, to) in closure_edges(closure, oracle) {
        writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            dot_escape(from.as_str()),
            dot_escape(to.as_str())
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Export the closure as a Mermaid flowchart string.
///
/// Node ids are positional (`n0`, `n1`, ...) over the sorted closure, so
/// distinct packages never share a node. The package id is the label.
pub fn export_mermaid<O: DependencyOracle>(closure: &Closure, oracle: &O) -> String {
    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();
    writeln!(out).unwrap();

    let node_ids: HashMap<&PackageId, String> = closure
        .all()
        .iter()
        .enumerate()
        .map(|(i, package)| (package, format!("n{}", i)))
        .collect();

    for package in closure.all() {
        let id = &node_ids[package];
        let label = mermaid_label(package.as_str());
        if closure.dependencies_of(package).is_some() {
            writeln!(out, "  {}[[\"{}\"]]", id, label).unwrap();
        } else {
            writeln!(out, "  {}[\"{}\"]", id, label).unwrap();
        }
    }

    writeln!(out).unwrap();

    for (from, to) in closure_edges(closure, oracle) {
        writeln!(out, "  {} --> {}", node_ids[&from], node_ids[&to]).unwrap();
    }

    out
}

/// Escape a DOT quoted string.
fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Mermaid has no backslash escapes inside labels; quotes use an entity code.
fn mermaid_label(s: &str) -> String {
    s.replace('"', "#quot;")
}

/// Export the closure in the specified format.
pub fn export<O: DependencyOracle>(closure: &Closure, oracle: &O, format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => export_dot(closure, oracle),
        ExportFormat::Mermaid => export_mermaid(closure, oracle),
    }
}
