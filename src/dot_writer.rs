use crate::diagram_ast::*;

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";
const EDGE_COLOR: &str = "#7B8894";
const CLUSTER_PEN: &str = "#AEB6BE";
const CLUSTER_FILL: &str = "#E5F5FD";
const INDENT: &str = "    ";

/// Edges and cluster members naming undeclared nodes are skipped, since
/// Graphviz would otherwise invent a bare node for them.
pub fn render(diagram: &Diagram) -> String {
    let style = &diagram.style;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("digraph {} {{", quote(&diagram.title)));
    lines.push(format!(
        "{INDENT}graph [bgcolor={}, fontcolor={}, fontname={}, fontsize={}, label={}, labelloc=\"t\", nodesep=0.6, pad={}, rankdir={}, ranksep=0.75, splines={}];",
        quote(&style.background),
        quote(FONT_COLOR),
        quote(FONT_NAME),
        style.title_font_size,
        quote(&diagram.title),
        style.padding,
        diagram.direction.rankdir(),
        style.routing.splines(),
    ));
    lines.push(format!(
        "{INDENT}node [fontcolor={}, fontname={}, fontsize={}, style=\"rounded,filled\"];",
        quote(FONT_COLOR),
        quote(FONT_NAME),
        style.node_font_size,
    ));
    lines.push(format!(
        "{INDENT}edge [color={}, fontcolor={}, fontname={}, fontsize={}];",
        quote(EDGE_COLOR),
        quote(FONT_COLOR),
        quote(FONT_NAME),
        style.edge_font_size,
    ));
    lines.push(String::new());

    for node in &diagram.nodes {
        if diagram.cluster_of(node.id).is_none() {
            lines.push(format!("{INDENT}{}", node_stmt(node)));
        }
    }

    for (i, cluster) in diagram.clusters.iter().enumerate() {
        lines.push(format!("{INDENT}subgraph cluster_{i} {{"));
        lines.push(format!(
            "{INDENT}{INDENT}graph [label={}, labeljust=l, style=rounded, pencolor={}, bgcolor={}, fontsize={}, margin=20];",
            quote(&cluster.label),
            quote(CLUSTER_PEN),
            quote(CLUSTER_FILL),
            style.node_font_size,
        ));
        for id in &cluster.node_ids {
            match diagram.node(*id) {
                Some(node) => lines.push(format!("{INDENT}{INDENT}{}", node_stmt(node))),
                None => tracing::warn!(
                    cluster = cluster.label.as_str(),
                    node = id.0,
                    "skipping undeclared cluster member"
                ),
            }
        }
        lines.push(format!("{INDENT}}}"));
    }

    let mut edges = Vec::new();
    for edge in &diagram.edges {
        if diagram.node(edge.from).is_some() && diagram.node(edge.to).is_some() {
            edges.push(format!("{INDENT}{}", edge_stmt(edge)));
        } else {
            tracing::warn!(
                from = edge.from.0,
                to = edge.to.0,
                "skipping edge with undeclared endpoint"
            );
        }
    }
    if !edges.is_empty() {
        lines.push(String::new());
        lines.extend(edges);
    }

    lines.push("}".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn node_ident(id: NodeId) -> String {
    format!("n{}", id.0)
}

fn node_stmt(node: &Node) -> String {
    format!(
        "{} [label={}, shape={}, fillcolor={}];",
        node_ident(node.id),
        quote(&node.label),
        node.category.shape(),
        quote(node.category.fill_color()),
    )
}

fn edge_stmt(edge: &Edge) -> String {
    let mut attrs: Vec<String> = Vec::new();
    if let Some(label) = &edge.label {
        attrs.push(format!("label={}", quote(label)));
    }
    if let Some(color) = &edge.color {
        attrs.push(format!("color={}", quote(color)));
    }
    if edge.style != EdgeStyle::Solid {
        attrs.push(format!("style={}", edge.style.as_str()));
    }

    let head = format!("{} -> {}", node_ident(edge.from), node_ident(edge.to));
    if attrs.is_empty() {
        format!("{head};")
    } else {
        format!("{head} [{}];", attrs.join(", "))
    }
}

/// Quote a DOT string. Line breaks become the `\n` escape (centered line).
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_plain() {
        assert_eq!(quote("S3 Storage"), "\"S3 Storage\"");
    }

    #[test]
    fn quote_newlines_become_escapes() {
        assert_eq!(quote("Cache:\n24h default"), "\"Cache:\\n24h default\"");
    }

    #[test]
    fn quote_crlf_drops_carriage_return() {
        assert_eq!(quote("a\r\nb"), "\"a\\nb\"");
    }

    #[test]
    fn quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote(r#"say "hi" \o/"#), r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn edge_without_attributes() {
        let e = Edge::new(NodeId(0), NodeId(1));
        assert_eq!(edge_stmt(&e), "n0 -> n1;");
    }

    #[test]
    fn edge_with_all_attributes() {
        let e = Edge::new(NodeId(1), NodeId(1))
            .label("loop")
            .color("gray")
            .style(EdgeStyle::Dashed);
        assert_eq!(
            edge_stmt(&e),
            "n1 -> n1 [label=\"loop\", color=\"gray\", style=dashed];"
        );
    }

    #[test]
    fn solid_style_is_not_emitted() {
        let e = Edge::new(NodeId(0), NodeId(1)).style(EdgeStyle::Solid);
        assert!(!edge_stmt(&e).contains("style"));
    }

    #[test]
    fn undeclared_endpoints_are_not_emitted() {
        let mut d = Diagram::new("t", Direction::LeftRight, StyleConfig::default());
        let a = d.add_node("A", NodeCategory::User);
        d.add_edge(Edge::new(a, NodeId(7)));
        d.add_edge(Edge::new(NodeId(8), a));
        d.add_cluster("c", vec![a, NodeId(9)]);
        let out = render(&d);
        assert!(!out.contains("->"), "got:\n{out}");
        assert!(!out.contains("n7"));
        assert!(!out.contains("n9"));
        assert_eq!(out.matches("n0 [label=").count(), 1);
    }

    #[test]
    fn declared_edges_survive_next_to_dangling_ones() {
        let mut d = Diagram::new("t", Direction::LeftRight, StyleConfig::default());
        let a = d.add_node("A", NodeCategory::User);
        let b = d.add_node("B", NodeCategory::Network);
        d.add_edge(Edge::new(a, NodeId(7)));
        d.add_edge(Edge::new(a, b));
        let out = render(&d);
        assert!(out.contains("\n\n    n0 -> n1;\n}\n"), "got:\n{out}");
        assert!(!out.contains("n7"));
    }

    #[test]
    fn node_statement_uses_category_shape() {
        let node = Node {
            id: NodeId(3),
            label: "Origin Access\nControl (OAC)".to_string(),
            category: NodeCategory::Security,
        };
        assert_eq!(
            node_stmt(&node),
            "n3 [label=\"Origin Access\\nControl (OAC)\", shape=octagon, fillcolor=\"#F8D3D8\"];"
        );
    }
}
