//! The fixed blog hosting architecture: CloudFront in front of a private S3
//! website bucket.

use std::path::Path;

use crate::diagram_ast::*;

pub const DEFAULT_TITLE: &str = "Blog Infrastructure Architecture";
pub const DEFAULT_OUTPUT: &str = "generated-diagrams/blog-architecture";

/// Which revision of the architecture to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Visitors, CDN and website bucket only.
    Minimal,
    /// Adds Origin Access Control between CDN and bucket; logging off.
    Secured,
    /// Secured plus the access-log bucket.
    #[default]
    Full,
}

impl Variant {
    fn has_oac(self) -> bool {
        matches!(self, Variant::Secured | Variant::Full)
    }

    fn has_log_bucket(self) -> bool {
        self == Variant::Full
    }
}

pub fn blog_architecture(
    variant: Variant,
    title: &str,
    direction: Direction,
    style: StyleConfig,
) -> Diagram {
    let mut d = Diagram::new(title, direction, style);

    let users = d.add_node("Blog Visitors", NodeCategory::User);
    let cdn = d.add_node(
        "CloudFront\nDistribution\n(HTTPS, HTTP/2+3)",
        NodeCategory::Network,
    );
    let website = d.add_node(
        "Website Bucket\n(Versioned,\nEncrypted,\nBlock Public)",
        NodeCategory::Storage,
    );
    let logs = variant.has_log_bucket().then(|| {
        d.add_node(
            "Access Logs Bucket\n(access-logs/,\ncloudfront-logs/)",
            NodeCategory::Storage,
        )
    });
    let storage: Vec<NodeId> = std::iter::once(website).chain(logs).collect();
    d.add_cluster("S3 Storage", storage);

    d.add_edge(Edge::new(users, cdn).label("HTTPS Requests").color("darkblue"));

    if variant.has_oac() {
        let oac = d.add_node("Origin Access\nControl (OAC)", NodeCategory::Security);
        d.add_edge(Edge::new(cdn, oac).label("Secure Origin").color("darkgreen"));
        d.add_edge(Edge::new(oac, website).label("GetObject").color("green"));
    } else {
        d.add_edge(Edge::new(cdn, website).label("Origin Request").color("darkgreen"));
    }

    d.add_edge(
        Edge::new(cdn, cdn)
            .label("Cache:\n24h default\n365d max")
            .color("gray")
            .style(EdgeStyle::Dashed),
    );

    if let Some(logs) = logs {
        d.add_edge(
            Edge::new(cdn, logs)
                .label("CloudFront Logs")
                .color("orange")
                .style(EdgeStyle::Dashed),
        );
        d.add_edge(
            Edge::new(website, logs)
                .label("Server Access Logs")
                .color("orange")
                .style(EdgeStyle::Dashed),
        );
    }

    d
}

/// Console summary printed after a successful render. The first line is the
/// success marker.
pub fn summary_lines(variant: Variant, output_path: &Path) -> Vec<String> {
    let mut lines = vec![
        format!(
            "✅ Architecture diagram generated: {}",
            output_path.display()
        ),
        String::new(),
        "Infrastructure Components:".to_string(),
        "- CloudFront Distribution (CDN with HTTPS, HTTP/2, HTTP/3)".to_string(),
        "- S3 Bucket (versioned, encrypted, block public access)".to_string(),
    ];
    if variant.has_oac() {
        lines.push("- Origin Access Control (secure S3 access)".to_string());
    }
    if variant.has_log_bucket() {
        lines.push("- Access Logs Bucket (access-logs/, cloudfront-logs/ prefixes)".to_string());
    }
    lines.push("- Cache Policy (24h default, 365d max TTL)".to_string());
    lines.push("- Error handling (404/403 → index.html for SPA)".to_string());

    match variant {
        Variant::Minimal => {}
        Variant::Secured => {
            lines.push(String::new());
            lines.push("Recent Changes:".to_string());
            lines.push("- Logging disabled to avoid ACL issues".to_string());
            lines.push("- Can be re-enabled with separate logging bucket if needed".to_string());
        }
        Variant::Full => {
            lines.push(String::new());
            lines.push("Recent Changes:".to_string());
            lines.push("- Access logging moved to a separate logging bucket".to_string());
            lines.push("- CloudFront and S3 server access logs kept under distinct prefixes".to_string());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(variant: Variant) -> Diagram {
        blog_architecture(variant, DEFAULT_TITLE, Direction::LeftRight, StyleConfig::default())
    }

    fn labels(d: &Diagram) -> Vec<&str> {
        d.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    fn edge_labels(d: &Diagram) -> Vec<&str> {
        d.edges.iter().filter_map(|e| e.label.as_deref()).collect()
    }

    #[test]
    fn no_variant_has_dangling_references() {
        for v in [Variant::Minimal, Variant::Secured, Variant::Full] {
            let d = build(v);
            assert!(d.dangling_edges().is_empty(), "{v:?}");
            assert!(d.dangling_cluster_members().is_empty(), "{v:?}");
        }
    }

    #[test]
    fn minimal_links_cdn_straight_to_bucket() {
        let d = build(Variant::Minimal);
        assert_eq!(d.nodes.len(), 3);
        assert!(!labels(&d).iter().any(|l| l.contains("OAC")));
        assert_eq!(
            edge_labels(&d),
            vec!["HTTPS Requests", "Origin Request", "Cache:\n24h default\n365d max"]
        );
    }

    #[test]
    fn secured_routes_through_oac() {
        let d = build(Variant::Secured);
        assert_eq!(d.nodes.len(), 4);
        assert_eq!(
            edge_labels(&d),
            vec![
                "HTTPS Requests",
                "Secure Origin",
                "GetObject",
                "Cache:\n24h default\n365d max"
            ]
        );
        assert_eq!(d.clusters.len(), 1);
        assert_eq!(d.clusters[0].label, "S3 Storage");
        assert_eq!(d.clusters[0].node_ids.len(), 1);
    }

    #[test]
    fn full_is_superset_of_secured() {
        let secured = build(Variant::Secured);
        let full = build(Variant::Full);
        for label in labels(&secured) {
            assert!(labels(&full).contains(&label), "missing node {label:?}");
        }
        for label in edge_labels(&secured) {
            assert!(edge_labels(&full).contains(&label), "missing edge {label:?}");
        }
        assert_eq!(full.clusters[0].node_ids.len(), 2);
    }

    #[test]
    fn cache_edge_is_dashed_self_loop() {
        let d = build(Variant::Secured);
        let cache = d
            .edges
            .iter()
            .find(|e| e.label.as_deref().is_some_and(|l| l.starts_with("Cache:")))
            .unwrap();
        assert!(cache.is_self_loop());
        assert_eq!(cache.style, EdgeStyle::Dashed);
        assert_eq!(cache.color.as_deref(), Some("gray"));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        assert_eq!(build(Variant::Full), build(Variant::Full));
    }

    #[test]
    fn summary_starts_with_success_marker() {
        let lines = summary_lines(Variant::Secured, Path::new("out/diagram.png"));
        assert_eq!(lines[0], "✅ Architecture diagram generated: out/diagram.png");
        assert_eq!(lines[2], "Infrastructure Components:");
        assert!(lines.contains(&"- Logging disabled to avoid ACL issues".to_string()));
    }

    #[test]
    fn minimal_summary_has_no_recent_changes() {
        let lines = summary_lines(Variant::Minimal, Path::new("x.png"));
        assert!(!lines.iter().any(|l| l == "Recent Changes:"));
        assert!(!lines.iter().any(|l| l.contains("Origin Access Control")));
    }
}
