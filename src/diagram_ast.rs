#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Direction {
    #[default]
    #[value(alias = "lr")]
    LeftRight,
    #[value(alias = "tb")]
    TopBottom,
    #[value(alias = "rl")]
    RightLeft,
    #[value(alias = "bt")]
    BottomTop,
}

impl Direction {
    pub fn rankdir(self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::TopBottom => "TB",
            Direction::RightLeft => "RL",
            Direction::BottomTop => "BT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EdgeRouting {
    Straight,
    #[default]
    Orthogonal,
    Curved,
}

impl EdgeRouting {
    pub fn splines(self) -> &'static str {
        match self {
            EdgeRouting::Straight => "line",
            EdgeRouting::Orthogonal => "ortho",
            EdgeRouting::Curved => "spline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub title_font_size: u32,
    pub node_font_size: u32,
    pub edge_font_size: u32,
    pub background: String,
    /// Inches around the drawing.
    pub padding: f64,
    pub routing: EdgeRouting,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_font_size: 16,
            node_font_size: 12,
            edge_font_size: 10,
            background: "white".to_string(),
            padding: 0.5,
            routing: EdgeRouting::Orthogonal,
        }
    }
}

/// Icon family of a node. Graphviz has no icons, so each family maps to a
/// shape and fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    User,
    Network,
    Storage,
    Security,
}

impl NodeCategory {
    pub fn shape(self) -> &'static str {
        match self {
            NodeCategory::User => "ellipse",
            NodeCategory::Network => "box",
            NodeCategory::Storage => "cylinder",
            NodeCategory::Security => "octagon",
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            NodeCategory::User => "#D5DBDB",
            NodeCategory::Network => "#E3D7FF",
            NodeCategory::Storage => "#D8ECC0",
            NodeCategory::Security => "#F8D3D8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub label: String,
    pub node_ids: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl EdgeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: Option<String>,
    pub color: Option<String>,
    pub style: EdgeStyle,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
            color: None,
            style: EdgeStyle::Solid,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub title: String,
    pub direction: Direction,
    pub style: StyleConfig,
    pub nodes: Vec<Node>,
    pub clusters: Vec<Cluster>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    pub fn new(title: impl Into<String>, direction: Direction, style: StyleConfig) -> Self {
        Self {
            title: title.into(),
            direction,
            style,
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self, label: impl Into<String>, category: NodeCategory) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            label: label.into(),
            category,
        });
        id
    }

    pub fn add_cluster(&mut self, label: impl Into<String>, node_ids: Vec<NodeId>) {
        self.clusters.push(Cluster {
            label: label.into(),
            node_ids,
        });
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| n.id == id)
    }

    pub fn cluster_of(&self, id: NodeId) -> Option<usize> {
        self.clusters.iter().position(|c| c.node_ids.contains(&id))
    }

    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| self.node(e.from).is_none() || self.node(e.to).is_none())
            .collect()
    }

    pub fn dangling_cluster_members(&self) -> Vec<NodeId> {
        self.clusters
            .iter()
            .flat_map(|c| c.node_ids.iter().copied())
            .filter(|&id| self.node(id).is_none())
            .collect()
    }
}
