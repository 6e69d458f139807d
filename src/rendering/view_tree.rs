//! Structured view nodes for the dashboards.
//!
//! Dashboard builders map snapshot records to a tree of these nodes; the GUI
//! walks the tree to lay out widgets. Builders never produce markup strings.

/// Semantic color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Good,
    Bad,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// Cards flowing left to right and wrapping
    Grid(Vec<ViewNode>),
    Card {
        title: Option<String>,
        tone: Tone,
        children: Vec<ViewNode>,
    },
    /// Children laid out on one line
    Row(Vec<ViewNode>),
    Heading(String),
    Text(String),
    /// `label: value` pair
    Field { label: String, value: String },
    Badge { text: String, tone: Tone },
    /// Filled bar, 0-100
    Progress { percent: f64 },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Vertical bars on a `0..=max` axis
    BarChart {
        title: String,
        bars: Vec<(String, f64)>,
        max: f64,
    },
    /// Empty-state message spanning the whole grid
    Notice(String),
}

impl ViewNode {
    pub fn card(title: impl Into<String>, children: Vec<ViewNode>) -> Self {
        ViewNode::Card {
            title: Some(title.into()),
            tone: Tone::Neutral,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        ViewNode::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        ViewNode::Badge { text: text.into(), tone }
    }

    /// Clamps the percentage into `0..=100`; NaN renders as empty.
    pub fn progress(percent: f64) -> Self {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        ViewNode::Progress { percent }
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Grid(children) | ViewNode::Row(children) => children,
            ViewNode::Card { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&ViewNode> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }

    /// Card titles in document order.
    pub fn card_titles(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|node| match node {
                ViewNode::Card { title: Some(title), .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value of the first field with this label.
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.walk().into_iter().find_map(|node| match node {
            ViewNode::Field { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        assert_eq!(ViewNode::progress(140.0), ViewNode::Progress { percent: 100.0 });
        assert_eq!(ViewNode::progress(-3.0), ViewNode::Progress { percent: 0.0 });
        assert_eq!(ViewNode::progress(f64::NAN), ViewNode::Progress { percent: 0.0 });
    }

    #[test]
    fn test_walk_finds_nested_fields() {
        let tree = ViewNode::Grid(vec![
            ViewNode::card("A", vec![ViewNode::field("IP", "10.0.0.1")]),
            ViewNode::card("B", vec![ViewNode::Row(vec![ViewNode::field("MAC", "AA")])]),
        ]);
        assert_eq!(tree.card_titles(), vec!["A", "B"]);
        assert_eq!(tree.field_value("MAC"), Some("AA"));
        assert_eq!(tree.field_value("Vendor"), None);
    }
}
