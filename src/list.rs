use std::ops::Bound;
use std::ops::RangeBounds;

use crate::error::Error;
use crate::grovedata::{Grove, Node};

/// An ordered collection of element nodes.
///
/// Produced by [`Grove::select`] and the sub-selection operations below.
/// The list holds non-owning handles; the nodes stay owned by their
/// tree. Attribute access operates on every contained node at once,
/// jQuery-style; index and slice access address the list itself.
///
/// Structural equality between lists goes through
/// [`Grove::deep_equal_list`](crate::Grove::deep_equal_list); the list
/// type itself deliberately has no `PartialEq`.
#[derive(Debug, Clone, Default)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    /// The number of nodes in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a single node by index.
    pub fn get(&self, index: usize) -> Option<Node> {
        self.nodes.get(index).copied()
    }

    /// A new list over the given index range.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> NodeList {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => (end + 1).min(self.nodes.len()),
            Bound::Excluded(&end) => end.min(self.nodes.len()),
            Bound::Unbounded => self.nodes.len(),
        };
        if start >= end {
            return NodeList::default();
        }
        NodeList {
            nodes: self.nodes[start..end].to_vec(),
        }
    }

    /// A new list of the members whose tag equals `tag`.
    pub fn by_tag(&self, grove: &Grove, tag: &str) -> NodeList {
        self.nodes
            .iter()
            .copied()
            .filter(|node| grove.tag_str(*node) == tag)
            .collect()
    }

    /// Collect the value of `name` from every member, in list order.
    ///
    /// Fails with [`Error::MissingAttribute`] if any member lacks the
    /// attribute.
    pub fn values(&self, grove: &Grove, name: &str) -> Result<Vec<String>, Error> {
        self.nodes
            .iter()
            .map(|node| grove.attribute(*node, name).map(str::to_string))
            .collect()
    }

    /// Set `name` to `value` uniformly on every member.
    pub fn set_all(
        &self,
        grove: &mut Grove,
        name: &str,
        value: impl ToString,
    ) -> Result<(), Error> {
        let value = value.to_string();
        for node in &self.nodes {
            grove.set_attribute(*node, name, &value)?;
        }
        Ok(())
    }

    /// Iterate over the nodes in list order.
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().copied()
    }

    /// The nodes as a slice.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        NodeList { nodes }
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        NodeList {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = Node;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

/// ## Child selection
impl Grove {
    /// Select direct children by tag and attribute predicates.
    ///
    /// A child matches when its tag is one of `tags` (every tag matches
    /// if `tags` is empty) and it carries every `name = value` pair in
    /// `attrs` exactly. A child lacking a predicate attribute is
    /// excluded, not an error. Document order is preserved.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let doc = grove.bind("doc");
    /// let a = grove.bind("a");
    /// let b = grove.bind("b");
    /// let root = grove.new_element(doc).with_children(|g| {
    ///     g.new_element(a).attr("attr", 1).build()?;
    ///     g.new_element(b).attr("attr", 2).build()?;
    ///     g.new_element(a).attr("attr", 2).build()?;
    ///     Ok(())
    /// })?;
    ///
    /// assert_eq!(grove.select(root, &["a"], &[]).len(), 2);
    /// assert_eq!(grove.select(root, &[], &[("attr", "2")]).len(), 2);
    /// assert_eq!(grove.select(root, &["a"], &[("attr", "2")]).len(), 1);
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn select(&self, node: Node, tags: &[&str], attrs: &[(&str, &str)]) -> NodeList {
        let mut nodes = Vec::new();
        for child in self.children(node) {
            if !tags.is_empty() && !tags.iter().any(|tag| self.tag_str(child) == *tag) {
                continue;
            }
            let matches = attrs.iter().all(|(name, expected)| {
                matches!(self.attribute(child, name), Ok(value) if value == *expected)
            });
            if matches {
                nodes.push(child);
            }
        }
        NodeList::from(nodes)
    }

    /// All direct children of a node as a list.
    pub fn child_list(&self, node: Node) -> NodeList {
        self.children(node).collect()
    }
}
