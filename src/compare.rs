use crate::grovedata::{Grove, Node};
use crate::list::NodeList;
use crate::value::Value;

/// ## Structural comparison
impl Grove {
    /// Compare two subtrees structurally.
    ///
    /// Two elements are equal iff their expanded tags, attribute maps
    /// and in-scope namespace mappings are equal (attribute and
    /// namespace order is irrelevant) and their ordered child sequences
    /// are recursively equal. Prefixes pointing at different URIs make
    /// otherwise identical subtrees unequal.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let name = grove.bind("name");
    /// let a = grove.new_element(name).attr("attr", "value").build()?;
    /// let b = grove.new_element(name).attr("attr", "value").build()?;
    /// let c = grove.new_element(name).attr("attr", "other").build()?;
    /// assert!(grove.deep_equal(a, b));
    /// assert!(!grove.deep_equal(a, c));
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn deep_equal(&self, a: Node, b: Node) -> bool {
        match (self.value(a), self.value(b)) {
            (Value::Root, Value::Root) => self.children_equal(a, b),
            (Value::Element(element_a), Value::Element(element_b)) => {
                element_a.name() == element_b.name()
                    && element_a.attributes() == element_b.attributes()
                    && self.namespaces_in_scope(a) == self.namespaces_in_scope(b)
                    && self.children_equal(a, b)
            }
            _ => false,
        }
    }

    /// Compare two node lists elementwise with [`Grove::deep_equal`].
    pub fn deep_equal_list(&self, a: &NodeList, b: &NodeList) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b.iter())
                .all(|(node_a, node_b)| self.deep_equal(node_a, node_b))
    }

    fn children_equal(&self, a: Node, b: Node) -> bool {
        let children_a: Vec<Node> = self.children(a).collect();
        let children_b: Vec<Node> = self.children(b).collect();
        children_a.len() == children_b.len()
            && children_a
                .iter()
                .zip(children_b.iter())
                .all(|(child_a, child_b)| self.deep_equal(*child_a, *child_b))
    }
}
