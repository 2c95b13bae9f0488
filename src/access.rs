use crate::error::Error;
use crate::grovedata::{Grove, Node};
use crate::name::NameId;
use crate::value::{Element, Prefixes, Value, ValueType};

/// ## Read and write access to nodes
impl Grove {
    /// Access to the value for this node.
    #[inline]
    pub fn value(&self, node: Node) -> &Value {
        self.arena[node.get()].get()
    }

    /// Mutable access to the value for this node.
    #[inline]
    pub fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena[node.get()].get_mut()
    }

    /// Get the [`ValueType`] of a node.
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// The element value of a node, or `None` for a root node.
    pub fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            Value::Root => None,
        }
    }

    /// Mutable element value of a node.
    pub fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        match self.value_mut(node) {
            Value::Element(element) => Some(element),
            Value::Root => None,
        }
    }

    /// Get the parent node.
    ///
    /// Returns [`None`] for a detached element or a document root. The
    /// back-reference is a plain handle; children are owned by the tree,
    /// parents are only looked up.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].parent().map(Node::new)
    }

    /// Iterate over the direct children of a node, in document order.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(&self.arena).map(Node::new)
    }

    /// The number of direct children.
    pub fn child_count(&self, node: Node) -> usize {
        self.children(node).count()
    }

    /// Obtain the document element from a document root node.
    pub fn document_element(&self, node: Node) -> Result<Node, Error> {
        if self.value_type(node) != ValueType::Root {
            return Err(Error::InvalidOperation(
                "not a document root".to_string(),
            ));
        }
        self.children(node)
            .find(|child| self.value_type(*child) == ValueType::Element)
            .ok_or_else(|| Error::InvalidOperation("document root is empty".to_string()))
    }

    /// Read an attribute by name.
    ///
    /// The name may be bare, `prefix:name` (resolved against the node's
    /// in-scope namespaces) or `{uri}name` Clark notation. Reading an
    /// attribute the element does not carry fails with
    /// [`Error::MissingAttribute`].
    pub fn attribute(&self, node: Node, name: &str) -> Result<&str, Error> {
        let element = self.element(node).ok_or(Error::NotElement(node))?;
        let in_scope = self.namespaces_in_scope(node);
        let resolved = self.lookup_query_name(&in_scope, name, false)?;
        resolved
            .and_then(|name_id| element.get_attribute(name_id))
            .ok_or_else(|| Error::MissingAttribute(name.to_string()))
    }

    /// Set an attribute by name; the value is coerced to a string.
    ///
    /// Overwrites an existing value. Prefixed names are resolved against
    /// the node's in-scope namespaces.
    pub fn set_attribute(
        &mut self,
        node: Node,
        name: &str,
        value: impl ToString,
    ) -> Result<(), Error> {
        if self.element(node).is_none() {
            return Err(Error::NotElement(node));
        }
        let in_scope = self.namespaces_in_scope(node);
        let name_id = self.intern_query_name(&in_scope, name, false)?;
        let value = value.to_string();
        if let Some(element) = self.element_mut(node) {
            element.set_attribute(name_id, value);
        }
        Ok(())
    }

    /// Iterate over `(name, value)` attribute pairs in document order,
    /// names rendered back to `prefix:name` form.
    pub fn attribute_pairs(&self, node: Node) -> impl Iterator<Item = (String, &str)> + '_ {
        let in_scope = self.namespaces_in_scope(node);
        let pairs: Vec<(String, &str)> = match self.element(node) {
            Some(element) => element
                .attributes()
                .iter()
                .map(|(name, value)| (self.render_name(&in_scope, *name, true), value.as_str()))
                .collect(),
            None => Vec::new(),
        };
        pairs.into_iter()
    }

    /// The inner text of a node, if any.
    pub fn text(&self, node: Node) -> Option<&str> {
        self.element(node).and_then(|element| element.text())
    }

    /// Set the inner text of a node; the value is coerced to a string.
    pub fn set_text(&mut self, node: Node, text: impl ToString) -> Result<(), Error> {
        let text = text.to_string();
        match self.element_mut(node) {
            Some(element) => {
                element.text = Some(text);
                Ok(())
            }
            None => Err(Error::NotElement(node)),
        }
    }

    /// The resolved name of an element node.
    pub fn node_name(&self, node: Node) -> Option<NameId> {
        self.element(node).map(|element| element.name())
    }

    /// The tag of a node in `name` or `prefix:name` form, rendered via
    /// the node's in-scope namespaces. A root node renders empty.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let name = grove.bind("pfx:name");
    /// let node = grove
    ///     .new_element(name)
    ///     .xmlns("pfx", "urn:example")
    ///     .build()?;
    /// assert_eq!(grove.tag_str(node), "pfx:name");
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn tag_str(&self, node: Node) -> String {
        match self.element(node) {
            Some(element) => {
                let in_scope = self.namespaces_in_scope(node);
                self.render_name(&in_scope, element.name(), false)
            }
            None => String::new(),
        }
    }

    /// The expanded tag of a node: `{uri}local` Clark notation, or the
    /// bare local name outside any namespace.
    pub fn expanded_tag_str(&self, node: Node) -> String {
        match self.element(node) {
            Some(element) => self.expanded_name_str(element.name()),
            None => String::new(),
        }
    }

    /// The effective `prefix: namespace` mapping of a node: every
    /// declaration on the node and its ancestors, nearer declarations
    /// winning.
    pub fn namespaces_in_scope(&self, node: Node) -> Prefixes {
        let mut chain: Vec<Node> = node
            .get()
            .ancestors(&self.arena)
            .map(Node::new)
            .collect();
        chain.reverse();
        let mut in_scope = Prefixes::default();
        for ancestor in chain {
            if let Value::Element(element) = self.value(ancestor) {
                for (prefix, namespace) in &element.namespaces {
                    in_scope.insert(*prefix, *namespace);
                }
            }
        }
        in_scope
    }

    /// Look up the namespace URI a prefix resolves to at this node.
    pub fn namespace_uri_for_prefix(&self, node: Node, prefix: &str) -> Option<&str> {
        let prefix_id = self.prefix(prefix)?;
        let namespace = self.namespaces_in_scope(node).get(&prefix_id).copied()?;
        Some(self.namespace_str(namespace))
    }
}
