use crate::error::Error;
use crate::grovedata::{Grove, Node};
use crate::value::Prefixes;

/// ## Scoped construction state
///
/// Namespace activation and open-parent scopes are closure-based: the
/// frame is pushed before the closure runs and restored before its
/// result, success or error, propagates out. The stacks follow strict
/// LIFO discipline; a depth mismatch on exit means internal state was
/// corrupted and is a panic, not a recoverable error.
impl Grove {
    /// Activate a `prefix: URI` mapping for the duration of `f`.
    ///
    /// The mapping is merged over the previously active one, its own
    /// entries winning on collision, and is visible to every element
    /// built inside the closure. Scopes nest to arbitrary depth.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let node = grove.with_namespaces(&[("pfx", "urn:example")], |g| {
    ///     let name = g.bind("pfx:name");
    ///     g.new_element(name).build()
    /// })?;
    /// assert_eq!(grove.tag_str(node), "pfx:name");
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn with_namespaces<T, F>(&mut self, mapping: &[(&str, &str)], f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Grove) -> Result<T, Error>,
    {
        let mut frame = self.active_namespaces();
        for (prefix, uri) in mapping {
            let prefix_id = self.prefix_lookup.intern(prefix);
            let namespace_id = self.namespace_lookup.intern(uri);
            frame.insert(prefix_id, namespace_id);
        }
        self.push_ns_frame(frame, f)
    }

    /// Open `parent` for the duration of `f`: every element built inside
    /// the closure is appended as its last child, and the parent's
    /// in-scope namespaces overlay the active mapping.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let doc = grove.bind("doc");
    /// let item = grove.bind("item");
    /// let root = grove.new_element(doc).build()?;
    /// grove.with_parent(root, |g| {
    ///     g.new_element(item).build()?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(grove.child_count(root), 1);
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn with_parent<T, F>(&mut self, parent: Node, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Grove) -> Result<T, Error>,
    {
        let scope = self.namespaces_in_scope(parent);
        let mut frame = self.active_namespaces();
        frame.extend(scope);
        self.parent_stack.push(parent);
        let depth = self.parent_stack.len();
        let result = self.push_ns_frame(frame, f);
        assert_eq!(
            self.parent_stack.len(),
            depth,
            "open-parent stack corrupted"
        );
        self.parent_stack.pop();
        result
    }

    /// The innermost open parent, if a parent scope is active.
    pub fn open_parent(&self) -> Option<Node> {
        self.parent_stack.last().copied()
    }

    /// The currently active namespace mapping: the top of the context
    /// stack, or empty if no scope is active.
    pub(crate) fn active_namespaces(&self) -> Prefixes {
        self.ns_stack.last().cloned().unwrap_or_default()
    }

    fn push_ns_frame<T, F>(&mut self, frame: Prefixes, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Grove) -> Result<T, Error>,
    {
        self.ns_stack.push(frame);
        let depth = self.ns_stack.len();
        let result = f(self);
        assert_eq!(
            self.ns_stack.len(),
            depth,
            "namespace context stack corrupted"
        );
        self.ns_stack.pop();
        result
    }
}
