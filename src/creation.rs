use indexmap::IndexMap;

use crate::error::Error;
use crate::grovedata::{Grove, Node};
use crate::name::ident_to_xml_name;
use crate::value::{Attributes, Element, Prefixes, Value, ValueType};

/// A tag-bound element constructor produced by [`Grove::bind`].
///
/// Bindings are cached per tag string: binding the same tag twice yields
/// the identical id, so bindings can be compared and copied freely. A
/// binding carries exactly one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagBinding(u32);

impl TagBinding {
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The unresolved form of a tag: split into prefix and local name at
/// bind time, resolved to an expanded name only when an element is
/// built.
#[derive(Debug, Clone)]
pub(crate) struct TagDescriptor {
    pub(crate) tag: String,
    pub(crate) prefix: Option<String>,
    pub(crate) local: String,
}

/// ## Tag binding and element creation
impl Grove {
    /// Bind a tag string, in `name` or `prefix:name` form.
    ///
    /// The prefix is not resolved here; resolution happens when an
    /// element is built from the binding. Binds are cached:
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// assert_eq!(grove.bind("name"), grove.bind("name"));
    /// ```
    pub fn bind(&mut self, tag: &str) -> TagBinding {
        if let Some(binding) = self.binding_cache.get(tag) {
            return *binding;
        }
        let (prefix, local) = match tag.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
            None => (None, tag.to_string()),
        };
        let binding = TagBinding(self.bindings.len() as u32);
        self.bindings.push(TagDescriptor {
            tag: tag.to_string(),
            prefix,
            local,
        });
        self.binding_cache.insert(tag.to_string(), binding);
        binding
    }

    /// Bind a further tag onto an existing binding.
    ///
    /// A binding names exactly one tag, so this always fails with
    /// [`Error::DuplicateBinding`]:
    ///
    /// ```rust
    /// use grove::{Error, Grove};
    ///
    /// let mut grove = Grove::new();
    /// let name = grove.bind("name");
    /// assert!(matches!(
    ///     grove.rebind(name, "other"),
    ///     Err(Error::DuplicateBinding { .. })
    /// ));
    /// ```
    pub fn rebind(&self, binding: TagBinding, tag: &str) -> Result<TagBinding, Error> {
        Err(Error::DuplicateBinding {
            existing: self.binding_tag(binding).to_string(),
            new: tag.to_string(),
        })
    }

    /// The tag string a binding was created from.
    pub fn binding_tag(&self, binding: TagBinding) -> &str {
        &self.bindings[binding.index()].tag
    }

    /// Start building an element from a binding.
    ///
    /// The builder collects attributes, explicit namespace declarations
    /// and text; [`ElementBuilder::build`] resolves everything and, if a
    /// parent scope is active, attaches the new element as the open
    /// parent's last child.
    pub fn new_element(&mut self, binding: TagBinding) -> ElementBuilder<'_> {
        ElementBuilder {
            grove: self,
            binding,
            attributes: IndexMap::default(),
            xmlns: Vec::new(),
            text: None,
        }
    }

    /// Wrap a detached element under a fresh document root node.
    ///
    /// Returns the root node; the element becomes its single element
    /// child.
    pub fn new_root(&mut self, element: Node) -> Result<Node, Error> {
        if self.value_type(element) != ValueType::Element {
            return Err(Error::NotElement(element));
        }
        if self.parent(element).is_some() {
            return Err(Error::InvalidOperation(
                "cannot make an attached element a document element".to_string(),
            ));
        }
        let root = self.new_node(Value::Root);
        root.get().checked_append(element.get(), &mut self.arena)?;
        Ok(root)
    }

    pub(crate) fn new_root_node(&mut self) -> Node {
        self.new_node(Value::Root)
    }

    /// Shallow-copy a node: same tag, attributes, namespace declarations
    /// and text, no children. Attaches to the open parent like any other
    /// construction.
    pub fn duplicate(&mut self, node: Node) -> Result<Node, Error> {
        let value = match self.value(node) {
            Value::Element(element) => Value::Element(element.clone()),
            Value::Root => {
                return Err(Error::InvalidOperation(
                    "cannot duplicate the document root".to_string(),
                ))
            }
        };
        let copy = self.new_node(value);
        if let Some(parent) = self.open_parent() {
            self.attach(parent, copy)?;
        }
        Ok(copy)
    }

    /// Append `child` as the last child of `parent`, pruning namespace
    /// declarations that are already identically in scope at the parent.
    pub(crate) fn attach(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        if self.value_type(parent) == ValueType::Root {
            let has_element = self
                .children(parent)
                .any(|existing| self.value_type(existing) == ValueType::Element);
            if has_element {
                return Err(Error::InvalidOperation(
                    "document root already has a document element".to_string(),
                ));
            }
        }
        let parent_scope = self.namespaces_in_scope(parent);
        if let Value::Element(element) = self.value_mut(child) {
            element
                .namespaces
                .retain(|prefix, namespace| parent_scope.get(prefix) != Some(&*namespace));
        }
        parent.get().checked_append(child.get(), &mut self.arena)?;
        Ok(())
    }
}

/// Fluent builder for a single element.
///
/// Created by [`Grove::new_element`]. Attribute names given through
/// [`attr`](ElementBuilder::attr) are used as-is; names given through
/// [`ident_attr`](ElementBuilder::ident_attr) have underscores converted
/// to hyphens, mapping identifier-style names onto markup-style names.
pub struct ElementBuilder<'g> {
    grove: &'g mut Grove,
    binding: TagBinding,
    attributes: IndexMap<String, String, ahash::RandomState>,
    xmlns: Vec<(String, String)>,
    text: Option<String>,
}

impl<'g> ElementBuilder<'g> {
    /// Set an attribute. The name may be bare, `prefix:name`, or
    /// `{uri}name` Clark notation; prefixed names are resolved when the
    /// element is built.
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Set an attribute by identifier-style name: underscores in `name`
    /// become hyphens.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let name = grove.bind("name");
    /// let node = grove.new_element(name).ident_attr("some_attr", "v").build()?;
    /// assert_eq!(grove.attribute(node, "some-attr")?, "v");
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn ident_attr(self, name: &str, value: impl ToString) -> Self {
        let name = ident_to_xml_name(name);
        self.attr(name, value)
    }

    /// Set several attributes at once, names used as-is.
    pub fn attrs<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            self.attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Declare a namespace on this element. Explicit declarations win
    /// over the ambient namespace context on collision. The empty prefix
    /// declares the default namespace.
    pub fn xmlns(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.xmlns.push((prefix.into(), uri.into()));
        self
    }

    /// Set the inner text of the element.
    pub fn text(mut self, text: impl ToString) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Resolve and create the element.
    ///
    /// The effective namespace mapping is the active context overlaid
    /// with the explicit declarations; the tag prefix and every prefixed
    /// attribute name must resolve against it or the build fails with
    /// [`Error::UnknownPrefix`]. If a parent scope is active the element
    /// is attached as the open parent's last child.
    pub fn build(self) -> Result<Node, Error> {
        let ElementBuilder {
            grove,
            binding,
            attributes,
            xmlns,
            text,
        } = self;
        Self::build_in(grove, binding, attributes, xmlns, text)
    }

    /// Build the element, then run `f` with it as the open parent.
    ///
    /// Returns the element itself, so a whole subtree reads as one
    /// expression:
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let doc = grove.bind("doc");
    /// let item = grove.bind("item");
    /// let root = grove.new_element(doc).with_children(|g| {
    ///     g.new_element(item).attr("n", 1).build()?;
    ///     g.new_element(item).attr("n", 2).build()?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(grove.child_count(root), 2);
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn with_children<T, F>(self, f: F) -> Result<Node, Error>
    where
        F: FnOnce(&mut Grove) -> Result<T, Error>,
    {
        let ElementBuilder {
            grove,
            binding,
            attributes,
            xmlns,
            text,
        } = self;
        let node = Self::build_in(&mut *grove, binding, attributes, xmlns, text)?;
        grove.with_parent(node, f)?;
        Ok(node)
    }

    fn build_in(
        grove: &mut Grove,
        binding: TagBinding,
        attributes: IndexMap<String, String, ahash::RandomState>,
        xmlns: Vec<(String, String)>,
        text: Option<String>,
    ) -> Result<Node, Error> {
        let mut effective: Prefixes = grove.active_namespaces();
        for (prefix, uri) in &xmlns {
            let prefix_id = grove.prefix_lookup.intern(prefix);
            let namespace_id = grove.namespace_lookup.intern(uri);
            effective.insert(prefix_id, namespace_id);
        }

        let descriptor = grove.bindings[binding.index()].clone();
        let name = match descriptor.prefix.as_deref() {
            Some(prefix) => {
                let namespace = grove
                    .prefix(prefix)
                    .and_then(|prefix_id| effective.get(&prefix_id).copied())
                    .ok_or_else(|| Error::UnknownPrefix {
                        prefix: prefix.to_string(),
                        name: descriptor.tag.clone(),
                    })?;
                grove.add_name_ns(&descriptor.local, namespace)
            }
            None => {
                // a bare tag joins a declared default namespace
                match effective.get(&grove.empty_prefix_id).copied() {
                    Some(namespace) => grove.add_name_ns(&descriptor.local, namespace),
                    None => grove.add_name(&descriptor.local),
                }
            }
        };

        let mut resolved = Attributes::default();
        for (key, value) in attributes {
            // attribute names never join the default namespace
            let attr_name = grove.intern_query_name(&effective, &key, false)?;
            resolved.insert(attr_name, value);
        }

        let mut element = Element::new(name);
        element.attributes = resolved;
        element.namespaces = effective;
        element.text = text;

        let node = grove.new_node(Value::Element(element));
        if let Some(parent) = grove.open_parent() {
            grove.attach(parent, node)?;
        }
        Ok(node)
    }
}
