use indexmap::IndexMap;

use crate::name::NameId;
use crate::namespace::NamespaceId;
use crate::prefix::PrefixId;

/// A map of [`NameId`] to attribute value, in document order.
pub type Attributes = IndexMap<NameId, String, ahash::RandomState>;
/// A map of [`PrefixId`] to [`NamespaceId`] for namespace declarations.
pub type Prefixes = IndexMap<PrefixId, NamespaceId, ahash::RandomState>;

/// The type of a node value, for checks that do not need the value
/// itself.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// Document root that holds the document element.
    Root,
    /// Element with a name, attributes, namespace declarations and
    /// optional inner text.
    Element,
}

/// A node value in the tree.
#[derive(Debug, Clone)]
pub enum Value {
    /// Document root. Not the same as the document element, which is its
    /// single element child.
    Root,
    /// Element node.
    Element(Element),
}

impl Value {
    /// Returns the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Root => ValueType::Root,
            Value::Element(_) => ValueType::Element,
        }
    }
}

/// An XML element value: resolved expanded name, attributes in document
/// order, the namespace declarations this element carries, and optional
/// inner text.
///
/// Example: `<foo bar="baz">hello</foo>`.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) name: NameId,
    pub(crate) attributes: Attributes,
    pub(crate) namespaces: Prefixes,
    pub(crate) text: Option<String>,
}

impl Element {
    pub(crate) fn new(name: NameId) -> Self {
        Element {
            name,
            attributes: Attributes::default(),
            namespaces: Prefixes::default(),
            text: None,
        }
    }

    /// The resolved name of the element.
    pub fn name(&self) -> NameId {
        self.name
    }

    /// The attributes of the element, in document order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute value by resolved name.
    pub fn get_attribute(&self, name: NameId) -> Option<&str> {
        self.attributes.get(&name).map(|value| value.as_str())
    }

    /// Set an attribute value by resolved name.
    pub fn set_attribute<S: Into<String>>(&mut self, name: NameId, value: S) {
        self.attributes.insert(name, value.into());
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, name: NameId) {
        self.attributes.shift_remove(&name);
    }

    /// The namespace declarations carried by this element. Declarations
    /// inherited from ancestors are not included; see
    /// [`Grove::namespaces_in_scope`](crate::Grove::namespaces_in_scope)
    /// for the effective mapping.
    pub fn prefixes(&self) -> &Prefixes {
        &self.namespaces
    }

    /// The inner text of the element, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
