use indextree::{Arena, NodeId};

use ahash::HashMap;

use crate::creation::{TagBinding, TagDescriptor};
use crate::name::NameLookup;
use crate::namespace::{NamespaceId, NamespaceLookup};
use crate::prefix::{PrefixId, PrefixLookup};
use crate::value::{Prefixes, Value};

/// A node in the tree.
///
/// This is a lightweight handle and can be copied freely. Nodes are
/// owned by the [`Grove`] they were created in; the handle itself never
/// keeps anything alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// The `Grove` struct manages all tree data in your program: the arena
/// of nodes, the interned names, prefixes and namespace URIs, the
/// tag-binding cache, and the scoped construction state (the namespace
/// context stack and the open-parent stack).
///
/// It is the execution context every operation is threaded through, so
/// scoped construction needs no global or thread-local state. Grove is
/// implemented in several sections focusing on different aspects of
/// building, accessing and rendering tree data.
pub struct Grove {
    pub(crate) arena: Arena<Value>,
    pub(crate) name_lookup: NameLookup,
    pub(crate) namespace_lookup: NamespaceLookup,
    pub(crate) prefix_lookup: PrefixLookup,
    pub(crate) no_namespace_id: NamespaceId,
    pub(crate) empty_prefix_id: PrefixId,
    pub(crate) bindings: Vec<TagDescriptor>,
    pub(crate) binding_cache: HashMap<String, TagBinding>,
    pub(crate) ns_stack: Vec<Prefixes>,
    pub(crate) parent_stack: Vec<Node>,
}

impl Grove {
    /// Create a new `Grove` instance.
    pub fn new() -> Self {
        let mut namespace_lookup = NamespaceLookup::new();
        let no_namespace_id = namespace_lookup.intern("");
        let mut prefix_lookup = PrefixLookup::new();
        let empty_prefix_id = prefix_lookup.intern("");
        Grove {
            arena: Arena::new(),
            name_lookup: NameLookup::new(),
            namespace_lookup,
            prefix_lookup,
            no_namespace_id,
            empty_prefix_id,
            bindings: Vec::new(),
            binding_cache: HashMap::default(),
            ns_stack: Vec::new(),
            parent_stack: Vec::new(),
        }
    }

    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena.new_node(value))
    }
}

impl Default for Grove {
    fn default() -> Self {
        Self::new()
    }
}
