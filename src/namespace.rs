use indexmap::IndexSet;

/// Id uniquely identifying a namespace URI.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NamespaceId(u32);

/// Interning table for namespace URIs. Insertion indices are stable, so
/// they double as ids: interning the same URI twice yields the same id.
#[derive(Debug, Default)]
pub(crate) struct NamespaceLookup {
    uris: IndexSet<String, ahash::RandomState>,
}

impl NamespaceLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, uri: &str) -> NamespaceId {
        if let Some(index) = self.uris.get_index_of(uri) {
            NamespaceId(index as u32)
        } else {
            let (index, _) = self.uris.insert_full(uri.to_string());
            NamespaceId(index as u32)
        }
    }

    pub(crate) fn lookup(&self, uri: &str) -> Option<NamespaceId> {
        self.uris.get_index_of(uri).map(|index| NamespaceId(index as u32))
    }

    pub(crate) fn get(&self, id: NamespaceId) -> &str {
        self.uris[id.0 as usize].as_str()
    }
}
