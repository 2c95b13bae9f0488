use indexmap::IndexSet;

/// Id uniquely identifying a namespace prefix. The empty prefix stands
/// for the default namespace.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrefixId(u32);

/// Interning table for prefixes; same scheme as
/// [`NamespaceLookup`](crate::namespace::NamespaceLookup).
#[derive(Debug, Default)]
pub(crate) struct PrefixLookup {
    prefixes: IndexSet<String, ahash::RandomState>,
}

impl PrefixLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, prefix: &str) -> PrefixId {
        if let Some(index) = self.prefixes.get_index_of(prefix) {
            PrefixId(index as u32)
        } else {
            let (index, _) = self.prefixes.insert_full(prefix.to_string());
            PrefixId(index as u32)
        }
    }

    pub(crate) fn lookup(&self, prefix: &str) -> Option<PrefixId> {
        self.prefixes
            .get_index_of(prefix)
            .map(|index| PrefixId(index as u32))
    }

    pub(crate) fn get(&self, id: PrefixId) -> &str {
        self.prefixes[id.0 as usize].as_str()
    }
}
