use crate::error::Error;
use crate::grovedata::Grove;
use crate::name::{parse_query_name, NameId, QueryName};
use crate::namespace::NamespaceId;
use crate::prefix::PrefixId;
use crate::value::Prefixes;

/// ## Creation and lookup of names, namespaces and prefixes
impl Grove {
    /// Look up a name without a namespace.
    pub fn name(&self, local: &str) -> Option<NameId> {
        self.name_ns(local, self.no_namespace_id)
    }

    /// Add a name without a namespace. If the name already exists,
    /// return its id.
    pub fn add_name(&mut self, local: &str) -> NameId {
        self.add_name_ns(local, self.no_namespace_id)
    }

    /// Look up a name in a namespace.
    pub fn name_ns(&self, local: &str, namespace: NamespaceId) -> Option<NameId> {
        self.name_lookup.lookup(local, namespace)
    }

    /// Add a name in a namespace. If the name already exists, return its
    /// id.
    pub fn add_name_ns(&mut self, local: &str, namespace: NamespaceId) -> NameId {
        self.name_lookup.intern(local, namespace)
    }

    /// Look up a namespace URI.
    pub fn namespace(&self, uri: &str) -> Option<NamespaceId> {
        self.namespace_lookup.lookup(uri)
    }

    /// Add a namespace URI. If the namespace already exists, return its
    /// id.
    pub fn add_namespace(&mut self, uri: &str) -> NamespaceId {
        self.namespace_lookup.intern(uri)
    }

    /// Look up a prefix.
    pub fn prefix(&self, prefix: &str) -> Option<PrefixId> {
        self.prefix_lookup.lookup(prefix)
    }

    /// Add a prefix. If the prefix already exists, return its id.
    pub fn add_prefix(&mut self, prefix: &str) -> PrefixId {
        self.prefix_lookup.intern(prefix)
    }

    /// The id of the empty namespace (no namespace).
    pub fn no_namespace(&self) -> NamespaceId {
        self.no_namespace_id
    }

    /// The id of the empty prefix (default namespace declarations).
    pub fn empty_prefix(&self) -> PrefixId {
        self.empty_prefix_id
    }

    /// The local part of a name.
    pub fn local_name_str(&self, name: NameId) -> &str {
        &self.name_lookup.get(name).local
    }

    /// The namespace a name lives in.
    pub fn namespace_for_name(&self, name: NameId) -> NamespaceId {
        self.name_lookup.get(name).namespace_id
    }

    /// The URI string for a namespace id.
    pub fn namespace_str(&self, namespace: NamespaceId) -> &str {
        self.namespace_lookup.get(namespace)
    }

    /// The string for a prefix id.
    pub fn prefix_str(&self, prefix: PrefixId) -> &str {
        self.prefix_lookup.get(prefix)
    }

    /// Render a name in expanded form: `{uri}local` Clark notation, or
    /// the bare local name outside any namespace.
    pub fn expanded_name_str(&self, name: NameId) -> String {
        let entry = self.name_lookup.get(name);
        if entry.namespace_id == self.no_namespace_id {
            entry.local.clone()
        } else {
            format!("{{{}}}{}", self.namespace_str(entry.namespace_id), entry.local)
        }
    }

    /// Resolve a name string (`local`, `prefix:local` or `{uri}local`)
    /// against a namespace mapping, without interning anything new.
    ///
    /// Returns `Ok(None)` when every part is known but no such name was
    /// ever created; an undeclared prefix is an error.
    pub(crate) fn lookup_query_name(
        &self,
        in_scope: &Prefixes,
        query: &str,
        default_ns: bool,
    ) -> Result<Option<NameId>, Error> {
        match parse_query_name(query) {
            QueryName::Clark { uri, local } => match self.namespace(uri) {
                Some(namespace) => Ok(self.name_ns(local, namespace)),
                None => Ok(None),
            },
            QueryName::Prefixed { prefix, local } => {
                let namespace = self.resolve_prefix(in_scope, prefix, query)?;
                Ok(self.name_ns(local, namespace))
            }
            QueryName::Local { local } => {
                if default_ns {
                    if let Some(namespace) = in_scope.get(&self.empty_prefix_id) {
                        return Ok(self.name_ns(local, *namespace));
                    }
                }
                Ok(self.name(local))
            }
        }
    }

    /// Resolve a name string against a namespace mapping, interning the
    /// resulting expanded name.
    pub(crate) fn intern_query_name(
        &mut self,
        in_scope: &Prefixes,
        query: &str,
        default_ns: bool,
    ) -> Result<NameId, Error> {
        match parse_query_name(query) {
            QueryName::Clark { uri, local } => {
                let namespace = self.add_namespace(uri);
                Ok(self.add_name_ns(local, namespace))
            }
            QueryName::Prefixed { prefix, local } => {
                let namespace = self.resolve_prefix(in_scope, prefix, query)?;
                Ok(self.add_name_ns(local, namespace))
            }
            QueryName::Local { local } => {
                if default_ns {
                    if let Some(namespace) = in_scope.get(&self.empty_prefix_id).copied() {
                        return Ok(self.add_name_ns(local, namespace));
                    }
                }
                Ok(self.add_name(local))
            }
        }
    }

    fn resolve_prefix(
        &self,
        in_scope: &Prefixes,
        prefix: &str,
        name: &str,
    ) -> Result<NamespaceId, Error> {
        self.prefix(prefix)
            .and_then(|prefix_id| in_scope.get(&prefix_id).copied())
            .ok_or_else(|| Error::UnknownPrefix {
                prefix: prefix.to_string(),
                name: name.to_string(),
            })
    }

    /// Render a resolved name back to `prefix:local` form using a
    /// namespace mapping. Falls back to Clark notation when no prefix in
    /// the mapping points at the name's namespace. Attributes never use
    /// the default (empty) prefix.
    pub(crate) fn render_name(
        &self,
        in_scope: &Prefixes,
        name: NameId,
        attribute: bool,
    ) -> String {
        let entry = self.name_lookup.get(name);
        if entry.namespace_id == self.no_namespace_id {
            return entry.local.clone();
        }
        for (prefix, namespace) in in_scope {
            if *namespace != entry.namespace_id {
                continue;
            }
            if *prefix == self.empty_prefix_id {
                if attribute {
                    continue;
                }
                return entry.local.clone();
            }
            return format!("{}:{}", self.prefix_str(*prefix), entry.local);
        }
        format!("{{{}}}{}", self.namespace_str(entry.namespace_id), entry.local)
    }
}
