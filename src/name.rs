use indexmap::IndexSet;

use crate::namespace::NamespaceId;

/// Id uniquely identifying an expanded name: a local name together with
/// its namespace URI. Two names are the same name exactly when both
/// parts match, so id equality is expanded-name equality.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameId(u32);

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) struct Name {
    pub(crate) local: String,
    pub(crate) namespace_id: NamespaceId,
}

#[derive(Debug, Default)]
pub(crate) struct NameLookup {
    names: IndexSet<Name, ahash::RandomState>,
}

impl NameLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern(&mut self, local: &str, namespace_id: NamespaceId) -> NameId {
        let name = Name {
            local: local.to_string(),
            namespace_id,
        };
        if let Some(index) = self.names.get_index_of(&name) {
            NameId(index as u32)
        } else {
            let (index, _) = self.names.insert_full(name);
            NameId(index as u32)
        }
    }

    pub(crate) fn lookup(&self, local: &str, namespace_id: NamespaceId) -> Option<NameId> {
        let name = Name {
            local: local.to_string(),
            namespace_id,
        };
        self.names.get_index_of(&name).map(|index| NameId(index as u32))
    }

    pub(crate) fn get(&self, id: NameId) -> &Name {
        &self.names[id.0 as usize]
    }
}

/// How a name string addresses a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryName<'a> {
    /// `{uri}local` Clark notation.
    Clark { uri: &'a str, local: &'a str },
    /// `prefix:local`, resolved against a namespace mapping.
    Prefixed { prefix: &'a str, local: &'a str },
    /// A bare local name.
    Local { local: &'a str },
}

pub(crate) fn parse_query_name(query: &str) -> QueryName<'_> {
    if let Some(rest) = query.strip_prefix('{') {
        if let Some((uri, local)) = rest.split_once('}') {
            return QueryName::Clark { uri, local };
        }
    }
    if let Some((prefix, local)) = query.split_once(':') {
        return QueryName::Prefixed { prefix, local };
    }
    QueryName::Local { local: query }
}

/// Convert an identifier-style name to XML style by replacing
/// underscores with hyphens.
///
/// ```rust
/// assert_eq!(grove::ident_to_xml_name("some_attr"), "some-attr");
/// ```
pub fn ident_to_xml_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Convert an XML name to identifier style by replacing hyphens with
/// underscores.
///
/// ```rust
/// assert_eq!(grove::xml_name_to_ident("some-attr"), "some_attr");
/// ```
pub fn xml_name_to_ident(name: &str) -> String {
    name.replace('-', "_")
}
