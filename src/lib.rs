#![forbid(unsafe_code)]
//! Grove is a library for building, querying and rendering XML trees
//! programmatically. A *grove* is the classic SGML term for the tree a
//! document parses into; this crate goes the other way and grows one
//! from code.
//!
//! All data lives in a [`Grove`]: an arena of nodes addressed by
//! lightweight [`Node`] handles, plus interned names, prefixes and
//! namespace URIs. Elements are created through tag bindings
//! ([`Grove::bind`]) and a fluent builder; scoped construction
//! ([`Grove::with_parent`], [`ElementBuilder::with_children`]) grows
//! nested structure, with namespace prefixes resolved against the
//! scoped context ([`Grove::with_namespaces`]) at the moment a node is
//! attached. Children are filtered into [`NodeList`]s, and [`Path`]
//! descriptors describe document locations that render to query strings
//! or materialize into trees.
//!
//! ```rust
//! use grove::Grove;
//!
//! let mut grove = Grove::new();
//! let doc = grove.bind("doc");
//! let entry = grove.bind("entry");
//!
//! let root = grove.new_element(doc).attr("version", "1").with_children(|g| {
//!     g.new_element(entry).ident_attr("entry_id", "a").build()?;
//!     g.new_element(entry).ident_attr("entry_id", "b").build()?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(
//!     grove.to_string(root)?,
//!     r#"<doc version="1"><entry entry-id="a"/><entry entry-id="b"/></doc>"#
//! );
//!
//! let entries = grove.select(root, &["entry"], &[]);
//! assert_eq!(entries.values(&grove, "entry-id")?, ["a", "b"]);
//! # Ok::<(), grove::Error>(())
//! ```
//!
//! Parsing markup text into a grove is out of scope, as are schema
//! validation and query execution; this crate is the construction side
//! only.

mod access;
mod compare;
mod creation;
mod error;
mod grovedata;
mod list;
mod name;
mod nameaccess;
mod namespace;
mod path;
mod prefix;
mod scope;
mod serialize;
mod value;

pub use creation::{ElementBuilder, TagBinding};
pub use error::Error;
pub use grovedata::{Grove, Node};
pub use list::NodeList;
pub use name::{ident_to_xml_name, xml_name_to_ident, NameId};
pub use namespace::NamespaceId;
pub use path::{Path, Segment, SegmentKind, SegmentNamespaces};
pub use prefix::PrefixId;
pub use value::{Attributes, Element, Prefixes, Value, ValueType};
