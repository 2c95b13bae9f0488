use crate::grovedata::Node;

/// Errors reported by tree construction, access and path operations.
///
/// Every error is raised synchronously at the point of detection; there
/// are no transient failure modes anywhere in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tag binding carries exactly one tag; binding a second tag onto
    /// it is refused.
    #[error("binding already carries tag {existing:?}, cannot bind {new:?}")]
    DuplicateBinding {
        /// The tag the binding already carries.
        existing: String,
        /// The tag that was refused.
        new: String,
    },
    /// A namespace prefix was used without a declaration in scope.
    #[error("unknown namespace prefix {prefix:?} in name {name:?}")]
    UnknownPrefix {
        /// The undeclared prefix.
        prefix: String,
        /// The full qualified name the prefix appeared in.
        name: String,
    },
    /// An attribute was read that does not exist on the target node (or,
    /// for bulk access, on every node of the list).
    #[error("missing attribute {0:?}")]
    MissingAttribute(String),
    /// The right-hand side of a path concatenation starts at the
    /// document root.
    #[error("cannot append a path that starts at the document root")]
    RootedJoin,
    /// A root, wildcard or deep-descendant segment cannot be turned into
    /// concrete markup or a query string.
    #[error("path segment {0:?} cannot be materialized")]
    NotConcrete(String),
    /// The operation violates the tree structure, for instance adding a
    /// second document element under a root node.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// The node is not an element.
    #[error("not an element: {0:?}")]
    NotElement(Node),
    /// Writing serialized output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The arena refused a structural change.
    #[error("arena error: {0}")]
    Arena(#[from] indextree::NodeError),
}
