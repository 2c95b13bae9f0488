use std::fmt;

use indexmap::IndexMap;

use crate::error::Error;
use crate::grovedata::{Grove, Node};

/// A `prefix: URI` mapping snapshot carried by a path segment. Paths
/// are plain data, independent of any [`Grove`], so the snapshot stores
/// strings.
pub type SegmentNamespaces = IndexMap<String, String, ahash::RandomState>;

/// The kind of a path segment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// The path root; only ever the first segment.
    Root,
    /// Matches descendants at any depth, like `//` in query languages.
    Deep,
    /// Matches any single element.
    Any,
    /// Matches one exact tag, in `name` or `prefix:name` form.
    Tagged(String),
}

/// One segment of a [`Path`]: a kind plus optional index and
/// attribute-value predicates and a namespace snapshot. Root and Deep
/// segments never carry predicates.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    kind: SegmentKind,
    index: Option<usize>,
    attributes: IndexMap<String, String, ahash::RandomState>,
    xmlns: SegmentNamespaces,
}

impl Segment {
    fn new(kind: SegmentKind, xmlns: SegmentNamespaces) -> Self {
        Segment {
            kind,
            index: None,
            attributes: IndexMap::default(),
            xmlns,
        }
    }

    /// The kind of this segment.
    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// The exact tag, for a tagged segment.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Tagged(tag) => Some(tag),
            _ => None,
        }
    }

    /// The index predicate, if one is set.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The attribute-value predicates.
    pub fn attributes(&self) -> &IndexMap<String, String, ahash::RandomState> {
        &self.attributes
    }

    /// The namespace snapshot of this segment.
    pub fn xmlns(&self) -> &SegmentNamespaces {
        &self.xmlns
    }

    fn is_element(&self) -> bool {
        matches!(self.kind, SegmentKind::Any | SegmentKind::Tagged(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SegmentKind::Root | SegmentKind::Deep => {}
            SegmentKind::Any => write!(f, "*")?,
            SegmentKind::Tagged(tag) => write!(f, "{}", tag)?,
        }
        if !self.attributes.is_empty() {
            let predicates: Vec<String> = self
                .attributes
                .iter()
                .map(|(name, value)| format!("{}='{}'", name, value))
                .collect();
            write!(f, "[{}]", predicates.join(","))?;
        }
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// An immutable sequence of path segments describing a location in a
/// document: either query-language-like (rendered by
/// [`to_query_string`](Path::to_query_string)) or constructive
/// (materialized by [`to_tree`](Path::to_tree)).
///
/// A path starts either at the root ([`Path::root`]) or with a first
/// non-root segment ([`Path::new`]); every operation returns a new path.
/// Path equality is deliberately not defined.
///
/// ```rust
/// use grove::{Grove, Path};
///
/// let grove = Grove::new();
/// let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");
/// assert_eq!(path.to_string(), "/a/b");
/// assert_eq!(path.to_query_string()?, "*[name()='a']/*[name()='b']");
/// # Ok::<(), grove::Error>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// A bare root path. The segment snapshots the ambient namespace
    /// context active in `grove`.
    pub fn root(grove: &Grove) -> Path {
        Path {
            segments: vec![Segment::new(SegmentKind::Root, ambient_snapshot(grove))],
        }
    }

    /// A single-segment path that composes onto a parent path later.
    ///
    /// The empty tag is a deep-descendant segment, `*` a wildcard, and
    /// anything else an exact tag.
    pub fn new(grove: &Grove, tag: &str) -> Path {
        Self::new_ns(grove, tag, &[])
    }

    /// Like [`Path::new`] with an explicit namespace override, which
    /// wins over the ambient context.
    pub fn new_ns(grove: &Grove, tag: &str, xmlns: &[(&str, &str)]) -> Path {
        Path {
            segments: vec![make_segment(grove, None, tag, xmlns)],
        }
    }

    /// Append a child segment: the `/` operation.
    pub fn child(&self, grove: &Grove, tag: &str) -> Path {
        self.child_ns(grove, tag, &[])
    }

    /// Like [`child`](Path::child) with an explicit namespace override.
    pub fn child_ns(&self, grove: &Grove, tag: &str, xmlns: &[(&str, &str)]) -> Path {
        let mut segments = self.segments.clone();
        segments.push(make_segment(grove, Some(self), tag, xmlns));
        Path { segments }
    }

    /// Append a deep-descendant segment followed by a tag segment: the
    /// `//` operation.
    pub fn descendant(&self, grove: &Grove, tag: &str) -> Path {
        self.child(grove, "").child(grove, tag)
    }

    /// A new path with the index predicate `index` on the last segment.
    /// Attribute predicates on that segment are preserved.
    pub fn at(&self, index: usize) -> Result<Path, Error> {
        let mut path = self.clone();
        match path.segments.last_mut() {
            Some(segment) if segment.is_element() => {
                segment.index = Some(index);
                Ok(path)
            }
            _ => Err(Error::InvalidOperation(
                "an index predicate requires an element segment".to_string(),
            )),
        }
    }

    /// A new path with `predicates` merged into the last segment's
    /// attribute predicates, new entries winning on conflict. The index
    /// predicate is preserved.
    pub fn filter(&self, predicates: &[(&str, &str)]) -> Result<Path, Error> {
        let mut path = self.clone();
        match path.segments.last_mut() {
            Some(segment) if segment.is_element() => {
                for (name, value) in predicates {
                    segment
                        .attributes
                        .insert(name.to_string(), value.to_string());
                }
                Ok(path)
            }
            _ => Err(Error::InvalidOperation(
                "attribute predicates require an element segment".to_string(),
            )),
        }
    }

    /// Concatenate two paths. Fails with [`Error::RootedJoin`] if
    /// `other` starts at the document root.
    pub fn join(&self, other: &Path) -> Result<Path, Error> {
        if matches!(
            other.segments.first().map(Segment::kind),
            Some(SegmentKind::Root)
        ) {
            return Err(Error::RootedJoin);
        }
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Ok(Path { segments })
    }

    /// The path over all but the last segment, or `None` when only one
    /// segment remains.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The namespace snapshot of the last segment.
    pub fn xmlns(&self) -> &SegmentNamespaces {
        // paths always hold at least one segment
        &self.segments[self.segments.len() - 1].xmlns
    }

    /// Materialize the path as a chain of nested elements, one per
    /// segment, and return the top element.
    ///
    /// A leading root segment is skipped; every remaining segment must
    /// be an exact tag, or the path fails with [`Error::NotConcrete`].
    /// Segment attribute predicates become attributes, the namespace
    /// snapshots become declarations, and construction goes through the
    /// ordinary factory and parent scopes, so the result attaches to an
    /// open parent like any other built element.
    pub fn to_tree(&self, grove: &mut Grove) -> Result<Node, Error> {
        let segments = self.concrete_segments()?;
        build_chain(grove, segments)
    }

    /// Like [`to_tree`](Path::to_tree), but the chain is created under a
    /// fresh document root. Returns the top element; its parent is the
    /// root node.
    pub fn to_rooted_tree(&self, grove: &mut Grove) -> Result<Node, Error> {
        let segments = self.concrete_segments()?;
        let root = grove.new_root_node();
        grove.with_parent(root, |g| build_chain(g, segments))
    }

    /// Render the path as a query-language string: one
    /// `*[name()='tag']` node test per segment, with
    /// ` and namespace-uri()='uri'` added for prefixed tags, joined by
    /// `/`. Same segment requirements as [`to_tree`](Path::to_tree).
    pub fn to_query_string(&self) -> Result<String, Error> {
        let segments = self.concrete_segments()?;
        let mut tests = Vec::with_capacity(segments.len());
        for segment in segments {
            let tag = match &segment.kind {
                SegmentKind::Tagged(tag) => tag,
                _ => return Err(Error::NotConcrete(segment.to_string())),
            };
            let mut predicate = match tag.split_once(':') {
                Some((prefix, local)) => {
                    let uri =
                        segment
                            .xmlns
                            .get(prefix)
                            .ok_or_else(|| Error::UnknownPrefix {
                                prefix: prefix.to_string(),
                                name: tag.clone(),
                            })?;
                    format!("name()='{}' and namespace-uri()='{}'", local, uri)
                }
                None => format!("name()='{}'", tag),
            };
            predicate.insert(0, '[');
            predicate.push(']');
            tests.push(format!("*{}", predicate));
        }
        Ok(tests.join("/"))
    }

    fn concrete_segments(&self) -> Result<&[Segment], Error> {
        let segments = match self.segments.first().map(Segment::kind) {
            Some(SegmentKind::Root) => &self.segments[1..],
            _ => &self.segments[..],
        };
        if segments.is_empty() {
            return Err(Error::InvalidOperation(
                "cannot materialize a bare root path".to_string(),
            ));
        }
        for segment in segments {
            if !matches!(segment.kind, SegmentKind::Tagged(_)) {
                return Err(Error::NotConcrete(segment.to_string()));
            }
        }
        Ok(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| segment.to_string())
            .collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// Segment namespace snapshot: ambient context, overlaid with the
/// parent path's snapshot, overlaid with the explicit override.
fn make_segment(grove: &Grove, parent: Option<&Path>, tag: &str, xmlns: &[(&str, &str)]) -> Segment {
    let mut snapshot = ambient_snapshot(grove);
    if let Some(parent) = parent {
        for (prefix, uri) in parent.xmlns() {
            snapshot.insert(prefix.clone(), uri.clone());
        }
    }
    for (prefix, uri) in xmlns {
        snapshot.insert(prefix.to_string(), uri.to_string());
    }
    let kind = match tag {
        "" => SegmentKind::Deep,
        "*" => SegmentKind::Any,
        tag => SegmentKind::Tagged(tag.to_string()),
    };
    Segment::new(kind, snapshot)
}

fn ambient_snapshot(grove: &Grove) -> SegmentNamespaces {
    let mut snapshot = SegmentNamespaces::default();
    if let Some(top) = grove.ns_stack.last() {
        for (prefix, namespace) in top {
            snapshot.insert(
                grove.prefix_str(*prefix).to_string(),
                grove.namespace_str(*namespace).to_string(),
            );
        }
    }
    snapshot
}

fn build_chain(grove: &mut Grove, segments: &[Segment]) -> Result<Node, Error> {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            return Err(Error::InvalidOperation(
                "cannot materialize an empty path".to_string(),
            ))
        }
    };
    let tag = match &first.kind {
        SegmentKind::Tagged(tag) => tag.clone(),
        _ => return Err(Error::NotConcrete(first.to_string())),
    };
    let binding = grove.bind(&tag);
    let mut builder = grove.new_element(binding);
    for (prefix, uri) in &first.xmlns {
        builder = builder.xmlns(prefix.clone(), uri.clone());
    }
    for (name, value) in &first.attributes {
        builder = builder.attr(name.clone(), value);
    }
    if rest.is_empty() {
        builder.build()
    } else {
        builder.with_children(|g| build_chain(g, rest).map(|_| ()))
    }
}
