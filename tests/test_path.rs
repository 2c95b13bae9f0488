use grove::{Error, Grove, Path, ValueType};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("a", "/a")]
#[case("*", "/*")]
#[case("", "/")]
fn test_single_step_display(#[case] tag: &str, #[case] expected: &str) {
    let grove = Grove::new();
    let path = Path::root(&grove).child(&grove, tag);
    assert_eq!(path.to_string(), expected);
}

#[test]
fn test_display_joins_segments() {
    let grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");
    assert_eq!(path.to_string(), "/a/b");
}

#[test]
fn test_descendant_shorthand() {
    let grove = Grove::new();
    let path = Path::root(&grove).descendant(&grove, "b");
    assert_eq!(path.to_string(), "//b");

    let nested = Path::root(&grove)
        .child(&grove, "a")
        .descendant(&grove, "b");
    assert_eq!(nested.to_string(), "/a//b");
}

#[test]
fn test_index_predicate_on_last_segment() -> Result<(), Error> {
    let grove = Grove::new();
    let path = Path::root(&grove)
        .child(&grove, "a")
        .child(&grove, "b")
        .at(2)?;
    assert_eq!(path.to_string(), "/a/b[2]");
    Ok(())
}

#[test]
fn test_attribute_predicates_merge() -> Result<(), Error> {
    let grove = Grove::new();
    let path = Path::root(&grove)
        .child(&grove, "a")
        .filter(&[("x", "y")])?;
    assert_eq!(path.to_string(), "/a[x='y']");

    // merging keeps earlier predicates and overwrites on conflict
    let merged = path.filter(&[("x", "z"), ("w", "v")])?;
    assert_eq!(merged.to_string(), "/a[x='z',w='v']");
    Ok(())
}

#[test]
fn test_index_and_attribute_predicates_coexist() -> Result<(), Error> {
    let grove = Grove::new();
    let path = Path::root(&grove)
        .child(&grove, "a")
        .filter(&[("x", "y")])?
        .at(2)?;
    assert_eq!(path.to_string(), "/a[x='y'][2]");

    // adding more predicates keeps the index
    let more = path.filter(&[("w", "v")])?;
    assert_eq!(more.to_string(), "/a[x='y',w='v'][2]");
    Ok(())
}

#[test]
fn test_predicates_need_an_element_segment() {
    let grove = Grove::new();
    let root = Path::root(&grove);
    assert!(root.at(0).is_err());
    assert!(root.filter(&[("x", "y")]).is_err());

    let deep = Path::root(&grove).child(&grove, "");
    assert!(deep.at(0).is_err());
}

#[test]
fn test_join_paths() -> Result<(), Error> {
    let grove = Grove::new();
    let rooted = Path::root(&grove).child(&grove, "a");
    let relative = Path::new(&grove, "b").child(&grove, "c");

    let joined = rooted.join(&relative)?;
    assert_eq!(joined.to_string(), "/a/b/c");
    Ok(())
}

#[test]
fn test_join_rooted_path_fails() {
    let grove = Grove::new();
    let rooted = Path::root(&grove).child(&grove, "a");
    let err = rooted.join(&Path::root(&grove)).unwrap_err();
    assert!(matches!(err, Error::RootedJoin));
}

#[test]
fn test_parent_path() {
    let grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");

    let parent = path.parent().expect("two segments remain");
    assert_eq!(parent.to_string(), "/a");
    let grandparent = parent.parent().expect("root remains");
    assert_eq!(grandparent.to_string(), "");
    assert!(grandparent.parent().is_none());

    assert!(Path::new(&grove, "a").parent().is_none());
}

#[test]
fn test_query_string() -> Result<(), Error> {
    let grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");
    assert_eq!(path.to_query_string()?, "*[name()='a']/*[name()='b']");
    Ok(())
}

#[test]
fn test_query_string_with_namespace() -> Result<(), Error> {
    let mut grove = Grove::new();
    let path = grove.with_namespaces(&[("pfx", "urn:x")], |g| {
        Ok(Path::root(g).child(g, "pfx:a"))
    })?;
    assert_eq!(
        path.to_query_string()?,
        "*[name()='a' and namespace-uri()='urn:x']"
    );
    Ok(())
}

#[test]
fn test_query_string_with_undeclared_prefix_fails() {
    let grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "pfx:a");
    assert!(matches!(
        path.to_query_string(),
        Err(Error::UnknownPrefix { .. })
    ));
}

#[test]
fn test_abstract_segments_are_not_concrete() {
    let grove = Grove::new();

    let wildcard = Path::root(&grove).child(&grove, "a").child(&grove, "*");
    assert!(matches!(
        wildcard.to_query_string(),
        Err(Error::NotConcrete(_))
    ));

    let deep = Path::root(&grove).descendant(&grove, "b");
    assert!(matches!(deep.to_query_string(), Err(Error::NotConcrete(_))));

    let mut grove = grove;
    assert!(wildcard.to_tree(&mut grove).is_err());
    assert!(deep.to_tree(&mut grove).is_err());
    assert!(Path::root(&grove).to_tree(&mut grove).is_err());
}

#[test]
fn test_to_tree_builds_nested_chain() -> Result<(), Error> {
    let mut grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");

    let top = path.to_tree(&mut grove)?;
    assert_eq!(grove.to_string(top)?, "<a><b/></a>");
    assert!(grove.parent(top).is_none());
    Ok(())
}

#[test]
fn test_to_tree_applies_predicates_and_namespaces() -> Result<(), Error> {
    let mut grove = Grove::new();
    let path = grove.with_namespaces(&[("pfx", "urn:x")], |g| {
        Ok(Path::root(g).child(g, "pfx:a"))
    })?;
    let path = path.filter(&[("attr", "value")])?;

    let top = path.to_tree(&mut grove)?;
    assert_eq!(grove.expanded_tag_str(top), "{urn:x}a");
    assert_eq!(grove.attribute(top, "attr")?, "value");
    Ok(())
}

#[test]
fn test_to_tree_attaches_to_open_parent() -> Result<(), Error> {
    let mut grove = Grove::new();
    let doc = grove.bind("doc");
    let path = Path::root(&grove).child(&grove, "a");

    let root = grove.new_element(doc).with_children(|g| {
        path.to_tree(g)?;
        Ok(())
    })?;

    assert_eq!(grove.to_string(root)?, "<doc><a/></doc>");
    Ok(())
}

#[test]
fn test_to_rooted_tree_wraps_in_document_root() -> Result<(), Error> {
    let mut grove = Grove::new();
    let path = Path::root(&grove).child(&grove, "a").child(&grove, "b");

    let top = path.to_rooted_tree(&mut grove)?;
    let root = grove.parent(top).expect("document root above the chain");
    assert_eq!(grove.value_type(root), ValueType::Root);
    assert_eq!(grove.document_element(root)?, top);
    Ok(())
}

#[test]
fn test_relative_path_without_root() {
    let grove = Grove::new();
    let path = Path::new(&grove, "a").child(&grove, "b");
    assert_eq!(path.to_string(), "a/b");
}

proptest! {
    #[test]
    fn test_display_reflects_tags(tags in proptest::collection::vec("[a-z][a-z0-9]{0,7}", 1..6)) {
        let grove = Grove::new();
        let mut path = Path::root(&grove);
        for tag in &tags {
            path = path.child(&grove, tag);
        }

        let display = path.to_string();
        let parts: Vec<&str> = display.split('/').collect();
        prop_assert_eq!(parts.len(), tags.len() + 1);
        prop_assert_eq!(parts[0], "");
        for (part, tag) in parts[1..].iter().zip(&tags) {
            prop_assert_eq!(*part, tag.as_str());
        }

        // parent drops exactly one trailing segment
        let parent = path.parent().expect("paths here have at least two segments");
        prop_assert!(display.starts_with(&parent.to_string()));
    }
}
