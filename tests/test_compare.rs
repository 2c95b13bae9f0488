use grove::{Error, Grove, Node};

fn build_tree(grove: &mut Grove, uri: &str, attr_value: &str) -> Result<Node, Error> {
    let name = grove.bind("name");
    let prefixed_sub = grove.bind("pfx:sub-name");
    let other_sub = grove.bind("other-name");

    grove.with_namespaces(&[("pfx", uri)], |g| {
        g.new_element(name).with_children(|g| {
            g.new_element(prefixed_sub).build()?;
            g.new_element(other_sub).attr("attr", attr_value).build()?;
            Ok(())
        })
    })
}

#[test]
fn test_independently_built_trees_compare_equal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let a = build_tree(&mut grove, "urn:some:namespace", "value")?;
    let b = build_tree(&mut grove, "urn:some:namespace", "value")?;
    assert!(grove.deep_equal(a, b));
    Ok(())
}

#[test]
fn test_attribute_value_difference_is_unequal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let a = build_tree(&mut grove, "urn:some:namespace", "value")?;
    let b = build_tree(&mut grove, "urn:some:namespace", "other value")?;
    assert!(!grove.deep_equal(a, b));
    Ok(())
}

#[test]
fn test_namespace_uri_difference_is_unequal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let a = build_tree(&mut grove, "urn:some:namespace", "value")?;
    let b = build_tree(&mut grove, "urn:other:namespace", "value")?;
    assert!(!grove.deep_equal(a, b));
    Ok(())
}

#[test]
fn test_ambient_and_explicit_declarations_compare_equal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let ambient = build_tree(&mut grove, "urn:some:namespace", "value")?;

    let name = grove.bind("name");
    let prefixed_sub = grove.bind("pfx:sub-name");
    let other_sub = grove.bind("other-name");
    let explicit = grove
        .new_element(name)
        .xmlns("pfx", "urn:some:namespace")
        .with_children(|g| {
            g.new_element(prefixed_sub).build()?;
            g.new_element(other_sub).attr("attr", "value").build()?;
            Ok(())
        })?;

    assert!(grove.deep_equal(ambient, explicit));
    Ok(())
}

#[test]
fn test_attribute_order_is_irrelevant() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let a = grove
        .new_element(name)
        .attr("foo", "FOO")
        .attr("bar", "BAR")
        .build()?;
    let b = grove
        .new_element(name)
        .attr("bar", "BAR")
        .attr("foo", "FOO")
        .build()?;
    assert!(grove.deep_equal(a, b));
    Ok(())
}

#[test]
fn test_extra_attribute_is_unequal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let a = grove.new_element(name).attr("foo", "FOO").build()?;
    let b = grove
        .new_element(name)
        .attr("foo", "FOO")
        .attr("bar", "BAR")
        .build()?;
    assert!(!grove.deep_equal(a, b));
    Ok(())
}

#[test]
fn test_child_order_matters() -> Result<(), Error> {
    let mut grove = Grove::new();
    let doc = grove.bind("doc");
    let a = grove.bind("a");
    let b = grove.bind("b");

    let first = grove.new_element(doc).with_children(|g| {
        g.new_element(a).build()?;
        g.new_element(b).build()?;
        Ok(())
    })?;
    let second = grove.new_element(doc).with_children(|g| {
        g.new_element(b).build()?;
        g.new_element(a).build()?;
        Ok(())
    })?;

    assert!(!grove.deep_equal(first, second));
    Ok(())
}

#[test]
fn test_different_tags_are_unequal() -> Result<(), Error> {
    let mut grove = Grove::new();
    let a = grove.bind("a");
    let b = grove.bind("b");
    let first = grove.new_element(a).build()?;
    let second = grove.new_element(b).build()?;
    assert!(!grove.deep_equal(first, second));
    Ok(())
}

#[test]
fn test_list_equality_is_elementwise() -> Result<(), Error> {
    let mut grove = Grove::new();
    let doc = grove.bind("doc");
    let item = grove.bind("item");

    let first = grove.new_element(doc).with_children(|g| {
        g.new_element(item).attr("attr", "value").build()?;
        g.new_element(item).attr("attr", "other").build()?;
        Ok(())
    })?;
    let second = grove.new_element(doc).with_children(|g| {
        g.new_element(item).attr("attr", "value").build()?;
        g.new_element(item).attr("attr", "other").build()?;
        Ok(())
    })?;

    let list_a = grove.child_list(first);
    let list_b = grove.child_list(second);
    assert!(grove.deep_equal_list(&list_a, &list_b));

    let shorter = list_b.slice(..1);
    assert!(!grove.deep_equal_list(&list_a, &shorter));

    grove.set_attribute(list_b.get(1).expect("second item"), "attr", "changed")?;
    assert!(!grove.deep_equal_list(&list_a, &list_b));
    Ok(())
}
