use grove::{Error, Grove, Node};

fn sample_doc(grove: &mut Grove) -> Result<Node, Error> {
    let name = grove.bind("name");
    let sub = grove.bind("sub-name");
    let subsub = grove.bind("sub-sub-name");
    let other = grove.bind("other-name");

    grove
        .new_element(name)
        .attr("attr", "value")
        .with_children(|g| {
            g.new_element(sub)
                .attr("sub-attr", "sub value")
                .with_children(|g| {
                    g.new_element(subsub)
                        .ident_attr("sub_sub_attr", "sub sub value")
                        .build()?;
                    Ok(())
                })?;
            g.new_element(other).attr("other-attr", "other value").build()?;
            Ok(())
        })
}

#[test]
fn test_compact_serialization() -> Result<(), Error> {
    let mut grove = Grove::new();
    let root = sample_doc(&mut grove)?;
    assert_eq!(
        grove.to_string(root)?,
        "<name attr=\"value\"><sub-name sub-attr=\"sub value\">\
         <sub-sub-name sub-sub-attr=\"sub sub value\"/></sub-name>\
         <other-name other-attr=\"other value\"/></name>"
    );
    Ok(())
}

#[test]
fn test_pretty_serialization() -> Result<(), Error> {
    let mut grove = Grove::new();
    let root = sample_doc(&mut grove)?;
    insta::assert_snapshot!(grove.to_pretty_string(root)?, @r###"
    <name attr="value">
      <sub-name sub-attr="sub value">
        <sub-sub-name sub-sub-attr="sub sub value"/>
      </sub-name>
      <other-name other-attr="other value"/>
    </name>
    "###);
    Ok(())
}

#[test]
fn test_pretty_keeps_text_inline() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let sub = grove.bind("sub-name");

    let root = grove.new_element(name).with_children(|g| {
        g.new_element(sub).text("Some text").build()?;
        Ok(())
    })?;

    insta::assert_snapshot!(grove.to_pretty_string(root)?, @r###"
    <name>
      <sub-name>Some text</sub-name>
    </name>
    "###);
    Ok(())
}

#[test]
fn test_pretty_has_no_trailing_whitespace() -> Result<(), Error> {
    let mut grove = Grove::new();
    let root = sample_doc(&mut grove)?;
    let text = grove.to_pretty_string(root)?;
    assert_eq!(text, text.trim_end());
    Ok(())
}

#[test]
fn test_empty_element_is_self_closing() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let node = grove.new_element(name).build()?;
    assert_eq!(grove.to_string(node)?, "<name/>");
    assert_eq!(grove.to_pretty_string(node)?, "<name/>");
    Ok(())
}

#[test]
fn test_text_and_attribute_escaping() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let node = grove
        .new_element(name)
        .attr("attr", "a \"quoted\" <value> & more")
        .text("1 < 2 & 3 > 2")
        .build()?;
    assert_eq!(
        grove.to_string(node)?,
        "<name attr=\"a &quot;quoted&quot; &lt;value&gt; &amp; more\">\
         1 &lt; 2 &amp; 3 &gt; 2</name>"
    );
    Ok(())
}

#[test]
fn test_namespace_declarations_precede_attributes() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("pfx:name");
    let node = grove
        .new_element(name)
        .xmlns("pfx", "urn:some:namespace")
        .attr("attr", "value")
        .build()?;
    assert_eq!(
        grove.to_string(node)?,
        r#"<pfx:name xmlns:pfx="urn:some:namespace" attr="value"/>"#
    );
    Ok(())
}

#[test]
fn test_serializing_a_rooted_document() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("doc");
    let element = grove.new_element(name).attr("attr", "value").build()?;
    let root = grove.new_root(element)?;
    assert_eq!(grove.to_string(root)?, r#"<doc attr="value"/>"#);
    Ok(())
}

#[test]
fn test_serialize_to_writer() -> Result<(), Error> {
    let mut grove = Grove::new();
    let name = grove.bind("name");
    let node = grove.new_element(name).build()?;

    let mut buf = Vec::new();
    grove.serialize(node, &mut buf)?;
    assert_eq!(buf, b"<name/>");
    Ok(())
}
