use std::borrow::Cow;
use std::io::Write;

use crate::error::Error;
use crate::grovedata::{Grove, Node};
use crate::value::Value;

/// Escape markup-significant characters with the five predefined
/// entities. Borrows the input unchanged when nothing needs escaping.
pub(crate) fn escape(content: &str) -> Cow<'_, str> {
    let mut result = String::new();
    let mut entity_seen = false;
    for c in content.chars() {
        match c {
            '&' => {
                entity_seen = true;
                result.push_str("&amp;")
            }
            '\'' => {
                entity_seen = true;
                result.push_str("&apos;")
            }
            '>' => {
                entity_seen = true;
                result.push_str("&gt;")
            }
            '<' => {
                entity_seen = true;
                result.push_str("&lt;")
            }
            '"' => {
                entity_seen = true;
                result.push_str("&quot;")
            }
            _ => result.push(c),
        }
    }

    if !entity_seen {
        content.into()
    } else {
        result.into()
    }
}

struct Serializer<'a, W: Write> {
    grove: &'a Grove,
    w: &'a mut W,
    pretty: bool,
}

impl<'a, W: Write> Serializer<'a, W> {
    fn write_node(&mut self, node: Node, depth: usize) -> Result<(), Error> {
        match self.grove.value(node) {
            Value::Root => {
                for child in self.grove.children(node) {
                    self.write_node(child, depth)?;
                }
            }
            Value::Element(element) => {
                if self.pretty {
                    write!(self.w, "{}", "  ".repeat(depth))?;
                }
                let in_scope = self.grove.namespaces_in_scope(node);
                let tag = self.grove.render_name(&in_scope, element.name(), false);
                write!(self.w, "<{}", tag)?;
                for (prefix, namespace) in &element.namespaces {
                    let uri = escape(self.grove.namespace_str(*namespace));
                    if *prefix == self.grove.empty_prefix_id {
                        write!(self.w, " xmlns=\"{}\"", uri)?;
                    } else {
                        write!(
                            self.w,
                            " xmlns:{}=\"{}\"",
                            self.grove.prefix_str(*prefix),
                            uri
                        )?;
                    }
                }
                for (name, value) in element.attributes() {
                    let name = self.grove.render_name(&in_scope, *name, true);
                    write!(self.w, " {}=\"{}\"", name, escape(value))?;
                }
                let has_children = self.grove.children(node).next().is_some();
                let text = element.text();
                if text.is_none() && !has_children {
                    write!(self.w, "/>")?;
                } else {
                    write!(self.w, ">")?;
                    if let Some(text) = text {
                        write!(self.w, "{}", escape(text))?;
                    }
                    if has_children {
                        if self.pretty {
                            writeln!(self.w)?;
                        }
                        for child in self.grove.children(node) {
                            self.write_node(child, depth + 1)?;
                        }
                        if self.pretty {
                            write!(self.w, "{}", "  ".repeat(depth))?;
                        }
                    }
                    write!(self.w, "</{}>", tag)?;
                }
                if self.pretty {
                    writeln!(self.w)?;
                }
            }
        }
        Ok(())
    }
}

/// ## Serialization to markup text
impl Grove {
    /// Serialize a subtree as compact markup to a writer.
    pub fn serialize(&self, node: Node, w: &mut impl Write) -> Result<(), Error> {
        Serializer {
            grove: self,
            w,
            pretty: false,
        }
        .write_node(node, 0)
    }

    /// Serialize a subtree as indented markup to a writer, each element
    /// child on its own line.
    pub fn serialize_pretty(&self, node: Node, w: &mut impl Write) -> Result<(), Error> {
        Serializer {
            grove: self,
            w,
            pretty: true,
        }
        .write_node(node, 0)
    }

    /// Serialize a subtree to a compact markup string.
    ///
    /// ```rust
    /// use grove::Grove;
    ///
    /// let mut grove = Grove::new();
    /// let name = grove.bind("name");
    /// let node = grove.new_element(name).attr("attr", "value").build()?;
    /// assert_eq!(grove.to_string(node)?, r#"<name attr="value"/>"#);
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn to_string(&self, node: Node) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.serialize(node, &mut buf)?;
        Ok(String::from_utf8(buf).expect("serializer writes UTF-8"))
    }

    /// Serialize a subtree to an indented markup string, trailing
    /// whitespace trimmed. This is a node's canonical text form.
    pub fn to_pretty_string(&self, node: Node) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.serialize_pretty(node, &mut buf)?;
        let text = String::from_utf8(buf).expect("serializer writes UTF-8");
        Ok(text.trim_end().to_string())
    }
}
