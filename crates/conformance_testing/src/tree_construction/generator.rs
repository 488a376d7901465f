use conformance_dom::{DocTypeData, ElementData, Namespace, Node};

/// Display names of attributes on foreign (SVG and MathML) elements
pub(crate) static FOREIGN_ATTRIBUTE_NAMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "xlink:actuate" => "xlink actuate",
    "xlink:arcrole" => "xlink arcrole",
    "xlink:href" => "xlink href",
    "xlink:role" => "xlink role",
    "xlink:show" => "xlink show",
    "xlink:title" => "xlink title",
    "xlink:type" => "xlink type",
    "xml:lang" => "xml lang",
    "xml:space" => "xml space",
    "xmlns:xlink" => "xmlns xlink",
};

/// Prefix written in front of the element name for the given namespace
pub(crate) fn namespace_prefix(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Html => "",
        Namespace::Svg => "svg ",
        Namespace::MathMl => "math ",
    }
}

/// Generates a tree output that can be used for matching with the expected output
pub struct TreeOutputGenerator<'a> {
    root: &'a Node,
}

impl<'a> TreeOutputGenerator<'a> {
    /// Initializes a new tree output generator
    #[must_use]
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    /// Generates the dump of the whole tree
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = Vec::new();
        self.output_treeline(self.root, 0, &mut output);

        output.join("\n").trim().to_owned()
    }

    /// Generates the lines for the node and its children. Note that text lines can have
    /// newlines in them.
    fn output_treeline(&self, node: &Node, indent_level: usize, output: &mut Vec<String>) {
        match node {
            // Document nodes are not written themselves, their children are at the same level
            Node::Document(children) | Node::DocumentFragment(children) => {
                for child in children {
                    self.output_treeline(child, indent_level, output);
                }
            }
            Node::DocType(doctype) => output.push(treeline(indent_level, &doctype_text(doctype))),
            Node::Element(element) => self.output_element(element, indent_level, output),
            Node::Text(text) => output.push(treeline(indent_level, &format!(r#""{text}""#))),
            Node::Comment(comment) => output.push(treeline(indent_level, &format!("<!-- {comment} -->"))),
            Node::ProcessingInstruction { .. } => {}
        }
    }

    fn output_element(&self, element: &ElementData, indent_level: usize, output: &mut Vec<String>) {
        output.push(treeline(
            indent_level,
            &format!("<{}{}>", namespace_prefix(element.namespace), element.name),
        ));

        let mut sorted_attrs = element
            .attributes
            .iter()
            .map(|attr| (display_name(element, &attr.name), attr.value_or_empty()))
            .collect::<Vec<_>>();
        sorted_attrs.sort_by(|a, b| a.0.cmp(b.0));

        for (name, value) in sorted_attrs {
            output.push(treeline(indent_level + 1, &format!(r#"{name}="{value}""#)));
        }

        // Template tags have an extra "content" node in the test tree output
        if element.is_template() {
            output.push(treeline(indent_level + 1, "content"));
            if let Some(contents) = &element.template_contents {
                for child in contents.children() {
                    self.output_treeline(child, indent_level + 2, output);
                }
            }
            return;
        }

        for child in &element.children {
            self.output_treeline(child, indent_level + 1, output);
        }
    }
}

fn treeline(indent_level: usize, payload: &str) -> String {
    format!("| {}{}", "  ".repeat(indent_level), payload)
}

fn display_name<'a>(element: &ElementData, name: &'a str) -> &'a str {
    if element.namespace.is_foreign() {
        FOREIGN_ATTRIBUTE_NAMES.get(name).copied().unwrap_or(name)
    } else {
        name
    }
}

fn doctype_text(doctype: &DocTypeData) -> String {
    match (&doctype.pub_identifier, &doctype.sys_identifier) {
        (Some(pub_id), sys_id) => format!(
            r#"<!DOCTYPE {} "{}" "{}">"#,
            doctype.name,
            pub_id,
            sys_id.as_deref().unwrap_or_default()
        ),
        (None, Some(sys_id)) => format!(r#"<!DOCTYPE {} "" "{}">"#, doctype.name, sys_id),
        (None, None) => format!("<!DOCTYPE {}>", doctype.name),
    }
}
