//! Reads a tree dump back into a document tree
//!
//! This is the inverse of the tree output generator: dumping the tree returned by
//! [`parse_dump`] gives back the original dump for every dump in canonical form.
use crate::tree_construction::generator::FOREIGN_ATTRIBUTE_NAMES;
use conformance_dom::{Attribute, DocTypeData, ElementData, Namespace, Node};

/// Splits a dump into its logical lines. Text, comment and attribute values can span multiple
/// physical lines; those are joined back together with newlines. Every physical line that does
/// not start a new entry belongs to the entry before it.
#[must_use]
pub fn dump_lines(dump: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut is_open = false;

    for line in dump.trim_end_matches('\n').split('\n') {
        if is_open || !line.starts_with("| ") {
            // Nothing to attach to before the first entry
            let Some(last) = lines.last_mut() else {
                continue;
            };
            last.push('\n');
            last.push_str(line);

            if is_open {
                is_open = !line.ends_with(closing_delimiter(lines.last().map(String::as_str)));
            }
            continue;
        }

        is_open = is_unterminated(payload(line).1);
        lines.push(line.to_owned());
    }

    lines
}

/// Reads a document dump into a document node
#[must_use]
pub fn parse_dump(dump: &str) -> Node {
    Node::document(parse_nodes(dump))
}

/// Reads a fragment dump into a document fragment node
#[must_use]
pub fn parse_fragment_dump(dump: &str) -> Node {
    Node::fragment(parse_nodes(dump))
}

fn parse_nodes(dump: &str) -> Vec<Node> {
    let entries = dump_lines(dump)
        .iter()
        .map(|line| {
            let (depth, payload) = payload(line);
            DumpEntry {
                depth,
                kind: EntryKind::from_payload(payload),
            }
        })
        .collect::<Vec<_>>();

    let mut pos = 0;
    build_children(&entries, &mut pos, 0)
}

/// Splits a dump line into its depth and payload
fn payload(line: &str) -> (usize, &str) {
    let Some(rest) = line.strip_prefix("| ") else {
        return (0, line);
    };

    let payload = rest.trim_start_matches(' ');
    let indent = rest.len() - payload.len();

    (indent / 2, &rest[indent - indent % 2..])
}

/// Returns true when the payload starts a value that continues on the next line
fn is_unterminated(payload: &str) -> bool {
    if let Some(text) = payload.strip_prefix('"') {
        return !text.ends_with('"');
    }

    if payload.starts_with("<!-- ") {
        return !payload.ends_with(" -->");
    }

    if payload.starts_with('<') {
        return false;
    }

    match payload.split_once("=\"") {
        Some((_, value)) => !value.ends_with('"'),
        None => false,
    }
}

/// The delimiter that ends a value spanning multiple lines
fn closing_delimiter(line: Option<&str>) -> &'static str {
    match line.map(|line| payload(line).1) {
        Some(payload) if payload.starts_with("<!-- ") => "-->",
        _ => "\"",
    }
}

struct DumpEntry {
    depth: usize,
    kind: EntryKind,
}

enum EntryKind {
    Node(Node),
    Element(ElementData),
    Attribute { name: String, value: String },
    Content,
    /// Lines we can't make sense of
    Unknown,
}

impl EntryKind {
    fn from_payload(payload: &str) -> Self {
        if payload == "content" {
            return EntryKind::Content;
        }

        if let Some(doctype) = payload.strip_prefix("<!DOCTYPE ").and_then(|p| p.strip_suffix('>')) {
            return EntryKind::Node(Node::DocType(parse_doctype(doctype)));
        }

        if let Some(comment) = payload.strip_prefix("<!-- ").and_then(|p| p.strip_suffix(" -->")) {
            return EntryKind::Node(Node::comment(comment));
        }

        if let Some(text) = payload.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
            return EntryKind::Node(Node::text(text));
        }

        if let Some(tag) = payload.strip_prefix('<').and_then(|p| p.strip_suffix('>')) {
            let element = if let Some(name) = tag.strip_prefix("svg ") {
                ElementData::new_in(Namespace::Svg, name)
            } else if let Some(name) = tag.strip_prefix("math ") {
                ElementData::new_in(Namespace::MathMl, name)
            } else {
                ElementData::new(tag)
            };
            return EntryKind::Element(element);
        }

        if let Some((name, value)) = payload.split_once("=\"") {
            if let Some(value) = value.strip_suffix('"') {
                return EntryKind::Attribute {
                    name: name.to_owned(),
                    value: value.to_owned(),
                };
            }
        }

        EntryKind::Unknown
    }
}

/// Parses `name`, `name "public" "system"` or `name "" "system"`
fn parse_doctype(doctype: &str) -> DocTypeData {
    let Some((name, ids)) = doctype.split_once(" \"") else {
        return DocTypeData::new(doctype);
    };

    let mut data = DocTypeData::new(name);
    let ids = ids.strip_suffix('"').unwrap_or(ids);
    let (pub_id, sys_id) = ids.split_once("\" \"").unwrap_or((ids, ""));

    if pub_id.is_empty() {
        data.sys_identifier = Some(sys_id.to_owned());
    } else {
        data.pub_identifier = Some(pub_id.to_owned());
        data.sys_identifier = Some(sys_id.to_owned());
    }

    data
}

/// Maps a display attribute name back to the name found on the element
fn raw_attribute_name(element: &ElementData, name: String) -> String {
    if !element.namespace.is_foreign() {
        return name;
    }

    let raw = FOREIGN_ATTRIBUTE_NAMES
        .entries()
        .find(|&(_, display)| *display == name)
        .map(|(raw, _)| (*raw).to_owned());

    raw.unwrap_or(name)
}

/// Builds all nodes found at the given depth, starting at `pos`
fn build_children(entries: &[DumpEntry], pos: &mut usize, depth: usize) -> Vec<Node> {
    let mut children = Vec::new();

    while let Some(entry) = entries.get(*pos) {
        if entry.depth < depth {
            break;
        }
        *pos += 1;

        // Lines that are too deep, or that are not nodes at all, don't belong anywhere
        if entry.depth > depth {
            continue;
        }

        match &entry.kind {
            EntryKind::Node(node) => children.push(node.clone()),
            EntryKind::Element(element) => {
                let mut element = element.clone();
                read_element_body(entries, pos, depth, &mut element);
                children.push(element.into());
            }
            EntryKind::Attribute { .. } | EntryKind::Content | EntryKind::Unknown => {}
        }
    }

    children
}

/// Reads the attributes, template contents and children of the element at `depth`
fn read_element_body(entries: &[DumpEntry], pos: &mut usize, depth: usize, element: &mut ElementData) {
    while let Some(DumpEntry {
        depth: attr_depth,
        kind: EntryKind::Attribute { name, value },
    }) = entries.get(*pos)
    {
        if *attr_depth != depth + 1 {
            break;
        }
        let name = raw_attribute_name(element, name.clone());
        element.attributes.push(Attribute::new(name, value.clone()));
        *pos += 1;
    }

    if element.is_template() {
        if let Some(DumpEntry {
            depth: content_depth,
            kind: EntryKind::Content,
        }) = entries.get(*pos)
        {
            if *content_depth == depth + 1 {
                *pos += 1;
                let contents = build_children(entries, pos, depth + 2);
                element.template_contents = Some(Box::new(Node::fragment(contents)));
            }
        }
    }

    element.children = build_children(entries, pos, depth + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_construction::dump_tree;

    fn assert_roundtrip(dump: &str) {
        assert_eq!(dump_tree(&parse_dump(dump)), dump);
    }

    #[test]
    fn logical_lines() {
        let dump = "| <html>\n|   <body>\n|     \"\n\"\n|     <div>\n|     \"\nx\"\n|     <!--  BAR --!\n>BAZ -->";

        assert_eq!(
            dump_lines(dump),
            vec![
                "| <html>",
                "|   <body>",
                "|     \"\n\"",
                "|     <div>",
                "|     \"\nx\"",
                "|     <!--  BAR --!\n>BAZ -->",
            ]
        );
    }

    #[test]
    fn multi_line_text_with_blank_lines() {
        assert_eq!(dump_lines("| \"a\n\n\nb\"\n| <p>"), vec!["| \"a\n\n\nb\"", "| <p>"]);
    }

    #[test]
    fn multi_line_attribute_value() {
        assert_eq!(
            dump_lines("| <p>\n|   title=\"a\nb\"\n|   \"t\""),
            vec!["| <p>", "|   title=\"a\nb\"", "|   \"t\""]
        );
    }

    #[test]
    fn basic_tree() {
        let node = parse_dump("| <html>\n|   <head>\n|   <body>\n|     \"Test\"");

        let expected = Node::document(vec![ElementData::new("html")
            .with_child(ElementData::new("head"))
            .with_child(ElementData::new("body").with_child(Node::text("Test")))
            .into()]);
        assert_eq!(node, expected);
    }

    #[test]
    fn doctypes() {
        let node = parse_dump("| <!DOCTYPE html \"\" \"about:legacy-compat\">");
        assert_eq!(
            node.children()[0],
            Node::DocType(DocTypeData::new("html").with_sys_identifier("about:legacy-compat"))
        );

        let node = parse_dump("| <!DOCTYPE html \"-//W3C//DTD HTML 4.01//EN\" \"\">");
        assert_eq!(
            node.children()[0],
            Node::DocType(
                DocTypeData::new("html")
                    .with_pub_identifier("-//W3C//DTD HTML 4.01//EN")
                    .with_sys_identifier("")
            )
        );

        assert_roundtrip("| <!DOCTYPE html>");
        assert_roundtrip("| <!DOCTYPE >");
        assert_roundtrip("| <!DOCTYPE html \"pub\" \"sys\">");
    }

    #[test]
    fn foreign_attributes_are_mapped_back() {
        let node = parse_dump("| <svg svg>\n|   xlink href=\"#a\"\n|   y=\"1\"");
        let svg = node.children()[0].get_element_data().unwrap();

        assert_eq!(svg.namespace, Namespace::Svg);
        assert_eq!(svg.attributes[0], Attribute::new("xlink:href", "#a"));
        assert_eq!(svg.attributes[1], Attribute::new("y", "1"));
    }

    #[test]
    fn template_contents() {
        let dump = "| <template>\n|   id=\"t\"\n|   content\n|     <div>\n|       \"x\"\n|     <b>";
        let node = parse_fragment_dump(dump);

        let template = node.children()[0].get_element_data().unwrap();
        assert!(template.children.is_empty());
        assert_eq!(template.template_contents.as_ref().map(|c| c.children().len()), Some(2));
        assert_eq!(dump_tree(&node), dump);
    }

    #[test]
    fn roundtrips() {
        assert_roundtrip("| <html>\n|   <head>\n|     <template>\n|       content\n|         <tr>\n|           <td>\n|             \"cell\"\n|         \"a\"\n|   <body>");
        assert_roundtrip("| <html>\n|   <head>\n|   <body>\n|     \"FOO\"\n|     <!--  BAR  -->\n|     \"BAZ\"");
        assert_roundtrip("| <html>\n|   <head>\n|   <body>\n|     <div>\n|       \"\n\"\n|       <div>\n|       \"\nx\"");
        assert_roundtrip("| <b>\n| <math mglyph>\n| <i>\n| <math malignmark>\n| <u>\n| <ms>\n|   \"X\"");
        assert_roundtrip("| <svg svg>\n|   definitionurl=\"foo\"\n|   xlink href=\"foo\"\n|   xml lang=\"en\"\n|   <svg foreignObject>");
        assert_roundtrip("| <p>\n|   id=\"status\"\n|   <noscript>\n|     \"<strong>A</strong>\"");
        assert_roundtrip("| <!--  -->");
        assert_roundtrip("| \"\"");
    }

    #[test]
    fn junk_lines_are_ignored() {
        let node = parse_dump("not a dump line\n| <p>\n|         <too-deep>\n|   <span>");

        assert_eq!(dump_tree(&node), "| <p>\n|   <span>");
    }

    #[test]
    fn values_with_a_quote_before_a_newline() {
        let text = ElementData::new("p").with_child(Node::text("a\"\nb"));
        let dump = dump_tree(&Node::document(vec![text.into()]));
        assert_eq!(dump, "| <p>\n|   \"a\"\nb\"");
        assert_eq!(dump_lines(&dump), vec!["| <p>", "|   \"a\"\nb\""]);
        assert_roundtrip(&dump);

        let attribute = ElementData::new("p").with_attribute("title", "x\"\ny");
        let dump = dump_tree(&Node::document(vec![attribute.into()]));
        assert_eq!(dump, "| <p>\n|   title=\"x\"\ny\"");
        assert_roundtrip(&dump);
    }

    #[test]
    fn lines_after_an_entry_are_kept() {
        assert_eq!(dump_lines("| <p>\njunk\n\n| <b>\n\n"), vec!["| <p>\njunk\n", "| <b>"]);
    }

    #[test]
    fn empty_dump() {
        assert_eq!(parse_dump(""), Node::document(vec![]));
        assert!(dump_lines("").is_empty());
    }
}
