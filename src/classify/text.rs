use scraper::node::Element;
use scraper::{Html, Node, Selector};

/// Elements whose text never renders
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that flow inside a line; text on either side of them joins up
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u",
    "var",
];

/// One pending unit of the document walk
enum Step<N> {
    Visit(N),
    /// End of a block element
    Break,
}

/// Extracts the rendered text of a document's body
///
/// The equivalent of the body's `innerText`: text inside scripts, styles,
/// `noscript`, templates and `[hidden]` subtrees is skipped. Inline elements
/// join their text to the neighbouring text, block elements separate it.
/// Whitespace runs collapse to one space and the result is trimmed. A
/// document without a body yields an empty string.
///
/// The walk keeps its own stack, so nesting depth costs heap, not call
/// frames.
pub fn visible_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&selector).next() else {
        return String::new();
    };

    let mut text = String::new();
    let mut pending = vec![Step::Visit(*body)];

    while let Some(step) = pending.pop() {
        let node = match step {
            Step::Visit(node) => node,
            Step::Break => {
                text.push(' ');
                continue;
            }
        };

        match node.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(element) if renders(element) => {
                if !INLINE_ELEMENTS.contains(&element.name()) {
                    text.push(' ');
                    pending.push(Step::Break);
                }
                // Reversed so the first child pops first
                pending.extend(node.children().rev().map(Step::Visit));
            }
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn renders(element: &Element) -> bool {
    !HIDDEN_ELEMENTS.contains(&element.name()) && element.attr("hidden").is_none()
}
