//! Message templates with `{name}` placeholders.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Static(String),
    Placeholder(String),
}

/// Splits a template into literal text and placeholders.
///
/// An unclosed `{` is kept as literal text.
pub fn parse_template(input: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        literal.push_str(&rest[..start]);
        if !literal.is_empty() {
            parts.push(TemplatePart::Static(std::mem::take(&mut literal)));
        }
        parts.push(TemplatePart::Placeholder(after[..end].to_string()));
        rest = &after[end + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(TemplatePart::Static(literal));
    }
    parts
}

/// Renders parsed parts; unknown placeholders render as empty text.
pub fn render(parts: &[TemplatePart], args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(128);
    for part in parts {
        match part {
            TemplatePart::Static(s) => out.push_str(s),
            TemplatePart::Placeholder(name) => {
                let value = args
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| *v)
                    .unwrap_or("");
                out.push_str(value);
            }
        }
    }
    out
}
