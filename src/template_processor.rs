// src/template_processor.rs
use std::collections::HashMap;

/// Substitutes `{{name}}` placeholders in a page template.
///
/// Substitution is single-pass: placeholders that appear inside substituted
/// values are left untouched. Unknown placeholders render as empty text.
pub struct TemplateProcessor;

impl TemplateProcessor {
    pub fn process_variables(template: &str, vars: &HashMap<&str, String>) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            match after_open.find("}}") {
                Some(end) => {
                    let name = after_open[..end].trim();
                    if let Some(value) = vars.get(name) {
                        output.push_str(value);
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    output.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        output.push_str(rest);
        output
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_process_variables() {
        let out = TemplateProcessor::process_variables(
            "<h1>{{title}}</h1><p>{{ body }}</p>",
            &vars(&[("title", "Hi"), ("body", "there")]),
        );
        assert_eq!(out, "<h1>Hi</h1><p>there</p>");
    }

    #[test]
    fn test_values_are_not_reprocessed() {
        let out = TemplateProcessor::process_variables(
            "{{a}}|{{b}}",
            &vars(&[("a", "{{b}}"), ("b", "B")]),
        );
        assert_eq!(out, "{{b}}|B");
    }

    #[test]
    fn test_unknown_and_unterminated_placeholders() {
        let out = TemplateProcessor::process_variables("x{{missing}}y{{open", &vars(&[]));
        assert_eq!(out, "xy{{open");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"AT&T"</b> 'x'"#),
            "&lt;b&gt;&quot;AT&amp;T&quot;&lt;/b&gt; &#39;x&#39;"
        );
    }
}
