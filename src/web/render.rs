//! HTML rendering for the options form
//!
//! Renders both option sets as tabbed fieldsets with inputs named in the
//! bracket form the save handler decodes (`extension[tab][field]`). All
//! keys, labels, and values are client-visible and escaped.

use std::fmt::Write;

use crate::registry::{Field, FieldKind, FieldRegistry, FieldValue, OptionSet, Tab};

/// Escape text for HTML body and attribute positions
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full options page with both registries' tabs
pub(crate) fn options_page(extension: &FieldRegistry, theme: &FieldRegistry, saved: bool) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><title>UI Options</title></head>\n<body>\n");
    html.push_str("<h1>UI Options</h1>\n");
    if saved {
        html.push_str("<p class=\"flash\">Options saved.</p>\n");
    }
    html.push_str("<form method=\"post\" action=\"/post\">\n");

    render_set(&mut html, OptionSet::Extension, extension);
    render_set(&mut html, OptionSet::Theme, theme);

    html.push_str("<button type=\"submit\">Save</button>\n</form>\n</body>\n</html>\n");
    html
}

fn render_set(html: &mut String, set: OptionSet, registry: &FieldRegistry) {
    if registry.is_empty() {
        return;
    }
    let _ = writeln!(html, "<section class=\"option-set\" id=\"{}\">", set);
    let title = match set {
        OptionSet::Extension => "Extension options",
        OptionSet::Theme => "Theme options",
    };
    let _ = writeln!(html, "<h2>{}</h2>", title);
    for tab in registry.tabs() {
        render_tab(html, set, tab);
    }
    html.push_str("</section>\n");
}

fn render_tab(html: &mut String, set: OptionSet, tab: &Tab) {
    html.push_str("<fieldset class=\"tab\">\n");
    let label = tab.label.as_deref().unwrap_or(&tab.key);
    let _ = writeln!(html, "<legend>{}</legend>", escape(label));
    for field in tab.fields.values() {
        render_field(html, set, &tab.key, field);
    }
    html.push_str("</fieldset>\n");
}

fn render_field(html: &mut String, set: OptionSet, tab_key: &str, field: &Field) {
    let name = format!("{}[{}][{}]", set, escape(tab_key), escape(&field.key));
    let label = field.label.as_deref().unwrap_or(&field.key);
    let _ = writeln!(html, "<label>{}", escape(label));

    match (&field.kind, &field.value) {
        (FieldKind::Bool, FieldValue::Bool(checked)) => {
            // hidden input so an unchecked box still posts a value
            let _ = writeln!(html, "<input type=\"hidden\" name=\"{}\" value=\"false\">", name);
            let _ = writeln!(
                html,
                "<input type=\"checkbox\" name=\"{}\" value=\"true\"{}>",
                name,
                if *checked { " checked" } else { "" }
            );
        }
        (FieldKind::Number, FieldValue::Number(n)) => {
            let _ = writeln!(
                html,
                "<input type=\"number\" step=\"any\" name=\"{}\" value=\"{}\">",
                name, n
            );
        }
        (FieldKind::List, FieldValue::List(items)) => {
            let _ = writeln!(
                html,
                "<textarea name=\"{}\" rows=\"{}\">{}</textarea>",
                name,
                items.len().max(2),
                escape(&items.join("\n"))
            );
        }
        (_, value) => {
            let text = match value {
                FieldValue::String(s) => s.clone(),
                other => serde_yaml::to_string(&other.to_yaml())
                    .unwrap_or_default()
                    .trim_end()
                    .to_string(),
            };
            let _ = writeln!(
                html,
                "<input type=\"text\" name=\"{}\" value=\"{}\">",
                name,
                escape(&text)
            );
        }
    }
    html.push_str("</label>\n");
}

/// Render a save-failure page listing the skipped or rejected fields
pub(crate) fn rejected_page(warnings: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><title>Save failed</title></head>\n<body>\n");
    html.push_str("<h1>Some options were not saved</h1>\n<ul>\n");
    for warning in warnings {
        let _ = writeln!(html, "<li>{}</li>", escape(warning));
    }
    html.push_str("</ul>\n<p><a href=\"/\">Back to options</a></p>\n</body>\n</html>\n");
    html
}

/// Render a save-error page for a fatal read or write failure
pub(crate) fn error_page(message: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><title>Save failed</title></head>\n<body>\n");
    html.push_str("<h1>Saving options failed</h1>\n");
    let _ = writeln!(html, "<p>{}</p>", escape(message));
    html.push_str("<p><a href=\"/\">Back to options</a></p>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FieldRegistry {
        FieldRegistry::from_declarations(
            r#"
general:
  label: General
  fields:
    siteName:
      kind: string
      default: "<Old & Rusty>"
    showFooter:
      kind: bool
      default: true
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_page_names_inputs_in_bracket_form() {
        let html = options_page(&registry(), &FieldRegistry::default(), false);
        assert!(html.contains("name=\"extension[general][siteName]\""));
        assert!(html.contains("name=\"extension[general][showFooter]\""));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = options_page(&registry(), &FieldRegistry::default(), false);
        assert!(html.contains("&lt;Old &amp; Rusty&gt;"));
        assert!(!html.contains("<Old"));
    }

    #[test]
    fn test_empty_set_omitted() {
        let html = options_page(&registry(), &FieldRegistry::default(), false);
        assert!(html.contains("Extension options"));
        assert!(!html.contains("Theme options"));
    }

    #[test]
    fn test_checkbox_pairs_with_hidden_input() {
        let html = options_page(&registry(), &FieldRegistry::default(), false);
        let hidden = html
            .find("type=\"hidden\" name=\"extension[general][showFooter]\"")
            .unwrap();
        let checkbox = html
            .find("type=\"checkbox\" name=\"extension[general][showFooter]\"")
            .unwrap();
        assert!(hidden < checkbox);
        assert!(html.contains("value=\"true\" checked"));
    }

    #[test]
    fn test_saved_flash() {
        let html = options_page(&registry(), &FieldRegistry::default(), true);
        assert!(html.contains("Options saved."));
    }

    #[test]
    fn test_rejected_page_lists_warnings() {
        let html = rejected_page(&["Unknown tab: bogus".to_string()]);
        assert!(html.contains("<li>Unknown tab: bogus</li>"));
    }
}
