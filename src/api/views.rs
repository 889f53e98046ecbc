//! HTML rendering of the report form.

use crate::db::Client;
use std::fmt::Write;

/// Message shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Saved { href: String, filename: String },
}

/// One generated draft as shown on the page
#[derive(Debug, Clone)]
pub struct DraftView {
    /// Temperature label, also used as form key
    pub key: String,
    pub outcome: Result<String, String>,
}

/// Everything the form page can show
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub clients: &'a [Client],
    pub selected_client: &'a str,
    pub notes: &'a str,
    pub drafts: &'a [DraftView],
    pub notices: &'a [Notice],
}

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

pub fn render_page(page: &Page<'_>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"nl\">\n<head><meta charset=\"utf-8\"><title>Verslag dagbesteding</title></head>\n<body>\n<h1>Verslag dagbesteding</h1>\n",
    );

    for notice in page.notices {
        match notice {
            Notice::Error(msg) => {
                let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(msg));
            }
            Notice::Saved { href, filename } => {
                let _ = writeln!(
                    html,
                    "<p class=\"success\">Verslag opgeslagen. Download het <a href=\"{}\">hier</a> ({}).</p>",
                    escape_html(href),
                    escape_html(filename)
                );
            }
        }
    }

    html.push_str("<form method=\"post\" action=\"/\">\n<label for=\"client_name\">Cliënt</label>\n");
    html.push_str("<select id=\"client_name\" name=\"client_name\">\n");
    for client in page.clients {
        let selected = if client.name == page.selected_client {
            " selected"
        } else {
            ""
        };
        let name = escape_html(&client.name);
        let _ = writeln!(html, "<option value=\"{}\"{}>{}</option>", name, selected, name);
    }
    html.push_str("</select>\n<label for=\"input_text\">Wat moet er in het verslag?</label>\n");
    let _ = writeln!(
        html,
        "<textarea id=\"input_text\" name=\"input_text\" rows=\"10\" cols=\"80\">{}</textarea>",
        escape_html(page.notes)
    );
    html.push_str("<button type=\"submit\">Genereer verslagen</button>\n</form>\n");

    for draft in page.drafts {
        let key = escape_html(&draft.key);
        let _ = writeln!(html, "<section>\n<h2>Versie (temperatuur {})</h2>", key);
        match &draft.outcome {
            Ok(content) => {
                let _ = writeln!(
                    html,
                    "<form method=\"post\" action=\"/save/{key}\">\n<textarea name=\"content_{key}\" rows=\"15\" cols=\"80\">{}</textarea>\n<button type=\"submit\">Opslaan</button>\n</form>",
                    escape_html(content)
                );
            }
            Err(msg) => {
                let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(msg));
            }
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Jan\" & 'Piet'</b>"),
            "&lt;b&gt;&quot;Jan&quot; &amp; &#39;Piet&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn draft_content_is_escaped_and_keyed() {
        let drafts = vec![DraftView {
            key: "0.4".into(),
            outcome: Ok("<script>x</script>".into()),
        }];
        let html = render_page(&Page {
            drafts: &drafts,
            ..Default::default()
        });
        assert!(html.contains("action=\"/save/0.4\""));
        assert!(html.contains("name=\"content_0.4\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn selected_client_is_marked() {
        let clients = vec![
            Client {
                id: "1".into(),
                name: "Anna".into(),
                created_at: String::new(),
            },
            Client {
                id: "2".into(),
                name: "Pietje".into(),
                created_at: String::new(),
            },
        ];
        let html = render_page(&Page {
            clients: &clients,
            selected_client: "Pietje",
            ..Default::default()
        });
        assert!(html.contains("<option value=\"Pietje\" selected>Pietje</option>"));
        assert!(html.contains("<option value=\"Anna\">Anna</option>"));
    }
}
