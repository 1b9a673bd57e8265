use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use std::sync::LazyLock;

/// Matches `#` through `######` headings
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*?)\s*$").unwrap());

/// Matches `**bold**` spans
static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Matches `[label](url)` links, where the label may itself be a single
/// bracketed token as in `[[SE-1]](url)`
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\[[^\]]*\]|[^\[\]]*)\]\(([^)\s]+)\)").unwrap()
});

/// Matches characters that are dropped from heading ids
static HEADING_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").unwrap());

/// Render inline markup: links and bold spans. Text is escaped for XHTML
/// before any markup is added.
fn render_inline(text: &str) -> String {
    let mut linked = String::with_capacity(text.len());
    let mut last = 0;

    for caps in LINK_REGEX.captures_iter(text) {
        let (Some(whole), Some(label), Some(href)) =
            (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        linked.push_str(&encode_text(&text[last..whole.start()]));
        linked.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            encode_double_quoted_attribute(href.as_str()),
            encode_text(label.as_str()),
        ));
        last = whole.end();
    }
    linked.push_str(&encode_text(&text[last..]));

    BOLD_REGEX
        .replace_all(&linked, "<strong>${1}</strong>")
        .to_string()
}

/// Heading anchor: lower-cased text with everything but `[a-z0-9]` removed.
pub fn heading_id(text: &str) -> String {
    let plain = text.replace("**", "").to_lowercase();
    HEADING_ID_REGEX.replace_all(&plain, "").to_string()
}

/// Convert changelog markdown into wiki storage HTML.
///
/// Headings become `<hN id="...">`, runs of `- ` lines become a `<ul>` list,
/// other non-blank lines become paragraphs and blank lines are dropped.
pub fn to_wiki_html(markdown: &str) -> String {
    let mut html: Vec<String> = vec![];
    let mut in_list = false;

    for line in markdown.lines() {
        if let Some(item) = line.strip_prefix("- ") {
            if !in_list {
                html.push("<ul>".to_string());
                in_list = true;
            }
            html.push(format!("<li>{}</li>", render_inline(item)));
            continue;
        }

        if in_list {
            html.push("</ul>".to_string());
            in_list = false;
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = HEADING_REGEX.captures(line) {
            let level = caps[1].len();
            let text = &caps[2];
            html.push(format!(
                r#"<h{level} id="{}">{}</h{level}>"#,
                heading_id(text),
                render_inline(text),
            ));
            continue;
        }

        html.push(format!("<p>{}</p>", render_inline(line)));
    }

    if in_list {
        html.push("</ul>".to_string());
    }

    html.join("\n")
}
