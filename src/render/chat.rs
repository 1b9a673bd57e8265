use regex::Regex;
use std::sync::LazyLock;

/// Matches `## prefix **bold** suffix` title headings
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s*(.*?)\*\*(.*?)\*\*(.*?)$").unwrap()
});

/// Matches `### text` section headings
static SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s*(.*?)$").unwrap());

/// Matches a trailing `(@name)` mention
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(@(.*?)\)$").unwrap());

/// Matches an inline `[label](url)` link
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[]+)\]\(([^\)]+)\)").unwrap());

/// Convert a single markdown line into chat markup.
pub fn render_line(line: &str) -> String {
    let line = TITLE_REGEX.replace(line, "*${1}`${2}`${3}*");
    let line = SECTION_REGEX.replace(&line, "*${1}*");
    let line = MENTION_REGEX.replace(&line, "(<@${1}>)");
    let line = line.replace("[[", "[").replace("]]", "]");
    LINK_REGEX.replace(&line, "<${2}|${1}>").to_string()
}

/// Convert changelog markdown into chat markup, line by line.
///
/// When a link is given the first rendered line is wrapped as
/// `<link|first line>`.
pub fn to_chat_markup(markdown: &str, link: Option<&str>) -> String {
    let lines = markdown.split('\n').map(render_line).collect::<Vec<String>>();

    match (link, lines.split_first()) {
        (Some(link), Some((first, rest))) => {
            let mut output = vec![format!("<{link}|{first}>")];
            output.extend(rest.iter().cloned());
            output.join("\n")
        }
        _ => lines.join("\n"),
    }
}
