//! Result rendering: markdown in, sanitized HTML out.
//!
//! Backend text is never inserted as-is. It goes through `pulldown-cmark`
//! and then `ammonia`, and the fixed error message takes the same path.

use pulldown_cmark::{html, Event, Options, Parser, TagEnd};
use serde::Serialize;
use std::collections::HashSet;

/// Shown whenever generation fails, whatever the cause.
pub const ERROR_MESSAGE: &str = "**The grounds are too murky to read right now.**\n\n\
Something went wrong while reading your cup. Please reset and try again.";

/// A rendered reading: the source markdown plus its sanitized HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fortune {
    pub markdown: String,
    pub html: String,
}

impl Fortune {
    pub fn from_markdown(markdown: &str) -> Self {
        Self {
            markdown: markdown.to_string(),
            html: render_markdown(markdown),
        }
    }

    /// Text content of the reading, as the user would copy it.
    pub fn plain_text(&self) -> String {
        plain_text(&self.markdown)
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Convert markdown to HTML and strip anything executable.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, parser_options());
    let mut raw_html = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut raw_html, parser);
    sanitize(&raw_html)
}

fn sanitize(raw_html: &str) -> String {
    ammonia::Builder::default()
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .clean(raw_html)
        .to_string()
}

/// The fixed failure message, rendered like any other result.
pub fn render_error() -> Fortune {
    Fortune::from_markdown(ERROR_MESSAGE)
}

/// Flatten markdown to readable plain text: block boundaries become line
/// breaks, markup and raw HTML are dropped.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                out.push_str("\n\n")
            }
            Event::End(TagEnd::Item | TagEnd::TableRow | TagEnd::TableHead) => out.push('\n'),
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::Rule => out.push_str("\n\n"),
            _ => {}
        }
    }
    out.trim().to_string()
}
