//! Block-markup parser and HTML renderer
//!
//! Post bodies use a constrained block dialect: each block is delimited
//! by HTML comments, optionally carrying a JSON attribute object:
//!
//! ```text
//! <!-- blk:heading {"level": 2} -->Release notes<!-- /blk:heading -->
//! <!-- blk:paragraph -->First paragraph.<!-- /blk:paragraph -->
//! ```
//!
//! Parsing never fails: malformed attribute JSON degrades to an empty
//! attribute set with a warning, unmatched openers are skipped, and
//! content without any recognizable block renders as a single
//! paragraph-wrapped fallback.

use serde_json::{Map, Value};

/// Opening delimiter prefix for a block
const BLOCK_OPEN: &str = "<!-- blk:";

/// Comment terminator
const COMMENT_END: &str = "-->";

/// Block kinds with a dedicated renderer
const KNOWN_BLOCKS: &[&str] = &["heading", "paragraph", "image", "quote", "list", "code"];

/// A parsed block: name, JSON attributes, inner content
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub attributes: Map<String, Value>,
    pub content: String,
}

/// Result of parsing a document into blocks
#[derive(Debug, Clone, Default)]
pub struct ParsedBlocks {
    pub blocks: Vec<Block>,
    pub warnings: Vec<String>,
}

/// Result of rendering a document
#[derive(Debug, Clone)]
pub struct RenderedContent {
    pub html: String,
    pub warnings: Vec<String>,
}

/// Parse a document into its blocks
///
/// Text outside block delimiters is ignored, matching the dialect's
/// "blocks are the document" model.
pub fn parse_blocks(content: &str) -> ParsedBlocks {
    let mut parsed = ParsedBlocks::default();
    let mut cursor = 0;

    while let Some(found) = content[cursor..].find(BLOCK_OPEN) {
        let name_start = cursor + found + BLOCK_OPEN.len();

        let name_len = content[name_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(content.len() - name_start);
        let name = &content[name_start..name_start + name_len];
        if name.is_empty() {
            cursor = name_start;
            continue;
        }

        // Opening comment must close before anything else happens.
        let head_start = name_start + name_len;
        let Some(head_len) = content[head_start..].find(COMMENT_END) else {
            break;
        };
        let head = content[head_start..head_start + head_len].trim();

        let attributes = if head.is_empty() {
            Map::new()
        } else if head.starts_with('{') {
            match serde_json::from_str::<Value>(head) {
                Ok(Value::Object(map)) => map,
                _ => {
                    parsed
                        .warnings
                        .push(format!("ignoring malformed attributes on block '{name}'"));
                    Map::new()
                }
            }
        } else {
            // Not a block opener (e.g. a stray comment); resume after the name.
            cursor = head_start;
            continue;
        };

        let body_start = head_start + head_len + COMMENT_END.len();
        let closer = format!("<!-- /blk:{name} -->");
        let Some(body_len) = content[body_start..].find(&closer) else {
            parsed
                .warnings
                .push(format!("unclosed block '{name}' skipped"));
            cursor = body_start;
            continue;
        };

        parsed.blocks.push(Block {
            name: name.to_string(),
            attributes,
            content: content[body_start..body_start + body_len].trim().to_string(),
        });
        cursor = body_start + body_len + closer.len();
    }

    parsed
}

/// Render parsed blocks to HTML
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(render_block).collect()
}

/// Parse and render a document in one step
pub fn render(content: &str) -> RenderedContent {
    if content.trim().is_empty() {
        return RenderedContent {
            html: String::new(),
            warnings: Vec::new(),
        };
    }

    let mut parsed = parse_blocks(content);
    if parsed.blocks.is_empty() {
        // No recognizable blocks; treat the whole body as one paragraph.
        return RenderedContent {
            html: format!("<div class=\"blk-paragraph\">{content}</div>"),
            warnings: parsed.warnings,
        };
    }

    for block in &parsed.blocks {
        if !KNOWN_BLOCKS.contains(&block.name.as_str()) {
            parsed
                .warnings
                .push(format!("unknown block type '{}'", block.name));
        }
    }

    RenderedContent {
        html: render_blocks(&parsed.blocks),
        warnings: parsed.warnings,
    }
}

fn render_block(block: &Block) -> String {
    let inner = match block.name.as_str() {
        "heading" => {
            let level = u64_attr(block, "level").unwrap_or(2).clamp(1, 6);
            format!("<h{level}>{}</h{level}>", block.content)
        }
        "paragraph" => format!("<p>{}</p>", block.content),
        "image" => {
            let url = str_attr(block, "url").unwrap_or_default();
            let alt = str_attr(block, "alt").unwrap_or_default();
            let caption = str_attr(block, "caption").unwrap_or_default();

            let mut figure = format!(
                "<figure class=\"blk-image\"><img src=\"{}\" alt=\"{}\">",
                escape_attr(url),
                escape_attr(alt)
            );
            if !caption.is_empty() {
                figure.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
            }
            figure.push_str("</figure>");
            figure
        }
        "quote" => {
            let citation = str_attr(block, "citation").unwrap_or_default();
            let mut quote = format!(
                "<blockquote class=\"blk-quote\"><p>{}</p>",
                block.content
            );
            if !citation.is_empty() {
                quote.push_str(&format!("<cite>{}</cite>", escape_html(citation)));
            }
            quote.push_str("</blockquote>");
            quote
        }
        "list" => {
            let tag = if bool_attr(block, "ordered") { "ol" } else { "ul" };
            format!("<{tag} class=\"blk-list\">{}</{tag}>", block.content)
        }
        "code" => {
            let class = match str_attr(block, "language") {
                Some(lang) if !lang.is_empty() => {
                    format!(" class=\"language-{}\"", escape_attr(lang))
                }
                _ => String::new(),
            };
            format!(
                "<pre class=\"blk-code\"><code{class}>{}</code></pre>",
                escape_html(&block.content)
            )
        }
        _ => {
            return format!("<div class=\"blk-unknown\">{}</div>", block.content);
        }
    };

    format!("<div class=\"blk-{}\">{inner}</div>", block.name)
}

fn str_attr<'a>(block: &'a Block, key: &str) -> Option<&'a str> {
    block.attributes.get(key).and_then(Value::as_str)
}

fn u64_attr(block: &Block, key: &str) -> Option<u64> {
    block.attributes.get(key).and_then(Value::as_u64)
}

fn bool_attr(block: &Block, key: &str) -> bool {
    block
        .attributes
        .get(key)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Escape text for use as element content
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double-quoted attribute
fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
