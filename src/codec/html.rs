//! Minimal structural markdown-to-HTML conversion and the page templates used by the exporter.
//!
//! Only block structure is recognized: `#`/`##`/`###` headings, `- ` list items, `> ` quote
//! lines, fenced code blocks and paragraphs. Inline markup is left as text. All document text
//! is HTML-escaped.

use std::fmt::Write;

use crate::error::SpecError;

const FENCE: &str = "```";

/// Title shown on the index page and in every page's `<title>`.
pub const SITE_TITLE: &str = "Architecture Specifications";

/// Escape text for use in HTML element content and attribute values.
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

/// Convert raw markdown to HTML, block by block.
///
/// Lines are trimmed before classification. An unterminated code fence or list is closed at
/// the end of the input.
pub fn markdown_to_html(content: &str) -> Result<String, SpecError> {
    let mut out = String::new();
    let mut in_code = false;
    let mut in_list = false;

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim();

        if trimmed.starts_with(FENCE) {
            if in_code {
                out.push_str("</code></pre>\n");
                in_code = false;
            } else {
                close_list(&mut out, &mut in_list);
                out.push_str("<pre><code>");
                in_code = true;
            }
            continue;
        }

        if in_code {
            writeln!(out, "{}", escape_html(line))?;
            continue;
        }

        if trimmed.is_empty() {
            close_list(&mut out, &mut in_list);
            out.push('\n');
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            if !in_list {
                out.push_str("<ul>\n");
                in_list = true;
            }
            writeln!(out, "<li>{}</li>", escape_html(item))?;
            continue;
        }

        close_list(&mut out, &mut in_list);
        if let Some(text) = trimmed.strip_prefix("# ") {
            writeln!(out, "<h1>{}</h1>", escape_html(text))?;
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            writeln!(out, "<h2>{}</h2>", escape_html(text))?;
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            writeln!(out, "<h3>{}</h3>", escape_html(text))?;
        } else if let Some(text) = trimmed.strip_prefix("> ") {
            writeln!(out, "<blockquote>{}</blockquote>", escape_html(text))?;
        } else {
            writeln!(out, "<p>{}</p>", escape_html(trimmed))?;
        }
    }

    close_list(&mut out, &mut in_list);
    if in_code {
        out.push_str("</code></pre>\n");
    }
    Ok(out)
}

fn close_list(out: &mut String, in_list: &mut bool) {
    if *in_list {
        out.push_str("</ul>\n");
        *in_list = false;
    }
}

/// A sidebar entry on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub href: String,
}

/// A "related specifications" link on a spec page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    pub href: String,
    /// False when the target has no exported page; the link is rendered but will not resolve.
    pub exported: bool,
}

/// Render the index page with a sidebar listing every exported spec.
pub fn render_index(entries: &[IndexEntry]) -> Result<String, SpecError> {
    let mut toc = String::new();
    for entry in entries {
        writeln!(
            toc,
            "                    <li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href),
            escape_html(&entry.title)
        )?;
    }

    let mut out = String::new();
    write_head(&mut out, SITE_TITLE, INDEX_STYLE)?;
    write!(
        out,
        r#"<body>
    <header>
        <div class="container">
            <h1>{SITE_TITLE}</h1>
            <p>Components and how they depend on each other</p>
        </div>
    </header>
    <div class="container">
        <div class="main-content">
            <nav class="sidebar">
                <h2>Specifications</h2>
                <ul>
{toc}                </ul>
            </nav>
            <div class="content">
                <div class="welcome">
                    <h2>Welcome</h2>
                    <p>Pick a specification from the list to see its details.</p>
                </div>
            </div>
        </div>
    </div>
</body>
</html>
"#
    )?;
    Ok(out)
}

/// Render one spec page: title, converted body and its related specifications.
pub fn render_page(title: &str, content: &str, links: &[NavLink]) -> Result<String, SpecError> {
    let body = markdown_to_html(content)?;
    let title = escape_html(title);

    let mut navigation = String::new();
    if !links.is_empty() {
        navigation.push_str(
            "            <nav class=\"navigation\">\n                <h3>Related specifications</h3>\n                <ul>\n",
        );
        for link in links {
            let class = if link.exported { "" } else { " class=\"missing\"" };
            writeln!(
                navigation,
                "                    <li><a href=\"{}\"{class}>{}</a></li>",
                escape_html(&link.href),
                escape_html(&link.title)
            )?;
        }
        navigation.push_str("                </ul>\n            </nav>\n");
    }

    let mut out = String::new();
    write_head(&mut out, &format!("{title} - {SITE_TITLE}"), PAGE_STYLE)?;
    write!(
        out,
        r#"<body>
    <header>
        <div class="container">
            <a href="index.html" class="back-link">&larr; Back to specifications</a>
            <h1>{title}</h1>
        </div>
    </header>
    <div class="container">
        <div class="content">
{body}
{navigation}        </div>
    </div>
</body>
</html>
"#
    )?;
    Ok(out)
}

fn write_head(out: &mut String, title: &str, style: &str) -> Result<(), SpecError> {
    write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{COMMON_STYLE}{style}    </style>
</head>
"#
    )?;
    Ok(())
}

const COMMON_STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
            line-height: 1.6;
            color: #333;
            background: #f5f5f5;
        }
        header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px 20px;
            margin-bottom: 40px;
        }
        .content {
            background: white;
            padding: 40px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0, 0, 0, 0.05);
        }
"#;

const INDEX_STYLE: &str = r#"
        .container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }
        header h1 { font-size: 2.5em; margin-bottom: 10px; }
        .main-content { display: grid; grid-template-columns: 250px 1fr; gap: 40px; }
        .sidebar {
            background: white;
            padding: 20px;
            border-radius: 8px;
            height: fit-content;
            position: sticky;
            top: 20px;
        }
        .sidebar h2 { font-size: 1.2em; margin-bottom: 20px; color: #667eea; }
        .sidebar ul { list-style: none; }
        .sidebar li { margin-bottom: 10px; }
        .sidebar a { color: #667eea; text-decoration: none; display: block; padding: 8px 12px; }
        .sidebar a:hover { background: #f0f0f0; }
        .welcome { text-align: center; padding: 60px 20px; }
        .welcome h2 { font-size: 2em; color: #667eea; margin-bottom: 20px; }
        @media (max-width: 768px) {
            .main-content { grid-template-columns: 1fr; }
            .sidebar { position: static; }
        }
"#;

const PAGE_STYLE: &str = r#"
        .container { max-width: 900px; margin: 0 auto; padding: 0 20px; }
        header .back-link { color: rgba(255,255,255,0.9); text-decoration: none; }
        header h1 { font-size: 2em; margin-top: 15px; }
        .content h1 { font-size: 2em; margin: 30px 0 20px; border-bottom: 2px solid #667eea; }
        .content h1:first-child { margin-top: 0; }
        .content h2 { font-size: 1.5em; margin: 25px 0 15px; color: #555; }
        .content h3 { font-size: 1.2em; margin: 20px 0 12px; color: #666; }
        .content p { margin-bottom: 15px; }
        .content ul { margin: 0 0 15px 30px; }
        .content pre { background: #f4f4f4; padding: 15px; border-radius: 5px; overflow-x: auto; }
        .content blockquote { border-left: 4px solid #667eea; padding-left: 15px; color: #666; }
        .navigation { margin-top: 40px; padding-top: 30px; border-top: 2px solid #f0f0f0; }
        .navigation h3 { color: #667eea; margin-bottom: 15px; }
        .navigation ul { list-style: none; margin-left: 0; }
        .navigation a { color: #667eea; border: 1px solid #667eea; padding: 8px 12px; }
        .navigation a.missing { color: #999; border-style: dashed; }
"#;
