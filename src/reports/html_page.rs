use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Song;
use crate::reports::ReportWriter;

/// Marker in the page template that is replaced by the generated table rows.
pub const ROWS_PLACEHOLDER: &str = "<!-- SONG_ROWS -->";

const BUNDLED_TEMPLATE: &str = include_str!("../../assets/library.html");

/// Page template for `library.html`. Loaded once at startup and handed to
/// [`HtmlReport`].
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    source: String,
}

impl HtmlTemplate {
    /// Fails if the template has no row placeholder.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if !source.contains(ROWS_PLACEHOLDER) {
            anyhow::bail!(
                "HTML 템플릿에 행 삽입 위치({})가 없습니다",
                ROWS_PLACEHOLDER
            );
        }
        Ok(Self { source })
    }

    /// The page shipped with the binary.
    pub fn bundled() -> Self {
        Self {
            source: BUNDLED_TEMPLATE.to_string(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("HTML 템플릿을 읽을 수 없습니다: {}", path.display()))?;
        Self::new(source)
            .with_context(|| format!("잘못된 HTML 템플릿입니다: {}", path.display()))
    }

    /// Substitutes `rows` at the first placeholder.
    pub fn fill(&self, rows: &str) -> String {
        self.source.replacen(ROWS_PLACEHOLDER, rows, 1)
    }
}

/// `library.html`: one `<tr>` per song in a filterable table.
pub struct HtmlReport<'a> {
    template: &'a HtmlTemplate,
}

impl<'a> HtmlReport<'a> {
    pub fn new(template: &'a HtmlTemplate) -> Self {
        Self { template }
    }
}

impl ReportWriter for HtmlReport<'_> {
    fn name(&self) -> &str {
        "HTML"
    }

    fn file_name(&self) -> &str {
        "library.html"
    }

    fn render(&self, songs: &[Song], out: &mut dyn Write) -> Result<()> {
        let page = self.template.fill(&table_rows(songs));
        out.write_all(page.as_bytes())?;
        Ok(())
    }
}

fn table_rows(songs: &[Song]) -> String {
    let mut rows = String::new();
    for song in songs {
        rows.push_str("<tr>");
        for field in song.columns() {
            // writing into a String cannot fail
            let _ = write!(rows, "<td>{}</td>", html_escape(field));
        }
        rows.push_str("</tr>\n");
    }
    rows
}

/// Escapes: & < > " '
fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
