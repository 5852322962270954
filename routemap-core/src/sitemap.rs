//! Sitemap XML rendering.

/// Opening `<urlset>` tag with the sitemap and schema-instance namespaces.
pub const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">"#;

pub const URLSET_CLOSE: &str = "</urlset>";

const ENTRY_SEPARATOR: &str = "\r\n";

/// Renders URL lists into `sitemap.xml` documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SitemapSerializer {
    escape: bool,
}

impl SitemapSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape XML special characters in `<loc>` text.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Render `urls` in the given order
    pub fn serialize<S: AsRef<str>>(&self, urls: &[S]) -> String {
        let entries = urls
            .iter()
            .map(|url| {
                let url = url.as_ref();
                if self.escape {
                    render_entry(&escape_xml(url))
                } else {
                    render_entry(url)
                }
            })
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR);

        format!("{}\n  {}\n  {}", URLSET_OPEN, entries, URLSET_CLOSE)
    }
}

/// Render `urls` verbatim into a sitemap document
///
/// # Example
///
/// ```
/// use routemap_core::sitemap::serialize;
///
/// let xml = serialize(&["/about", "/home"]);
/// assert!(xml.contains("<loc>/about</loc>"));
/// assert_eq!(xml.matches("<loc>").count(), 2);
/// ```
pub fn serialize<S: AsRef<str>>(urls: &[S]) -> String {
    SitemapSerializer::new().serialize(urls)
}

fn render_entry(loc: &str) -> String {
    format!("\n  <url>\n    <loc>{}</loc>\n  </url>", loc)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
