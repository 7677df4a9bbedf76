//! Root document layout.
//!
//! Every page is rendered into the same shell:
//!
//! ```text
//! <html lang="en">
//!   <head> metadata, then critical <style> XOR stylesheet links </head>
//!   <body>
//!     theme provider
//!       state-store provider
//!         page content, deferred links (critical mode only), toast region
//! </html>
//! ```

use crate::critical::CriticalCss;

/// Document-level metadata emitted in `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Metadata {
    title: String,
    description: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "Leaves Tracker".to_owned(),
            description: "Track leave requests".to_owned(),
        }
    }
}

/// Root layout shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    critters_runtime: bool,
    metadata: Metadata,
}

impl Layout {
    /// Layout with default metadata; `critters_runtime` enables inlining.
    #[must_use]
    pub fn new(critters_runtime: bool) -> Self {
        Self {
            critters_runtime,
            metadata: Metadata::default(),
        }
    }

    /// Whether critical CSS mode is switched on for this process.
    #[must_use]
    pub const fn critters_runtime(&self) -> bool {
        self.critters_runtime
    }

    /// Critical CSS to inline, if the runtime flag is on and some was found.
    fn inlined<'a>(&self, critical: &'a CriticalCss) -> Option<&'a str> {
        critical.css().filter(|_| self.critters_runtime)
    }

    /// Render `content` inside the document shell.
    ///
    /// `content` is trusted markup. In critical mode the head carries only the
    /// inlined stylesheet and `links` move after the content; otherwise the
    /// head carries `links` and no `<style>` is emitted.
    #[must_use]
    pub fn render(&self, links: &[&str], critical: &CriticalCss, content: &str) -> String {
        let inlined = self.inlined(critical);
        let mut html = String::with_capacity(content.len() + 512);
        html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        push_escaped(&mut html, "<title>", &self.metadata.title, "</title>");
        push_escaped(
            &mut html,
            "<meta name=\"description\" content=\"",
            &self.metadata.description,
            "\">",
        );
        // Critical CSS is build output and inlined unescaped.
        let head_styles = inlined.map_or_else(
            || stylesheet_markup(links),
            |css| format!("<style>{css}</style>"),
        );
        html.push_str(&head_styles);
        html.push_str("</head><body>");
        html.push_str("<div data-provider=\"theme\"><div data-provider=\"store\">");
        html.push_str(content);
        if inlined.is_some() {
            html.push_str(&stylesheet_markup(links));
        }
        html.push_str("<section data-toaster aria-live=\"polite\"></section>");
        html.push_str("</div></div></body></html>");
        html
    }
}

fn stylesheet_markup(links: &[&str]) -> String {
    let mut markup = String::new();
    for link in links {
        push_escaped(&mut markup, "<link rel=\"stylesheet\" href=\"", link, "\">");
    }
    markup
}

fn push_escaped(html: &mut String, open: &str, text: &str, close: &str) {
    html.push_str(open);
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            other => html.push(other),
        }
    }
    html.push_str(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LINKS: &[&str] = &["/static/css/dynamic.css", "/static/css/globals.css"];
    const CONTENT: &str = "<main>page</main>";

    fn head_of(html: &str) -> &str {
        let start = html.find("<head>").expect("head open");
        let end = html.find("</head>").expect("head close");
        html.get(start..end).expect("head markup")
    }

    fn body_of(html: &str) -> &str {
        let start = html.find("<body>").expect("body open");
        html.get(start..).expect("body markup")
    }

    fn found() -> CriticalCss {
        CriticalCss::Found("h1{color:red}".to_owned())
    }

    #[rstest]
    fn critical_mode_inlines_and_defers_links() {
        let html = Layout::new(true).render(LINKS, &found(), CONTENT);

        assert!(head_of(&html).contains("<style>h1{color:red}</style>"));
        assert!(!head_of(&html).contains("<link"));
        let body = body_of(&html);
        let content_at = body.find(CONTENT).expect("content");
        let dynamic_at = body.find("/static/css/dynamic.css").expect("dynamic link");
        let global_at = body.find("/static/css/globals.css").expect("global link");
        let toaster_at = body.find("data-toaster").expect("toaster");
        assert!(content_at < dynamic_at);
        assert!(dynamic_at < global_at);
        assert!(global_at < toaster_at);
    }

    #[rstest]
    #[case(true, CriticalCss::NotFound)]
    #[case(false, CriticalCss::NotFound)]
    #[case(false, found())]
    fn standard_mode_links_in_head_without_style(
        #[case] runtime: bool,
        #[case] critical: CriticalCss,
    ) {
        let html = Layout::new(runtime).render(LINKS, &critical, CONTENT);

        let head = head_of(&html);
        let dynamic_at = head.find("/static/css/dynamic.css").expect("dynamic link");
        let global_at = head.find("/static/css/globals.css").expect("global link");
        assert!(dynamic_at < global_at);
        assert!(!html.contains("<style"));
        assert!(!body_of(&html).contains("<link"));
    }

    #[rstest]
    fn providers_wrap_content_in_order() {
        let html = Layout::default().render(
            &["/static/css/globals.css"],
            &CriticalCss::NotFound,
            CONTENT,
        );

        let body = body_of(&html);
        let theme_at = body.find("data-provider=\"theme\"").expect("theme");
        let store_at = body.find("data-provider=\"store\"").expect("store");
        let content_at = body.find(CONTENT).expect("content");
        assert!(theme_at < store_at);
        assert!(store_at < content_at);
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(html.ends_with("</body></html>"));
    }

    #[rstest]
    fn metadata_is_escaped() {
        let layout = Layout {
            critters_runtime: false,
            metadata: Metadata {
                title: "Leaves & <Co>".to_owned(),
                description: "say \"hi\"".to_owned(),
            },
        };

        let html = layout.render(&[], &CriticalCss::NotFound, "");
        assert!(html.contains("<title>Leaves &amp; &lt;Co&gt;</title>"));
        assert!(html.contains("content=\"say &quot;hi&quot;\""));
    }
}
