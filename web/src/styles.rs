//! Stylesheet selection per page.

/// Path prefix of pages that need the dynamic stylesheet.
pub const DYNAMIC_PREFIX: &str = "/dynamic";
/// URL prefix the compiled stylesheets are served under.
pub const STYLESHEET_BASE: &str = "/static/css";

const DYNAMIC_LINKS: &[&str] = &["/static/css/dynamic.css", "/static/css/globals.css"];
const GLOBAL_LINKS: &[&str] = &["/static/css/globals.css"];

/// Stylesheet hrefs for `page`, in the order they must be emitted.
///
/// The global stylesheet always comes last so it can override the dynamic
/// one.
///
/// # Examples
/// ```
/// use leaves_web::stylesheet_links;
///
/// assert_eq!(stylesheet_links(None), ["/static/css/globals.css"]);
/// assert_eq!(stylesheet_links(Some("/dynamic/a")).len(), 2);
/// ```
#[must_use]
pub fn stylesheet_links(page: Option<&str>) -> &'static [&'static str] {
    match page {
        Some(path) if path.starts_with(DYNAMIC_PREFIX) => DYNAMIC_LINKS,
        _ => GLOBAL_LINKS,
    }
}
