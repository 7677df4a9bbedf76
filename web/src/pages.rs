//! Page handlers rendered through the root [`Layout`](crate::Layout).

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::PATHNAME_HEADER;
use crate::server::WebState;
use crate::styles::{DYNAMIC_PREFIX, stylesheet_links};

/// Pages the front-end knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `/`
    Home,
    /// `/dynamic` and everything below it.
    Dynamic,
    /// Anything else.
    NotFound,
}

impl Page {
    /// Page served at `path`.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        match path {
            "" | "/" => Self::Home,
            _ if path == DYNAMIC_PREFIX
                || path
                    .strip_prefix(DYNAMIC_PREFIX)
                    .is_some_and(|rest| rest.starts_with('/')) =>
            {
                Self::Dynamic
            }
            _ => Self::NotFound,
        }
    }

    /// Response status for the page.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Home | Self::Dynamic => StatusCode::OK,
        }
    }

    /// Page body markup.
    #[must_use]
    pub const fn content(self) -> &'static str {
        match self {
            Self::Home => concat!(
                "<main><h1>Leaves Tracker</h1>",
                "<p>Plan and review leave across your team.</p>",
                "<a href=\"/dynamic\">Open the dashboard</a></main>",
            ),
            Self::Dynamic => concat!(
                "<main data-page=\"dynamic\"><h1>Dashboard</h1>",
                "<div id=\"app\"></div></main>",
            ),
            Self::NotFound => "<main><h1>Page not found</h1><a href=\"/\">Back home</a></main>",
        }
    }
}

/// Render whatever page lives at the request path.
///
/// Stylesheets and critical CSS follow the forwarded `x-pathname`, which may
/// differ from the routed path behind a proxy.
pub async fn render_page(req: HttpRequest, state: web::Data<WebState>) -> HttpResponse {
    let pathname = req
        .headers()
        .get(PATHNAME_HEADER)
        .and_then(|value| value.to_str().ok());
    let page = Page::for_path(req.path());
    let critical = state.critical.lookup(pathname).await;
    let html = state
        .layout
        .render(stylesheet_links(pathname), &critical, page.content());
    debug!(
        path = req.path(),
        ?page,
        critical = critical.css().is_some(),
        "page rendered"
    );
    HttpResponse::build(page.status())
        .content_type(actix_web::mime::TEXT_HTML_UTF_8)
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Page::Home)]
    #[case("", Page::Home)]
    #[case("/dynamic", Page::Dynamic)]
    #[case("/dynamic/reports/2024", Page::Dynamic)]
    #[case("/dynamically", Page::NotFound)]
    #[case("/about", Page::NotFound)]
    fn pages_are_routed_by_path(#[case] path: &str, #[case] expected: Page) {
        assert_eq!(Page::for_path(path), expected);
    }

    #[rstest]
    fn only_unknown_pages_are_not_found() {
        assert_eq!(Page::Home.status(), StatusCode::OK);
        assert_eq!(Page::Dynamic.status(), StatusCode::OK);
        assert_eq!(Page::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
