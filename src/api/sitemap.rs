//! `GET /` lists every route the API serves.

use axum::response::Html;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
}

impl RouteInfo {
    const fn new(method: &'static str, path: &'static str) -> Self {
        Self { method, path }
    }

    /// GET routes without path parameters can be followed from the page.
    #[must_use]
    pub fn is_linkable(&self) -> bool {
        self.method == "GET" && !self.path.contains('{')
    }
}

/// Must stay in step with [`super::router`].
pub const ROUTES: &[RouteInfo] = &[
    RouteInfo::new("GET", "/"),
    RouteInfo::new("GET", "/people"),
    RouteInfo::new("GET", "/people/{id}"),
    RouteInfo::new("GET", "/planets"),
    RouteInfo::new("GET", "/planets/{id}"),
    RouteInfo::new("GET", "/users"),
    RouteInfo::new("GET", "/users/{id}"),
    RouteInfo::new("GET", "/users/{id}/favorites"),
    RouteInfo::new("POST", "/users/{user_id}/favorite/planet/{planet_id}"),
    RouteInfo::new("POST", "/users/{user_id}/favorite/people/{people_id}"),
    RouteInfo::new("DELETE", "/favorite/planet/{planet_id}"),
    RouteInfo::new("DELETE", "/favorite/people/{people_id}"),
    RouteInfo::new("GET", "/health"),
    RouteInfo::new("GET", "/metrics"),
];

#[must_use]
pub fn render() -> String {
    let mut items = String::new();
    for route in ROUTES {
        let label = html_escape::encode_text(&format!("{} {}", route.method, route.path)).into_owned();
        if route.is_linkable() {
            let href = html_escape::encode_double_quoted_attribute(route.path);
            let _ = writeln!(items, "    <li><a href=\"{href}\">{label}</a></li>");
        } else {
            let _ = writeln!(items, "    <li>{label}</li>");
        }
    }

    format!(
        "<!doctype html>\n<html>\n<head><title>Holonet API</title></head>\n<body>\n  <h1>Holonet API</h1>\n  <p>Available endpoints:</p>\n  <ul>\n{items}  </ul>\n</body>\n</html>\n"
    )
}

pub async fn sitemap() -> Html<String> {
    Html(render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_only_plain_get_routes() {
        let html = render();
        assert!(html.contains("<a href=\"/people\">GET /people</a>"));
        assert!(html.contains("<li>GET /people/{id}</li>"));
        assert!(html.contains("<li>DELETE /favorite/planet/{planet_id}</li>"));
        assert!(!html.contains("href=\"/users/{id}\""));
    }

    #[test]
    fn test_every_route_is_listed_once() {
        let html = render();
        for route in ROUTES {
            let needle = format!("{} {}<", route.method, route.path);
            assert_eq!(html.matches(&needle).count(), 1, "{needle}");
        }
    }
}
