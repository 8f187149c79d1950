//! Site header rendering shared by every page and the auth handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::HxRequest;
use crate::models::{AuthState, LoginPanel, SessionUser};
use crate::services::{Navigation, OrderStore};
use crate::state::AppState;

/// Header values rendered by `partials/header.html`.
#[derive(Clone)]
pub struct HeaderView {
    pub user_name: Option<String>,
    pub panel: LoginPanel,
    pub order_count: usize,
    /// Page the header was rendered on, posted back by every header form.
    pub return_to: String,
}

impl HeaderView {
    #[must_use]
    pub fn new(auth: &AuthState, order_count: usize, return_to: String) -> Self {
        Self {
            user_name: auth.user().map(SessionUser::display_name),
            panel: auth.panel.clone(),
            order_count,
            return_to,
        }
    }

    /// Build the header for `return_to` from the visitor's session.
    pub async fn load(
        state: &AppState,
        session: &Session,
        auth: &AuthState,
        return_to: &str,
    ) -> Self {
        let orders = OrderStore::new(session, state.orders())
            .current_orders()
            .await;
        Self::new(auth, orders.len(), local_path(Some(return_to)))
    }
}

/// Header fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/header.html")]
pub struct HeaderTemplate {
    pub header: HeaderView,
}

/// Reduce a client-supplied `return_to` to a path on this site.
///
/// Anything that is not an absolute local path (`//host`, `https://..`,
/// backslashes) becomes `/`.
#[must_use]
pub fn local_path(return_to: Option<&str>) -> String {
    match return_to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// Turn the outcome of a header operation into a response.
///
/// HTMX requests get `HX-Redirect: /` or the re-rendered header; plain form
/// posts get `303 See Other` to `/` or back to the page they came from.
pub fn respond(HxRequest(is_htmx): HxRequest, navigation: Navigation, header: HeaderView) -> Response {
    match (navigation, is_htmx) {
        (Navigation::Home, true) => (StatusCode::OK, [("HX-Redirect", "/")]).into_response(),
        (Navigation::Home, false) => Redirect::to("/").into_response(),
        (Navigation::Stay, true) => HeaderTemplate { header }.into_response(),
        (Navigation::Stay, false) => Redirect::to(&header.return_to).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    fn header(return_to: &str) -> HeaderView {
        HeaderView::new(&AuthState::default(), 0, return_to.to_string())
    }

    #[test]
    fn test_local_path_accepts_site_paths() {
        assert_eq!(local_path(Some("/orders")), "/orders");
        assert_eq!(local_path(Some("/?tab=menu")), "/?tab=menu");
    }

    #[test]
    fn test_local_path_rejects_offsite_targets() {
        assert_eq!(local_path(None), "/");
        assert_eq!(local_path(Some("")), "/");
        assert_eq!(local_path(Some("//evil.example")), "/");
        assert_eq!(local_path(Some("https://evil.example/")), "/");
        assert_eq!(local_path(Some("/\\evil.example")), "/");
        assert_eq!(local_path(Some("orders")), "/");
    }

    #[test]
    fn test_htmx_home_sets_redirect_header() {
        let response = respond(HxRequest(true), Navigation::Home, header("/orders"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("HX-Redirect").unwrap(), "/");
    }

    #[test]
    fn test_plain_post_goes_back_on_stay() {
        let response = respond(HxRequest(false), Navigation::Stay, header("/orders"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/orders");

        let response = respond(HxRequest(false), Navigation::Home, header("/orders"));
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    }

    #[test]
    fn test_header_fragment_shows_toggle_label() {
        let mut auth = AuthState::default();
        auth.panel.toggle();
        let html = HeaderTemplate {
            header: HeaderView::new(&auth, 2, "/".to_string()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Close"));
        assert!(html.contains(r#"action="/auth/login""#));
        assert!(!html.contains("Logout"));
    }
}
