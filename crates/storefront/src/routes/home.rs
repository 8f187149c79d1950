//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::header::HeaderView;
use crate::error::Result;
use crate::filters;
use crate::middleware::load_auth_state;
use crate::state::AppState;

/// A drink or snack on the menu.
pub struct MenuItem {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

/// Today's menu.
pub const MENU: &[MenuItem] = &[
    MenuItem {
        name: "Latte",
        description: "Double espresso with steamed milk.",
        price: "$4.50",
    },
    MenuItem {
        name: "Cold Brew",
        description: "Steeped for eighteen hours, served over ice.",
        price: "$4.00",
    },
    MenuItem {
        name: "Flat White",
        description: "Ristretto with a thin layer of microfoam.",
        price: "$4.25",
    },
    MenuItem {
        name: "Blueberry Muffin",
        description: "Baked every morning.",
        price: "$3.25",
    },
    MenuItem {
        name: "Croissant",
        description: "Butter croissant, warmed on request.",
        price: "$3.00",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub header: HeaderView,
    pub menu: &'static [MenuItem],
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let auth = load_auth_state(&session).await?;
    let header = HeaderView::load(&state, &session, &auth, "/").await;

    Ok(HomeTemplate { header, menu: MENU })
}
