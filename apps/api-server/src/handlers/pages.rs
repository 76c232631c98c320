//! Protected page shells.
//!
//! The browser UI is rendered elsewhere; these routes exist so the session
//! gate runs on the server before any protected content is served.

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use insighto_shared::Session;

use crate::middleware::auth::Identity;
use crate::session::session_view;

pub struct ProtectedPage {
    pub prefix: &'static str,
    pub title: &'static str,
}

pub const PROTECTED_PAGES: [ProtectedPage; 4] = [
    ProtectedPage {
        prefix: "/dashboard",
        title: "Dashboard",
    },
    ProtectedPage {
        prefix: "/accounts",
        title: "Accounts",
    },
    ProtectedPage {
        prefix: "/insights",
        title: "Insights",
    },
    ProtectedPage {
        prefix: "/analytics",
        title: "Analytics",
    },
];

#[derive(Serialize)]
struct PageDescriptor {
    page: String,
    title: &'static str,
    session: Session,
}

/// Describe the page the signed-in user asked for.
pub async fn page(req: HttpRequest, identity: Identity) -> HttpResponse {
    let path = req.path();
    let title = PROTECTED_PAGES
        .iter()
        .find(|p| path.starts_with(p.prefix))
        .map(|p| p.title)
        .unwrap_or("Insighto");

    HttpResponse::Ok().json(PageDescriptor {
        page: path.to_string(),
        title,
        session: session_view(&identity.claims),
    })
}
