//! HTTP handlers and route configuration.

mod accounts;
mod auth;
mod health;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::guard::RequireSession;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Sign-in and session routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route(
                        "/callback/credentials",
                        web::post().to(auth::credentials_callback),
                    )
                    .route("/signin/{provider}", web::get().to(auth::provider_sign_in))
                    .route(
                        "/callback/{provider}",
                        web::get().to(auth::provider_callback),
                    )
                    .route("/session", web::get().to(auth::session))
                    .route("/providers", web::get().to(auth::providers))
                    .route("/signout", web::post().to(auth::sign_out)),
            )
            // Protected routes
            .route("/me", web::get().to(accounts::me))
            .service(
                web::scope("/accounts")
                    .route("", web::get().to(accounts::list_accounts))
                    .route("", web::post().to(accounts::connect_account))
                    .route("/{id}", web::delete().to(accounts::disconnect_account))
                    .route("/{id}/tokens", web::put().to(accounts::update_tokens))
                    .route("/{id}/posts", web::put().to(accounts::upsert_post))
                    .route("/{id}/posts", web::get().to(accounts::recent_posts)),
            ),
    );

    // Guarded page shells
    for page in pages::PROTECTED_PAGES {
        cfg.service(
            web::scope(page.prefix)
                .wrap(RequireSession)
                .default_service(web::to(pages::page)),
        );
    }
}
