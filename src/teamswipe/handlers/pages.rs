//! Fixed content pages. No input processing, no session checks, no side
//! effects.

use crate::teamswipe::handlers::render_template;
use askama::Template;
use axum::response::Response;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "browse.html")]
struct BrowseTemplate;

#[derive(Template)]
#[template(path = "create.html")]
struct CreateTemplate;

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate;

#[derive(Template)]
#[template(path = "notification.html")]
struct NotificationTemplate;

pub async fn home() -> Response {
    render_template(IndexTemplate)
}

pub async fn browse() -> Response {
    render_template(BrowseTemplate)
}

pub async fn create() -> Response {
    render_template(CreateTemplate)
}

pub async fn contact() -> Response {
    render_template(ContactTemplate)
}

pub async fn notification() -> Response {
    render_template(NotificationTemplate)
}
