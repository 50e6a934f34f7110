use maud::{html, Markup};

pub mod error;
pub mod listing_card;

pub use error::error_page;
pub use listing_card::listing_card;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Warning,
    Error,
}

pub fn alert(kind: AlertKind, message: &str) -> Markup {
    let class = match kind {
        AlertKind::Warning => "alert alert-warning",
        AlertKind::Error => "alert alert-error",
    };

    html! {
        div class=(class) role="alert" { (message) }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
