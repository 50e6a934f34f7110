use crate::domain::listing::Listing;
use maud::{html, Markup};

/// Title, facts and photo of one listing, with its marketplace link and the
/// AutoBuy affordance.
pub fn listing_card(listing: &Listing, produced_by: &str, autobuy: bool) -> Markup {
    let raw = &listing.raw;

    html! {
        article class="card" id={ "listing-" (listing.id()) } {
            h3 { (listing.display_title()) }
            div class="listing" {
                div {
                    p { strong { "Date:" } " " (listing.created_at.format("%Y-%m-%d %H:%M:%S %Z").to_string()) }
                    p { strong { "Marque:" } " " (raw.brand_title) }
                    p { strong { "Taille:" } " " (raw.size_title) }
                    p { strong { "Etat:" } " " (raw.status) }
                    p {
                        strong { "Prix:" } " "
                        (raw.total_item_price) " " (raw.currency)
                        " (" (raw.price_no_fee) " + " (raw.service_fee) " fee)"
                    }
                    p { strong { "Nombre de vues:" } " " (raw.view_count) }
                    p { strong { "Nombre de favoris:" } " " (raw.favourite_count) }
                    p { strong { "Recherche:" } " " (produced_by) }
                }
                @if let Some(photo) = &raw.photo_url {
                    img src=(photo) alt=(raw.title) loading="lazy";
                }
            }
            div style="display: flex; gap: 1rem; align-items: center;" {
                a href=(raw.url) target="_blank" rel="noopener" { "Voir sur Vinted" }
                @if autobuy {
                    span class="autobuy-on" { "AutoBuy activé" }
                } @else {
                    form method="post" action="/autobuy" {
                        input type="hidden" name="id" value=(listing.id());
                        button type="submit" class="primary" { "AutoBuy" }
                    }
                }
            }
        }
    }
}
