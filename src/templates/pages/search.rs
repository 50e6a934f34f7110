use crate::sessions::{SearchOutcome, SearchSession};
use crate::templates::{alert, card, components::listing_card, desktop_layout, AlertKind};
use maud::{html, Markup};

pub fn search_page(state: &SearchSession) -> Markup {
    desktop_layout(
        "Recherche vêtements",
        html! {
            h1 { "Recherche vêtements" }

            @if let Some(err) = &state.load_error {
                (alert(AlertKind::Error, err))
            }

            @if let Some(definitions) = &state.definitions {
                (card("Recherches actives", html! {
                    @if definitions.is_empty() {
                        p { "Aucune recherche active. Créez-en une dans l'édition des requêtes." }
                    }
                    form method="post" action="/search" {
                        @for def in definitions {
                            label style="display: block;" {
                                input
                                    type="checkbox"
                                    name="search"
                                    value=(def.name)
                                    checked[state.selected.contains(&def.name)];
                                " " (def.name)
                            }
                        }
                        button type="submit" class="primary" { "Chercher vêtements" }
                    }
                }))
            }

            @match &state.outcome {
                Some(SearchOutcome::Message(msg)) => {
                    (alert(AlertKind::Warning, msg))
                }
                Some(SearchOutcome::Results(results)) => {
                    p { (results.len()) " vêtements trouvés." }
                    @for (listing, source) in results.iter() {
                        (listing_card(listing, source, state.is_autobuy(listing.id())))
                    }
                }
                None => {}
            }
        },
    )
}
