use crate::api::models::SearchState;
use crate::api::ApiError;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    app, body_string, cookie_of, definition, get, item, location_of, not_found, post_form, FakeApi,
};
use std::collections::HashMap;
use std::sync::Arc;

fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn two_searches() -> FakeApi {
    FakeApi {
        requests: Ok(vec![
            definition("a", "A", SearchState::Active),
            definition("b", "B", SearchState::Active),
            definition("c", "Dormante", SearchState::Inactive),
        ]),
        clothes: HashMap::from([
            ("A".to_string(), vec![item(1, 10), item(2, 12)]),
            ("B".to_string(), vec![item(3, 11)]),
        ]),
        ..Default::default()
    }
}

#[test]
fn search_page_lists_active_searches_and_opens_a_session() {
    let api = Arc::new(two_searches());
    let state = app(&api);

    let resp = handle(get("/", None), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("Set-Cookie").is_some());

    let body = body_string(resp);
    assert!(body.contains(r#"value="A""#));
    assert!(body.contains(r#"value="B""#));
    assert!(!body.contains("Dormante"));
    assert!(body.contains("Chercher vêtements"));
}

#[test]
fn running_searches_shows_listings_newest_first() {
    let api = Arc::new(two_searches());
    let state = app(&api);

    let first = handle(get("/", None), &state).unwrap();
    let cookie = cookie_of(&first);

    let resp = handle(
        post_form("/search", Some(&cookie), &form(&[("search", "A"), ("search", "B")])),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location_of(&resp), "/");
    assert!(resp.headers().get("Set-Cookie").is_none());

    let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
    let pos = |id: &str| {
        body.find(&format!(r#"id="listing-{id}""#))
            .unwrap_or_else(|| panic!("listing {id} not rendered"))
    };
    assert!(pos("2") < pos("3"));
    assert!(pos("3") < pos("1"));
    assert!(body.contains("3 vêtements trouvés."));

    assert_eq!(
        *api.clothes_calls.lock().unwrap(),
        vec!["A".to_string(), "B".to_string()]
    );
    // page load, search run, page load
    assert_eq!(*api.requests_calls.lock().unwrap(), 3);
}

#[test]
fn every_page_load_sees_the_definitions_saved_now() {
    let api = Arc::new(two_searches());
    let state = app(&api);
    let cookie = cookie_of(&handle(get("/", None), &state).unwrap());

    let mut renamed = definition("a", "Vestes hiver", SearchState::Active);
    renamed.search_text = "doudoune".to_string();
    api.save_elsewhere(vec![renamed]);

    for _ in 0..2 {
        let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
        assert!(body.contains(r#"value="Vestes hiver""#));
        assert!(!body.contains(r#"value="B""#));
    }
    assert_eq!(*api.requests_calls.lock().unwrap(), 3);
}

#[test]
fn search_run_resolves_names_against_current_definitions() {
    let api = Arc::new(two_searches());
    let state = app(&api);
    let cookie = cookie_of(&handle(get("/", None), &state).unwrap());

    // B was deactivated from another browser after the page was rendered
    api.save_elsewhere(vec![
        definition("a", "A", SearchState::Active),
        definition("b", "B", SearchState::Inactive),
    ]);

    handle(
        post_form("/search", Some(&cookie), &form(&[("search", "A"), ("search", "B")])),
        &state,
    )
    .unwrap();

    assert_eq!(*api.clothes_calls.lock().unwrap(), vec!["A".to_string()]);
    let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
    assert!(!body.contains(r#"id="listing-3""#));
}

#[test]
fn empty_selection_asks_for_one_and_calls_nothing() {
    let api = Arc::new(two_searches());
    let state = app(&api);
    let cookie = cookie_of(&handle(get("/", None), &state).unwrap());

    handle(post_form("/search", Some(&cookie), &[]), &state).unwrap();
    let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());

    assert!(body.contains("Veuillez sélectionner au moins une recherche."));
    assert!(api.clothes_calls.lock().unwrap().is_empty());
}

#[test]
fn api_down_during_search_is_reported() {
    let api = Arc::new(FakeApi {
        clothes_error: Some(ApiError::Connection("connection refused".into())),
        ..two_searches()
    });
    let state = app(&api);
    let cookie = cookie_of(&handle(get("/", None), &state).unwrap());

    handle(
        post_form("/search", Some(&cookie), &form(&[("search", "A"), ("search", "B")])),
        &state,
    )
    .unwrap();
    let body = body_string(handle(get("/", Some(&cookie)), &state).unwrap());

    assert!(body.contains("semble down"));
    assert!(!body.contains("listing-"));
    assert_eq!(api.clothes_calls.lock().unwrap().len(), 1);
}

#[test]
fn missing_requests_are_an_error_on_the_search_page() {
    let api = Arc::new(FakeApi {
        requests: Err(not_found()),
        ..Default::default()
    });
    let state = app(&api);

    let body = body_string(handle(get("/", None), &state).unwrap());
    assert!(body.contains("acquisition des recherches : No requests found"));
    assert!(!body.contains("Chercher vêtements"));
}

#[test]
fn autobuy_only_flags_the_listing() {
    let api = Arc::new(two_searches());
    let state = app(&api);
    let cookie = cookie_of(&handle(get("/", None), &state).unwrap());

    handle(post_form("/search", Some(&cookie), &form(&[("search", "B")])), &state).unwrap();
    let before = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
    assert!(!before.contains("AutoBuy activé"));

    let resp = handle(post_form("/autobuy", Some(&cookie), &form(&[("id", "3")])), &state).unwrap();
    assert_eq!(resp.status(), 303);

    let after = body_string(handle(get("/", Some(&cookie)), &state).unwrap());
    assert!(after.contains("AutoBuy activé"));
    assert!(api.updates.lock().unwrap().is_empty());
}

#[test]
fn autobuy_without_id_is_a_bad_request() {
    let api = Arc::new(FakeApi::default());
    let state = app(&api);

    let result = handle(post_form("/autobuy", None, &[]), &state);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn sessions_do_not_share_results() {
    let api = Arc::new(two_searches());
    let state = app(&api);
    let alice = cookie_of(&handle(get("/", None), &state).unwrap());
    let bob = cookie_of(&handle(get("/", None), &state).unwrap());
    assert_ne!(alice, bob);

    handle(post_form("/search", Some(&alice), &form(&[("search", "A")])), &state).unwrap();

    let body = body_string(handle(get("/", Some(&bob)), &state).unwrap());
    assert!(!body.contains("listing-"));
}

#[test]
fn unknown_route_is_not_found() {
    let api = Arc::new(FakeApi::default());
    let state = app(&api);

    assert!(matches!(
        handle(get("/nowhere", None), &state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(post_form("/", None, &[]), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn failed_requests_leave_no_session_behind() {
    let api = Arc::new(FakeApi::default());
    let state = app(&api);

    for _ in 0..5 {
        assert!(handle(get("/wp-login.php", None), &state).is_err());
        assert!(handle(post_form("/autobuy", None, &[]), &state).is_err());
    }
    assert_eq!(state.sessions.len(), 0);

    let resp = handle(get("/", None), &state).unwrap();
    assert!(resp.headers().get("Set-Cookie").is_some());
    assert_eq!(state.sessions.len(), 1);
}
