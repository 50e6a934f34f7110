pub mod editor;
pub mod search;

/// First value submitted under `key`.
pub(crate) fn form_value(form: &[(String, String)], key: &str) -> Option<String> {
    form.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}
