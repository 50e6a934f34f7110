use crate::api::{ApiError, OperationsApi, SearchDefinition};
use tracing::{error, info};

/// Which page is asking for the saved searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Only active searches can be run.
    Search,
    /// Everything is editable; a 404 just means nothing was saved yet.
    Editor,
}

pub fn get_requests(
    api: &dyn OperationsApi,
    workflow: Workflow,
) -> Result<Vec<SearchDefinition>, ApiError> {
    match api.get_requests() {
        Ok(requests) if workflow == Workflow::Search => {
            Ok(requests.into_iter().filter(SearchDefinition::is_active).collect())
        }
        Ok(requests) => Ok(requests),
        Err(e) if workflow == Workflow::Editor && e.is_not_found() => {
            info!("No requests saved yet");
            Ok(Vec::new())
        }
        Err(e) => {
            error!("There was an issue while acquiring requests: {e}");
            Err(e)
        }
    }
}

pub fn requests_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Connection(_) => "Oops ! L'API semble down.".to_string(),
        ApiError::Status { message, .. } => {
            format!("Oops ! Il y a eu un souci avec l'acquisition des recherches : {message}")
        }
        ApiError::Payload(_) => {
            "Oops ! Les recherches renvoyées par l'API sont illisibles.".to_string()
        }
    }
}

pub fn save_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Connection(_) => "Oops ! L'API semble down.".to_string(),
        ApiError::Status { message, .. } => {
            format!("Oops ! Il y a eu un souci avec la sauvegarde des recherches : {message}")
        }
        ApiError::Payload(msg) => format!("Oops ! Réponse inattendue de l'API : {msg}"),
    }
}
