use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use invoicedesk_invoicing::{FormOutcome, MutationOutcome};

/// Map a mutation result to HTTP.
///
/// - navigation requested: `303 See Other` to the requested view
/// - success without navigation: `204 No Content`
/// - storage failure: `500` with the fixed message
pub fn mutation_to_response(outcome: MutationOutcome, redirect: Option<String>) -> Response {
    match (outcome, redirect) {
        (MutationOutcome::Success, Some(path)) => Redirect::to(&path).into_response(),
        (MutationOutcome::Success, None) => StatusCode::NO_CONTENT.into_response(),
        (MutationOutcome::Failure { message }, _) => {
            json_message(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

/// Like [`mutation_to_response`], plus `422` with the form state on rejection.
pub fn form_outcome_to_response(outcome: FormOutcome, redirect: Option<String>) -> Response {
    match outcome {
        FormOutcome::Rejected(state) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(state)).into_response()
        }
        FormOutcome::Mutation(outcome) => mutation_to_response(outcome, redirect),
    }
}

pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "message": message.into() }))).into_response()
}
