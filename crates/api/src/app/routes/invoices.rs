use axum::{
    Form, Router,
    extract::{Extension, Path},
    routing::post,
};

use invoicedesk_invoicing::{FormField, RawForm};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/create", post(create_invoice))
        .route("/:id/edit", post(edit_invoice))
        .route("/:id/delete", post(delete_invoice))
}

pub async fn create_invoice(
    Extension(services): Extension<AppServices>,
    Form(raw): Form<RawForm>,
) -> axum::response::Response {
    let mutations = services.mutations();
    let outcome = mutations.create_from_form(None, &raw).await;
    errors::form_outcome_to_response(outcome, mutations.navigator().take())
}

/// The invoice id comes from the path and replaces any `id` field in the body.
pub async fn edit_invoice(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    Form(mut raw): Form<RawForm>,
) -> axum::response::Response {
    raw.insert(FormField::Id.as_str(), id);

    let mutations = services.mutations();
    let outcome = mutations.edit_from_form(None, &raw).await;
    errors::form_outcome_to_response(outcome, mutations.navigator().take())
}

pub async fn delete_invoice(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let mutations = services.mutations();
    let outcome = mutations.delete_by_raw_id(&id).await;
    errors::mutation_to_response(outcome, mutations.navigator().take())
}
