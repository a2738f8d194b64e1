use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod cashbook;
mod categories;
mod customers;
mod ledger;
mod profile;
mod server;

pub mod types {
    pub use api_types::{Amount, Created};

    pub mod profile {
        pub use api_types::profile::{Profile, ProfileUpdate};
    }

    pub mod customer {
        pub use api_types::customer::{CustomerList, CustomerNew, CustomerView};
    }

    pub mod ledger {
        pub use api_types::ledger::{LedgerEntryNew, LedgerEntryView, LedgerView};
    }

    pub mod cashbook {
        pub use api_types::cashbook::{
            CashbookEntries, CashbookEntryNew, CashbookEntryView, CashbookQuery, CashbookSummary,
        };
    }

    pub mod category {
        pub use api_types::category::{CategoryList, CategoryNew, CategorySummary, CategoryView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    NotImplemented(&'static str),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnauthorizedOrNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Unauthorized => StatusCode::UNAUTHORIZED,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        // A stored amount that no longer parses is a data problem, not a
        // client one.
        EngineError::MalformedAmount {
            entry_id: Some(_), ..
        } => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::InvalidEntryType(_)
        | EngineError::InvalidPaymentMode(_)
        | EngineError::InvalidCategoryType(_)
        | EngineError::MalformedAmount { entry_id: None, .. }
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidName(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(reason) => {
            tracing::error!("password hashing failed: {reason}");
            "internal server error".to_string()
        }
        err @ EngineError::MalformedAmount {
            entry_id: Some(_), ..
        } => {
            tracing::error!("{err}");
            err.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotImplemented(what) => {
                (StatusCode::NOT_IMPLEMENTED, format!("{what} is not implemented"))
            }
        };

        let mut response = (status, Json(Error { error })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"ledgerbook\""),
            );
        }
        response
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
