//! Query-string boundary for the lookup service

mod core;
mod errors;

pub use self::core::{
    Query, QueryResponse, STATUS_INVALID_QUERY, STATUS_OK, STATUS_SERVER_ERROR, handle_query,
    parse_query,
};
pub use errors::QueryError;

#[cfg(test)]
mod tests;
