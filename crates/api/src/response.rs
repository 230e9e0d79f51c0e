//! Response envelope for API handlers.
//!
//! Public browse endpoints wrap their payload in `{ "data": ... }` so list
//! and object responses share one shape. Build the envelope with
//! [`DataResponse::new`] rather than ad-hoc `json!` blocks.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        DataResponse { data }
    }
}
