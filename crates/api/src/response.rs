//! Response envelopes.
//!
//! Every body is `{ "data": ... }`. Paged listings also echo the `limit`
//! and `offset` that produced them so clients can request the next page.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "limit": n, "offset": n }`.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}
