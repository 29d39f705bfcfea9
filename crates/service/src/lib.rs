//! Service layer for the drawing store.
//! - `drawing::domain` holds the wire-level records and the pure update merge.
//! - `drawing::repository` is the storage seam, with a SeaORM implementation.
//! - `drawing::service` applies the create/list/get/update/delete contract.

pub mod errors;
pub mod drawing;
#[cfg(test)]
pub mod test_support;
