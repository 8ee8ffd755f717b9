// Experience records: storage seam and CRUD handlers.

pub mod handlers;
pub mod store;
