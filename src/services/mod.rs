// Service module exports

pub mod layout;
pub mod store;
pub mod sync;
