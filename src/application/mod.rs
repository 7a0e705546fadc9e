pub mod reducer;
pub mod status;
pub mod store;
pub mod todolists_service;
