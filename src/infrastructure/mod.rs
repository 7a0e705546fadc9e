pub mod http_api;
pub mod in_memory_api;
