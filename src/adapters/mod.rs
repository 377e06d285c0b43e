// Adapters layer: concrete log sources (NextDNS REST API, saved files).

pub mod api;
pub mod file;
