//! DTOs exchanged with the transport layer.

pub mod search;
