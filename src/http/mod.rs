/// HTTP helpers shared by the identity service clients.
pub mod fetch;
