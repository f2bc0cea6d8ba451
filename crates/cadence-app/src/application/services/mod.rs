mod identity_resolver;

pub use identity_resolver::{ClientAliases, IdentityResolver};
