mod access;
mod resolver;

pub use access::check_access;
pub use resolver::PathResolver;
