pub mod forward;
pub mod reverse;
pub mod sig;

pub(crate) mod util;
