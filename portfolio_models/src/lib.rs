mod macros;

pub mod email_address;
pub mod pagination;
pub mod submission;
