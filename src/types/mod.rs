pub mod hourly_frame;
pub mod hourly_variables;
pub mod request;
pub mod response;
