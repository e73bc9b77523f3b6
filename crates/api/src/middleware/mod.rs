pub mod request_meta;

pub use request_meta::{finalize_error_body, REQUEST_ID_HEADER};
