mod handler;
mod parser;
mod validator;
mod headers;
pub(crate) mod disk;

pub use handler::serve_file;
pub use headers::{apply_static_headers, content_disposition};
pub use parser::{parse_request_path, ParsedRequest};
