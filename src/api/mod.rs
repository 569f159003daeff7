//! Lambda handlers and request processing

pub mod helpers;
pub mod multipart;
pub mod parsing;
pub mod presign;

pub use multipart::MultipartHandler;
pub use parsing::ApiRequest;
pub use presign::PresignHandler;
