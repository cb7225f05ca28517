pub mod body;
pub mod client;
pub mod response;

pub use body::ResponseBody;
pub use client::HttpClient;
pub use response::RawResponse;
