//! Credential-injecting [`HttpClient`](crate::fetch::HttpClient) decorators.

mod url_param;

pub use url_param::UrlParam;
