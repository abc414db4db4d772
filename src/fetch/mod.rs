mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::Result;
use serde::de::DeserializeOwned;

/// Issues a GET for `url` through `client` and decodes the JSON body.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a non-2xx
/// status, or the body is not valid JSON for `T`.
pub async fn fetch_json<C, T>(client: &C, url: reqwest::Url) -> Result<T>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.json::<T>().await?)
}
