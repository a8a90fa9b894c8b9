//! HTTP Backend
//!
//! `reqwest` implementation of [`HttpBackend`]. On wasm32 reqwest drives the
//! browser `fetch` API, so same-origin cookies travel with every request.

use async_trait::async_trait;

use crate::traits::{HttpBackend, HttpReply};

#[derive(Clone, Default)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<HttpReply, String> {
        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(HttpReply { status, body })
    }
}

fn with_headers(mut request: reqwest::RequestBuilder, headers: &[(String, String)]) -> reqwest::RequestBuilder {
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request
}

#[async_trait(?Send)]
impl HttpBackend for ReqwestBackend {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &[(String, String)],
    ) -> Result<HttpReply, String> {
        let request = with_headers(self.client.post(url), headers).form(form);
        Self::send(request).await
    }

    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpReply, String> {
        Self::send(with_headers(self.client.get(url), headers)).await
    }
}
