use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::{Draft, Envelope, Task};

/// The backend surface the board consumes. A trait so the TUI state can be
/// exercised against an in-memory fake.
pub trait TodoApi {
    fn list(&self) -> Result<Envelope<Vec<Task>>>;
    fn create(&self, draft: &Draft) -> Result<Envelope<Task>>;
    fn update(&self, id: &str, draft: &Draft) -> Result<Envelope<Task>>;
    fn delete(&self, id: &str) -> Result<Envelope<Task>>;
    fn toggle(&self, id: &str) -> Result<Envelope<Task>>;
}

/// Blocking HTTP client over the `/api/todos` REST surface.
pub struct HttpTodoApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTodoApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> Result<Envelope<Vec<Task>>> {
        let url = self.url("/todos");
        self.client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {url}"))?
            .json()
            .with_context(|| format!("GET {url}: malformed response body"))
    }

    fn create(&self, draft: &Draft) -> Result<Envelope<Task>> {
        let url = self.url("/todos");
        self.client
            .post(&url)
            .json(draft)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("POST {url}"))?
            .json()
            .with_context(|| format!("POST {url}: malformed response body"))
    }

    fn update(&self, id: &str, draft: &Draft) -> Result<Envelope<Task>> {
        let url = self.url(&format!("/todos/{id}"));
        self.client
            .put(&url)
            .json(draft)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("PUT {url}"))?
            .json()
            .with_context(|| format!("PUT {url}: malformed response body"))
    }

    fn delete(&self, id: &str) -> Result<Envelope<Task>> {
        let url = self.url(&format!("/todos/{id}"));
        self.client
            .delete(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("DELETE {url}"))?
            .json()
            .with_context(|| format!("DELETE {url}: malformed response body"))
    }

    fn toggle(&self, id: &str) -> Result<Envelope<Task>> {
        let url = self.url(&format!("/todos/{id}/toggle"));
        self.client
            .patch(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("PATCH {url}"))?
            .json()
            .with_context(|| format!("PATCH {url}: malformed response body"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpTodoApi::new("http://localhost:8080/api/").unwrap();
        assert_eq!(api.url("/todos"), "http://localhost:8080/api/todos");
    }

    #[test]
    fn endpoint_paths() {
        let api = HttpTodoApi::new("http://localhost:8080/api").unwrap();
        assert_eq!(api.url("/todos/t1"), "http://localhost:8080/api/todos/t1");
        assert_eq!(
            api.url("/todos/t1/toggle"),
            "http://localhost:8080/api/todos/t1/toggle"
        );
    }
}
