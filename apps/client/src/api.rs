//! Content API client: typed read/write wrappers, one pair per resource.
//!
//! No retries and no caching: callers re-fetch after a save.

use std::path::Path;

use portfolio_content::{
    About, Achievement, Certification, ContactInfo, Experience, Project, Resource, Service, Skill,
};
use reqwest::{multipart, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientError;

/// API base used when the client runs on the developer's machine.
pub const LOCAL_API_URL: &str = "http://localhost:4000";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    url: String,
}

pub fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "[::1]" | "::1")
}

/// Picks the local API when `hostname` is a loopback name, else the deployed one.
pub fn base_url_for_host<'a>(hostname: &str, deployed_url: &'a str) -> &'a str {
    if is_local_host(hostname) {
        LOCAL_API_URL
    } else {
        deployed_url
    }
}

#[derive(Clone)]
pub struct PortfolioClient {
    http: Client,
    base_url: String,
}

impl PortfolioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Reads ──────────────────────────────────────────────────────────────

    pub async fn fetch_skills(&self) -> Result<Vec<Skill>, ClientError> {
        self.fetch_collection().await
    }

    pub async fn fetch_certifications(&self) -> Result<Vec<Certification>, ClientError> {
        self.fetch_collection().await
    }

    /// Achievements degrade to an empty list when the endpoint is missing (404)
    /// or answers with something that is not the expected JSON.
    pub async fn fetch_achievements(&self) -> Result<Vec<Achievement>, ClientError> {
        let response = self.http.get(self.url(Achievement::NAME)).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Achievements endpoint not found; treating as empty");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: "Failed to fetch achievements".to_string(),
            });
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Achievements response was not valid JSON ({e}); treating as empty");
            Vec::new()
        }))
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.fetch_collection().await
    }

    pub async fn fetch_experiences(&self) -> Result<Vec<Experience>, ClientError> {
        self.fetch_collection().await
    }

    pub async fn fetch_services(&self) -> Result<Vec<Service>, ClientError> {
        self.fetch_collection().await
    }

    /// An unset singleton comes back as `{}`, i.e. all fields `None`.
    pub async fn fetch_contact_info(&self) -> Result<ContactInfo, ClientError> {
        self.fetch_singleton().await
    }

    pub async fn fetch_about(&self) -> Result<About, ClientError> {
        self.fetch_singleton().await
    }

    pub async fn fetch_collection<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        self.get_json(R::NAME).await
    }

    pub async fn fetch_singleton<R: Resource>(&self) -> Result<R, ClientError> {
        self.get_json(R::NAME).await
    }

    // ── Writes ─────────────────────────────────────────────────────────────

    pub async fn save_skills(&self, items: &[Skill], token: &str) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_certifications(
        &self,
        items: &[Certification],
        token: &str,
    ) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_achievements(
        &self,
        items: &[Achievement],
        token: &str,
    ) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_projects(&self, items: &[Project], token: &str) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_experiences(
        &self,
        items: &[Experience],
        token: &str,
    ) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_services(&self, items: &[Service], token: &str) -> Result<(), ClientError> {
        self.save_collection(items, token).await
    }

    pub async fn save_contact_info(
        &self,
        info: &ContactInfo,
        token: &str,
    ) -> Result<(), ClientError> {
        self.save_singleton(info, token).await
    }

    pub async fn save_about(&self, about: &About, token: &str) -> Result<(), ClientError> {
        self.save_singleton(about, token).await
    }

    /// Sends the whole collection; the server replaces what it had.
    pub async fn save_collection<R: Resource>(
        &self,
        items: &[R],
        token: &str,
    ) -> Result<(), ClientError> {
        self.put_json(R::NAME, items, token).await
    }

    pub async fn save_singleton<R: Resource>(&self, doc: &R, token: &str) -> Result<(), ClientError> {
        self.put_json(R::NAME, doc, token).await
    }

    // ── Uploads ────────────────────────────────────────────────────────────

    /// Uploads `data` as the `image` field and returns the served URL path.
    pub async fn upload_image(
        &self,
        file_name: &str,
        data: Vec<u8>,
        token: &str,
    ) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(self.url("upload"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response, "Image upload failed").await);
        }
        let body: UploadBody = response.json().await?;
        debug!("Uploaded {file_name} to {}", body.url);
        Ok(body.url)
    }

    pub async fn upload_file(&self, path: &Path, token: &str) -> Result<String, ClientError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.upload_image(&file_name, data, token).await
    }

    // ── Plumbing ───────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(resource)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("Failed to fetch {}", label(resource)),
            });
        }
        Ok(response.json().await?)
    }

    async fn put_json<T: Serialize + ?Sized>(
        &self,
        resource: &str,
        body: &T,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url(resource))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let fallback = format!("Failed to save {}", label(resource));
            return Err(api_error(status, response, &fallback).await);
        }
        debug!("Saved {resource}");
        Ok(())
    }
}

/// Prefers the server's `{"error": ...}` message over `fallback`.
async fn api_error(status: StatusCode, response: reqwest::Response, fallback: &str) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| fallback.to_string());
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

fn label(resource: &str) -> String {
    resource.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_selection() {
        let deployed = "https://portfolio-api.example.com";
        assert_eq!(base_url_for_host("localhost", deployed), LOCAL_API_URL);
        assert_eq!(base_url_for_host("127.0.0.1", deployed), LOCAL_API_URL);
        assert_eq!(base_url_for_host("[::1]", deployed), LOCAL_API_URL);
        assert_eq!(base_url_for_host("me.dev", deployed), deployed);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            PortfolioClient::new("http://localhost:4000/").base_url(),
            "http://localhost:4000"
        );
    }

    #[tokio::test]
    async fn test_fetch_skills() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/skills"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "Backend", "icon": "server", "skills": "Node,Express"}
            ])))
            .mount(&server)
            .await;

        let client = PortfolioClient::new(server.uri());
        let skills = client.fetch_skills().await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].skills.as_deref(), Some("Node,Express"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = PortfolioClient::new(server.uri())
            .fetch_projects()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch projects");
    }

    #[tokio::test]
    async fn test_achievements_missing_endpoint_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/achievements"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let achievements = PortfolioClient::new(server.uri())
            .fetch_achievements()
            .await
            .unwrap();
        assert!(achievements.is_empty());
    }

    #[tokio::test]
    async fn test_achievements_html_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/achievements"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let achievements = PortfolioClient::new(server.uri())
            .fetch_achievements()
            .await
            .unwrap();
        assert!(achievements.is_empty());
    }

    #[tokio::test]
    async fn test_empty_singleton_reads_as_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact-info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let info = PortfolioClient::new(server.uri())
            .fetch_contact_info()
            .await
            .unwrap();
        assert_eq!(info, ContactInfo::default());
    }

    #[tokio::test]
    async fn test_save_sends_whole_collection_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/services"))
            .and(header("authorization", "Bearer s3cret"))
            .and(body_json(json!([
                {"title": "APIs", "description": "REST", "features": ["Auth", "Docs"]}
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let services = vec![Service {
            title: Some("APIs".into()),
            description: Some("REST".into()),
            features: Some(vec!["Auth".into(), "Docs".into()]),
            ..Default::default()
        }];
        PortfolioClient::new(server.uri())
            .save_services(&services, "s3cret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_surfaces_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Each project must have at least a title and a description."
            })))
            .mount(&server)
            .await;

        let err = PortfolioClient::new(server.uri())
            .save_projects(&[Project::default()], "s3cret")
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "Each project must have at least a title and a description."
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_falls_back_when_error_body_missing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/contact-info"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
            .mount(&server)
            .await;

        let err = PortfolioClient::new(server.uri())
            .save_contact_info(&ContactInfo::default(), "s3cret")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to save contact info");
    }

    #[tokio::test]
    async fn test_upload_returns_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"url": "/uploads/1-2-avatar.png"})),
            )
            .mount(&server)
            .await;

        let url = PortfolioClient::new(server.uri())
            .upload_image("avatar.png", b"png-bytes".to_vec(), "s3cret")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/1-2-avatar.png");
    }

    #[tokio::test]
    async fn test_upload_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})))
            .mount(&server)
            .await;

        let err = PortfolioClient::new(server.uri())
            .upload_image("avatar.png", vec![1, 2, 3], "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
