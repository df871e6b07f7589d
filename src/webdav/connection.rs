use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::errors::DavError;
use crate::webdav::config::{Credentials, MountConfig};
use crate::webdav::paths;

/// Fixed prop-list requested on every PROPFIND.
const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<propfind xmlns="DAV:">
  <prop>
    <getlastmodified xmlns="DAV:"/>
    <getcontentlength xmlns="DAV:"/>
    <resourcetype xmlns="DAV:"/>
  </prop>
</propfind>"#;

/// Issues authenticated requests against the remote collection and
/// classifies outcomes into the `DavError` taxonomy. One request per
/// operation, no retries: the host surfaces failures to the user.
#[derive(Debug)]
pub struct DavConnection {
    client: Client,
    config: MountConfig,
}

impl DavConnection {
    pub fn new(config: MountConfig) -> Result<Self, DavError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &MountConfig {
        &self.config
    }

    /// Full request URL: `base_url + prefix + virtual_path`.
    fn url_for(&self, virtual_path: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url,
            paths::to_server_path(virtual_path, &self.config.prefix)
        )
    }

    /// Attaches exactly one Authorization header: bearer token first, then
    /// Basic auth with the fixed username "apikey", else none.
    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.credentials {
            Credentials::Bearer { token } => request.bearer_auth(token),
            Credentials::ApiKey { key } => request.basic_auth("apikey", Some(key)),
            Credentials::None => request,
        }
    }

    async fn send(
        &self,
        method: Method,
        virtual_path: &str,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Response, DavError> {
        let url = self.url_for(virtual_path);
        debug!("{} {}", method, url);

        let mut request = self.apply_auth(self.client.request(method, &url));

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(DavError::NotFound);
        }

        if !status.is_success() {
            return Err(DavError::RequestFailed {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// PROPFIND with Depth 1; returns the multistatus body text.
    pub async fn propfind(&self, virtual_path: &str) -> Result<String, DavError> {
        let response = self
            .send(
                dav_method(b"PROPFIND"),
                virtual_path,
                &[("Depth", "1"), ("Content-Type", "application/xml")],
                Some(PROPFIND_BODY.as_bytes().to_vec()),
            )
            .await?;

        Ok(response.text().await?)
    }

    pub async fn get(&self, virtual_path: &str) -> Result<Vec<u8>, DavError> {
        let response = self.send(Method::GET, virtual_path, &[], None).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn put(&self, virtual_path: &str, content: Vec<u8>) -> Result<(), DavError> {
        self.send(Method::PUT, virtual_path, &[], Some(content))
            .await?;
        Ok(())
    }

    /// MOVE; the Destination header carries the prefixed target path.
    pub async fn mv(
        &self,
        virtual_path: &str,
        destination_path: &str,
    ) -> Result<(), DavError> {
        let destination = paths::to_server_path(destination_path, &self.config.prefix);
        self.send(
            dav_method(b"MOVE"),
            virtual_path,
            &[("Destination", destination.as_str())],
            None,
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, virtual_path: &str) -> Result<(), DavError> {
        self.send(Method::DELETE, virtual_path, &[], None).await?;
        Ok(())
    }

    pub async fn mkcol(&self, virtual_path: &str) -> Result<(), DavError> {
        self.send(dav_method(b"MKCOL"), virtual_path, &[], None)
            .await?;
        Ok(())
    }
}

/// WebDAV extension verbs have no `Method` constants; the byte strings here
/// are valid HTTP method tokens.
fn dav_method(name: &'static [u8]) -> Method {
    Method::from_bytes(name).expect("static WebDAV method token")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(credentials: Credentials) -> MountConfig {
        MountConfig::new("https://dav.example.com", Some("/remote"), credentials).unwrap()
    }

    #[test]
    fn test_url_includes_prefix() {
        let connection = DavConnection::new(test_config(Credentials::None)).unwrap();
        assert_eq!(
            connection.url_for("/docs/a.txt"),
            "https://dav.example.com/remote/docs/a.txt"
        );
    }

    #[test]
    fn test_root_url() {
        let connection = DavConnection::new(test_config(Credentials::None)).unwrap();
        assert_eq!(connection.url_for("/"), "https://dav.example.com/remote/");
    }

    #[test]
    fn test_url_without_prefix() {
        let config = MountConfig::new("http://localhost:9190", None, Credentials::None).unwrap();
        let connection = DavConnection::new(config).unwrap();
        assert_eq!(connection.url_for("/a.txt"), "http://localhost:9190/a.txt");
    }
}
