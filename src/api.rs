//! HTTP client for the NeoStore supplier REST API
//!
//! Every operation issues one request, bounded by the configured timeout.
//! Non-2xx responses are shaped into [`Error::Server`] carrying the status,
//! a short error string and any field-level detail the backend reported.

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::model::{ApiErrorBody, ImportReport, NewSupplier, Page, Supplier};

/// Client for the supplier CRUD and import endpoints
#[derive(Debug, Clone)]
pub struct SupplierApi {
    base_url: Url,
    http_client: Client,
    options: ClientOptions,
}

impl SupplierApi {
    /// Create a new client from an HTTP client and options.
    ///
    /// # Example
    ///
    /// ```
    /// use neostore_suppliers::{ClientOptions, SupplierApi};
    ///
    /// let options = ClientOptions::default().with_base_url("http://localhost:8080/neostore/api/v1");
    /// let api = SupplierApi::new(reqwest::Client::new(), options).unwrap();
    /// ```
    pub fn new(http_client: Client, options: ClientOptions) -> Result<Self> {
        let base_url = Url::parse(&options.base_url)?;
        Ok(Self {
            base_url,
            http_client,
            options,
        })
    }

    /// Create a client with a fresh HTTP client and default options
    pub fn with_defaults() -> Result<Self> {
        Self::new(Client::new(), ClientOptions::default())
    }

    /// The options this client was built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Fetch one page of suppliers
    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<Supplier>> {
        let mut url = self.endpoint(&["suppliers"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());
        debug!("GET {url}");
        self.execute(self.http_client.get(url)).await
    }

    /// Create a supplier; returns the record with its assigned identifier
    pub async fn create(&self, supplier: &NewSupplier) -> Result<Supplier> {
        let url = self.endpoint(&["suppliers"])?;
        debug!("POST {url}");
        self.execute(self.http_client.post(url).json(supplier)).await
    }

    /// Replace the supplier identified by `id`
    pub async fn update(&self, id: i64, supplier: &NewSupplier) -> Result<Supplier> {
        let url = self.endpoint(&["suppliers", &id.to_string()])?;
        debug!("PUT {url}");
        self.execute(self.http_client.put(url).json(supplier)).await
    }

    /// Delete the supplier identified by `id`
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&["suppliers", &id.to_string()])?;
        debug!("DELETE {url}");
        let response = self.send(self.http_client.delete(url)).await?;
        if !response.status().is_success() {
            return Err(shape_error(response).await);
        }
        Ok(())
    }

    /// Submit a batch of suppliers for import
    pub async fn import(&self, suppliers: &[NewSupplier]) -> Result<ImportReport> {
        let url = self.endpoint(&["suppliers", "import"])?;
        debug!("POST {url} ({} records)", suppliers.len());
        self.execute(self.http_client.post(url).json(&suppliers)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Url(url::ParseError::EmptyHost))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .timeout(self.options.request_timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    Error::Timeout
                } else {
                    Error::Http(err)
                }
            })
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(shape_error(response).await);
        }
        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-2xx response into a structured error. A body that fails to
/// parse still yields a generic message rather than a parse failure.
async fn shape_error(response: Response) -> Error {
    let status = response.status().as_u16();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => Error::Server {
            status: body.status.unwrap_or(status),
            error: body
                .error
                .unwrap_or_else(|| format!("HTTP error! status: {status}")),
            field_errors: body.field_errors,
        },
        Err(err) => {
            warn!("unparsable error body for status {status}: {err}");
            Error::Server {
                status,
                error: format!("HTTP error! status: {status}"),
                field_errors: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(server: &MockServer) -> SupplierApi {
        let options = ClientOptions::default().with_base_url(&server.uri());
        SupplierApi::new(Client::new(), options).unwrap()
    }

    fn test_supplier() -> NewSupplier {
        NewSupplier {
            name: "Fornecedor Teste".into(),
            email: "contato@fornecedor.com.br".into(),
            description: "Fornecedor de teste".into(),
            cnpj: "11.222.333/0001-81".into(),
        }
    }

    #[tokio::test]
    async fn list_returns_page_and_total() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .and(query_param("page", "2"))
            .and(query_param("pageSize", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": 6,
                        "name": "Fornecedor Seis",
                        "email": "seis@fornecedor.com.br",
                        "description": "",
                        "cnpj": "11222333000181"
                    }
                ],
                "total": 6
            })))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        let page = api.list(2, 5).await.unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 6);
        assert_eq!(page.data[0].name, "Fornecedor Seis");
    }

    #[tokio::test]
    async fn create_posts_record_without_id() {
        let mock_server = MockServer::start().await;
        let supplier = test_supplier();

        Mock::given(method("POST"))
            .and(path("/suppliers"))
            .and(body_json(&supplier))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1,
                "name": "Fornecedor Teste",
                "email": "contato@fornecedor.com.br",
                "description": "Fornecedor de teste",
                "cnpj": "11.222.333/0001-81"
            })))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        let created = api.create(&supplier).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, supplier.name);
    }

    #[tokio::test]
    async fn update_puts_to_the_id_path() {
        let mock_server = MockServer::start().await;
        let supplier = test_supplier();

        Mock::given(method("PUT"))
            .and(path("/suppliers/42"))
            .and(body_json(&supplier))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "name": "Fornecedor Teste",
                "email": "contato@fornecedor.com.br",
                "description": "Fornecedor de teste",
                "cnpj": "11.222.333/0001-81"
            })))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        let updated = api.update(42, &supplier).await.unwrap();
        assert_eq!(updated.id, 42);
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/suppliers/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        assert!(api.delete(7).await.is_ok());
    }

    #[tokio::test]
    async fn server_error_carries_field_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/suppliers"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "status": 422,
                "error": "Unprocessable Entity",
                "path": "/api/v1/suppliers",
                "timestamp": "2024-01-01T00:00:00Z",
                "fieldErrors": [
                    { "field": "cnpj", "message": "CNPJ já cadastrado: 11222333000181" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        let err = api.create(&test_supplier()).await.unwrap_err();
        match err {
            Error::Server {
                status,
                error,
                field_errors,
            } => {
                assert_eq!(status, 422);
                assert_eq!(error, "Unprocessable Entity");
                assert_eq!(field_errors.len(), 1);
                assert_eq!(field_errors[0].field, "cnpj");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_error_body_falls_back_to_generic() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
            .mount(&mock_server)
            .await;

        let api = test_api(&mock_server);
        let err = api.list(1, 5).await.unwrap_err();
        match err {
            Error::Server {
                status,
                error,
                field_errors,
            } => {
                assert_eq!(status, 500);
                assert_eq!(error, "HTTP error! status: 500");
                assert!(field_errors.is_empty());
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [], "total": 0 }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let options = ClientOptions::default()
            .with_base_url(&mock_server.uri())
            .with_request_timeout(Duration::from_millis(50));
        let api = SupplierApi::new(Client::new(), options).unwrap();

        let err = api.list(1, 5).await.unwrap_err();
        assert!(matches!(err, Error::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn base_path_is_preserved() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/neostore/api/v1/suppliers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": [], "total": 0 })),
            )
            .mount(&mock_server)
            .await;

        let options = ClientOptions::default()
            .with_base_url(&format!("{}/neostore/api/v1", mock_server.uri()));
        let api = SupplierApi::new(Client::new(), options).unwrap();
        assert!(api.list(1, 5).await.is_ok());
    }
}
