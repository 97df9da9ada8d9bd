//! HTTP client abstraction for testability

use super::types::LocatorError;

/// Trait for async HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    async fn get(&self, url: &str) -> Result<Vec<u8>, LocatorError>;
}

/// Real HTTP client implementation using reqwest.
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, LocatorError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| LocatorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Creates a new client with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, LocatorError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LocatorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, LocatorError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LocatorError::Http(format!("Request failed: {}", e)))?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(LocatorError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        // Read response body
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| LocatorError::Http(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock HTTP client for testing
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, LocatorError>,
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, LocatorError> {
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockAsyncHttpClient {
            response: Ok(vec![1, 2, 3, 4]),
        };

        let result = mock.get("http://example.com").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockAsyncHttpClient {
            response: Err(LocatorError::Http("Test error".to_string())),
        };

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }
}
