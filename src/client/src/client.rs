//! JSON-RPC client for a TON node endpoint.

use crate::errors::ClientError;
use crate::types::Address;
use tracing::debug;

/// A client bound to one node endpoint and optional API key.
///
/// Construction has no side effects; no network traffic happens until
/// a method is called.
#[derive(Debug, Clone)]
pub struct TonClient {
    endpoint: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl TonClient {
    /// Creates a client bound to the given endpoint.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Gets the balance of an account, in nano units.
    pub async fn get_balance(&self, address: &Address) -> Result<u128, ClientError> {
        let result = self
            .call("getBalance", serde_json::json!([address.to_string()]))
            .await?;

        // The node may report the balance as a number, a decimal
        // string, or null for an uninitialized account.
        let balance = if result.is_u64() {
            result.as_u64().unwrap() as u128
        } else if result.is_string() {
            result
                .as_str()
                .unwrap()
                .parse::<u128>()
                .map_err(|e| ClientError::NodeRequestFailed(format!("Invalid balance string: {}", e)))?
        } else if result.is_null() {
            0
        } else {
            return Err(ClientError::NodeRequestFailed(format!(
                "Invalid balance format: {}",
                result
            )));
        };

        Ok(balance)
    }

    /// Gets the current seqno of an account.
    ///
    /// Uninitialized accounts report a null seqno, which reads as 0.
    pub async fn get_seqno(&self, address: &Address) -> Result<u32, ClientError> {
        let result = self
            .call("getSeqno", serde_json::json!([address.to_string()]))
            .await?;

        if result.is_null() {
            return Ok(0);
        }

        let seqno = result
            .as_u64()
            .ok_or_else(|| ClientError::NodeRequestFailed(format!("Invalid seqno: {}", result)))?;

        u32::try_from(seqno)
            .map_err(|_| ClientError::NodeRequestFailed(format!("Seqno out of range: {}", seqno)))
    }

    /// Submits a signed external message to the mempool.
    pub async fn send_transaction(&self, message: &serde_json::Value) -> Result<(), ClientError> {
        self.call("sendTransaction", serde_json::json!([message]))
            .await?;
        Ok(())
    }

    /// Calls a JSON-RPC method and returns its `result` member.
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("X-API-Key", api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to connect to node: {}", e)))?;

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to get response text: {}", e)))?;
        debug!("Raw {} response: {}", method, response_text);

        if response_text.is_empty() {
            return Err(ClientError::Network("Empty response from node".to_string()));
        }

        let response: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| ClientError::Network(format!("Failed to parse response: {}", e)))?;

        // Check for errors
        if let Some(error) = response.get("error") {
            if !error.is_null() {
                return Err(ClientError::Rpc(error.to_string()));
            }
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| {
                ClientError::NodeRequestFailed(format!("No result in response: {}", response_text))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_is_local() {
        let client = TonClient::new("https://toncenter.com/api/v2/jsonRPC", Some("key".to_string()));
        assert_eq!(client.endpoint(), "https://toncenter.com/api/v2/jsonRPC");
    }
}
