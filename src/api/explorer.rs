use super::{decode, ApiClient};
use crate::error::{FetchError, FetchResult};
use serde::Deserialize;
use serde_json::Value;

const SERVICE: &str = "block explorer";

pub const TX_SUCCEEDED: &str = "Transaction is successful ✅";
pub const TX_FAILED: &str = "Transaction failed ❌";
pub const TX_UNAVAILABLE: &str = "Unable to check transaction status.";

/// Receipt status as reported by the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Deserialize)]
struct ReceiptEnvelope {
    result: Value,
}

impl ApiClient {
    /// Receipt status of `tx_hash` as a sentence.
    ///
    /// The hash is sent as given; the explorer decides whether it exists.
    pub async fn transaction_status(&self, tx_hash: &str) -> String {
        match self.try_transaction_status(tx_hash).await {
            Ok(ReceiptStatus::Succeeded) => TX_SUCCEEDED.to_string(),
            Ok(ReceiptStatus::Failed) => TX_FAILED.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, tx_hash, "transaction status lookup failed");
                TX_UNAVAILABLE.to_string()
            }
        }
    }

    async fn try_transaction_status(&self, tx_hash: &str) -> FetchResult<ReceiptStatus> {
        let api_key = self
            .etherscan_api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential("explorer API key"))?;

        let request = self.client.get(&self.endpoints.explorer_base_url).query(&[
            ("module", "transaction"),
            ("action", "gettxreceiptstatus"),
            ("txhash", tx_hash),
            ("apikey", api_key),
        ]);

        let body = self.send(SERVICE, request).await?;
        let envelope: ReceiptEnvelope = decode(SERVICE, &body)?;
        receipt_status(&envelope.result)
    }
}

/// `"1"` is success. Any other status, including a `result` that carries no
/// status at all, is a failure. A null result means the lookup itself failed.
fn receipt_status(result: &Value) -> FetchResult<ReceiptStatus> {
    if result.is_null() {
        return Err(FetchError::MissingField { service: SERVICE });
    }

    match result.get("status").and_then(Value::as_str) {
        Some("1") => Ok(ReceiptStatus::Succeeded),
        _ => Ok(ReceiptStatus::Failed),
    }
}
