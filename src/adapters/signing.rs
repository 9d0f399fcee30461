use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs search-ad requests.
///
/// ```text
/// message   = "{timestamp}.{METHOD}.{uri}"
/// signature = base64(HMAC-SHA256(secret_key, message))
/// ```
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    secret_key: String,
    customer_id: String,
}

/// Header values for one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub timestamp: String,
    pub api_key: String,
    pub customer_id: String,
    pub signature: String,
}

impl SignedHeaders {
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("X-Timestamp", self.timestamp.as_str()),
            ("X-API-KEY", self.api_key.as_str()),
            ("X-Customer", self.customer_id.as_str()),
            ("X-Signature", self.signature.as_str()),
        ]
    }
}

impl RequestSigner {
    pub fn new(api_key: &str, secret_key: &str, customer_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            secret_key: secret_key.to_string(),
            customer_id: customer_id.to_string(),
        }
    }

    pub fn signature(&self, timestamp: &str, method: &str, uri: &str) -> String {
        let message = format!("{}.{}.{}", timestamp, method, uri);
        // HMAC 接受任意長度的金鑰
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    pub fn sign_at(&self, timestamp_millis: i64, method: &str, uri: &str) -> SignedHeaders {
        let timestamp = timestamp_millis.to_string();
        let signature = self.signature(&timestamp, method, uri);
        SignedHeaders {
            timestamp,
            api_key: self.api_key.clone(),
            customer_id: self.customer_id.clone(),
            signature,
        }
    }

    pub fn sign(&self, method: &str, uri: &str) -> SignedHeaders {
        self.sign_at(chrono::Utc::now().timestamp_millis(), method, uri)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .field("secret_key", &"***")
            .field("customer_id", &self.customer_id)
            .finish()
    }
}
