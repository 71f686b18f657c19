use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

use super::CrmSink;
use crate::config::OdooConfig;
use crate::error::{Error, Result};

/// Odoo JSON-RPC client. Logs in for every operation; no session is kept.
pub struct OdooClient {
    client: Client,
    config: OdooConfig,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    message: Option<String>,
}

struct Credentials<'a> {
    url: &'a str,
    db: &'a str,
    username: &'a str,
    password: &'a str,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::upstream("odoo", format!("{name} is not set")))
}

impl OdooClient {
    pub fn new(config: &OdooConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            next_id: AtomicU64::new(1),
        }
    }

    fn credentials(&self) -> Result<Credentials<'_>> {
        Ok(Credentials {
            url: required(&self.config.url, "ODOO_URL")?.trim_end_matches('/'),
            db: required(&self.config.db, "ODOO_DB")?,
            username: required(&self.config.username, "ODOO_USERNAME")?,
            password: required(&self.config.password, "ODOO_PASSWORD")?,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        url: &str,
        service: &str,
        method: &str,
        args: Value,
    ) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": { "service": service, "method": method, "args": args },
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
        });

        let response = self
            .client
            .post(format!("{url}/jsonrpc"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::upstream("odoo", format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::upstream("odoo", format!("server returned {status}: {text}")));
        }

        let rpc: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::upstream("odoo", format!("unreadable response: {e}")))?;

        if let Some(err) = rpc.error {
            let detail = err.data.and_then(|d| d.message).unwrap_or(err.message);
            return Err(Error::upstream("odoo", detail));
        }
        rpc.result
            .ok_or_else(|| Error::upstream("odoo", "response carried no result"))
    }

    /// Authenticates and returns the user id.
    pub async fn connect(&self) -> Result<i64> {
        let creds = self.credentials()?;
        let uid: Value = self
            .call(
                creds.url,
                "common",
                "login",
                json!([creds.db, creds.username, creds.password]),
            )
            .await
            .inspect_err(|e| error!("Failed to connect to Odoo: {}", e))?;

        // Odoo answers `false` for bad credentials.
        uid.as_i64()
            .ok_or_else(|| Error::upstream("odoo", "authentication failed: invalid credentials"))
    }

    async fn execute_kw<T: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<T> {
        let uid = self.connect().await?;
        let creds = self.credentials()?;
        debug!("Odoo {}.{} as uid {}", model, method, uid);
        self.call(
            creds.url,
            "object",
            "execute_kw",
            json!([creds.db, uid, creds.password, model, method, args, kwargs]),
        )
        .await
    }
}

#[async_trait]
impl CrmSink for OdooClient {
    async fn create(&self, model: &str, values: Value) -> Result<i64> {
        self.execute_kw(model, "create", json!([values]), json!({}))
            .await
    }

    async fn search(&self, model: &str, domain: Value, limit: Option<u32>) -> Result<Vec<i64>> {
        let kwargs = match limit {
            Some(limit) => json!({ "limit": limit, "order": "id desc" }),
            None => json!({ "order": "id desc" }),
        };
        self.execute_kw(model, "search", json!([domain]), kwargs)
            .await
    }

    async fn read(&self, model: &str, ids: &[i64], fields: &[&str]) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.execute_kw(model, "read", json!([ids]), json!({ "fields": fields }))
            .await
    }
}
