pub mod odoo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::mentions::Platform;

pub use odoo::OdooClient;

pub const LEAD_MODEL: &str = "crm.lead";
pub const POST_MODEL: &str = "social.post";
const LEAD_NAME_PREFIX: &str = "Lead from ";

/// Remote business-object store.
#[async_trait]
pub trait CrmSink: Send + Sync {
    async fn create(&self, model: &str, values: Value) -> Result<i64>;

    async fn search(&self, model: &str, domain: Value, limit: Option<u32>) -> Result<Vec<i64>>;

    async fn read(&self, model: &str, ids: &[i64], fields: &[&str]) -> Result<Vec<Value>>;
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLead {
    pub name: String,
    pub contact_name: String,
    pub description: String,
}

impl NewLead {
    pub fn new(platform: Platform, contact_name: &str, description: &str) -> Self {
        Self {
            name: format!("{LEAD_NAME_PREFIX}{}: {contact_name}", platform.label()),
            contact_name: contact_name.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LeadRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "odoo_optional")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "odoo_optional")]
    pub description: Option<String>,
}

/// Odoo sends `false` for empty char/text fields.
fn odoo_optional<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub async fn create_lead(crm: &dyn CrmSink, lead: &NewLead) -> Result<i64> {
    info!("Creating lead in CRM for {}", lead.contact_name);
    let values = json!({
        "name": lead.name,
        "contact_name": lead.contact_name,
        "description": lead.description,
    });
    let id = crm.create(LEAD_MODEL, values).await?;
    info!("Lead created with ID {}", id);
    Ok(id)
}

/// Creates a draft post linked to one social account.
pub async fn schedule_post(crm: &dyn CrmSink, message: &str, social_account_id: i64) -> Result<i64> {
    let values = json!({
        "message": message,
        "account_ids": [[6, 0, [social_account_id]]],
        "state": "draft",
    });
    let id = crm.create(POST_MODEL, values).await?;
    info!("Social post {} created for account {}", id, social_account_id);
    Ok(id)
}

/// Leads created by this service, newest first.
pub async fn list_leads(
    crm: &dyn CrmSink,
    contact_name: Option<&str>,
    limit: u32,
) -> Result<Vec<LeadRecord>> {
    let mut domain = vec![json!(["name", "=like", format!("{LEAD_NAME_PREFIX}%")])];
    if let Some(name) = contact_name {
        domain.push(json!(["contact_name", "ilike", name]));
    }

    let ids = crm.search(LEAD_MODEL, Value::Array(domain), Some(limit)).await?;
    let rows = crm
        .read(LEAD_MODEL, &ids, &["id", "name", "contact_name", "description"])
        .await?;

    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| Error::upstream("odoo", format!("unreadable lead record: {e}")))
        })
        .collect()
}
