//! Stamp lifecycle records: templates, generated batches, activation,
//! retail sale and destruction.
//!
//! Generated batches reference a template; activation, retail and
//! destruction documents reference individual stamps. The server enforces
//! those references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    ActivationId, DestructionId, GenerationId, ProductId, RetailOrderId, StampId,
    StampTemplateId,
};

/// Printable stamp layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampTemplate {
    pub id: StampTemplateId,
    pub name: String,
    /// Physical size label, e.g. `20x30mm`.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /stamp-template/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStampTemplate {
    pub name: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A batch of generated stamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampGeneration {
    pub id: GenerationId,
    #[serde(default)]
    pub code: Option<String>,
    pub template_id: StampTemplateId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub quantity: u32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /stamp/generation/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneration {
    pub template_id: StampTemplateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Activation document: stamps put into circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub id: ActivationId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub stamp_ids: Vec<StampId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub activated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /stamp/activation/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivation {
    pub stamp_ids: Vec<StampId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Retail order: stamped goods sold to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailOrder {
    pub id: RetailOrderId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub stamp_ids: Vec<StampId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /stamp/retail/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRetailOrder {
    pub stamp_ids: Vec<StampId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

/// Destruction record: stamps withdrawn and destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destruction {
    pub id: DestructionId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub stamp_ids: Vec<StampId>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /destruction/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestruction {
    pub stamp_ids: Vec<StampId>,
    pub reason: String,
}
