use std::fmt;

use chrono::{Duration, SubsecRound, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::{Set, Unchanged}, ConnectionTrait, SqlErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const DUPLICATE_EMAIL: &str = "Provider validation failed: email is already in use";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub status: ProviderStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Store key: 4 bytes of creation seconds followed by 8 random bytes, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub const LEN: usize = 24;

    pub fn generate() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Accepts exactly 24 hex digits in either case; stores them lowercased.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(ModelError::MalformedId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Partial provider payload, used as the create body and as the update patch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProviderStatus>,
}

impl ProviderInput {
    fn text_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("phone", self.phone.as_deref()),
            ("serviceType", self.service_type.as_deref()),
        ]
    }
}

fn is_blank(v: &str) -> bool {
    v.trim().is_empty()
}

fn required(fields: &[&str]) -> ModelError {
    let detail = fields
        .iter()
        .map(|f| format!("{f} is required"))
        .collect::<Vec<_>>()
        .join(", ");
    ModelError::Validation(format!("Provider validation failed: {detail}"))
}

/// Current time at the precision the database keeps (microseconds).
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

/// Next `updated_at`, strictly after `previous` even when the clock has not moved.
pub fn next_updated_at(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    std::cmp::max(now(), previous + Duration::microseconds(1))
}

/// Validate a create payload and produce the record to persist.
pub fn build(input: ProviderInput) -> Result<Model, ModelError> {
    let missing: Vec<&str> = input
        .text_fields()
        .into_iter()
        .filter(|(_, v)| v.map_or(true, is_blank))
        .map(|(f, _)| f)
        .collect();
    if !missing.is_empty() {
        return Err(required(&missing));
    }

    let now = now();
    Ok(Model {
        id: ProviderId::generate().into_string(),
        name: input.name.unwrap_or_default(),
        email: input.email.unwrap_or_default(),
        phone: input.phone.unwrap_or_default(),
        service_type: input.service_type.unwrap_or_default(),
        status: input.status.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    })
}

/// Merge the supplied fields into `record` and advance `updated_at`.
/// Fields that are absent stay untouched; supplied text fields must not be blank.
pub fn apply_patch(record: &mut Model, patch: ProviderInput) -> Result<(), ModelError> {
    let blank: Vec<&str> = patch
        .text_fields()
        .into_iter()
        .filter(|(_, v)| v.is_some_and(is_blank))
        .map(|(f, _)| f)
        .collect();
    if !blank.is_empty() {
        return Err(required(&blank));
    }

    if let Some(v) = patch.name {
        record.name = v;
    }
    if let Some(v) = patch.email {
        record.email = v;
    }
    if let Some(v) = patch.phone {
        record.phone = v;
    }
    if let Some(v) = patch.service_type {
        record.service_type = v;
    }
    if let Some(v) = patch.status {
        record.status = v;
    }
    record.updated_at = next_updated_at(record.updated_at);
    Ok(())
}

/// Unique violations become validation failures; anything else keeps the driver's text.
pub fn map_db_err(err: DbErr) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Validation(DUPLICATE_EMAIL.into()),
        _ => ModelError::Db(err.to_string()),
    }
}

impl Model {
    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            email: Set(self.email),
            phone: Set(self.phone),
            service_type: Set(self.service_type),
            status: Set(self.status),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    /// Active model writing every mutable column; `id` and `created_at` are never rewritten.
    pub fn into_update(self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name),
            email: Set(self.email),
            phone: Set(self.phone),
            service_type: Set(self.service_type),
            status: Set(self.status),
            created_at: Unchanged(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: ProviderInput) -> Result<Model, ModelError> {
    let record = build(input)?;
    record.into_insert().insert(db).await.map_err(map_db_err)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: &ProviderId) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id.as_str().to_owned()).one(db).await.map_err(map_db_err)
}
