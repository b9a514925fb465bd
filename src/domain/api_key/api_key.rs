use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::ApiKeyStatus;
use crate::domain::errors::{optional_text, require_text, DomainError, DomainResult};
use crate::domain::user::value_objects::Email;

/// Default number of requests a key may make per calendar day
pub const DEFAULT_DAILY_LIMIT: i32 = 1000;

/// Fields supplied when registering a third-party application
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyRegistration {
    pub app_name: String,
    pub allowed_endpoints: Option<Vec<String>>,
    pub daily_limit: Option<i32>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update of an API key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyChanges {
    pub allowed_endpoints: Option<Vec<String>>,
    pub daily_limit: Option<i32>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// An API key issued to an external application
///
/// Only the bcrypt hash of the key is kept. The short `key_prefix` narrows
/// down candidates during validation so that only a handful of hashes are
/// compared per request.
///
/// # Invariants
/// - App name is non-empty and unique (enforced by storage)
/// - Daily limit is at least 1
/// - A revoked key never becomes active again
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApiKey {
    id: Uuid,
    app_name: String,
    key_prefix: String,
    #[serde(skip_serializing)]
    key_hash: String,
    status: ApiKeyStatus,
    allowed_endpoints: Vec<String>,
    daily_limit: i32,
    current_day_usage: i32,
    last_usage_date: Option<NaiveDate>,
    total_usage: i64,
    contact_email: Option<String>,
    description: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Creates a new active key from a registration and the hashed secret
    pub fn new(
        registration: ApiKeyRegistration,
        key_prefix: String,
        key_hash: String,
    ) -> DomainResult<Self> {
        let app_name = require_text(&registration.app_name, "App name")?;
        let daily_limit = validate_daily_limit(registration.daily_limit)?;
        let contact_email = Email::optional(registration.contact_email)?;
        let now = Utc::now();

        if let Some(expires_at) = registration.expires_at {
            if expires_at <= now {
                return Err(DomainError::validation("Expiry must be in the future"));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            app_name,
            key_prefix,
            key_hash,
            status: ApiKeyStatus::Active,
            allowed_endpoints: normalize_endpoints(registration.allowed_endpoints),
            daily_limit,
            current_day_usage: 0,
            last_usage_date: None,
            total_usage: 0,
            contact_email,
            description: optional_text(registration.description),
            expires_at: registration.expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update
    pub fn apply(&mut self, changes: ApiKeyChanges) -> DomainResult<()> {
        if self.status == ApiKeyStatus::Revoked {
            return Err(DomainError::invalid_state("Revoked keys cannot be modified"));
        }
        if changes.daily_limit.is_some() {
            self.daily_limit = validate_daily_limit(changes.daily_limit)?;
        }
        if changes.contact_email.is_some() {
            self.contact_email = Email::optional(changes.contact_email)?;
        }
        if changes.description.is_some() {
            self.description = optional_text(changes.description);
        }
        if changes.allowed_endpoints.is_some() {
            self.allowed_endpoints = normalize_endpoints(changes.allowed_endpoints);
        }
        if let Some(expires_at) = changes.expires_at {
            self.expires_at = Some(expires_at);
            if self.status == ApiKeyStatus::Expired && expires_at > Utc::now() {
                self.status = ApiKeyStatus::Active;
            }
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Permanently revokes the key
    pub fn revoke(&mut self) {
        self.status = ApiKeyStatus::Revoked;
        self.updated_at = Utc::now();
    }

    /// Marks an active key as expired
    pub fn mark_expired(&mut self) {
        if self.status == ApiKeyStatus::Active {
            self.status = ApiKeyStatus::Expired;
            self.updated_at = Utc::now();
        }
    }

    /// Whether the expiry timestamp has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Whether the key may call the given request path
    ///
    /// An empty allow-list grants access to every guarded endpoint.
    pub fn allows_endpoint(&self, path: &str) -> bool {
        self.allowed_endpoints.is_empty()
            || self
                .allowed_endpoints
                .iter()
                .any(|endpoint| path.contains(endpoint.as_str()))
    }

    /// Requests used so far on the given day
    pub fn usage_on(&self, today: NaiveDate) -> i32 {
        if self.last_usage_date == Some(today) {
            self.current_day_usage
        } else {
            0
        }
    }

    /// Requests left for the given day, floored at zero
    pub fn remaining_on(&self, today: NaiveDate) -> i32 {
        (self.daily_limit - self.usage_on(today)).max(0)
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn key_hash(&self) -> &str {
        &self.key_hash
    }

    pub fn status(&self) -> ApiKeyStatus {
        self.status
    }

    pub fn allowed_endpoints(&self) -> &[String] {
        &self.allowed_endpoints
    }

    pub fn daily_limit(&self) -> i32 {
        self.daily_limit
    }

    pub fn current_day_usage(&self) -> i32 {
        self.current_day_usage
    }

    pub fn last_usage_date(&self) -> Option<NaiveDate> {
        self.last_usage_date
    }

    pub fn total_usage(&self) -> i64 {
        self.total_usage
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_daily_limit(limit: Option<i32>) -> DomainResult<i32> {
    match limit {
        None => Ok(DEFAULT_DAILY_LIMIT),
        Some(limit) if limit >= 1 => Ok(limit),
        Some(_) => Err(DomainError::validation("Daily limit must be at least 1")),
    }
}

fn normalize_endpoints(endpoints: Option<Vec<String>>) -> Vec<String> {
    endpoints
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn registration(app_name: &str) -> ApiKeyRegistration {
        ApiKeyRegistration {
            app_name: app_name.to_string(),
            ..Default::default()
        }
    }

    fn key() -> ApiKey {
        ApiKey::new(registration("Door kiosk"), "ak_12345678".into(), "hash".into()).unwrap()
    }

    #[test]
    fn new_key_is_active_with_defaults() {
        let key = key();
        assert_eq!(key.app_name(), "Door kiosk");
        assert_eq!(key.status(), ApiKeyStatus::Active);
        assert_eq!(key.daily_limit(), DEFAULT_DAILY_LIMIT);
        assert_eq!(key.total_usage(), 0);
        assert!(key.allowed_endpoints().is_empty());
    }

    #[test]
    fn blank_app_name_fails() {
        let result = ApiKey::new(registration(" "), "p".into(), "h".into());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn zero_daily_limit_fails() {
        let mut reg = registration("App");
        reg.daily_limit = Some(0);
        assert!(ApiKey::new(reg, "p".into(), "h".into()).is_err());
    }

    #[test]
    fn invalid_contact_email_fails() {
        let mut reg = registration("App");
        reg.contact_email = Some("not-an-email".into());
        assert!(ApiKey::new(reg, "p".into(), "h".into()).is_err());
    }

    #[test]
    fn past_expiry_fails() {
        let mut reg = registration("App");
        reg.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(ApiKey::new(reg, "p".into(), "h".into()).is_err());
    }

    #[test]
    fn hash_is_not_serialized() {
        let json = serde_json::to_value(key()).unwrap();
        assert!(json.get("key_hash").is_none());
        assert_eq!(json["app_name"], "Door kiosk");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn expiry_check() {
        let mut reg = registration("App");
        reg.expires_at = Some(Utc::now() + Duration::hours(1));
        let key = ApiKey::new(reg, "p".into(), "h".into()).unwrap();

        assert!(!key.is_expired(Utc::now()));
        assert!(key.is_expired(Utc::now() + Duration::hours(2)));
    }

    #[test]
    fn endpoint_allow_list() {
        let mut reg = registration("App");
        reg.allowed_endpoints = Some(vec!["/dashboard".into(), " ".into()]);
        let key = ApiKey::new(reg, "p".into(), "h".into()).unwrap();

        assert_eq!(key.allowed_endpoints(), ["/dashboard".to_string()]);
        assert!(key.allows_endpoint("/api/external/dashboard"));
        assert!(!key.allows_endpoint("/api/external/search"));
    }

    #[test]
    fn empty_allow_list_allows_everything() {
        assert!(key().allows_endpoint("/api/external/search"));
    }

    #[test]
    fn usage_resets_on_new_day() {
        let mut key = key();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        key.last_usage_date = Some(today.pred_opt().unwrap());
        key.current_day_usage = 40;

        assert_eq!(key.usage_on(today), 0);
        assert_eq!(key.remaining_on(today), DEFAULT_DAILY_LIMIT);
    }

    #[test]
    fn remaining_is_floored_at_zero() {
        let mut key = key();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        key.last_usage_date = Some(today);
        key.current_day_usage = DEFAULT_DAILY_LIMIT + 5;

        assert_eq!(key.remaining_on(today), 0);
    }

    #[test]
    fn revoked_key_cannot_be_updated() {
        let mut key = key();
        key.revoke();
        let result = key.apply(ApiKeyChanges {
            daily_limit: Some(10),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn extending_expiry_reactivates_expired_key() {
        let mut key = key();
        key.mark_expired();
        assert_eq!(key.status(), ApiKeyStatus::Expired);

        key.apply(ApiKeyChanges {
            expires_at: Some(Utc::now() + Duration::days(7)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(key.status(), ApiKeyStatus::Active);
    }
}
