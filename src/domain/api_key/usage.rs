use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::api_key::ApiKey;

/// Number of endpoints reported in [`UsageStats::top_endpoints`]
pub const TOP_ENDPOINT_LIMIT: usize = 10;

/// One request made with an API key
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApiKeyUsage {
    pub id: Uuid,
    pub api_key_id: Uuid,
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub response_time_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Request metadata captured by the API-key guard
#[derive(Debug, Clone)]
pub struct UsageEvent {
    pub endpoint: String,
    pub method: String,
    pub status_code: u16,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub response_time_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointCount {
    pub endpoint: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Aggregated usage for one key over a trailing window
#[derive(Debug, Clone, Serialize)]
pub struct UsageStats {
    pub total_requests: usize,
    pub today_requests: i32,
    pub daily_limit: i32,
    pub remaining_today: i32,
    pub average_response_time: i64,
    pub top_endpoints: Vec<EndpointCount>,
    pub daily_usage: Vec<DailyCount>,
}

impl UsageStats {
    /// Summarises the usage rows of a key
    ///
    /// `usage` is expected to be already restricted to the reporting window.
    /// Rows without a response time are ignored for the average.
    pub fn compute(key: &ApiKey, usage: &[ApiKeyUsage], today: NaiveDate) -> Self {
        let timed: Vec<i64> = usage.iter().filter_map(|u| u.response_time_ms).collect();
        let average_response_time = if timed.is_empty() {
            0
        } else {
            (timed.iter().sum::<i64>() as f64 / timed.len() as f64).round() as i64
        };

        let mut per_endpoint: HashMap<&str, usize> = HashMap::new();
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in usage {
            *per_endpoint.entry(record.endpoint.as_str()).or_default() += 1;
            *per_day.entry(record.created_at.date_naive()).or_default() += 1;
        }

        let mut top_endpoints: Vec<EndpointCount> = per_endpoint
            .into_iter()
            .map(|(endpoint, count)| EndpointCount {
                endpoint: endpoint.to_string(),
                count,
            })
            .collect();
        // ties broken by name so the ordering is stable
        top_endpoints.sort_by(|a, b| b.count.cmp(&a.count).then(a.endpoint.cmp(&b.endpoint)));
        top_endpoints.truncate(TOP_ENDPOINT_LIMIT);

        let daily_usage = per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        let today_requests = key.usage_on(today);

        Self {
            total_requests: usage.len(),
            today_requests,
            daily_limit: key.daily_limit(),
            remaining_today: key.remaining_on(today),
            average_response_time,
            top_endpoints,
            daily_usage,
        }
    }
}
