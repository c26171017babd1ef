// ABOUTME: WHOOP developer API client issuing domain calls through the OAuth executor
// ABOUTME: Maps profile, cycle, sleep, workout, recovery, and body measurement payloads to typed records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::{Credentials, OAuthClient};
use crate::constants::{providers, whoop};
use crate::errors::AppResult;

// ============================================================================
// WHOOP API Response Structures
// ============================================================================

/// WHOOP pagination wrapper for collection responses
#[derive(Debug, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Array of records (first page only; callers wanting full history
    /// re-invoke with adjusted ranges)
    pub records: Vec<T>,
    /// Token for fetching the next page, `None` when exhausted
    pub next_token: Option<String>,
}

/// WHOOP user profile
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    /// User ID (integer in WHOOP)
    pub user_id: i64,
    /// User's email address
    pub email: Option<String>,
    /// User's first name
    pub first_name: Option<String>,
    /// User's last name
    pub last_name: Option<String>,
}

/// WHOOP body measurement
#[derive(Debug, Deserialize)]
pub struct BodyMeasurement {
    /// Height in meters
    pub height_meter: Option<f64>,
    /// Weight in kilograms
    pub weight_kilogram: Option<f64>,
    /// Calculated max heart rate
    pub max_heart_rate: Option<i32>,
}

/// WHOOP daily physiological cycle
#[derive(Debug, Deserialize)]
pub struct Cycle {
    /// Cycle ID
    pub id: i64,
    /// Start time (ISO 8601)
    pub start: String,
    /// End time; absent while the cycle is still open
    pub end: Option<String>,
    /// Scoring state reported by WHOOP (e.g. `SCORED`, `PENDING_SCORE`)
    pub score_state: Option<String>,
    /// Strain score details
    pub score: Option<CycleScore>,
}

/// Cycle strain score
#[derive(Debug, Deserialize)]
pub struct CycleScore {
    /// Strain score (0-21 scale)
    pub strain: Option<f64>,
    /// Kilojoules burned over the cycle
    pub kilojoule: Option<f64>,
    /// Average heart rate over the cycle
    pub average_heart_rate: Option<i32>,
    /// Maximum heart rate over the cycle
    pub max_heart_rate: Option<i32>,
}

/// WHOOP sleep activity
#[derive(Debug, Deserialize)]
pub struct Sleep {
    /// Sleep ID (UUID string)
    pub id: String,
    /// Start time (ISO 8601)
    pub start: String,
    /// End time (ISO 8601)
    pub end: String,
    /// Whether this sleep was a nap
    #[serde(default)]
    pub nap: bool,
    /// Scoring state
    pub score_state: Option<String>,
    /// Sleep score details
    pub score: Option<SleepScore>,
}

/// Sleep score details
#[derive(Debug, Deserialize)]
pub struct SleepScore {
    /// Stage breakdown
    pub stage_summary: Option<StageSummary>,
    /// Sleep-need model output
    pub sleep_needed: Option<SleepNeeded>,
    /// Respiratory rate during sleep
    pub respiratory_rate: Option<f64>,
    /// Sleep performance percentage (0-100)
    pub sleep_performance_percentage: Option<f64>,
    /// Sleep consistency percentage (0-100)
    pub sleep_consistency_percentage: Option<f64>,
    /// Sleep efficiency percentage (0-100)
    pub sleep_efficiency_percentage: Option<f64>,
}

/// Sleep stage summary, all durations in milliseconds
#[derive(Debug, Deserialize)]
pub struct StageSummary {
    /// Total time in bed
    pub total_in_bed_time_milli: Option<i64>,
    /// Total awake time
    pub total_awake_time_milli: Option<i64>,
    /// Total light sleep
    pub total_light_sleep_time_milli: Option<i64>,
    /// Total slow wave (deep) sleep
    pub total_slow_wave_sleep_time_milli: Option<i64>,
    /// Total REM sleep
    pub total_rem_sleep_time_milli: Option<i64>,
    /// Number of full sleep cycles
    pub sleep_cycle_count: Option<i32>,
    /// Number of disturbances
    pub disturbance_count: Option<i32>,
}

/// Sleep-need breakdown, all durations in milliseconds
#[derive(Debug, Deserialize)]
pub struct SleepNeeded {
    /// Baseline need
    pub baseline_milli: Option<i64>,
    /// Additional need from accumulated sleep debt
    pub need_from_sleep_debt_milli: Option<i64>,
    /// Additional need from recent strain
    pub need_from_recent_strain_milli: Option<i64>,
    /// Reduction from recent naps (negative)
    pub need_from_recent_nap_milli: Option<i64>,
}

/// WHOOP workout
#[derive(Debug, Deserialize)]
pub struct Workout {
    /// Workout ID (UUID string)
    pub id: String,
    /// WHOOP internal sport classification
    pub sport_id: i32,
    /// Start time (ISO 8601)
    pub start: String,
    /// End time (ISO 8601)
    pub end: String,
    /// Workout score details
    pub score: Option<WorkoutScore>,
}

/// Workout score details
#[derive(Debug, Deserialize)]
pub struct WorkoutScore {
    /// Strain score (0-21 scale)
    pub strain: Option<f64>,
    /// Average heart rate during the workout
    pub average_heart_rate: Option<i32>,
    /// Maximum heart rate during the workout
    pub max_heart_rate: Option<i32>,
    /// Kilojoules burned
    pub kilojoule: Option<f64>,
    /// Distance in meters, for applicable sports
    pub distance_meter: Option<f64>,
    /// Altitude gain in meters
    pub altitude_gain_meter: Option<f64>,
    /// Heart-rate zone durations
    pub zone_duration: Option<ZoneDuration>,
}

/// Time spent per heart-rate zone, in milliseconds
#[derive(Debug, Default, Deserialize)]
pub struct ZoneDuration {
    /// Zone 0
    pub zone_zero_milli: Option<i64>,
    /// Zone 1
    pub zone_one_milli: Option<i64>,
    /// Zone 2
    pub zone_two_milli: Option<i64>,
    /// Zone 3
    pub zone_three_milli: Option<i64>,
    /// Zone 4
    pub zone_four_milli: Option<i64>,
    /// Zone 5
    pub zone_five_milli: Option<i64>,
}

/// WHOOP recovery record
#[derive(Debug, Deserialize)]
pub struct Recovery {
    /// Cycle this recovery belongs to
    pub cycle_id: i64,
    /// Sleep the recovery was computed from
    pub sleep_id: Option<i64>,
    /// Record creation timestamp
    pub created_at: Option<String>,
    /// Record update timestamp
    pub updated_at: Option<String>,
    /// Scoring state
    pub score_state: Option<String>,
    /// Recovery score details
    pub score: Option<RecoveryScore>,
}

/// Recovery score details
#[derive(Debug, Deserialize)]
pub struct RecoveryScore {
    /// Whether the user is still calibrating
    pub user_calibrating: Option<bool>,
    /// Recovery score as percentage (0-100)
    pub recovery_score: Option<f64>,
    /// Resting heart rate
    pub resting_heart_rate: Option<f64>,
    /// Heart rate variability (RMSSD, milliseconds)
    pub hrv_rmssd_milli: Option<f64>,
    /// Blood oxygen saturation percentage
    pub spo2_percentage: Option<f64>,
    /// Skin temperature in Celsius
    pub skin_temp_celsius: Option<f64>,
}

// ============================================================================
// WHOOP Client
// ============================================================================

/// Endpoint configuration, overridable for tests
#[derive(Debug, Clone)]
pub struct WhoopEndpoints {
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Base URL for developer API calls
    pub api_base_url: String,
}

impl Default for WhoopEndpoints {
    fn default() -> Self {
        Self {
            token_url: whoop::TOKEN_URL.to_owned(),
            api_base_url: whoop::API_BASE_URL.to_owned(),
        }
    }
}

/// WHOOP API client with automatic OAuth token management.
///
/// Every domain call routes through the [`OAuthClient`] executor, so token
/// refresh and the single 401 retry are transparent to callers.
pub struct WhoopClient {
    endpoints: WhoopEndpoints,
    executor: OAuthClient,
}

impl WhoopClient {
    /// Create a client against the production WHOOP endpoints
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoints(WhoopEndpoints::default(), credentials)
    }

    /// Create a client with custom endpoints
    #[must_use]
    pub fn with_endpoints(endpoints: WhoopEndpoints, credentials: Credentials) -> Self {
        let executor = OAuthClient::new(providers::WHOOP, endpoints.token_url.clone(), credentials);
        Self {
            endpoints,
            executor,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.api_base_url.trim_end_matches('/'),
            path
        )
    }

    fn range_query(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<(&'static str, String)> {
        vec![
            ("start", format_timestamp(start)),
            ("end", format_timestamp(end)),
        ]
    }

    /// Get basic user profile information
    ///
    /// # Errors
    /// Propagates executor failures (`AuthRefresh`, `ApiRequest`, ...).
    pub async fn get_user_profile(&self) -> AppResult<UserProfile> {
        self.executor
            .get_json(&self.url("user/profile/basic"), &[])
            .await
    }

    /// Get current body measurements
    ///
    /// # Errors
    /// Propagates executor failures.
    pub async fn get_body_measurement(&self) -> AppResult<BodyMeasurement> {
        self.executor
            .get_json(&self.url("user/measurement/body"), &[])
            .await
    }

    /// Get physiological cycles for a time range (first page)
    ///
    /// # Errors
    /// Propagates executor failures.
    pub async fn get_cycle_collection(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Cycle>> {
        let page: PaginatedResponse<Cycle> = self
            .executor
            .get_json(&self.url("cycle"), &Self::range_query(start, end))
            .await?;
        Ok(page.records)
    }

    /// Get sleep activities for a time range (first page)
    ///
    /// # Errors
    /// Propagates executor failures.
    pub async fn get_sleep_collection(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Sleep>> {
        let page: PaginatedResponse<Sleep> = self
            .executor
            .get_json(&self.url("activity/sleep"), &Self::range_query(start, end))
            .await?;
        Ok(page.records)
    }

    /// Get workouts for a time range (first page)
    ///
    /// # Errors
    /// Propagates executor failures.
    pub async fn get_workout_collection(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Workout>> {
        let page: PaginatedResponse<Workout> = self
            .executor
            .get_json(&self.url("activity/workout"), &Self::range_query(start, end))
            .await?;
        Ok(page.records)
    }

    /// Get recovery records for a time range (first page)
    ///
    /// # Errors
    /// Propagates executor failures.
    pub async fn get_recovery_collection(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Recovery>> {
        let page: PaginatedResponse<Recovery> = self
            .executor
            .get_json(&self.url("recovery"), &Self::range_query(start, end))
            .await?;
        Ok(page.records)
    }
}

/// WHOOP expects millisecond-precision UTC timestamps
fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
