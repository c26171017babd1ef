// ABOUTME: Recovery analysis for one date with 30-day HRV and RHR baselines
// ABOUTME: Baseline fetch failures degrade to the day's own values instead of failing the tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::whoop::{Recovery, WhoopClient};
use crate::tools::{day_bounds, render};

use super::{percent_difference, round1};

/// Fetch and shape the recovery analysis for `date`
pub async fn run(client: &WhoopClient, date: NaiveDate) -> AppResult<String> {
    let (start, end) = day_bounds(date);
    let recoveries = client.get_recovery_collection(start, end).await?;

    let baseline_start = start - Duration::days(30);
    let historical = client
        .get_recovery_collection(baseline_start, end)
        .await
        .unwrap_or_default();

    Ok(render(&shape(date, &recoveries, &historical)))
}

fn shape(date: NaiveDate, recoveries: &[Recovery], historical: &[Recovery]) -> Value {
    let date_str = date.format("%Y-%m-%d").to_string();
    let Some(recovery) = recoveries.first() else {
        return json!({
            "date": date_str,
            "message": "No recovery data available for this date",
        });
    };

    let score = recovery.score.as_ref();
    let hrv = score.and_then(|s| s.hrv_rmssd_milli).unwrap_or(0.0);
    let rhr = score.and_then(|s| s.resting_heart_rate).unwrap_or(0.0);

    let avg_hrv = baseline(historical, hrv, |s| s.hrv_rmssd_milli);
    let avg_rhr = baseline(historical, rhr, |s| s.resting_heart_rate);

    json!({
        "date": date_str,
        "cycleId": recovery.cycle_id,
        "sleepId": recovery.sleep_id,
        "recovery": {
            "score": score.and_then(|s| s.recovery_score),
            "state": recovery.score_state,
            "scorePercentage": score
                .and_then(|s| s.recovery_score)
                .map(|s| format!("{s}%")),
        },
        "contributors": {
            "heartRateVariability": {
                "value": hrv,
                "unit": "ms",
                "thirtyDayAverage": round1(avg_hrv),
                "trend": if hrv > avg_hrv { "above" } else { "below" },
                "percentDifference": percent_difference(hrv, avg_hrv),
            },
            "restingHeartRate": {
                "value": rhr,
                "unit": "bpm",
                "thirtyDayAverage": round1(avg_rhr),
                "trend": if rhr < avg_rhr { "below" } else { "above" },
                "percentDifference": percent_difference(rhr, avg_rhr),
            },
            "spo2": {
                "value": score.and_then(|s| s.spo2_percentage),
                "unit": "%",
            },
            "skinTemperature": {
                "value": score.and_then(|s| s.skin_temp_celsius),
                "unit": "°C",
            },
        },
        "timestamps": {
            "created": recovery.created_at,
            "updated": recovery.updated_at,
        },
    })
}

/// Mean of a score field over scored historical records; `fallback` when
/// there is no history to average.
fn baseline<F>(historical: &[Recovery], fallback: f64, field: F) -> f64
where
    F: Fn(&crate::providers::whoop::RecoveryScore) -> Option<f64>,
{
    let values: Vec<f64> = historical
        .iter()
        .filter_map(|r| r.score.as_ref().and_then(&field))
        .collect();
    if values.is_empty() {
        fallback
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::whoop::RecoveryScore;

    fn recovery(hrv: f64, rhr: f64) -> Recovery {
        Recovery {
            cycle_id: 1,
            sleep_id: Some(2),
            created_at: Some("2024-03-05T07:00:00.000Z".to_owned()),
            updated_at: Some("2024-03-05T07:05:00.000Z".to_owned()),
            score_state: Some("SCORED".to_owned()),
            score: Some(RecoveryScore {
                user_calibrating: Some(false),
                recovery_score: Some(60.0),
                resting_heart_rate: Some(rhr),
                hrv_rmssd_milli: Some(hrv),
                spo2_percentage: Some(96.5),
                skin_temp_celsius: Some(33.1),
            }),
        }
    }

    #[test]
    fn test_shape_no_data_message() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let analysis = shape(date, &[], &[]);
        assert_eq!(analysis["message"], "No recovery data available for this date");
    }

    #[test]
    fn test_shape_trends_against_thirty_day_baseline() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let today = recovery(55.0, 48.0);
        let historical = vec![recovery(50.0, 50.0), recovery(50.0, 50.0)];

        let analysis = shape(date, &[today], &historical);

        let hrv = &analysis["contributors"]["heartRateVariability"];
        assert_eq!(hrv["thirtyDayAverage"], 50.0);
        assert_eq!(hrv["trend"], "above");
        assert_eq!(hrv["percentDifference"], 10);

        let rhr = &analysis["contributors"]["restingHeartRate"];
        assert_eq!(rhr["trend"], "below");
        assert_eq!(rhr["percentDifference"], -4);

        assert_eq!(analysis["recovery"]["scorePercentage"], "60%");
    }

    #[test]
    fn test_shape_baseline_falls_back_to_current_value() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let today = recovery(42.0, 55.0);
        let analysis = shape(date, &[today], &[]);

        let hrv = &analysis["contributors"]["heartRateVariability"];
        assert_eq!(hrv["thirtyDayAverage"], 42.0);
        assert_eq!(hrv["percentDifference"], 0);
    }
}
