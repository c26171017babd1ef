// ABOUTME: Daily WHOOP overview combining recovery, strain, sleep, and workouts
// ABOUTME: Fetches the four collections in parallel and tolerates partial failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::whoop::{Cycle, Recovery, Sleep, UserProfile, WhoopClient, Workout};
use crate::tools::{day_bounds, render};

use super::round2;

/// Fetch and shape the daily overview. Each collection failure degrades to
/// an absent section instead of failing the whole tool.
pub async fn run(client: &WhoopClient, date: NaiveDate) -> AppResult<String> {
    let (start, end) = day_bounds(date);

    let (profile, cycles, sleeps, workouts, recoveries) = tokio::join!(
        client.get_user_profile(),
        client.get_cycle_collection(start, end),
        client.get_sleep_collection(start, end),
        client.get_workout_collection(start, end),
        client.get_recovery_collection(start, end),
    );

    let overview = shape(
        date,
        profile.ok(),
        &cycles.unwrap_or_default(),
        &sleeps.unwrap_or_default(),
        &workouts.unwrap_or_default(),
        &recoveries.unwrap_or_default(),
    );
    Ok(render(&overview))
}

fn shape(
    date: NaiveDate,
    profile: Option<UserProfile>,
    cycles: &[Cycle],
    sleeps: &[Sleep],
    workouts: &[Workout],
    recoveries: &[Recovery],
) -> Value {
    json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "user": profile.map(|p| json!({
            "name": format!(
                "{} {}",
                p.first_name.unwrap_or_default(),
                p.last_name.unwrap_or_default()
            ).trim().to_owned(),
            "email": p.email,
        })),
        "recovery": recoveries.first().map(recovery_section),
        "strain": cycles.first().map(strain_section),
        "sleep": sleeps.first().map(sleep_section),
        "activities": workouts.iter().map(activity_entry).collect::<Vec<_>>(),
    })
}

fn recovery_section(recovery: &Recovery) -> Value {
    let score = recovery.score.as_ref();
    json!({
        "score": score.and_then(|s| s.recovery_score),
        "state": recovery.score_state,
        "hrv": score.and_then(|s| s.hrv_rmssd_milli),
        "rhr": score.and_then(|s| s.resting_heart_rate),
        "spo2": score.and_then(|s| s.spo2_percentage),
        "skinTemp": score.and_then(|s| s.skin_temp_celsius),
    })
}

fn strain_section(cycle: &Cycle) -> Value {
    let score = cycle.score.as_ref();
    json!({
        "score": score.and_then(|s| s.strain),
        "state": cycle.score_state,
        "avgHeartRate": score.and_then(|s| s.average_heart_rate),
        "maxHeartRate": score.and_then(|s| s.max_heart_rate),
        "kilojoules": score.and_then(|s| s.kilojoule),
    })
}

fn sleep_section(sleep: &Sleep) -> Value {
    let score = sleep.score.as_ref();
    let stages = score.and_then(|s| s.stage_summary.as_ref());
    let light = stages.and_then(|s| s.total_light_sleep_time_milli).unwrap_or(0);
    let deep = stages
        .and_then(|s| s.total_slow_wave_sleep_time_milli)
        .unwrap_or(0);
    let rem = stages.and_then(|s| s.total_rem_sleep_time_milli).unwrap_or(0);
    let awake = stages.and_then(|s| s.total_awake_time_milli).unwrap_or(0);

    json!({
        "score": score.and_then(|s| s.sleep_performance_percentage),
        "state": sleep.score_state,
        "totalSleepHours": round2((light + deep + rem) as f64 / 3_600_000.0),
        "efficiency": score.and_then(|s| s.sleep_efficiency_percentage),
        "consistency": score.and_then(|s| s.sleep_consistency_percentage),
        "respiratoryRate": score.and_then(|s| s.respiratory_rate),
        "stages": {
            "light": round2(light as f64 / 60_000.0),
            "deepSWS": round2(deep as f64 / 60_000.0),
            "rem": round2(rem as f64 / 60_000.0),
            "awake": round2(awake as f64 / 60_000.0),
        },
    })
}

fn activity_entry(workout: &Workout) -> Value {
    let score = workout.score.as_ref();
    json!({
        "id": workout.id,
        "sportId": workout.sport_id,
        "start": workout.start,
        "end": workout.end,
        "strain": score.and_then(|s| s.strain),
        "avgHeartRate": score.and_then(|s| s.average_heart_rate),
        "maxHeartRate": score.and_then(|s| s.max_heart_rate),
        "kilojoules": score.and_then(|s| s.kilojoule),
        "distance": score.and_then(|s| s.distance_meter),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::whoop::{CycleScore, RecoveryScore, SleepScore, StageSummary};

    fn sample_recovery() -> Recovery {
        Recovery {
            cycle_id: 1,
            sleep_id: Some(2),
            created_at: None,
            updated_at: None,
            score_state: Some("SCORED".to_owned()),
            score: Some(RecoveryScore {
                user_calibrating: Some(false),
                recovery_score: Some(67.0),
                resting_heart_rate: Some(55.0),
                hrv_rmssd_milli: Some(42.5),
                spo2_percentage: Some(96.0),
                skin_temp_celsius: Some(33.4),
            }),
        }
    }

    #[test]
    fn test_shape_with_all_sections() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let profile = UserProfile {
            user_id: 7,
            email: Some("a@b.c".to_owned()),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
        };
        let cycles = vec![Cycle {
            id: 1,
            start: "2024-03-05T04:00:00.000Z".to_owned(),
            end: None,
            score_state: Some("SCORED".to_owned()),
            score: Some(CycleScore {
                strain: Some(12.3),
                kilojoule: Some(8000.0),
                average_heart_rate: Some(70),
                max_heart_rate: Some(160),
            }),
        }];
        let sleeps = vec![Sleep {
            id: "s1".to_owned(),
            start: "2024-03-04T22:00:00.000Z".to_owned(),
            end: "2024-03-05T06:00:00.000Z".to_owned(),
            nap: false,
            score_state: Some("SCORED".to_owned()),
            score: Some(SleepScore {
                stage_summary: Some(StageSummary {
                    total_in_bed_time_milli: Some(28_800_000),
                    total_awake_time_milli: Some(1_800_000),
                    total_light_sleep_time_milli: Some(14_400_000),
                    total_slow_wave_sleep_time_milli: Some(5_400_000),
                    total_rem_sleep_time_milli: Some(7_200_000),
                    sleep_cycle_count: Some(5),
                    disturbance_count: Some(8),
                }),
                sleep_needed: None,
                respiratory_rate: Some(15.2),
                sleep_performance_percentage: Some(88.0),
                sleep_consistency_percentage: Some(74.0),
                sleep_efficiency_percentage: Some(93.0),
            }),
        }];

        let overview = shape(date, Some(profile), &cycles, &sleeps, &[], &[sample_recovery()]);

        assert_eq!(overview["date"], "2024-03-05");
        assert_eq!(overview["user"]["name"], "Ada Lovelace");
        assert_eq!(overview["recovery"]["score"], 67.0);
        assert_eq!(overview["strain"]["score"], 12.3);
        // 4h light + 1.5h deep + 2h rem = 7.5h
        assert_eq!(overview["sleep"]["totalSleepHours"], 7.5);
        assert_eq!(overview["sleep"]["stages"]["light"], 240.0);
        assert_eq!(overview["activities"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_shape_with_nothing_available() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let overview = shape(date, None, &[], &[], &[], &[]);
        assert!(overview["user"].is_null());
        assert!(overview["recovery"].is_null());
        assert!(overview["strain"].is_null());
        assert!(overview["sleep"].is_null());
    }
}
