// ABOUTME: Strain analysis for one date with 30-day baseline, energy, and per-workout detail
// ABOUTME: Converts kilojoules to calories and heart-rate zone durations to minutes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::{DateTime, Duration, NaiveDate};
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::whoop::{Cycle, WhoopClient, Workout, ZoneDuration};
use crate::tools::{day_bounds, render};

use super::{milli_to_minutes, percent_difference, round2};

/// Kilojoules to kilocalories
const KJ_TO_KCAL: f64 = 0.239_006;

/// Meters to miles
const METERS_TO_MILES: f64 = 0.000_621_371;

/// Fetch and shape the strain analysis for `date`
pub async fn run(client: &WhoopClient, date: NaiveDate) -> AppResult<String> {
    let (start, end) = day_bounds(date);

    let (cycles, workouts) = tokio::join!(
        client.get_cycle_collection(start, end),
        client.get_workout_collection(start, end),
    );
    let cycles = cycles?;
    let workouts = workouts?;

    let baseline_start = start - Duration::days(30);
    let historical = client
        .get_cycle_collection(baseline_start, end)
        .await
        .unwrap_or_default();

    Ok(render(&shape(date, &cycles, &workouts, &historical)))
}

fn shape(date: NaiveDate, cycles: &[Cycle], workouts: &[Workout], historical: &[Cycle]) -> Value {
    let date_str = date.format("%Y-%m-%d").to_string();
    let Some(cycle) = cycles.first() else {
        return json!({
            "date": date_str,
            "message": "No strain data available for this date",
        });
    };

    let strain = cycle
        .score
        .as_ref()
        .and_then(|s| s.strain)
        .unwrap_or(0.0);
    let kilojoules = cycle
        .score
        .as_ref()
        .and_then(|s| s.kilojoule)
        .unwrap_or(0.0);
    let avg_strain = baseline_strain(historical, strain);

    let total_activity_strain: f64 = workouts
        .iter()
        .filter_map(|w| w.score.as_ref().and_then(|s| s.strain))
        .sum();

    json!({
        "date": date_str,
        "cycleId": cycle.id,
        "strain": {
            "score": strain,
            "state": cycle.score_state,
            "thirtyDayAverage": round2(avg_strain),
            "trend": if strain > avg_strain { "above" } else { "below" },
            "percentDifference": percent_difference(strain, avg_strain),
        },
        "period": {
            "start": cycle.start,
            "end": cycle.end,
        },
        "heartRate": {
            "average": cycle.score.as_ref().and_then(|s| s.average_heart_rate),
            "max": cycle.score.as_ref().and_then(|s| s.max_heart_rate),
            "unit": "bpm",
        },
        "energy": {
            "kilojoules": kilojoules,
            "calories": (kilojoules * KJ_TO_KCAL).round() as i64,
        },
        "activities": workouts.iter().map(activity_entry).collect::<Vec<_>>(),
        "activityCount": workouts.len(),
        "totalActivityStrain": total_activity_strain,
    })
}

fn activity_entry(workout: &Workout) -> Value {
    let score = workout.score.as_ref();
    let zones = score.and_then(|s| s.zone_duration.as_ref());
    json!({
        "id": workout.id,
        "sportId": workout.sport_id,
        "start": workout.start,
        "end": workout.end,
        "duration": duration_minutes(&workout.start, &workout.end),
        "strain": score.and_then(|s| s.strain),
        "heartRate": {
            "average": score.and_then(|s| s.average_heart_rate),
            "max": score.and_then(|s| s.max_heart_rate),
        },
        "kilojoules": score.and_then(|s| s.kilojoule),
        "distance": score.and_then(|s| s.distance_meter).map(|meters| json!({
            "meters": meters,
            "kilometers": round2(meters / 1000.0),
            "miles": round2(meters * METERS_TO_MILES),
        })),
        "zones": zone_minutes(zones),
    })
}

/// Workout duration in whole minutes; zero when a timestamp fails to parse
fn duration_minutes(start: &str, end: &str) -> i64 {
    let parse = |raw: &str| DateTime::parse_from_rfc3339(raw).ok();
    match (parse(start), parse(end)) {
        (Some(start), Some(end)) => {
            let minutes = (end - start).num_seconds() as f64 / 60.0;
            minutes.round() as i64
        }
        _ => 0,
    }
}

fn zone_minutes(zones: Option<&ZoneDuration>) -> Value {
    let milli = |field: Option<i64>| milli_to_minutes(field.unwrap_or(0));
    json!({
        "zone0Minutes": milli(zones.and_then(|z| z.zone_zero_milli)),
        "zone1Minutes": milli(zones.and_then(|z| z.zone_one_milli)),
        "zone2Minutes": milli(zones.and_then(|z| z.zone_two_milli)),
        "zone3Minutes": milli(zones.and_then(|z| z.zone_three_milli)),
        "zone4Minutes": milli(zones.and_then(|z| z.zone_four_milli)),
        "zone5Minutes": milli(zones.and_then(|z| z.zone_five_milli)),
    })
}

/// Mean strain over scored historical cycles; `fallback` with no history
fn baseline_strain(historical: &[Cycle], fallback: f64) -> f64 {
    let values: Vec<f64> = historical
        .iter()
        .filter_map(|c| c.score.as_ref().and_then(|s| s.strain))
        .collect();
    if values.is_empty() {
        fallback
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
