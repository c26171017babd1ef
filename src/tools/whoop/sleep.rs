// ABOUTME: Detailed sleep analysis for one date
// ABOUTME: Performance, duration vs need, quality metrics, and stage breakdown in minutes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::providers::whoop::{Sleep, WhoopClient};
use crate::tools::{day_bounds, render};

use super::{milli_to_minutes, round2};

/// Fetch and shape the sleep analysis for `date`
pub async fn run(client: &WhoopClient, date: NaiveDate) -> AppResult<String> {
    let (start, end) = day_bounds(date);
    let sleeps = client.get_sleep_collection(start, end).await?;
    Ok(render(&shape(date, &sleeps)))
}

fn shape(date: NaiveDate, sleeps: &[Sleep]) -> Value {
    let date_str = date.format("%Y-%m-%d").to_string();
    let Some(sleep) = sleeps.first() else {
        return json!({
            "date": date_str,
            "message": "No sleep data available for this date",
        });
    };

    let score = sleep.score.as_ref();
    let stages = score.and_then(|s| s.stage_summary.as_ref());
    let needed = score.and_then(|s| s.sleep_needed.as_ref());

    let light = stages.and_then(|s| s.total_light_sleep_time_milli).unwrap_or(0);
    let deep = stages
        .and_then(|s| s.total_slow_wave_sleep_time_milli)
        .unwrap_or(0);
    let rem = stages.and_then(|s| s.total_rem_sleep_time_milli).unwrap_or(0);
    let awake = stages.and_then(|s| s.total_awake_time_milli).unwrap_or(0);
    let in_bed = stages.and_then(|s| s.total_in_bed_time_milli).unwrap_or(0);

    let baseline = needed.and_then(|n| n.baseline_milli).unwrap_or(0);
    let from_debt = needed.and_then(|n| n.need_from_sleep_debt_milli).unwrap_or(0);
    let from_strain = needed
        .and_then(|n| n.need_from_recent_strain_milli)
        .unwrap_or(0);
    let from_naps = needed.and_then(|n| n.need_from_recent_nap_milli).unwrap_or(0);

    let total_sleep_hours = (light + deep + rem) as f64 / 3_600_000.0;
    let total_needed_hours = baseline as f64 / 3_600_000.0;

    json!({
        "date": date_str,
        "sleepId": sleep.id,
        "isNap": sleep.nap,
        "period": {
            "start": sleep.start,
            "end": sleep.end,
        },
        "performance": {
            "score": score.and_then(|s| s.sleep_performance_percentage),
            "state": sleep.score_state,
        },
        "duration": {
            "totalSleepHours": round2(total_sleep_hours),
            "totalNeededHours": round2(total_needed_hours),
            "deficit": round2(total_needed_hours - total_sleep_hours),
        },
        "quality": {
            "efficiency": score.and_then(|s| s.sleep_efficiency_percentage),
            "consistency": score.and_then(|s| s.sleep_consistency_percentage),
            "respiratoryRate": score.and_then(|s| s.respiratory_rate),
            "disturbanceCount": stages.and_then(|s| s.disturbance_count),
            "sleepCycles": stages.and_then(|s| s.sleep_cycle_count),
        },
        "stages": {
            "lightSleepMinutes": milli_to_minutes(light),
            "deepSleepMinutes": milli_to_minutes(deep),
            "remSleepMinutes": milli_to_minutes(rem),
            "awakeMinutes": milli_to_minutes(awake),
            "inBedMinutes": milli_to_minutes(in_bed),
        },
        "sleepNeeded": {
            "baselineHours": round2(baseline as f64 / 3_600_000.0),
            "fromSleepDebt": round2(from_debt as f64 / 3_600_000.0),
            "fromStrain": round2(from_strain as f64 / 3_600_000.0),
            "fromNaps": round2(from_naps as f64 / 3_600_000.0),
        },
    })
}
