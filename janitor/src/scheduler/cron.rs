//! Validation for the 6-field cron format used by tokio-cron-scheduler.
//!
//! The scheduler crate accepts some malformed expressions silently and fails
//! on others with opaque errors, so schedules are checked up front.

use anyhow::{anyhow, Result};

pub fn validate_6_field_cron(schedule: &str) -> Result<()> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(anyhow!(
            "tokio-cron-scheduler requires exactly 6 fields: second minute hour day month dayofweek. Got {} fields: '{}'",
            parts.len(),
            schedule
        ));
    }

    validate_cron_field(parts[0], "second", 0, 59)?;
    validate_cron_field(parts[1], "minute", 0, 59)?;
    validate_cron_field(parts[2], "hour", 0, 23)?;
    validate_cron_field(parts[3], "day", 1, 31)?;
    validate_cron_field(parts[4], "month", 1, 12)?;
    validate_cron_field(parts[5], "dayofweek", 0, 7)?;

    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<()> {
    if field == "?" {
        return Ok(());
    }

    for part in field.split(',') {
        let (base, step) = match part.split_once('/') {
            Some((base, step)) => (base, Some(step)),
            None => (part, None),
        };

        if let Some(step) = step {
            let step = step
                .parse::<u32>()
                .map_err(|_| anyhow!("Invalid {} step value: {}", name, step))?;
            if step == 0 {
                return Err(anyhow!("{} step value cannot be 0", name));
            }
        }

        if base == "*" {
            continue;
        }

        if let Some((start, end)) = base.split_once('-') {
            let start = parse_in_range(start, name, min, max)?;
            let end = parse_in_range(end, name, min, max)?;
            if start > end {
                return Err(anyhow!("{} range {}-{} is reversed", name, start, end));
            }
            continue;
        }

        parse_in_range(base, name, min, max)?;
    }

    Ok(())
}

fn parse_in_range(value: &str, name: &str, min: u32, max: u32) -> Result<u32> {
    let parsed = value
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))?;

    if parsed < min || parsed > max {
        return Err(anyhow!(
            "{} value {} is outside valid range {}-{}",
            name,
            parsed,
            min,
            max
        ));
    }

    Ok(parsed)
}
