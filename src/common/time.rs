// src/common/time.rs

use chrono::NaiveTime;

/// Aceita `H:MM` ou `H:MM:SS` (hora com 1 ou 2 dígitos).
pub fn try_parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };

    if !digits(parts[0], 1, 2) || !digits(parts[1], 2, 2) {
        return None;
    }
    if parts.len() == 3 && !digits(parts[2], 2, 2) {
        return None;
    }

    let hour = parts[0].parse().ok()?;
    let minute = parts[1].parse().ok()?;
    let second = match parts.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Versão tolerante: qualquer valor fora do formato cai no `default` (com um aviso no log).
pub fn parse_time_of_day(raw: Option<&str>, default: NaiveTime, field: &str) -> NaiveTime {
    match raw {
        None => default,
        Some(value) => try_parse_time_of_day(value).unwrap_or_else(|| {
            tracing::warn!(
                "Horário inválido em '{}': {:?}, usando {}",
                field,
                value,
                default.format("%H:%M")
            );
            default
        }),
    }
}

pub fn default_work_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn default_work_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN)
}
