//! Ledger timestamps are civil wall-clock time in a fixed configured region,
//! stored without an offset. Historical rows written by the previous system
//! are zone-naive, so new rows must match.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Current wall-clock time in the configured region, offset stripped.
pub fn now_civil(offset: UtcOffset) -> PrimitiveDateTime {
    strip_offset(OffsetDateTime::now_utc().to_offset(offset))
}

/// Start of the current civil day; the dashboard's "transactions today"
/// window opens here.
pub fn local_midnight(offset: UtcOffset) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(offset);
    PrimitiveDateTime::new(now.date(), Time::MIDNIGHT)
}

fn strip_offset(dt: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(dt.date(), dt.time())
}

const LEDGER_DISPLAY: &[FormatItem<'static>] = format_description!(
    "[day]/[month]/[year], [hour repr:12]:[minute]:[second] [period]"
);

/// Display format the transaction history has always used,
/// e.g. `04/03/2026, 09:15:07 PM`.
pub fn format_ledger_timestamp(ts: PrimitiveDateTime) -> String {
    ts.format(&LEDGER_DISPLAY)
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn civil_time_is_zone_naive_regional_time() {
        let utc = datetime!(2026-03-04 18:30:00 UTC);
        let civil = strip_offset(utc.to_offset(offset!(+5:30)));
        assert_eq!(civil, datetime!(2026-03-05 00:00:00));
    }

    #[test]
    fn ledger_display_matches_legacy_format() {
        let ts = datetime!(2026-03-04 21:15:07);
        assert_eq!(format_ledger_timestamp(ts), "04/03/2026, 09:15:07 PM");
    }

    #[test]
    fn ledger_display_morning() {
        let ts = datetime!(2026-12-01 00:05:00);
        assert_eq!(format_ledger_timestamp(ts), "01/12/2026, 12:05:00 AM");
    }

    #[test]
    fn midnight_precedes_now() {
        let off = offset!(+5:30);
        assert!(local_midnight(off) <= now_civil(off));
    }
}
