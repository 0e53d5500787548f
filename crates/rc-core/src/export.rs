//! Plain-text export formats for the roster and the call history.

use chrono::{Local, TimeZone};

use crate::history::{HistoryLog, HistoryRecord};
use crate::roster::Roster;

/// Header row of the history CSV.
pub const HISTORY_CSV_HEADER: &str = "时间,姓名,模式";

/// Roster as newline-joined names.
pub fn roster_text(roster: &Roster) -> String {
    roster.names().join("\n")
}

/// Display time of a record, e.g. `2024/3/5 09:07:02`.
pub fn record_time<Tz: TimeZone>(record: &HistoryRecord, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    record
        .timestamp
        .with_timezone(tz)
        .format("%Y/%-m/%-d %H:%M:%S")
        .to_string()
}

/// History as CSV in local time, newest first.
pub fn history_csv(history: &HistoryLog) -> String {
    history_csv_in(history, &Local)
}

/// History as CSV with times rendered in the given time zone.
pub fn history_csv_in<Tz: TimeZone>(history: &HistoryLog, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let rows: Vec<String> = history
        .iter()
        .map(|r| format!("{},{},{}", record_time(r, tz), r.name, r.mode))
        .collect();
    format!("{HISTORY_CSV_HEADER}\n{}", rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::CallKind;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn roster_text_joins_lines() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo", "Cy"]);
        assert_eq!(roster_text(&r), "Amy\nBo\nCy");
        assert_eq!(roster_text(&Roster::new()), "");
    }

    #[test]
    fn history_csv_snapshot() {
        let mut log = HistoryLog::new();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 5, 1, 7, 2).unwrap();
        log.append_at("Amy", CallKind::Random, t0);
        log.append_at("Bo", CallKind::Quick, t0 + chrono::Duration::seconds(65));
        log.append_at("Cy", CallKind::Manual, t0 + chrono::Duration::hours(10));

        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        insta::assert_snapshot!(history_csv_in(&log, &beijing), @r"
        时间,姓名,模式
        2024/3/5 19:07:02,Cy,手动叫号
        2024/3/5 09:08:07,Bo,快速连抽
        2024/3/5 09:07:02,Amy,随机点名
        ");
    }

    #[test]
    fn empty_history_is_header_only() {
        assert_eq!(history_csv_in(&HistoryLog::new(), &Utc), "时间,姓名,模式\n");
    }
}
