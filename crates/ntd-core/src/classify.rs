use crate::model::{Scan, ScanStatus};

/// Display label for a scan. Rules are checked in order and the first match
/// wins, so a scheduled scan that also has an error still reads as scheduled.
pub fn scan_status(scan: &Scan) -> ScanStatus {
    if scan.scheduled_at().is_some() {
        if scan.started_at().is_some() {
            ScanStatus::Scanning
        } else {
            ScanStatus::Scheduled
        }
    } else if !scan.error_reason.is_empty() {
        ScanStatus::Failed
    } else if scan.ended_at().is_some() {
        ScanStatus::Completed
    } else if scan.rrule().is_some() {
        ScanStatus::Scheduled
    } else {
        ScanStatus::Unscheduled
    }
}

impl Scan {
    pub fn status(&self) -> ScanStatus {
        scan_status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(scheduled: Option<&str>, started: Option<&str>, error: &str, ended: Option<&str>, rrule: Option<&str>) -> Scan {
        Scan {
            scheduled_at: scheduled.map(String::from),
            started_at: started.map(String::from),
            error_reason: error.to_string(),
            ended_at: ended.map(String::from),
            rrule: rrule.map(String::from),
            ..Scan::default()
        }
    }

    #[test]
    fn scheduled_and_started_is_scanning() {
        assert_eq!(scan_status(&scan(Some("t0"), Some("t1"), "", None, None)), ScanStatus::Scanning);
    }

    #[test]
    fn scheduled_only_is_scheduled() {
        assert_eq!(scan_status(&scan(Some("t0"), None, "", None, None)), ScanStatus::Scheduled);
    }

    #[test]
    fn schedule_wins_over_error() {
        assert_eq!(scan_status(&scan(Some("t0"), None, "boom", Some("t2"), None)), ScanStatus::Scheduled);
    }

    #[test]
    fn error_is_failed() {
        assert_eq!(scan_status(&scan(None, None, "disk full", None, None)), ScanStatus::Failed);
    }

    #[test]
    fn error_wins_over_ended() {
        assert_eq!(scan_status(&scan(None, Some("t1"), "timeout", Some("t2"), None)), ScanStatus::Failed);
    }

    #[test]
    fn ended_is_completed() {
        assert_eq!(scan_status(&scan(None, None, "", Some("t2"), None)), ScanStatus::Completed);
    }

    #[test]
    fn rrule_only_is_scheduled() {
        assert_eq!(scan_status(&scan(None, None, "", None, Some("FREQ=DAILY"))), ScanStatus::Scheduled);
    }

    #[test]
    fn nothing_is_unscheduled() {
        assert_eq!(scan_status(&Scan::default()), ScanStatus::Unscheduled);
        assert_eq!(scan_status(&scan(Some(""), None, "", Some(""), Some(""))), ScanStatus::Unscheduled);
    }

    #[test]
    fn started_without_schedule_is_ignored() {
        assert_eq!(scan_status(&scan(None, Some("t1"), "", None, None)), ScanStatus::Unscheduled);
    }

    #[test]
    fn method_matches_function() {
        let s = scan(None, None, "", Some("t2"), None);
        assert_eq!(s.status(), ScanStatus::Completed);
    }
}
