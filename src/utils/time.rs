use std::time::SystemTime;
use chrono::{DateTime, Local};

// 超时通常只有几十毫秒，时间戳保留到毫秒
pub fn format_datetime(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_millisecond_precision() {
        let formatted = format_datetime(SystemTime::now());
        // YYYY-MM-DD HH:MM:SS.mmm
        assert_eq!(formatted.len(), 23);
        assert_eq!(&formatted[19..20], ".");
    }
}
