pub struct TimeHelper {}

impl TimeHelper {
    /// # format a duration as minutes
    /// render a millisecond duration as `M:SS.mmm`, the way a lap time is
    /// shown on a timing screen. minutes are not padded, seconds and
    /// milliseconds are
    pub fn ms_to_minutes(ms: i64) -> String {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{}:{:02}.{:03}", minutes, seconds, millis)
    }

    /// same as `ms_to_minutes` but propagates a missing value instead of
    /// formatting it. a driver without a single valid lap has no fastest
    /// lap to render
    pub fn optional_ms_to_minutes(ms: Option<i64>) -> Option<String> {
        ms.map(TimeHelper::ms_to_minutes)
    }

    /// # format a duration as hours
    /// render a millisecond duration as `H:MM:SS.mmm`. used for the total
    /// driving time, which can easily pass the hour mark
    pub fn ms_to_hours(ms: i64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_format() {
        assert_eq!(TimeHelper::ms_to_minutes(61_234), "1:01.234");
        assert_eq!(TimeHelper::ms_to_minutes(85_000), "1:25.000");
        assert_eq!(TimeHelper::ms_to_minutes(999), "0:00.999");
    }

    #[test]
    fn zero_is_a_value_not_a_missing_marker() {
        assert_eq!(TimeHelper::ms_to_minutes(0), "0:00.000");
        assert_eq!(TimeHelper::ms_to_hours(0), "0:00:00.000");
    }

    #[test]
    fn missing_values_propagate() {
        assert_eq!(TimeHelper::optional_ms_to_minutes(None), None);
        assert_eq!(
            TimeHelper::optional_ms_to_minutes(Some(61_234)),
            Some("1:01.234".to_string())
        );
    }

    #[test]
    fn hours_format() {
        assert_eq!(TimeHelper::ms_to_hours(3_661_234), "1:01:01.234");
        assert_eq!(TimeHelper::ms_to_hours(45_296_789), "12:34:56.789");
    }
}
