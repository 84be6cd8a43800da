#[cfg(test)]
mod tests {
    use crate::core::samples::{BandValues, TimeSeries};
    use crate::error::AlignmentError;
    use crate::parsing::timeline_parser::{
        extract_timeline, parse_dates_str, parse_timeline_str, TimelineSource,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Test parsing a coverage descriptor with a timeline field
    #[test]
    fn test_parse_coverage_timeline() {
        let json = r#"{
            "name": "MOD13Q1",
            "bands": ["ndvi", "evi"],
            "timeline": ["2000-02-18", "2000-03-05", "2000-03-21"]
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.first(), date(2000, 2, 18));
        assert_eq!(timeline.last(), date(2000, 3, 21));
    }

    /// Test that unsorted and duplicated timelines are normalised
    #[test]
    fn test_timeline_is_sorted_and_deduplicated() {
        let json = r#"{
            "timeline": ["2000-03-05", "2000-02-18", "2000-03-05", "2000-03-21T00:00:00Z"]
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(
            timeline.dates(),
            &[date(2000, 2, 18), date(2000, 3, 5), date(2000, 3, 21)]
        );
    }

    /// Test that only the first per-tile timeline of a coverage is used
    #[test]
    fn test_coverage_uses_first_tile_timeline() {
        let json = r#"{
            "timeline": [
                ["2000-01-01", "2000-01-17", "2000-02-02"],
                ["2005-01-01", "2005-01-17"]
            ]
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.last(), date(2000, 2, 2));
        assert!(!timeline.contains(date(2005, 1, 1)));
    }

    /// Test that raw dates keep input order and duplicates
    #[test]
    fn test_parse_dates_keeps_raw_order() {
        let dates = parse_dates_str(r#"{"timeline": ["2000-03-05", "2000-02-18", "2000-03-05"]}"#)
            .unwrap();
        assert_eq!(
            dates,
            vec![date(2000, 3, 5), date(2000, 2, 18), date(2000, 3, 5)]
        );
    }

    /// Test a bare array descriptor
    #[test]
    fn test_parse_bare_array() {
        let timeline = parse_timeline_str(r#"["2001-01-01", "2001-01-17"]"#).unwrap();
        assert_eq!(timeline.start_cadence_days(), 16);
    }

    /// Test a sample record with a column-oriented time series
    #[test]
    fn test_parse_time_series_index() {
        let json = r#"{
            "label": "Forest",
            "time_series": {
                "index": ["2000-09-13", "2000-09-29", "2000-10-15"],
                "bands": [{"name": "ndvi", "values": [0.8, 0.7, 0.75]}]
            }
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.first(), date(2000, 9, 13));
    }

    /// Test a sample record with row-oriented time series (one row per date)
    #[test]
    fn test_parse_time_series_rows() {
        let json = r#"{
            "time_series": [
                {"Index": "2000-09-13", "ndvi": 0.8},
                {"Index": "2000-09-29", "ndvi": 0.7}
            ]
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(timeline.dates(), &[date(2000, 9, 13), date(2000, 9, 29)]);
    }

    /// Coverage timeline wins over an embedded time series
    #[test]
    fn test_timeline_field_takes_precedence() {
        let json = r#"{
            "timeline": ["2010-01-01", "2010-01-17"],
            "time_series": {"index": ["2000-01-01", "2000-01-17"]}
        }"#;

        let timeline = parse_timeline_str(json).unwrap();
        assert_eq!(timeline.first(), date(2010, 1, 1));
    }

    #[test]
    fn test_missing_fields_is_invalid_timeline() {
        let err = parse_timeline_str(r#"{"name": "MOD13Q1"}"#).unwrap_err();
        assert!(matches!(err, AlignmentError::InvalidTimeline(_)));
    }

    #[test]
    fn test_null_timeline_is_invalid() {
        let err = parse_timeline_str(r#"{"timeline": null}"#).unwrap_err();
        assert!(matches!(err, AlignmentError::InvalidTimeline(_)));
    }

    #[test]
    fn test_empty_timeline_is_invalid() {
        let err = parse_timeline_str(r#"{"timeline": []}"#).unwrap_err();
        assert!(matches!(err, AlignmentError::InvalidTimeline(_)));
    }

    #[test]
    fn test_single_date_is_invalid() {
        let err = parse_timeline_str(r#"{"timeline": ["2000-01-01", "2000-01-01"]}"#).unwrap_err();
        assert!(matches!(err, AlignmentError::InvalidTimeline(_)));
    }

    #[test]
    fn test_bad_date_names_the_value() {
        let err = parse_timeline_str(r#"{"timeline": ["2000-01-01", "yesterday"]}"#).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_timeline_str("{\"timeline\": [").unwrap_err();
        assert!(matches!(err, AlignmentError::Parse { .. }));
    }

    #[test]
    fn test_extract_from_time_series() {
        let series = TimeSeries {
            index: vec![date(2000, 1, 17), date(2000, 1, 1)],
            bands: vec![BandValues {
                name: "ndvi".to_string(),
                values: vec![0.5, 0.4],
            }],
        };

        let timeline = extract_timeline(TimelineSource::TimeSeries(&series)).unwrap();
        assert_eq!(timeline.first(), date(2000, 1, 1));

        let empty = TimeSeries::default();
        assert!(extract_timeline(TimelineSource::TimeSeries(&empty)).is_err());
    }
}
