#[cfg(test)]
mod tests {
    use crate::error::AlignmentError;
    use crate::io::loaders::{SamplesLoader, TimelineLoader};
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_timeline_file() {
        let file = json_file(r#"{"timeline": ["2000-02-18", "2000-03-05", "2000-03-21"]}"#);
        let timeline = TimelineLoader::load_from_file(file.path()).unwrap();
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn test_load_raw_dates_file() {
        let file = json_file(r#"{"timeline": ["2000-03-05", "2000-02-18", "2000-03-05"]}"#);
        let dates = TimelineLoader::load_dates_from_file(file.path()).unwrap();
        assert_eq!(dates.len(), 3);
        assert!(dates[0] > dates[1]);
    }

    #[test]
    fn test_load_samples_file() {
        let file = json_file(
            r#"[{"start_date": "2000-09-13", "end_date": "2001-08-29", "label": "Forest"}]"#,
        );
        let samples = SamplesLoader::load_from_file(file.path()).unwrap();
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date\n2000-01-01").unwrap();

        let err = TimelineLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported timeline file format"));
    }

    #[test]
    fn test_missing_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = SamplesLoader::load_from_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_alignment_error_survives_context() {
        let file = json_file(r#"{"name": "no timeline here"}"#);
        let err = TimelineLoader::load_from_file(file.path()).unwrap_err();

        let cause = err.downcast_ref::<AlignmentError>().unwrap();
        assert_eq!(cause.kind(), "InvalidTimelineError");
    }
}
