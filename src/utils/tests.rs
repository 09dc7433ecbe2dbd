#[cfg(test)]
mod unit_tests {
    use crate::utils::{format_duration, measure_time};
    use std::time::Duration;

    #[test]
    fn test_format_duration_milliseconds() {
        let duration = Duration::from_millis(500);
        assert_eq!(format_duration(duration), "500ms");
    }

    #[test]
    fn test_format_duration_seconds() {
        let duration = Duration::from_millis(1500);
        assert_eq!(format_duration(duration), "1.50s");
    }

    #[tokio::test]
    async fn test_measure_time() {
        let (duration, result) = measure_time(|| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            "test_result"
        })
        .await;

        assert!(duration >= Duration::from_millis(90)); // Allow some margin
        assert!(duration <= Duration::from_millis(300)); // Upper bound
        assert_eq!(result, "test_result");
    }
}
