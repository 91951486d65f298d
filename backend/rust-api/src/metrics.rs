use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Leaderboard Metrics
    pub static ref LEADERBOARD_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "leaderboard_operations_total",
        "Total number of leaderboard store operations",
        &["backend", "operation", "status"]
    )
    .unwrap();

    pub static ref LEADERBOARD_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "leaderboard_operation_duration_seconds",
        "Leaderboard store operation duration in seconds",
        &["backend", "operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1]
    )
    .unwrap();

    // Game Metrics
    pub static ref SESSIONS_ISSUED_TOTAL: IntCounter = register_int_counter!(
        "sessions_issued_total",
        "Total number of game sessions issued"
    )
    .unwrap();

    pub static ref SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "score_submissions_total",
        "Total number of score submissions by outcome",
        &["result"]
    )
    .unwrap();

    pub static ref QUESTIONS_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "questions_generated_total",
        "Total number of questions served over HTTP",
        &["family"]
    )
    .unwrap();

    pub static ref GENERATION_FALLBACKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "question_generation_fallbacks_total",
        "Total number of times the selector served the fallback question",
        &["family"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track leaderboard store operation with metrics
pub async fn track_leaderboard_operation<F, T>(
    backend: &str,
    operation: &str,
    future: F,
) -> Result<T, anyhow::Error>
where
    F: std::future::Future<Output = Result<T, anyhow::Error>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    LEADERBOARD_OPERATIONS_TOTAL
        .with_label_values(&[backend, operation, status])
        .inc();

    LEADERBOARD_OPERATION_DURATION_SECONDS
        .with_label_values(&[backend, operation])
        .observe(duration);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_metrics() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        SUBMISSIONS_TOTAL.with_label_values(&["accepted"]).inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("score_submissions_total"));
    }

    #[tokio::test]
    async fn tracked_operations_count_errors() {
        let before = LEADERBOARD_OPERATIONS_TOTAL
            .with_label_values(&["test", "lookup", "error"])
            .get();

        let result: Result<(), _> =
            track_leaderboard_operation("test", "lookup", async { Err(anyhow::anyhow!("boom")) })
                .await;
        assert!(result.is_err());

        let after = LEADERBOARD_OPERATIONS_TOTAL
            .with_label_values(&["test", "lookup", "error"])
            .get();
        assert_eq!(after, before + 1);
    }
}
