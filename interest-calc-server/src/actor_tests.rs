#[cfg(test)]
mod tests {
    use crate::actor::CalculatorActor;
    use crate::metrics::Metrics;
    use crate::types::CalculateRequest;
    use interest_calc::{CalcError, Calculator, RateLimitConfig, SlidingWindowLimiter};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::SystemTime;

    fn request(client_id: &str, interest_type: &str) -> CalculateRequest {
        let fields: HashMap<String, String> = [
            ("principal", "1000"),
            ("rate", "5"),
            ("time", "2"),
            ("time_unit", "Years"),
            ("interest_type", interest_type),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        CalculateRequest {
            client_id: client_id.to_string(),
            fields,
            timestamp: SystemTime::now(),
        }
    }

    fn calculator(limit: usize) -> Calculator {
        Calculator::new(SlidingWindowLimiter::with_config(RateLimitConfig::new(
            limit, 60,
        )))
    }

    #[tokio::test]
    async fn test_basic_calculation() {
        let metrics = Arc::new(Metrics::new());
        let handle = CalculatorActor::spawn(100, calculator(30), metrics.clone());

        let response = tokio_test::assert_ok!(handle.calculate(request("client", "simple")).await);
        assert!(!response.rate_limited);
        assert_eq!(
            response.outcome.unwrap(),
            "Simple Interest: 100.00 INR\nTotal Amount: 1,100.00 INR"
        );
        assert_eq!(metrics.active_clients.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let handle = CalculatorActor::spawn(100, calculator(30), Arc::new(Metrics::new()));

        let response = tokio_test::assert_ok!(handle.calculate(request("client", "unknown")).await);
        assert!(!response.rate_limited);
        assert_eq!(response.outcome, Err(CalcError::UnknownInterestType));
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let handle = CalculatorActor::spawn(100, calculator(30), Arc::new(Metrics::new()));

        // Send more requests than the limit at once
        let mut handles = vec![];
        for _ in 0..45 {
            let h = handle.clone();
            handles.push(tokio::spawn(async move {
                h.calculate(request("concurrent", "compound")).await
            }));
        }

        let mut admitted = 0;
        let mut limited = 0;
        for h in handles {
            let response = h.await.unwrap().unwrap();
            if response.rate_limited {
                limited += 1;
            } else {
                admitted += 1;
            }
        }

        // Exactly the allowance gets through
        assert_eq!(admitted, 30);
        assert_eq!(limited, 15);
    }
}
