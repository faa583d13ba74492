//! Integration tests for npm-analyzer
//!
//! These tests verify:
//! - Full analyses against a mocked npm registry
//! - Registry failures degrade single rows only
//! - The HTTP endpoint wired to a real registry adapter

use mockito::{Matcher, Server, ServerGuard};
use npm_analyzer::config::AnalyzerConfig;
use npm_analyzer::domain::{UpdateType, NOT_FOUND_MESSAGE};
use npm_analyzer::orchestrator::Analyzer;

/// Build an analyzer pointed at a mock registry with no batch pause
fn analyzer_for(server: &ServerGuard) -> Analyzer {
    let mut config = AnalyzerConfig::default();
    config.registry.url = server.url();
    config.batch.delay_ms = 0;
    Analyzer::from_config(&config).expect("Failed to build analyzer")
}

fn packument(name: &str, latest: &str) -> String {
    serde_json::json!({
        "name": name,
        "dist-tags": { "latest": latest },
        "description": format!("{} package", name),
        "license": "MIT",
        "time": { latest: "2024-01-15T10:00:00.000Z" }
    })
    .to_string()
}

mod analysis {
    use super::*;

    /// Test a mixed manifest with every update type
    #[tokio::test]
    async fn test_mixed_manifest() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for (name, latest) in [
            ("react", "19.0.0"),
            ("lodash", "4.17.21"),
            ("axios", "1.7.2"),
            ("typescript", "5.4.5"),
        ] {
            mocks.push(
                server
                    .mock("GET", format!("/{}", name).as_str())
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_body(packument(name, latest))
                    .create_async()
                    .await,
            );
        }

        let manifest = r#"{
            "name": "web",
            "dependencies": {
                "react": "^18.2.0",
                "lodash": "4.17.20",
                "axios": "~1.6.0"
            },
            "devDependencies": {
                "typescript": "5.4.5"
            }
        }"#;

        let result = analyzer_for(&server).analyze(manifest).await;

        assert!(result.success);
        let types: Vec<_> = result.dependencies.iter().map(|d| d.update_type).collect();
        assert_eq!(
            types,
            vec![
                UpdateType::Major,
                UpdateType::Patch,
                UpdateType::Minor,
                UpdateType::UpToDate
            ]
        );
        assert_eq!(result.total_packages, Some(4));
        assert_eq!(result.packages_with_updates, Some(3));
        assert_eq!(result.dependencies[0].license.as_deref(), Some("MIT"));
        assert_eq!(
            result.dependencies[0].published_date.as_deref(),
            Some("2024-01-15T10:00:00.000Z")
        );
        assert!(result.dependencies[3].is_dev);

        for mock in mocks {
            mock.assert_async().await;
        }
    }

    /// Test that a 404 becomes an Unknown row
    #[tokio::test]
    async fn test_unknown_package() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/this-package-does-not-exist")
            .with_status(404)
            .with_body(r#"{"error":"Not found"}"#)
            .create_async()
            .await;

        let result = analyzer_for(&server)
            .analyze(r#"{"dependencies": {"this-package-does-not-exist": "^1.0.0"}}"#)
            .await;

        mock.assert_async().await;
        assert!(result.success);
        let dep = &result.dependencies[0];
        assert_eq!(dep.resolved_latest, "Unknown");
        assert_eq!(dep.update_type, UpdateType::UpToDate);
        assert_eq!(dep.lookup_error.as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    /// Test that a server error only affects its own row
    #[tokio::test]
    async fn test_server_error_is_isolated() {
        let mut server = Server::new_async().await;
        let _broken = server
            .mock("GET", "/broken")
            .with_status(503)
            .create_async()
            .await;
        let _ok = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_body(packument("left-pad", "1.3.0"))
            .create_async()
            .await;

        let result = analyzer_for(&server)
            .analyze(r#"{"dependencies": {"broken": "1.0.0", "left-pad": "1.0.0"}}"#)
            .await;

        assert!(result.success);
        let broken = &result.dependencies[0];
        assert_eq!(broken.resolved_latest, "Unknown");
        assert!(broken
            .lookup_error
            .as_deref()
            .unwrap()
            .starts_with("Failed to fetch package from npm registry"));
        assert_eq!(result.dependencies[1].update_type, UpdateType::Minor);
        assert_eq!(result.packages_with_updates, Some(1));
    }

    /// Test scoped names are requested percent-encoded
    #[tokio::test]
    async fn test_scoped_package() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/%40types%2Fnode")
            .with_status(200)
            .with_body(packument("@types/node", "20.11.5"))
            .create_async()
            .await;

        let result = analyzer_for(&server)
            .analyze(r#"{"devDependencies": {"@types/node": "^18.0.0"}}"#)
            .await;

        mock.assert_async().await;
        assert_eq!(result.dependencies[0].update_type, UpdateType::Major);
    }

    /// Test that invalid input never reaches the registry
    #[tokio::test]
    async fn test_invalid_input_makes_no_requests() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let analyzer = analyzer_for(&server);

        for input in ["", "{}", "[1, 2]", "{ nope", r#"{"dependencies": "react"}"#] {
            let result = analyzer.analyze(input).await;
            assert!(!result.success, "input {:?} should fail", input);
            assert!(result.dependencies.is_empty());
            assert!(result.error.is_some());
        }

        mock.assert_async().await;
    }

    /// Test each distinct name is requested once
    #[tokio::test]
    async fn test_duplicate_name_requested_once() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/lodash")
            .with_status(200)
            .with_body(packument("lodash", "4.17.21"))
            .expect(1)
            .create_async()
            .await;

        let result = analyzer_for(&server)
            .analyze(
                r#"{"dependencies": {"lodash": "^4.0.0"}, "devDependencies": {"lodash": "^4.17.21"}}"#,
            )
            .await;

        mock.assert_async().await;
        assert_eq!(result.total_packages, Some(2));
    }
}

mod http {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use npm_analyzer::server::{router, AppState};
    use tower::ServiceExt;

    /// Test the endpoint end to end against a mock registry
    #[tokio::test]
    async fn test_analyze_endpoint() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_body(packument("left-pad", "1.3.0"))
            .create_async()
            .await;

        let app = router(AppState::new(analyzer_for(&server)));
        let body = serde_json::json!({
            "packageJsonContent": r#"{"dependencies": {"left-pad": "1.0.0"}}"#
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["dependencies"][0]["name"], "left-pad");
        assert_eq!(json["dependencies"][0]["resolvedLatest"], "1.3.0");
        assert_eq!(json["dependencies"][0]["updateType"], "minor");
        assert_eq!(json["dependencies"][0]["isDev"], false);
    }
}
