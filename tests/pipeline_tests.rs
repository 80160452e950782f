mod common;

use common::{widget_repo, FailingFetcher, StaticFetcher};
use repodoc::{AnalysisService, Error, LeadSummarizer};
use std::sync::Arc;

fn service_for(fetcher: Arc<StaticFetcher>) -> AnalysisService {
    AnalysisService::new(fetcher, Arc::new(LeadSummarizer::new(600)), false)
}

#[tokio::test]
async fn test_widget_end_to_end() {
    let fetcher = Arc::new(StaticFetcher::new(widget_repo()));
    let service = service_for(fetcher.clone());

    let report = service
        .analyze("https://github.com/acme/widget")
        .await
        .unwrap();

    let stack = &report.analysis.tech_stack;
    assert!(stack.contains("Python"));
    assert!(stack.contains("JavaScript"));
    assert!(!stack.contains("Node.js"));

    let code = &report.analysis.code_analysis;
    assert_eq!(code.entry_points, vec!["app.py"]);
    assert_eq!(code.dependency_manifests, vec!["requirements.txt"]);
    assert_eq!(code.main_directories, vec!["src"]);

    assert!(report
        .documentation
        .readme
        .contains("pip install -r requirements.txt"));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_report_json_shape() {
    let service = service_for(Arc::new(StaticFetcher::new(widget_repo())));
    let report = service
        .analyze("https://github.com/acme/widget.git")
        .await
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["analysis", "documentation", "repository_info"]);

    assert_eq!(value["repository_info"]["owner"], "acme");
    assert_eq!(value["repository_info"]["stars"], 42);
    assert_eq!(value["repository_info"]["files"][0]["type"], "file");
    assert_eq!(
        value["analysis"]["project_summary"],
        "Project: widget. Description: Makes widgets. Topics: tools."
    );
    assert_eq!(value["analysis"]["complexity_metrics"]["files"], serde_json::json!({}));
    assert!(value["documentation"]["readme"].is_string());
    assert!(value["documentation"]["project_structure"]["root"].is_object());
}

#[tokio::test]
async fn test_unrecognized_url_is_rejected_before_fetching() {
    let service = AnalysisService::new(
        Arc::new(FailingFetcher),
        Arc::new(LeadSummarizer::new(600)),
        false,
    );

    let err = service.analyze("not a url").await.unwrap_err();
    assert!(matches!(err, Error::InvalidRepoUrl { .. }));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let service = AnalysisService::new(
        Arc::new(FailingFetcher),
        Arc::new(LeadSummarizer::new(600)),
        false,
    );

    let err = service
        .analyze("https://github.com/acme/missing")
        .await
        .unwrap_err();
    assert!(!err.is_client_error());
    assert_eq!(err.to_string(), "GitHub error (404): Not Found");
}
