//! Full scrape runs against the mock syllabus site

use crate::{fast_fetcher, syllabus_server};
use naist_syllabus::config::{Config, FetcherConfig, OutputConfig, SourceConfig};
use naist_syllabus::storage::{open_storage, RunStatus, Storage};
use naist_syllabus::syllabus::run_scrape_with;
use naist_syllabus::{LectureCategory, SyllabusError};
use std::path::Path;
use tempfile::TempDir;

/// Creates a test configuration writing into `dir`
fn create_test_config(listing_url: &str, dir: &Path) -> Config {
    Config {
        source: SourceConfig {
            listing_url: listing_url.to_string(),
            categories: LectureCategory::ALL.to_vec(),
            scrape_details: true,
            lectures_file: None,
        },
        fetcher: FetcherConfig {
            request_delay_ms: 0,
            ..FetcherConfig::default()
        },
        output: OutputConfig {
            database_path: dir.join("syllabus.db").display().to_string(),
            summary_path: dir.join("syllabus.md").display().to_string(),
        },
    }
}

#[tokio::test]
async fn test_full_run() {
    let mock_server = syllabus_server().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/syllabus.html", mock_server.uri()), dir.path());

    let report = run_scrape_with(&config, "hash", fast_fetcher())
        .await
        .expect("Run failed");

    assert_eq!(report.lectures[&LectureCategory::General], 3);
    assert_eq!(report.lectures[&LectureCategory::Introduction], 2);
    assert_eq!(report.lectures[&LectureCategory::Basic], 2);
    assert_eq!(report.lectures[&LectureCategory::Specialized], 3);
    // The duplicated listing row shares one detail entry
    assert_eq!(report.lectures_with_details, 9);
    assert_eq!(report.sessions, 27);

    // One listing request plus one per distinct lecture page
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 10);

    let storage = open_storage(Path::new(&config.output.database_path)).unwrap();
    let run = storage.get_latest_run().unwrap().unwrap();
    assert_eq!(run.id, report.run_id);
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.config_hash, "hash");
    assert_eq!(storage.count_lectures(run.id).unwrap(), 10);
    assert_eq!(storage.count_sessions(run.id).unwrap(), 27);

    let summary = std::fs::read_to_string(&config.output.summary_path).unwrap();
    assert!(summary.contains("## Specialized Courses (3)"));
    assert!(summary.contains("| 1 | 4/22 [2] | スーパスカラとVLIW (日本語教科書８章) |"));
}

#[tokio::test]
async fn test_run_without_details() {
    let mock_server = syllabus_server().await;
    let dir = TempDir::new().unwrap();
    let mut config =
        create_test_config(&format!("{}/syllabus.html", mock_server.uri()), dir.path());
    config.source.categories = vec![LectureCategory::Basic];
    config.source.scrape_details = false;

    let report = run_scrape_with(&config, "hash", fast_fetcher())
        .await
        .unwrap();

    assert_eq!(report.lectures.len(), 1);
    assert_eq!(report.lectures[&LectureCategory::Basic], 2);
    assert_eq!(report.lectures_with_details, 0);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "only the listing page should be fetched");
}

#[tokio::test]
async fn test_run_with_lectures_file() {
    let mock_server = syllabus_server().await;
    let dir = TempDir::new().unwrap();
    let batch_path = dir.path().join("lectures.json");
    std::fs::write(
        &batch_path,
        format!(
            r#"[{{"name": "高性能計算基盤", "url": "{0}/detail_1.html"}}, {{"name": "URLなし"}}, {{"name": "集中講義", "url": "{0}/subjects/preview_detail/999"}}]"#,
            mock_server.uri()
        ),
    )
    .unwrap();

    let mut config =
        create_test_config(&format!("{}/syllabus.html", mock_server.uri()), dir.path());
    config.source.lectures_file = Some(batch_path.display().to_string());

    let report = run_scrape_with(&config, "hash", fast_fetcher())
        .await
        .unwrap();
    assert_eq!(report.lectures_with_details, 2);
    assert_eq!(report.sessions, 6);

    let storage = open_storage(Path::new(&config.output.database_path)).unwrap();
    let sessions = storage.load_sessions(report.run_id).unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.contains_key("高性能計算基盤"));
    assert!(sessions.contains_key("集中講義"));

    // The unlisted lecture's sessions still reach the summary
    let summary = std::fs::read_to_string(&config.output.summary_path).unwrap();
    assert!(summary.contains("- **Sessions**: 6\n"));
    assert!(summary.contains("## Other Lectures (1)\n\n### 集中講義\n\n| # | Date | Theme | Content |"));
}

#[tokio::test]
async fn test_failed_run_is_recorded() {
    let mock_server = syllabus_server().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/not_existed_index.html", mock_server.uri()),
        dir.path(),
    );

    let result = run_scrape_with(&config, "hash", fast_fetcher()).await;
    assert!(matches!(result, Err(SyllabusError::Fetch(_))));

    let storage = open_storage(Path::new(&config.output.database_path)).unwrap();
    let run = storage.get_latest_run().unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert!(run.error_message.unwrap().contains("404"));
    assert!(!Path::new(&config.output.summary_path).exists());
}
