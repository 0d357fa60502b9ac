//! Pipeline behavior over real HTTP

use crate::{fast_fetcher, html, syllabus_server};
use naist_syllabus::syllabus::Fetcher;
use naist_syllabus::{
    FetchError, LectureCategory, LectureDetail, LectureInput, LectureNameUrl, ParseError,
    Pipeline, SyllabusError,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_init_with_valid_url() {
    let mock_server = syllabus_server().await;
    let url = format!("{}/syllabus.html", mock_server.uri());

    let pipeline = Pipeline::with_fetcher(fast_fetcher(), &url).await;
    assert!(pipeline.is_ok(), "construction failed: {:?}", pipeline.err());
}

#[tokio::test]
async fn test_init_with_missing_page() {
    let mock_server = syllabus_server().await;
    let url = format!("{}/not_existed_index.html", mock_server.uri());

    let result = Pipeline::with_fetcher(fast_fetcher(), &url).await;
    assert!(matches!(
        result,
        Err(SyllabusError::Fetch(FetchError::Status { status: 404, .. }))
    ));
}

#[tokio::test]
async fn test_init_with_malformed_url() {
    let result = Pipeline::with_fetcher(fast_fetcher(), "httpaaaa").await;
    assert!(matches!(
        result,
        Err(SyllabusError::Fetch(FetchError::InvalidUrl { .. }))
    ));
}

#[tokio::test]
async fn test_init_with_unreachable_host() {
    // Nothing listens on the discard port
    let result = Pipeline::with_fetcher(fast_fetcher(), "http://127.0.0.1:9/syllabus.html").await;
    assert!(matches!(
        result,
        Err(SyllabusError::Fetch(FetchError::Transport { .. }))
    ));
}

#[tokio::test]
async fn test_init_with_non_html_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/syllabus.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/syllabus.json", mock_server.uri());
    let result = Pipeline::with_fetcher(fast_fetcher(), &url).await;
    assert!(matches!(
        result,
        Err(SyllabusError::Parse(ParseError::NotHtml { .. }))
    ));
}

#[tokio::test]
async fn test_scrape_name_and_url_for_every_category() {
    let mock_server = syllabus_server().await;
    let base = mock_server.uri();
    let pipeline = Pipeline::with_fetcher(fast_fetcher(), &format!("{}/syllabus.html", base))
        .await
        .unwrap();

    let expected = [
        (LectureCategory::General, "技術と倫理", 644),
        (LectureCategory::Introduction, "情報理工学序論", 662),
        (LectureCategory::Basic, "情報科学基礎Ⅰ", 791),
        (LectureCategory::Specialized, "ソフトウェア工学", 688),
    ];

    for (category, name, id) in expected {
        let lectures = pipeline.scrape_name_and_url(category).unwrap();
        let lecture = LectureNameUrl::new(name, format!("{}/subjects/preview_detail/{}", base, id));
        assert!(
            lectures.contains(&lecture),
            "{} should list {:?}",
            category,
            lecture
        );
    }
}

#[tokio::test]
async fn test_scrape_name_and_url_unknown_category() {
    let mock_server = syllabus_server().await;
    let pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    let result = pipeline.scrape_name_and_url_by_key("key error");
    assert!(matches!(result, Err(SyllabusError::Lookup(_))));
}

#[tokio::test]
async fn test_scrape_detail_of_lecture_from_response() {
    let mock_server = syllabus_server().await;
    let fetcher = fast_fetcher();
    let page = fetcher
        .fetch(&format!("{}/detail_1.html", mock_server.uri()))
        .await
        .unwrap();

    let pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();
    let details = pipeline.scrape_detail_of_lecture(&page).unwrap();

    assert_eq!(
        details[0],
        LectureDetail {
            number: 1,
            date: "4/22 [2]".to_string(),
            theme: "スーパスカラとVLIW (日本語教科書８章)".to_string(),
            content: "命令レベル並列性を引き出す\nスーパスカラ方式とVLIW方式を比較する。\n分岐予測の基礎も扱う。"
                .to_string(),
        }
    );
}

#[tokio::test]
async fn test_scrape_details() {
    let mock_server = syllabus_server().await;
    let mut pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    let lecture = LectureNameUrl::new(
        "高性能計算基盤",
        format!("{}/detail_1.html", mock_server.uri()),
    );
    pipeline.scrape_details(vec![lecture]).await.unwrap();

    let details = pipeline.get_lecture_details().unwrap();
    assert_eq!(details["高性能計算基盤"][0].date, "4/22 [2]");
}

#[tokio::test]
async fn test_scrape_details_with_invalid_url() {
    let mock_server = syllabus_server().await;
    let mut pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    for url in [
        format!("{}/not_existed_index.html", mock_server.uri()),
        "httpaaaa".to_string(),
    ] {
        let result = pipeline
            .scrape_details(vec![LectureNameUrl::new("高性能計算基盤", url)])
            .await;
        assert!(matches!(result, Err(SyllabusError::Fetch(_))));
    }
}

#[tokio::test]
async fn test_scrape_details_with_not_lecture_name_url() {
    let mock_server = syllabus_server().await;
    let mut pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    let batch = LectureInput::classify_batch(&json!({
        "name": "高性能計算基盤",
        "url": format!("{}/detail_1.html", mock_server.uri()),
    }));
    pipeline.scrape_details(batch).await.unwrap();

    assert!(pipeline.get_lecture_details().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_lecture_details_without_calling_scrape_details() {
    let mock_server = syllabus_server().await;
    let pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    assert!(matches!(
        pipeline.get_lecture_details(),
        Err(SyllabusError::Uninitialized { .. })
    ));
}

#[tokio::test]
async fn test_detail_page_without_plan() {
    let mock_server = syllabus_server().await;
    Mock::given(method("GET"))
        .and(path("/empty_detail.html"))
        .respond_with(html("<html><body><h1>準備中</h1></body></html>"))
        .mount(&mock_server)
        .await;

    let mut pipeline = Pipeline::with_fetcher(
        fast_fetcher(),
        &format!("{}/syllabus.html", mock_server.uri()),
    )
    .await
    .unwrap();

    let result = pipeline
        .scrape_details(vec![LectureNameUrl::new(
            "準備中の科目",
            format!("{}/empty_detail.html", mock_server.uri()),
        )])
        .await;
    assert!(matches!(
        result,
        Err(SyllabusError::Parse(ParseError::MissingSection { .. }))
    ));
}
