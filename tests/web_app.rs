// HTTP-level tests of the single-page app.

mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::KeywordClassifier;
use review_sentiment::reviews::Analyzer;
use review_sentiment::web::{configure_routes, Templates};

const BOUNDARY: &str = "----reviewsentimentboundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: text/csv\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_form(parts: &[Part<'_>]) -> (StatusCode, String) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Analyzer::new(Arc::new(
                KeywordClassifier::default(),
            ))))
            .app_data(web::Data::new(Templates::new().unwrap()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(parts))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn index_renders_the_empty_form() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Templates::new().unwrap()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    assert!(html.contains("Product Review Sentiment Analyzer"));
    assert!(html.contains("name=\"reviews\""));
    assert!(!html.contains("Download results as CSV"));
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(App::new().configure(configure_routes)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());
    assert_eq!(test::read_body(resp).await, "ok");
}

#[actix_web::test]
async fn pasted_reviews_render_a_results_table() {
    let (status, html) = post_form(&[
        Part::Text("mode", "text"),
        Part::Text("reviews", "Great quality!\nBroke in a week."),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Analyzed 2 reviews!"));
    assert!(html.contains("<td class=\"review\">Great quality!</td><td>Positive</td><td>0.93</td>"));
    assert!(html.contains("<td class=\"review\">Broke in a week.</td><td>Negative</td><td>0.81</td>"));
    assert!(html.contains("download=\"sentiment_results.csv\""));
}

#[actix_web::test]
async fn download_link_carries_the_results_csv() {
    let (_, html) = post_form(&[
        Part::Text("mode", "text"),
        Part::Text("reviews", "Love them"),
    ])
    .await;

    let prefix = "href=\"data:text/csv;charset=utf-8;base64,";
    let start = html.find(prefix).unwrap() + prefix.len();
    let end = start + html[start..].find('"').unwrap();
    let csv = BASE64.decode(&html[start..end]).unwrap();

    assert_eq!(csv, b"Review,Sentiment,Confidence\nLove them,Positive,0.93\n");
}

#[actix_web::test]
async fn blank_text_shows_a_warning() {
    let (status, html) = post_form(&[
        Part::Text("mode", "text"),
        Part::Text("reviews", "\n   \n"),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Please enter at least one review or upload a valid CSV."));
    assert!(!html.contains("Download results as CSV"));
}

#[actix_web::test]
async fn csv_mode_without_upload_shows_a_warning() {
    let (_, html) = post_form(&[
        Part::Text("mode", "csv"),
        Part::File("file", "", b""),
    ])
    .await;

    assert!(html.contains("Please enter at least one review or upload a valid CSV."));
}

#[actix_web::test]
async fn uploaded_csv_is_analyzed() {
    let (_, html) = post_form(&[
        Part::Text("mode", "csv"),
        Part::Text("reviews", "Ignored because csv mode wins"),
        Part::File("file", "reviews.csv", b"id,review\n1,Beautiful packaging\n2,Too heavy\n"),
    ])
    .await;

    assert!(html.contains("Analyzed 2 reviews!"));
    assert!(html.contains("Beautiful packaging"));
    assert!(html.contains("Too heavy"));
}

#[actix_web::test]
async fn csv_without_review_column_shows_schema_error() {
    let (status, html) = post_form(&[
        Part::Text("mode", "csv"),
        Part::File("file", "reviews.csv", b"comment\nLovely\n"),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("CSV must contain a column named"));
    assert!(!html.contains("Download results as CSV"));
}
