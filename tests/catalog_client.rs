use bus_catalog_scraper::{
    catalog::CatalogClient, BatchRunner, Failure, Fetcher, Field, ProductRecord, ScraperConfig,
    ScraperError,
};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::{
    matchers::{body_string, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const SEARCH_PATH: &str = "/cgi-bin/search.pl";

fn page(name: &str, price: &str) -> String {
    format!(
        r#"<div class="art_liste_artikel_komplett">
             <div class="dark_caption">{}</div>
             <div class="preis_list_preis">ab € {}</div>
             <span class="light">Verp.eenh.:</span> 10 stuks
           </div>"#,
        name, price
    )
}

fn config(server: &MockServer) -> ScraperConfig {
    ScraperConfig {
        search_url: format!("{}{}", server.uri(), SEARCH_PATH),
        timeout: Duration::from_millis(300),
        delay: Duration::from_millis(10),
        ..ScraperConfig::default()
    }
}

async fn mount_article(server: &MockServer, identifier: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_string(format!("suchtext={}", identifier)))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_posts_search_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("suchtext=10.123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Bout", "1,00")))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(&config(&server)).expect("client");
    let html = client.fetch("10.123").await.expect("fetch");
    assert!(html.contains("dark_caption"));
}

#[tokio::test]
async fn test_fetch_rejects_error_status() {
    let server = MockServer::start().await;
    mount_article(&server, "X", ResponseTemplate::new(500)).await;

    let client = CatalogClient::new(&config(&server)).expect("client");
    let res = client.fetch("X").await;
    assert!(matches!(res, Err(ScraperError::Status(s)) if s.as_u16() == 500));
}

#[tokio::test]
async fn test_batch_with_timeout_keeps_other_records() {
    let server = MockServer::start().await;
    mount_article(
        &server,
        "A1",
        ResponseTemplate::new(200).set_body_string(page("Moer M6", "0,10")),
    )
    .await;
    mount_article(
        &server,
        "B2",
        ResponseTemplate::new(200)
            .set_body_string(page("Traag", "9,99"))
            .set_delay(Duration::from_secs(2)),
    )
    .await;
    mount_article(
        &server,
        "C3",
        ResponseTemplate::new(200).set_body_string(page("Ring M6", "0,05")),
    )
    .await;

    let mut runner = BatchRunner::catalog(&config(&server)).expect("runner");
    let results = runner.run(["A1", " ", "B2", "C3"]).await.expect("batch");

    assert_eq!(
        results,
        vec![
            ProductRecord {
                identifier: "A1".to_string(),
                name: Field::Found("Moer M6".to_string()),
                price: Field::Found("0,10".to_string()),
                packaging_unit: Field::Found("10 stuks".to_string()),
            },
            ProductRecord::failed("B2", Failure::Fetch),
            ProductRecord {
                identifier: "C3".to_string(),
                name: Field::Found("Ring M6".to_string()),
                price: Field::Found("0,05".to_string()),
                packaging_unit: Field::Found("10 stuks".to_string()),
            },
        ]
    );
    assert_eq!(results[1].name.to_string(), "fetch error");
    assert_eq!(results[1].packaging_unit.to_string(), "n/a");
}

#[tokio::test]
async fn test_session_cookies_are_kept_between_requests() {
    let server = MockServer::start().await;
    mount_article(
        &server,
        "A1",
        ResponseTemplate::new(200)
            .insert_header("set-cookie", "session=abc; Path=/")
            .set_body_string(page("Moer M6", "0,10")),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("cookie", "session=abc"))
        .and(body_string("suchtext=B2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Ring M6", "0,05")))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(&config(&server)).expect("client");
    client.fetch("A1").await.expect("first");
    let html = client.fetch("B2").await.expect("second carries cookie");
    assert!(html.contains("Ring M6"));
}
