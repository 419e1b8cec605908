mod common;

use axum::http::StatusCode;
use common::{TestEnv, TEST_TOKEN};

async fn patch(
    env: &TestEnv,
    slug: &str,
    payload: serde_json::Value,
) -> serde_json::Value {
    let response = env
        .server
        .patch(&format!("/api/articles/{slug}"))
        .authorization_bearer(TEST_TOKEN)
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<serde_json::Value>()["article"].clone()
}

#[tokio::test]
async fn duplicate_titles_get_distinct_slugs() {
    let env = TestEnv::start();

    let first = env.create_article("Rutinitas pagi", "Isi.", "draft").await;
    let second = env.create_article("Rutinitas pagi", "Isi.", "draft").await;
    let third = env.create_article("Rutinitas Pagi", "Isi.", "draft").await;

    assert_eq!(first["slug"], "rutinitas-pagi");
    assert_eq!(second["slug"], "rutinitas-pagi-2");
    assert_eq!(third["slug"], "rutinitas-pagi-3");
}

#[tokio::test]
async fn example_scenario_napas_dulu() {
    let env = TestEnv::start();

    let body = vec!["word"; 200].join(" ");
    let response = env
        .server
        .post("/api/articles")
        .authorization_bearer(TEST_TOKEN)
        .json(&serde_json::json!({
            "title": "Napas Dulu",
            "excerpt": "e",
            "body": body,
            "status": "draft",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let article = response.json::<serde_json::Value>()["article"].clone();
    assert_eq!(article["slug"], "napas-dulu");
    assert_eq!(article["readTimeMinutes"], 2);
    assert!(article["publishedAt"].is_null());

    let published = patch(
        &env,
        "napas-dulu",
        serde_json::json!({ "status": "published" }),
    )
    .await;
    assert_eq!(published["status"], "published");
    assert!(published["publishedAt"].is_string());
}

#[tokio::test]
async fn publish_stamp_follows_first_publish_rule() {
    let env = TestEnv::start();
    let article = env
        .create_article("Siklus terbit", "Isi artikel.", "draft")
        .await;
    let slug = article["slug"].as_str().unwrap();

    let published = patch(&env, slug, serde_json::json!({ "status": "published" })).await;
    let first_stamp = published["publishedAt"].as_str().unwrap().to_string();

    // Editing while published keeps the stamp.
    let edited = patch(&env, slug, serde_json::json!({ "title": "Siklus terbit v2" })).await;
    assert_eq!(edited["publishedAt"].as_str().unwrap(), first_stamp);
    // The slug never follows the title.
    assert_eq!(edited["slug"].as_str().unwrap(), slug);

    // Unpublishing clears it.
    let drafted = patch(&env, slug, serde_json::json!({ "status": "draft" })).await;
    assert!(drafted["publishedAt"].is_null());

    // Re-publishing stamps anew.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let republished = patch(&env, slug, serde_json::json!({ "status": "published" })).await;
    let second_stamp = republished["publishedAt"].as_str().unwrap();
    assert_ne!(second_stamp, first_stamp);
}

#[tokio::test]
async fn empty_patch_only_refreshes_updated_at() {
    let env = TestEnv::start();
    let article = env
        .create_article("Tanpa perubahan", "Isi tetap.", "published")
        .await;
    let slug = article["slug"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = patch(&env, slug, serde_json::json!({})).await;

    assert_eq!(updated["title"], article["title"]);
    assert_eq!(updated["excerpt"], article["excerpt"]);
    assert_eq!(updated["body"], article["body"]);
    assert_eq!(updated["tags"], article["tags"]);
    assert_eq!(updated["author"], article["author"]);
    assert_eq!(updated["readTimeMinutes"], article["readTimeMinutes"]);
    assert_eq!(updated["createdAt"], article["createdAt"]);
    assert_ne!(updated["updatedAt"], article["updatedAt"]);
}

#[tokio::test]
async fn body_normalization_applies_on_create() {
    let env = TestEnv::start();

    let response = env
        .server
        .post("/api/articles")
        .authorization_bearer(TEST_TOKEN)
        .json(&serde_json::json!({
            "title": "Normalisasi isi",
            "excerpt": "  ringkas   sekali  ",
            "body": "baris satu  \r\nbaris dua\t\r\n\r\n  akhir  \r\n",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let article = response.json::<serde_json::Value>()["article"].clone();
    assert_eq!(article["excerpt"], "ringkas sekali");
    assert_eq!(article["body"], "baris satu\nbaris dua\n\n  akhir");
}

#[tokio::test]
async fn simultaneous_creates_with_one_title_all_survive() {
    let env = TestEnv::start();

    // Drive the three creates concurrently so their read-modify-write
    // windows overlap; the store must serialize them instead of letting a
    // late writer clobber an earlier one.
    let (first, second, third) = tokio::join!(
        env.create_article("Sinkron bareng", "Isi.", "draft"),
        env.create_article("Sinkron bareng", "Isi.", "draft"),
        env.create_article("Sinkron bareng", "Isi.", "draft"),
    );

    let mut slugs: Vec<String> = [&first, &second, &third]
        .iter()
        .map(|article| article["slug"].as_str().unwrap().to_string())
        .collect();
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), 3, "each create kept a distinct slug");

    let response = env
        .server
        .get("/api/articles")
        .add_query_param("includeDraft", "true")
        .await;
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["articles"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn listing_orders_by_publish_or_update_stamp() {
    let env = TestEnv::start();

    env.create_article("Terbit lama", "Isi.", "published").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    env.create_article("Terbit baru", "Isi.", "published").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    // Re-publishing the older article does not move it forward (its stamp
    // survives), but an unpublish/republish cycle does.
    patch(&env, "terbit-lama", serde_json::json!({ "status": "draft" })).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    patch(&env, "terbit-lama", serde_json::json!({ "status": "published" })).await;

    let response = env.server.get("/api/articles").await;
    let body = response.json::<serde_json::Value>();
    let slugs: Vec<&str> = body["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|article| article["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["terbit-lama", "terbit-baru"]);
}
