use httpmock::prelude::*;
use solar_presenter::domain::catalog::{
    fallback_faq, fallback_financing_scenarios, FALLBACK_BENEFITS, FALLBACK_IMAGE_URL,
};
use solar_presenter::render::render_view;
use solar_presenter::{
    AppConfig, ContentService, LocalStorage, Presenter, PresentationExporter,
};
use tempfile::TempDir;

const TEXT_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/imagen-4.0-generate-001:predict";

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

fn presenter_for(server: &MockServer) -> Presenter<ContentService> {
    let config = AppConfig {
        base_url: server.url("/v1beta"),
        ..AppConfig::default()
    };
    let mut presenter =
        Presenter::new(ContentService::from_config(&config)).with_env_api_key(None);
    presenter.set_user_api_key("test-key");
    presenter
}

#[tokio::test]
async fn test_end_to_end_generation_with_live_api() {
    let server = MockServer::start();

    let benefits_mock = server.mock(|when, then| {
        when.method(POST)
            .path(TEXT_PATH)
            .header("x-goog-api-key", "test-key")
            .body_contains("primary benefits of residential solar panels");
        then.status(200)
            .json_body(text_response("Solar keeps your family budget predictable."));
    });

    let image_mock = server.mock(|when, then| {
        when.method(POST)
            .path(IMAGE_PATH)
            .body_contains("Solar keeps your family budget predictable.");
        then.status(200).json_body(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "/9j/AAAA", "mimeType": "image/jpeg" }]
        }));
    });

    let financing_json = serde_json::json!([
        {
            "option": "Solar Loan",
            "pros": ["Own the system", "Tax credits"],
            "cons": ["Needs credit", "Maintenance"],
            "bestFor": "Families planning to stay"
        }
    ])
    .to_string();
    let financing_mock = server.mock(|when, then| {
        when.method(POST)
            .path(TEXT_PATH)
            .body_contains("three distinct solar financing scenarios");
        then.status(200).json_body(text_response(&financing_json));
    });

    let faq_json = serde_json::json!([
        { "question": "Will it pay off?", "answer": "Usually within a decade." }
    ])
    .to_string();
    let faq_mock = server.mock(|when, then| {
        when.method(POST)
            .path(TEXT_PATH)
            .body_contains("concise FAQ with 3 questions");
        then.status(200).json_body(text_response(&faq_json));
    });

    let mut presenter = presenter_for(&server);
    assert!(presenter.api_key_available());

    presenter.select_persona_by_id("budget_family").await.unwrap();
    assert!(presenter.generate_faq().await);

    benefits_mock.assert();
    image_mock.assert();
    financing_mock.assert();
    faq_mock.assert();

    let presentation = presenter.presentation();
    assert_eq!(
        presentation.benefits,
        "Solar keeps your family budget predictable."
    );
    assert_eq!(presentation.image_url, "data:image/jpeg;base64,/9j/AAAA");
    assert_eq!(presentation.financing_scenarios.len(), 1);
    assert_eq!(
        presentation.financing_scenarios[0].best_for,
        "Families planning to stay"
    );
    assert_eq!(presentation.faq[0].question, "Will it pay off?");
    assert!(presenter.error().is_none());

    let view = render_view(&presenter);
    assert!(view.contains("AI Features: Active"));
    assert!(view.contains("| **Solar Loan** |"));
    assert!(view.contains("#### Will it pay off?"));
}

#[tokio::test]
async fn test_api_failures_fall_back_to_canned_content() {
    let server = MockServer::start();

    let text_mock = server.mock(|when, then| {
        when.method(POST).path(TEXT_PATH);
        then.status(500).json_body(serde_json::json!({
            "error": { "code": 500, "message": "internal", "status": "INTERNAL" }
        }));
    });
    let image_mock = server.mock(|when, then| {
        when.method(POST).path(IMAGE_PATH);
        then.status(503);
    });

    let mut presenter = presenter_for(&server);
    presenter.submit_custom_data("A retired couple").await;
    presenter.generate_faq().await;

    // benefits, financing and FAQ share the text endpoint
    text_mock.assert_hits(3);
    image_mock.assert_hits(1);

    let presentation = presenter.presentation();
    assert_eq!(presentation.benefits, FALLBACK_BENEFITS);
    assert_eq!(presentation.image_url, FALLBACK_IMAGE_URL);
    assert_eq!(presentation.financing_scenarios, fallback_financing_scenarios());
    assert_eq!(presentation.faq, fallback_faq());
    assert!(presenter.error().is_none());
}

#[tokio::test]
async fn test_malformed_structured_output_falls_back() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path(TEXT_PATH)
            .body_contains("financing scenarios");
        then.status(200)
            .json_body(text_response("Here are some options: loans and leases."));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(TEXT_PATH)
            .body_contains("primary benefits");
        then.status(200).json_body(text_response("Great benefits."));
    });
    server.mock(|when, then| {
        when.method(POST).path(IMAGE_PATH);
        then.status(200)
            .json_body(serde_json::json!({ "predictions": [] }));
    });

    let mut presenter = presenter_for(&server);
    presenter.select_persona_by_id("tech_enthusiast").await.unwrap();

    let presentation = presenter.presentation();
    assert_eq!(presentation.benefits, "Great benefits.");
    assert_eq!(presentation.image_url, FALLBACK_IMAGE_URL);
    assert_eq!(presentation.financing_scenarios, fallback_financing_scenarios());
}

#[tokio::test]
async fn test_no_key_never_calls_the_api() {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let config = AppConfig {
        base_url: server.url("/v1beta"),
        ..AppConfig::default()
    };
    let mut presenter =
        Presenter::new(ContentService::from_config(&config)).with_env_api_key(None);
    presenter.set_user_api_key("");

    presenter.select_persona_by_id("eco_warrior").await.unwrap();
    presenter.generate_faq().await;

    any_mock.assert_hits(0);
    assert!(!presenter.api_key_available());
    assert_eq!(presenter.presentation().benefits, FALLBACK_BENEFITS);
    assert_eq!(presenter.presentation().faq, fallback_faq());
    assert!(render_view(&presenter).contains("AI Features: Disabled (Using Fallbacks)"));
}

#[tokio::test]
async fn test_generate_and_export_zip_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TEXT_PATH).body_contains("primary benefits");
        then.status(200).json_body(text_response("Energy independence."));
    });
    server.mock(|when, then| {
        when.method(POST).path(IMAGE_PATH);
        then.status(200).json_body(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=" }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path(TEXT_PATH).body_contains("financing scenarios");
        then.status(500);
    });

    let mut presenter = presenter_for(&server);
    presenter.select_persona_by_id("eco_warrior").await.unwrap();

    let exporter = PresentationExporter::new(LocalStorage::new(output_path.clone()), true);
    let location = exporter.export(presenter.presentation()).await.unwrap();
    assert!(location.ends_with("presentation.zip"));

    let full_path = std::path::Path::new(&output_path).join("presentation.zip");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 4);

    let image_bytes = {
        let mut image = archive.by_name("lifestyle.jpg").unwrap();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut image, &mut bytes).unwrap();
        bytes
    };
    assert_eq!(image_bytes, b"hello");

    let mut markdown_file = archive.by_name("presentation.md").unwrap();
    let mut markdown = String::new();
    std::io::Read::read_to_string(&mut markdown_file, &mut markdown).unwrap();
    assert!(markdown.contains("**Customer:** Eco-Warrior"));
    assert!(markdown.contains("Energy independence."));
    assert!(markdown.contains("(lifestyle.jpg)"));
    assert!(markdown.contains("| **Lease / PPA** |"));
}

#[tokio::test]
async fn test_export_loose_files_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("decks").to_str().unwrap().to_string();

    let mut presenter = Presenter::new(ContentService::default()).with_env_api_key(None);
    presenter.set_user_api_key("");
    presenter.submit_custom_data("Owner of a small dairy farm").await;

    let exporter = PresentationExporter::new(LocalStorage::new(output_path.clone()), false);
    let location = exporter.export(presenter.presentation()).await.unwrap();

    let base = std::path::Path::new(&output_path);
    assert_eq!(location, base.join("presentation.md").display().to_string());
    assert!(base.join("presentation.json").exists());
    assert!(base.join("financing.csv").exists());
    assert!(!base.join("lifestyle.jpg").exists());

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(base.join("presentation.json")).unwrap()).unwrap();
    assert_eq!(json["source"]["kind"], "custom");
    assert_eq!(json["source"]["value"], "Owner of a small dairy farm");
    assert_eq!(json["image_url"], FALLBACK_IMAGE_URL);
}

#[tokio::test]
async fn test_invalid_image_bytes_fall_back_and_export_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TEXT_PATH).body_contains("primary benefits");
        then.status(200).json_body(text_response("Lower bills."));
    });
    let image_mock = server.mock(|when, then| {
        when.method(POST).path(IMAGE_PATH);
        then.status(200).json_body(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "not base64 @@@" }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path(TEXT_PATH).body_contains("financing scenarios");
        then.status(500);
    });

    let mut presenter = presenter_for(&server);
    presenter.select_persona_by_id("eco_warrior").await.unwrap();

    image_mock.assert();
    assert_eq!(presenter.presentation().image_url, FALLBACK_IMAGE_URL);
    assert!(presenter.error().is_none());

    let exporter = PresentationExporter::new(LocalStorage::new(output_path.clone()), false);
    assert!(exporter.export(presenter.presentation()).await.is_ok());
    assert!(!std::path::Path::new(&output_path).join("lifestyle.jpg").exists());
}
