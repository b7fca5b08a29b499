//! Reqwest-backed LanguageTool client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::GrammarCheck;
use crate::domain::ports::{GrammarChecker, GrammarCheckerError};

/// Grammar checker that relays requests to a LanguageTool server.
#[derive(Debug, Clone)]
pub struct LanguageToolChecker {
    client: Client,
    endpoint: Url,
}

impl LanguageToolChecker {
    /// Build a checker posting to `endpoint`, e.g.
    /// `https://api.languagetool.org/v2/check`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error when the client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn check(&self, request: &GrammarCheck) -> Result<Value, GrammarCheckerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[
                ("text", request.text()),
                ("language", request.language()),
                ("enabledOnly", "false"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GrammarCheckerError::status(status.as_u16()));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(body.as_ref())
            .map_err(|err| GrammarCheckerError::decode(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> GrammarCheckerError {
    if error.is_timeout() {
        return GrammarCheckerError::transport("request timed out");
    }
    GrammarCheckerError::transport(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CheckForm {
        text: String,
        language: String,
        enabled_only: String,
    }

    async fn echo_matches(form: web::Form<CheckForm>) -> HttpResponse {
        let form = form.into_inner();
        HttpResponse::Ok().json(json!({
            "language": { "code": form.language },
            "matches": [{ "message": form.text, "enabledOnly": form.enabled_only }]
        }))
    }

    async fn plain_text() -> HttpResponse {
        HttpResponse::Ok().body("not json")
    }

    async fn unavailable() -> HttpResponse {
        HttpResponse::ServiceUnavailable().finish()
    }

    async fn spawn_fake_languagetool() -> Url {
        let server = HttpServer::new(|| {
            App::new()
                .route("/v2/check", web::post().to(echo_matches))
                .route("/plain", web::post().to(plain_text))
                .route("/down", web::post().to(unavailable))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake server");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Url::parse(&format!("http://{addr}/")).expect("fake server url")
    }

    fn checker(base: &Url, path: &str) -> LanguageToolChecker {
        let endpoint = base.join(path).expect("endpoint");
        LanguageToolChecker::new(endpoint, Duration::from_secs(5)).expect("checker")
    }

    #[actix_web::test]
    async fn relays_form_fields_and_returns_body_verbatim() {
        let base = spawn_fake_languagetool().await;
        let request = GrammarCheck::try_new("Their is a typo.", Some("de-DE")).expect("valid");

        let body = checker(&base, "v2/check")
            .check(&request)
            .await
            .expect("check succeeds");

        assert_eq!(body["language"]["code"], "de-DE");
        assert_eq!(body["matches"][0]["message"], "Their is a typo.");
        assert_eq!(body["matches"][0]["enabledOnly"], "false");
    }

    #[actix_web::test]
    async fn non_success_status_is_reported() {
        let base = spawn_fake_languagetool().await;
        let request = GrammarCheck::try_new("text", None).expect("valid");

        let error = checker(&base, "down")
            .check(&request)
            .await
            .expect_err("upstream failure");
        assert_eq!(error, GrammarCheckerError::status(503_u16));
    }

    #[actix_web::test]
    async fn non_json_body_is_a_decode_error() {
        let base = spawn_fake_languagetool().await;
        let request = GrammarCheck::try_new("text", None).expect("valid");

        let error = checker(&base, "plain")
            .check(&request)
            .await
            .expect_err("not json");
        assert!(matches!(error, GrammarCheckerError::Decode { .. }));
    }

    #[rstest]
    #[case::languagetool_cloud("https://api.languagetool.org/v2/check")]
    #[case::self_hosted("http://localhost:8081/v2/check")]
    fn checker_keeps_configured_endpoint(#[case] raw: &str) {
        let endpoint = Url::parse(raw).expect("url");
        let checker =
            LanguageToolChecker::new(endpoint.clone(), Duration::from_secs(1)).expect("checker");
        assert_eq!(checker.endpoint, endpoint);
    }

    #[actix_web::test]
    async fn unreachable_service_is_a_transport_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/v2/check").expect("url");
        let checker =
            LanguageToolChecker::new(endpoint, Duration::from_millis(500)).expect("checker");
        let request = GrammarCheck::try_new("text", None).expect("valid");

        let error = checker.check(&request).await.expect_err("unreachable");
        assert!(matches!(error, GrammarCheckerError::Transport { .. }));
    }
}
