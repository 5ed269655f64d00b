#[cfg(test)]
mod test {

    use std::time::Duration;

    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use http::StatusCode;
    use serde_json::json;

    use crate::config::settings::RenewalMode;
    use crate::error::AuthError;
    use crate::identity::authenticator::TokenAuthenticator;
    use crate::identity::transport::IdentityResponse;
    use crate::tests::common::{
        credentials, make_headers, settings, status_response, swift_catalog, token_response, ScriptedTransport,
    };
    use crate::utils::channel::AuthEvent;

    // The first call issues twice: tok-0 is short lived, tok-1 replaces it and
    // stays cached even though it is short lived too.
    fn short_lived_pair(now: chrono::DateTime<Utc>) -> Vec<Result<IdentityResponse, String>> {
        vec![
            token_response("tok-0", now + ChronoDuration::seconds(5), swift_catalog()),
            token_response("tok-1", now + ChronoDuration::seconds(5), swift_catalog()),
        ]
    }

    #[tokio::test]
    async fn catalog_failure_keeps_previous_token() {
        let now = Utc::now();
        let cinder_only = json!([{"name": "cinder", "endpoints": [{"interface": "public", "region": "RegionOne", "url": "https://cinder.example/v3"}]}]);
        let mut script = short_lived_pair(now);
        script.push(token_response("tok-2", now + ChronoDuration::hours(1), cinder_only));
        script.push(token_response("tok-3", now + ChronoDuration::hours(1), swift_catalog()));
        let authenticator = TokenAuthenticator::with_transport(
            credentials("https://keystone.example/v3", None),
            &settings(RenewalMode::Concurrent),
            ScriptedTransport::new(script),
        );

        assert_eq!(authenticator.authenticate().await.unwrap().token, "tok-1");

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::CatalogResolution { .. }));
        assert_eq!(authenticator.current_token().await.unwrap().value, "tok-1");

        assert_eq!(authenticator.authenticate().await.unwrap().token, "tok-3");
        assert_eq!(authenticator.transport().calls(), 4);
    }

    #[tokio::test]
    async fn transport_failure_keeps_previous_token() {
        let now = Utc::now();
        let mut script = short_lived_pair(now);
        script.push(Err("connection refused".to_string()));
        script.push(token_response("tok-2", now + ChronoDuration::hours(1), swift_catalog()));
        let authenticator = TokenAuthenticator::with_transport(
            credentials("https://keystone.example/v3", None),
            &settings(RenewalMode::Concurrent),
            ScriptedTransport::new(script),
        );

        assert_eq!(authenticator.authenticate().await.unwrap().token, "tok-1");
        assert_eq!(authenticator.transport().calls(), 2);

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));
        assert_eq!(authenticator.current_token().await.unwrap().value, "tok-1");
        assert_eq!(authenticator.transport().calls(), 3);

        assert_eq!(authenticator.authenticate().await.unwrap().token, "tok-2");
        assert_eq!(authenticator.current_token().await.unwrap().value, "tok-2");
        assert_eq!(authenticator.transport().calls(), 4);
    }

    #[tokio::test]
    async fn failed_reissue_of_short_lived_token_fails_the_call() {
        let now = Utc::now();
        let transport = ScriptedTransport::new(vec![
            token_response("tok-0", now + ChronoDuration::seconds(5), swift_catalog()),
            Err("connection refused".to_string()),
        ]);
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));
        assert_eq!(authenticator.current_token().await.unwrap().value, "tok-0");
    }

    #[tokio::test]
    async fn transport_failure_on_empty_cache_caches_nothing() {
        let far_future = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
        let transport = ScriptedTransport::new(vec![
            Err("connection refused".to_string()),
            token_response("tok-1", far_future, swift_catalog()),
        ]);
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));
        assert!(authenticator.current_token().await.is_none());

        assert_eq!(authenticator.authenticate().await.unwrap().token, "tok-1");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let transport = ScriptedTransport::new(vec![status_response(StatusCode::UNAUTHORIZED)]);
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);
        let mut events = authenticator.subscribe();

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::HttpStatus { status } if status == StatusCode::UNAUTHORIZED));
        assert!(authenticator.current_token().await.is_none());
        assert_eq!(events.try_recv().unwrap(), AuthEvent::IssueFailed { reason: "http_status" });
    }

    #[tokio::test]
    async fn missing_subject_token_is_malformed() {
        let transport = ScriptedTransport::new(vec![Ok(IdentityResponse {
            status: StatusCode::CREATED,
            headers: make_headers(&[("content-type", "application/json")]),
            body: json!({"token": {"catalog": swift_catalog(), "expires_at": "2099-01-01T00:00:00Z"}}).to_string(),
        })]);
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);

        let err = authenticator.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedResponse(_)));
        assert!(authenticator.current_token().await.is_none());
    }

    #[tokio::test]
    async fn invalid_expiry_is_malformed() {
        let transport = ScriptedTransport::new(vec![Ok(IdentityResponse {
            status: StatusCode::CREATED,
            headers: make_headers(&[("x-subject-token", "tok123")]),
            body: json!({"expires_at": "tomorrow", "token": {"catalog": swift_catalog()}}).to_string(),
        })]);
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);

        assert!(matches!(
            authenticator.authenticate().await,
            Err(AuthError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn slow_exchange_times_out_without_caching() {
        let far_future = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
        let transport = ScriptedTransport::new(vec![token_response("tok-1", far_future, swift_catalog())])
            .with_delay(Duration::from_millis(500));
        let authenticator =
            TokenAuthenticator::with_transport(credentials("https://keystone.example/v3", None), &settings(RenewalMode::Concurrent), transport);

        let err = authenticator.authenticate_within(Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, AuthError::Timeout(timeout) if timeout == Duration::from_millis(50)));
        assert!(authenticator.current_token().await.is_none());

        assert_eq!(authenticator.authenticate_within(Duration::from_secs(5)).await.unwrap().token, "tok-1");
    }
}
