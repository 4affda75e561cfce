use super::*;

fn config(audience: Option<&str>) -> IdentityConfig {
    IdentityConfig {
        domain: "tenant.auth0.com".to_owned(),
        client_id: "abc".to_owned(),
        audience: audience.map(str::to_owned),
    }
}

// =============================================================
// Redirect URLs
// =============================================================

#[test]
fn login_url_encodes_redirect_and_scope() {
    let url = login_url(&config(None), "http://localhost:3000").unwrap();
    assert_eq!(
        url,
        "https://tenant.auth0.com/authorize?response_type=token&client_id=abc\
         &redirect_uri=http%3A%2F%2Flocalhost%3A3000&scope=openid+profile+email"
    );
}

#[test]
fn login_url_includes_audience_when_configured() {
    let url = login_url(&config(Some("https://inventory.api")), "http://localhost:3000").unwrap();
    assert!(url.ends_with("&audience=https%3A%2F%2Finventory.api"));
}

#[test]
fn logout_url_returns_to_origin() {
    let url = logout_url(&config(None), "http://localhost:3000").unwrap();
    assert_eq!(url, "https://tenant.auth0.com/v2/logout?client_id=abc&returnTo=http%3A%2F%2Flocalhost%3A3000");
}

#[test]
fn provider_url_rejects_bad_domain() {
    let mut cfg = config(None);
    cfg.domain = "bad host".to_owned();
    assert!(matches!(login_url(&cfg, "http://localhost"), Err(IdentityError::InvalidUrl(_))));
}

// =============================================================
// Redirect fragments
// =============================================================

#[test]
fn redirect_fragment_detection() {
    assert!(is_redirect_fragment("#access_token=t&expires_in=60"));
    assert!(is_redirect_fragment("#error=access_denied"));
    assert!(!is_redirect_fragment("#section-2"));
    assert!(!is_redirect_fragment(""));
}

#[test]
fn parse_fragment_extracts_token_and_expiry() {
    let token = parse_redirect_fragment("#access_token=abc.def&token_type=Bearer&expires_in=60", 1_000)
        .unwrap()
        .unwrap();
    assert_eq!(token.access_token, "abc.def");
    assert_eq!(token.expires_at_ms, 61_000);
}

#[test]
fn parse_fragment_defaults_lifetime() {
    let token = parse_redirect_fragment("access_token=t", 0).unwrap().unwrap();
    assert_eq!(token.expires_at_ms, DEFAULT_TOKEN_LIFETIME_SECS * 1000);
}

#[test]
fn parse_fragment_without_token_is_none() {
    assert_eq!(parse_redirect_fragment("#state=xyz", 0), Ok(None));
    assert_eq!(parse_redirect_fragment("#access_token=", 0), Ok(None));
}

#[test]
fn parse_fragment_reports_provider_error() {
    let err = parse_redirect_fragment("#error=access_denied&error_description=User+cancelled", 0).unwrap_err();
    assert_eq!(err, IdentityError::Denied("User cancelled".to_owned()));
}

// =============================================================
// Token freshness
// =============================================================

#[test]
fn token_freshness_applies_skew() {
    let token = StoredToken { access_token: "t".to_owned(), expires_at_ms: 100_000 };
    assert!(token.is_fresh(0));
    assert!(token.is_fresh(100_000 - EXPIRY_SKEW_MS - 1));
    assert!(!token.is_fresh(100_000 - EXPIRY_SKEW_MS));
    assert!(!token.is_fresh(200_000));
}

#[test]
fn provider_status_constructors() {
    assert!(ProviderStatus::pending().is_loading);
    assert!(!ProviderStatus::signed_out().is_authenticated);
    let user = IdentityUser { sub: "auth0|1".to_owned(), name: None, email: None };
    let status = ProviderStatus::signed_in(user.clone());
    assert!(status.is_authenticated);
    assert_eq!(status.user, Some(user));
}
