//! User Portal WASM Module
//!
//! Browser-side session management: decoding the stored token for UI
//! state and driving page redirects. The decode here never checks the
//! signature; it is display-only and lives in this crate so it cannot
//! be mistaken for the server's verification path. The server
//! re-verifies every token on every protected request.
//!
//! None of these functions touch storage: reading an expired token
//! yields `Anonymous` but the stored copy stays until an explicit
//! logout removes it. The page glue calls [`redirect_target`] on load
//! and again on storage events, which makes token removal in another
//! tab behave exactly like a local logout.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use user_portal_shared::validation;
use user_portal_shared::{Claims, Role, SignUpRequest};
use wasm_bindgen::prelude::*;

/// Where anonymous visitors are sent.
pub const SIGN_IN_PAGE: &str = "/signin.html";
/// Role-dependent dashboards.
pub const USER_DASHBOARD: &str = "/user-dashboard.html";
pub const ADMIN_DASHBOARD: &str = "/admin-dashboard.html";

/// Client-side session state, derived solely from the stored token.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    User,
    Admin,
}

/// Which audience a page expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAudience {
    /// Sign-in / sign-up pages and the landing page.
    Auth,
    /// Everything else requires an authenticated session.
    Dashboard,
}

/// Decode the payload segment of a token without verifying anything.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Derive the session state from the stored token at `now` (Unix
/// seconds). Absent, undecodable and expired tokens all read as
/// anonymous.
pub fn session_state(token: Option<&str>, now: i64) -> SessionState {
    let Some(token) = token else {
        return SessionState::Anonymous;
    };
    let Some(claims) = decode_claims(token) else {
        return SessionState::Anonymous;
    };
    if claims.is_expired_at(now) {
        return SessionState::Anonymous;
    }
    if claims.has_role(Role::Admin) {
        SessionState::Admin
    } else {
        SessionState::User
    }
}

/// Classify a path by the audience it expects.
pub fn page_audience(path: &str) -> PageAudience {
    if path.contains("signin") || path.contains("signup") || path == "/" {
        PageAudience::Auth
    } else {
        PageAudience::Dashboard
    }
}

/// Reconcile session state against the current page.
///
/// Returns the path to redirect to, or `None` when the state matches
/// the page's audience.
pub fn reconcile(state: SessionState, path: &str) -> Option<&'static str> {
    match (state, page_audience(path)) {
        (SessionState::Anonymous, PageAudience::Dashboard) => Some(SIGN_IN_PAGE),
        (SessionState::Anonymous, PageAudience::Auth) => None,
        (SessionState::User, PageAudience::Auth) => Some(USER_DASHBOARD),
        (SessionState::Admin, PageAudience::Auth) => Some(ADMIN_DASHBOARD),
        (_, PageAudience::Dashboard) => None,
    }
}

// --- wasm-bindgen exports -------------------------------------------------

/// Session state for the stored token (or no token) at `now_secs`.
#[wasm_bindgen]
pub fn current_session_state(token: Option<String>, now_secs: f64) -> SessionState {
    session_state(token.as_deref(), now_secs as i64)
}

/// Whether the stored token reads as a live session.
#[wasm_bindgen]
pub fn is_authenticated(token: Option<String>, now_secs: f64) -> bool {
    session_state(token.as_deref(), now_secs as i64) != SessionState::Anonymous
}

/// Whether the stored token reads as an admin session.
#[wasm_bindgen]
pub fn is_admin(token: Option<String>, now_secs: f64) -> bool {
    session_state(token.as_deref(), now_secs as i64) == SessionState::Admin
}

/// Token payload as a JSON string, for profile display only.
#[wasm_bindgen]
pub fn decode_payload(token: &str) -> Option<String> {
    decode_claims(token).and_then(|claims| serde_json::to_string(&claims).ok())
}

/// Redirect target for the current page, if state and audience mismatch.
#[wasm_bindgen]
pub fn redirect_target(token: Option<String>, now_secs: f64, path: &str) -> Option<String> {
    let state = session_state(token.as_deref(), now_secs as i64);
    reconcile(state, path).map(str::to_string)
}

/// Run the shared sign-up validation in the browser.
///
/// Takes the form fields as a JSON object and today's date as
/// "YYYY-MM-DD"; returns a JSON array of `{field, message}` objects,
/// empty when the form is valid. Same code the server runs, so the two
/// can never disagree.
#[wasm_bindgen]
pub fn sign_up_errors(form_json: &str, today: &str) -> String {
    let Ok(req) = serde_json::from_str::<SignUpRequest>(form_json) else {
        return r#"[{"field":"form","message":"Formulario inválido"}]"#.to_string();
    };
    let Ok(today) = NaiveDate::parse_from_str(today, "%Y-%m-%d") else {
        return r#"[{"field":"form","message":"Formulario inválido"}]"#.to_string();
    };

    match validation::validate_sign_up(&req, today) {
        Ok(_) => "[]".to_string(),
        Err(errors) => serde_json::to_string(&errors).unwrap_or_else(|_| "[]".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_portal_shared::Claims;

    /// Build an unsigned token with the given claims; the decoder only
    /// looks at the middle segment.
    fn fake_token(claims: &Claims) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        format!("{header}.{payload}.signature")
    }

    fn claims(roles: &[&str], exp: i64) -> Claims {
        Claims {
            sub: "00000000-0000-0000-0000-000000000001".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_decode_claims_round_trip() {
        let token = fake_token(&claims(&["user"], 1000));
        let decoded = decode_claims(&token).unwrap();
        assert_eq!(decoded.roles, vec!["user"]);
        assert_eq!(decoded.exp, 1000);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("one-segment").is_none());
        assert!(decode_claims("a.%%%.c").is_none());
    }

    #[test]
    fn test_no_token_is_anonymous() {
        assert_eq!(session_state(None, 0), SessionState::Anonymous);
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        let token = fake_token(&claims(&["user"], 1000));
        assert_eq!(session_state(Some(&token), 999), SessionState::User);
        // Expired from the exact expiry instant
        assert_eq!(session_state(Some(&token), 1000), SessionState::Anonymous);
    }

    #[test]
    fn test_role_dependent_state() {
        let user = fake_token(&claims(&["user"], 1000));
        let admin = fake_token(&claims(&["user", "admin"], 1000));
        assert_eq!(session_state(Some(&user), 0), SessionState::User);
        assert_eq!(session_state(Some(&admin), 0), SessionState::Admin);
    }

    #[test]
    fn test_page_audience() {
        assert_eq!(page_audience("/signin.html"), PageAudience::Auth);
        assert_eq!(page_audience("/signup.html"), PageAudience::Auth);
        assert_eq!(page_audience("/"), PageAudience::Auth);
        assert_eq!(page_audience("/user-dashboard.html"), PageAudience::Dashboard);
        assert_eq!(page_audience("/admin-dashboard.html"), PageAudience::Dashboard);
    }

    #[test]
    fn test_anonymous_on_dashboard_redirects_to_sign_in() {
        assert_eq!(
            reconcile(SessionState::Anonymous, "/user-dashboard.html"),
            Some(SIGN_IN_PAGE)
        );
        assert_eq!(reconcile(SessionState::Anonymous, "/signin.html"), None);
    }

    #[test]
    fn test_authenticated_on_auth_page_goes_to_dashboard() {
        assert_eq!(reconcile(SessionState::User, "/"), Some(USER_DASHBOARD));
        assert_eq!(
            reconcile(SessionState::Admin, "/signin.html"),
            Some(ADMIN_DASHBOARD)
        );
        assert_eq!(reconcile(SessionState::User, "/user-dashboard.html"), None);
    }

    #[test]
    fn test_expired_token_on_dashboard_redirects_without_mutating() {
        // The caller holds the token string; nothing here can remove it.
        let token = fake_token(&claims(&["user"], 10));
        let target = reconcile(session_state(Some(&token), 100), "/user-dashboard.html");
        assert_eq!(target, Some(SIGN_IN_PAGE));
        // The token value is untouched and still decodes
        assert!(decode_claims(&token).is_some());
    }

    #[test]
    fn test_sign_up_errors_surface_shared_validation() {
        let form = r#"{"email":"bad","password":"short"}"#;
        let errors: Vec<serde_json::Value> =
            serde_json::from_str(&sign_up_errors(form, "2026-08-31")).unwrap();
        assert!(errors.iter().any(|e| e["field"] == "email"));
        assert!(errors.iter().any(|e| e["field"] == "password"));

        let valid = r#"{
            "email":"a@b.com","password":"Abcdef1#","name":"A","lastName":"B",
            "phoneNumber":"+51987654321","birthdate":"2000-01-01"
        }"#;
        assert_eq!(sign_up_errors(valid, "2026-08-31"), "[]");
    }
}
