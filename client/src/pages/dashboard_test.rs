use super::*;
use crate::net::types::{Profile, Role};

fn client() -> ApiClient {
    ApiClient::new("http://api.test", "tok").expect("client")
}

fn staff_session() -> Session {
    Session {
        is_authenticated: true,
        profile: Some(Profile { id: 1, role: Role::Employee, nombre: None, email: None, activo: None }),
        client: Some(client()),
        ..Session::default()
    }
}

#[test]
fn loading_session_shows_placeholder() {
    let session = Session { loading: true, ..staff_session() };
    assert_eq!(dashboard_view(&session), DashboardView::Loading);
}

#[test]
fn resolved_session_is_ready_with_its_client() {
    assert_eq!(dashboard_view(&staff_session()), DashboardView::Ready(client()));
}

#[test]
fn missing_profile_is_unauthorized() {
    let session = Session { profile: None, ..staff_session() };
    assert_eq!(dashboard_view(&session), DashboardView::Unauthorized);
}

#[test]
fn missing_client_is_unauthorized() {
    let session = Session { client: None, ..staff_session() };
    assert_eq!(dashboard_view(&session), DashboardView::Unauthorized);
}

#[test]
fn signed_out_is_unauthorized() {
    assert_eq!(dashboard_view(&Session::default()), DashboardView::Unauthorized);
}

#[test]
fn error_message_names_the_failure() {
    let err = ApiError::Status { status: 403, endpoint: "http://api.test/productos".to_owned() };
    assert_eq!(
        products_error_message(&err),
        "No se pudieron cargar los productos: unexpected status 403 from http://api.test/productos"
    );
}
