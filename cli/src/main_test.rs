use super::*;
use chatpad::auth::{AuthError, FieldError};

#[test]
fn auth_failure_renders_user_message() {
    let err = CliError::Session(SessionError::Auth(AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");

    let err = CliError::Session(SessionError::Auth(AuthError::DuplicateEmail));
    assert_eq!(err.to_string(), "An account with this email already exists");
}

#[test]
fn field_errors_render_inline_with_labels() {
    let err = CliError::Session(SessionError::Invalid(vec![
        FieldError { field: Field::Name, message: "Name is required".to_owned() },
        FieldError { field: Field::ConfirmPassword, message: "Passwords do not match".to_owned() },
    ]));
    let text = err.to_string();
    assert_eq!(text, "Name: Name is required; Confirm password: Passwords do not match");
    assert!(!text.contains("FieldError"));
}

#[test]
fn not_logged_in_points_at_login() {
    assert_eq!(CliError::NotLoggedIn.to_string(), "not logged in; run `chatpad login` first");
}
