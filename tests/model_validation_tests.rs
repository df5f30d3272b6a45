use quiz_portal::models::{
    AccessRequirement, NavigationDecision, NavigationOutcome, Role, RouteParams, SessionState,
    UnknownRole, ViewId,
};

#[test]
fn test_role_parsing_is_exact() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!("user".parse::<Role>(), Ok(Role::User));
    assert_eq!(
        "Admin".parse::<Role>(),
        Err(UnknownRole("Admin".to_string()))
    );
    assert_eq!(Role::Admin.to_string(), "admin");
}

#[test]
fn test_access_requirement_strictness_order() {
    assert!(AccessRequirement::Public < AccessRequirement::RequiresAuth);
    assert!(AccessRequirement::RequiresAuth < AccessRequirement::RequiresAuthAndAdmin);
    assert_eq!(AccessRequirement::default(), AccessRequirement::Public);
}

#[test]
fn test_session_admin_requires_token() {
    let role_only = SessionState {
        auth_token: None,
        role: Some(Role::Admin),
    };
    assert!(!role_only.is_admin());
    assert!(SessionState::authenticated("t", Some(Role::Admin)).is_admin());
    assert!(!SessionState::authenticated("t", None).is_admin());
}

#[test]
fn test_navigation_outcome_json_shape() {
    let proceed = serde_json::to_value(NavigationOutcome::Proceed).unwrap();
    assert_eq!(proceed, serde_json::json!({ "kind": "proceed" }));

    let redirect = serde_json::to_value(NavigationOutcome::redirect("/login")).unwrap();
    assert_eq!(redirect, serde_json::json!({ "kind": "redirect", "to": "/login" }));
}

#[test]
fn test_navigation_decision_json_uses_component_names() {
    let mut params = RouteParams::new();
    params.insert("quizId".to_string(), "42".to_string());

    let decision = NavigationDecision {
        path: "/quiz/42".to_string(),
        view: Some(ViewId::QuizAttempt),
        params,
        outcome: NavigationOutcome::Proceed,
    };

    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["view"], "QuizAttempt");
    assert_eq!(json["params"]["quizId"], "42");
    assert_eq!(
        serde_json::to_value(AccessRequirement::RequiresAuthAndAdmin).unwrap(),
        "requires_auth_and_admin"
    );
}

#[test]
fn test_component_names_match_display() {
    for view in [ViewId::Login, ViewId::AdminQuestions, ViewId::UserHistory] {
        assert_eq!(view.to_string(), view.component_name());
    }
}
