use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Session Schemas ---

/// Role
///
/// The RBAC value persisted by the front-end next to the session token.
/// Only `Admin` unlocks the admin section; every other authenticated user is a `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// Returned when a persisted role string is neither `user` nor `admin`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

/// SessionState
///
/// A snapshot of the current user's session: the opaque bearer token and the role.
/// It is written only by the login/logout flow (outside this crate) and is passed
/// by value into the navigation guard, so token and role are always read together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Present iff the user is authenticated.
    pub auth_token: Option<String>,
    /// Meaningful only when `auth_token` is present.
    pub role: Option<Role>,
}

impl SessionState {
    /// An empty session, as created at application start.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            auth_token: Some(token.into()),
            role,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    /// An absent role on an authenticated session counts as "not admin".
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role == Some(Role::Admin)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }
}

// --- Route Schemas ---

/// AccessRequirement
///
/// The authorization level gating a route. Variants are declared from least to
/// most restrictive, so `Ord` gives the strictness order used to pick the
/// governing requirement of a matched chain.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AccessRequirement {
    #[default]
    Public,
    RequiresAuth,
    RequiresAuthAndAdmin,
}

/// ViewId
///
/// Identifies the view the rendering layer binds to a route. The serialized
/// form is the front-end component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum ViewId {
    Login,
    Register,
    Dashboard,
    SubjectList,
    QuizList,
    QuizAttempt,
    UserProfile,
    UserHistory,
    AdminDashboard,
    AdminSubjects,
    AdminChapters,
    AdminQuizzes,
    AdminQuestions,
    AdminUsers,
}

impl ViewId {
    pub fn component_name(self) -> &'static str {
        match self {
            ViewId::Login => "Login",
            ViewId::Register => "Register",
            ViewId::Dashboard => "Dashboard",
            ViewId::SubjectList => "SubjectList",
            ViewId::QuizList => "QuizList",
            ViewId::QuizAttempt => "QuizAttempt",
            ViewId::UserProfile => "UserProfile",
            ViewId::UserHistory => "UserHistory",
            ViewId::AdminDashboard => "AdminDashboard",
            ViewId::AdminSubjects => "AdminSubjects",
            ViewId::AdminChapters => "AdminChapters",
            ViewId::AdminQuizzes => "AdminQuizzes",
            ViewId::AdminQuestions => "AdminQuestions",
            ViewId::AdminUsers => "AdminUsers",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Named positional parameters extracted from a request path (e.g. `quizId -> "42"`).
pub type RouteParams = BTreeMap<String, String>;

// --- Navigation Schemas (Output) ---

/// NavigationOutcome
///
/// The guard's answer for a single navigation attempt.
/// Serialized as `{"kind":"proceed"}` or `{"kind":"redirect","to":"/login"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationOutcome {
    Proceed,
    Redirect { to: String },
}

impl NavigationOutcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        NavigationOutcome::Redirect { to: to.into() }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, NavigationOutcome::Proceed)
    }

    /// The redirect target, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Redirect { to } => Some(to),
            NavigationOutcome::Proceed => None,
        }
    }
}

/// NavigationDecision
///
/// The full result of a navigation attempt: the normalized route path, the view bound
/// to the innermost matched record, the extracted parameters and the outcome.
/// Parameters are kept even when the outcome is a redirect so a caller can resume
/// the original target after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationDecision {
    pub path: String,
    /// `None` for static redirect records such as `/`.
    pub view: Option<ViewId>,
    #[schema(value_type = Object)]
    pub params: RouteParams,
    #[schema(value_type = Object)]
    pub outcome: NavigationOutcome,
}

/// ErrorResponse
///
/// JSON body returned when a requested path matches no route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub path: String,
}

impl ErrorResponse {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            path: path.into(),
        }
    }
}
