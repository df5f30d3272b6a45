use crate::{
    guard::DASHBOARD_PATH,
    models::{AccessRequirement::RequiresAuth, ViewId},
    router::RouteRecord,
};

/// Authenticated Route Module
///
/// The quiz-taking side of the application. A session token is enough to enter;
/// none of these routes discriminates between roles, so admins may use them too.
pub fn authenticated_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::view(DASHBOARD_PATH, ViewId::Dashboard, RequiresAuth),
        RouteRecord::view("/subjects", ViewId::SubjectList, RequiresAuth),
        // Quizzes available for one subject.
        RouteRecord::view("/quizzes/:subjectId", ViewId::QuizList, RequiresAuth),
        // A single quiz attempt.
        RouteRecord::view("/quiz/:quizId", ViewId::QuizAttempt, RequiresAuth),
        RouteRecord::view("/profile", ViewId::UserProfile, RequiresAuth),
        RouteRecord::view("/history", ViewId::UserHistory, RequiresAuth),
    ]
}
