use crate::{
    models::{AccessRequirement::RequiresAuthAndAdmin, ViewId},
    router::RouteRecord,
};

/// Admin Route Module
///
/// The management section, authored as one tree under `/admin`. Children are
/// relative to the parent and resolve to the chain `[AdminDashboard, child]`;
/// the guard takes the strictest requirement along that chain.
pub fn admin_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::view("/admin", ViewId::AdminDashboard, RequiresAuthAndAdmin).with_children(vec![
            RouteRecord::view("subjects", ViewId::AdminSubjects, RequiresAuthAndAdmin),
            // Chapters of one subject.
            RouteRecord::view(
                "subjects/:subjectId/chapters",
                ViewId::AdminChapters,
                RequiresAuthAndAdmin,
            ),
            // Quizzes of one chapter.
            RouteRecord::view(
                "chapters/:chapterId/quizzes",
                ViewId::AdminQuizzes,
                RequiresAuthAndAdmin,
            ),
            // Questions of one quiz.
            RouteRecord::view(
                "quizzes/:quizId/questions",
                ViewId::AdminQuestions,
                RequiresAuthAndAdmin,
            ),
            RouteRecord::view("users", ViewId::AdminUsers, RequiresAuthAndAdmin),
        ]),
    ]
}
