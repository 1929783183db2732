mod common;

use chrono::Duration;

use rust_course_system::errors::CourseSystemError;
use rust_course_system::models::locations;
use rust_course_system::models::submissions::entities::{SubmissionStatus, SubmitMode};
use rust_course_system::models::submissions::requests::{GradeRequest, SubmitRequest};
use rust_course_system::services::submissions::{detail, grade, list, submit};
use rust_course_system::storage::Storage;

fn final_submit(content: &str) -> SubmitRequest {
    SubmitRequest {
        content: content.to_string(),
        mode: SubmitMode::Final,
    }
}

fn marks(value: f64) -> GradeRequest {
    GradeRequest {
        marks: Some(value),
        feedback: "Well done".to_string(),
    }
}

#[tokio::test]
async fn draft_then_final_then_resubmit() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;

    let draft = submit::submit(
        storage.as_ref(),
        &student,
        assignment.id,
        SubmitRequest {
            content: "first draft".into(),
            mode: SubmitMode::Draft,
        },
    )
    .await
    .unwrap();
    assert_eq!(draft.data.status, SubmissionStatus::Draft);
    assert_eq!(
        draft.redirect.location,
        locations::assignment_detail(assignment.id)
    );

    let submitted = submit::submit(storage.as_ref(), &student, assignment.id, final_submit("final"))
        .await
        .unwrap();
    assert_eq!(submitted.data.id, draft.data.id);
    assert_eq!(submitted.data.status, SubmissionStatus::Submitted);
    assert_eq!(submitted.redirect.location, locations::MY_SUBMISSIONS);

    // 已提交后再以草稿方式保存，状态仍为 submitted
    let resubmitted = submit::submit(
        storage.as_ref(),
        &student,
        assignment.id,
        SubmitRequest {
            content: "final v2".into(),
            mode: SubmitMode::Draft,
        },
    )
    .await
    .unwrap();
    assert_eq!(resubmitted.data.id, draft.data.id);
    assert_eq!(resubmitted.data.status, SubmissionStatus::Submitted);
    assert_eq!(resubmitted.data.content, "final v2");
    assert!(resubmitted.data.submitted_at >= submitted.data.submitted_at);
}

#[tokio::test]
async fn only_students_submit() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;

    let err = submit::submit(storage.as_ref(), &owner, assignment.id, final_submit("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
    assert_eq!(
        err.redirect_location().as_deref(),
        Some(locations::ASSIGNMENT_LIST)
    );
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;

    let err = submit::submit(storage.as_ref(), &student, assignment.id, final_submit("   "))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("content: "));
    assert!(
        storage
            .get_submission(assignment.id, student.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn grading_above_total_marks_is_rejected() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    common::enroll(storage.as_ref(), &student, &course).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    let submission = submit::submit(storage.as_ref(), &student, assignment.id, final_submit("x"))
        .await
        .unwrap()
        .data;

    let err = grade::grade(storage.as_ref(), &owner, submission.id, marks(150.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));
    assert!(err.message().contains("Marks cannot exceed total marks (100)"));

    let err = grade::grade(
        storage.as_ref(),
        &owner,
        submission.id,
        GradeRequest {
            marks: None,
            feedback: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.message().starts_with("marks: "));

    let unchanged = storage.get_submission_by_id(submission.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, SubmissionStatus::Submitted);
    assert!(unchanged.marks.is_none());
}

#[tokio::test]
async fn grading_stamps_grader_and_time() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    let submission = submit::submit(storage.as_ref(), &student, assignment.id, final_submit("x"))
        .await
        .unwrap()
        .data;

    let graded = grade::grade(storage.as_ref(), &owner, submission.id, marks(85.0))
        .await
        .unwrap();
    assert_eq!(graded.data.status, SubmissionStatus::Graded);
    assert_eq!(graded.data.marks, Some(85.0));
    assert_eq!(graded.data.graded_by, Some(owner.id));
    assert!(graded.data.graded_at.is_some());
    assert_eq!(
        graded.redirect.location,
        locations::submission_detail(submission.id)
    );

    // 重新评分覆盖分数
    let regraded = grade::grade(storage.as_ref(), &owner, submission.id, marks(90.0))
        .await
        .unwrap();
    assert_eq!(regraded.data.marks, Some(90.0));

    // 已评分的提交不能再修改
    let err = submit::submit(storage.as_ref(), &student, assignment.id, final_submit("late fix"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));

    let view = detail::submission_detail(storage.as_ref(), &student, submission.id)
        .await
        .unwrap();
    assert_eq!(view.score_percentage, "90");
    assert_eq!(view.graded_by.map(|g| g.id), Some(owner.id));
}

#[tokio::test]
async fn drafts_cannot_be_graded_and_others_cannot_grade() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let admin = common::admin(storage.as_ref()).await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    let draft = submit::submit(
        storage.as_ref(),
        &student,
        assignment.id,
        SubmitRequest {
            content: "wip".into(),
            mode: SubmitMode::Draft,
        },
    )
    .await
    .unwrap()
    .data;

    let err = grade::grade(storage.as_ref(), &owner, draft.id, marks(50.0))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("status: "));

    for principal in [&other, &admin, &student] {
        let err = grade::grade(storage.as_ref(), principal, draft.id, marks(50.0))
            .await
            .unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(locations::submission_detail(draft.id))
        );
    }
}

#[tokio::test]
async fn submission_detail_is_visible_to_owner_and_lecturer_only() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let bob = common::student(storage.as_ref(), "bob").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    let submission = submit::submit(storage.as_ref(), &ada, assignment.id, final_submit("x"))
        .await
        .unwrap()
        .data;

    for principal in [&ada, &owner] {
        let view = detail::submission_detail(storage.as_ref(), principal, submission.id)
            .await
            .unwrap();
        assert_eq!(view.student.id, ada.id);
        assert_eq!(view.course.id, course.id);
        assert!(!view.is_late);
        assert_eq!(view.score_percentage, "");
    }

    for principal in [&bob, &other] {
        let err = detail::submission_detail(storage.as_ref(), principal, submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
    }
}

#[tokio::test]
async fn late_submissions_are_flagged() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let overdue =
        common::assignment(storage.as_ref(), &course, "Overdue", 10.0, -Duration::days(1)).await;

    submit::submit(storage.as_ref(), &student, overdue.id, final_submit("sorry"))
        .await
        .unwrap();

    let mine = list::my_submissions(storage.as_ref(), &student).await.unwrap();
    assert_eq!(mine.items.len(), 1);
    assert!(mine.items[0].is_late);
}

#[tokio::test]
async fn my_and_pending_lists() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let bob = common::student(storage.as_ref(), "bob").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let foreign = common::course(storage.as_ref(), "CS201", &other).await;
    let essay =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    let lab = common::assignment(storage.as_ref(), &course, "Lab", 20.0, Duration::days(4)).await;
    let elsewhere =
        common::assignment(storage.as_ref(), &foreign, "Other", 20.0, Duration::days(4)).await;

    submit::submit(storage.as_ref(), &ada, essay.id, final_submit("a")).await.unwrap();
    let graded = submit::submit(storage.as_ref(), &bob, essay.id, final_submit("b"))
        .await
        .unwrap()
        .data;
    submit::submit(
        storage.as_ref(),
        &ada,
        lab.id,
        SubmitRequest {
            content: "draft".into(),
            mode: SubmitMode::Draft,
        },
    )
    .await
    .unwrap();
    submit::submit(storage.as_ref(), &ada, elsewhere.id, final_submit("c"))
        .await
        .unwrap();
    grade::grade(storage.as_ref(), &owner, graded.id, marks(70.0))
        .await
        .unwrap();

    let mine = list::my_submissions(storage.as_ref(), &ada).await.unwrap();
    assert_eq!(mine.items.len(), 3);
    assert!(mine.items.iter().all(|item| item.student.id == ada.id));

    let pending = list::pending_submissions(storage.as_ref(), &owner).await.unwrap();
    assert_eq!(pending.items.len(), 1);
    assert_eq!(pending.items[0].assignment_title, "Essay");
    assert_eq!(pending.items[0].student.id, ada.id);

    let err = list::pending_submissions(storage.as_ref(), &ada).await.unwrap_err();
    assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
    let err = list::my_submissions(storage.as_ref(), &owner).await.unwrap_err();
    assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
}
