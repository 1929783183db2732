mod common;

use chrono::Duration;

use rust_course_system::errors::CourseSystemError;
use rust_course_system::models::locations;
use rust_course_system::models::submissions::entities::{SubmissionStatus, SubmitMode};
use rust_course_system::models::submissions::requests::{GradeRequest, SubmitRequest};
use rust_course_system::services::dashboard::{lecturer, student};
use rust_course_system::services::submissions::{grade, submit};

fn request(mode: SubmitMode) -> SubmitRequest {
    SubmitRequest {
        content: "answer".to_string(),
        mode,
    }
}

#[tokio::test]
async fn student_dashboard_lists_pending_assignments_soonest_first() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let other = common::course(storage.as_ref(), "CS201", &owner).await;
    common::enroll(storage.as_ref(), &ada, &course).await;

    let later = common::assignment(storage.as_ref(), &course, "Later", 10.0, Duration::days(5)).await;
    let sooner =
        common::assignment(storage.as_ref(), &course, "Sooner", 10.0, Duration::days(1)).await;
    let drafted =
        common::assignment(storage.as_ref(), &course, "Drafted", 10.0, Duration::days(2)).await;
    common::assignment(storage.as_ref(), &course, "Closed", 10.0, -Duration::days(1)).await;
    common::assignment(storage.as_ref(), &other, "Not enrolled", 10.0, Duration::days(1)).await;

    // 草稿也算已提交
    submit::submit(storage.as_ref(), &ada, drafted.id, request(SubmitMode::Draft))
        .await
        .unwrap();

    let dashboard = student::student_dashboard(storage.as_ref(), &ada).await.unwrap();
    assert_eq!(dashboard.enrollments.len(), 1);
    assert_eq!(dashboard.enrollments[0].course.course.id, course.id);

    let pending: Vec<i64> = dashboard
        .pending_assignments
        .iter()
        .map(|view| view.assignment.id)
        .collect();
    assert_eq!(pending, vec![sooner.id, later.id]);
    assert!(dashboard.pending_assignments.iter().all(|v| !v.is_past_due));

    assert_eq!(dashboard.recent_submissions.len(), 1);
    assert_eq!(dashboard.recent_submissions[0].assignment_title, "Drafted");
}

#[tokio::test]
async fn student_dashboard_recent_submissions_are_capped() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;

    for n in 0..7 {
        let assignment = common::assignment(
            storage.as_ref(),
            &course,
            &format!("Lab {n}"),
            10.0,
            Duration::days(3),
        )
        .await;
        submit::submit(storage.as_ref(), &ada, assignment.id, request(SubmitMode::Final))
            .await
            .unwrap();
    }

    let dashboard = student::student_dashboard(storage.as_ref(), &ada).await.unwrap();
    assert_eq!(dashboard.recent_submissions.len(), 5);
    assert_eq!(dashboard.recent_submissions[0].assignment_title, "Lab 6");
}

#[tokio::test]
async fn dashboards_are_role_restricted() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let admin = common::admin(storage.as_ref()).await;

    for principal in [&owner, &admin] {
        let err = student::student_dashboard(storage.as_ref(), principal)
            .await
            .unwrap_err();
        assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
        assert_eq!(err.redirect_location().as_deref(), Some(locations::HOME));
    }

    let err = lecturer::lecturer_dashboard(storage.as_ref(), &ada)
        .await
        .unwrap_err();
    assert_eq!(err.redirect_location().as_deref(), Some(locations::HOME));
}

#[tokio::test]
async fn lecturer_without_courses_sees_zero_totals() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;

    let dashboard = lecturer::lecturer_dashboard(storage.as_ref(), &owner)
        .await
        .unwrap();
    assert!(dashboard.courses.is_empty());
    assert!(dashboard.recent_submissions.is_empty());
    assert_eq!(dashboard.totals.total_courses, 0);
    assert_eq!(dashboard.totals.total_students, 0);
    assert_eq!(dashboard.totals.total_assignments, 0);
    assert_eq!(dashboard.totals.total_submissions, 0);
    assert_eq!(dashboard.totals.total_ungraded, 0);
}

#[tokio::test]
async fn lecturer_dashboard_counts_per_course() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let bob = common::student(storage.as_ref(), "bob").await;
    let cy = common::student(storage.as_ref(), "cy").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let foreign = common::course(storage.as_ref(), "CS201", &other).await;
    for s in [&ada, &bob, &cy] {
        common::enroll(storage.as_ref(), s, &course).await;
    }
    common::enroll(storage.as_ref(), &ada, &foreign).await;

    let essay =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;
    common::assignment(storage.as_ref(), &course, "Lab", 20.0, Duration::days(4)).await;
    let elsewhere =
        common::assignment(storage.as_ref(), &foreign, "Other", 20.0, Duration::days(4)).await;

    submit::submit(storage.as_ref(), &ada, essay.id, request(SubmitMode::Final))
        .await
        .unwrap();
    let graded = submit::submit(storage.as_ref(), &bob, essay.id, request(SubmitMode::Final))
        .await
        .unwrap()
        .data;
    submit::submit(storage.as_ref(), &cy, essay.id, request(SubmitMode::Draft))
        .await
        .unwrap();
    submit::submit(storage.as_ref(), &ada, elsewhere.id, request(SubmitMode::Final))
        .await
        .unwrap();
    grade::grade(
        storage.as_ref(),
        &owner,
        graded.id,
        GradeRequest {
            marks: Some(60.0),
            feedback: String::new(),
        },
    )
    .await
    .unwrap();

    let dashboard = lecturer::lecturer_dashboard(storage.as_ref(), &owner)
        .await
        .unwrap();
    assert_eq!(dashboard.courses.len(), 1);
    let stats = &dashboard.courses[0];
    assert_eq!(stats.course.id, course.id);
    assert_eq!(stats.department.code, "CS");
    assert_eq!(stats.counts.student_count, 3);
    assert_eq!(stats.counts.assignment_count, 2);
    // 草稿计入提交总数，但不计入待评分
    assert_eq!(stats.counts.submission_count, 3);
    assert_eq!(stats.counts.ungraded_count, 1);

    assert_eq!(dashboard.totals.total_courses, 1);
    assert_eq!(dashboard.totals.total_students, 3);
    assert_eq!(dashboard.totals.total_ungraded, 1);

    assert_eq!(dashboard.recent_submissions.len(), 1);
    assert_eq!(dashboard.recent_submissions[0].student.id, ada.id);
    assert_eq!(
        dashboard.recent_submissions[0].submission.status,
        SubmissionStatus::Submitted
    );
}

#[tokio::test]
async fn lecturer_recent_submissions_are_capped() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let essay =
        common::assignment(storage.as_ref(), &course, "Essay", 100.0, Duration::days(2)).await;

    for n in 0..11 {
        let s = common::student(storage.as_ref(), &format!("student{n}")).await;
        submit::submit(storage.as_ref(), &s, essay.id, request(SubmitMode::Final))
            .await
            .unwrap();
    }

    let dashboard = lecturer::lecturer_dashboard(storage.as_ref(), &owner)
        .await
        .unwrap();
    assert_eq!(dashboard.recent_submissions.len(), 10);
    assert_eq!(dashboard.recent_submissions[0].student.username, "student10");
    assert_eq!(dashboard.courses[0].counts.ungraded_count, 11);
}
