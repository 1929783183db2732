mod common;

use chrono::{Duration, Utc};

use rust_course_system::errors::CourseSystemError;
use rust_course_system::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use rust_course_system::models::catalog::requests::{
    CourseListParams, CreateCourseRequest, CreateSchoolRequest, EnrollStudentRequest,
};
use rust_course_system::models::submissions::entities::SubmitMode;
use rust_course_system::models::submissions::requests::{GradeRequest, SubmitRequest};
use rust_course_system::models::{PaginationQuery, locations};
use rust_course_system::services::assignments::{create, delete, get, list, update};
use rust_course_system::services::catalog::{courses, enrollments, schools};
use rust_course_system::services::submissions::{grade, submit};
use rust_course_system::storage::Storage;

fn new_assignment(title: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: title.to_string(),
        description: "Implement a hash map".to_string(),
        due_date: Some(Utc::now() + Duration::days(7)),
        total_marks: 100.0,
    }
}

fn first_page() -> PaginationQuery {
    PaginationQuery { page: 1, size: 20 }
}

#[tokio::test]
async fn only_course_lecturer_creates_assignments() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let admin = common::admin(storage.as_ref()).await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;

    let outcome = create::create_assignment(storage.as_ref(), &owner, course.id, new_assignment("Lab 1"))
        .await
        .unwrap();
    assert_eq!(outcome.data.created_by, owner.id);
    assert!(outcome.data.is_active);
    assert_eq!(
        outcome.redirect.location,
        locations::assignment_detail(outcome.data.id)
    );

    for principal in [&other, &admin] {
        let err = create::create_assignment(
            storage.as_ref(),
            principal,
            course.id,
            new_assignment("Lab 2"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));
        assert_eq!(
            err.redirect_location(),
            Some(locations::course_detail(course.id))
        );
    }
}

#[tokio::test]
async fn assignment_validation_lists_field_errors() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;

    let mut req = new_assignment("");
    req.due_date = None;
    req.total_marks = 1000.0;
    let err = create::create_assignment(storage.as_ref(), &owner, course.id, req)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));
    let message = err.message();
    assert!(message.contains("title: "));
    assert!(message.contains("due_date: "));
    assert!(message.contains("total_marks: "));
    assert!(message.contains("; "));
}

#[tokio::test]
async fn edit_and_delete_are_restricted_to_the_owner() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Lab 1", 100.0, Duration::days(3)).await;

    let err = update::update_assignment(
        storage.as_ref(),
        &other,
        assignment.id,
        UpdateAssignmentRequest {
            title: Some("Hijacked".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.redirect_location(),
        Some(locations::assignment_detail(assignment.id))
    );

    let err = delete::delete_assignment(storage.as_ref(), &other, assignment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));

    let outcome = update::update_assignment(
        storage.as_ref(),
        &owner,
        assignment.id,
        UpdateAssignmentRequest {
            title: Some("Lab 1 (revised)".into()),
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome.data.title, "Lab 1 (revised)");
    assert!(!outcome.data.is_active);
    assert_eq!(outcome.data.total_marks, 100.0);
}

#[tokio::test]
async fn total_marks_cannot_drop_below_an_awarded_mark() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    common::enroll(storage.as_ref(), &student, &course).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Lab 1", 100.0, Duration::days(3)).await;

    let submission = submit::submit(
        storage.as_ref(),
        &student,
        assignment.id,
        SubmitRequest {
            content: "answer".into(),
            mode: SubmitMode::Final,
        },
    )
    .await
    .unwrap()
    .data;
    grade::grade(
        storage.as_ref(),
        &owner,
        submission.id,
        GradeRequest {
            marks: Some(80.0),
            feedback: String::new(),
        },
    )
    .await
    .unwrap();

    let lower = |total_marks| UpdateAssignmentRequest {
        total_marks: Some(total_marks),
        ..Default::default()
    };
    let err = update::update_assignment(storage.as_ref(), &owner, assignment.id, lower(50.0))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("total_marks: "));

    let outcome = update::update_assignment(storage.as_ref(), &owner, assignment.id, lower(80.0))
        .await
        .unwrap();
    assert_eq!(outcome.data.total_marks, 80.0);
}

#[tokio::test]
async fn deleting_an_assignment_removes_its_submissions() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let ada = common::student(storage.as_ref(), "ada").await;
    let bob = common::student(storage.as_ref(), "bob").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Lab 1", 100.0, Duration::days(3)).await;

    let mut ids = Vec::new();
    for student in [&ada, &bob] {
        let outcome = submit::submit(
            storage.as_ref(),
            student,
            assignment.id,
            SubmitRequest {
                content: "answer".into(),
                mode: SubmitMode::Final,
            },
        )
        .await
        .unwrap();
        ids.push(outcome.data.id);
    }

    let outcome = delete::delete_assignment(storage.as_ref(), &owner, assignment.id)
        .await
        .unwrap();
    assert_eq!(outcome.redirect.location, locations::course_detail(course.id));

    assert!(storage.get_assignment_by_id(assignment.id).await.unwrap().is_none());
    for id in ids {
        assert!(storage.get_submission_by_id(id).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn assignment_list_is_scoped_by_role() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let enrolled = common::course(storage.as_ref(), "CS101", &owner).await;
    let elsewhere = common::course(storage.as_ref(), "CS201", &other).await;
    common::enroll(storage.as_ref(), &student, &enrolled).await;

    common::assignment(storage.as_ref(), &enrolled, "Early", 10.0, Duration::days(1)).await;
    common::assignment(storage.as_ref(), &enrolled, "Late", 10.0, Duration::days(9)).await;
    common::assignment(storage.as_ref(), &elsewhere, "Other", 10.0, Duration::days(2)).await;

    let params = || AssignmentListParams {
        pagination: first_page(),
        course_id: None,
    };

    let page = list::list_assignments(storage.as_ref(), &student, params())
        .await
        .unwrap();
    let titles: Vec<_> = page.items.iter().map(|v| v.assignment.title.as_str()).collect();
    // 截止时间倒序
    assert_eq!(titles, vec!["Late", "Early"]);
    assert_eq!(page.pagination.total, 2);

    let page = list::list_assignments(storage.as_ref(), &other, params())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].course.code, "CS201");
    assert_eq!(page.items[0].created_by.id, other.id);

    let page = list::list_assignments(
        storage.as_ref(),
        &owner,
        AssignmentListParams {
            pagination: first_page(),
            course_id: Some(elsewhere.id),
        },
    )
    .await
    .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn assignment_detail_shows_students_own_submission() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;
    let assignment =
        common::assignment(storage.as_ref(), &course, "Lab 1", 100.0, Duration::days(3)).await;

    let detail = get::assignment_detail(storage.as_ref(), &student, assignment.id)
        .await
        .unwrap();
    assert!(detail.my_submission.is_none());
    assert!(!detail.assignment.is_past_due);

    submit::submit(
        storage.as_ref(),
        &student,
        assignment.id,
        SubmitRequest {
            content: "draft".into(),
            mode: SubmitMode::Draft,
        },
    )
    .await
    .unwrap();

    let detail = get::assignment_detail(storage.as_ref(), &student, assignment.id)
        .await
        .unwrap();
    let mine = detail.my_submission.unwrap();
    assert!(!mine.is_late);

    let detail = get::assignment_detail(storage.as_ref(), &owner, assignment.id)
        .await
        .unwrap();
    assert!(detail.my_submission.is_none());

    let err = get::assignment_detail(storage.as_ref(), &owner, assignment.id + 100)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::NotFound(_)));
}

#[tokio::test]
async fn catalog_is_managed_by_admins() {
    let storage = common::storage().await;
    let admin = common::admin(storage.as_ref()).await;
    let lecturer = common::lecturer(storage.as_ref(), "grace").await;
    let student = common::student(storage.as_ref(), "ada").await;

    let school_req = || CreateSchoolRequest {
        name: "School of Science".into(),
        code: "SCI".into(),
    };
    let err = schools::create_school(storage.as_ref(), &lecturer, school_req())
        .await
        .unwrap_err();
    assert_eq!(err.redirect_location().as_deref(), Some(locations::COURSE_LIST));

    schools::create_school(storage.as_ref(), &admin, school_req())
        .await
        .unwrap();
    let err = schools::create_school(storage.as_ref(), &admin, school_req())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));

    // 使用已有的系建课程
    let existing = common::course(storage.as_ref(), "CS100", &lecturer).await;
    let course_req = |lecturer_id| CreateCourseRequest {
        code: "CS300".into(),
        name: "Compilers".into(),
        description: Some("Front to back".into()),
        department_id: existing.department_id,
        lecturer_id,
    };

    let err = courses::create_course(storage.as_ref(), &admin, course_req(student.id))
        .await
        .unwrap_err();
    assert!(err.message().contains("lecturer_id: "));

    let outcome = courses::create_course(storage.as_ref(), &admin, course_req(lecturer.id))
        .await
        .unwrap();
    assert_eq!(outcome.redirect.location, locations::course_detail(outcome.data.id));

    let err = courses::create_course(storage.as_ref(), &admin, course_req(lecturer.id))
        .await
        .unwrap_err();
    assert!(err.message().contains("code: "));
}

#[tokio::test]
async fn enrollment_is_managed_by_admin_or_course_lecturer() {
    let storage = common::storage().await;
    let owner = common::lecturer(storage.as_ref(), "owner").await;
    let other = common::lecturer(storage.as_ref(), "other").await;
    let admin = common::admin(storage.as_ref()).await;
    let student = common::student(storage.as_ref(), "ada").await;
    let course = common::course(storage.as_ref(), "CS101", &owner).await;

    let enroll_req = || EnrollStudentRequest {
        student_id: student.id,
    };

    let err = enrollments::enroll_student(storage.as_ref(), &other, course.id, enroll_req())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::PermissionDenied { .. }));

    enrollments::enroll_student(storage.as_ref(), &owner, course.id, enroll_req())
        .await
        .unwrap();
    let err = enrollments::enroll_student(storage.as_ref(), &admin, course.id, enroll_req())
        .await
        .unwrap_err();
    assert!(err.message().contains("already enrolled"));

    let err = enrollments::enroll_student(
        storage.as_ref(),
        &owner,
        course.id,
        EnrollStudentRequest {
            student_id: other.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));

    // 学生只能看到自己选修的课程
    let page = courses::list_courses(
        storage.as_ref(),
        &student,
        CourseListParams {
            pagination: first_page(),
            search: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].lecturer.id, owner.id);

    let detail = courses::course_detail(storage.as_ref(), course.id).await.unwrap();
    assert_eq!(detail.enrolled_count, 1);

    enrollments::unenroll_student(storage.as_ref(), &admin, course.id, student.id)
        .await
        .unwrap();
    let err = enrollments::unenroll_student(storage.as_ref(), &admin, course.id, student.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::NotFound(_)));
}
