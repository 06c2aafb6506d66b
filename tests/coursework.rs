mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use classconnect::models::assignments::requests::NewAssignment;
use common::{
    MultipartBody, PDF, PNG, delete, due_in, enroll, error_code, get, post_json, post_multipart,
    send, setup,
};

#[actix_web::test]
async fn scenario_teacher_assigns_student_submits_and_is_graded() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof. Ramos", "ramos@example.com", "teacher").await;
    let (student, student_id) =
        common::register(&app, "Lucía", "lucia@example.com", "student").await;

    let class_id = common::create_class(&app, &teacher, "Math 101").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Algebra").await;
    let assignment_id =
        common::create_assignment(&app, &teacher, &class_id, &topic_id, "Ecuaciones").await;

    let (status, _) = enroll(&app, &teacher, &class_id, &student_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(
        &app,
        get(&format!("/api/assignments/class/{class_id}"), Some(&student)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], assignment_id.as_str());
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[0]["topicName"], "Algebra");

    let (status, submission) = send(
        &app,
        post_multipart(
            &format!("/api/assignments/{assignment_id}/submit"),
            Some(&student),
            MultipartBody::new()
                .text("comment", "Mi tarea")
                .file("files", "tarea.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submission["files"].as_array().unwrap().len(), 1);
    assert_eq!(submission["files"][0]["fileType"], "application/pdf");

    // 上传的文件可以直接访问
    let file_url = submission["files"][0]["fileUrl"].as_str().unwrap().to_string();
    let resp = test::call_service(&app, get(&file_url, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), PDF);

    let (status, submissions) = send(
        &app,
        get(
            &format!("/api/assignments/{assignment_id}/submissions"),
            Some(&teacher),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let submissions = submissions.as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["studentName"], "Lucía");
    let submission_id = submissions[0]["id"].as_str().unwrap().to_string();

    let (status, graded) = send(
        &app,
        post_json(
            &format!("/api/assignments/{submission_id}/grade"),
            Some(&teacher),
            json!({ "grade": 85, "feedback": "Bien hecho" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graded["grade"], 85);
    assert!(graded["gradedAt"].is_string());

    let (status, list) = send(&app, get("/api/assignments/student", Some(&student))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["grade"], 85);
    assert_eq!(list[0]["feedback"], "Bien hecho");
    assert_eq!(list[0]["status"], "submitted");
    assert_eq!(list[0]["className"], "Math 101");

    let (_, list) = send(
        &app,
        get(&format!("/api/assignments/class/{class_id}"), Some(&teacher)),
    )
    .await;
    assert_eq!(list[0]["submissionCount"], 1);
}

#[actix_web::test]
async fn scenario_past_due_date_is_rejected() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let class_id = common::create_class(&app, &teacher, "Math 101").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Algebra").await;

    for due_date in [due_in(-chrono::Duration::hours(1)), "mañana".to_string()] {
        let (status, body) = send(
            &app,
            post_multipart(
                "/api/assignments",
                Some(&teacher),
                MultipartBody::new()
                    .text("classId", &class_id)
                    .text("topicId", &topic_id)
                    .text("title", "Tarde")
                    .text("dueDate", &due_date)
                    .file("attachments", "guia.pdf", "application/pdf", PDF),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "INVALID_DUE_DATE");
    }

    let assignments = tc.ctx.storage.list_assignments_by_class(&class_id).await.unwrap();
    assert!(assignments.is_empty());
    assert_eq!(tc.stored_file_count(), 0);
}

#[actix_web::test]
async fn scenario_student_cannot_announce() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Math 101").await;
    enroll(&app, &teacher, &class_id, &student_id).await;

    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&student),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Hola")
                .text("content", "Sin permiso")
                .file("attachments", "foto.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "UNAUTHORIZED_ROLE");

    let announcements = tc
        .ctx
        .storage
        .list_announcements_by_class(&class_id)
        .await
        .unwrap();
    assert!(announcements.is_empty());
    assert_eq!(tc.stored_file_count(), 0);
}

#[actix_web::test]
async fn announcement_attachments_round_trip_and_are_removed_on_delete() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Biología").await;
    enroll(&app, &teacher, &class_id, &student_id).await;

    let (status, created) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Laboratorio")
                .text("content", "Traer bata")
                .file("attachments", "celula.png", "image/png", PNG)
                .file("attachments", "protocolo.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let announcement_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(tc.stored_file_count(), 2);

    let (status, fetched) = send(
        &app,
        get(&format!("/api/announcements/{announcement_id}"), Some(&student)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mut attachments: Vec<(String, i64, String)> = fetched["attachments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["fileName"].as_str().unwrap().to_string(),
                a["fileSize"].as_i64().unwrap(),
                a["fileType"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    attachments.sort();
    assert_eq!(
        attachments,
        vec![
            ("celula.png".to_string(), PNG.len() as i64, "image/png".to_string()),
            (
                "protocolo.pdf".to_string(),
                PDF.len() as i64,
                "application/pdf".to_string()
            ),
        ]
    );

    // 学生不能删除
    let (status, body) = send(
        &app,
        delete(&format!("/api/announcements/{announcement_id}"), Some(&student)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "UNAUTHORIZED_ROLE");

    let (status, _) = send(
        &app,
        delete(&format!("/api/announcements/{announcement_id}"), Some(&teacher)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tc.stored_file_count(), 0);

    let (status, body) = send(
        &app,
        get(&format!("/api/announcements/{announcement_id}"), Some(&teacher)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[actix_web::test]
async fn rejected_upload_leaves_nothing_behind() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let class_id = common::create_class(&app, &teacher, "Música").await;

    // 第二个文件声明为 PNG 但内容不符
    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Partituras")
                .text("content", "Adjuntas")
                .file("attachments", "ok.pdf", "application/pdf", PDF)
                .file("attachments", "fake.png", "image/png", b"not really a png"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "UNSUPPORTED_TYPE");

    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Script")
                .text("content", "Adjunto")
                .file("attachments", "run.sh", "application/x-sh", b"#!/bin/sh\n"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "UNSUPPORTED_TYPE");

    let announcements = tc
        .ctx
        .storage
        .list_announcements_by_class(&class_id)
        .await
        .unwrap();
    assert!(announcements.is_empty());
    assert_eq!(tc.stored_file_count(), 0);
}

#[actix_web::test]
async fn resubmission_replaces_files_and_resets_grade() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Física").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Cinemática").await;
    let assignment_id =
        common::create_assignment(&app, &teacher, &class_id, &topic_id, "Problemas").await;
    enroll(&app, &teacher, &class_id, &student_id).await;

    let submit_uri = format!("/api/assignments/{assignment_id}/submit");
    let (status, first) = send(
        &app,
        post_multipart(
            &submit_uri,
            Some(&student),
            MultipartBody::new()
                .text("comment", "Primera versión")
                .file("files", "v1.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        post_json(
            &format!("/api/assignments/{first_id}/grade"),
            Some(&teacher),
            json!({ "grade": 60 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = send(
        &app,
        post_multipart(
            &submit_uri,
            Some(&student),
            MultipartBody::new()
                .text("comment", "Corregida")
                .file("files", "v2.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["comment"], "Corregida");
    assert!(second["grade"].is_null());
    assert!(second["feedback"].is_null());
    let files = second["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["fileName"], "v2.png");

    let submissions = tc
        .ctx
        .storage
        .list_submissions_by_assignment(&assignment_id)
        .await
        .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].student_id, student_id);
    // 旧文件已从磁盘删除
    assert_eq!(tc.stored_file_count(), 1);

    let (status, body) = send(
        &app,
        post_multipart(&submit_uri, Some(&student), MultipartBody::new()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "MISSING_FIELDS");
}

#[actix_web::test]
async fn invalid_grades_leave_the_stored_grade_untouched() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Lengua").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Ensayo").await;
    let assignment_id =
        common::create_assignment(&app, &teacher, &class_id, &topic_id, "Redacción").await;
    enroll(&app, &teacher, &class_id, &student_id).await;

    let (_, submission) = send(
        &app,
        post_multipart(
            &format!("/api/assignments/{assignment_id}/submit"),
            Some(&student),
            MultipartBody::new().text("comment", "Texto en línea"),
        ),
    )
    .await;
    let submission_id = submission["id"].as_str().unwrap().to_string();
    let grade_uri = format!("/api/assignments/{submission_id}/grade");

    let (status, _) = send(&app, post_json(&grade_uri, Some(&teacher), json!({ "grade": 70 }))).await;
    assert_eq!(status, StatusCode::OK);

    for bad in [json!(101), json!(-1), json!(85.5), json!("ochenta")] {
        let (status, body) =
            send(&app, post_json(&grade_uri, Some(&teacher), json!({ "grade": bad }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(error_code(&body), "INVALID_GRADE", "{bad}");
    }

    let stored = tc
        .ctx
        .storage
        .get_submission_by_id(&submission_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.grade, Some(70));

    // 学生不能批改
    let (status, body) = send(&app, post_json(&grade_uri, Some(&student), json!({ "grade": 100 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "UNAUTHORIZED_ROLE");
}

#[actix_web::test]
async fn materials_are_listed_per_class() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Geografía").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Mapas").await;

    let (status, material) = send(
        &app,
        post_multipart(
            "/api/materials",
            Some(&teacher),
            MultipartBody::new()
                .text("topicId", &topic_id)
                .text("title", "Atlas")
                .text("description", "Capítulo 1")
                .file("attachments", "atlas.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(material["topicName"], "Mapas");
    assert_eq!(material["description"], "Capítulo 1");
    let material_id = material["id"].as_str().unwrap().to_string();

    // 未选课的学生无权查看
    let (status, body) = send(&app, get(&format!("/api/materials/{material_id}"), Some(&student))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "ACCESS_DENIED");

    enroll(&app, &teacher, &class_id, &student_id).await;
    let (status, list) = send(
        &app,
        get(&format!("/api/materials/class/{class_id}"), Some(&student)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["attachments"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        post_multipart(
            "/api/materials",
            Some(&teacher),
            MultipartBody::new()
                .text("topicId", "missing-topic")
                .text("title", "Nada"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "TOPIC_NOT_FOUND");
}

#[actix_web::test]
async fn submitting_after_the_due_date_is_rejected_and_reported_expired() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, teacher_id) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Geografía").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Mapas").await;
    enroll(&app, &teacher, &class_id, &student_id).await;
    let open_id = common::create_assignment(&app, &teacher, &class_id, &topic_id, "Abierta").await;

    // 接口不接受过去的截止时间，直接写入存储
    let closed = tc
        .ctx
        .storage
        .create_assignment(
            NewAssignment {
                class_id: class_id.clone(),
                topic_id: topic_id.clone(),
                title: "Vencida".to_string(),
                description: None,
                due_date: chrono::Utc::now() - chrono::Duration::hours(2),
                created_by: teacher_id,
            },
            &[],
        )
        .await
        .unwrap();
    assert_eq!(closed.topic_name.as_deref(), Some("Mapas"));

    let (status, body) = send(
        &app,
        post_multipart(
            &format!("/api/assignments/{}/submit", closed.id),
            Some(&student),
            MultipartBody::new()
                .text("comment", "Tarde")
                .file("files", "mapa.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "DUE_DATE_PASSED");
    assert_eq!(tc.stored_file_count(), 0);
    let submissions = tc
        .ctx
        .storage
        .list_submissions_by_assignment(&closed.id)
        .await
        .unwrap();
    assert!(submissions.is_empty());

    let (status, body) = send(&app, get("/api/assignments/student", Some(&student))).await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<(&str, &str)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| (a["id"].as_str().unwrap(), a["status"].as_str().unwrap()))
        .collect();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.contains(&(closed.id.as_str(), "expired")));
    assert!(statuses.contains(&(open_id.as_str(), "pending")));
}

#[actix_web::test]
async fn other_teachers_cannot_delete_an_announcement() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (owner, _) = common::register(&app, "Owner", "owner@example.com", "teacher").await;
    let (other, _) = common::register(&app, "Other", "other@example.com", "teacher").await;
    let class_id = common::create_class(&app, &owner, "Filosofía").await;

    let (status, created) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&owner),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Lecturas")
                .text("content", "Capítulo 1")
                .file("attachments", "cap1.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let announcement_id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        delete(&format!("/api/announcements/{announcement_id}"), Some(&other)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "ACCESS_DENIED");

    let kept = tc
        .ctx
        .storage
        .get_announcement_by_id(announcement_id)
        .await
        .unwrap();
    assert!(kept.is_some());
    assert_eq!(tc.stored_file_count(), 1);
}
