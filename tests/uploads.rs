mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{
    MultipartBody, PDF, PNG, enroll, error_code, post_multipart, send, setup, setup_on_disk,
    setup_with,
};

#[actix_web::test]
async fn oversized_file_is_rejected_before_anything_is_stored() {
    // PNG 夹具 12 字节，PDF 夹具超过 16 字节
    let tc = setup_with(|config| config.upload.max_size = 16).await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let class_id = common::create_class(&app, &teacher, "Dibujo").await;

    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Bocetos")
                .text("content", "Adjuntos")
                .file("attachments", "boceto.png", "image/png", PNG)
                .file("attachments", "guia.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "FILE_TOO_LARGE");

    let announcements = tc
        .ctx
        .storage
        .list_announcements_by_class(&class_id)
        .await
        .unwrap();
    assert!(announcements.is_empty());
    assert_eq!(tc.stored_file_count(), 0);

    // 限额内的文件正常保存
    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Bocetos")
                .text("content", "Adjuntos")
                .file("attachments", "boceto.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(tc.stored_file_count(), 1);
}

#[actix_web::test]
async fn more_than_five_files_is_an_upload_error() {
    let tc = setup().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Fotografía").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Retratos").await;
    let assignment_id =
        common::create_assignment(&app, &teacher, &class_id, &topic_id, "Serie").await;
    enroll(&app, &teacher, &class_id, &student_id).await;

    let body = (1..=6).fold(MultipartBody::new(), |body, i| {
        body.file("files", &format!("foto{i}.png"), "image/png", PNG)
    });
    let (status, body) = send(
        &app,
        post_multipart(
            &format!("/api/assignments/{assignment_id}/submit"),
            Some(&student),
            body,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "UPLOAD_ERROR");

    let submissions = tc
        .ctx
        .storage
        .list_submissions_by_assignment(&assignment_id)
        .await
        .unwrap();
    assert!(submissions.is_empty());
    assert_eq!(tc.stored_file_count(), 0);
}

#[actix_web::test]
async fn failed_database_write_removes_stored_files() {
    let tc = setup_on_disk().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let class_id = common::create_class(&app, &teacher, "Biología").await;
    tc.fail_inserts_into("announcement_attachments").await;

    let (status, body) = send(
        &app,
        post_multipart(
            "/api/announcements",
            Some(&teacher),
            MultipartBody::new()
                .text("classId", &class_id)
                .text("title", "Células")
                .text("content", "Lectura")
                .file("attachments", "lectura.pdf", "application/pdf", PDF)
                .file("attachments", "celula.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "SERVER_ERROR");
    assert_eq!(body["error"]["message"], "Internal server error");

    // 公告行随事务回滚，已写入的文件被清理
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
async fn failed_resubmission_keeps_the_previous_submission() {
    let tc = setup_on_disk().await;
    let app = test::init_service(common::app(tc.ctx.clone())).await;

    let (teacher, _) = common::register(&app, "Prof", "prof@example.com", "teacher").await;
    let (student, student_id) = common::register(&app, "Stu", "stu@example.com", "student").await;
    let class_id = common::create_class(&app, &teacher, "Química").await;
    let topic_id = common::create_topic(&app, &teacher, &class_id, "Reacciones").await;
    let assignment_id =
        common::create_assignment(&app, &teacher, &class_id, &topic_id, "Informe").await;
    enroll(&app, &teacher, &class_id, &student_id).await;
    let submit_uri = format!("/api/assignments/{assignment_id}/submit");

    let (status, first) = send(
        &app,
        post_multipart(
            &submit_uri,
            Some(&student),
            MultipartBody::new()
                .text("comment", "Primera versión")
                .file("files", "v1.png", "image/png", PNG),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    assert_eq!(tc.stored_file_count(), 1);

    tc.fail_inserts_into("submission_files").await;
    let (status, body) = send(
        &app,
        post_multipart(
            &submit_uri,
            Some(&student),
            MultipartBody::new()
                .text("comment", "Segunda versión")
                .file("files", "v2.pdf", "application/pdf", PDF),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "SERVER_ERROR");

    // 旧记录与旧文件都还在，新文件已删除
    let submissions = tc
        .ctx
        .storage
        .list_submissions_by_assignment(&assignment_id)
        .await
        .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].comment.as_deref(), Some("Primera versión"));
    assert_eq!(submissions[0].files.len(), 1);
    assert_eq!(submissions[0].files[0].file_name, "v1.png");
    assert!(
        tc.upload_dir
            .path()
            .join(&submissions[0].files[0].file_path)
            .exists()
    );
    assert_eq!(tc.stored_file_count(), 1);
}
