//! 集成测试公共设施：内存 SQLite、临时上传目录、请求构造

#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test};
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use tempfile::TempDir;

use classconnect::config::AppConfig;
use classconnect::models::AppStartTime;
use classconnect::runtime::app::configure_app;
use classconnect::runtime::lifetime::startup::StartupContext;

pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];
pub const PDF: &[u8] = b"%PDF-1.4\n%test document\n";

const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

pub struct TestContext {
    pub ctx: StartupContext,
    // 需要在整个测试期间存活
    pub upload_dir: TempDir,
    // 磁盘数据库所在目录，内存库时为 None
    data_dir: Option<TempDir>,
}

impl TestContext {
    /// 上传目录中的文件数量
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// 通过第二个连接给表加触发器，之后对该表的插入全部失败
    pub async fn fail_inserts_into(&self, table: &str) {
        let dir = self
            .data_dir
            .as_ref()
            .expect("failing inserts needs setup_on_disk()");
        let db = sea_orm::Database::connect(database_url(dir))
            .await
            .expect("open second connection");
        db.execute_unprepared(&format!(
            "CREATE TRIGGER fail_insert_{table} BEFORE INSERT ON {table} \
             BEGIN SELECT RAISE(ABORT, 'insert disabled by test'); END;"
        ))
        .await
        .expect("create trigger");
    }
}

fn database_url(dir: &TempDir) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("classconnect.db").display()
    )
}

pub async fn setup() -> TestContext {
    setup_with(|_| {}).await
}

/// 在默认测试配置上做调整
pub async fn setup_with(configure: impl FnOnce(&mut AppConfig)) -> TestContext {
    build(configure, None).await
}

/// 使用临时目录中的 SQLite 文件，可配合 fail_inserts_into 注入写入失败
pub async fn setup_on_disk() -> TestContext {
    let data_dir = tempfile::tempdir().expect("create data dir");
    let url = database_url(&data_dir);
    build(
        |config| {
            config.database.url = url;
            config.database.pool_size = 2;
        },
        Some(data_dir),
    )
    .await
}

async fn build(configure: impl FnOnce(&mut AppConfig), data_dir: Option<TempDir>) -> TestContext {
    let upload_dir = tempfile::tempdir().expect("create upload dir");

    let mut config = AppConfig::default();
    config.jwt.secret = "integration-test-secret".to_string();
    // 内存库每个连接独立，只保留一个连接
    config.database.url = "sqlite::memory:".to_string();
    config.database.pool_size = 1;
    config.upload.dir = upload_dir.path().to_string_lossy().into_owned();
    configure(&mut config);

    let start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };
    let ctx = StartupContext::from_config(&config, start_time)
        .await
        .expect("build startup context");

    TestContext {
        ctx,
        upload_dir,
        data_dir,
    }
}

pub fn app(
    ctx: StartupContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().configure(move |cfg| configure_app(cfg, &ctx, MAX_PAYLOAD_SIZE))
}

/// 发送请求，返回状态码与 JSON 响应体（非 JSON 时为 Null）
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn with_token(req: test::TestRequest, token: Option<&str>) -> test::TestRequest {
    match token {
        Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
        None => req,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request {
    with_token(test::TestRequest::get().uri(uri), token).to_request()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request {
    with_token(test::TestRequest::delete().uri(uri), token).to_request()
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request {
    with_token(test::TestRequest::default().method(method).uri(uri), token)
        .set_json(body)
        .to_request()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request {
    json_request(Method::POST, uri, token, body)
}

/// 手工拼装的 multipart/form-data 请求体
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----classconnect-test-boundary".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, field, file_name, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.buf,
        )
    }
}

pub fn post_multipart(uri: &str, token: Option<&str>, body: MultipartBody) -> Request {
    let (content_type, payload) = body.finish();
    with_token(test::TestRequest::post().uri(uri), token)
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request()
}

/// 注册用户，返回 (token, user_id)
pub async fn register<S, B>(app: &S, name: &str, email: &str, role: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/auth/register",
            None,
            json!({ "name": name, "email": email, "password": "secret123", "role": role }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// 取种子数据中的第一个专业
pub async fn first_career_id<S, B>(app: &S, token: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(app, get("/api/careers", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    body[0]["id"].as_str().unwrap().to_string()
}

pub async fn create_class<S, B>(app: &S, token: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let career_id = first_career_id(app, token).await;
    let (status, body) = send(
        app,
        post_json(
            "/api/classes",
            Some(token),
            json!({ "name": name, "careerId": career_id, "semester": "2025-1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create class failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_topic<S, B>(app: &S, token: &str, class_id: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/topics",
            Some(token),
            json!({ "classId": class_id, "name": name }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create topic failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn enroll<S, B>(app: &S, token: &str, class_id: &str, student_id: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(
        app,
        post_json(
            "/api/enrollments",
            Some(token),
            json!({ "classId": class_id, "studentId": student_id }),
        ),
    )
    .await
}

pub fn due_in(duration: chrono::Duration) -> String {
    (chrono::Utc::now() + duration).to_rfc3339()
}

pub async fn create_assignment<S, B>(
    app: &S,
    token: &str,
    class_id: &str,
    topic_id: &str,
    title: &str,
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = MultipartBody::new()
        .text("classId", class_id)
        .text("topicId", topic_id)
        .text("title", title)
        .text("dueDate", &due_in(chrono::Duration::days(1)));
    let (status, body) = send(app, post_multipart("/api/assignments", Some(token), body)).await;
    assert_eq!(status, StatusCode::CREATED, "create assignment failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
