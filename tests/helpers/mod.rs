#![allow(dead_code)]

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use plant::{
    AppState,
    config::{
        AiConfig, Config, DataConfig, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig,
    },
};
use plant_ai::{Assistant, GenerativeModel, ModelError, Part, TranscriptParser};
use plant_db::{Migrate, Plan};
use plant_requirements::{DataCache, DirSource, MajorDirectory, ManualClock, cache::DEFAULT_TTL};
use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const COURSES_WITH_DIFFICULTY: &str = r#"[
    {"course_code": "CS 2500", "title": "Fundamentals of Computer Science 1", "description": "",
     "credits": "4", "prerequisites": null, "attributes": null,
     "department": "CS", "elective": false, "difficulty": 3.0},
    {"course_code": "CS 4100", "title": "Artificial Intelligence", "description": "",
     "credits": "4", "prerequisites": "CS 3500", "attributes": null,
     "department": "CS", "elective": true, "difficulty": 4.5},
    {"course_code": "DS 3000", "title": "Foundations of Data Science", "description": "",
     "credits": "4", "prerequisites": null, "attributes": null,
     "department": "DS", "elective": true, "difficulty": 2.5},
    {"course_code": "CS 3200", "title": "Database Design", "description": "",
     "credits": "4", "prerequisites": null, "attributes": null,
     "department": "CS", "elective": true, "difficulty": 2.0}
]"#;

pub const COURSE_CATALOG: &str = r#"[
    {"course_code": "CS 2500", "title": "Fundamentals of Computer Science 1", "description": "",
     "credits": "4 Hours", "prerequisites": null, "attributes": null, "department": "CS", "elective": false},
    {"course_code": "CS 2510", "title": "Fundamentals of Computer Science 2", "description": "",
     "credits": "4 Hours", "prerequisites": "CS 2500", "attributes": null, "department": "CS", "elective": false},
    {"course_code": "ENGW 1111", "title": "First-Year Writing", "description": "",
     "credits": "", "prerequisites": null, "attributes": null, "department": "ENGW", "elective": false}
]"#;

pub const CS_REQUIREMENTS: &str = r#"{
    "requirements": {
        "CS_Fundamental": {"minRequired": 2, "description": "Fundamental courses"},
        "Writing": {"minRequired": 1, "description": "Writing courses"}
    },
    "CS_Fundamental": [
        {"code": "CS 2500", "name": "Fundamentals of Computer Science 1", "creditHours": 4},
        {"code": "CS 2510", "name": "Fundamentals of Computer Science 2", "creditHours": 4}
    ],
    "Writing": [
        {"code": "ENGW 1111", "name": "First-Year Writing", "creditHours": 4}
    ],
    "NUPath": {"competencies": [
        {"code": "WF", "name": "Writing in the First Year", "fulfilledByCourses": ["ENGW 1111"]},
        {"code": "FQ", "name": "Formal and Quantitative Reasoning", "fulfilledByCourses": ["CS 2500", "MATH 1341"]}
    ]}
}"#;

pub const MAJOR_REQUIREMENTS: &str = r#"{"majors": {
    "BS-PSYC": {
        "title": "Psychology, BS",
        "requirements": {
            "core_courses": [
                {"code": "PSYC 1101", "title": "Foundations of Psychology", "credits": 4},
                {"code": "PSYC 2320", "title": "Statistics in Psychology", "credits": 4}
            ],
            "research_methods_courses": [
                {"code": "PSYC 3400", "title": "Research Methods", "credits": 4}
            ],
            "nupath": ["ND", "EI"]
        }
    },
    "BA-MATH": {
        "title": "Mathematics, BA",
        "requirements": {
            "core_courses": [
                {"code": "MATH 1341", "title": "Calculus 1 for Science and Engineering", "credits": 4}
            ]
        }
    }
}}"#;

pub const MAJORS: &str = r#"{"data": {"areas_of_study": [
    {"area_name": "Psychology", "school_name": "College of Science"},
    {"area_name": "Computer Science", "school_name": "Khoury College of Computer Sciences"},
    {"area_name": "Architecture", "school_name": "College of Arts, Media and Design"}
]}}"#;

pub const TRANSCRIPT_REPLY: &str = "```json\n[\n  {\"courseCode\": \"CS 2500\", \"courseName\": \"Fundamentals of Computer Science 1\", \"credits\": 4, \"grade\": \"A\", \"semester\": \"Fall 2024\"},\n  {\"courseCode\": \"ENGW 1111\", \"courseName\": \"First-Year Writing\", \"credits\": 4}\n]\n```";

/// Model that answers with a canned reply and records every prompt.
pub struct FakeModel {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<Vec<Part>>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_owned()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompts lock").len()
    }

    pub fn last_text(&self) -> String {
        self.prompts
            .lock()
            .expect("prompts lock")
            .last()
            .into_iter()
            .flatten()
            .filter_map(|p| match p {
                Part::Text(text) => Some(text.to_owned()),
                Part::InlineData { .. } => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, ModelError> {
        self.prompts.lock().expect("prompts lock").push(parts);

        self.reply
            .clone()
            .map_err(|status| ModelError::Api(status, "quota exceeded".to_owned()))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub cookie: Option<String>,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub model: Arc<FakeModel>,
    dir: TempDir,
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 7,
            issuer: "plant".to_owned(),
            audience: "plant-web".to_owned(),
        },
        ai: AiConfig::default(),
        data: DataConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

async fn migrated_pool(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    plant_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

fn write_data_files(dir: &TempDir) -> anyhow::Result<()> {
    for (name, content) in [
        (plant_requirements::source::COURSES_WITH_DIFFICULTY, COURSES_WITH_DIFFICULTY),
        (plant_requirements::source::COURSE_CATALOG, COURSE_CATALOG),
        (plant_requirements::source::CS_REQUIREMENTS, CS_REQUIREMENTS),
        (plant_requirements::source::MAJOR_REQUIREMENTS, MAJOR_REQUIREMENTS),
        (plant_requirements::source::MAJORS, MAJORS),
    ] {
        std::fs::write(dir.child(name), content)?;
    }

    Ok(())
}

pub async fn setup_with(model: Option<FakeModel>) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    write_data_files(&dir)?;
    let pool = migrated_pool(&dir).await?;

    let enabled = model.is_some();
    let model = Arc::new(model.unwrap_or_else(|| FakeModel::replying("")));
    let generative: Arc<dyn GenerativeModel> = model.clone();

    let source = Arc::new(DirSource::new(dir.path()));
    let state = AppState {
        config: config(),
        pool: pool.clone(),
        user_command: plant_user::Command::new(plant_shared::State::new(pool.clone())),
        plan_command: plant_plan::Command::new(plant_shared::State::new(pool)),
        data: Arc::new(DataCache::new(
            source.clone(),
            Arc::new(ManualClock::new()),
            DEFAULT_TTL,
        )),
        majors: Arc::new(MajorDirectory::new(source)),
        transcript: enabled.then(|| TranscriptParser::new(generative.clone())),
        assistant: enabled.then(|| Assistant::new(generative.clone())),
    };

    Ok(TestApp {
        router: plant::create_app(state.clone()),
        state,
        model,
        dir,
    })
}

pub async fn setup(model: FakeModel) -> anyhow::Result<TestApp> {
    setup_with(Some(model)).await
}

/// App without model clients, as when no API key is configured.
pub async fn setup_without_ai() -> anyhow::Result<TestApp> {
    setup_with(None).await
}

impl TestApp {
    pub fn data_dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse {
            status,
            cookie,
            body,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> anyhow::Result<TestResponse> {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> anyhow::Result<TestResponse> {
        self.request(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> anyhow::Result<TestResponse> {
        self.request(Method::PUT, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> anyhow::Result<TestResponse> {
        self.request(Method::DELETE, uri, cookie, None).await
    }

    /// Signs a new user up and returns the session cookie to send back.
    pub async fn signup(&self, name: &str) -> anyhow::Result<String> {
        let response = self
            .post(
                "/signup",
                None,
                json!({
                    "email": format!("{name}@plant.localhost"),
                    "password": "my_password",
                    "confirmPassword": "my_password",
                }),
            )
            .await?;
        anyhow::ensure!(response.status == StatusCode::CREATED, "signup failed: {}", response.body);

        session(&response)
    }

    pub async fn create_plan(&self, cookie: &str, major: &str, career_goal: &str) -> anyhow::Result<Value> {
        let response = self
            .post(
                "/plans",
                Some(cookie),
                json!({"title": "My plan", "major": major, "careerGoal": career_goal}),
            )
            .await?;
        anyhow::ensure!(response.status == StatusCode::CREATED, "create failed: {}", response.body);

        Ok(response.body)
    }
}

/// `name=value` part of a Set-Cookie header.
pub fn session(response: &TestResponse) -> anyhow::Result<String> {
    let cookie = response
        .cookie
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("no session cookie"))?;

    Ok(cookie.split(';').next().unwrap_or_default().to_owned())
}

pub fn multipart(field: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "plant-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/parse-courses")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("multipart request")
}
