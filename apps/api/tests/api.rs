use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use talentlens_api::config::Config;
use talentlens_api::llm_client::{
    ChatRequest, ChatTransport, CompletionClient, CompletionError, ErrorKind,
};
use talentlens_api::routes::build_router;
use talentlens_api::state::AppState;

/// Answers each request with the reply registered for its schema name.
struct ScriptedTransport {
    replies: Vec<(&'static str, Result<String, CompletionError>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn reply(mut self, schema: &'static str, body: Value) -> Self {
        self.replies.push((schema, Ok(body.to_string())));
        self
    }

    fn fail(mut self, schema: &'static str, kind: ErrorKind) -> Self {
        self.replies
            .push((schema, Err(CompletionError::new(kind, "scripted failure"))));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, _api_key: &str, request: &ChatRequest) -> Result<String, CompletionError> {
        let name = request.schema_name().to_string();
        self.calls.lock().unwrap().push(name.clone());
        self.replies
            .iter()
            .find(|(schema, _)| *schema == name)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(CompletionError::new(ErrorKind::UpstreamError, "unscripted")))
    }
}

fn test_config(api_key: Option<&str>) -> Config {
    Config {
        openai_api_key: api_key.map(String::from),
        openai_model: "gpt-4o".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        ai_request_timeout: Duration::from_secs(1),
        port: 0,
        rust_log: "info".to_string(),
    }
}

fn app(transport: Arc<ScriptedTransport>, api_key: Option<&str>) -> Router {
    app_with_config(transport, test_config(api_key))
}

fn app_with_config(transport: Arc<ScriptedTransport>, config: Config) -> Router {
    let completion = CompletionClient::new(transport, config.ai_settings());
    build_router(AppState { completion, config })
}

async fn call(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(match body {
            Some(b) => Body::from(b.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn profile() -> Value {
    json!({
        "skills": ["React", "Node.js"],
        "experienceLevel": "Entry level",
        "careerGoal": "Frontend Developer"
    })
}

#[tokio::test]
async fn health_reports_service() {
    let app = app(Arc::new(ScriptedTransport::new()), None);
    let (status, body) = call(app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "talentlens-api");
}

#[tokio::test]
async fn status_reflects_configured_key() {
    let transport = Arc::new(ScriptedTransport::new());
    let (_, body) = call(
        app(transport.clone(), None),
        Method::GET,
        "/api/v1/insights/status",
        None,
    )
    .await;
    assert_eq!(body, json!({ "available": false, "model": "gpt-4o" }));

    let (_, body) = call(
        app(transport, Some("sk-test")),
        Method::GET,
        "/api/v1/insights/status",
        None,
    )
    .await;
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn status_reports_configured_model() {
    let config = Config {
        openai_model: "gpt-4o-mini".to_string(),
        ..test_config(Some("sk-test"))
    };
    let app = app_with_config(Arc::new(ScriptedTransport::new()), config);

    let (_, body) = call(app, Method::GET, "/api/v1/insights/status", None).await;
    assert_eq!(body, json!({ "available": true, "model": "gpt-4o-mini" }));
}

#[tokio::test]
async fn recommendations_envelope_on_success() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        "job_recommendations",
        json!({ "recommendations": [
            { "jobId": "a", "matchScore": 90, "reasons": ["React overlap"] },
            { "jobId": "b", "matchScore": 20, "reasons": ["Needs Python"] }
        ]}),
    ));
    let body = json!({
        "profile": profile(),
        "jobs": [
            {
                "id": "a",
                "title": "Frontend Developer",
                "company": "TechCorp",
                "skills": ["React"]
            },
            {
                "id": "b",
                "title": "Data Analyst",
                "company": "DataSoft",
                "skills": ["Python"]
            }
        ]
    });

    let (status, body) = call(
        app(transport, Some("sk-test")),
        Method::POST,
        "/api/v1/insights/job-recommendations",
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "succeeded");
    assert!(body.get("errorKind").is_none());
    assert_eq!(body["result"]["recommendations"][0]["jobId"], "a");
    assert_eq!(body["result"]["recommendations"][0]["matchScore"], 90);
    assert_eq!(body["result"]["recommendations"][1]["matchScore"], 20);
}

#[tokio::test]
async fn missing_key_fails_without_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let (status, body) = call(
        app(transport.clone(), None),
        Method::POST,
        "/api/v1/insights/profile-optimization",
        Some(json!({ "profile": profile() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["errorKind"], "authError");
    assert_eq!(
        body["result"],
        json!({
            "optimizedSummary": "",
            "skillsToEmphasize": [],
            "missingSkills": [],
            "suggestions": []
        })
    );
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn interview_questions_require_job_title() {
    let transport = Arc::new(ScriptedTransport::new());
    let (status, body) = call(
        app(transport.clone(), Some("sk-test")),
        Method::POST,
        "/api/v1/insights/interview-questions",
        Some(json!({ "job": { "id": "1", "title": "  " }, "profile": profile() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn interview_questions_report_upstream_failure() {
    let transport = Arc::new(
        ScriptedTransport::new().fail("interview_questions", ErrorKind::UpstreamError),
    );
    let (status, body) = call(
        app(transport, Some("sk-test")),
        Method::POST,
        "/api/v1/insights/interview-questions",
        Some(json!({ "job": { "id": "1", "title": "Frontend Developer", "company": "TechCorp" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["errorKind"], "upstreamError");
    assert_eq!(body["result"]["questions"], json!([]));
}

#[tokio::test]
async fn dashboard_jobs_stay_idle_without_profile() {
    let transport = Arc::new(ScriptedTransport::new());
    let (status, body) = call(
        app(transport.clone(), Some("sk-test")),
        Method::POST,
        "/api/v1/dashboard/recommended-jobs",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiStatus"], "idle");
    assert_eq!(body["jobs"].as_array().unwrap().len(), 5);
    assert_eq!(body["jobs"][0]["title"], "Frontend Developer Intern");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn dashboard_jobs_merge_ai_scores() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        "job_recommendations",
        json!({ "recommendations": [
            { "jobId": "4", "matchScore": 99, "reasons": ["SQL and Python match"] }
        ]}),
    ));
    let (_, body) = call(
        app(transport, Some("sk-test")),
        Method::POST,
        "/api/v1/dashboard/recommended-jobs",
        Some(json!({ "profile": profile() })),
    )
    .await;

    assert_eq!(body["aiStatus"], "succeeded");
    let first = &body["jobs"][0];
    assert_eq!(first["id"], "4");
    assert_eq!(first["matchScore"], 99);
    assert_eq!(first["isAIRecommended"], true);
    assert_eq!(first["aiReasons"], json!(["SQL and Python match"]));
    assert_eq!(body["jobs"][1]["isAIRecommended"], false);
}

#[tokio::test]
async fn dashboard_skill_gaps_fall_back_on_failure() {
    let transport = Arc::new(
        ScriptedTransport::new().fail("skill_gap_analysis", ErrorKind::TransportError),
    );
    let (_, body) = call(
        app(transport, Some("sk-test")),
        Method::POST,
        "/api/v1/dashboard/skill-gaps",
        Some(json!({ "profile": profile() })),
    )
    .await;

    assert_eq!(body["aiStatus"], "failed");
    let gaps = body["skillGaps"].as_array().unwrap();
    assert_eq!(gaps.len(), 3);
    assert_eq!(gaps[0]["skill"], "React Native");
    assert_eq!(gaps[0]["isAIGenerated"], false);
}

#[tokio::test]
async fn dashboard_skill_gaps_prefer_ai() {
    let transport = Arc::new(ScriptedTransport::new().reply(
        "skill_gap_analysis",
        json!({ "skillGaps": [{
            "skill": "GraphQL",
            "priority": "medium",
            "demandScore": 64,
            "currentLevel": 10,
            "targetLevel": 60,
            "jobsRequiring": 12,
            "averageSalaryIncrease": "$4,000",
            "timeToLearn": "1-2 months",
            "description": "Query language for APIs",
            "recommendedCourses": []
        }]}),
    ));
    let (_, body) = call(
        app(transport, Some("sk-test")),
        Method::POST,
        "/api/v1/dashboard/skill-gaps",
        Some(json!({
            "profile": profile(),
            "targetJobs": [{ "id": "1", "title": "Frontend Developer" }]
        })),
    )
    .await;

    assert_eq!(body["aiStatus"], "succeeded");
    assert_eq!(body["skillGaps"][0]["id"], "ai_1");
    assert_eq!(body["skillGaps"][0]["skill"], "GraphQL");
    assert_eq!(body["skillGaps"][0]["isAIGenerated"], true);
}

#[tokio::test]
async fn interview_jobs_lists_fallback_options() {
    let (status, body) = call(
        app(Arc::new(ScriptedTransport::new()), None),
        Method::GET,
        "/api/v1/dashboard/interview-jobs",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 3);
    assert_eq!(body["jobs"][1]["title"], "Backend Developer");
}
