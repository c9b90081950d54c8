// In-process stand-in for the user, team and notification services.
#![allow(dead_code)]

use actix_web::http::header;
use actix_web::{get, patch, post, web, App, HttpRequest, HttpResponse, HttpServer};
use hackmate::{Config, HackmateApi, SessionStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeTeam {
    pub id: i64,
    pub title: String,
    pub team_name: String,
    pub leader_user_id: i64,
    pub member_user_ids: Vec<i64>,
    pub capacity: u32,
    pub capacity_left: u32,
    pub skill_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeJoinRequest {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub message: String,
    pub status: String,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub users: Vec<FakeUser>,
    pub teams: Vec<FakeTeam>,
    pub join_requests: Vec<FakeJoinRequest>,
    pub notifications: HashMap<i64, Vec<Value>>,
    pub tokens: HashMap<String, i64>,
    pub log: Vec<RecordedRequest>,
    // (path, status) pairs answered instead of the real handler, first match wins
    pub failures: Vec<(String, u16)>,
    // Report more slots left than the team has
    pub corrupt_capacity: bool,
    // Paths that answer only after sleeping this long
    pub stalls: HashMap<String, Duration>,
}

pub type SharedState = web::Data<Mutex<FakeState>>;

fn user(id: i64, full_name: &str, email: &str, password: &str, skills: &[&str]) -> FakeUser {
    FakeUser {
        id,
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

impl FakeState {
    /// Three users and three teams:
    /// - team 42 led by Ada (1), room for 3, Lin (3) has pending request 7
    /// - team 43 led by Lin (3), Ada is a member
    /// - team 44 led by Ada, already full, Grace (2) has pending request 9
    pub fn seeded() -> Self {
        let mut state = FakeState {
            users: vec![
                user(1, "Ada", "a@b.com", "x", &["rust"]),
                user(2, "Grace", "grace@x.io", "y", &["react", "go"]),
                user(3, "Lin", "lin@x.io", "z", &[]),
            ],
            teams: vec![
                FakeTeam {
                    id: 42,
                    title: "Smart Campus".into(),
                    team_name: "Byte Me".into(),
                    leader_user_id: 1,
                    member_user_ids: vec![1],
                    capacity: 3,
                    capacity_left: 3,
                    skill_names: vec!["rust".into(), "react".into()],
                },
                FakeTeam {
                    id: 43,
                    title: "Green Route".into(),
                    team_name: "Null Pointers".into(),
                    leader_user_id: 3,
                    member_user_ids: vec![3, 1],
                    capacity: 4,
                    capacity_left: 3,
                    skill_names: vec!["python".into()],
                },
                FakeTeam {
                    id: 44,
                    title: "Tiny Team".into(),
                    team_name: "Solo".into(),
                    leader_user_id: 1,
                    member_user_ids: vec![1],
                    capacity: 1,
                    capacity_left: 0,
                    skill_names: vec![],
                },
            ],
            join_requests: vec![
                FakeJoinRequest {
                    id: 7,
                    team_id: 42,
                    user_id: 3,
                    message: "I build backends".into(),
                    status: "pending".into(),
                },
                FakeJoinRequest {
                    id: 9,
                    team_id: 44,
                    user_id: 2,
                    message: "room for one more?".into(),
                    status: "pending".into(),
                },
            ],
            ..Default::default()
        };

        state.tokens.insert("t1".into(), 1);
        state.tokens.insert("t2".into(), 2);
        state.tokens.insert("t3".into(), 3);
        state.notifications.insert(
            3,
            vec![json!({
                "id": "5b0f3c1e-8a8f-4d0e-9a57-1c1f4f3f2a10",
                "user_id": 3,
                "message": "Your request to join Null Pointers was accepted",
                "type": "request_accepted",
                "team_application_id": 43,
                "is_read": false,
                "created_at": "2026-10-03T08:00:00Z",
                "team_name": "Null Pointers",
                "leader_name": "Lin"
            })],
        );
        state
    }

    fn user_json(&self, user_id: i64) -> Value {
        match self.users.iter().find(|u| u.id == user_id) {
            Some(u) => json!({
                "id": u.id,
                "full_name": u.full_name,
                "email": u.email,
                "profile_image": null,
                "skills": u.skills,
            }),
            None => Value::Null,
        }
    }

    fn user_name(&self, user_id: i64) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.full_name.clone())
    }

    fn role(&self, team: &FakeTeam, viewer: Option<i64>) -> &'static str {
        let viewer = match viewer {
            Some(viewer) => viewer,
            None => return "default",
        };
        if team.leader_user_id == viewer {
            return "owner";
        }
        if team.member_user_ids.contains(&viewer) {
            return "member";
        }
        if self
            .join_requests
            .iter()
            .any(|r| r.team_id == team.id && r.user_id == viewer && r.status == "pending")
        {
            return "pending";
        }
        "default"
    }

    fn capacity_left(&self, team: &FakeTeam) -> u32 {
        if self.corrupt_capacity {
            team.capacity + 1
        } else {
            team.capacity_left
        }
    }

    fn listing_json(&self, team: &FakeTeam, viewer: Option<i64>) -> Value {
        json!({
            "id": team.id,
            "title": team.title,
            "description": format!("{} needs hands", team.team_name),
            "leader_user_id": team.leader_user_id,
            "leader_name": self.user_name(team.leader_user_id),
            "team_name": team.team_name,
            "skills": [],
            "skill_names": team.skill_names,
            "capacity": team.capacity,
            "capacity_left": self.capacity_left(team),
            "status": if team.capacity_left == 0 { "filled" } else { "open" },
            "hackathon_date": "2026-11-20",
            "created_at": "2026-10-01T12:00:00Z",
            "user_role": self.role(team, viewer),
        })
    }

    fn detail_json(&self, team: &FakeTeam) -> Value {
        let members: Vec<Value> = team
            .member_user_ids
            .iter()
            .map(|id| self.user_json(*id))
            .collect();
        json!({
            "id": team.id,
            "title": team.title,
            "description": format!("{} needs hands", team.team_name),
            "team_name": team.team_name,
            "capacity": team.capacity,
            "capacity_left": self.capacity_left(team),
            "status": if team.capacity_left == 0 { "filled" } else { "open" },
            "hackathon_date": "2026-11-20",
            "created_at": "2026-10-01T12:00:00Z",
            "updated_at": "2026-10-02T12:00:00Z",
            "skills": [],
            "skill_names": team.skill_names,
            "leader_user_id": team.leader_user_id,
            "leader": self.user_json(team.leader_user_id),
            "member_user_ids": team.member_user_ids,
            "members": members,
        })
    }

    fn join_request_json(&self, request: &FakeJoinRequest) -> Value {
        json!({
            "id": request.id,
            "user_id": request.user_id,
            "message": request.message,
            "status": request.status,
            "created_at": "2026-10-02T09:30:00Z",
            "user": self.user_json(request.user_id),
        })
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

// Record the call, then answer with an injected failure if one matches the path
fn record(state: &mut FakeState, req: &HttpRequest, body: Value) -> Option<HttpResponse> {
    let header_value = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    state.log.push(RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    let position = state.failures.iter().position(|(path, _)| path == req.path())?;
    let (_, status) = state.failures.remove(position);
    let status = actix_web::http::StatusCode::from_u16(status).ok()?;
    Some(HttpResponse::build(status).json(json!({"error": "injected failure"})))
}

fn viewer(state: &FakeState, req: &HttpRequest) -> Option<i64> {
    let auth = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ")?;
    state.tokens.get(token).copied()
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({"error": "Authorization header is missing or invalid"}))
}

#[post("/login/")]
async fn login(req: HttpRequest, data: SharedState, body: web::Json<Value>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, body.0.clone()) {
        return failure;
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let found = state
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .cloned();

    match found {
        Some(u) => {
            let token = format!("t{}", u.id);
            HttpResponse::Ok().json(json!({"token": token, "user": state.user_json(u.id)}))
        }
        None => HttpResponse::Unauthorized().json(json!({"error": "Invalid credentials"})),
    }
}

// Pull a text field out of a multipart body
pub fn multipart_fields(body: &str, name: &str) -> Vec<String> {
    let marker = format!("name=\"{}\"", name);
    body.split(&marker)
        .skip(1)
        .filter_map(|rest| {
            let start = rest.find("\r\n\r\n")? + 4;
            let end = rest[start..].find("\r\n")? + start;
            Some(rest[start..end].to_string())
        })
        .collect()
}

#[post("/register/")]
async fn register(req: HttpRequest, data: SharedState, body: web::Bytes) -> HttpResponse {
    let mut state = data.lock().unwrap();
    let text = String::from_utf8_lossy(&body).to_string();
    if let Some(failure) = record(&mut state, &req, Value::String(text.clone())) {
        return failure;
    }

    let email = multipart_fields(&text, "email").pop().unwrap_or_default();
    if state.users.iter().any(|u| u.email == email) {
        return HttpResponse::BadRequest().json(json!({"error": "Email already registered."}));
    }

    let id = state.users.len() as i64 + 1;
    let new_user = FakeUser {
        id,
        full_name: multipart_fields(&text, "full_name").pop().unwrap_or_default(),
        email,
        password: multipart_fields(&text, "password").pop().unwrap_or_default(),
        skills: multipart_fields(&text, "skills"),
    };
    state.users.push(new_user);
    let token = format!("t{}", id);
    state.tokens.insert(token.clone(), id);

    HttpResponse::Created().json(json!({"token": token, "user": state.user_json(id)}))
}

#[get("/users/{id}/")]
async fn get_user(req: HttpRequest, data: SharedState, path: web::Path<i64>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, Value::Null) {
        return failure;
    }

    match state.user_json(path.into_inner()) {
        Value::Null => HttpResponse::NotFound().json(json!({"detail": "Not found."})),
        user => HttpResponse::Ok().json(user),
    }
}

#[get("/team-applications/")]
async fn list_team_applications(req: HttpRequest, data: SharedState) -> HttpResponse {
    let stall = {
        let mut state = data.lock().unwrap();
        if let Some(failure) = record(&mut state, &req, Value::Null) {
            return failure;
        }
        state.stalls.get(req.path()).copied()
    };
    if let Some(delay) = stall {
        actix_web::rt::time::sleep(delay).await;
    }

    let state = data.lock().unwrap();
    let viewer = viewer(&state, &req);
    let teams: Vec<Value> = state
        .teams
        .iter()
        .map(|team| state.listing_json(team, viewer))
        .collect();
    HttpResponse::Ok().json(teams)
}

#[post("/create-team-application/")]
async fn create_team_application(req: HttpRequest, data: SharedState, body: web::Json<Value>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, body.0.clone()) {
        return failure;
    }
    let leader = match viewer(&state, &req) {
        Some(id) => id,
        None => return unauthorized(),
    };

    let id = state.teams.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let capacity = body["capacity"].as_u64().unwrap_or(1) as u32;
    state.teams.push(FakeTeam {
        id,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        team_name: body["team_name"].as_str().unwrap_or_default().to_string(),
        leader_user_id: leader,
        member_user_ids: vec![leader],
        capacity,
        capacity_left: capacity,
        skill_names: body["skills"]
            .as_array()
            .map(|skills| {
                skills
                    .iter()
                    .filter_map(|s| s.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
    });

    HttpResponse::Created().json(json!({
        "message": "Team application created successfully",
        "team_id": id,
    }))
}

#[get("/team/{id}/")]
async fn get_team(req: HttpRequest, data: SharedState, path: web::Path<i64>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, Value::Null) {
        return failure;
    }

    let team_id = path.into_inner();
    match state.teams.iter().find(|t| t.id == team_id) {
        Some(team) => HttpResponse::Ok().json(state.detail_json(team)),
        None => HttpResponse::NotFound().json(json!({"error": "Team application not found"})),
    }
}

#[get("/user/teams/")]
async fn list_my_teams(req: HttpRequest, data: SharedState) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, Value::Null) {
        return failure;
    }
    let viewer = match viewer(&state, &req) {
        Some(id) => id,
        None => return unauthorized(),
    };

    let teams: Vec<Value> = state
        .teams
        .iter()
        .filter(|t| t.leader_user_id == viewer || t.member_user_ids.contains(&viewer))
        .map(|t| state.listing_json(t, Some(viewer)))
        .collect();
    HttpResponse::Ok().json(teams)
}

#[post("/join-request/")]
async fn create_join_request(req: HttpRequest, data: SharedState, body: web::Json<Value>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, body.0.clone()) {
        return failure;
    }
    let viewer = match viewer(&state, &req) {
        Some(id) => id,
        None => return unauthorized(),
    };

    let team_id = match body["team_application"].as_i64() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({"error": "Missing required field: team_application"})),
    };
    if !state.teams.iter().any(|t| t.id == team_id) {
        return HttpResponse::NotFound().json(json!({"error": "Team application not found"}));
    }
    if state
        .join_requests
        .iter()
        .any(|r| r.team_id == team_id && r.user_id == viewer)
    {
        return HttpResponse::BadRequest().json(json!({"error": "Join request already submitted for this team"}));
    }

    let id = state.join_requests.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    let request = FakeJoinRequest {
        id,
        team_id,
        user_id: viewer,
        message: body["message"].as_str().unwrap_or_default().to_string(),
        status: "pending".into(),
    };
    let response = state.join_request_json(&request);
    state.join_requests.push(request);
    HttpResponse::Created().json(response)
}

#[get("/join-requests/{team_id}/")]
async fn list_join_requests(req: HttpRequest, data: SharedState, path: web::Path<i64>) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, Value::Null) {
        return failure;
    }
    let viewer = match viewer(&state, &req) {
        Some(id) => id,
        None => return unauthorized(),
    };

    let team_id = path.into_inner();
    let team = match state.teams.iter().find(|t| t.id == team_id) {
        Some(team) => team,
        None => return HttpResponse::NotFound().json(json!({"error": "Team application not found"})),
    };
    if team.leader_user_id != viewer {
        return HttpResponse::Forbidden().json(json!({"error": "Only the team leader can view join requests"}));
    }

    let requests: Vec<Value> = state
        .join_requests
        .iter()
        .filter(|r| r.team_id == team_id)
        .map(|r| state.join_request_json(r))
        .collect();
    HttpResponse::Ok().json(requests)
}

#[patch("/join-requests/{id}/status/")]
async fn update_join_request_status(
    req: HttpRequest,
    data: SharedState,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, body.0.clone()) {
        return failure;
    }
    let viewer = match viewer(&state, &req) {
        Some(id) => id,
        None => return unauthorized(),
    };

    let request_id = path.into_inner();
    let index = match state.join_requests.iter().position(|r| r.id == request_id) {
        Some(index) => index,
        None => return HttpResponse::NotFound().json(json!({"error": "Join request not found"})),
    };
    let request = state.join_requests[index].clone();
    let team_index = match state.teams.iter().position(|t| t.id == request.team_id) {
        Some(index) => index,
        None => return HttpResponse::NotFound().json(json!({"error": "Team application not found"})),
    };

    if state.teams[team_index].leader_user_id != viewer {
        return HttpResponse::Forbidden().json(json!({"error": "Only the team leader can update the request status"}));
    }
    if request.status != "pending" {
        return HttpResponse::BadRequest().json(json!({"error": format!("Request already {}", request.status)}));
    }

    let status = body["status"].as_str().unwrap_or_default().to_string();
    match status.as_str() {
        "accepted" => {
            let team = &mut state.teams[team_index];
            if team.capacity_left == 0 {
                return HttpResponse::BadRequest().json(json!({"error": "Team is already full"}));
            }
            team.member_user_ids.push(request.user_id);
            team.capacity_left -= 1;
        }
        "rejected" => {}
        _ => {
            return HttpResponse::BadRequest()
                .json(json!({"status": ["Status must be either 'accepted' or 'rejected'."]}))
        }
    }

    state.join_requests[index].status = status.clone();
    HttpResponse::Ok().json(json!({"message": format!("Request {} successfully", status)}))
}

#[get("/notifications/")]
async fn list_notifications(req: HttpRequest, data: SharedState) -> HttpResponse {
    let mut state = data.lock().unwrap();
    if let Some(failure) = record(&mut state, &req, Value::Null) {
        return failure;
    }
    let viewer = match viewer(&state, &req) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({"error": "Missing token"})),
    };

    let notifications = state.notifications.get(&viewer).cloned().unwrap_or_default();
    HttpResponse::Ok().json(notifications)
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(register)
        .service(get_user)
        .service(list_team_applications)
        .service(create_team_application)
        .service(get_team)
        .service(list_my_teams)
        .service(create_join_request)
        .service(list_join_requests)
        .service(update_join_request_status)
        .service(list_notifications);
}

pub struct TestBackend {
    pub base_url: String,
    pub state: SharedState,
    _session_dir: tempfile::TempDir,
    pub session_path: std::path::PathBuf,
}

impl TestBackend {
    pub async fn start(state: FakeState) -> Self {
        let data: SharedState = web::Data::new(Mutex::new(state));
        let app_data = data.clone();

        let server = HttpServer::new(move || App::new().app_data(app_data.clone()).configure(init_routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        let session_dir = tempfile::tempdir().unwrap();
        let session_path = session_dir.path().join("session.json");

        Self {
            base_url: format!("http://{}", addr),
            state: data,
            _session_dir: session_dir,
            session_path,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            request_timeout: Duration::from_secs(5),
            max_retries: 0,
            session_path: self.session_path.clone(),
            ..Config::single_host(&self.base_url)
        }
    }

    pub fn api(&self) -> HackmateApi {
        HackmateApi::new(&self.config()).unwrap()
    }

    pub fn api_with_timeout(&self, request_timeout: Duration, max_retries: u32) -> HackmateApi {
        HackmateApi::new(&Config {
            request_timeout,
            max_retries,
            ..self.config()
        })
        .unwrap()
    }

    pub fn stall(&self, path: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .stalls
            .insert(path.to_string(), delay);
    }

    pub fn api_with_retries(&self, max_retries: u32) -> HackmateApi {
        HackmateApi::new(&Config {
            max_retries,
            ..self.config()
        })
        .unwrap()
    }

    pub fn signed_out(&self) -> SessionStore {
        SessionStore::empty(&self.session_path)
    }

    // A session for one of the seeded users, without going through /login/
    pub fn signed_in_as(&self, user_id: i64) -> SessionStore {
        let state = self.state.lock().unwrap();
        let user: hackmate::models::User = serde_json::from_value(state.user_json(user_id)).unwrap();
        drop(state);

        let mut session = SessionStore::empty(&self.session_path);
        session.login(user, format!("t{}", user_id));
        session
    }

    pub fn log(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.lock().unwrap().log.clear();
    }

    pub fn inject_failure(&self, path: &str, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((path.to_string(), status));
    }
}
