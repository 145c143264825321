use reqwest::{header, Client, Response};
use thiserror::Error;

use super::types::*;
use crate::config::Config;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("course id is empty")]
    EmptyCourseId,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API request failed: {status} - {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },
}

impl ScheduleError {
    /// Server unreachable rather than refusing the request
    pub fn is_offline(&self) -> bool {
        match self {
            ScheduleError::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Text shown under the course id field when adding fails
    pub fn add_failure_message(&self) -> String {
        match self {
            ScheduleError::EmptyCourseId => "Enter a course ID.".to_string(),
            ScheduleError::Api { message: Some(msg), .. } => {
                let lower = msg.to_lowercase();
                if lower.contains("already") || lower.contains("exists") {
                    "Course already added to your schedule.".to_string()
                } else {
                    msg.clone()
                }
            }
            ScheduleError::Api { message: None, .. } => "Could not find course.".to_string(),
            ScheduleError::Request(_) => "Sorry, something went wrong adding this course.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

pub struct ScheduleClient {
    client: Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Enrolled courses for the session's user and semester
    pub async fn get_schedule(&self, session: &Session) -> Result<ScheduleResponse> {
        self.get(&schedule_query(session)).await
    }

    /// Add a course by code; the server answers with the updated schedule
    pub async fn add_course(&self, session: &Session, course_id: &str) -> Result<ScheduleResponse> {
        let course_id = normalize_course_id(course_id);
        if course_id.is_empty() {
            return Err(ScheduleError::EmptyCourseId);
        }
        log::info!("adding {} to {}", course_id, session.current_semester());
        self.post("/api/schedule/add", &CourseRequest::new(session, &course_id)).await
    }

    /// Drop a course; dropping one that isn't enrolled is not an error
    pub async fn drop_course(&self, session: &Session, course_id: &str) -> Result<ScheduleResponse> {
        let course_id = normalize_course_id(course_id);
        if course_id.is_empty() {
            return Err(ScheduleError::EmptyCourseId);
        }
        log::info!("dropping {} from {}", course_id, session.current_semester());
        self.post("/api/schedule/drop", &CourseRequest::new(session, &course_id)).await
    }
}

/// Path and query for GET /api/schedule; userId is left out when signed out
fn schedule_query(session: &Session) -> String {
    let mut params = Vec::new();
    if let Some(user_id) = session.user_id() {
        params.push(format!("userId={}", urlencoding::encode(user_id)));
    }
    params.push(format!("semester={}", urlencoding::encode(session.current_semester().label())));
    format!("/api/schedule?{}", params.join("&"))
}

async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = parse_error_message(&body);
    log::warn!("schedule API returned {}: {}", status, body);
    Err(ScheduleError::Api { status, message })
}

/// `{"error": "..."}` when the server sent one, otherwise the raw body if any
fn parse_error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.filter(|e| !e.trim().is_empty()),
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}
