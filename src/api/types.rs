use serde::{Deserialize, Serialize};

use crate::grid::CourseBlock;
use crate::session::Session;

/// Body of every schedule endpoint: the enrolled courses for one semester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub classes: Vec<CourseBlock>,
}

/// Add/drop request body
#[derive(Debug, Clone, Serialize)]
pub struct CourseRequest {
    #[serde(rename = "courseId")]
    pub course_id: String,
    pub semester: String,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CourseRequest {
    pub fn new(session: &Session, course_id: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            semester: session.current_semester().label().to_string(),
            user_id: session.user_id().map(String::from),
        }
    }
}

/// Error payload the server sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Course codes are stored upper-case: " math301 " -> "MATH301"
pub fn normalize_course_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Semester;

    #[test]
    fn request_omits_missing_user() {
        let session = Session::new(None, Semester::Spring2026);
        let body = serde_json::to_value(CourseRequest::new(&session, "ENGR110")).unwrap();
        assert_eq!(body, serde_json::json!({"courseId": "ENGR110", "semester": "Spring 2026"}));
    }

    #[test]
    fn request_includes_user() {
        let session = Session::new(Some("1234567".to_string()), Semester::Fall2025);
        let body = serde_json::to_value(CourseRequest::new(&session, "CS101")).unwrap();
        assert_eq!(body["userId"], "1234567");
        assert_eq!(body["semester"], "Fall 2025");
    }

    #[test]
    fn schedule_response_parses_server_payload() {
        let json = r#"{
            "semester": "Fall 2025",
            "classes": [{
                "_id": "65a1",
                "id": "ENGR110",
                "name": "Intro to Engineering",
                "professor": "Dr. Lee",
                "location": "ENG 101",
                "semester": "Fall 2025",
                "days": ["Mon", "Wed"],
                "start": "10:00 AM",
                "end": "11:15 AM",
                "createdAt": "2025-08-01T00:00:00Z"
            }]
        }"#;
        let response: ScheduleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.classes.len(), 1);
        assert_eq!(response.classes[0].location, "ENG 101");
        assert_eq!(response.classes[0].days, ["Mon", "Wed"]);
    }

    #[test]
    fn empty_schedule_payload() {
        let response: ScheduleResponse = serde_json::from_str(r#"{"semester":"Winter 2026"}"#).unwrap();
        assert!(response.classes.is_empty());
    }

    #[test]
    fn normalizes_course_ids() {
        assert_eq!(normalize_course_id("  math301 "), "MATH301");
        assert_eq!(normalize_course_id(""), "");
    }
}
