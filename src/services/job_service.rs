//! Job posting creation.
//!
//! Validation runs fail-fast in a fixed order; the first violated rule is
//! the one reported.

use std::sync::Arc;

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::{JobPosting, JobType};
use crate::repositories::{JobRepository, UserRepository};
use crate::utils::object_id;
use crate::utils::validate::{
    escape, find_missing_params, is_alphanumeric, is_document_id, is_future, is_length,
    parse_iso8601, strip_whitespace,
};

const MISSING_FIELDS: &str = "Missing required fields: title, description, skillsRequired, deadline, and userId are required.";
const INVALID_TITLE: &str = "Title must be a string between 5 and 100 characters.";
const INVALID_DESCRIPTION: &str = "Description must be a string with at least 10 characters.";
const INVALID_SKILLS: &str = "SkillsRequired must be an array of alphanumeric strings.";
const INVALID_DEADLINE: &str = "Deadline must be a valid future date.";
const INVALID_USER_ID: &str = "Invalid userId format.";
const INVALID_MAX_APPLICANTS: &str = "maxApplicants must be a positive integer.";

/// Typed job creation input, as built by in-process callers such as the CLI.
#[derive(Debug, Clone, Default)]
pub struct CreateJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills_required: Option<Vec<String>>,
    pub deadline: Option<String>,
    pub max_applicants: Option<i64>,
    pub job_type: Option<String>,
    pub user_id: Option<String>,
}

/// Untrusted job creation request body.
///
/// Fields keep whatever JSON type the client sent, so a wrong type is
/// reported by the validation rule for that field rather than by the
/// deserializer. `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub skills_required: Option<Value>,
    #[serde(default)]
    pub deadline: Option<Value>,
    #[serde(default)]
    pub max_applicants: Option<Value>,
    #[serde(default, rename = "type")]
    pub job_type: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
}

impl From<CreateJobInput> for JobRequest {
    fn from(input: CreateJobInput) -> Self {
        Self {
            title: input.title.map(Value::from),
            description: input.description.map(Value::from),
            skills_required: input.skills_required.map(Value::from),
            deadline: input.deadline.map(Value::from),
            max_applicants: input.max_applicants.map(Value::from),
            job_type: input.job_type.map(Value::from),
            user_id: input.user_id.map(Value::from),
        }
    }
}

/// Fields that passed every input rule, already sanitized.
#[derive(Debug, Clone, PartialEq)]
struct ValidatedJob {
    title: String,
    description: String,
    skills_required: Vec<String>,
    deadline: Timestamp,
    max_applicants: Option<u32>,
    job_type: JobType,
    user_id: String,
}

/// Job service for validating and persisting new postings.
#[derive(Clone)]
pub struct JobCreationService {
    users: Arc<dyn UserRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl JobCreationService {
    /// Creates a new JobCreationService with the given repositories.
    pub fn new(users: Arc<dyn UserRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { users, jobs }
    }

    /// Validates and persists a new job posting.
    ///
    /// # Errors
    /// - `Validation` (400) for the first malformed or missing field
    /// - `NotFound` (404) when the posting user does not exist
    /// - store errors from either repository, unchanged
    pub async fn create_job(&self, input: CreateJobInput) -> AppResult<()> {
        self.create_job_from_request(input.into()).await
    }

    /// Same as [`create_job`](Self::create_job) for a raw request body.
    pub async fn create_job_from_request(&self, request: JobRequest) -> AppResult<()> {
        let job = validate_input(request, Timestamp::now())?;

        if self.users.find_by_id(&job.user_id).await?.is_none() {
            return Err(AppError::not_found("user", "id", job.user_id));
        }

        let posting = JobPosting {
            id: object_id::generate(),
            title: job.title,
            description: job.description,
            skills_required: job.skills_required,
            deadline: job.deadline,
            max_applicants: job.max_applicants,
            job_type: job.job_type,
            posted_by: job.user_id,
            created_at: Timestamp::now(),
        };
        self.jobs.save(&posting).await?;

        tracing::info!(
            user_id = %posting.posted_by,
            job_id = %posting.id,
            "User {} successfully posted a job",
            posting.posted_by
        );
        Ok(())
    }

    /// Lists the postings created by a user.
    pub async fn jobs_posted_by(&self, user_id: &str) -> AppResult<Vec<JobPosting>> {
        self.jobs.list_by_poster(user_id).await
    }
}

fn validate_input(request: JobRequest, now: Timestamp) -> AppResult<ValidatedJob> {
    let missing = find_missing_params(&[
        ("title", request.title.is_some()),
        ("description", request.description.is_some()),
        ("skillsRequired", request.skills_required.is_some()),
        ("deadline", request.deadline.is_some()),
        ("userId", request.user_id.is_some()),
    ]);
    let (Some(title), Some(description), Some(skills_required), Some(deadline), Some(user_id)) = (
        request.title,
        request.description,
        request.skills_required,
        request.deadline,
        request.user_id,
    ) else {
        return Err(AppError::validation(missing.join(", "), MISSING_FIELDS));
    };

    let title = title
        .as_str()
        .filter(|t| is_length(t, 5, Some(100)))
        .map(escape)
        .ok_or_else(|| AppError::validation("title", INVALID_TITLE))?;

    let description = description
        .as_str()
        .filter(|d| is_length(d, 10, None))
        .map(escape)
        .ok_or_else(|| AppError::validation("description", INVALID_DESCRIPTION))?;

    let skills_required = skills_required
        .as_array()
        .and_then(|skills| {
            skills
                .iter()
                .map(|skill| {
                    skill
                        .as_str()
                        .filter(|s| is_alphanumeric(&strip_whitespace(s)))
                        .map(str::to_string)
                })
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| AppError::validation("skillsRequired", INVALID_SKILLS))?;

    let deadline = deadline
        .as_str()
        .and_then(parse_iso8601)
        .filter(|ts| is_future(*ts, now))
        .ok_or_else(|| AppError::validation("deadline", INVALID_DEADLINE))?;

    let user_id = user_id
        .as_str()
        .filter(|id| is_document_id(id))
        .map(str::to_string)
        .ok_or_else(|| AppError::validation("userId", INVALID_USER_ID))?;

    let max_applicants = request
        .max_applicants
        .map(|n| {
            positive_u32(&n)
                .ok_or_else(|| AppError::validation("maxApplicants", INVALID_MAX_APPLICANTS))
        })
        .transpose()?;

    let job_type = request
        .job_type
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|label| label.parse::<JobType>().ok())
        .ok_or_else(|| {
            AppError::validation(
                "type",
                format!("Invalid job type. Available types: {}", JobType::available()),
            )
        })?;

    Ok(ValidatedJob {
        title,
        description,
        skills_required,
        deadline,
        max_applicants,
        job_type,
        user_id,
    })
}

/// A JSON number with no fractional part, in `1..=u32::MAX`.
///
/// `5.0` counts as an integer; strings never do.
fn positive_u32(value: &Value) -> Option<u32> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))? as u64,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repositories::MemoryStore;
    use crate::services::test_support::{FailingJobRepository, RecordingUserRepository};
    use axum::http::StatusCode;
    use proptest::prelude::*;

    const POSTER_ID: &str = "64b7f0c2a1e4d3b2c1a09f8e";

    fn now() -> Timestamp {
        "2030-01-01T00:00:00Z".parse().unwrap()
    }

    fn valid_input() -> CreateJobInput {
        CreateJobInput {
            title: Some("Senior Rust Engineer".to_string()),
            description: Some("Own the <job board> matching pipeline".to_string()),
            skills_required: Some(vec!["Rust".to_string(), "Distributed Systems".to_string()]),
            deadline: Some("2999-06-30T12:00:00Z".to_string()),
            max_applicants: Some(25),
            job_type: Some("Computer Science & IT".to_string()),
            user_id: Some(POSTER_ID.to_string()),
        }
    }

    fn reason_of(result: AppResult<ValidatedJob>) -> (String, String) {
        match result {
            Err(AppError::Validation { field, reason }) => (field, reason),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    fn service_with_poster() -> (JobCreationService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.insert_user(User::new(POSTER_ID, "recruiter"));
        let service = JobCreationService::new(store.clone(), store.clone());
        (service, store)
    }

    #[test]
    fn test_valid_input_is_sanitized() {
        let job = validate_input(valid_input().into(), now()).unwrap();
        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.description, "Own the &lt;job board&gt; matching pipeline");
        assert_eq!(job.skills_required, vec!["Rust", "Distributed Systems"]);
        assert_eq!(job.deadline, "2999-06-30T12:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(job.max_applicants, Some(25));
        assert_eq!(job.job_type, JobType::ComputerScience);
    }

    #[test]
    fn test_missing_required_fields() {
        let input = CreateJobInput {
            deadline: None,
            user_id: None,
            ..valid_input()
        };
        let (field, reason) = reason_of(validate_input(input.into(), now()));
        assert_eq!(field, "deadline, userId");
        assert_eq!(reason, MISSING_FIELDS);

        let (_, reason) = reason_of(validate_input(CreateJobInput::default().into(), now()));
        assert_eq!(reason, MISSING_FIELDS);
    }

    #[test]
    fn test_max_applicants_is_optional() {
        let input = CreateJobInput {
            max_applicants: None,
            ..valid_input()
        };
        assert_eq!(validate_input(input.into(), now()).unwrap().max_applicants, None);
    }

    #[test]
    fn test_max_applicants_must_be_positive() {
        for bad in [0, -3, i64::from(u32::MAX) + 1] {
            let input = CreateJobInput {
                max_applicants: Some(bad),
                ..valid_input()
            };
            let (field, reason) = reason_of(validate_input(input.into(), now()));
            assert_eq!(field, "maxApplicants");
            assert_eq!(reason, INVALID_MAX_APPLICANTS);
        }
    }

    #[test]
    fn test_description_lower_bound() {
        let short = CreateJobInput {
            description: Some("too short".to_string()),
            ..valid_input()
        };
        assert_eq!(reason_of(validate_input(short.into(), now())).1, INVALID_DESCRIPTION);

        let exact = CreateJobInput {
            description: Some("ten chars!".to_string()),
            ..valid_input()
        };
        assert!(validate_input(exact.into(), now()).is_ok());
    }

    #[test]
    fn test_non_alphanumeric_skill_rejected() {
        let input = CreateJobInput {
            skills_required: Some(vec!["Rust".to_string(), "C++".to_string()]),
            ..valid_input()
        };
        let (field, reason) = reason_of(validate_input(input.into(), now()));
        assert_eq!(field, "skillsRequired");
        assert_eq!(reason, INVALID_SKILLS);
    }

    #[test]
    fn test_deadline_must_be_strictly_future() {
        for deadline in ["2030-01-01T00:00:00Z", "2029-12-31", "2020-05-05T10:00:00", "soon"] {
            let input = CreateJobInput {
                deadline: Some(deadline.to_string()),
                ..valid_input()
            };
            assert_eq!(reason_of(validate_input(input.into(), now())).1, INVALID_DEADLINE, "{deadline}");
        }

        let input = CreateJobInput {
            deadline: Some("2030-01-02".to_string()),
            ..valid_input()
        };
        let job = validate_input(input.into(), now()).unwrap();
        assert_eq!(job.deadline.to_string(), "2030-01-02T00:00:00Z");
    }

    #[test]
    fn test_user_id_format() {
        let input = CreateJobInput {
            user_id: Some("not-an-id".to_string()),
            ..valid_input()
        };
        assert_eq!(reason_of(validate_input(input.into(), now())).1, INVALID_USER_ID);
    }

    #[test]
    fn test_invalid_type_lists_every_label() {
        for job_type in [Some("Plumbing".to_string()), None] {
            let input = CreateJobInput {
                job_type,
                ..valid_input()
            };
            let (field, reason) = reason_of(validate_input(input.into(), now()));
            assert_eq!(field, "type");
            assert!(reason.starts_with("Invalid job type. Available types: "));
            for label in JobType::ALL {
                assert!(reason.contains(label.as_str()), "missing {}", label);
            }
        }
    }

    #[test]
    fn test_first_violation_wins() {
        let input = CreateJobInput {
            title: Some("abc".to_string()),
            deadline: Some("yesterday".to_string()),
            job_type: Some("Plumbing".to_string()),
            ..valid_input()
        };
        assert_eq!(reason_of(validate_input(input.into(), now())).0, "title");
    }

    fn request_with(field: &str, value: serde_json::Value) -> JobRequest {
        let mut body = serde_json::json!({
            "title": "Senior Rust Engineer",
            "description": "Own the job board matching pipeline",
            "skillsRequired": ["Rust"],
            "deadline": "2999-06-30T12:00:00Z",
            "type": "Computer Science & IT",
            "userId": POSTER_ID,
        });
        body[field] = value;
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_request_body_wrong_types_report_field_rules() {
        let cases = [
            ("maxApplicants", serde_json::json!(2.5), INVALID_MAX_APPLICANTS),
            ("maxApplicants", serde_json::json!("5"), INVALID_MAX_APPLICANTS),
            ("maxApplicants", serde_json::json!(-1), INVALID_MAX_APPLICANTS),
            ("skillsRequired", serde_json::json!(["Rust", 5]), INVALID_SKILLS),
            ("skillsRequired", serde_json::json!("Rust"), INVALID_SKILLS),
            ("title", serde_json::json!(12345), INVALID_TITLE),
            ("description", serde_json::json!(["long enough text"]), INVALID_DESCRIPTION),
            ("deadline", serde_json::json!(1893456000), INVALID_DEADLINE),
            ("userId", serde_json::json!(42), INVALID_USER_ID),
        ];
        for (field, value, expected) in cases {
            let err = validate_input(request_with(field, value.clone()), now()).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{field}: {value}");
            let (reported, reason) = reason_of(Err(err));
            assert_eq!(reported, field, "{value}");
            assert_eq!(reason, expected, "{field}: {value}");
        }

        let err = validate_input(request_with("type", serde_json::json!(3)), now()).unwrap_err();
        assert_eq!(reason_of(Err(err)).0, "type");
    }

    #[test]
    fn test_request_body_null_counts_as_missing() {
        let request = request_with("title", serde_json::Value::Null);
        let (field, reason) = reason_of(validate_input(request, now()));
        assert_eq!(field, "title");
        assert_eq!(reason, MISSING_FIELDS);
    }

    #[test]
    fn test_request_body_integral_float_accepted() {
        let request = request_with("maxApplicants", serde_json::json!(5.0));
        assert_eq!(validate_input(request, now()).unwrap().max_applicants, Some(5));
    }

    #[tokio::test]
    async fn test_create_job_from_request_body() {
        let (service, store) = service_with_poster();
        let request = request_with("maxApplicants", serde_json::json!(3));
        service.create_job_from_request(request).await.unwrap();
        assert_eq!(store.jobs()[0].max_applicants, Some(3));

        let err = service
            .create_job_from_request(request_with("maxApplicants", serde_json::json!("3")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(store.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_create_job_persists_posting() {
        let (service, store) = service_with_poster();
        service.create_job(valid_input()).await.unwrap();

        let jobs = store.jobs();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.posted_by, POSTER_ID);
        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.deadline, "2999-06-30T12:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(job.max_applicants, Some(25));
        assert!(is_document_id(&job.id));

        let listed = service.jobs_posted_by(POSTER_ID).await.unwrap();
        assert_eq!(listed, jobs);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = JobCreationService::new(store.clone(), store.clone());

        let err = service.create_job(valid_input()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "User not found.");
        assert!(store.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_skips_store() {
        let users = Arc::new(RecordingUserRepository::default());
        let service = JobCreationService::new(users.clone(), Arc::new(MemoryStore::new()));

        let input = CreateJobInput {
            title: None,
            ..valid_input()
        };
        let err = service.create_job(input).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(users.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let users = Arc::new(RecordingUserRepository::with_users([User::new(POSTER_ID, "recruiter")]));
        let service = JobCreationService::new(users, Arc::new(FailingJobRepository));

        let err = service.create_job(valid_input()).await.unwrap_err();
        assert!(matches!(err, AppError::Database { .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_title_length_bounds(len in 0usize..=130) {
            let input = CreateJobInput {
                title: Some("t".repeat(len)),
                ..valid_input()
            };
            let result = validate_input(input.into(), now());
            if (5..=100).contains(&len) {
                prop_assert!(result.is_ok());
            } else {
                let title_rejected =
                    matches!(result, Err(AppError::Validation { ref field, .. }) if field == "title");
                prop_assert!(title_rejected, "expected a title validation error");
            }
        }

        #[test]
        fn prop_skills_with_symbols_rejected(
            good in prop::collection::vec("[A-Za-z0-9 ]{0,6}[A-Za-z0-9]", 0..4),
            bad in "[A-Za-z0-9]{0,4}[-+#./]",
        ) {
            let mut skills = good;
            skills.push(bad);
            let input = CreateJobInput {
                skills_required: Some(skills),
                ..valid_input()
            };
            let skills_rejected = matches!(
                validate_input(input.into(), now()),
                Err(AppError::Validation { ref field, .. }) if field == "skillsRequired"
            );
            prop_assert!(skills_rejected, "expected a skillsRequired validation error");
        }
    }
}
