//! Test fixtures with sample data.

use bws_sdk::{Project, Secret};
use chrono::{DateTime, TimeZone, Utc};

/// Organization id used by the fixtures.
pub const SAMPLE_ORGANIZATION_ID: &str = "org1";

/// Access token in the documented machine-account format.
pub const SAMPLE_ACCESS_TOKEN: &str =
    "0.ec2c1d46-6a4b-4751-a310-af9601317f2d.C2IgxjjLF7qSshsbwe8JGcbM075YXw:X8vbvA0bduihIDe/qrzIQQ==";

/// Midnight UTC on 2024-01-01.
#[must_use]
pub fn sample_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The project returned for `Create(name = "example")`.
#[must_use]
pub fn sample_project() -> Project {
    Project {
        id: "abc".to_string(),
        organization_id: SAMPLE_ORGANIZATION_ID.to_string(),
        name: "example".to_string(),
        creation_date: sample_timestamp(),
        revision_date: sample_timestamp(),
    }
}

/// A secret attached to [`sample_project`].
#[must_use]
pub fn sample_secret() -> Secret {
    Secret {
        id: "s1".to_string(),
        organization_id: SAMPLE_ORGANIZATION_ID.to_string(),
        project_id: Some("abc".to_string()),
        key: "DB_PASSWORD".to_string(),
        value: "correct-horse-battery-staple".to_string(),
        note: "rotated quarterly".to_string(),
        creation_date: sample_timestamp(),
        revision_date: sample_timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_project() {
        let project = sample_project();
        assert_eq!(project.name, "example");
        assert_eq!(project.creation_date, project.revision_date);
    }

    #[test]
    fn test_sample_secret_in_project() {
        let secret = sample_secret();
        assert_eq!(secret.project_id.as_deref(), Some(sample_project().id.as_str()));
    }

    #[test]
    fn test_sample_timestamp() {
        assert_eq!(sample_timestamp().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
