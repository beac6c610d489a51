//! Record and key types

use serde::{Deserialize, Serialize};

/// Attribute names as persisted by the store
pub mod fields {
    pub const SCHOOL_ID: &str = "schoolId";
    pub const SCHOOL_NAME: &str = "schoolName";
    pub const STUDENT_ID: &str = "studentId";
    pub const STUDENT_FIRST_NAME: &str = "studentFirstName";
    pub const STUDENT_LAST_NAME: &str = "studentLastName";
    pub const STUDENT_GRADE: &str = "studentGrade";

    /// Every attribute a write must carry, in reporting order
    pub const ALL: [&str; 6] = [
        SCHOOL_ID,
        SCHOOL_NAME,
        STUDENT_ID,
        STUDENT_FIRST_NAME,
        STUDENT_LAST_NAME,
        STUDENT_GRADE,
    ];

    /// Attributes that must hold canonical UUID text
    pub const UUID: [&str; 2] = [SCHOOL_ID, STUDENT_ID];
}

/// Composite primary key of a student record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentKey {
    /// Partition key
    pub school_id: String,
    /// Range key
    pub student_id: String,
}

impl StudentKey {
    pub fn new(school_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            student_id: student_id.into(),
        }
    }
}

/// A persisted student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub school_id: String,
    pub school_name: String,
    pub student_id: String,
    pub student_first_name: String,
    pub student_last_name: String,
    pub student_grade: String,
}

impl StudentRecord {
    /// Returns the composite key identifying this record
    pub fn key(&self) -> StudentKey {
        StudentKey::new(&self.school_id, &self.student_id)
    }

    /// Returns the value of a string attribute by its persisted name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            fields::SCHOOL_ID => Some(&self.school_id),
            fields::SCHOOL_NAME => Some(&self.school_name),
            fields::STUDENT_ID => Some(&self.student_id),
            fields::STUDENT_FIRST_NAME => Some(&self.student_first_name),
            fields::STUDENT_LAST_NAME => Some(&self.student_last_name),
            fields::STUDENT_GRADE => Some(&self.student_grade),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StudentRecord {
        StudentRecord {
            school_id: "4f2a3c1e-8d9b-4a7e-9c1d-2b3e4f5a6b7c".into(),
            school_name: "Code Sample Academy".into(),
            student_id: "0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e".into(),
            student_first_name: "Jane".into(),
            student_last_name: "Doe".into(),
            student_grade: "8".into(),
        }
    }

    #[test]
    fn test_serializes_with_store_attribute_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        for name in fields::ALL {
            assert!(obj.contains_key(name), "missing {}", name);
        }
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn test_key_matches_record() {
        let record = sample();
        let key = record.key();
        assert_eq!(key.school_id, record.school_id);
        assert_eq!(key.student_id, record.student_id);
    }

    #[test]
    fn test_attribute_lookup() {
        let record = sample();
        assert_eq!(record.attribute("studentLastName"), Some("Doe"));
        assert_eq!(record.attribute("unknown"), None);
    }

    #[test]
    fn test_decode_rejects_missing_attribute() {
        let result: Result<StudentRecord, _> = serde_json::from_value(json!({
            "schoolId": "a",
            "studentId": "b"
        }));
        assert!(result.is_err());
    }
}
