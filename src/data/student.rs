use crate::validation::{FieldErrors, STUDENT_RULES, check};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub registration_number: i32,
    pub name: String,
    pub last_name: String,
    pub status: Option<String>,
}

impl Student {
    pub fn from_fields(
        id: i32,
        StudentFields {
            registration_number,
            name,
            last_name,
            status,
        }: StudentFields,
    ) -> Self {
        Self {
            id,
            registration_number,
            name,
            last_name,
            status,
        }
    }
}

/// A validated student without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub registration_number: i32,
    pub name: String,
    pub last_name: String,
    pub status: Option<String>,
}

/// The only request parameters the create and upsert routes look at.
#[derive(Debug, Default, Clone)]
pub struct StudentParams {
    pub registration_number: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub status: Option<String>,
}

impl StudentParams {
    /// Picks the whitelisted keys out of decoded pairs. A repeated key keeps its last value,
    /// anything not whitelisted is dropped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "registration_number" => &mut params.registration_number,
                "name" => &mut params.name,
                "last_name" => &mut params.last_name,
                "status" => &mut params.status,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }

    /// Values supplied in `other` win.
    pub fn overridden_by(self, other: Self) -> Self {
        Self {
            registration_number: other.registration_number.or(self.registration_number),
            name: other.name.or(self.name),
            last_name: other.last_name.or(self.last_name),
            status: other.status.or(self.status),
        }
    }
}

/// Unvalidated attributes, as they would be written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub registration_number: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub status: Option<String>,
}

impl From<Student> for StudentDraft {
    fn from(
        Student {
            registration_number,
            name,
            last_name,
            status,
            ..
        }: Student,
    ) -> Self {
        Self {
            registration_number: Some(registration_number.to_string()),
            name: Some(name),
            last_name: Some(last_name),
            status,
        }
    }
}

impl StudentDraft {
    /// Supplied params replace the current attributes, everything else is left alone.
    #[must_use]
    pub fn merge(self, params: StudentParams) -> Self {
        let StudentParams {
            registration_number,
            name,
            last_name,
            status,
        } = params;

        Self {
            registration_number: registration_number.or(self.registration_number),
            name: name.or(self.name),
            last_name: last_name.or(self.last_name),
            status: status.or(self.status),
        }
    }

    pub fn validate(self) -> Result<StudentFields, FieldErrors> {
        let errors = check(&self, STUDENT_RULES);

        match self {
            Self {
                registration_number: Some(registration_number),
                name: Some(name),
                last_name: Some(last_name),
                status,
            } if errors.is_empty() => match registration_number.parse() {
                Ok(registration_number) => Ok(StudentFields {
                    registration_number,
                    name,
                    last_name,
                    status,
                }),
                Err(_) => Err(errors),
            },
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    fn params(pairs: &[(&str, &str)]) -> StudentParams {
        StudentParams::from_pairs(
            pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string())),
        )
    }

    #[test]
    fn merge_keeps_unsupplied_attributes() {
        let existing = Student {
            id: 3,
            registration_number: 123_456,
            name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            status: Some("enrolled".to_string()),
        };

        let fields = StudentDraft::from(existing)
            .merge(params(&[("name", "Augusta")]))
            .validate()
            .unwrap();

        assert_eq!(
            Student::from_fields(3, fields),
            Student {
                id: 3,
                registration_number: 123_456,
                name: "Augusta".to_string(),
                last_name: "Lovelace".to_string(),
                status: Some("enrolled".to_string()),
            }
        );
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = StudentDraft::default().validate().unwrap_err();
        for field in [Field::RegistrationNumber, Field::Name, Field::LastName] {
            assert!(errors.get(field).is_some(), "{field:?} missing");
        }
        assert!(errors.get(Field::Status).is_none());
    }

    #[test]
    fn later_params_override_earlier_ones() {
        let query = params(&[("name", "Ada"), ("status", "new")]);
        let body = params(&[("name", "Grace")]);

        let merged = query.overridden_by(body);
        assert_eq!(merged.name.as_deref(), Some("Grace"));
        assert_eq!(merged.status.as_deref(), Some("new"));
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = params(&[
            ("name", "Ada"),
            ("status", "a"),
            ("favourite_colour", "green"),
            ("status", "b"),
        ]);

        assert_eq!(params.name.as_deref(), Some("Ada"));
        assert_eq!(params.status.as_deref(), Some("b"));
        assert_eq!(params.registration_number, None);
    }
}
