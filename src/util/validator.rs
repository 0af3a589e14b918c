use error_stack::Report;
use std::borrow::Cow;
use thiserror::Error;
use ::validator::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Turns a [`ValidateError`] into an error-stack report where every
/// message becomes one printable attachment prefixed with the dotted
/// path of its field (`db.primary.url: Invalid URL`).
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        self.map_err(|error| {
            let mut path = Vec::new();
            attach_errors(&error, &mut path, Report::new(Wrapper))
        })
    }
}

fn attach_errors<'a>(
    error: &'a ValidateError,
    path: &mut Vec<Cow<'a, str>>,
    mut report: Report<Wrapper>,
) -> Report<Wrapper> {
    match error {
        ValidateError::Fields(fields) => {
            for (field, data) in fields {
                path.push(Cow::Borrowed(field));
                report = attach_errors(data, path, report);
                path.pop();
            }
        }
        ValidateError::Messages(messages) => {
            let field = path.join(".");
            for message in messages {
                report = report.attach_printable(format!("{field}: {message}"));
            }
        }
        ValidateError::Slice(slice) => {
            for (index, element) in slice.iter().enumerate() {
                if let Some(element) = element {
                    path.push(Cow::Owned(index.to_string()));
                    report = attach_errors(element, path, report);
                    path.pop();
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_paths() {
        let mut primary = ValidateError::field_builder();
        primary.insert_message("url", "Invalid Postgres connection URL");
        let mut db = ValidateError::field_builder();
        db.insert("primary", primary.build());
        let mut root = ValidateError::field_builder();
        root.insert("db", db.build());

        let report = Err::<(), _>(root.build()).into_validator_report().unwrap_err();
        let rendered = format!("{report:?}");
        assert!(rendered.contains("db.primary.url: Invalid Postgres connection URL"));
    }
}
