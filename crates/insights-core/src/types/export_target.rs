//! Export target type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// The report to render: a workspace (GoodData project) and a report object
/// inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportTarget {
    workspace_id: String,
    object_id: String,
}

impl ExportTarget {
    /// Create a new export target, validating both ids.
    ///
    /// Both ids end up as path segments, so they must be non-empty and must
    /// not contain `/` or whitespace.
    pub fn new(workspace_id: impl Into<String>, object_id: impl Into<String>) -> Result<Self, Error> {
        let workspace_id = workspace_id.into();
        let object_id = object_id.into();

        if let Some(reason) = segment_problem(&workspace_id) {
            return Err(InvalidInputError::Workspace {
                value: workspace_id,
                reason: reason.to_string(),
            }
            .into());
        }
        if let Some(reason) = segment_problem(&object_id) {
            return Err(InvalidInputError::ObjectId {
                value: object_id,
                reason: reason.to_string(),
            }
            .into());
        }

        Ok(Self {
            workspace_id,
            object_id,
        })
    }

    /// Returns the workspace id.
    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Returns the report object id.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Path of the raw-execution endpoint for this workspace.
    pub fn execute_path(&self) -> String {
        format!("/gdc/app/projects/{}/execute/raw", self.workspace_id)
    }

    /// Metadata path identifying the report object, as sent in `report_req`.
    pub fn report_path(&self) -> String {
        format!("/gdc/md/{}/obj/{}", self.workspace_id, self.object_id)
    }
}

fn segment_problem(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("must not be empty")
    } else if value.contains('/') {
        Some("must not contain '/'")
    } else if value.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else {
        None
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace_id, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_protocol_paths() {
        let target = ExportTarget::new("abcd", "9999").unwrap();
        assert_eq!(target.execute_path(), "/gdc/app/projects/abcd/execute/raw");
        assert_eq!(target.report_path(), "/gdc/md/abcd/obj/9999");
    }

    #[test]
    fn rejects_empty_ids() {
        assert!(ExportTarget::new("", "1").is_err());
        assert!(ExportTarget::new("ws", "").is_err());
    }

    #[test]
    fn rejects_path_separators_and_spaces() {
        assert!(ExportTarget::new("ws/../x", "1").is_err());
        assert!(ExportTarget::new("ws", "1 2").is_err());
    }
}
