use super::resource::ResourceMeta;
use serde::Deserialize;

/// A project as returned by the project search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResource {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "_meta")]
    pub meta: Option<ResourceMeta>,
}

impl ProjectResource {
    /// Converts into a `Project`, or `None` when the resource has no usable link
    pub fn into_project(self) -> Option<Project> {
        let id = self.meta.as_ref()?.id()?.to_string();
        Some(Project {
            id,
            name: self.name,
            description: self.description,
        })
    }
}

/// Top-level named entity under which versions are tracked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Project {
    pub fn versions_path(&self) -> String {
        format!("/api/projects/{}/versions", self.id)
    }
}

/// A project version as returned by the version listing endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResource {
    pub version_name: String,
    #[serde(rename = "_meta")]
    pub meta: Option<ResourceMeta>,
}

impl VersionResource {
    pub fn into_version(self) -> Option<Version> {
        let id = self.meta.as_ref()?.id()?.to_string();
        Some(Version {
            id,
            version_name: self.version_name,
        })
    }
}

/// A tracked snapshot of a project, selected but never created by this tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub id: String,
    pub version_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_resource_into_project() {
        let resource: ProjectResource = serde_json::from_str(
            r#"{
                "name": "Demo",
                "description": "demo project",
                "_meta": {"href": "https://bd.example.com/api/projects/p-123"}
            }"#,
        )
        .unwrap();

        let project = resource.into_project().unwrap();
        assert_eq!(project.id, "p-123");
        assert_eq!(project.name, "Demo");
        assert_eq!(project.description.as_deref(), Some("demo project"));
        assert_eq!(project.versions_path(), "/api/projects/p-123/versions");
    }

    #[test]
    fn test_project_resource_without_meta() {
        let resource: ProjectResource = serde_json::from_str(r#"{"name": "Demo"}"#).unwrap();
        assert!(resource.into_project().is_none());
    }

    #[test]
    fn test_version_resource_into_version() {
        let resource: VersionResource = serde_json::from_str(
            r#"{
                "versionName": "2.0",
                "phase": "DEVELOPMENT",
                "_meta": {"href": "https://bd.example.com/api/projects/p-123/versions/v-9"}
            }"#,
        )
        .unwrap();

        let version = resource.into_version().unwrap();
        assert_eq!(version.id, "v-9");
        assert_eq!(version.version_name, "2.0");
    }
}
