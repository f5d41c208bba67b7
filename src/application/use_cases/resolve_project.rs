use crate::application::pagination::collect_all;
use crate::ports::outbound::ServiceSession;
use crate::sbom_reporting::domain::{
    media_type, Project, ProjectResource, Version, VersionResource,
};
use crate::shared::error::ResolveError;

const PROJECTS_PATH: &str = "/api/projects";

/// ProjectResolver - finds or creates the project and version a run works on
///
/// Every failure here is fatal for the run: nothing downstream can proceed
/// without a project id and a version id.
pub struct ProjectResolver<'a, S: ?Sized> {
    session: &'a S,
}

impl<'a, S> ProjectResolver<'a, S>
where
    S: ServiceSession + ?Sized,
{
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// Creates a new project
    ///
    /// # Returns
    /// The `Location` of the created project, when the server sends one
    ///
    /// # Errors
    /// Returns `ProjectCreationRejected` for any non-2xx response
    pub fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<String>, ResolveError> {
        let payload = serde_json::json!({
            "name": name,
            "description": description,
            "projectLevelAdjustments": true,
        });

        let response = self
            .session
            .post_json(PROJECTS_PATH, media_type::PROJECT, &payload)?;

        if !response.is_success() {
            let body = response.text();
            tracing::error!(
                "Error creating project '{}' (HTTP {}): {}",
                name,
                response.status,
                body
            );
            return Err(ResolveError::ProjectCreationRejected {
                name: name.to_string(),
                status: response.status,
                body,
            });
        }

        let location = response.header("location").map(str::to_string);
        match &location {
            Some(location) => tracing::info!("Created project: {}", location),
            None => tracing::info!("Created project: {}", name),
        }
        Ok(location)
    }

    /// Finds a project by its exact name
    ///
    /// The server's name filter may match substrings, so each candidate's
    /// name is compared again before it is accepted.
    pub fn find_project(&self, name: &str) -> Result<Project, ResolveError> {
        let query = format!("name:{}", name);
        let path = format!("{}?q={}", PROJECTS_PATH, urlencoding::encode(&query));

        let candidates: Vec<ProjectResource> =
            collect_all(self.session, &path, media_type::PROJECT)?;

        let project = candidates
            .into_iter()
            .filter(|candidate| candidate.name == name)
            .find_map(ProjectResource::into_project);

        match project {
            Some(project) => {
                tracing::info!("Found project: {} ({})", project.name, project.id);
                Ok(project)
            }
            None => {
                tracing::error!("Project '{}' not found.", name);
                Err(ResolveError::ProjectNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Resolves a version of the project
    ///
    /// With a name, the version whose `versionName` matches exactly is
    /// returned. Without one, the first version in the server's order is
    /// used, which is not necessarily the newest.
    pub fn resolve_version(
        &self,
        project: &Project,
        version_name: Option<&str>,
    ) -> Result<Version, ResolveError> {
        let resources: Vec<VersionResource> =
            collect_all(self.session, &project.versions_path(), media_type::JSON)?;
        let versions: Vec<Version> = resources
            .into_iter()
            .filter_map(VersionResource::into_version)
            .collect();

        if versions.is_empty() {
            tracing::error!("No versions found for the project.");
            return Err(ResolveError::NoVersions {
                project: project.name.clone(),
            });
        }

        let selected = match version_name {
            Some(wanted) => versions.into_iter().find(|v| v.version_name == wanted),
            None => versions.into_iter().next(),
        };

        match selected {
            Some(version) => {
                tracing::info!("Version ID: {} ({})", version.id, version.version_name);
                Ok(version)
            }
            None => {
                let wanted = version_name.unwrap_or_default().to_string();
                tracing::error!("Version '{}' not found.", wanted);
                Err(ResolveError::VersionNotFound {
                    project: project.name.clone(),
                    version: wanted,
                })
            }
        }
    }
}
