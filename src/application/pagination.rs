use crate::ports::outbound::ServiceSession;
use crate::sbom_reporting::domain::ResourcePage;
use crate::shared::error::ServiceError;
use serde::de::DeserializeOwned;

/// Items requested per page from collection endpoints
pub const PAGE_SIZE: usize = 100;

/// Fetches every item of a paginated collection
///
/// Pages are requested with `limit`/`offset` until `totalCount` items were
/// collected or the server returns a short page.
pub fn collect_all<S, T>(session: &S, path: &str, accept: &str) -> Result<Vec<T>, ServiceError>
where
    S: ServiceSession + ?Sized,
    T: DeserializeOwned,
{
    let separator = if path.contains('?') { '&' } else { '?' };
    let mut items: Vec<T> = Vec::new();

    loop {
        let page_path = format!(
            "{}{}limit={}&offset={}",
            path,
            separator,
            PAGE_SIZE,
            items.len()
        );
        let response = session.get(&page_path, accept)?.error_for_status(path)?;
        let page: ResourcePage<T> = response.json(path)?;

        let received = page.items.len();
        items.extend(page.items);

        let total = page.total_count.unwrap_or(items.len());
        if received == 0 || received < PAGE_SIZE || items.len() >= total {
            return Ok(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ApiResponse;
    use std::cell::RefCell;

    /// Serves `total` numbered items in pages, recording requested paths
    struct PagedSession {
        total: usize,
        requests: RefCell<Vec<String>>,
    }

    impl ServiceSession for PagedSession {
        fn get(&self, path: &str, _accept: &str) -> Result<ApiResponse, ServiceError> {
            self.requests.borrow_mut().push(path.to_string());
            let offset: usize = path
                .rsplit("offset=")
                .next()
                .and_then(|value| value.parse().ok())
                .unwrap_or(0);
            let items: Vec<usize> = (offset..self.total.min(offset + PAGE_SIZE)).collect();
            Ok(ApiResponse::new(200)
                .with_json(&serde_json::json!({"totalCount": self.total, "items": items})))
        }

        fn post_json(
            &self,
            _path: &str,
            _accept: &str,
            _body: &serde_json::Value,
        ) -> Result<ApiResponse, ServiceError> {
            unreachable!("pagination never posts")
        }
    }

    #[test]
    fn test_collect_all_follows_offsets() {
        let session = PagedSession {
            total: 250,
            requests: RefCell::new(Vec::new()),
        };

        let items: Vec<usize> =
            collect_all(&session, "/api/projects?q=name:Demo", "application/json").unwrap();

        assert_eq!(items.len(), 250);
        assert_eq!(items[249], 249);
        assert_eq!(
            *session.requests.borrow(),
            vec![
                "/api/projects?q=name:Demo&limit=100&offset=0",
                "/api/projects?q=name:Demo&limit=100&offset=100",
                "/api/projects?q=name:Demo&limit=100&offset=200",
            ]
        );
    }

    #[test]
    fn test_collect_all_single_short_page() {
        let session = PagedSession {
            total: 2,
            requests: RefCell::new(Vec::new()),
        };

        let items: Vec<usize> =
            collect_all(&session, "/api/projects/p/versions", "application/json").unwrap();

        assert_eq!(items, vec![0, 1]);
        assert_eq!(session.requests.borrow().len(), 1);
        assert!(session.requests.borrow()[0].starts_with("/api/projects/p/versions?limit="));
    }

    #[test]
    fn test_collect_all_propagates_status() {
        struct Forbidden;
        impl ServiceSession for Forbidden {
            fn get(&self, _path: &str, _accept: &str) -> Result<ApiResponse, ServiceError> {
                Ok(ApiResponse::new(403).with_body("denied"))
            }
            fn post_json(
                &self,
                _path: &str,
                _accept: &str,
                _body: &serde_json::Value,
            ) -> Result<ApiResponse, ServiceError> {
                unreachable!()
            }
        }

        let result: Result<Vec<serde_json::Value>, _> =
            collect_all(&Forbidden, "/api/projects", "application/json");
        assert!(matches!(
            result,
            Err(ServiceError::UnexpectedStatus { status: 403, .. })
        ));
    }
}
