//! Implements the Wiki trait for Confluence
use async_trait::async_trait;
use log::*;
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Result,
    config::Config,
    error::DevflowError,
    wiki::{
        traits::Wiki,
        types::{
            Page, PageBody, PageSearchResponse, PageUpdate, PageVersion,
            STORAGE_REPRESENTATION, SpaceKey, StorageBody,
        },
    },
};

/// Confluence client scoped to a single space.
pub struct ConfluenceClient {
    client: Client,
    base_url: Url,
    user: String,
    password: SecretString,
    space_key: String,
}

impl ConfluenceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.server.base_url(&config.confluence.path)?,
            user: config.server.user.clone(),
            password: config.server.password.clone(),
            space_key: config.confluence.space_key.clone(),
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.user, Some(self.password.expose_secret()))
    }
}

#[async_trait]
impl Wiki for ConfluenceClient {
    async fn get_page(&self, title: &str) -> Result<Page> {
        let mut url = self.base_url.join("rest/api/content")?;
        url.query_pairs_mut()
            .append_pair("spaceKey", &self.space_key)
            .append_pair("title", title)
            .append_pair("expand", "body.storage,version");

        debug!("fetching wiki page \"{title}\" in space {}", self.space_key);
        let response = self.request(Method::GET, url).send().await?;
        let search: PageSearchResponse =
            response.error_for_status()?.json().await?;

        search
            .results
            .into_iter()
            .next()
            .ok_or_else(|| DevflowError::PageNotFound(title.into()))
    }

    async fn update_page(&self, page: &Page, content: &str) -> Result<Page> {
        let url = self.base_url.join(&format!("rest/api/content/{}", page.id))?;

        let update = PageUpdate {
            id: page.id.clone(),
            kind: "page".into(),
            title: page.title.clone(),
            space: SpaceKey {
                key: self.space_key.clone(),
            },
            version: PageVersion {
                number: page.version.number + 1,
            },
            body: PageBody {
                storage: StorageBody {
                    value: content.into(),
                    representation: STORAGE_REPRESENTATION.into(),
                },
            },
        };

        info!(
            "updating wiki page \"{}\" to version {}",
            page.title, update.version.number
        );

        let response =
            self.request(Method::PUT, url).json(&update).send().await?;
        let updated: Page = response.error_for_status()?.json().await?;

        Ok(updated)
    }

    fn page_url(&self, page: &Page) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{}", page.links.webui)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path, query_param},
    };

    use super::*;
    use crate::{
        test_helpers::{TEST_BASIC_AUTH, create_test_config_for},
        wiki::append_to_page,
    };

    fn page_json(version: u64, body: &str) -> serde_json::Value {
        json!({
            "id": "65538",
            "type": "page",
            "title": "Release notes",
            "version": { "number": version },
            "body": {
                "storage": { "value": body, "representation": "storage" }
            },
            "_links": { "webui": "/display/ENG/Release+notes" }
        })
    }

    #[tokio::test]
    #[test_log::test]
    async fn finds_page_by_title() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content"))
            .and(query_param("spaceKey", "ENG"))
            .and(query_param("title", "Release notes"))
            .and(query_param("expand", "body.storage,version"))
            .and(header("Authorization", TEST_BASIC_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [page_json(3, "<p>old</p>")],
                "size": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ConfluenceClient::new(&create_test_config_for(&server.uri()))
                .unwrap();
        let page = client.get_page("Release notes").await.unwrap();

        assert_eq!(page.id, "65538");
        assert_eq!(page.version.number, 3);
        assert_eq!(page.body.storage.value, "<p>old</p>");
    }

    #[tokio::test]
    #[test_log::test]
    async fn empty_search_is_page_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [], "size": 0 })),
            )
            .mount(&server)
            .await;

        let client =
            ConfluenceClient::new(&create_test_config_for(&server.uri()))
                .unwrap();
        let result = client.get_page("Missing").await;

        assert!(
            matches!(result, Err(DevflowError::PageNotFound(title)) if title == "Missing")
        );
    }

    #[tokio::test]
    #[test_log::test]
    async fn prepends_release_note_with_bumped_version() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wiki/rest/api/content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [page_json(3, "<p>old</p>")]
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/wiki/rest/api/content/65538"))
            .and(body_partial_json(json!({
                "id": "65538",
                "type": "page",
                "title": "Release notes",
                "space": { "key": "ENG" },
                "version": { "number": 4 },
                "body": {
                    "storage": {
                        "value": "<h2>new</h2><p>old</p>",
                        "representation": "storage"
                    }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(4, "<h2>new</h2><p>old</p>")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ConfluenceClient::new(&create_test_config_for(&server.uri()))
                .unwrap();

        let url = append_to_page(&client, "Release notes", "<h2>new</h2>")
            .await
            .unwrap();

        assert_eq!(
            url,
            format!("{}/wiki/display/ENG/Release+notes", server.uri())
        );
    }
}
