use async_trait::async_trait;
use catalog_core::{
    CatalogStore, Category, CategoryDraft, NewVariant, OptionService, OptionValue, ServiceError,
    Tag, TagDraft, Variant, VariantOption, VariantUpdate,
};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// REST client for the back-office catalog API.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::transport(format!("Invalid server URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<String, ServiceError> {
        let url = self.api_url(segments)?;
        debug!(method = %method, url = %url, "Sending request");
        let mut req = self
            .http
            .request(method, url)
            .header("Accept", "application/json");
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ServiceError::transport(format!("Failed to connect to server: {e}")))?;
        handle_response(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        let body = self.send(Method::GET, segments, None).await?;
        parse_body(&body)
    }

    async fn write<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)
            .map_err(|e| ServiceError::transport(format!("Failed to encode request: {e}")))?;
        let body = self.send(method, segments, Some(payload)).await?;
        parse_body(&body)
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), ServiceError> {
        self.send(Method::DELETE, segments, None).await.map(|_| ())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body)
        .map_err(|e| ServiceError::transport(format!("Failed to parse response JSON: {e}")))
}

async fn handle_response(resp: reqwest::Response) -> Result<String, ServiceError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.clone()
                }
            });
        return Err(ServiceError::new(status.as_u16(), message));
    }

    Ok(body)
}

#[async_trait]
impl CatalogStore for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.get(&["categories"]).await
    }

    async fn get_category(&self, id: &str) -> Result<Category, ServiceError> {
        self.get(&["categories", id]).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ServiceError> {
        self.write(Method::POST, &["categories"], draft).await
    }

    async fn update_category(
        &self,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<Category, ServiceError> {
        self.write(Method::PUT, &["categories", id], draft).await
    }

    async fn delete_category(&self, id: &str) -> Result<(), ServiceError> {
        self.delete(&["categories", id]).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        self.get(&["tags"]).await
    }

    async fn get_tag(&self, id: &str) -> Result<Tag, ServiceError> {
        self.get(&["tags", id]).await
    }

    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag, ServiceError> {
        self.write(Method::POST, &["tags"], draft).await
    }

    async fn update_tag(&self, id: &str, draft: &TagDraft) -> Result<Tag, ServiceError> {
        self.write(Method::PUT, &["tags", id], draft).await
    }

    async fn delete_tag(&self, id: &str) -> Result<(), ServiceError> {
        self.delete(&["tags", id]).await
    }

    async fn list_variants(&self) -> Result<Vec<Variant>, ServiceError> {
        self.get(&["variants"]).await
    }

    async fn get_variant(&self, id: &str) -> Result<Variant, ServiceError> {
        self.get(&["variants", id]).await
    }

    async fn create_variant(&self, variant: &NewVariant) -> Result<Variant, ServiceError> {
        self.write(Method::POST, &["variants"], variant).await
    }

    async fn update_variant(
        &self,
        id: &str,
        update: &VariantUpdate,
    ) -> Result<Variant, ServiceError> {
        self.write(Method::PUT, &["variants", id], update).await
    }

    async fn delete_variant(&self, id: &str) -> Result<(), ServiceError> {
        self.delete(&["variants", id]).await
    }
}

#[async_trait]
impl OptionService for CatalogClient {
    async fn add_option(
        &self,
        variant_id: &str,
        value: &str,
    ) -> Result<VariantOption, ServiceError> {
        let body = OptionValue {
            value: value.to_string(),
        };
        self.write(Method::POST, &["variants", variant_id, "options"], &body)
            .await
    }

    async fn remove_option(&self, variant_id: &str, option_id: &str) -> Result<(), ServiceError> {
        self.delete(&["variants", variant_id, "options", option_id])
            .await
    }
}
