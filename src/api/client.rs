use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::ApiError;
use crate::api::models::{
    BusinessPage, BusinessQuery, CampaignPage, CampaignPreview, NewCampaign, PreviewRequest,
    ScanAllResponse, ScanStatus, SendCampaignRequest, UploadResponse,
};

/// Thin typed wrapper over the outreach REST API.
///
/// Cloning is cheap; every view holds its own clone and issues its own requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_http(HttpClient::new(), base_url)
    }

    pub fn with_http(http: HttpClient, base_url: &str) -> Result<Self, ApiError> {
        // `Url::join` drops the last path segment unless it ends with a slash.
        let mut base = base_url.trim().trim_end_matches('/').to_string();
        base.push('/');
        Ok(Self {
            http,
            base: Url::parse(&base)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Like `decode`, but tolerates an empty 2xx body.
    async fn expect_success(resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn businesses(&self, query: &BusinessQuery) -> Result<BusinessPage, ApiError> {
        let mut url = self.endpoint("businesses")?;
        url.query_pairs_mut().extend_pairs(query.pairs());
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }

    /// Total number of businesses, read from the first listing page.
    pub async fn business_count(&self) -> Result<u64, ApiError> {
        let url = self.endpoint("businesses")?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        let page: BusinessPage = Self::decode(resp).await?;
        Ok(page.total_items)
    }

    pub async fn upload_businesses(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint("businesses/upload")?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);
        info!("uploading {file_name} to {url}");
        let resp = self.http.post(url).multipart(form).send().await?;
        Self::decode(resp).await
    }

    pub async fn campaigns(&self) -> Result<CampaignPage, ApiError> {
        let url = self.endpoint("campaigns")?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Value, ApiError> {
        let url = self.endpoint("campaigns")?;
        info!("creating campaign {:?}", campaign.name);
        let resp = self.http.post(url).json(campaign).send().await?;
        Self::expect_success(resp).await
    }

    pub async fn send_campaign(
        &self,
        campaign_id: i64,
        request: &SendCampaignRequest,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(&format!("campaigns/{campaign_id}/send"))?;
        info!("sending campaign {campaign_id} via {:?}", request.platforms);
        let resp = self.http.post(url).json(request).send().await?;
        Self::expect_success(resp).await
    }

    pub async fn preview_campaign(
        &self,
        campaign_id: i64,
        request: &PreviewRequest,
    ) -> Result<CampaignPreview, ApiError> {
        let url = self.endpoint(&format!("campaigns/{campaign_id}/preview"))?;
        let resp = self.http.post(url).json(request).send().await?;
        Self::decode(resp).await
    }

    pub async fn scan_status(&self) -> Result<ScanStatus, ApiError> {
        let url = self.endpoint("scan/status")?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn scan_all_pending(&self) -> Result<ScanAllResponse, ApiError> {
        let url = self.endpoint("scan/all-pending")?;
        info!("starting bulk scan");
        let resp = self.http.post(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn scan_business(&self, business_id: i64) -> Result<Value, ApiError> {
        let url = self.endpoint(&format!("scan/business/{business_id}"))?;
        info!("scanning business {business_id}");
        let resp = self.http.post(url).send().await?;
        Self::expect_success(resp).await
    }

    /// Campaign performance as CSV text, covering the last `date_range_days` days.
    pub async fn export_analytics(&self, date_range_days: u32) -> Result<String, ApiError> {
        let mut url = self.endpoint("analytics/export")?;
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("date_range", &date_range_days.to_string());
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_the_api_prefix() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.endpoint("/campaigns/4/send").unwrap().as_str(),
            "http://localhost:5000/api/campaigns/4/send"
        );
    }

    #[test]
    fn rejects_unparsable_base() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
