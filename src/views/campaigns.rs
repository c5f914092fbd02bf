use crate::api::models::{
    Campaign, CampaignPreview, CampaignStatus, NewCampaign, PreviewRequest, SendCampaignRequest,
};
use crate::api::{ApiClient, ApiError};
use crate::metrics;

/// Tokens the backend substitutes when personalising a template.
pub const PLACEHOLDERS: [&str; 5] = [
    "{business_name}",
    "{website}",
    "{email}",
    "{phone}",
    "{address}",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub name: String,
    pub message_template: String,
}

impl CampaignForm {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.message_template.is_empty()
    }

    pub fn to_request(&self) -> Option<NewCampaign> {
        self.is_complete().then(|| NewCampaign {
            name: self.name.clone(),
            message_template: self.message_template.clone(),
        })
    }
}

/// Create-form state of the campaign page. The list itself lives in the page's fetch state.
#[derive(Debug, Clone, Default)]
pub struct CampaignListModel {
    pub form: CampaignForm,
    form_visible: bool,
    form_error: Option<String>,
    creating: bool,
}

impl CampaignListModel {
    pub fn open_form(&mut self) {
        self.form_visible = true;
    }

    pub fn cancel_form(&mut self) {
        self.form_visible = false;
        self.form_error = None;
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Create stays disabled while a POST is out, whatever happens to the inputs meanwhile.
    pub fn can_create(&self) -> bool {
        !self.creating && self.form.is_complete()
    }

    /// Marks a create as in flight and returns its request, or `None` if one is already out.
    pub fn begin_create(&mut self) -> Option<NewCampaign> {
        if self.creating {
            return None;
        }
        let request = self.form.to_request()?;
        self.creating = true;
        Some(request)
    }

    /// After a create attempt: success clears and hides the form, failure keeps it open.
    pub fn finish_create(&mut self, result: &Result<(), ApiError>) {
        self.creating = false;
        match result {
            Ok(()) => {
                self.form = CampaignForm::default();
                self.form_visible = false;
                self.form_error = None;
            }
            Err(err) => self.form_error = Some(err.to_string()),
        }
    }
}

pub async fn create(client: &ApiClient, request: &NewCampaign) -> Result<(), ApiError> {
    client.create_campaign(request).await.map(|_| ())
}

pub async fn send(client: &ApiClient, campaign_id: i64) -> Result<(), ApiError> {
    let request = SendCampaignRequest::email();
    client.send_campaign(campaign_id, &request).await.map(|_| ())
}

pub async fn preview(client: &ApiClient, campaign_id: i64) -> Result<CampaignPreview, ApiError> {
    client
        .preview_campaign(campaign_id, &PreviewRequest::default())
        .await
}

/// Only drafts can be sent; there is no way to stop a send once it starts.
pub fn can_send(campaign: &Campaign) -> bool {
    campaign.status == CampaignStatus::Draft
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRow {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub messages: String,
    pub success_rate: u32,
    pub created: String,
    pub can_send: bool,
}

pub fn rows(campaigns: &[Campaign]) -> Vec<CampaignRow> {
    campaigns
        .iter()
        .map(|c| {
            let summary = &c.messages_summary;
            CampaignRow {
                id: c.id,
                name: c.name.clone(),
                status: c.status.as_str().to_string(),
                messages: format!("{} sent of {} total", summary.sent, summary.total),
                success_rate: metrics::success_rate(summary),
                created: metrics::format_date(c.created_at.as_deref()),
                can_send: can_send(c),
            }
        })
        .collect()
}
