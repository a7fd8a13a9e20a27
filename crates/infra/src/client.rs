//! Client facade
//!
//! [`WorkwxClient`] owns the HTTP transport and settings shared by every
//! application; [`WorkwxApp`] binds them to one corp application and exposes
//! the platform operations.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;
use workwx_common::{Clock, SystemClock};
use workwx_domain::{
    ApiResult, AppCredentials, ChatInfo, CorpTagGroup, CredentialGrant, DeptInfo,
    ExternalContactInfo, ExternalContactRemark, Media, MediaType, MediaUploadResult,
    MessageContent, MessageRecipients, MessageSendResult, Tag, UserDetail, UserIdentityInfo,
    WorkwxConfig,
};

use crate::api::auth::{
    AccessTokenProvider, CachedAccessToken, GetAgentConfigTicket, GetJsapiTicket, TokenSource,
};
use crate::api::dispatcher::Dispatcher;
use crate::api::endpoints::appchat::{CreateAppchat, GetAppchat};
use crate::api::endpoints::department::ListDepts;
use crate::api::endpoints::external_contact::{
    AddCorpTag, DelCorpTag, EditCorpTag, GetExternalContact, ListCorpTags, ListExternalContacts,
    MarkExternalContactTag, RemarkExternalContact,
};
use crate::api::endpoints::media::{UploadPermanentImage, UploadTempMedia};
use crate::api::endpoints::message::{SendAppchatMessage, SendMessage};
use crate::api::endpoints::tag::{CreateTag, UpdateTag};
use crate::api::endpoints::user::{
    GetUser, GetUserIdByMobile, GetUserInfoByCode, ListUsersByDept,
};
use crate::api::request::parse_base_url;
use crate::credential::{CacheSettings, CredentialCache};
use crate::http::HttpClient;

const DEFAULT_USER_AGENT: &str = concat!("workwx-rs/", env!("CARGO_PKG_VERSION"));
const REFRESH_RETRY_BACKOFF: Duration = Duration::from_secs(60);
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Shared transport and settings
#[derive(Clone)]
pub struct WorkwxClient {
    http: HttpClient,
    base_url: Url,
    config: Arc<WorkwxConfig>,
    clock: Arc<dyn Clock>,
}

impl WorkwxClient {
    /// # Errors
    /// [`workwx_domain::ApiError::Config`] for invalid settings.
    pub fn new(config: WorkwxConfig) -> ApiResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Client whose credential expiry follows `clock`.
    ///
    /// # Errors
    /// See [`WorkwxClient::new`].
    pub fn with_clock(config: WorkwxConfig, clock: Arc<dyn Clock>) -> ApiResult<Self> {
        config.validate()?;
        let base_url = parse_base_url(&config.base_url)?;

        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .build()?;

        Ok(Self { http, base_url, config: Arc::new(config), clock })
    }

    pub fn config(&self) -> &WorkwxConfig {
        &self.config
    }

    /// Bind the client to one application.
    ///
    /// Every call returns an app with its own credential cache.
    pub fn app(&self, credentials: AppCredentials) -> WorkwxApp {
        let identity = credentials.identity();
        let cache = Arc::new(CredentialCache::with_clock(
            identity.clone(),
            CacheSettings::from(self.config.as_ref()),
            Arc::clone(&self.clock),
        ));
        let tokens = Arc::new(CachedAccessToken::new(
            Arc::clone(&cache),
            TokenSource::new(self.http.clone(), self.base_url.clone(), identity),
        ));
        let dispatcher = Dispatcher::new(
            self.http.clone(),
            self.base_url.clone(),
            Arc::clone(&tokens) as Arc<dyn AccessTokenProvider>,
            self.config.credential_error_codes.clone(),
        );

        info!(corp_id = %credentials.corp_id, agent_id = credentials.agent_id, "Application bound");

        WorkwxApp {
            inner: Arc::new(AppInner { agent_id: credentials.agent_id, cache, tokens, dispatcher }),
        }
    }
}

struct AppInner {
    agent_id: i64,
    cache: Arc<CredentialCache>,
    tokens: Arc<CachedAccessToken>,
    dispatcher: Dispatcher,
}

/// One corp application. Cheap to clone; clones share the credential cache.
#[derive(Clone)]
pub struct WorkwxApp {
    inner: Arc<AppInner>,
}

impl WorkwxApp {
    pub fn agent_id(&self) -> i64 {
        self.inner.agent_id
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.inner.cache
    }

    /// Current access token, acquired if necessary.
    ///
    /// # Errors
    /// The acquisition failure.
    pub async fn access_token(&self) -> ApiResult<String> {
        self.inner.tokens.access_token().await
    }

    /// Corp JS-API ticket, acquired if necessary.
    ///
    /// # Errors
    /// The acquisition failure.
    pub async fn jsapi_ticket(&self) -> ApiResult<String> {
        let dispatcher = self.inner.dispatcher.clone();
        self.inner
            .cache
            .jsapi_ticket()
            .get_or_acquire(move || async move {
                dispatcher.dispatch(&GetJsapiTicket).await.map(CredentialGrant::from)
            })
            .await
    }

    /// Agent-config JS-API ticket, acquired if necessary.
    ///
    /// # Errors
    /// The acquisition failure.
    pub async fn jsapi_ticket_agent_config(&self) -> ApiResult<String> {
        let dispatcher = self.inner.dispatcher.clone();
        self.inner
            .cache
            .agent_config_ticket()
            .get_or_acquire(move || async move {
                dispatcher.dispatch(&GetAgentConfigTicket).await.map(CredentialGrant::from)
            })
            .await
    }

    /// Keep the access token fresh in the background.
    ///
    /// The task re-acquires the token when it turns stale and backs off for a
    /// minute after a failure. It ends once every handle to the app is
    /// dropped, or when aborted through the returned handle.
    pub fn spawn_credential_refresher(&self) -> JoinHandle<()> {
        let app = Arc::downgrade(&self.inner);
        tokio::spawn(refresh_access_token(app))
    }

    /// # Errors
    /// [`workwx_domain::ApiError::Config`] when `recipients` is empty,
    /// transport failures, or the platform's rejection.
    pub async fn send_message(
        &self,
        recipients: &MessageRecipients,
        content: &MessageContent,
        safe: bool,
    ) -> ApiResult<MessageSendResult> {
        let endpoint = SendMessage { agent_id: self.inner.agent_id, recipients, content, safe };
        self.inner.dispatcher.dispatch(&endpoint).await.map(Into::into)
    }

    /// # Errors
    /// See [`WorkwxApp::send_message`].
    pub async fn send_text_message(
        &self,
        recipients: &MessageRecipients,
        content: &str,
        safe: bool,
    ) -> ApiResult<MessageSendResult> {
        self.send_message(recipients, &MessageContent::text(content), safe).await
    }

    /// # Errors
    /// See [`WorkwxApp::send_message`].
    pub async fn send_markdown_message(
        &self,
        recipients: &MessageRecipients,
        content: &str,
    ) -> ApiResult<MessageSendResult> {
        self.send_message(recipients, &MessageContent::markdown(content), false).await
    }

    /// Send to a group chat created by this application.
    ///
    /// # Errors
    /// See [`WorkwxApp::send_message`].
    pub async fn send_appchat_message(
        &self,
        chat_id: &str,
        content: &MessageContent,
        safe: bool,
    ) -> ApiResult<()> {
        self.inner.dispatcher.dispatch(&SendAppchatMessage { chat_id, content, safe }).await?;
        Ok(())
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn get_user(&self, user_id: &str) -> ApiResult<UserDetail> {
        self.inner.dispatcher.dispatch(&GetUser { user_id }).await
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn list_users_by_dept(
        &self,
        dept_id: i64,
        fetch_child: bool,
    ) -> ApiResult<Vec<UserDetail>> {
        let response =
            self.inner.dispatcher.dispatch(&ListUsersByDept { dept_id, fetch_child }).await?;
        Ok(response.users)
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn get_user_id_by_mobile(&self, mobile: &str) -> ApiResult<String> {
        let response = self.inner.dispatcher.dispatch(&GetUserIdByMobile { mobile }).await?;
        Ok(response.user_id)
    }

    /// Resolve an OAuth `code` to the visitor's identity.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn get_user_info_by_code(&self, code: &str) -> ApiResult<UserIdentityInfo> {
        self.inner.dispatcher.dispatch(&GetUserInfoByCode { code }).await
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn list_all_depts(&self) -> ApiResult<Vec<DeptInfo>> {
        let response = self.inner.dispatcher.dispatch(&ListDepts { id: None }).await?;
        Ok(response.departments)
    }

    /// Department `id` and its sub-departments.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn list_depts(&self, id: i64) -> ApiResult<Vec<DeptInfo>> {
        let response = self.inner.dispatcher.dispatch(&ListDepts { id: Some(id) }).await?;
        Ok(response.departments)
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn get_appchat(&self, chat_id: &str) -> ApiResult<ChatInfo> {
        let response = self.inner.dispatcher.dispatch(&GetAppchat { chat_id }).await?;
        Ok(response.chat_info)
    }

    /// Returns the chat ID.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn create_appchat(&self, chat: &ChatInfo) -> ApiResult<String> {
        let response = self.inner.dispatcher.dispatch(&CreateAppchat { chat }).await?;
        Ok(response.chat_id)
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn upload_temp_media(
        &self,
        media_type: MediaType,
        media: Media,
    ) -> ApiResult<MediaUploadResult> {
        self.inner.dispatcher.dispatch(&UploadTempMedia { media_type, media }).await
    }

    /// Returns the permanent image URL.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn upload_permanent_image(&self, media: Media) -> ApiResult<String> {
        let response = self.inner.dispatcher.dispatch(&UploadPermanentImage { media }).await?;
        Ok(response.url)
    }

    /// External user IDs followed by `user_id`.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn list_external_contacts(&self, user_id: &str) -> ApiResult<Vec<String>> {
        let response = self.inner.dispatcher.dispatch(&ListExternalContacts { user_id }).await?;
        Ok(response.external_user_ids)
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn get_external_contact(
        &self,
        external_user_id: &str,
    ) -> ApiResult<ExternalContactInfo> {
        self.inner.dispatcher.dispatch(&GetExternalContact { external_user_id }).await
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn remark_external_contact(&self, remark: &ExternalContactRemark) -> ApiResult<()> {
        self.inner.dispatcher.dispatch(&RemarkExternalContact { remark }).await?;
        Ok(())
    }

    /// Corp tag groups; an empty `tag_ids` lists the whole library.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn list_corp_tags(&self, tag_ids: &[String]) -> ApiResult<Vec<CorpTagGroup>> {
        let response = self.inner.dispatcher.dispatch(&ListCorpTags { tag_ids }).await?;
        Ok(response.tag_group)
    }

    /// Returns the group as stored, with assigned IDs.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn add_corp_tag(&self, group: &CorpTagGroup) -> ApiResult<CorpTagGroup> {
        let response = self.inner.dispatcher.dispatch(&AddCorpTag { group }).await?;
        Ok(response.tag_group)
    }

    /// Rename or reorder a corp tag or tag group.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn edit_corp_tag(&self, id: &str, name: &str, order: u32) -> ApiResult<()> {
        self.inner.dispatcher.dispatch(&EditCorpTag { id, name, order }).await?;
        Ok(())
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn del_corp_tag(&self, tag_ids: &[String], group_ids: &[String]) -> ApiResult<()> {
        self.inner.dispatcher.dispatch(&DelCorpTag { tag_id: tag_ids, group_id: group_ids }).await?;
        Ok(())
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn mark_external_contact_tag(
        &self,
        user_id: &str,
        external_user_id: &str,
        add_tags: &[String],
        remove_tags: &[String],
    ) -> ApiResult<()> {
        let endpoint = MarkExternalContactTag {
            user_id,
            external_user_id,
            add_tag: add_tags,
            remove_tag: remove_tags,
        };
        self.inner.dispatcher.dispatch(&endpoint).await?;
        Ok(())
    }

    /// Create a member tag; returns its ID.
    ///
    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn add_tag(&self, tag: &Tag) -> ApiResult<i64> {
        let response = self.inner.dispatcher.dispatch(&CreateTag { tag }).await?;
        Ok(response.tag_id)
    }

    /// # Errors
    /// Transport failures, or the platform's rejection.
    pub async fn update_tag(&self, tag_id: i64, tag_name: &str) -> ApiResult<()> {
        self.inner.dispatcher.dispatch(&UpdateTag { tag_id, tag_name }).await?;
        Ok(())
    }
}

async fn refresh_access_token(app: Weak<AppInner>) {
    info!("Starting access token refresher");

    loop {
        let Some(inner) = app.upgrade() else {
            debug!("Application dropped, stopping access token refresher");
            return;
        };

        let wait = match inner.tokens.access_token().await {
            Ok(_) => {
                let wait = inner
                    .cache
                    .access_token()
                    .time_until_stale()
                    .unwrap_or_default()
                    .max(MIN_REFRESH_INTERVAL);
                debug!(sleep = ?wait, "Access token fresh");
                wait
            }
            Err(err) => {
                warn!(error = %err, "Access token refresh failed, retrying later");
                REFRESH_RETRY_BACKOFF
            }
        };
        drop(inner);

        tokio::time::sleep(wait).await;
    }
}
