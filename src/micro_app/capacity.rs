//! Capability management API (`/apps/v1/capacity/...`)
//!
//! Covers the self-service capability console of a micro app: Douyin
//! account permissions, search keywords and aliases, account and self-mount
//! bindings, CapCut templates, simple QR code routing, subscribe notification
//! templates, and traffic / ad placement management.
//!
//! Every endpoint except [`CapacityApi::upload_material`] authenticates with
//! the `access-token` header taken from the request.
//!
//! Response payloads are returned as loose JSON ([`CapacityResponse`]) since
//! their shape differs per capability.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::{MicroAppResponse, UploadFile};
use crate::utils::join_comma;

use super::{MicroAppContext, MicroAppCredentials};

const CAPACITY_PATH: &str = "/apps/v1/capacity";

pub type CapacityResponse = MicroAppResponse<Value>;

/// Request carrying nothing but the caller's access token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizedRequest {
    #[serde(skip)]
    pub access_token: String,
}

impl AuthorizedRequest {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Access token plus `page_num` / `page_size`.
#[derive(Debug, Clone)]
pub struct PagedRequest {
    pub access_token: String,
    pub page_num: u32,
    pub page_size: u32,
}

impl PagedRequest {
    pub fn new(access_token: impl Into<String>, page_num: u32, page_size: u32) -> Self {
        Self {
            access_token: access_token.into(),
            page_num,
            page_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadMaterialRequest {
    /// Material category as defined by the console
    pub material_type: i32,
    /// Sent as `material_file`; defaults to a random `.jpg` name and `image/jpeg`
    pub material_file: UploadFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyAwemePermissionRequest {
    #[serde(skip)]
    pub access_token: String,
    pub permission_key: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryScopeQuotaDetailRequest {
    pub access_token: String,
    pub permission_key: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyScopeQuotaRequest {
    #[serde(skip)]
    pub access_token: String,
    pub permission_key: i32,
    pub expected_quota: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddAwemeVideoKeywordRequest {
    #[serde(skip)]
    pub access_token: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAwemeVideoKeywordRequest {
    #[serde(skip)]
    pub access_token: String,
    pub keyword_id: String,
}

/// Used by both `add_alias` and `delete_alias`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasRequest {
    #[serde(skip)]
    pub access_token: String,
    pub alias_word: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyAliasRequest {
    #[serde(skip)]
    pub access_token: String,
    pub before_alias_word: String,
    pub after_alias_word: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetSearchTagRequest {
    #[serde(skip)]
    pub access_token: String,
    pub tag_list: Vec<String>,
}

/// Binds a Douyin account to the app.
///
/// `bind_type` is sent as `type`; the remaining fields differ per binding
/// kind and go through `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindAwemeUserRequest {
    #[serde(skip)]
    pub access_token: String,
    pub aweme_id: String,
    #[serde(rename = "type")]
    pub bind_type: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnbindAwemeUserRequest {
    #[serde(skip)]
    pub access_token: String,
    pub aweme_id: String,
    #[serde(rename = "type")]
    pub bind_type: i32,
}

#[derive(Debug, Clone, Default)]
pub struct GetAwemeUserBindQrcodeRequest {
    pub access_token: String,
    /// Sent as `type`
    pub bind_type: i32,
}

#[derive(Debug, Clone, Default)]
pub struct QueryAwemeUserBindListRequest {
    pub access_token: String,
    pub bind_type: i32,
    pub page_num: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyCapacityRequest {
    #[serde(skip)]
    pub access_token: String,
    pub capacity_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_info: Option<Value>,
}

/// Access token plus the capability key a query targets.
#[derive(Debug, Clone, Default)]
pub struct CapacityKeyRequest {
    pub access_token: String,
    pub capacity_key: String,
}

/// Used by both `bind_self_mount_user` and `unbind_self_mount_user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfMountUserRequest {
    #[serde(skip)]
    pub access_token: String,
    pub aweme_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuerySelfMountUserListRequest {
    pub access_token: String,
    pub capacity_key: String,
    pub page_num: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCapcutTemplateStatusRequest {
    #[serde(skip)]
    pub access_token: String,
    pub template_id: String,
    pub status: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSimpleQrcodeBindRequest {
    #[serde(skip)]
    pub access_token: String,
    pub qr_url: String,
    pub path: String,
    /// `1` binds every URL with the `qr_url` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_qr_url_prefix: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSimpleQrcodeBindRequest {
    #[serde(skip)]
    pub access_token: String,
    pub before_qr_url: String,
    pub qr_url: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_qr_url_prefix: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSimpleQrcodeBindStatusRequest {
    #[serde(skip)]
    pub access_token: String,
    pub qr_url: String,
    pub status: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteSimpleQrcodeBindRequest {
    #[serde(skip)]
    pub access_token: String,
    pub qr_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuerySubscribeNotificationTemplatesRequest {
    pub access_token: String,
    pub page_num: u32,
    pub page_size: u32,
    pub classification: i32,
    pub template_type: i32,
    /// Sent comma separated
    pub category_ids: Option<Vec<i64>>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryAppSubscribeNotificationTemplatesRequest {
    pub access_token: String,
    pub page_num: u32,
    pub page_size: u32,
    pub classification: i32,
    pub category_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryCreatedSubscribeNotificationTemplatesRequest {
    pub access_token: String,
    pub page_num: u32,
    pub page_size: u32,
    pub status: Option<i32>,
}

/// Used by `add_app_subscribe_notification_template` and
/// `delete_app_subscribe_notification_template`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeNotificationTemplateRequest {
    #[serde(skip)]
    pub access_token: String,
    pub template_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyAppSubscribeNotificationTemplateRequest {
    #[serde(skip)]
    pub access_token: String,
    pub template_id: i64,
    pub status: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubscribeNotificationTemplateRequest {
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub classification: i32,
    pub title: String,
    pub keyword_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddAdPlacementRequest {
    #[serde(skip)]
    pub access_token: String,
    pub ad_placement_name: String,
    pub ad_placement_type: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAdPlacementStatusRequest {
    #[serde(skip)]
    pub access_token: String,
    pub ad_placement_id: String,
    pub status: i32,
}

#[derive(Debug, Clone, Default)]
pub struct QueryAdIncomeRequest {
    pub access_token: String,
    /// `yyyy-MM-dd`
    pub start_date: String,
    pub end_date: String,
    pub host_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryAdSettlementListRequest {
    pub access_token: String,
    /// `yyyy-MM`
    pub month: Option<String>,
    pub status: Option<i32>,
}

/// Capability management API
pub struct CapacityApi {
    context: Arc<MicroAppContext>,
}

impl CapacityApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    fn get(&self, name: &str, access_token: &str) -> Result<ApiRequest, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", access_token)?;
        Ok(ApiRequest::get(format!("{CAPACITY_PATH}/{name}")).access_token(access_token))
    }

    fn post<B: Serialize>(
        &self,
        name: &str,
        access_token: &str,
        body: &B,
    ) -> Result<ApiRequest, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", access_token)?;
        ApiRequest::post(format!("{CAPACITY_PATH}/{name}"))
            .access_token(access_token)
            .json(body)
    }

    async fn send(&self, request: ApiRequest) -> Result<CapacityResponse, ByteDanceError> {
        self.client().execute(request).await
    }

    /// POST /apps/v1/capacity/upload_material (multipart)
    pub async fn upload_material(
        &self,
        request: UploadMaterialRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let part = request.material_file.into_part("jpg", "image/jpeg")?;
        let form = reqwest::multipart::Form::new()
            .part("material_file", part)
            .text("material_type", request.material_type.to_string());

        let request = ApiRequest::post(format!("{CAPACITY_PATH}/upload_material")).multipart(form);
        self.send(request).await
    }

    // Douyin account permissions

    /// GET /apps/v1/capacity/query_aweme_permission_list
    pub async fn query_aweme_permission_list(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_aweme_permission_list", &request.access_token)?)
            .await
    }

    /// POST /apps/v1/capacity/apply_aweme_permission
    pub async fn apply_aweme_permission(
        &self,
        request: &ApplyAwemePermissionRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("apply_aweme_permission", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_scope_quota_detail
    pub async fn query_scope_quota_detail(
        &self,
        request: &QueryScopeQuotaDetailRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_scope_quota_detail", &request.access_token)?
            .query("permission_key", request.permission_key);
        self.send(api_request).await
    }

    /// POST /apps/v1/capacity/apply_scope_quota
    pub async fn apply_scope_quota(
        &self,
        request: &ApplyScopeQuotaRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("apply_scope_quota", &request.access_token, request)?)
            .await
    }

    // Video search keywords

    /// GET /apps/v1/capacity/query_aweme_video_keyword_list
    pub async fn query_aweme_video_keyword_list(
        &self,
        request: &PagedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_aweme_video_keyword_list", &request.access_token)?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    /// POST /apps/v1/capacity/add_aweme_video_keyword
    pub async fn add_aweme_video_keyword(
        &self,
        request: &AddAwemeVideoKeywordRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("add_aweme_video_keyword", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/delete_aweme_video_keyword
    pub async fn delete_aweme_video_keyword(
        &self,
        request: &DeleteAwemeVideoKeywordRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("delete_aweme_video_keyword", &request.access_token, request)?)
            .await
    }

    // Search aliases and tags

    /// POST /apps/v1/capacity/add_alias
    pub async fn add_alias(
        &self,
        request: &AliasRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("add_alias", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_alias_list
    pub async fn query_alias_list(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_alias_list", &request.access_token)?)
            .await
    }

    /// POST /apps/v1/capacity/modify_alias
    pub async fn modify_alias(
        &self,
        request: &ModifyAliasRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("modify_alias", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/delete_alias
    pub async fn delete_alias(
        &self,
        request: &AliasRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("delete_alias", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/set_search_tag
    pub async fn set_search_tag(
        &self,
        request: &SetSearchTagRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("set_search_tag", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_search_tag_list
    pub async fn query_search_tag_list(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_search_tag_list", &request.access_token)?)
            .await
    }

    // Douyin account binding

    /// POST /apps/v1/capacity/bind_aweme_user
    pub async fn bind_aweme_user(
        &self,
        request: &BindAwemeUserRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("aweme_id", &request.aweme_id)?;
        self.send(self.post("bind_aweme_user", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/unbind_aweme_user_bind
    pub async fn unbind_aweme_user(
        &self,
        request: &UnbindAwemeUserRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("unbind_aweme_user_bind", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/get_aweme_user_bind_qrcode
    pub async fn get_aweme_user_bind_qrcode(
        &self,
        request: &GetAwemeUserBindQrcodeRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("get_aweme_user_bind_qrcode", &request.access_token)?
            .query("type", request.bind_type);
        self.send(api_request).await
    }

    /// GET /apps/v1/capacity/query_aweme_user_bind_list
    pub async fn query_aweme_user_bind_list(
        &self,
        request: &QueryAwemeUserBindListRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_aweme_user_bind_list", &request.access_token)?
            .query("type", request.bind_type)
            .query("page_num", request.page_num)
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    // Capability applications

    /// POST /apps/v1/capacity/apply_capacity
    pub async fn apply_capacity(
        &self,
        request: &ApplyCapacityRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("apply_capacity", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_apply_status
    pub async fn query_apply_status(
        &self,
        request: &CapacityKeyRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_apply_status", &request.access_token)?
            .query("capacity_key", &request.capacity_key);
        self.send(api_request).await
    }

    // Self-mount binding

    /// POST /apps/v1/capacity/bind_self_mount_user
    pub async fn bind_self_mount_user(
        &self,
        request: &SelfMountUserRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("bind_self_mount_user", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/unbind_self_mount_user
    pub async fn unbind_self_mount_user(
        &self,
        request: &SelfMountUserRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("unbind_self_mount_user", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/get_self_mount_bind_qrcode
    pub async fn get_self_mount_bind_qrcode(
        &self,
        request: &CapacityKeyRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("get_self_mount_bind_qrcode", &request.access_token)?
            .query("capacity_key", &request.capacity_key);
        self.send(api_request).await
    }

    /// GET /apps/v1/capacity/query_self_mount_user_list
    pub async fn query_self_mount_user_list(
        &self,
        request: &QuerySelfMountUserListRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_self_mount_user_list", &request.access_token)?
            .query("capacity_key", &request.capacity_key)
            .query("page_num", request.page_num)
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    // CapCut templates

    /// GET /apps/v1/capacity/query_capcut_info
    pub async fn query_capcut_info(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_capcut_info", &request.access_token)?)
            .await
    }

    /// GET /apps/v1/capacity/query_capcut_template_list
    pub async fn query_capcut_template_list(
        &self,
        request: &PagedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_capcut_template_list", &request.access_token)?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    /// POST /apps/v1/capacity/update_capcut_template_status
    pub async fn update_capcut_template_status(
        &self,
        request: &UpdateCapcutTemplateStatusRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("update_capcut_template_status", &request.access_token, request)?)
            .await
    }

    // Simple QR code routing

    /// GET /apps/v1/capacity/query_simple_qr_bind_list
    pub async fn query_simple_qrcode_bind_list(
        &self,
        request: &PagedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_simple_qr_bind_list", &request.access_token)?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    /// POST /apps/v1/capacity/add_simple_qr_bind
    pub async fn add_simple_qrcode_bind(
        &self,
        request: &AddSimpleQrcodeBindRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("add_simple_qr_bind", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/update_simple_qr_bind
    pub async fn update_simple_qrcode_bind(
        &self,
        request: &UpdateSimpleQrcodeBindRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("update_simple_qr_bind", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/update_simple_qr_bind_status
    pub async fn update_simple_qrcode_bind_status(
        &self,
        request: &UpdateSimpleQrcodeBindStatusRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("update_simple_qr_bind_status", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/delete_simple_qr_bind
    pub async fn delete_simple_qrcode_bind(
        &self,
        request: &DeleteSimpleQrcodeBindRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("delete_simple_qr_bind", &request.access_token, request)?)
            .await
    }

    // Subscribe notification templates

    /// GET /apps/v1/capacity/query_subscribe_notification_tpl_list
    pub async fn query_subscribe_notification_templates(
        &self,
        request: &QuerySubscribeNotificationTemplatesRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_subscribe_notification_tpl_list", &request.access_token)?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size)
            .query("classification", request.classification)
            .query("template_type", request.template_type)
            .query_opt("category_ids", request.category_ids.as_deref().map(join_comma))
            .query_opt("keyword", request.keyword.as_deref());
        self.send(api_request).await
    }

    /// GET /apps/v1/capacity/query_app_subscribe_notification_tpl
    pub async fn query_app_subscribe_notification_templates(
        &self,
        request: &QueryAppSubscribeNotificationTemplatesRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_app_subscribe_notification_tpl", &request.access_token)?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size)
            .query("classification", request.classification)
            .query_opt("category_ids", request.category_ids.as_deref().map(join_comma));
        self.send(api_request).await
    }

    /// GET /apps/v1/capacity/query_created_subscribe_notification_tpl_list
    pub async fn query_created_subscribe_notification_templates(
        &self,
        request: &QueryCreatedSubscribeNotificationTemplatesRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get(
                "query_created_subscribe_notification_tpl_list",
                &request.access_token,
            )?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size)
            .query_opt("status", request.status);
        self.send(api_request).await
    }

    /// POST /apps/v1/capacity/add_app_subscribe_notification_tpl
    pub async fn add_app_subscribe_notification_template(
        &self,
        request: &SubscribeNotificationTemplateRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post(
            "add_app_subscribe_notification_tpl",
            &request.access_token,
            request,
        )?)
        .await
    }

    /// POST /apps/v1/capacity/modify_app_subscribe_notification_tpl
    pub async fn modify_app_subscribe_notification_template(
        &self,
        request: &ModifyAppSubscribeNotificationTemplateRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post(
            "modify_app_subscribe_notification_tpl",
            &request.access_token,
            request,
        )?)
        .await
    }

    /// POST /apps/v1/capacity/delete_app_subscribe_notification_tpl
    pub async fn delete_app_subscribe_notification_template(
        &self,
        request: &SubscribeNotificationTemplateRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post(
            "delete_app_subscribe_notification_tpl",
            &request.access_token,
            request,
        )?)
        .await
    }

    /// POST /apps/v1/capacity/create_subscribe_notification_tpl
    pub async fn create_subscribe_notification_template(
        &self,
        request: &CreateSubscribeNotificationTemplateRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        if request.keyword_list.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "keyword_list must not be empty".to_string(),
            ));
        }
        self.send(self.post(
            "create_subscribe_notification_tpl",
            &request.access_token,
            request,
        )?)
        .await
    }

    // Traffic and ads

    /// GET /apps/v1/capacity/query_traffic_permission_status
    pub async fn query_traffic_permission_status(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_traffic_permission_status", &request.access_token)?)
            .await
    }

    /// POST /apps/v1/capacity/open_traffic_permission
    pub async fn open_traffic_permission(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("open_traffic_permission", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_ad_placement_list
    pub async fn query_ad_placement_list(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.get("query_ad_placement_list", &request.access_token)?)
            .await
    }

    /// POST /apps/v1/capacity/add_ad_placement
    pub async fn add_ad_placement(
        &self,
        request: &AddAdPlacementRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("add_ad_placement", &request.access_token, request)?)
            .await
    }

    /// POST /apps/v1/capacity/update_ad_placement_status
    pub async fn update_ad_placement_status(
        &self,
        request: &UpdateAdPlacementStatusRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        self.send(self.post("update_ad_placement_status", &request.access_token, request)?)
            .await
    }

    /// GET /apps/v1/capacity/query_ad_income
    pub async fn query_ad_income(
        &self,
        request: &QueryAdIncomeRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_ad_income", &request.access_token)?
            .query("start_date", &request.start_date)
            .query("end_date", &request.end_date)
            .query_opt("host_name", request.host_name.as_deref());
        self.send(api_request).await
    }

    /// GET /apps/v1/capacity/query_ad_settlement_list
    pub async fn query_ad_settlement_list(
        &self,
        request: &QueryAdSettlementListRequest,
    ) -> Result<CapacityResponse, ByteDanceError> {
        let api_request = self
            .get("query_ad_settlement_list", &request.access_token)?
            .query_opt("month", request.month.as_deref())
            .query_opt("status", request.status);
        self.send(api_request).await
    }
}

impl ByteDanceApi for CapacityApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "capacity"
    }
}
