//! Industry qualification (auth entity) API
//!
//! Used by knowledge-industry apps to submit a teacher, institution or
//! service provider for category certification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

/// Industry category, three levels deep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryClass {
    pub first_class: i32,
    pub second_class: i32,
    pub third_class: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateMaterial {
    pub material_type: i32,
    /// e.g. `2029-09-10`
    #[serde(rename = "material_expiretime")]
    pub material_expire_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_paths: Option<Vec<String>>,
}

/// Identity card details of a person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Individual {
    pub name: String,
    pub id_number: String,
    /// `长期有效` or a date such as `2034-01-09`
    pub expire_time: String,
    pub front_path: String,
    pub back_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_material: Option<Individual>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooperation_agreement: Option<CertificateMaterial>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    pub record_name: String,
    /// `线上机构` or `线下机构`
    pub scene_type: String,
    /// `企业工商户` or `个体工商户`
    pub subject_type: String,
    pub logo_uri: String,
    pub trademark_uri: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryRole {
    Teacher,
    Institution,
    ServiceProvider,
}

impl IndustryRole {
    pub fn code(self) -> i32 {
        match self {
            IndustryRole::Teacher => 1,
            IndustryRole::Institution => 2,
            IndustryRole::ServiceProvider => 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddClassAuthRequest {
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_entity_id: Option<String>,
    /// Required for institutions and teachers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_entity_id: Option<String>,
    /// `10000` for general knowledge
    pub industry_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_class: Option<IndustryClass>,
    /// See [`IndustryRole::code`]
    pub industry_role: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_qualifications: Option<Vec<CertificateMaterial>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<Institution>,
}

pub type AddClassAuthResponse = MicroAppResponse<Value>;

pub struct AuthEntityApi {
    context: Arc<MicroAppContext>,
}

impl AuthEntityApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /apps/v1/auth_entity/add_class_auth
    pub async fn add_class_auth(
        &self,
        request: &AddClassAuthRequest,
    ) -> Result<AddClassAuthResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", &request.access_token)?;
        let api_request = ApiRequest::post("/apps/v1/auth_entity/add_class_auth")
            .access_token(&request.access_token)
            .json(request)?;
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for AuthEntityApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "auth_entity"
    }
}
