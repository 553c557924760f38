//! Task box and subscribe notification API
//!
//! Task payloads vary with `task_type`; fields not modelled here go through
//! the flattened `extra` map.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

const TASK_BOX_PATH: &str = "/apps/taskbox";

pub type TaskBoxResponse = MicroAppResponse<Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTaskRequest {
    pub access_token: String,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub task_type: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub access_token: String,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub task_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub access_token: String,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub task_id: String,
    /// 1 online, 2 offline
    pub status: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryAppTaskIdRequest {
    pub access_token: String,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryTaskVideoDataRequest {
    pub access_token: String,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub task_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /apps/subscribe_notification/developer/v1/notify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifySubscribeNotificationRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub tpl_id: String,
    pub open_id: String,
    /// Template keyword to value
    pub data: Map<String, Value>,
    /// Page opened from the notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

pub struct TaskBoxApi {
    context: Arc<MicroAppContext>,
}

impl TaskBoxApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    async fn post<B: Serialize>(
        &self,
        name: &str,
        body: &B,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        let request = ApiRequest::post(format!("{TASK_BOX_PATH}/{name}")).json(body)?;
        self.client().execute(request).await
    }

    /// POST /apps/taskbox/add_task
    pub async fn add_task(
        &self,
        request: &AddTaskRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.post("add_task", &body).await
    }

    /// POST /apps/taskbox/update_task
    pub async fn update_task(
        &self,
        request: &UpdateTaskRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("task_id", &request.task_id)?;
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.post("update_task", &body).await
    }

    /// POST /apps/taskbox/update/status
    pub async fn update_status(
        &self,
        request: &UpdateTaskStatusRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("task_id", &request.task_id)?;
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.post("update/status", &body).await
    }

    /// POST /apps/taskbox/query_app_task_id
    pub async fn query_app_task_id(
        &self,
        request: &QueryAppTaskIdRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.post("query_app_task_id", &body).await
    }

    /// POST /apps/taskbox/query_task_video_data
    pub async fn query_task_video_data(
        &self,
        request: &QueryTaskVideoDataRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.post("query_task_video_data", &body).await
    }

    /// POST /apps/subscribe_notification/developer/v1/notify
    pub async fn notify_subscribe_notification(
        &self,
        request: &NotifySubscribeNotificationRequest,
    ) -> Result<TaskBoxResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("tpl_id", &request.tpl_id)?;
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request =
            ApiRequest::post("/apps/subscribe_notification/developer/v1/notify").json(&body)?;
        self.client().execute(request).await
    }
}

impl ByteDanceApi for TaskBoxApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "task_box"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::micro_app::test_support::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"err_no": 0, "err_tips": "success"}))
    }

    #[tokio::test]
    async fn test_update_status_fills_appid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/taskbox/update/status"))
            .and(body_json(json!({
                "access_token": "tok",
                "appid": TEST_APP_ID,
                "task_id": "task_1",
                "status": 2
            })))
            .respond_with(ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = TaskBoxApi::new(create_test_context(&mock_server.uri()));
        api.update_status(&UpdateTaskStatusRequest {
            access_token: "tok".into(),
            app_id: None,
            task_id: "task_1".into(),
            status: 2,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_add_task_flattens_extra() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/taskbox/add_task"))
            .and(body_json(json!({
                "access_token": "tok",
                "appid": TEST_APP_ID,
                "task_type": 1,
                "task_name": "summer"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 0,
                "err_tips": "",
                "data": {"task_id": "task_9"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut extra = Map::new();
        extra.insert("task_name".into(), json!("summer"));
        let api = TaskBoxApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .add_task(&AddTaskRequest {
                access_token: "tok".into(),
                app_id: None,
                task_type: 1,
                extra,
            })
            .await
            .unwrap();

        assert_eq!(response.data.unwrap()["task_id"], "task_9");
    }

    #[tokio::test]
    async fn test_notify_subscribe_notification() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/subscribe_notification/developer/v1/notify"))
            .and(body_json(json!({
                "access_token": "tok",
                "app_id": TEST_APP_ID,
                "tpl_id": "MSG1",
                "open_id": "open_1",
                "data": {"物品名称": "咖啡"}
            })))
            .respond_with(ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut data = Map::new();
        data.insert("物品名称".into(), json!("咖啡"));
        let api = TaskBoxApi::new(create_test_context(&mock_server.uri()));
        api.notify_subscribe_notification(&NotifySubscribeNotificationRequest {
            access_token: "tok".into(),
            app_id: None,
            tpl_id: "MSG1".into(),
            open_id: "open_1".into(),
            data,
            page: None,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_update_task_requires_task_id() {
        let api = TaskBoxApi::new(create_test_context("http://127.0.0.1:9"));
        let result = api.update_task(&UpdateTaskRequest::default()).await;
        assert!(matches!(result, Err(ByteDanceError::InvalidArgument(_))));
    }
}
