//
//  pyramid-api
//  api/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use reqwest::Method;
use serde_json::json;

use super::common::ApiError;
use super::endpoints::tasks;
use super::types::ModifiedItemsResult;
use super::PyramidApi;

impl PyramidApi {
    pub async fn rerun_task(&self, task_id: &str) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &tasks::RE_RUN_TASK,
            json!({
                "auth": self.token(),
                "taskId": task_id,
            }),
        )
        .await
    }

    /// Runs a schedule and returns the id of the started run.
    ///
    /// The response may be bare text, a JSON string, or a `data` envelope.
    pub async fn run_schedule(&self, schedule_id: &str, check_triggers: bool) -> Result<String, ApiError> {
        let body = json!({
            "auth": self.token(),
            "data": {
                "scheduleId": schedule_id,
                "checkTriggers": check_triggers,
            },
        });
        self.call(tasks::RUN_SCHEDULE.path, &body, Method::POST)
            .await?
            .into_text()
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::api::client::tests::{session, TOKEN};

    #[tokio::test]
    async fn test_run_schedule() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/tasks/runSchedule")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "data": {"scheduleId": "s-1", "checkTriggers": true}
            })))
            .with_body(r#"{"data": "run-7"}"#)
            .create_async()
            .await;

        let run = session(&server).run_schedule("s-1", true).await.unwrap();
        assert_eq!(run, "run-7");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rerun_task() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/API2/tasks/reRunTask")
            .match_body(Matcher::Json(json!({"auth": TOKEN, "taskId": "t-1"})))
            .with_body(r#"{"data": {"success": true}}"#)
            .create_async()
            .await;

        assert!(session(&server).rerun_task("t-1").await.unwrap().success);
    }
}
