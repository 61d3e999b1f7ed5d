//
//  pyramid-api
//  api/notification.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde_json::json;

use super::common::ApiError;
use super::endpoints::notification;
use super::types::NotificationIndicatorsResult;
use super::PyramidApi;

impl PyramidApi {
    /// Returns the pending notification counts for a user.
    pub async fn get_notification_indicators(&self, user_id: &str) -> Result<NotificationIndicatorsResult, ApiError> {
        self.post_data(
            &notification::GET_NOTIFICATION_INDICATORS,
            json!({
                "auth": self.token(),
                "userId": user_id,
            }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::api::client::tests::{session, TOKEN};

    #[tokio::test]
    async fn test_get_notification_indicators() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/notification/getNotificationIndicators")
            .match_body(Matcher::Json(json!({"auth": TOKEN, "userId": "u-1"})))
            .with_body(r#"{"data": {"models": 1, "alerts": 3, "conversations": null}}"#)
            .create_async()
            .await;

        let result = session(&server).get_notification_indicators("u-1").await.unwrap();
        assert_eq!(result.models, Some(1));
        assert_eq!(result.alerts, Some(3));
        assert_eq!(result.conversations, None);
        mock.assert_async().await;
    }
}
