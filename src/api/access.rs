//
//  pyramid-api
//  api/access.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Users, tenants, and roles (`/API2/access/...`).

use serde_json::json;

use super::common::{to_payload, ApiError};
use super::endpoints::access;
use super::types::{ModifiedItemsResult, NewTenant, Role, TenantData, User};
use super::PyramidApi;

impl PyramidApi {
    /// Returns the user owning the session token.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.post_data(&access::GET_ME, json!({ "auth": self.token() }))
            .await
    }

    /// Finds users by user name.
    pub async fn get_users_by_name(&self, user_name: &str) -> Result<Vec<User>, ApiError> {
        self.post_data(
            &access::GET_USERS_BY_NAME,
            json!({
                "auth": self.token(),
                "userName": user_name,
            }),
        )
        .await
    }

    pub async fn create_tenant(&self, tenant: &NewTenant) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &access::CREATE_TENANT,
            json!({
                "auth": self.token(),
                "tenant": to_payload(tenant)?,
            }),
        )
        .await
    }

    pub async fn get_tenant_by_name(&self, name: &str) -> Result<TenantData, ApiError> {
        self.post_data(
            &access::GET_TENANT_BY_NAME,
            json!({
                "auth": self.token(),
                "tenantName": name,
            }),
        )
        .await
    }

    /// Deletes tenants, optionally along with their users and servers.
    pub async fn delete_tenants(
        &self,
        tenant_ids: &[String],
        delete_users: bool,
        delete_servers: bool,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &access::DELETE_TENANTS,
            json!({
                "auth": self.token(),
                "data": {
                    "tenantIds": tenant_ids,
                    "deleteUsers": delete_users,
                    "deleteServers": delete_servers,
                },
            }),
        )
        .await
    }

    pub async fn create_role(&self, role: &Role) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &access::CREATE_ROLE,
            json!({
                "auth": self.token(),
                "roleData": to_payload(role)?,
            }),
        )
        .await
    }

    pub async fn delete_role(&self, role_id: &str) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &access::DELETE_ROLE,
            json!({
                "auth": self.token(),
                "roleId": role_id,
            }),
        )
        .await
    }

    /// Creates a user stored in the Pyramid database.
    pub async fn create_user_db(&self, user: &User) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &access::CREATE_USER_DB,
            json!({
                "auth": self.token(),
                "user": to_payload(user)?,
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
    use crate::api::types::{AdminType, NewTenant, User};

    const MODIFIED: &str = r#"{"data": {"success": true, "modifiedList": [{"id": "new-id"}]}}"#;

    #[tokio::test]
    async fn test_get_users_by_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/access/getUsersByName")
            .match_body(Matcher::Json(json!({"auth": TOKEN, "userName": "ann"})))
            .with_body(r#"{"data": [{"tenantId": "t", "userName": "ann"}, {"tenantId": "t", "userName": "anne"}]}"#)
            .create_async()
            .await;

        let users = session(&server).get_users_by_name("ann").await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].user_name, "anne");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_tenant() {
        let mut server = Server::new_async().await;
        let mut tenant = NewTenant::new("tid", "acme");
        tenant.viewer_seats = 1;
        tenant.pro_seats = 1;
        tenant.show_group_folder = true;

        let mock = server
            .mock("POST", "/API2/access/createTenant")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "tenant": {
                    "id": "tid",
                    "name": "acme",
                    "viewerSeats": 1,
                    "proSeats": 1,
                    "showGroupFolder": true
                }
            })))
            .with_body(MODIFIED)
            .create_async()
            .await;

        let result = session(&server).create_tenant(&tenant).await.unwrap();
        assert!(result.success);
        assert_eq!(result.first_id(), Some("new-id"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_tenants() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/access/deleteTenants")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "data": {"tenantIds": ["a", "b"], "deleteUsers": true, "deleteServers": false}
            })))
            .with_body(MODIFIED)
            .create_async()
            .await;

        session(&server)
            .delete_tenants(&["a".to_string(), "b".to_string()], true, false)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_user_db_strips_nulls() {
        let mut server = Server::new_async().await;
        let mut user = User::new("t", "t_admin");
        user.password = Some("password".to_string());
        user.role_ids = vec!["role".to_string()];
        user.admin_type = AdminType::DomainAdmin;

        let mock = server
            .mock("POST", "/API2/access/createUserDb")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "user": {
                    "tenantId": "t",
                    "userName": "t_admin",
                    "roleIds": ["role"],
                    "clientLicenseType": 0,
                    "password": "password",
                    "adminType": 1,
                    "statusID": 1,
                    "createdDate": 0,
                    "lastLoginDate": 0
                }
            })))
            .with_body(MODIFIED)
            .create_async()
            .await;

        let result = session(&server).create_user_db(&user).await.unwrap();
        assert!(result.success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_tenant_by_name() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/API2/access/getTenantByName")
            .match_body(Matcher::PartialJson(json!({"tenantName": "acme"})))
            .with_body(r#"{"data": {"id": "tid", "name": "acme", "tenantSettings": {"showGroupFolder": true}}}"#)
            .create_async()
            .await;

        let tenant = session(&server).get_tenant_by_name("acme").await.unwrap();
        assert_eq!(tenant.name.as_deref(), Some("acme"));
        assert_eq!(
            tenant.tenant_settings.and_then(|s| s.show_group_folder),
            Some(true)
        );
    }
}
