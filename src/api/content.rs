//
//  pyramid-api
//  api/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Folders and content items (`/API2/content/...`).
//!
//! The root folder lookups all take a user id and return a single
//! [`ContentItem`]; they differ only in which root they resolve.

use serde_json::json;

use super::common::{to_payload, ApiError};
use super::endpoints::{content, Endpoint};
use super::types::{
    AccessType, ContentItem, ImportApiResultObject, ModifiedItemsResult, NewFolder, PieApiObject,
    SearchParams, ValidRootFolderType,
};
use super::PyramidApi;

impl PyramidApi {
    async fn user_folder(&self, endpoint: &Endpoint, user_id: &str) -> Result<ContentItem, ApiError> {
        self.post_data(
            endpoint,
            json!({
                "auth": self.token(),
                "userId": user_id,
            }),
        )
        .await
    }

    pub async fn create_new_folder(&self, folder: &NewFolder) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &content::CREATE_NEW_FOLDER,
            json!({
                "auth": self.token(),
                "folderTenantObject": to_payload(folder)?,
            }),
        )
        .await
    }

    /// Searches content items.
    pub async fn find_content_item(&self, params: &SearchParams) -> Result<Vec<ContentItem>, ApiError> {
        self.post_data(
            &content::FIND_CONTENT_ITEM,
            json!({
                "auth": self.token(),
                "searchParams": to_payload(params)?,
            }),
        )
        .await
    }

    pub async fn get_user_public_root_folder(&self, user_id: &str) -> Result<ContentItem, ApiError> {
        self.user_folder(&content::GET_USER_PUBLIC_ROOT_FOLDER, user_id).await
    }

    pub async fn get_private_root_folder(&self, user_id: &str) -> Result<ContentItem, ApiError> {
        self.user_folder(&content::GET_PRIVATE_ROOT_FOLDER, user_id).await
    }

    pub async fn get_private_folder_for_user(&self, user_id: &str) -> Result<ContentItem, ApiError> {
        self.user_folder(&content::GET_PRIVATE_FOLDER_FOR_USER, user_id).await
    }

    pub async fn get_user_group_root_folder(&self, user_id: &str) -> Result<ContentItem, ApiError> {
        self.user_folder(&content::GET_USER_GROUP_ROOT_FOLDER, user_id).await
    }

    /// Returns a tenant's public or group root folder.
    ///
    /// Pass [`ValidRootFolderType::default()`] for the public root.
    pub async fn get_public_or_group_folder_by_tenant_id(
        &self,
        tenant_id: &str,
        root_folder_type: ValidRootFolderType,
    ) -> Result<ContentItem, ApiError> {
        self.post_data(
            &content::GET_PUBLIC_OR_GROUP_FOLDER_BY_TENANT_ID,
            json!({
                "auth": self.token(),
                "folderTenantObject": {
                    "validRootFolderType": root_folder_type,
                    "tenantId": tenant_id,
                },
            }),
        )
        .await
    }

    /// Lists the items of a folder as seen by a user.
    pub async fn get_folder_items(&self, user_id: &str, folder_id: &str) -> Result<Vec<ContentItem>, ApiError> {
        self.post_data(
            &content::GET_FOLDER_ITEMS,
            json!({
                "auth": self.token(),
                "userId": user_id,
                "folderId": folder_id,
            }),
        )
        .await
    }

    /// Imports a content package into a folder.
    pub async fn import_content(&self, package: &PieApiObject) -> Result<ImportApiResultObject, ApiError> {
        self.post_data(
            &content::IMPORT_CONTENT,
            json!({
                "auth": self.token(),
                "pieApiObject": to_payload(package)?,
            }),
        )
        .await
    }

    /// Grants a role access to an item, optionally propagating to children.
    pub async fn add_role_to_item(
        &self,
        item_id: &str,
        role_id: &str,
        access_type: AccessType,
        propagate_roles: bool,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &content::ADD_ROLE_TO_ITEM,
            json!({
                "auth": self.token(),
                "roleToItemApiData": {
                    "itemId": item_id,
                    "roleId": role_id,
                    "accessType": access_type,
                    "propagateRoles": propagate_roles,
                },
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
    use crate::api::types::{
        AccessType, ContentType, NewFolder, PieApiObject, SearchMatchType, SearchParams, ValidRootFolderType,
    };

    #[tokio::test]
    async fn test_root_folders() {
        let mut server = Server::new_async().await;
        for path in [
            "/API2/content/getUserPublicRootFolder",
            "/API2/content/getPrivateRootFolder",
            "/API2/content/getPrivateFolderForUser",
            "/API2/content/getUserGroupRootFolder",
        ] {
            server
                .mock("POST", path)
                .match_body(Matcher::Json(json!({"auth": TOKEN, "userId": "u-1"})))
                .with_body(format!(r#"{{"data": {{"id": "{path}", "caption": "root"}}}}"#))
                .expect(1)
                .create_async()
                .await;
        }

        let api = session(&server);
        assert_eq!(
            api.get_user_public_root_folder("u-1").await.unwrap().id.as_deref(),
            Some("/API2/content/getUserPublicRootFolder")
        );
        assert!(api.get_private_root_folder("u-1").await.is_ok());
        assert!(api.get_private_folder_for_user("u-1").await.is_ok());
        assert!(api.get_user_group_root_folder("u-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_new_folder_omits_unset_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/content/createNewFolder")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "folderTenantObject": {"parentFolderId": "root", "folderName": "child"}
            })))
            .with_body(r#"{"data": {"success": true}}"#)
            .create_async()
            .await;

        let folder = NewFolder {
            parent_folder_id: "root".to_string(),
            folder_name: "child".to_string(),
            folder_id: None,
        };
        assert!(session(&server).create_new_folder(&folder).await.unwrap().success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_content_item() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/content/findContentItem")
            .match_body(Matcher::PartialJson(json!({
                "searchParams": {
                    "searchString": "Radar",
                    "filterTypes": [3],
                    "searchMatchType": 2,
                    "searchRootFolderType": 1,
                    "isAdvancedSearch": false
                }
            })))
            .with_body(r#"{"data": [{"id": "c-1", "caption": "Radar", "contentType": 3}]}"#)
            .create_async()
            .await;

        let mut params = SearchParams::new("Radar", vec![ContentType::DataDiscovery]);
        params.search_match_type = SearchMatchType::Equals;
        let items = session(&server).find_content_item(&params).await.unwrap();

        assert_eq!(items[0].caption.as_deref(), Some("Radar"));
        assert_eq!(items[0].content_type, Some(ContentType::DataDiscovery));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_public_or_group_folder() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/API2/content/getPublicOrGroupFolderByTenantId")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "folderTenantObject": {"validRootFolderType": 1, "tenantId": "t-1"}
            })))
            .with_body(r#"{"data": {"id": "public-root"}}"#)
            .create_async()
            .await;

        let folder = session(&server)
            .get_public_or_group_folder_by_tenant_id("t-1", ValidRootFolderType::default())
            .await
            .unwrap();
        assert_eq!(folder.id.as_deref(), Some("public-root"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_import_and_share() {
        let mut server = Server::new_async().await;
        let import = server
            .mock("POST", "/API2/content/importContent")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "pieApiObject": {
                    "rootFolderId": "f-1",
                    "fileZippedData": "UEsDBA==",
                    "clashDefaultOption": 1,
                    "rolesAssignmentType": 3
                }
            })))
            .with_body(r#"{"data": {"importDscMap": [], "failedItems": []}}"#)
            .create_async()
            .await;
        let share = server
            .mock("POST", "/API2/content/addRoleToItem")
            .match_body(Matcher::Json(json!({
                "auth": TOKEN,
                "roleToItemApiData": {
                    "itemId": "f-1",
                    "roleId": "r-1",
                    "accessType": 4,
                    "propagateRoles": true
                }
            })))
            .with_body(r#"{"data": {"success": true}}"#)
            .create_async()
            .await;

        let api = session(&server);
        let result = api
            .import_content(&PieApiObject::new("f-1", "UEsDBA=="))
            .await
            .unwrap();
        assert!(result.failed_items.is_empty());
        assert!(api
            .add_role_to_item("f-1", "r-1", AccessType::Admin, true)
            .await
            .unwrap()
            .success);

        import.assert_async().await;
        share.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_folder_items() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/API2/content/getFolderItems")
            .match_body(Matcher::Json(json!({"auth": TOKEN, "userId": "u", "folderId": "f"})))
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        assert!(session(&server).get_folder_items("u", "f").await.unwrap().is_empty());
    }
}
