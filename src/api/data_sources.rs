//
//  pyramid-api
//  api/data_sources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Data servers, databases, and models (`/API2/dataSources/...`).

use serde_json::{json, Value};

use super::common::{to_payload, ApiError};
use super::endpoints::{dataSources, Endpoint};
use super::types::{
    AccessType, ConnectionStringProperties, ContentItemObjectType, MaterializedItemObject,
    MaterializedRoleAssignmentType, ModifiedItemsResult, SearchMatchType, Server,
};
use super::PyramidApi;

/// Request body for the role assignment endpoints.
fn item_roles(token: &str, item_id: &str, role_id: &str, access_type: AccessType) -> Value {
    json!({
        "auth": token,
        "itemRoles": {
            "itemId": item_id,
            "itemRolePairList": [{
                "roleId": role_id,
                "accessType": access_type,
            }],
        },
    })
}

impl PyramidApi {
    async fn add_item_role(
        &self,
        endpoint: &Endpoint,
        item_id: &str,
        role_id: &str,
        access_type: AccessType,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(endpoint, item_roles(self.token(), item_id, role_id, access_type))
            .await
    }

    pub async fn create_data_server(&self, server: &Server) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &dataSources::CREATE_DATA_SERVER,
            json!({
                "auth": self.token(),
                "serverData": to_payload(server)?,
            }),
        )
        .await
    }

    pub async fn add_role_to_server(
        &self,
        server_id: &str,
        role_id: &str,
        access_type: AccessType,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.add_item_role(&dataSources::ADD_ROLES_TO_SERVER, server_id, role_id, access_type)
            .await
    }

    pub async fn add_role_to_database(
        &self,
        database_id: &str,
        role_id: &str,
        access_type: AccessType,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.add_item_role(&dataSources::ADD_ROLES_TO_DATA_BASE, database_id, role_id, access_type)
            .await
    }

    /// Grants a role access to a model.
    ///
    /// Models share the database role endpoint.
    pub async fn add_role_to_model(
        &self,
        model_id: &str,
        role_id: &str,
        access_type: AccessType,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.add_item_role(&dataSources::ADD_ROLES_TO_DATA_BASE, model_id, role_id, access_type)
            .await
    }

    /// Repoints an item from one connection to another.
    pub async fn change_data_source(
        &self,
        from_connection_id: &str,
        to_connection_id: &str,
        item_id: &str,
    ) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &dataSources::CHANGE_DATA_SOURCE,
            json!({
                "auth": self.token(),
                "dscApiData": {
                    "fromConnId": from_connection_id,
                    "toConnId": to_connection_id,
                    "itemId": item_id,
                },
            }),
        )
        .await
    }

    pub async fn get_data_sources_by_tenant(&self, tenant_id: &str) -> Result<Vec<MaterializedItemObject>, ApiError> {
        self.post_data(
            &dataSources::GET_DATA_SOURCES_BY_TENANT,
            json!({
                "auth": self.token(),
                "tenantId": tenant_id,
            }),
        )
        .await
    }

    pub async fn get_all_connection_strings(&self) -> Result<Vec<ConnectionStringProperties>, ApiError> {
        self.post_data(
            &dataSources::GET_ALL_CONNECTION_STRINGS,
            json!({ "auth": self.token() }),
        )
        .await
    }

    /// Returns the connections used by a content item.
    pub async fn get_item_connection_string(
        &self,
        item_id: &str,
        item_type: ContentItemObjectType,
    ) -> Result<Vec<ConnectionStringProperties>, ApiError> {
        self.post_data(
            &dataSources::GET_ITEM_CONNECTION_STRING,
            json!({
                "auth": self.token(),
                "pyramidItemIdentifier": {
                    "itemId": item_id,
                    "itemTypeObject": item_type,
                },
            }),
        )
        .await
    }

    /// Finds data servers by name.
    pub async fn find_server_by_name(
        &self,
        name: &str,
        match_type: SearchMatchType,
    ) -> Result<Vec<MaterializedItemObject>, ApiError> {
        self.post_data(
            &dataSources::FIND_SERVER_BY_NAME,
            json!({
                "auth": self.token(),
                "searchCriteria": {
                    "searchValue": name,
                    "searchMatchType": match_type,
                },
            }),
        )
        .await
    }

    /// Imports a model package into a database and returns the model id.
    ///
    /// `role_ids` is only sent with
    /// [`MaterializedRoleAssignmentType::ForceExternalRoles`]; the server
    /// ignores it otherwise.
    pub async fn import_model(
        &self,
        database_id: &str,
        package_data: &str,
        role_assignment: MaterializedRoleAssignmentType,
        role_ids: &[String],
    ) -> Result<String, ApiError> {
        let mut model = json!({
            "fileZippedData": package_data,
            "databaseId": database_id,
            "materializedRoleAssignmentType": role_assignment,
        });
        if role_assignment == MaterializedRoleAssignmentType::ForceExternalRoles {
            model["rolesIds"] = json!(role_ids);
        }

        self.post_data(
            &dataSources::IMPORT_MODEL,
            json!({
                "modelApiObject": model,
                "auth": self.token(),
            }),
        )
        .await
    }

    /// Registers a database that exists on a data server.
    pub async fn recognize_database(&self, server_id: &str, db_name: &str) -> Result<ModifiedItemsResult, ApiError> {
        self.post_data(
            &dataSources::RECOGNIZE_DATA_BASE,
            json!({
                "auth": self.token(),
                "dataBaseRecognitionObject": {
                    "serverId": server_id,
                    "dbName": db_name,
                },
            }),
        )
        .await
    }
}
