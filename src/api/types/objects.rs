//
//  pyramid-api
//  api/types/objects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Record types exchanged with the REST API.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::api_record;
use super::enums::*;

/// Reference to an item created or modified by a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemId {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A role within a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub tenant_id: String,
    pub role_name: String,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub role_settings: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_group_role: bool,
}

impl Role {
    pub fn new(tenant_id: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            role_name: role_name.into(),
            role_id: None,
            role_settings: None,
            is_hidden: false,
            is_private: false,
            is_group_role: false,
        }
    }
}

/// A user account.
///
/// `inheritance_type` and `secondary_mobile_phone` are returned by the
/// server but absent from the published reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub tenant_id: String,
    pub user_name: String,
    #[serde(default)]
    pub role_ids: Vec<String>,
    #[serde(default)]
    pub client_license_type: ClientLicenseType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub proxy_account: Option<String>,
    #[serde(default)]
    pub admin_type: AdminType,
    #[serde(rename = "statusID", default)]
    pub status_id: UserStatusId,
    #[serde(default)]
    pub created_date: Option<i64>,
    #[serde(default)]
    pub last_login_date: Option<i64>,
    #[serde(default)]
    pub ad_domain_name: Option<String>,
    #[serde(default)]
    pub principal_name: Option<String>,
    #[serde(default)]
    pub inheritance_type: Option<String>,
    #[serde(default)]
    pub secondary_mobile_phone: Option<String>,
}

impl User {
    /// A new enabled user with no license, roles, or admin rights.
    pub fn new(tenant_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_name: user_name.into(),
            role_ids: Vec::new(),
            client_license_type: ClientLicenseType::None,
            id: None,
            first_name: None,
            last_name: None,
            password: None,
            email: None,
            phone: None,
            proxy_account: None,
            admin_type: AdminType::None,
            status_id: UserStatusId::Enabled,
            created_date: Some(0),
            last_login_date: Some(0),
            ad_domain_name: None,
            principal_name: None,
            inheritance_type: None,
            secondary_mobile_phone: None,
        }
    }
}

/// A data server definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub port: i64,
    pub server_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub server_type: ServerType,
    #[serde(default)]
    pub server_ip: Option<String>,
    #[serde(default)]
    pub instance_name: Option<String>,
    #[serde(default)]
    pub write_capable: i64,
    #[serde(default)]
    pub optional_parameters: Option<String>,
    #[serde(default)]
    pub secured_by_user: bool,
    #[serde(default)]
    pub server_authentication_method: ServerAuthenticationMethod,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub additional_server_properties: Map<String, Value>,
    #[serde(default)]
    pub use_global_account: bool,
    #[serde(default)]
    pub pulse_client: Option<String>,
    #[serde(default)]
    pub default_database_name: Option<String>,
    #[serde(default)]
    pub overlay_pyramid_security: bool,
    #[serde(default)]
    pub server_ip_and_instance_name: Option<String>,
}

impl Server {
    pub fn new(server_name: impl Into<String>, port: i64) -> Self {
        Self {
            port,
            server_name: server_name.into(),
            id: None,
            server_type: ServerType::None,
            server_ip: None,
            instance_name: None,
            write_capable: 0,
            optional_parameters: None,
            secured_by_user: false,
            server_authentication_method: ServerAuthenticationMethod::UserPassword,
            user_name: None,
            password: None,
            tenant_id: None,
            additional_server_properties: Map::new(),
            use_global_account: false,
            pulse_client: None,
            default_database_name: None,
            overlay_pyramid_security: false,
            server_ip_and_instance_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettings {
    #[serde(default)]
    pub show_group_folder: Option<bool>,
    #[serde(default)]
    pub allow_webhook_channels: Option<bool>,
}

/// A tenant as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub viewer_seats: Option<i64>,
    #[serde(default)]
    pub used_viewer_seats: Option<i64>,
    #[serde(default)]
    pub pro_seats: Option<i64>,
    #[serde(default)]
    pub used_pro_seats: Option<i64>,
    #[serde(default)]
    pub tenant_settings: Option<TenantSettings>,
    #[serde(default)]
    pub pulse_key: Option<String>,
    #[serde(default)]
    pub selected_user_defaults_id: Option<String>,
    #[serde(default)]
    pub selected_user_defaults_name: Option<String>,
    #[serde(default)]
    pub default_theme_id: Option<String>,
    #[serde(default)]
    pub default_ai_server: Option<String>,
    #[serde(default)]
    pub user_defaults_overridable: Option<bool>,
}

/// A tenant to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub viewer_seats: i64,
    #[serde(default)]
    pub pro_seats: i64,
    #[serde(default)]
    pub show_group_folder: bool,
}

impl NewTenant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            viewer_seats: 0,
            pro_seats: 0,
            show_group_folder: false,
        }
    }
}

/// Pending notification counts for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIndicatorsResult {
    #[serde(default)]
    pub models: Option<i64>,
    #[serde(default)]
    pub subscriptions: Option<i64>,
    #[serde(default)]
    pub alerts: Option<i64>,
    #[serde(default)]
    pub publications: Option<i64>,
    #[serde(default)]
    pub conversations: Option<i64>,
}

/// A folder to create. The server assigns an id when `folder_id` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    pub parent_folder_id: String,
    pub folder_name: String,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Content search criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_string: String,
    pub filter_types: Vec<ContentType>,
    #[serde(default)]
    pub search_match_type: SearchMatchType,
    #[serde(default)]
    pub search_root_folder_type: SearchRootFolderType,
    #[serde(default)]
    pub start_created_date: Option<String>,
    #[serde(default)]
    pub end_created_date: Option<String>,
    #[serde(default)]
    pub start_modified_date: Option<String>,
    #[serde(default)]
    pub end_modified_date: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub data_base: Option<String>,
    #[serde(default)]
    pub is_advanced_search: bool,
    #[serde(default)]
    pub folder_path_to_search: Option<String>,
}

impl SearchParams {
    pub fn new(search_string: impl Into<String>, filter_types: Vec<ContentType>) -> Self {
        Self {
            search_string: search_string.into(),
            filter_types,
            search_match_type: SearchMatchType::Contains,
            search_root_folder_type: SearchRootFolderType::Public,
            start_created_date: None,
            end_created_date: None,
            start_modified_date: None,
            end_modified_date: None,
            server: None,
            model: None,
            data_base: None,
            is_advanced_search: false,
            folder_path_to_search: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStringProperties {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub data_base_id: Option<String>,
    #[serde(default)]
    pub data_base_name: Option<String>,
    #[serde(default)]
    pub connection_string_type: Option<ServerType>,
    #[serde(default)]
    pub is_dynamic_model: Option<bool>,
    #[serde(default)]
    pub model_params_status: Option<String>,
    #[serde(default)]
    pub security_hash: Option<String>,
}

/// A folder or piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub item_type: Option<i64>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_date: Option<i64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Result of most mutating requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedItemsResult {
    pub success: bool,
    #[serde(default)]
    pub modified_list: Vec<ItemId>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ModifiedItemsResult {
    /// Id of the first modified item, usually the one just created.
    pub fn first_id(&self) -> Option<&str> {
        self.modified_list.first().map(|item| item.id.as_str())
    }
}

/// A server, database, or model found by a data source query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedItemObject {
    pub item_id: String,
    #[serde(default)]
    pub item_caption: Option<String>,
    #[serde(default)]
    pub item_type: MaterializedItemType,
}

/// A content package to import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieApiObject {
    pub root_folder_id: String,
    /// Base64 text of the package file
    pub file_zipped_data: String,
    #[serde(default = "default_clash_option")]
    pub clash_default_option: i64,
    #[serde(default = "default_roles_assignment")]
    pub roles_assignment_type: RoleAssignmentType,
    /// Only read by the server with [`RoleAssignmentType::ForceExternalRoles`]
    #[serde(default)]
    pub role_ids: Option<Vec<String>>,
}

fn default_clash_option() -> i64 {
    1
}

fn default_roles_assignment() -> RoleAssignmentType {
    RoleAssignmentType::ForceParentRoles
}

impl PieApiObject {
    pub fn new(root_folder_id: impl Into<String>, file_zipped_data: impl Into<String>) -> Self {
        Self {
            root_folder_id: root_folder_id.into(),
            file_zipped_data: file_zipped_data.into(),
            clash_default_option: default_clash_option(),
            roles_assignment_type: default_roles_assignment(),
            role_ids: None,
        }
    }

    /// Reads a package file as upload data.
    ///
    /// Exported `.pie` files are already base64 text and are passed through
    /// unchanged; any other content is base64-encoded.
    pub fn data_from_path(path: impl AsRef<Path>) -> std::io::Result<String> {
        let bytes = std::fs::read(path)?;
        if bytes.is_ascii() {
            // ASCII bytes are valid UTF-8
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
    }
}

/// Result of a content import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResultObject {
    #[serde(default)]
    pub import_dsc_map: Vec<Value>,
    #[serde(default)]
    pub failed_items: Vec<Value>,
}

api_record!(
    ItemId,
    Role,
    User,
    Server,
    TenantSettings,
    TenantData,
    NewTenant,
    NotificationIndicatorsResult,
    NewFolder,
    SearchParams,
    ConnectionStringProperties,
    ContentItem,
    ModifiedItemsResult,
    MaterializedItemObject,
    PieApiObject,
    ImportApiResultObject,
);
