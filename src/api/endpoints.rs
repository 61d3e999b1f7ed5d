//
//  pyramid-api
//  api/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint descriptors for the methods the client wraps.
//!
//! The code generator emits the same [`Endpoint`] constants for every
//! documented method; the ones below are the subset the client calls.

/// A REST method: its documented name, path, and response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Documented method name, e.g. `getMe`
    pub name: &'static str,
    /// Path appended to the domain, e.g. `/API2/access/getMe`
    pub path: &'static str,
    /// Rust spelling of the `data` type, `()` when undocumented
    pub response: &'static str,
}

impl Endpoint {
    /// Method group, i.e. the path segment after `/API2/`.
    pub fn group(&self) -> &'static str {
        self.path
            .trim_start_matches("/API2/")
            .split('/')
            .next()
            .unwrap_or_default()
    }
}

macro_rules! endpoints {
    ($($group:ident { $($ident:ident => $name:literal : $response:literal),* $(,)? })*) => {
        $(
            #[allow(non_snake_case)]
            pub mod $group {
                use super::Endpoint;
                $(
                    pub const $ident: Endpoint = Endpoint {
                        name: $name,
                        path: concat!("/API2/", stringify!($group), "/", $name),
                        response: $response,
                    };
                )*
            }
        )*

        /// Every endpoint the client wraps.
        pub const ALL: &[Endpoint] = &[$($($group::$ident,)*)*];
    };
}

endpoints! {
    auth {
        AUTHENTICATE_USER => "authenticateUser": "String",
    }
    access {
        GET_ME => "getMe": "User",
        GET_USERS_BY_NAME => "getUsersByName": "Vec<User>",
        CREATE_TENANT => "createTenant": "ModifiedItemsResult",
        GET_TENANT_BY_NAME => "getTenantByName": "TenantData",
        DELETE_TENANTS => "deleteTenants": "ModifiedItemsResult",
        CREATE_ROLE => "createRole": "ModifiedItemsResult",
        DELETE_ROLE => "deleteRole": "ModifiedItemsResult",
        CREATE_USER_DB => "createUserDb": "ModifiedItemsResult",
    }
    notification {
        GET_NOTIFICATION_INDICATORS => "getNotificationIndicators": "NotificationIndicatorsResult",
    }
    content {
        CREATE_NEW_FOLDER => "createNewFolder": "ModifiedItemsResult",
        FIND_CONTENT_ITEM => "findContentItem": "Vec<ContentItem>",
        GET_USER_PUBLIC_ROOT_FOLDER => "getUserPublicRootFolder": "ContentItem",
        GET_PRIVATE_ROOT_FOLDER => "getPrivateRootFolder": "ContentItem",
        GET_PRIVATE_FOLDER_FOR_USER => "getPrivateFolderForUser": "ContentItem",
        GET_PUBLIC_OR_GROUP_FOLDER_BY_TENANT_ID => "getPublicOrGroupFolderByTenantId": "ContentItem",
        GET_USER_GROUP_ROOT_FOLDER => "getUserGroupRootFolder": "ContentItem",
        GET_FOLDER_ITEMS => "getFolderItems": "Vec<ContentItem>",
        IMPORT_CONTENT => "importContent": "ImportApiResultObject",
        ADD_ROLE_TO_ITEM => "addRoleToItem": "ModifiedItemsResult",
    }
    dataSources {
        CREATE_DATA_SERVER => "createDataServer": "ModifiedItemsResult",
        ADD_ROLES_TO_SERVER => "addRolesToServer": "ModifiedItemsResult",
        ADD_ROLES_TO_DATA_BASE => "addRolesToDataBase": "ModifiedItemsResult",
        CHANGE_DATA_SOURCE => "changeDataSource": "ModifiedItemsResult",
        GET_DATA_SOURCES_BY_TENANT => "getDataSourcesByTenant": "Vec<MaterializedItemObject>",
        GET_ALL_CONNECTION_STRINGS => "getAllConnectionStrings": "Vec<ConnectionStringProperties>",
        GET_ITEM_CONNECTION_STRING => "getItemConnectionString": "Vec<ConnectionStringProperties>",
        FIND_SERVER_BY_NAME => "findServerByName": "Vec<MaterializedItemObject>",
        IMPORT_MODEL => "importModel": "String",
        RECOGNIZE_DATA_BASE => "recognizeDataBase": "ModifiedItemsResult",
    }
    tasks {
        RE_RUN_TASK => "reRunTask": "ModifiedItemsResult",
        RUN_SCHEDULE => "runSchedule": "String",
    }
}

/// Finds an endpoint by method name (`getMe`) or path (`/API2/access/getMe`).
pub fn find(name_or_path: &str) -> Option<&'static Endpoint> {
    ALL.iter()
        .find(|e| e.name == name_or_path || e.path == name_or_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(access::GET_ME.path, "/API2/access/getMe");
        assert_eq!(
            dataSources::ADD_ROLES_TO_DATA_BASE.path,
            "/API2/dataSources/addRolesToDataBase"
        );
        assert_eq!(tasks::RUN_SCHEDULE.group(), "tasks");
    }

    #[test]
    fn test_find() {
        assert_eq!(find("getMe"), Some(&access::GET_ME));
        assert_eq!(
            find("/API2/content/getFolderItems").map(|e| e.name),
            Some("getFolderItems")
        );
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_all_unique() {
        let mut paths: Vec<_> = ALL.iter().map(|e| e.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ALL.len());
        assert_eq!(ALL.len(), 32);
    }
}
