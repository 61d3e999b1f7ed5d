//
//  pyramid-api
//  api/types/enums.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Integer-backed enums used by the typed records.

crate::int_enum! {
    /// License assigned to a user.
    #[derive(Default)]
    pub enum ClientLicenseType {
        #[default]
        None = 0,
        Viewer = 100,
        Professional = 200,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum AdminType {
        #[default]
        None = 0,
        DomainAdmin = 1,
        EnterpriseAdmin = 2,
    }
}

crate::int_enum! {
    /// Wire name `statusID`.
    #[derive(Default)]
    pub enum UserStatusId {
        Disabled = 0,
        #[default]
        Enabled = 1,
    }
}

crate::int_enum! {
    /// Kind of data server.
    #[derive(Default)]
    pub enum ServerType {
        #[default]
        None = 0,
        MsOlap = 1,
        MsOlapTabular = 2,
        PowerPivot = 3,
        InMemory = 4,
        SqlServer = 5,
        MySql = 6,
        MonetDb = 7,
        PostgreSql = 8,
        Oracle = 9,
        Db2 = 10,
        Teradata = 11,
        Drill = 12,
        PaImdb = 13,
        Redshift = 14,
        Presto = 15,
        Athena = 16,
        BigQuery = 17,
        Hive = 18,
        Salesforce = 19,
        SapHana = 20,
        GoogleAnalytics = 21,
        MongoDbBiCx = 22,
        SqlServerAzure = 23,
        Snowflake = 24,
        Sybase = 25,
        Firebird = 26,
        Facebook = 27,
        Vertica = 28,
        Twitter = 29,
        OdbcServer = 30,
        SharePoint = 31,
        SapBw = 32,
        AzureBlobStorage = 33,
        AmazonS3Storage = 34,
        Greenplum = 35,
        Exasol = 36,
        MemSql = 37,
        MariaDb = 38,
        Netezza = 39,
        Glue = 40,
        Impala = 41,
        AzureSynapse = 42,
        OdbcDirectQuery = 43,
        As400 = 44,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum ServerAuthenticationMethod {
        #[default]
        UserPassword = 0,
        GlobalActiveDirectory = 1,
        SpecificActiveDirectory = 2,
        ServiceAccount = 3,
        EndUser = 4,
        DefaultAwsCredentialsProviderChain = 5,
        Keytab = 6,
        Snc = 7,
        SapLogonTicket = 8,
        Saml = 9,
    }
}

crate::int_enum! {
    /// Level of access a role has on an item.
    #[derive(Default)]
    pub enum AccessType {
        None = 0,
        #[default]
        Read = 1,
        Write = 2,
        View = 3,
        Admin = 4,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum SearchRootFolderType {
        Private = 0,
        #[default]
        Public = 1,
        Group = 2,
        OneOff = 3,
        DeletedContent = 4,
        CrossTenant = 5,
        Recent = 6,
        Favorite = 7,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum SearchMatchType {
        #[default]
        Contains = 0,
        NotContains = 1,
        Equals = 2,
        StartsWith = 3,
        EndsWith = 4,
    }
}

crate::int_enum! {
    /// Content type used by searches. Value 7 is not assigned.
    pub enum ContentType {
        None = 0,
        Asset = 1,
        Calculation = 2,
        DataDiscovery = 3,
        EtlFlow = 4,
        Folder = 5,
        Publisher = 6,
        Storyboard = 8,
    }
}

crate::int_enum! {
    /// Item type used by connection string lookups.
    ///
    /// Numbered differently from [`ContentType`].
    pub enum ContentItemObjectType {
        Asset = 0,
        Publisher = 1,
        Storyboard = 2,
        Calculation = 3,
        DataDiscovery = 4,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum MaterializedItemType {
        #[default]
        None = 0,
        Database = 1,
        ModelingModel = 2,
        Server = 3,
        MachineLearningModel = 4,
        Schedule = 5,
        Model = 6,
        Output = 7,
    }
}

crate::int_enum! {
    /// How roles are assigned to imported content.
    #[derive(Default)]
    pub enum RoleAssignmentType {
        #[default]
        UseDefaultBehavior = 0,
        ForcePackageRoles = 1,
        ForceExternalRoles = 2,
        ForceParentRoles = 3,
    }
}

crate::int_enum! {
    /// How roles are assigned to an imported model.
    #[derive(Default)]
    pub enum MaterializedRoleAssignmentType {
        #[default]
        UseDefaultBehavior = 0,
        ForcePackageRoles = 1,
        ForceExternalRoles = 2,
        ForceParentRoles = 3,
    }
}

crate::int_enum! {
    #[derive(Default)]
    pub enum ValidRootFolderType {
        Private = 0,
        #[default]
        Public = 1,
        Group = 2,
    }
}
