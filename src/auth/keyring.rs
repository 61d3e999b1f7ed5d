//
//  pyramid-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Token Storage
//!
//! Session tokens are stored in the platform's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `pyramid-api`
//! - **Username/Key**: the Pyramid domain, normalized without a trailing `/`
//! - **Password/Value**: the session token

use anyhow::Result;
use keyring::Entry;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "pyramid-api";

/// Session token storage in the system keyring.
///
/// # Example
///
/// ```rust,no_run
/// use pyramid_api::auth::KeyringStore;
///
/// fn example() -> anyhow::Result<()> {
///     let store = KeyringStore::new();
///     store.store("https://pyramid.example.com", "token")?;
///
///     if let Some(token) = store.get("https://pyramid.example.com/")? {
///         println!("Found a stored session");
///     }
///     Ok(())
/// }
/// ```
///
/// # Notes
///
/// - The keyring may require user interaction on first access.
/// - On Linux, a secret service daemon must be running.
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a keyring store with the default service name.
    ///
    /// No keyring access occurs during construction.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores the session token for `domain`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the keyring service is unavailable or access is denied.
    pub fn store(&self, domain: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key(domain))?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Retrieves the session token for `domain`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if nothing is stored for the domain; `Err` only for keyring
    /// access failures.
    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key(domain))?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the session token for `domain`. Deleting a missing entry succeeds.
    pub fn delete(&self, domain: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key(domain))?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keyring key for a domain.
fn key(domain: &str) -> &str {
    domain.trim_end_matches('/')
}
