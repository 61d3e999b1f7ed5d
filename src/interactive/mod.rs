//
//  pyramid-api
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive prompts used when a command is missing input.

pub mod prompt;

pub use prompt::*;
