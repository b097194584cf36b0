// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeLookup service (DDS-XTypes v1.3 Section 7.6.3.3)
//!
//! Remote participants that see an unknown TypeIdentifier ask for its
//! TypeObject (`getTypes`) and for the identifiers it depends on
//! (`getTypeDependencies`, paged with a continuation point).
//! [`TypeLookupService`] holds the local cache those calls are answered
//! from, and [`rpc`] carries the request/reply structures and their codec.
//!
//! ```ignore
//! let service = TypeLookupService::new();
//! let id = service.register_type(complete_object)?;
//! let reply = service.handle_request(&request);
//! let engine = TypeAssignability::new(&service.snapshot());
//! ```

mod minimal;
pub mod rpc;
mod service;

pub use rpc::{
    CallResult, ContinuationPoint, RemoteExceptionCode, ReplyHeader, RequestHeader, SampleIdentity,
    TypeLookupCall, TypeLookupGetTypeDependenciesIn, TypeLookupGetTypeDependenciesOut,
    TypeLookupGetTypeDependenciesResult, TypeLookupGetTypesIn, TypeLookupGetTypesOut,
    TypeLookupGetTypesResult, TypeLookupReply, TypeLookupRequest, TypeLookupReturn,
    CK_TYPES, CK_TYPE_DEPENDENCIES, CONTINUATION_POINT_LEN,
};
pub use service::{TypeLookupService, DEFAULT_PAGE_SIZE, RETCODE_BAD_PARAMETER};
