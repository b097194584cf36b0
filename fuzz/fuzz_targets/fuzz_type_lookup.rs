// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hdds_xtypes::{from_bytes, Encoding, TypeLookupReply, TypeLookupRequest, TypeLookupService};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let service = TypeLookupService::with_page_size(4);
    for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
        // Fuzz request decoding and the handler behind it
        if let Ok(request) = from_bytes::<TypeLookupRequest>(data, encoding) {
            let _ = service.handle_request(&request);
        }

        // Fuzz reply decoding
        let _ = from_bytes::<TypeLookupReply>(data, encoding);
    }
});
