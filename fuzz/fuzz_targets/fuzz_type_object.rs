// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hdds_xtypes::type_object::TypeInformation;
use hdds_xtypes::{from_bytes, make_type_identifier, to_bytes, Encoding, TypeObject};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
        // A decoded TypeObject must re-encode to a stable form and hash
        if let Ok(object) = from_bytes::<TypeObject>(data, encoding) {
            let bytes = to_bytes(&object, encoding).expect("decoded object re-encodes");
            let again: TypeObject = from_bytes(&bytes, encoding).expect("re-encoded object decodes");
            assert_eq!(to_bytes(&again, encoding).expect("stable encoding"), bytes);
            let _ = make_type_identifier(&object);
        }

        let _ = from_bytes::<TypeInformation>(data, encoding);
    }

    let _ = hdds_xtypes::type_object::decompress_type_object(data);
});
