/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Payload codec layer.
//!
//! Frames application values as canonical JSON bytes on the way to the
//! transport and back into [`serde_json::Value`] on the way out. Framing is
//! symmetric: `decode(encode(v)) == v` for every representable value. A bare
//! string is framed as a JSON string (`"Hello World"` becomes the quoted,
//! escaped form), which is what distinguishes an adapter-framed payload from
//! raw transport bytes.
//!
//! ```
//! use pubsub_adapter::codec;
//! use serde_json::json;
//!
//! let payload = codec::encode(&json!({"hello": "world"})).unwrap();
//! assert_eq!(payload, br#"{"hello":"world"}"#);
//! assert_eq!(codec::decode(&payload).unwrap(), json!({"hello": "world"}));
//! ```

mod json;

pub use json::{decode, encode};
